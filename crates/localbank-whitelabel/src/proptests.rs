//! Property-based tests for the configuration merge.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use localbank_core::{ColorTheme, CtaButtons, InstitutionType, WhiteLabelPatch, brand};
    use localbank_storage::MemoryLocalStore;
    use proptest::prelude::*;

    use crate::merge::merged;
    use crate::store::WhiteLabelStore;

    fn institution_type() -> impl Strategy<Value = InstitutionType> {
        prop_oneof![
            Just(InstitutionType::Nonghyup),
            Just(InstitutionType::Shinhyup)
        ]
    }

    fn color() -> impl Strategy<Value = String> {
        "#[0-9A-F]{6}"
    }

    fn theme() -> impl Strategy<Value = ColorTheme> {
        (color(), color(), color(), color(), color()).prop_map(
            |(primary, secondary, accent, background, text)| ColorTheme {
                primary,
                secondary,
                accent,
                background,
                text,
            },
        )
    }

    fn patch() -> impl Strategy<Value = WhiteLabelPatch> {
        (
            proptest::option::of(institution_type()),
            proptest::option::of("\\PC{0,12}"),
            proptest::option::of(prop_oneof![
                Just(String::new()),
                Just("https://cdn.example.com/logo.png".to_string())
            ]),
            proptest::option::of(theme()),
            proptest::option::of("\\PC{1,20}"),
            proptest::option::of(("\\PC{1,6}", "\\PC{1,6}").prop_map(|(a, b)| CtaButtons::new(a, b))),
        )
            .prop_map(
                |(institution_type, institution_name, logo_url, color_theme, main_message, cta_buttons)| {
                    WhiteLabelPatch {
                        institution_type,
                        institution_name,
                        logo_url,
                        color_theme,
                        main_message,
                        cta_buttons,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn test_update_is_idempotent(first in patch(), p in patch()) {
            let base = merged(&brand::default_config(), first);
            let once = merged(&base, p.clone());
            let twice = merged(&once, p);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_type_only_patch_resets_derived(first in patch(), t in institution_type()) {
            let base = merged(&brand::default_config(), first);
            let out = merged(&base, WhiteLabelPatch::new().with_institution_type(t));
            prop_assert_eq!(out.color_theme, brand::color_theme(t));
            prop_assert_eq!(out.main_message, brand::main_messages(t)[0]);
            prop_assert_eq!(out.cta_buttons, brand::cta_templates(t)[0].to_buttons());
            prop_assert_eq!(out.institution_name, base.institution_name);
            prop_assert_eq!(out.logo_url, base.logo_url);
        }

        #[test]
        fn test_full_patch_of_config_is_identity(p in patch()) {
            let config = merged(&brand::default_config(), p);
            let out = merged(&brand::default_config(), WhiteLabelPatch::from_config(&config));
            prop_assert_eq!(out, config);
        }

        #[test]
        fn test_store_local_roundtrip(patches in proptest::collection::vec(patch(), 0..5)) {
            let store = WhiteLabelStore::new(Arc::new(MemoryLocalStore::new()));
            for p in patches {
                store.update_config(p);
            }
            let expected = store.get_config();
            prop_assert_eq!(store.reload_from_local().get_config(), expected);
        }
    }
}
