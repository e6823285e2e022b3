//! Shallow merge of a [`WhiteLabelPatch`] onto a [`WhiteLabelConfig`].

use localbank_core::brand;
use localbank_core::{WhiteLabelConfig, WhiteLabelPatch};

/// Apply `patch` to `config` in place.
///
/// Only top-level fields present in the patch change; nested objects are
/// replaced whole. When the patch names an institution type, the theme,
/// headline and CTA labels are reset to that type's first defaults before
/// any of them carried by the patch are applied. An empty `logo_url` clears
/// the logo.
pub fn apply_patch(config: &mut WhiteLabelConfig, patch: WhiteLabelPatch) {
    if let Some(institution_type) = patch.institution_type {
        config.institution_type = institution_type;
        config.color_theme = brand::color_theme(institution_type);
        config.main_message = brand::main_messages(institution_type)[0].to_string();
        config.cta_buttons = brand::cta_templates(institution_type)[0].to_buttons();
    }
    if let Some(name) = patch.institution_name {
        config.institution_name = name;
    }
    if let Some(logo_url) = patch.logo_url {
        config.logo_url = if logo_url.is_empty() {
            None
        } else {
            Some(logo_url)
        };
    }
    if let Some(theme) = patch.color_theme {
        config.color_theme = theme;
    }
    if let Some(message) = patch.main_message {
        config.main_message = message;
    }
    if let Some(buttons) = patch.cta_buttons {
        config.cta_buttons = buttons;
    }
}

/// Return a copy of `config` with `patch` applied.
pub fn merged(config: &WhiteLabelConfig, patch: WhiteLabelPatch) -> WhiteLabelConfig {
    let mut out = config.clone();
    apply_patch(&mut out, patch);
    out
}
