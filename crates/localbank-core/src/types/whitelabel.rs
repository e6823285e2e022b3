//! White-label configuration and its partial-update patch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::brand;
use crate::error::Error;

/// Brand variant of the cooperative running the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionType {
    /// Agricultural cooperative (농협).
    #[default]
    Nonghyup,
    /// Credit union (신협).
    Shinhyup,
}

impl InstitutionType {
    /// All supported institution types, in display order.
    pub const ALL: [InstitutionType; 2] = [InstitutionType::Nonghyup, InstitutionType::Shinhyup];

    /// Wire name used in persisted configuration and form values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nonghyup => "nonghyup",
            Self::Shinhyup => "shinhyup",
        }
    }

    /// Korean display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nonghyup => "농협",
            Self::Shinhyup => "신협",
        }
    }
}

impl fmt::Display for InstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstitutionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "nonghyup" => Ok(Self::Nonghyup),
            "shinhyup" => Ok(Self::Shinhyup),
            other => Err(Error::validation_field(
                "institutionType",
                format!("unknown institution type '{other}'"),
            )),
        }
    }
}

/// Five-color brand palette. Values are CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTheme {
    /// Main brand color.
    pub primary: String,
    /// Secondary accent used in gradients and icons.
    pub secondary: String,
    /// Darker accent.
    pub accent: String,
    /// Page background tint.
    pub background: String,
    /// Body text color.
    pub text: String,
}

/// Labels for the two call-to-action buttons on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaButtons {
    /// Label of the primary button (links to the inquiry form).
    pub primary: String,
    /// Label of the secondary button (links to the services page).
    pub secondary: String,
}

impl CtaButtons {
    /// Create a pair of CTA labels.
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// The branding and headline content rendered by every page.
///
/// Serialized with camelCase keys, which is the persisted format in both the
/// local store and the remote configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteLabelConfig {
    /// Brand variant.
    pub institution_type: InstitutionType,
    /// Display name of the institution.
    pub institution_name: String,
    /// Logo as a data URI or remote URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Brand palette.
    pub color_theme: ColorTheme,
    /// Hero headline.
    pub main_message: String,
    /// CTA button labels.
    pub cta_buttons: CtaButtons,
}

impl Default for WhiteLabelConfig {
    fn default() -> Self {
        brand::default_config()
    }
}

/// A partial [`WhiteLabelConfig`]: every top-level field is optional.
///
/// Nested objects (`color_theme`, `cta_buttons`) are whole values; a patch
/// that carries one replaces the current one entirely.
/// Whether `url` may be used as a logo `src`: empty (no logo), `http://`,
/// `https://`, or an inline `data:image/` URL. Schemes compare
/// case-insensitively.
pub fn is_allowed_logo_url(url: &str) -> bool {
    let url = url.trim();
    let lower = url.get(..11).unwrap_or(url).to_ascii_lowercase();
    url.is_empty()
        || lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("data:image/")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhiteLabelPatch {
    /// New brand variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<InstitutionType>,
    /// New institution name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    /// New logo. An empty string clears the logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// New palette.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_theme: Option<ColorTheme>,
    /// New hero headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_message: Option<String>,
    /// New CTA labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_buttons: Option<CtaButtons>,
}

impl WhiteLabelPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// The brand-switch patch: the type plus its first default theme,
    /// message and CTA pair. Name and logo are left alone.
    pub fn for_institution(institution_type: InstitutionType) -> Self {
        Self {
            institution_type: Some(institution_type),
            color_theme: Some(brand::color_theme(institution_type)),
            main_message: Some(brand::main_messages(institution_type)[0].to_string()),
            cta_buttons: Some(brand::cta_templates(institution_type)[0].to_buttons()),
            ..Self::default()
        }
    }

    /// A patch carrying every field of `config`.
    pub fn from_config(config: &WhiteLabelConfig) -> Self {
        Self {
            institution_type: Some(config.institution_type),
            institution_name: Some(config.institution_name.clone()),
            logo_url: Some(config.logo_url.clone().unwrap_or_default()),
            color_theme: Some(config.color_theme.clone()),
            main_message: Some(config.main_message.clone()),
            cta_buttons: Some(config.cta_buttons.clone()),
        }
    }

    /// Set the institution type.
    pub fn with_institution_type(mut self, institution_type: InstitutionType) -> Self {
        self.institution_type = Some(institution_type);
        self
    }

    /// Set the institution name.
    pub fn with_institution_name(mut self, name: impl Into<String>) -> Self {
        self.institution_name = Some(name.into());
        self
    }

    /// Set (or, with an empty string, clear) the logo.
    pub fn with_logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    /// Set the palette.
    pub fn with_color_theme(mut self, theme: ColorTheme) -> Self {
        self.color_theme = Some(theme);
        self
    }

    /// Set the hero headline.
    pub fn with_main_message(mut self, message: impl Into<String>) -> Self {
        self.main_message = Some(message.into());
        self
    }

    /// Set the CTA labels.
    pub fn with_cta_buttons(mut self, buttons: CtaButtons) -> Self {
        self.cta_buttons = Some(buttons);
        self
    }

    /// Returns `true` if the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reject a logo that is not an image URL (see [`is_allowed_logo_url`]).
    pub fn validate(&self) -> crate::error::Result<()> {
        match self.logo_url.as_deref() {
            Some(url) if !is_allowed_logo_url(url) => Err(Error::validation_field(
                "logoUrl",
                "로고는 http(s) 주소 또는 data:image 형식만 가능합니다",
            )),
            _ => Ok(()),
        }
    }
}
