//! Static brand tables for the supported institution types.
//!
//! These are the source of the derived defaults applied when the admin
//! switches the institution type: the color theme, the first headline of
//! the message list, and the first CTA template.

use crate::types::{ColorTheme, CtaButtons, InstitutionType, WhiteLabelConfig};

/// Institution name used when nothing has been configured.
pub const DEFAULT_INSTITUTION_NAME: &str = "LocalBank ONE";

/// A palette as static strings.
struct Palette {
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    background: &'static str,
    text: &'static str,
}

const NONGHYUP_PALETTE: Palette = Palette {
    primary: "#00843D",
    secondary: "#FFB800",
    accent: "#005826",
    background: "#F5F9F7",
    text: "#1A1A1A",
};

const SHINHYUP_PALETTE: Palette = Palette {
    primary: "#0066B3",
    secondary: "#00A0E9",
    accent: "#004A80",
    background: "#F0F7FC",
    text: "#1A1A1A",
};

const NONGHYUP_MESSAGES: [&str; 3] = [
    "지역 주민을 위한 디지털 안내 창구",
    "농협과 함께하는 지역 금융 안내 서비스",
    "편리한 정보 확인과 상담 연결",
];

const SHINHYUP_MESSAGES: [&str; 3] = [
    "조합원과 더 가까운 디지털 소통 창구",
    "신협과 함께하는 생활 금융 안내",
    "가까운 금융, 쉬운 상담",
];

/// A CTA label pair as static strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtaTemplate {
    /// Primary button label.
    pub primary: &'static str,
    /// Secondary button label.
    pub secondary: &'static str,
}

impl CtaTemplate {
    /// Owned button labels.
    pub fn to_buttons(&self) -> CtaButtons {
        CtaButtons::new(self.primary, self.secondary)
    }
}

const NONGHYUP_CTAS: [CtaTemplate; 2] = [
    CtaTemplate {
        primary: "문의하기",
        secondary: "안내받기",
    },
    CtaTemplate {
        primary: "상담 신청",
        secondary: "서비스 안내",
    },
];

const SHINHYUP_CTAS: [CtaTemplate; 2] = [
    CtaTemplate {
        primary: "상담 요청",
        secondary: "바로 문의",
    },
    CtaTemplate {
        primary: "문의하기",
        secondary: "서비스 보기",
    },
];

/// Default palette for an institution type.
pub fn color_theme(institution_type: InstitutionType) -> ColorTheme {
    let p = match institution_type {
        InstitutionType::Nonghyup => &NONGHYUP_PALETTE,
        InstitutionType::Shinhyup => &SHINHYUP_PALETTE,
    };
    ColorTheme {
        primary: p.primary.to_string(),
        secondary: p.secondary.to_string(),
        accent: p.accent.to_string(),
        background: p.background.to_string(),
        text: p.text.to_string(),
    }
}

/// Headline presets for an institution type. Never empty.
pub fn main_messages(institution_type: InstitutionType) -> &'static [&'static str] {
    match institution_type {
        InstitutionType::Nonghyup => &NONGHYUP_MESSAGES,
        InstitutionType::Shinhyup => &SHINHYUP_MESSAGES,
    }
}

/// CTA presets for an institution type. Never empty.
pub fn cta_templates(institution_type: InstitutionType) -> &'static [CtaTemplate] {
    match institution_type {
        InstitutionType::Nonghyup => &NONGHYUP_CTAS,
        InstitutionType::Shinhyup => &SHINHYUP_CTAS,
    }
}

/// Tone-and-manner description shown in the settings editor and about page.
pub fn tone_description(institution_type: InstitutionType) -> &'static str {
    match institution_type {
        InstitutionType::Nonghyup => "공공성과 안정성을 강조하는 공식적인 톤",
        InstitutionType::Shinhyup => "친근하고 일상적인 소통 중심의 톤",
    }
}

/// The built-in configuration used when nothing has been persisted.
pub fn default_config() -> WhiteLabelConfig {
    let institution_type = InstitutionType::Nonghyup;
    WhiteLabelConfig {
        institution_type,
        institution_name: DEFAULT_INSTITUTION_NAME.to_string(),
        logo_url: None,
        color_theme: color_theme(institution_type),
        main_message: main_messages(institution_type)[0].to_string(),
        cta_buttons: cta_templates(institution_type)[0].to_buttons(),
    }
}
