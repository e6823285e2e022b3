//! Domain types shared by the store, the data access layer and the pages.

mod inquiry;
mod notice;
mod whitelabel;

pub use inquiry::{Inquiry, InquiryStatus, NewInquiry};
pub use notice::{NewNotice, Notice};
pub use whitelabel::{
    ColorTheme, CtaButtons, InstitutionType, WhiteLabelConfig, WhiteLabelPatch, is_allowed_logo_url,
};
