//! LocalBank Core: shared types, brand tables, errors, and configuration.
//!
//! This crate provides the foundational types used across all LocalBank
//! crates. It has no internal dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`brand`]: Static per-institution tables (themes, messages, CTAs, tone)
//! - [`config`]: `ConfigManager` trait and TOML dotted-key helpers
//! - [`error`]: Error types and Result alias
//! - [`stats`]: Admin dashboard statistics
//! - [`types`]: White-label configuration, notices, inquiries

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod brand;
pub mod config;
pub mod error;
pub mod stats;
pub mod types;

// Re-export key types at crate root for convenience
pub use config::ConfigManager;
pub use error::{Error, Result};
pub use stats::DashboardStats;
pub use types::{
    ColorTheme, CtaButtons, Inquiry, InquiryStatus, InstitutionType, NewInquiry, NewNotice,
    Notice, WhiteLabelConfig, WhiteLabelPatch, is_allowed_logo_url,
};
