//! Admin-authored announcements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A published notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Document id assigned by the store.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Body summary.
    pub summary: String,
    /// Optional external link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a notice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotice {
    /// Headline (required).
    pub title: String,
    /// Body summary (required).
    pub summary: String,
    /// Optional external link; must be http(s) when present.
    #[serde(default)]
    pub link: Option<String>,
}

impl NewNotice {
    /// Create a notice input without a link.
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            link: None,
        }
    }

    /// Attach a link. Blank links are treated as absent.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        let link = link.into();
        self.link = if link.trim().is_empty() {
            None
        } else {
            Some(link.trim().to_string())
        };
        self
    }

    /// Check required fields before submission.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation_field("title", "제목을 입력하세요"));
        }
        if self.summary.trim().is_empty() {
            return Err(Error::validation_field("summary", "요약을 입력하세요"));
        }
        if let Some(link) = &self.link {
            if !(link.starts_with("http://") || link.starts_with("https://")) {
                return Err(Error::validation_field(
                    "link",
                    "외부 페이지 링크만 가능합니다",
                ));
            }
        }
        Ok(())
    }
}
