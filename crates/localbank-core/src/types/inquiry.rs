//! Publicly submitted contact requests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Workflow state of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    /// Newly submitted.
    #[default]
    Pending,
    /// Picked up by staff.
    Processing,
    /// Answered.
    Completed,
}

impl InquiryStatus {
    /// All statuses in workflow order.
    pub const ALL: [InquiryStatus; 3] = [
        InquiryStatus::Pending,
        InquiryStatus::Processing,
        InquiryStatus::Completed,
    ];

    /// Stored value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
        }
    }

    /// Korean badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "대기",
            Self::Processing => "처리중",
            Self::Completed => "완료",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            other => Err(Error::validation_field(
                "status",
                format!("unknown inquiry status '{other}'"),
            )),
        }
    }
}

/// A stored inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    /// Document id assigned by the store.
    pub id: String,
    /// Name of the person asking.
    pub name: String,
    /// Phone number or other contact detail.
    pub contact: String,
    /// Question text.
    pub content: String,
    /// Workflow state.
    pub status: InquiryStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

/// Input for the public inquiry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInquiry {
    /// Name (required).
    pub name: String,
    /// Contact detail (required).
    pub contact: String,
    /// Question text (required).
    pub content: String,
}

impl NewInquiry {
    /// Create an inquiry input.
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            content: content.into(),
        }
    }

    /// Check required fields before submission.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation_field("name", "이름을 입력해주세요"));
        }
        if self.contact.trim().is_empty() {
            return Err(Error::validation_field("contact", "연락처를 입력해주세요"));
        }
        if self.content.trim().is_empty() {
            return Err(Error::validation_field("content", "문의 내용을 입력해주세요"));
        }
        Ok(())
    }
}
