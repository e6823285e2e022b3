//! Typed data access for notices, inquiries and the remote configuration
//! document.
//!
//! Every operation is a single request against the [`DocumentStore`]. There
//! is no caching and no retry; errors come back with their original cause.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use localbank_core::{
    Inquiry, InquiryStatus, NewInquiry, NewNotice, Notice, WhiteLabelConfig, WhiteLabelPatch,
};

use crate::error::{Error, Result};
use crate::timestamp::{Timestamp, normalize};
use crate::traits::{Direction, Document, DocumentStore, Fields, Query};

/// Collection holding notices.
pub const NOTICES: &str = "notices";

/// Collection holding inquiries.
pub const INQUIRIES: &str = "inquiries";

/// Collection holding the white-label configuration document.
pub const CONFIGS: &str = "whitelabel-configs";

/// Id of the single configuration slot.
pub const DEFAULT_CONFIG_ID: &str = "default";

const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";

/// Data access layer over a [`DocumentStore`].
#[derive(Clone)]
pub struct DataAccess {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for DataAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataAccess")
            .field("store", &self.store.name())
            .finish()
    }
}

impl DataAccess {
    /// Wrap a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    // ------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------

    /// All notices, newest first.
    pub async fn list_notices(&self) -> Result<Vec<Notice>> {
        let docs = self
            .store
            .query(NOTICES, Query::all().order_by(CREATED_AT, Direction::Desc))
            .await?;
        docs.iter().map(decode_notice).collect()
    }

    /// Create a notice and return its id.
    pub async fn create_notice(&self, notice: NewNotice) -> Result<String> {
        notice.validate()?;
        let now = Timestamp::now().to_value();
        let mut fields = Fields::new();
        fields.insert("title".into(), Value::String(notice.title));
        fields.insert("summary".into(), Value::String(notice.summary));
        if let Some(link) = notice.link {
            fields.insert("link".into(), Value::String(link));
        }
        fields.insert(CREATED_AT.into(), now.clone());
        fields.insert(UPDATED_AT.into(), now);

        let id = self.store.create(NOTICES, fields).await?;
        log::debug!("Created notice {id}");
        Ok(id)
    }

    /// Delete a notice.
    pub async fn delete_notice(&self, id: &str) -> Result<()> {
        self.store.delete(NOTICES, id).await?;
        log::debug!("Deleted notice {id}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inquiries
    // ------------------------------------------------------------------

    /// All inquiries, newest first.
    pub async fn list_inquiries(&self) -> Result<Vec<Inquiry>> {
        let docs = self
            .store
            .query(
                INQUIRIES,
                Query::all().order_by(CREATED_AT, Direction::Desc),
            )
            .await?;
        docs.iter().map(decode_inquiry).collect()
    }

    /// Inquiries in one status, newest first.
    pub async fn list_inquiries_by_status(&self, status: InquiryStatus) -> Result<Vec<Inquiry>> {
        let docs = self
            .store
            .query(
                INQUIRIES,
                Query::all()
                    .filter_eq("status", status.as_str())
                    .order_by(CREATED_AT, Direction::Desc),
            )
            .await?;
        docs.iter().map(decode_inquiry).collect()
    }

    /// Record a public inquiry. The status always starts as pending.
    pub async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<String> {
        inquiry.validate()?;
        let now = Timestamp::now().to_value();
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::String(inquiry.name));
        fields.insert("contact".into(), Value::String(inquiry.contact));
        fields.insert("content".into(), Value::String(inquiry.content));
        fields.insert(
            "status".into(),
            Value::String(InquiryStatus::Pending.as_str().into()),
        );
        fields.insert(CREATED_AT.into(), now.clone());
        fields.insert(UPDATED_AT.into(), now);

        let id = self.store.create(INQUIRIES, fields).await?;
        log::debug!("Created inquiry {id}");
        Ok(id)
    }

    /// Move an inquiry to a new status.
    pub async fn update_inquiry_status(&self, id: &str, status: InquiryStatus) -> Result<()> {
        let mut fields = Fields::new();
        fields.insert("status".into(), Value::String(status.as_str().into()));
        fields.insert(UPDATED_AT.into(), Timestamp::now().to_value());
        self.store.update_fields(INQUIRIES, id, fields).await?;
        log::debug!("Inquiry {id} -> {status}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Configuration document
    // ------------------------------------------------------------------

    /// Fetch the stored configuration, if one has been saved.
    pub async fn get_config_document(&self) -> Result<Option<WhiteLabelPatch>> {
        let Some(doc) = self.store.get(CONFIGS, DEFAULT_CONFIG_ID).await? else {
            return Ok(None);
        };
        let mut fields = doc.fields;
        fields.remove(UPDATED_AT);
        let patch: WhiteLabelPatch = serde_json::from_value(Value::Object(fields))
            .map_err(|e| Error::decode(format!("configuration document: {e}")))?;
        Ok(Some(patch))
    }

    /// Upsert the configuration into the fixed slot.
    pub async fn put_config_document(&self, config: &WhiteLabelConfig) -> Result<()> {
        // A cleared logo is written as "" so the merge overwrites it.
        let patch = WhiteLabelPatch::from_config(config);
        let mut fields = match serde_json::to_value(&patch)? {
            Value::Object(map) => map,
            _ => return Err(Error::decode("configuration did not serialize to an object")),
        };
        fields.insert(UPDATED_AT.into(), Timestamp::now().to_value());
        self.store
            .upsert_merge(CONFIGS, DEFAULT_CONFIG_ID, fields)
            .await?;
        log::debug!("Saved configuration document");
        Ok(())
    }
}

// ============================================================================
// Decoding
// ============================================================================

fn string_field(doc: &Document, field: &str) -> String {
    doc.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn timestamps(doc: &Document) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let created_at = doc
        .get(CREATED_AT)
        .and_then(normalize)
        .ok_or_else(|| Error::decode(format!("{}: missing or invalid createdAt", doc.id)))?;
    let updated_at = doc.get(UPDATED_AT).and_then(normalize).unwrap_or(created_at);
    Ok((created_at, updated_at))
}

fn decode_notice(doc: &Document) -> Result<Notice> {
    let (created_at, updated_at) = timestamps(doc)?;
    let link = doc
        .get("link")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok(Notice {
        id: doc.id.clone(),
        title: string_field(doc, "title"),
        summary: string_field(doc, "summary"),
        link,
        created_at,
        updated_at,
    })
}

fn decode_inquiry(doc: &Document) -> Result<Inquiry> {
    let (created_at, updated_at) = timestamps(doc)?;
    let status = match doc.get("status").and_then(Value::as_str) {
        Some(raw) => raw.parse()?,
        None => InquiryStatus::default(),
    };
    Ok(Inquiry {
        id: doc.id.clone(),
        name: string_field(doc, "name"),
        contact: string_field(doc, "contact"),
        content: string_field(doc, "content"),
        status,
        created_at,
        updated_at,
    })
}
