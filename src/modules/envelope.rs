// Wire format shared with the Later app.
// Field names and shapes are part of the handoff contract; do not rename.

use serde::{Deserialize, Serialize};

/// Schema version of the export payload.
pub const EXPORT_VERSION: &str = "1.0.0";

/// A saved-URL destination. Stored under the "categories" key of the sync
/// store (insertion order) and snapshotted into export envelopes.
///
/// Timestamps are optional on locally-stored categories; exported
/// snapshots always carry them (defaulted at envelope assembly).
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One captured page. Immutable once built; ownership transfers to the
/// Later app on successful handoff.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// The versioned payload delivered over the scheme link or the clipboard.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub urls: Vec<UrlRecord>,
    pub categories: Vec<Category>,
    pub version: String,
    pub exported_at: String,
}

/// Assemble the export envelope. Records keep their input order.
///
/// Category snapshots get any missing timestamps filled with the export
/// instant so the wire format always carries them. Does NOT validate that
/// every record's categoryId is present in `categories`; the capture flow
/// enforces that before records are built.
pub fn build_envelope(records: Vec<UrlRecord>, categories: &[Category]) -> ExportEnvelope {
    let now = chrono::Utc::now().to_rfc3339();

    let snapshots = categories
        .iter()
        .map(|c| Category {
            id: c.id.clone(),
            name: c.name.clone(),
            created_at: Some(c.created_at.clone().unwrap_or_else(|| now.clone())),
            updated_at: Some(c.updated_at.clone().unwrap_or_else(|| now.clone())),
        })
        .collect();

    ExportEnvelope {
        urls: records,
        categories: snapshots,
        version: EXPORT_VERSION.to_string(),
        exported_at: now,
    }
}
