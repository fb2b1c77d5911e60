//! The Document entity and the shapes that flow in and out of the workflow.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Default page size when the caller supplies none (or an invalid one).
pub const DEFAULT_LIMIT: i64 = 10;

/// A persisted document: blob locator plus metadata.
///
/// Only `description` and `tags` ever change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub file_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub storage_bucket: String,
    pub storage_key: String,
    pub storage_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A record ready to be written to the metadata store.
///
/// The store assigns `id` and the timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub file_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub storage_bucket: String,
    pub storage_key: String,
    pub storage_url: String,
    pub description: Option<String>,
    pub tags: Option<String>,
}

/// Create payload. `file_content` is base64.
///
/// Missing or `null` fields deserialize as empty so the workflow can report
/// them together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub file_content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateDocument {
    pub fn new(
        file_name: impl Into<String>,
        file_content: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_content: file_content.into(),
            content_type: content_type.into(),
            description: None,
            tags: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }
}

/// The only mutable fields. Unknown fields are rejected when decoding,
/// so immutable columns can never be targeted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentChanges {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl DocumentChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.tags.is_none()
    }
}

/// Effective pagination window. Construct through [`Pagination::new`] to
/// get the boundary clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Non-positive limits and negative offsets fall back to the defaults.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
            offset: offset.filter(|o| *o >= 0).unwrap_or(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the count of every live record.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// A document together with a time-bounded download URL.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDownload {
    pub document: Document,
    pub download_url: String,
    pub expires_in: Duration,
}

impl DocumentDownload {
    /// Validity window in words, e.g. `1 hour` or `15 minutes`.
    pub fn url_expires_in(&self) -> String {
        let secs = self.expires_in.as_secs();
        let (n, unit) = if secs >= 3600 && secs % 3600 == 0 {
            (secs / 3600, "hour")
        } else if secs >= 60 && secs % 60 == 0 {
            (secs / 60, "minute")
        } else {
            (secs, "second")
        };
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_substitutes_defaults_for_bad_values() {
        assert_eq!(Pagination::new(None, None), Pagination { limit: 10, offset: 0 });
        assert_eq!(Pagination::new(Some(0), Some(-3)), Pagination { limit: 10, offset: 0 });
        assert_eq!(Pagination::new(Some(-5), Some(4)), Pagination { limit: 10, offset: 4 });
        assert_eq!(Pagination::new(Some(25), Some(50)), Pagination { limit: 25, offset: 50 });
    }

    #[test]
    fn changes_reject_immutable_fields() {
        let res: Result<DocumentChanges, _> =
            serde_json::from_str(r#"{"file_name":"evil.pdf","tags":"x"}"#);
        assert!(res.is_err());

        let ok: DocumentChanges = serde_json::from_str(r#"{"tags":"x"}"#).unwrap();
        assert_eq!(ok, DocumentChanges::new().tags("x"));
        assert!(!ok.is_empty());
        assert!(DocumentChanges::new().is_empty());
    }

    #[test]
    fn create_payload_tolerates_missing_fields() {
        let req: CreateDocument = serde_json::from_str(r#"{"file_name":"a.pdf"}"#).unwrap();
        assert_eq!(req.file_name, "a.pdf");
        assert!(req.file_content.is_empty());
        assert!(req.content_type.is_empty());
    }

    #[test]
    fn create_payload_treats_null_as_empty() {
        let req: CreateDocument = serde_json::from_str(
            r#"{"file_name":null,"file_content":"aGVsbG8=","content_type":null,"tags":null}"#,
        )
        .unwrap();
        assert!(req.file_name.is_empty());
        assert_eq!(req.file_content, "aGVsbG8=");
        assert!(req.content_type.is_empty());
        assert!(req.tags.is_none());
    }

    fn download(expires_in: Duration) -> DocumentDownload {
        let now = Utc::now();
        DocumentDownload {
            document: Document {
                id: "id".into(),
                file_name: "a.pdf".into(),
                file_size: 5,
                content_type: "application/pdf".into(),
                storage_bucket: "b".into(),
                storage_key: "documents/x.pdf".into(),
                storage_url: "https://b.s3.us-east-1.amazonaws.com/documents/x.pdf".into(),
                description: None,
                tags: None,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
            download_url: "https://signed".into(),
            expires_in,
        }
    }

    #[test]
    fn expires_in_is_spelled_out() {
        assert_eq!(download(Duration::from_secs(3600)).url_expires_in(), "1 hour");
        assert_eq!(download(Duration::from_secs(7200)).url_expires_in(), "2 hours");
        assert_eq!(download(Duration::from_secs(900)).url_expires_in(), "15 minutes");
        assert_eq!(download(Duration::from_secs(90)).url_expires_in(), "90 seconds");
        assert_eq!(download(Duration::from_secs(1)).url_expires_in(), "1 second");
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let now = Utc::now();
        let doc = Document {
            id: "id".into(),
            file_name: "a.pdf".into(),
            file_size: 5,
            content_type: "application/pdf".into(),
            storage_bucket: "b".into(),
            storage_key: "documents/x.pdf".into(),
            storage_url: "u".into(),
            description: None,
            tags: Some("t".into()),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let v = serde_json::to_value(&doc).unwrap();
        assert!(v.get("description").is_none());
        assert!(v.get("deleted_at").is_none());
        assert_eq!(v["tags"], "t");
    }
}
