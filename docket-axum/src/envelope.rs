use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response body shared by every operation.
///
/// `download_url`/`url_expires_in` appear only on reads; `total`/`limit`/`offset`
/// only on lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_expires_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            download_url: None,
            url_expires_in: None,
            total: None,
            limit: None,
            offset: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(message)
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_download(mut self, url: String, expires_in: String) -> Self {
        self.download_url = Some(url);
        self.url_expires_in = Some(expires_in);
        self
    }

    pub fn with_page(mut self, total: i64, limit: i64, offset: i64) -> Self {
        self.total = Some(total);
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}
