//! Transport configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the response body is materialized (`xhr.responseType`).
///
/// `blob` and `document` are not supported. A `Blob` can only be read
/// asynchronously and a `Document` is a live DOM node, so neither fits in a
/// [`ResponseBody`](crate::http::ResponseBody) that is complete once the call
/// settles. Parsing either name fails with [`UnknownResponseType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// `responseText`.
    #[default]
    Text,
    /// Binary buffer.
    #[serde(rename = "arraybuffer")]
    ArrayBuffer,
    /// Structured value parsed by the transport.
    Json,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Text => "text",
            ResponseType::ArrayBuffer => "arraybuffer",
            ResponseType::Json => "json",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown response type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown response type: {0}")]
pub struct UnknownResponseType(pub String);

impl FromStr for ResponseType {
    type Err = UnknownResponseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "text" => Ok(ResponseType::Text),
            "arraybuffer" => Ok(ResponseType::ArrayBuffer),
            "json" => Ok(ResponseType::Json),
            other => Err(UnknownResponseType(other.to_owned())),
        }
    }
}

/// Options applied to every call made through one transport.
///
/// Deserializes from the JSON shape
/// `{"type": "json", "withCredentials": true, "overrideMimeType": "text/plain"}`
/// with every key optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportOptions {
    /// Response type, `text` unless set.
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    /// Send cookies and auth on cross-origin requests.
    pub with_credentials: bool,
    /// MIME type forced onto the response before decoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_mime_type: Option<String>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn with_credentials(mut self, enabled: bool) -> Self {
        self.with_credentials = enabled;
        self
    }

    pub fn override_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.override_mime_type = Some(mime.into());
        self
    }
}
