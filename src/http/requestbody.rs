//! Request body handed to the transport's `send` as is.

use bytes::Bytes;

/// Body of an outgoing request, already in a shape the transport accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body (GET, HEAD, most DELETE).
    #[default]
    Empty,
    /// Sent as a string.
    Text(String),
    /// Sent as a byte buffer.
    Bytes(Bytes),
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::Text(s)
    }
}

impl From<&str> for RequestBody {
    fn from(s: &str) -> Self {
        RequestBody::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(v: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(v))
    }
}

impl From<Bytes> for RequestBody {
    fn from(b: Bytes) -> Self {
        RequestBody::Bytes(b)
    }
}

impl RequestBody {
    /// Serialize `value` as a JSON text body.
    #[cfg(feature = "json")]
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_string(value).map(RequestBody::Text)
    }

    /// True only for [`RequestBody::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    /// Length of the body in bytes.
    pub fn len(&self) -> usize {
        match self {
            RequestBody::Empty => 0,
            RequestBody::Text(s) => s.len(),
            RequestBody::Bytes(b) => b.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        let body = RequestBody::default();
        assert!(body.is_empty());
        assert_eq!(body.len(), 0);
    }

    #[test]
    fn test_text_is_not_reencoded() {
        let body: RequestBody = "héllo".into();
        assert_eq!(body, RequestBody::Text("héllo".to_owned()));
        assert_eq!(body.len(), 6);
    }

    #[test]
    fn test_from_vec() {
        let body: RequestBody = vec![1u8, 2, 3, 4].into();
        assert!(matches!(body, RequestBody::Bytes(_)));
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn test_empty_text_is_still_a_body() {
        let body: RequestBody = "".into();
        assert!(!body.is_empty());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_body() {
        let body = RequestBody::json(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(body, RequestBody::Text(r#"{"a":1}"#.to_owned()));
    }
}
