//! Response body, materialized according to the requested response type.

use bytes::Bytes;

/// Body of a completed response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// `responseText` for the `text` response type.
    Text(String),
    /// Raw buffer for the `arraybuffer` response type.
    Bytes(Bytes),
    /// Parsed value for the `json` response type; `Null` when unparseable.
    Json(serde_json::Value),
}

impl Default for ResponseBody {
    fn default() -> Self {
        ResponseBody::Text(String::new())
    }
}

impl ResponseBody {
    /// Borrow the body as text, if it is a text body.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Raw bytes of the body. JSON bodies are re-serialized.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            ResponseBody::Text(s) => Bytes::copy_from_slice(s.as_bytes()),
            ResponseBody::Bytes(b) => b.clone(),
            ResponseBody::Json(v) => Bytes::from(v.to_string()),
        }
    }

    /// Deserialize the body into `T`.
    #[cfg(feature = "json")]
    pub fn json<T: serde::de::DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        match self {
            ResponseBody::Text(s) => serde_json::from_str(&s),
            ResponseBody::Bytes(b) => serde_json::from_slice(&b),
            ResponseBody::Json(v) => serde_json::from_value(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_text() {
        assert_eq!(ResponseBody::default().as_text(), Some(""));
    }

    #[test]
    fn test_to_bytes() {
        assert_eq!(ResponseBody::Text("ab".into()).to_bytes(), Bytes::from_static(b"ab"));
        assert_eq!(
            ResponseBody::Json(serde_json::json!([1, 2])).to_bytes(),
            Bytes::from_static(b"[1,2]")
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_from_text_and_value() {
        let n: Vec<u32> = ResponseBody::Text("[1,2]".into()).json().unwrap();
        assert_eq!(n, vec![1, 2]);

        let n: Vec<u32> = ResponseBody::Json(serde_json::json!([3])).json().unwrap();
        assert_eq!(n, vec![3]);
    }
}
