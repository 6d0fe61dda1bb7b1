//! Request body normalization for the intake endpoint
//!
//! An inbound submission arrives with an unknown content type and an
//! unknown shape. This module turns the supported encodings into one flat
//! or nested JSON-compatible document that is handed to the store verbatim:
//! no field whitelisting, no trimming, no type coercion.

use formdrop_common::fields::Document;
use serde_json::Value;
use std::fmt;

/// Supported intake body encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Json,
    UrlEncoded,
    Multipart,
}

/// Classify a Content-Type header value.
///
/// Matching is substring-based so parameters (`; charset=...`,
/// `; boundary=...`) are tolerated. Returns `None` for anything the intake
/// endpoint does not accept.
pub fn classify_content_type(content_type: &str) -> Option<PayloadKind> {
    if content_type.contains("application/json") {
        Some(PayloadKind::Json)
    } else if content_type.contains("application/x-www-form-urlencoded") {
        Some(PayloadKind::UrlEncoded)
    } else if content_type.contains("multipart/form-data") {
        Some(PayloadKind::Multipart)
    } else {
        None
    }
}

/// Body present but not parseable per its declared content type
#[derive(Debug)]
pub enum NormalizeError {
    /// Body did not parse at all
    Syntax(String),
    /// Body parsed, but the top level is not a JSON object
    NotAnObject,
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::Syntax(msg) => write!(f, "body did not parse: {}", msg),
            NormalizeError::NotAnObject => {
                write!(f, "top-level JSON value must be an object")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// Parse a JSON body into a document.
///
/// A top-level array or scalar is rejected: the data model requires every
/// stored payload to be an object. Nested values pass through untouched.
pub fn parse_json_document(body: &[u8]) -> Result<Document, NormalizeError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| NormalizeError::Syntax(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(NormalizeError::NotAnObject),
    }
}

/// Decode a URL-encoded form body into a flat document.
///
/// When a key repeats, the last occurrence wins (no array coalescing); the
/// key keeps its first-occurrence position in the document.
pub fn parse_urlencoded_document(body: &[u8]) -> Result<Document, NormalizeError> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_bytes(body).map_err(|e| NormalizeError::Syntax(e.to_string()))?;

    let mut doc = Document::new();
    for (key, value) in pairs {
        doc.insert(key, Value::String(value));
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_supported_types() {
        assert_eq!(
            classify_content_type("application/json"),
            Some(PayloadKind::Json)
        );
        assert_eq!(
            classify_content_type("application/json; charset=utf-8"),
            Some(PayloadKind::Json)
        );
        assert_eq!(
            classify_content_type("application/x-www-form-urlencoded"),
            Some(PayloadKind::UrlEncoded)
        );
        assert_eq!(
            classify_content_type("multipart/form-data; boundary=xyz"),
            Some(PayloadKind::Multipart)
        );
    }

    #[test]
    fn test_classify_rejects_everything_else() {
        assert_eq!(classify_content_type("text/plain"), None);
        assert_eq!(classify_content_type("application/xml"), None);
        assert_eq!(classify_content_type(""), None);
    }

    #[test]
    fn test_json_object_passes_through_verbatim() {
        let doc =
            parse_json_document(br#"{"name": "Ada", "age": 36, "tags": ["a", "b"]}"#).unwrap();
        assert_eq!(doc["name"], json!("Ada"));
        assert_eq!(doc["age"], json!(36));
        assert_eq!(doc["tags"], json!(["a", "b"]));
    }

    #[test]
    fn test_json_top_level_array_rejected() {
        assert!(matches!(
            parse_json_document(b"[1, 2, 3]"),
            Err(NormalizeError::NotAnObject)
        ));
    }

    #[test]
    fn test_json_top_level_scalar_rejected() {
        assert!(matches!(
            parse_json_document(b"\"hello\""),
            Err(NormalizeError::NotAnObject)
        ));
        assert!(matches!(
            parse_json_document(b"42"),
            Err(NormalizeError::NotAnObject)
        ));
    }

    #[test]
    fn test_json_garbage_rejected() {
        assert!(matches!(
            parse_json_document(b"{not json"),
            Err(NormalizeError::Syntax(_))
        ));
    }

    #[test]
    fn test_urlencoded_n_distinct_keys_store_n_entries() {
        let doc = parse_urlencoded_document(b"a=1&b=2&c=3").unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc["a"], json!("1"));
        assert_eq!(doc["c"], json!("3"));
    }

    #[test]
    fn test_urlencoded_repeated_key_last_wins() {
        let doc = parse_urlencoded_document(b"color=red&color=blue&size=xl").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc["color"], json!("blue"));

        // The repeated key keeps its original position
        let keys: Vec<&String> = doc.keys().collect();
        assert_eq!(keys, vec!["color", "size"]);
    }

    #[test]
    fn test_urlencoded_percent_decoding() {
        let doc = parse_urlencoded_document(b"full+name=Ada%20Lovelace").unwrap();
        assert_eq!(doc["full name"], json!("Ada Lovelace"));
    }

    #[test]
    fn test_urlencoded_empty_body_is_empty_document() {
        let doc = parse_urlencoded_document(b"").unwrap();
        assert!(doc.is_empty());
    }
}
