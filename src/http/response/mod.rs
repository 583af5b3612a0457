//! Typed API responses
//!
//! A received [`RawResponse`] is classified by the [`ResponseFactory`] into
//! one of three kinds:
//!
//! - [`JsonResponse`]: body is a JSON object, validity is decided by its
//!   `status` field and the presence of a data key
//! - [`WebResponse`]: catch-all, validity is decided by the HTTP status code
//! - [`NullResponse`]: produced only for unknown explicit type names

pub mod factory;
pub mod json;
pub mod null;
pub mod raw;
pub mod web;

pub use factory::ResponseFactory;
pub use json::JsonResponse;
pub use null::NullResponse;
pub use raw::RawResponse;
pub use web::WebResponse;

use serde_json::{Map, Value};
use std::fmt;

/// Kind of a classified response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Web,
    Null,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Web => "web",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of a response's parsed payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseData<'a> {
    Json(&'a Map<String, Value>),
    Text(&'a str),
    None,
}

impl<'a> ResponseData<'a> {
    pub fn as_json(&self) -> Option<&'a Map<String, Value>> {
        match self {
            Self::Json(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A classified API response
#[derive(Debug, Clone)]
pub enum Response {
    Json(JsonResponse),
    Web(WebResponse),
    Null(NullResponse),
}

impl Response {
    pub fn kind(&self) -> ResponseKind {
        match self {
            Self::Json(_) => ResponseKind::Json,
            Self::Web(_) => ResponseKind::Web,
            Self::Null(_) => ResponseKind::Null,
        }
    }

    /// Validity with the default data key for JSON responses
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Json(response) => response.is_valid(),
            Self::Web(response) => response.is_valid(),
            Self::Null(response) => response.is_valid(),
        }
    }

    /// Validity with a custom data key; the key only matters for JSON responses
    pub fn is_valid_for(&self, data_key: &str) -> bool {
        match self {
            Self::Json(response) => response.is_valid_for(data_key),
            other => other.is_valid(),
        }
    }

    pub fn data(&self) -> ResponseData<'_> {
        match self {
            Self::Json(response) => ResponseData::Json(response.data()),
            Self::Web(response) => ResponseData::Text(response.data()),
            Self::Null(_) => ResponseData::None,
        }
    }

    pub fn original_response(&self) -> &RawResponse {
        match self {
            Self::Json(response) => response.original_response(),
            Self::Web(response) => response.original_response(),
            Self::Null(response) => response.original_response(),
        }
    }

    pub fn as_json(&self) -> Option<&JsonResponse> {
        match self {
            Self::Json(response) => Some(response),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<JsonResponse> {
        match self {
            Self::Json(response) => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{StatusCode, header::HeaderMap};

    fn raw(status: StatusCode, body: &str) -> RawResponse {
        RawResponse::new(status, HeaderMap::new(), body)
    }

    #[test]
    fn test_json_variant() {
        let json = JsonResponse::new(raw(StatusCode::OK, r#"{"status":1,"data":[]}"#)).unwrap();
        let response = Response::Json(json);

        assert_eq!(response.kind(), ResponseKind::Json);
        assert!(response.is_valid());
        assert!(!response.is_valid_for("other"));
        assert!(response.data().as_json().is_some());
        assert!(response.as_json().is_some());
    }

    #[test]
    fn test_web_variant_ignores_data_key() {
        let response = Response::Web(WebResponse::new(raw(StatusCode::OK, "hello world!")));

        assert_eq!(response.kind(), ResponseKind::Web);
        assert!(response.is_valid_for("anything"));
        assert_eq!(response.data().as_text(), Some("hello world!"));
        assert!(response.into_json().is_none());
    }

    #[test]
    fn test_null_variant() {
        let response = Response::Null(NullResponse::new(raw(StatusCode::OK, "ok")));

        assert_eq!(response.kind(), ResponseKind::Null);
        assert!(!response.is_valid());
        assert!(!response.is_valid_for("data"));
        assert!(response.data().is_none());
        assert_eq!(response.original_response().body(), "ok");
    }
}
