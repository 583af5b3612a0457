//! URI building strategies
//!
//! Turns an [`ApiRequest`] into a concrete request URI. The three builders
//! share the same query handling and differ only in how the path is laid out:
//!
//! - [`DefaultUriBuilder`]: `{base}/{module}/{function}` (login and logout)
//! - [`SessionBasedUriBuilder`]: `{base}/{session}/execute/{module}/{function}`
//! - [`TokenBasedUriBuilder`]: `{base}/execute/{module}/{function}`

pub mod default;
pub mod session_based;
pub mod token_based;

pub use default::DefaultUriBuilder;
pub use session_based::SessionBasedUriBuilder;
pub use token_based::TokenBasedUriBuilder;

use crate::{
    Result,
    http::request::{ApiRequest, Parameters},
};
use serde_json::Value;
use url::{Url, form_urlencoded};

/// Strategy for turning an API request into a URI
pub trait UriBuilder {
    /// Build the full request URI
    fn build_uri_for_request(&self, request: &ApiRequest) -> Result<Url>;
}

/// Append path segments to the URI's path.
///
/// Surrounding slashes are stripped from each segment and segments that
/// are missing or blank are dropped. The result always starts with a
/// single `/`.
pub fn merge_path_segments<'a, I>(uri: &'a Url, segments: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let merged = uri
        .path()
        .split('/')
        .map(Some)
        .chain(segments)
        .flatten()
        .map(|segment| segment.trim().trim_matches('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    format!("/{merged}")
}

/// Merge the base URI's query with request parameters.
///
/// Request parameters override base values under the same key; base keys
/// keep their position and new keys are appended.
pub fn merge_query(uri: &Url, parameters: &Parameters) -> Parameters {
    let mut merged: Parameters = uri
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect();

    for (key, value) in parameters {
        merged.insert(key.clone(), value.clone());
    }

    merged
}

/// Form-encode parameters into a query string, `None` if nothing remains
pub fn encode_query(parameters: &Parameters) -> Option<String> {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in parameters {
        append_query_value(&mut serializer, key, value);
    }

    let query = serializer.finish();
    (!query.is_empty()).then_some(query)
}

fn append_query_value(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    value: &Value,
) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => {
            serializer.append_pair(key, if *flag { "1" } else { "0" });
        }
        Value::Number(number) => {
            serializer.append_pair(key, &number.to_string());
        }
        Value::String(text) => {
            serializer.append_pair(key, text);
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                append_query_value(serializer, &format!("{key}[{index}]"), item);
            }
        }
        Value::Object(entries) => {
            for (name, item) in entries {
                append_query_value(serializer, &format!("{key}[{name}]"), item);
            }
        }
    }
}

/// Apply a merged path and the merged query to the request's base URI
pub(crate) fn finalize_uri(request: &ApiRequest, path: &str) -> Url {
    let mut uri = request.base_uri().clone();
    uri.set_path(path);

    let query = merge_query(request.base_uri(), request.parameters());
    uri.set_query(encode_query(&query).as_deref());

    uri
}

/// Query parameters whose values never appear in logs
const SENSITIVE_PARAMETERS: [&str; 2] = ["pass", "tfa_token"];

/// Copy of the URI with credential values masked, for logging
pub fn redact_uri(uri: &Url) -> Url {
    let mut redacted = uri.clone();
    if uri.query().is_none() {
        return redacted;
    }

    let pairs: Vec<(String, String)> = uri
        .query_pairs()
        .map(|(key, value)| {
            let value = if SENSITIVE_PARAMETERS.contains(&key.as_ref()) {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
