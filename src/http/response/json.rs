//! JSON API responses

use super::RawResponse;
use crate::{Error, Result};
use serde_json::{Map, Value};

const JSON_MIME_TYPE: &str = "application/json";
const MIME_HEADERS: [&str; 2] = ["Accept", "Content-Type"];

/// Response whose body is a JSON object
#[derive(Debug, Clone)]
pub struct JsonResponse {
    response: RawResponse,
    data: Map<String, Value>,
}

impl JsonResponse {
    /// Key checked by [`JsonResponse::is_valid`]
    pub const DEFAULT_DATA_KEY: &'static str = "data";

    /// Whether the response announces JSON or its body is a JSON object
    pub fn supports(response: &RawResponse) -> bool {
        let announced = MIME_HEADERS.iter().any(|name| {
            response
                .header(name)
                .is_some_and(|value| value.starts_with(JSON_MIME_TYPE))
        });

        announced
            || matches!(
                serde_json::from_str::<Value>(response.body()),
                Ok(Value::Object(_))
            )
    }

    /// Parse the response body
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponseData`] if the body is not valid JSON
    /// or not a JSON object.
    pub fn new(response: RawResponse) -> Result<Self> {
        let value: Value = serde_json::from_str(response.body())
            .map_err(|e| Error::invalid_response_data(format!("malformed JSON body: {e}")))?;

        match value {
            Value::Object(data) => Ok(Self { response, data }),
            other => Err(Error::invalid_response_data(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Valid under the default `data` key
    pub fn is_valid(&self) -> bool {
        self.is_valid_for(Self::DEFAULT_DATA_KEY)
    }

    /// `status` is the integer 1 and `data_key` is present (even if null)
    pub fn is_valid_for(&self, data_key: &str) -> bool {
        let succeeded = self.data.get("status").and_then(Value::as_i64) == Some(1);
        succeeded && self.data.contains_key(data_key)
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Single top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn original_response(&self) -> &RawResponse {
        &self.response
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
