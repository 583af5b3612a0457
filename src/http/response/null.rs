//! Fallback for unknown response types

use super::RawResponse;

/// Placeholder for responses requested under an unknown type name
#[derive(Debug, Clone)]
pub struct NullResponse {
    response: RawResponse,
}

impl NullResponse {
    pub fn supports(_response: &RawResponse) -> bool {
        true
    }

    pub fn new(response: RawResponse) -> Self {
        Self { response }
    }

    /// Never valid
    pub fn is_valid(&self) -> bool {
        false
    }

    pub fn original_response(&self) -> &RawResponse {
        &self.response
    }
}
