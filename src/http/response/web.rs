//! Plain web responses

use super::RawResponse;

/// Any response whose body is treated as text
#[derive(Debug, Clone)]
pub struct WebResponse {
    response: RawResponse,
}

impl WebResponse {
    /// Web responses accept everything
    pub fn supports(_response: &RawResponse) -> bool {
        true
    }

    pub fn new(response: RawResponse) -> Self {
        Self { response }
    }

    /// Valid for any non-error HTTP status
    pub fn is_valid(&self) -> bool {
        self.response.status().as_u16() < 400
    }

    pub fn data(&self) -> &str {
        self.response.body()
    }

    pub fn original_response(&self) -> &RawResponse {
        &self.response
    }
}
