//! Builder for API token authorized requests

use super::{UriBuilder, finalize_uri, merge_path_segments};
use crate::{Result, http::request::ApiRequest};
use url::Url;

/// Builds `{base}/execute/{module}/{function}` URIs
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenBasedUriBuilder;

impl TokenBasedUriBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl UriBuilder for TokenBasedUriBuilder {
    fn build_uri_for_request(&self, request: &ApiRequest) -> Result<Url> {
        let path = merge_path_segments(
            request.base_uri(),
            [Some("execute"), Some(request.module()), request.function()],
        );

        Ok(finalize_uri(request, &path))
    }
}
