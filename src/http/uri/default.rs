//! Builder for unauthenticated requests such as login and logout

use super::{UriBuilder, finalize_uri, merge_path_segments};
use crate::{Result, http::request::ApiRequest};
use url::Url;

/// Builds `{base}/{module}/{function}` URIs
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUriBuilder;

impl DefaultUriBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl UriBuilder for DefaultUriBuilder {
    fn build_uri_for_request(&self, request: &ApiRequest) -> Result<Url> {
        let path = merge_path_segments(
            request.base_uri(),
            [Some(request.module()), request.function()],
        );

        Ok(finalize_uri(request, &path))
    }
}
