//! Builder for requests made inside an interactive session

use super::{UriBuilder, finalize_uri, merge_path_segments};
use crate::{Error, Result, http::request::ApiRequest, session::WebSession};
use url::Url;

/// Builds `{base}/{session}/execute/{module}/{function}` URIs
#[derive(Debug, Clone, Copy)]
pub struct SessionBasedUriBuilder<'a> {
    session: &'a WebSession,
}

impl<'a> SessionBasedUriBuilder<'a> {
    pub fn new(session: &'a WebSession) -> Self {
        Self { session }
    }
}

impl UriBuilder for SessionBasedUriBuilder<'_> {
    fn build_uri_for_request(&self, request: &ApiRequest) -> Result<Url> {
        if !self.session.is_active() {
            return Err(Error::inactive_session());
        }

        let path = merge_path_segments(
            request.base_uri(),
            [
                self.session.identifier(),
                Some("execute"),
                Some(request.module()),
                request.function(),
            ],
        );

        Ok(finalize_uri(request, &path))
    }
}
