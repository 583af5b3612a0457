//! API token authorization

use super::Authorization;
use crate::{
    Error, Result,
    http::{ApiRequest, RawResponse, RequestOptions, TokenBasedUriBuilder, UriBuilder},
    http::uri::redact_uri,
    utils::user_agent,
};
use async_trait::async_trait;
use reqwest::{
    Client, Method,
    header::{AUTHORIZATION, HeaderValue, USER_AGENT},
};
use std::fmt;
use tracing::debug;

/// Sends requests with an `Authorization: cpanel <user>:<token>` header
#[derive(Clone)]
pub struct TokenAuthorization {
    username: String,
    token: String,
    http_client: Client,
}

impl TokenAuthorization {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(username, token, Client::new())
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(
        username: impl Into<String>,
        token: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            http_client,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("cpanel {}:{}", self.username, self.token))
            .map_err(|_| Error::config("API token contains characters not allowed in a header"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for TokenAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthorization")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

#[async_trait]
impl Authorization for TokenAuthorization {
    async fn send_authorized_request(
        &mut self,
        method: Method,
        request: &ApiRequest,
        mut options: RequestOptions,
    ) -> Result<RawResponse> {
        // The token header always wins over caller-supplied credentials
        options.headers.remove(AUTHORIZATION);

        let uri = TokenBasedUriBuilder::new().build_uri_for_request(request)?;
        debug!("Sending token request to {}", redact_uri(&uri));

        let builder = self
            .http_client
            .request(method, uri)
            .header(USER_AGENT, user_agent())
            .header(AUTHORIZATION, self.header_value()?);

        let response = options
            .apply(builder)
            .send()
            .await
            .map_err(|e| Error::request_failed(Error::Network(e)))?;

        RawResponse::from_reqwest(response)
            .await
            .map_err(Error::request_failed)
    }
}
