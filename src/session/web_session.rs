//! Interactive cPanel web session
//!
//! A session logs in with user name and password (plus an optional one-time
//! password), remembers the `security_token` returned by cPanel and keeps the
//! session cookies in a file-backed jar. API calls made on behalf of the
//! session are addressed below `/{security_token}/execute/...`.

use super::FileCookieJar;
use crate::{
    Error, Result,
    config::StorageSettings,
    http::{
        ApiRequest, DefaultUriBuilder, RawResponse, Response, ResponseFactory, ResponseKind,
        UriBuilder, uri::redact_uri,
    },
    resource::{CookieFiles, ResourceFile},
    utils::user_agent,
};
use reqwest::Client;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};
use url::Url;

/// JSON key holding the session identifier in login responses
pub const SESSION_KEY: &str = "security_token";

/// A login session against one cPanel base URI
#[derive(Debug)]
pub struct WebSession {
    base_uri: Url,
    cookie_jar: Arc<FileCookieJar>,
    http_client: Client,
    timeout: Option<Duration>,
    identifier: Option<String>,
    active: bool,
}

impl WebSession {
    /// Create an inactive session with a fresh cookie file
    pub fn new(base_uri: Url, storage: &StorageSettings) -> Result<Self> {
        let cookie_file = CookieFiles::from_settings(storage).create()?;
        let cookie_jar = Arc::new(FileCookieJar::load(cookie_file)?);
        let http_client = Client::builder()
            .user_agent(user_agent())
            .cookie_provider(Arc::clone(&cookie_jar))
            .build()?;

        Ok(Self {
            base_uri,
            cookie_jar,
            http_client,
            timeout: None,
            identifier: None,
            active: false,
        })
    }

    /// Set the timeout for login and logout requests
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Session identifier from the last successful login
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn cookie_file(&self) -> &ResourceFile {
        self.cookie_jar.file()
    }

    pub fn cookie_jar(&self) -> &Arc<FileCookieJar> {
        &self.cookie_jar
    }

    /// HTTP client sending this session's cookies
    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// Log in and activate the session
    pub async fn start(&mut self, username: &str, password: &str, otp: Option<&str>) -> Result<()> {
        let mut request = ApiRequest::new(self.base_uri.clone(), "login");
        request
            .add_parameter("login_only", 1)
            .add_parameter("user", username)
            .add_parameter("pass", password);
        if let Some(otp) = otp {
            request.add_parameter("tfa_token", otp);
        }

        let response = match self.send(&request).await? {
            Response::Json(response) => response,
            other => {
                return Err(Error::unexpected_response(
                    ResponseKind::Json.as_str(),
                    other.kind().as_str(),
                ));
            }
        };

        if !response.is_valid_for(SESSION_KEY) {
            return Err(Error::AuthenticationFailed);
        }

        let identifier = match response.get(SESSION_KEY) {
            Some(Value::String(token)) if !token.trim().is_empty() => token.trim().to_string(),
            None | Some(Value::Null) => return Err(Error::inactive_session()),
            Some(_) => return Err(Error::invalid_session_identifier()),
        };

        self.identifier = Some(identifier);
        self.active = true;

        info!("Started cPanel session for user {}", username);
        Ok(())
    }

    /// Log out; does nothing when the session is not active
    pub async fn stop(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        let request = ApiRequest::new(self.base_uri.clone(), "logout");
        let response = self.send(&request).await?;
        if !response.is_valid() {
            return Err(Error::request_failed_with(format!(
                "Logout failed with HTTP status {}.",
                response.original_response().status()
            )));
        }

        self.active = false;
        info!("Stopped cPanel session");
        Ok(())
    }

    async fn send(&self, request: &ApiRequest) -> Result<Response> {
        let uri = DefaultUriBuilder::new().build_uri_for_request(request)?;
        debug!("Sending session request to {}", redact_uri(&uri));

        let mut builder = self.http_client.get(uri);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::request_failed(Error::Network(e)))?;
        let raw = RawResponse::from_reqwest(response)
            .await
            .map_err(Error::request_failed)?;

        ResponseFactory::new().create_from_response(raw)
    }

    #[cfg(test)]
    pub(crate) fn activate(&mut self, identifier: &str) {
        self.identifier = Some(identifier.to_string());
        self.active = true;
    }
}
