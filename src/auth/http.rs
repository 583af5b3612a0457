//! Interactive login authorization

use super::{Authorization, otp::current_otp};
use crate::{
    Error, Result,
    config::StorageSettings,
    http::{ApiRequest, RawResponse, RequestOptions, SessionBasedUriBuilder, UriBuilder},
    http::uri::redact_uri,
    session::WebSession,
};
use async_trait::async_trait;
use reqwest::Method;
use std::{fmt, time::Duration};
use tracing::{debug, warn};

/// Logs in on first use and sends requests inside the web session
pub struct HttpAuthorization {
    username: String,
    password: String,
    otp_secret: Option<String>,
    storage: StorageSettings,
    timeout: Option<Duration>,
    session: Option<WebSession>,
}

impl HttpAuthorization {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            otp_secret: None,
            storage: StorageSettings::default(),
            timeout: None,
            session: None,
        }
    }

    /// Base32 secret used to generate a one-time password at login
    pub fn with_otp_secret(mut self, secret: impl Into<String>) -> Self {
        self.otp_secret = Some(secret.into());
        self
    }

    /// Where the session cookie file is created
    pub fn with_storage(mut self, storage: StorageSettings) -> Self {
        self.storage = storage;
        self
    }

    /// Timeout for login and logout requests
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Session created by the last login, if any
    pub fn session(&self) -> Option<&WebSession> {
        self.session.as_ref()
    }

    /// One-time password for the configured secret, if there is one
    pub fn current_otp(&self) -> Result<Option<String>> {
        current_otp(self.otp_secret.as_deref())
    }

    async fn active_session(&mut self, request: &ApiRequest) -> Result<&WebSession> {
        if !self.session.as_ref().is_some_and(WebSession::is_active) {
            let mut session = WebSession::new(request.base_uri().clone(), &self.storage)?
                .with_timeout(self.timeout);
            let otp = self.current_otp()?;
            session
                .start(&self.username, &self.password, otp.as_deref())
                .await?;
            self.session = Some(session);
        }

        self.session.as_ref().ok_or_else(Error::inactive_session)
    }
}

impl fmt::Debug for HttpAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAuthorization")
            .field("username", &self.username)
            .field("password", &"***")
            .field("otp_secret", &self.otp_secret.as_ref().map(|_| "***"))
            .field("storage", &self.storage)
            .field("session", &self.session)
            .finish()
    }
}

#[async_trait]
impl Authorization for HttpAuthorization {
    async fn send_authorized_request(
        &mut self,
        method: Method,
        request: &ApiRequest,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let session = self.active_session(request).await?;
        let uri = SessionBasedUriBuilder::new(session).build_uri_for_request(request)?;
        debug!("Sending session request to {}", redact_uri(&uri));

        let response = options
            .apply(session.http_client().request(method, uri))
            .send()
            .await
            .map_err(|e| Error::request_failed(Error::Network(e)))?;

        RawResponse::from_reqwest(response)
            .await
            .map_err(Error::request_failed)
    }

    async fn close(&mut self) -> Result<()> {
        match self.session.as_mut() {
            Some(session) => session.stop().await,
            None => Ok(()),
        }
    }
}

impl Drop for HttpAuthorization {
    fn drop(&mut self) {
        let Some(mut session) = self.session.take().filter(WebSession::is_active) else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = session.stop().await {
                        warn!("Logout on drop failed: {}", e);
                    }
                });
            }
            Err(_) => {
                debug!("No async runtime available, leaving session to expire");
            }
        }
    }
}
