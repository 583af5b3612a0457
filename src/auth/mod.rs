//! Authorization strategies
//!
//! An [`Authorization`] takes a prepared [`ApiRequest`], turns it into a
//! concrete URI and sends it with whatever credentials the strategy uses:
//!
//! - [`HttpAuthorization`]: logs in with user name and password (and an
//!   optional OTP secret) and sends requests inside the resulting session
//! - [`TokenAuthorization`]: sends every request with an API token header

pub mod http;
pub mod otp;
pub mod token;

pub use http::HttpAuthorization;
pub use otp::current_otp;
pub use token::TokenAuthorization;

use crate::{
    Error, Result,
    config::Settings,
    http::{ApiRequest, RawResponse, RequestOptions},
};
use async_trait::async_trait;
use reqwest::Method;
use std::fmt;

/// Sends API requests on behalf of a cPanel user
#[async_trait]
pub trait Authorization: Send + Sync + fmt::Debug {
    /// Send `request` with this strategy's credentials and return the raw response
    async fn send_authorized_request(
        &mut self,
        method: Method,
        request: &ApiRequest,
        options: RequestOptions,
    ) -> Result<RawResponse>;

    /// Release server-side state such as an open session
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Authorization described by the `[auth]` settings.
///
/// A token selects token authorization, otherwise a password selects
/// interactive login.
pub fn from_settings(settings: &Settings) -> Result<Box<dyn Authorization>> {
    let auth = &settings.auth;
    let username = auth
        .username
        .as_deref()
        .ok_or_else(|| Error::config("A username is required for authorization"))?;

    if let Some(token) = auth.token.as_deref() {
        return Ok(Box::new(TokenAuthorization::new(username, token)));
    }

    if let Some(password) = auth.password.as_deref() {
        let mut authorization = HttpAuthorization::new(username, password)
            .with_storage(settings.storage.clone())
            .with_timeout(settings.connection.timeout());
        if let Some(secret) = auth.otp_secret.as_deref() {
            authorization = authorization.with_otp_secret(secret);
        }
        return Ok(Box::new(authorization));
    }

    Err(Error::config(
        "Either a token or a password must be configured",
    ))
}
