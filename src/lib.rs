//! cPanel API client
//!
//! A client for the cPanel UAPI that authorizes either with an API token or
//! with an interactive login session (user name, password and an optional
//! two-factor secret).
//!
//! # Architecture
//!
//! - [`CPanel`]: entry point; builds requests against one cPanel instance
//! - [`auth`]: authorization strategies ([`HttpAuthorization`],
//!   [`TokenAuthorization`])
//! - [`session`]: login sessions and their file-backed cookie jars
//! - [`http`]: request model, URI building and response classification
//! - [`resource`]: cookie and log files and their cleanup
//! - [`config`]: settings from TOML files and `CPANEL_*` environment variables
//!
//! # Examples
//!
//! ```rust,no_run
//! use cpanel_requests::{CPanel, TokenAuthorization, http::Parameters};
//!
//! # tokio_test::block_on(async {
//! let authorization = TokenAuthorization::new("username", "API_TOKEN");
//! let mut cpanel = CPanel::new(Box::new(authorization), "cpanel.example.com");
//!
//! let response = cpanel.api("Email", "list_pops", Parameters::new()).await?;
//! if response.is_valid() {
//!     println!("{:?}", response.data());
//! }
//!
//! cpanel.close().await?;
//! # Ok::<(), cpanel_requests::Error>(())
//! # });
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod cpanel;
pub mod error;
pub mod http;
pub mod resource;
pub mod session;
pub mod utils;

pub use auth::{Authorization, HttpAuthorization, TokenAuthorization};
pub use config::Settings;
pub use cpanel::CPanel;
pub use error::{Error, Result, SessionErrorKind};
pub use http::{ApiRequest, Parameters, Protocol, Response, ResponseData, ResponseKind};
pub use session::WebSession;
