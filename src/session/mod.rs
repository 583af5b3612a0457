//! Interactive login sessions
//!
//! [`WebSession`] handles login and logout against cPanel and owns the
//! [`FileCookieJar`] its requests are sent with.

pub mod cookie_jar;
pub mod web_session;

pub use cookie_jar::FileCookieJar;
pub use web_session::{SESSION_KEY, WebSession};
