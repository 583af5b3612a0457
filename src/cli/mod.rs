//! Command implementations for the `cpanel-requests` binary

pub mod api;
pub mod cleanup;

pub use api::{ApiArgs, parse_parameters, render_response, run_api};
pub use cleanup::{run_cleanup_cookies, run_cleanup_logs};
