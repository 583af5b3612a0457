//! HTTP layer: request model, URI building and response classification

pub mod options;
pub mod request;
pub mod response;
pub mod uri;

pub use options::{Protocol, RequestOptions};
pub use request::{ApiRequest, Parameters};
pub use response::{RawResponse, Response, ResponseData, ResponseFactory, ResponseKind};
pub use uri::{DefaultUriBuilder, SessionBasedUriBuilder, TokenBasedUriBuilder, UriBuilder};
