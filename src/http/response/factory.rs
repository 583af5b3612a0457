//! Response classification

use super::{JsonResponse, NullResponse, RawResponse, Response, ResponseKind, WebResponse};
use crate::Result;

/// Registered response types in classification order
const RESPONSE_TYPES: [(&str, ResponseKind); 2] =
    [("json", ResponseKind::Json), ("web", ResponseKind::Web)];

const DEFAULT_TYPE: ResponseKind = ResponseKind::Web;

/// Classifies raw responses into typed [`Response`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFactory;

impl ResponseFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a response of an explicitly named type.
    ///
    /// The name is matched case-insensitively after trimming; unknown names
    /// produce a [`NullResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidResponseData`] if a JSON response is
    /// requested and the body cannot be parsed.
    pub fn create(&self, type_name: &str, response: RawResponse) -> Result<Response> {
        let kind = Self::lookup(type_name).unwrap_or(ResponseKind::Null);
        Self::make(kind, response)
    }

    /// Create a response of the first registered type that supports it
    pub fn create_from_response(&self, response: RawResponse) -> Result<Response> {
        let kind = RESPONSE_TYPES
            .iter()
            .map(|(_, kind)| *kind)
            .find(|kind| Self::kind_supports(*kind, &response))
            .unwrap_or(DEFAULT_TYPE);

        tracing::trace!("Classified response as {}", kind);
        Self::make(kind, response)
    }

    /// Whether the given type name is registered
    pub fn supports(&self, type_name: &str) -> bool {
        Self::lookup(type_name).is_some()
    }

    fn lookup(type_name: &str) -> Option<ResponseKind> {
        let normalized = type_name.trim().to_lowercase();
        RESPONSE_TYPES
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, kind)| *kind)
    }

    fn kind_supports(kind: ResponseKind, response: &RawResponse) -> bool {
        match kind {
            ResponseKind::Json => JsonResponse::supports(response),
            ResponseKind::Web => WebResponse::supports(response),
            ResponseKind::Null => NullResponse::supports(response),
        }
    }

    fn make(kind: ResponseKind, response: RawResponse) -> Result<Response> {
        Ok(match kind {
            ResponseKind::Json => Response::Json(JsonResponse::new(response)?),
            ResponseKind::Web => Response::Web(WebResponse::new(response)),
            ResponseKind::Null => Response::Null(NullResponse::new(response)),
        })
    }
}
