//! Transport seam between the client and the completion endpoint.
//!
//! A transport performs exactly one POST per call and reports the raw status
//! and body. Classification of non-success statuses belongs to the client.

use http::StatusCode;
use pcommon::BoxFuture;

use crate::serde_api::ChatApiRequest;
use crate::{ApiCredential, CompletionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

pub trait CompletionTransport: Send + Sync + std::fmt::Debug {
    /// Errors are limited to `NetworkError` (no response received) and
    /// `Unexpected` (the request could not be built).
    fn post_chat<'a>(
        &'a self,
        request: &'a ChatApiRequest,
        credential: &'a ApiCredential,
    ) -> BoxFuture<'a, Result<HttpReply, CompletionError>>;
}
