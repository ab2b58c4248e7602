//! reqwest-based HTTP transport.

use std::time::Duration;

use pcommon::BoxFuture;
use reqwest::Client;

use crate::serde_api::ChatApiRequest;
use crate::{ApiCredential, CompletionError, CompletionTransport, DEFAULT_BASE_URL, HttpReply};

#[derive(Debug, Clone)]
pub struct HttpCompletionTransport {
    client: Client,
    base_url: String,
}

impl HttpCompletionTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Builds a client whose per-request timeout bounds each attempt.
    pub fn with_timeout(timeout: Duration) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CompletionError::unexpected(err.to_string()))?;
        Ok(Self::new(client))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn map_send_error(err: reqwest::Error) -> CompletionError {
        if err.is_builder() {
            CompletionError::unexpected(err.to_string())
        } else if err.is_timeout() {
            CompletionError::network(format!("request timed out: {err}"))
        } else {
            CompletionError::network(err.to_string())
        }
    }
}

impl CompletionTransport for HttpCompletionTransport {
    fn post_chat<'a>(
        &'a self,
        request: &'a ChatApiRequest,
        credential: &'a ApiCredential,
    ) -> BoxFuture<'a, Result<HttpReply, CompletionError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint())
                .bearer_auth(credential.expose())
                .json(request)
                .send()
                .await
                .map_err(Self::map_send_error)?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|err| CompletionError::network(format!("failed to read body: {err}")))?;

            Ok(HttpReply::new(status, body))
        })
    }
}
