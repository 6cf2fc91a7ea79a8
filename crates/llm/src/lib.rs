//! Rostrum model-provider infrastructure adapter.
//!
//! Implements the [`pipeline::ModelClient`] port for Google's Generative
//! Language API (Gemini). Additional providers are added as new types in
//! this crate without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP transport, request formatting, response
//! parsing, and status classification live here. The [`pipeline`] crate sees
//! only [`pipeline::ModelClient`].

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{ClientError, MaxOutputTokens, ModelClient, PromptPayload, Temperature};
use reqwest::Client;
use tracing::instrument;

mod wire;

use wire::{GenerateRequest, GenerateResponse};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on one model call, end to end. Elapsing it surfaces as
/// [`ClientError::Timeout`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`ModelClient`] adapter for the Gemini `generateContent` endpoint.
///
/// One instance is shared across all concurrent pipeline runs: calls are
/// stateless request/response exchanges, and the underlying `reqwest` client
/// pools connections internally. Temperature is pinned to zero so repeated
/// runs of the same debate stay as reproducible as the hosted model allows.
pub struct GeminiClient {
    http: Client,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client for the given model identifier and API key.
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("http client construction: {e}")))?;

        Ok(Self {
            http,
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// The model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.model)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, max_tokens = %max_output_tokens))]
    async fn generate(
        &self,
        prompt: &PromptPayload,
        max_output_tokens: MaxOutputTokens,
    ) -> Result<String, ClientError> {
        let body = GenerateRequest::from_prompt(prompt, max_output_tokens, Temperature::deterministic());

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_status(status.as_u16(), body);
            tracing::warn!(status = status.as_u16(), kind = err.kind(), "model call rejected");
            return Err(err);
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("body decode: {e}")))?;

        parsed.first_text().ok_or_else(|| {
            ClientError::InvalidResponse("no usable candidate in response".to_string())
        })
    }
}

fn classify_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(REQUEST_TIMEOUT)
    } else {
        ClientError::NetworkError(err.to_string())
    }
}
