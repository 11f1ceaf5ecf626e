//! Gemini `generateContent` client
//!
//! One POST per call, no retries and no client-side timeout. Non-2xx answers
//! come back as [`AppError::Upstream`] carrying the untouched body so the
//! handler can relay it.

use std::time::Instant;

use crate::config::GeminiConfig;
use crate::error::{AppError, AppResult};
use crate::metrics::Metrics;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client bound to one base URL and model
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint_url: String,
}

impl GeminiClient {
    /// Build a client for the configured base URL and model
    pub fn new(config: &GeminiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint_url: endpoint_url(config.base_url(), config.model()),
        })
    }

    /// Full `generateContent` URL this client posts to
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Send one `generateContent` request
    ///
    /// # Errors
    ///
    /// - [`AppError::Upstream`] when upstream answers non-2xx with a JSON body
    /// - [`AppError::Transport`] on network failure or when a body is not the
    ///   expected JSON
    pub async fn generate_content(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
        metrics: &Metrics,
    ) -> AppResult<GenerateContentResponse> {
        let started = Instant::now();

        let response = match self
            .http
            .post(&self.endpoint_url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                metrics.record_upstream_duration(None, elapsed_ms(started));
                return Err(e.into());
            }
        };

        let status = response.status();
        let bytes = response.bytes().await?;
        metrics.record_upstream_duration(Some(status.as_u16()), elapsed_ms(started));

        tracing::debug!(
            status = status.as_u16(),
            body_bytes = bytes.len(),
            "generateContent responded"
        );

        if !status.is_success() {
            // Relayed verbatim, but only if it is JSON
            serde_json::from_slice::<serde_json::Value>(&bytes)?;
            return Err(AppError::Upstream {
                status,
                body: bytes.to_vec(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn endpoint_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
