//! Remote HTTP embedding provider.
//!
//! Posts `{model, input}` to an embeddings endpoint and reads
//! `data[i].embedding` from the JSON response. Every request carries a
//! timeout; all transport failures map to `EmbeddingError::Unavailable`
//! (or `Timeout`) so callers can degrade instead of hanging.

use std::time::Duration;

use ffagent_core::config::EmbeddingConfig;
use ffagent_core::errors::{AgentResult, EmbeddingError};
use ffagent_core::traits::IEmbeddingProvider;
use serde::Deserialize;
use tracing::debug;

/// HTTP embedding provider.
pub struct RemoteProvider {
    /// `None` when the HTTP client could not be constructed; every call
    /// then reports `Unavailable` instead of panicking at startup.
    client: Option<reqwest::blocking::Client>,
    endpoint: String,
    model_id: String,
    api_key: Option<String>,
    dimensions: usize,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

impl RemoteProvider {
    pub fn new(config: &EmbeddingConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .ok();
        Self {
            client,
            endpoint: config.endpoint.clone(),
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
            dimensions: config.dimensions,
            timeout_secs: config.timeout_secs,
        }
    }

    fn request(&self, inputs: &[&str]) -> AgentResult<Vec<Vec<f32>>> {
        let client = self.client.as_ref().ok_or(EmbeddingError::Unavailable {
            reason: "HTTP client construction failed".to_string(),
        })?;

        let mut req = client.post(&self.endpoint).json(&serde_json::json!({
            "model": self.model_id,
            "input": inputs,
        }));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().map_err(|e| {
            if e.is_timeout() {
                EmbeddingError::Timeout {
                    seconds: self.timeout_secs,
                }
            } else {
                EmbeddingError::Unavailable {
                    reason: e.to_string(),
                }
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EmbeddingError::Unavailable {
                reason: format!("provider returned HTTP {status}"),
            }
            .into());
        }

        let body: EmbeddingResponse = resp.json().map_err(|e| EmbeddingError::Unavailable {
            reason: format!("malformed provider response: {e}"),
        })?;

        if body.data.len() != inputs.len() {
            return Err(EmbeddingError::Unavailable {
                reason: format!(
                    "provider returned {} embeddings for {} inputs",
                    body.data.len(),
                    inputs.len()
                ),
            }
            .into());
        }

        let mut out = Vec::with_capacity(body.data.len());
        for datum in body.data {
            if datum.embedding.len() != self.dimensions {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: datum.embedding.len(),
                }
                .into());
            }
            out.push(datum.embedding);
        }
        debug!(count = out.len(), model = %self.model_id, "remote embeddings generated");
        Ok(out)
    }
}

impl IEmbeddingProvider for RemoteProvider {
    fn embed(&self, text: &str) -> AgentResult<Vec<f32>> {
        let mut vecs = self.request(&[text])?;
        Ok(vecs.remove(0))
    }

    fn embed_batch(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        self.request(&refs)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn is_available(&self) -> bool {
        self.client.is_some()
    }
}
