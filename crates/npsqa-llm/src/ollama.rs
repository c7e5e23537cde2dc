use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use npsqa_core::config::OllamaSettings;
use npsqa_core::traits::Generator;
use npsqa_core::types::{excerpt, GenerationOptions};

use crate::error::{check_status, http_client, ClientError};

/// Ollama HTTP client for local LLM inference.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Serialize)]
struct SamplingOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = http_client(timeout_secs)?;
        info!(model, base_url, "ollama client ready");
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), model: model.to_string(), client, timeout_secs })
    }

    pub fn from_settings(settings: &OllamaSettings) -> Result<Self, ClientError> {
        Self::new(&settings.base_url, &settings.model, settings.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<String, ClientError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: SamplingOptions { temperature: options.temperature, num_predict: options.max_tokens },
        };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| ClientError::from_send(e, &self.base_url, self.timeout_secs))?;
        let parsed: GenerateResponse =
            check_status(response)?.json().map_err(|e| ClientError::ResponseParsing(e.to_string()))?;
        Ok(parsed.response.trim().to_string())
    }

    /// Names of the locally installed models.
    pub fn list_models(&self) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ClientError::from_send(e, &self.base_url, self.timeout_secs))?;
        let parsed: TagsResponse =
            check_status(response)?.json().map_err(|e| ClientError::ResponseParsing(e.to_string()))?;
        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    /// Server reachable and the configured model installed (exact or substring match).
    pub fn check_health(&self) -> bool {
        match self.list_models() {
            Ok(models) => {
                let found = model_available(&self.model, &models);
                if found {
                    info!(model = %self.model, "health check passed");
                } else {
                    warn!(model = %self.model, available = ?models, "model not found");
                }
                found
            }
            Err(e) => {
                error!(error = %e, "health check failed");
                false
            }
        }
    }
}

fn model_available(model: &str, installed: &[String]) -> bool {
    installed.iter().any(|name| name == model || name.contains(model))
}

impl Generator for OllamaClient {
    fn generate(&self, prompt: &str, options: &GenerationOptions) -> anyhow::Result<String> {
        info!(chars = prompt.chars().count(), temperature = options.temperature, "generating response");
        let text = self.complete(prompt, options)?;
        info!(response = %excerpt(&text, 100), "generated response");
        Ok(text)
    }
}
