//! LLM API client for hosted (OpenAI-compatible) and Ollama endpoints

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::BiasError;
use crate::errors::Result;

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// `OpenAI` chat completions API (or any compatible endpoint)
    OpenAI,
    /// Ollama local generation API
    Ollama,
}

impl std::str::FromStr for LlmProvider {
    type Err = BiasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(BiasError::ConfigError(format!(
                "Unsupported LLM provider: {other}"
            ))),
        }
    }
}

/// Client for text generation against the configured provider
pub struct LlmService {
    provider: LlmProvider,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl LlmService {
    /// Create a service from application configuration
    ///
    /// # Errors
    /// - Unknown provider name
    /// - HTTP client build errors
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::from_parts(
            config.llm.provider.parse()?,
            config.llm.endpoint.clone(),
            config.llm.api_key.clone(),
            config.llm.model.clone(),
            config.llm.temperature,
            Duration::from_secs(config.llm.timeout_secs),
        )
    }

    pub fn from_parts(
        provider: LlmProvider,
        endpoint: String,
        api_key: String,
        model: String,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BiasError::HttpError(e.to_string()))?;

        Ok(Self {
            provider,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            model,
            temperature,
            client,
        })
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a completion constrained to a JSON object, at the configured temperature
    pub async fn generate_json(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate_with_params(Some(system), prompt, self.temperature, true)
            .await
    }

    /// Generate a completion
    ///
    /// # Errors
    /// - Network errors and timeouts
    /// - Non-success HTTP status (authentication, quota, unknown model)
    /// - Malformed or empty response bodies
    pub async fn generate_with_params(
        &self,
        system: Option<&str>,
        prompt: &str,
        temperature: f32,
        json_mode: bool,
    ) -> Result<String> {
        match self.provider {
            LlmProvider::OpenAI => {
                self.generate_openai(system, prompt, temperature, json_mode)
                    .await
            }
            LlmProvider::Ollama => {
                self.generate_ollama(system, prompt, temperature, json_mode)
                    .await
            }
        }
    }

    async fn generate_openai(
        &self,
        system: Option<&str>,
        prompt: &str,
        temperature: f32,
        json_mode: bool,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct ResponseFormat {
            #[serde(rename = "type")]
            kind: &'static str,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
            #[serde(skip_serializing_if = "Option::is_none")]
            response_format: Option<ResponseFormat>,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: Option<String>,
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| BiasError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BiasError::LlmError(format!(
                "Chat completions API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| BiasError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| BiasError::LlmError("No completion in response".to_string()))
    }

    async fn generate_ollama(
        &self,
        system: Option<&str>,
        prompt: &str,
        temperature: f32,
        json_mode: bool,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct Options {
            temperature: f32,
        }

        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            system: Option<&'a str>,
            stream: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            format: Option<&'static str>,
            options: Options,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            response: String,
        }

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Calling Ollama generate API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
            format: json_mode.then_some("json"),
            options: Options { temperature },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BiasError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BiasError::LlmError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| BiasError::LlmError(format!("Failed to parse response: {e}")))?;

        if result.response.trim().is_empty() {
            return Err(BiasError::LlmError("Empty response from Ollama".to_string()));
        }
        Ok(result.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("openai".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
        assert_eq!("Ollama".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert!("claude-ish".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let service = LlmService::from_parts(
            LlmProvider::OpenAI,
            "http://localhost:9999/v1/".to_string(),
            "key".to_string(),
            "model".to_string(),
            0.2,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(service.endpoint, "http://localhost:9999/v1");
        assert_eq!(service.model(), "model");
    }
}
