use crate::config::OrchestratorConfig;
use crate::domain::ports::ChatCompletion;
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub const MAX_TOKENS: u32 = 2000;
pub const TEMPERATURE: f64 = 0.3;
pub const TOP_P: f64 = 0.9;

#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    deployment: String,
}

impl AzureOpenAiClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        api_version: String,
        deployment: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            api_version,
            deployment,
        })
    }

    pub fn from_config(config: &OrchestratorConfig) -> Result<Self> {
        Self::new(
            config.azure_endpoint.clone(),
            config.azure_api_key.clone(),
            config.azure_api_version.clone(),
            config.azure_deployment.clone(),
            config.llm_timeout(),
        )
    }

    /// Endpoints already scoped to a deployment are used as-is; a bare resource
    /// endpoint gets `/openai/deployments/{deployment}` appended.
    pub fn chat_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        if base.contains("/openai/deployments/") {
            format!("{}/chat/completions?api-version={}", base, self.api_version)
        } else {
            format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base, self.deployment, self.api_version
            )
        }
    }

    fn build_payload(system_prompt: &str, user_prompt: &str) -> Value {
        json!({
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt }
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "top_p": TOP_P
        })
    }

    fn parse_reply(body: &Value) -> Result<String> {
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                PipelineError::inference("Failed to extract content from chat completion response")
            })
    }
}

#[async_trait]
impl ChatCompletion for AzureOpenAiClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(self.chat_url())
            .header("api-key", &self.api_key)
            .json(&Self::build_payload(system_prompt, user_prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ Azure OpenAI error: {} - {}", status.as_u16(), body);
            return Err(PipelineError::UpstreamStatus {
                service: "Azure OpenAI".to_string(),
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        let reply = Self::parse_reply(&body)?;
        tracing::info!("✅ Chat completion received ({} chars)", reply.len());
        Ok(reply)
    }

    fn describe(&self) -> String {
        format!("Azure OpenAI {}", self.deployment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(endpoint: String) -> AzureOpenAiClient {
        AzureOpenAiClient::new(
            endpoint,
            "test-key".to_string(),
            "2025-01-01-preview".to_string(),
            "gpt-4o".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn chat_url_appends_deployment_when_missing() {
        assert_eq!(
            client("https://res.openai.azure.com/".to_string()).chat_url(),
            "https://res.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2025-01-01-preview"
        );
        assert_eq!(
            client("https://res.openai.azure.com/openai/deployments/legal".to_string()).chat_url(),
            "https://res.openai.azure.com/openai/deployments/legal/chat/completions?api-version=2025-01-01-preview"
        );
    }

    #[tokio::test]
    async fn sends_fixed_sampling_parameters() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/openai/deployments/gpt-4o/chat/completions")
                .query_param("api-version", "2025-01-01-preview")
                .header("api-key", "test-key")
                .json_body(json!({
                    "messages": [
                        {"role": "system", "content": "sys"},
                        {"role": "user", "content": "user"}
                    ],
                    "max_tokens": 2000,
                    "temperature": 0.3,
                    "top_p": 0.9
                }));
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "Analysis text"}}]
            }));
        });

        let reply = client(server.base_url()).complete("sys", "user").await.unwrap();

        mock.assert();
        assert_eq!(reply, "Analysis text");
    }

    #[tokio::test]
    async fn non_success_maps_to_upstream_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(429).body("rate limited");
        });

        let err = client(server.base_url()).complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, PipelineError::UpstreamStatus { status: 429, .. }));
    }

    #[tokio::test]
    async fn malformed_reply_is_an_inference_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({"choices": []}));
        });

        let err = client(server.base_url()).complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, PipelineError::InferenceError { .. }));
    }
}
