use crate::utils::error::Result;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP client for the NLP sub-services.
#[derive(Debug, Clone)]
pub struct NlpServiceClient {
    client: Client,
}

impl NlpServiceClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn endpoint_url(service_url: &str, endpoint: &str) -> String {
        if endpoint.is_empty() {
            service_url.to_string()
        } else {
            format!("{}/{}", service_url.trim_end_matches('/'), endpoint)
        }
    }

    /// POSTs `{"text": ...}` and returns the JSON body unmodified. Transport and
    /// status failures come back as `{"error": ...}`.
    pub async fn call(&self, service_url: &str, endpoint: &str, text: &str) -> Value {
        let url = Self::endpoint_url(service_url, endpoint);
        tracing::debug!("Making service request to: {}", url);

        let response = match self
            .client
            .post(&url)
            .json(&json!({ "text": text }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ Error calling service {}: {}", url, e);
                return json!({ "error": format!("Service call failed: {}", e) });
            }
        };

        let status = response.status();
        tracing::debug!("Service response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ Service error: {} - {}", status.as_u16(), body);

            // 子服務自己的錯誤訊息一併帶出
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string));
            let message = match detail {
                Some(detail) => format!("Service error: {} ({})", status.as_u16(), detail),
                None => format!("Service error: {}", status.as_u16()),
            };
            return json!({ "error": message });
        }

        match response.json::<Value>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("❌ Invalid JSON from {}: {}", url, e);
                json!({ "error": format!("Service call failed: {}", e) })
            }
        }
    }
}
