use crate::error::{ChatError, StartupError};
use crate::types::{Message, ModelResponse, ToolCall};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::Duration;

#[derive(Clone)]
pub struct LlmClient {
    base_url: String,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

impl LlmClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self, StartupError> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(8)
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url,
            api_key,
            model,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn chat_once(&self, messages: &[Message], tools: &Value) -> Result<ModelResponse, ChatError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut req = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false
        });
        if tools.as_array().is_some_and(|t| !t.is_empty()) {
            req["tools"] = tools.clone();
        }

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| ChatError::ModelUnavailable(format!("request failed: {}", e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ChatError::ModelUnavailable(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ChatError::ModelUnavailable(format!(
                "provider returned {}: {}",
                status, body
            )));
        }

        parse_completion(&body)
    }
}

/// Turns a chat-completions body into the tagged response the agent loop consumes.
pub fn parse_completion(body: &str) -> Result<ModelResponse, ChatError> {
    let raw: Value = serde_json::from_str(body)
        .map_err(|e| ChatError::ModelUnavailable(format!("failed to parse JSON response: {}", e)))?;

    // Some providers answer 200 with an error object
    if let Some(error) = raw.get("error").filter(|e| !e.is_null()) {
        return Err(ChatError::ModelUnavailable(format!("API error: {}", error)));
    }

    let completion: ChatCompletion = serde_json::from_value(raw)
        .map_err(|e| ChatError::ModelUnavailable(format!("unexpected response shape: {}", e)))?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::ModelUnavailable("no choices in response".to_string()))?;

    tracing::debug!(finish_reason = ?choice.finish_reason, "model responded");

    let AssistantMessage { content, tool_calls } = choice.message;
    match tool_calls {
        Some(calls) if !calls.is_empty() => Ok(ModelResponse::ToolCalls { content, calls }),
        _ => Ok(ModelResponse::FinalAnswer(content.unwrap_or_default())),
    }
}
