use crate::agent::LlmClientTrait;
use crate::error::ChatError;
use crate::types::{Message, ModelResponse, ToolCall};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted model turns in order and records what it was sent.
#[derive(Clone, Default)]
pub struct MockLlmClient {
    responses: Arc<Mutex<VecDeque<Result<ModelResponse, String>>>>,
    call_history: Arc<Mutex<Vec<Vec<Message>>>>,
    tools_seen: Arc<Mutex<Vec<Value>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text_response(&self, content: &str) {
        self.push(Ok(ModelResponse::FinalAnswer(content.to_string())));
    }

    pub fn add_tool_call_response(&self, id: &str, tool_name: &str, args: &str) {
        self.add_tool_calls_response(vec![ToolCall::new(id, tool_name, args)]);
    }

    pub fn add_tool_calls_response(&self, calls: Vec<ToolCall>) {
        self.push(Ok(ModelResponse::ToolCalls {
            content: None,
            calls,
        }));
    }

    pub fn add_tool_calls_with_text(&self, content: &str, calls: Vec<ToolCall>) {
        self.push(Ok(ModelResponse::ToolCalls {
            content: Some(content.to_string()),
            calls,
        }));
    }

    pub fn add_error_response(&self, error_msg: &str) {
        self.push(Err(error_msg.to_string()));
    }

    pub fn get_call_history(&self) -> Vec<Vec<Message>> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_history.lock().unwrap().len()
    }

    pub fn tools_seen(&self) -> Vec<Value> {
        self.tools_seen.lock().unwrap().clone()
    }

    fn push(&self, response: Result<ModelResponse, String>) {
        self.responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl LlmClientTrait for MockLlmClient {
    async fn chat_once(&self, messages: &[Message], tools: &Value) -> Result<ModelResponse, ChatError> {
        // Store the call for verification
        self.call_history.lock().unwrap().push(messages.to_vec());
        self.tools_seen.lock().unwrap().push(tools.clone());

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(msg)) => Err(ChatError::ModelUnavailable(msg)),
            None => Err(ChatError::ModelUnavailable(
                "No more mock responses configured".to_string(),
            )),
        }
    }
}

/// Never answers; used to exercise the per-call timeout.
pub struct StalledLlmClient;

#[async_trait]
impl LlmClientTrait for StalledLlmClient {
    async fn chat_once(&self, _messages: &[Message], _tools: &Value) -> Result<ModelResponse, ChatError> {
        std::future::pending::<Result<ModelResponse, ChatError>>().await
    }
}
