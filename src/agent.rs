use crate::error::ChatError;
use crate::llm_client::LlmClient;
use crate::tool_registry::ToolRegistry;
use crate::types::{Message, ModelResponse, Role, ToolCall};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::{Duration, timeout};

#[async_trait]
pub trait LlmClientTrait: Send + Sync {
    async fn chat_once(&self, messages: &[Message], tools: &Value) -> Result<ModelResponse, ChatError>;
}

// Implement trait for real LlmClient
#[async_trait]
impl LlmClientTrait for LlmClient {
    async fn chat_once(&self, messages: &[Message], tools: &Value) -> Result<ModelResponse, ChatError> {
        self.chat_once(messages, tools).await
    }
}

#[derive(Clone, Debug)]
pub struct AgentOptions {
    pub max_turns: usize,       // model calls per run
    pub step_timeout: Duration, // per model call
}

/// Messages exchanged during one run: one system message, then the
/// prior history, the new user message and whatever the loop appends.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: &str, history: &[Message], user_message: &str) -> Self {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(system_prompt));
        for m in history {
            if m.role == Role::System {
                tracing::debug!("dropping system message from supplied history");
                continue;
            }
            messages.push(m.clone());
        }
        messages.push(Message::user(user_message));
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

pub struct Agent {
    llm: Arc<dyn LlmClientTrait>,
    tools: Arc<ToolRegistry>,
    schemas: Value,
    opts: AgentOptions,
}

impl Agent {
    pub fn new(llm: Arc<dyn LlmClientTrait>, tools: Arc<ToolRegistry>, opts: AgentOptions) -> Self {
        let schemas = tools.schemas();
        Self {
            llm,
            tools,
            schemas,
            opts,
        }
    }

    pub async fn run(
        &self,
        system_prompt: &str,
        history: &[Message],
        user_message: &str,
    ) -> Result<String, ChatError> {
        let mut conversation = Conversation::new(system_prompt, history, user_message);
        self.run_conversation(&mut conversation).await
    }

    /// Drives the model until it answers. Every tool call of a turn gets its
    /// result appended, in request order, before the next model call. The final
    /// answer is appended to `conversation` as well.
    pub async fn run_conversation(&self, conversation: &mut Conversation) -> Result<String, ChatError> {
        for turn in 1..=self.opts.max_turns {
            tracing::debug!(turn, messages = conversation.messages().len(), "awaiting model");
            let response = self.call_model(conversation).await?;

            match response {
                ModelResponse::FinalAnswer(text) => {
                    tracing::debug!(turn, "final answer received");
                    conversation.push(Message::assistant(text.clone()));
                    return Ok(text);
                }
                ModelResponse::ToolCalls { content, calls } => {
                    tracing::debug!(turn, count = calls.len(), "executing tools");
                    conversation.push(Message::assistant_tool_calls(content, calls.clone()));
                    for call in &calls {
                        let result = self.execute_tool_call(call).await;
                        conversation.push(Message::tool_result(call.id.clone(), result.to_string()));
                    }
                }
            }
        }

        tracing::warn!(max_turns = self.opts.max_turns, "model never produced a final answer");
        Err(ChatError::MaxTurnsExceeded(self.opts.max_turns))
    }

    async fn call_model(&self, conversation: &Conversation) -> Result<ModelResponse, ChatError> {
        timeout(
            self.opts.step_timeout,
            self.llm.chat_once(conversation.messages(), &self.schemas),
        )
        .await
        .map_err(|_| ChatError::ModelTimeout(self.opts.step_timeout))?
    }

    /// Runs one requested tool. Never fails: unknown tools answer `{}`,
    /// invalid arguments and handler errors answer `{"error": ...}`.
    pub async fn execute_tool_call(&self, call: &ToolCall) -> Value {
        let name = call.function.name.as_str();
        tracing::info!(tool = name, call_id = %call.id, "tool called");

        let Some(tool) = self.tools.resolve(name) else {
            tracing::warn!(tool = name, "model requested an unknown tool");
            return Value::Object(Default::default());
        };

        match tool.invoke(&call.function.arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool execution failed");
                serde_json::json!({ "error": e.to_string() })
            }
        }
    }
}
