use crate::agent::Agent;
use crate::context::PersonaContext;
use crate::error::ChatError;
use crate::prompt::build_system_prompt;
use crate::types::Message;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// `(message, history) -> answer` surface handed to the front end.
/// Holds no per-conversation state; callers own the history.
pub struct ChatEndpoint {
    persona: Arc<PersonaContext>,
    system_prompt: String,
    agent: Agent,
}

impl ChatEndpoint {
    pub fn new(persona: Arc<PersonaContext>, agent: Agent) -> Self {
        let system_prompt = build_system_prompt(&persona);
        Self {
            persona,
            system_prompt,
            agent,
        }
    }

    pub fn persona(&self) -> &PersonaContext {
        &self.persona
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub async fn chat(&self, message: &str, history: &[Message]) -> Result<String, ChatError> {
        let span = tracing::info_span!("chat", run_id = %Uuid::new_v4(), history = history.len());
        async {
            let result = self.agent.run(&self.system_prompt, history, message).await;
            match &result {
                Ok(answer) => tracing::info!(answer_chars = answer.len(), "chat turn complete"),
                Err(e) => tracing::error!(error = %e, "chat turn failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
