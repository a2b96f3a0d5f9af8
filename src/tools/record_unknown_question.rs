use crate::error::ToolError;
use crate::notifier::Notifier;
use crate::tool_registry::{ParamType, Parameter, ParameterSchema, ToolHandler, ToolSpec};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const NAME: &str = "record_unknown_question";

pub struct RecordUnknownQuestion {
    notifier: Arc<dyn Notifier>,
}

impl RecordUnknownQuestion {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl ToolHandler for RecordUnknownQuestion {
    async fn call(&self, args: Map<String, Value>) -> Result<Value, ToolError> {
        let question = args
            .get("question")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments {
                tool: NAME.to_string(),
                reason: "missing required parameter 'question'".to_string(),
            })?;

        let text = format!("Recording {} asked that I could not answer", question);
        if let Err(e) = self.notifier.notify(&text).await {
            tracing::warn!(tool = NAME, error = %e, "notification failed");
        }
        Ok(super::recorded())
    }
}

pub fn spec(notifier: Arc<dyn Notifier>) -> ToolSpec {
    ToolSpec::new(
        NAME,
        "Always use this tool to record any question that couldn't be answered as you didn't know the answer",
        ParameterSchema::new(vec![Parameter::required(
            "question",
            ParamType::String,
            "The question that couldn't be answered",
        )]),
        RecordUnknownQuestion::new(notifier),
    )
}
