use crate::error::ToolError;
use crate::notifier::Notifier;
use crate::tool_registry::{ParamType, Parameter, ParameterSchema, ToolHandler, ToolSpec};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const NAME: &str = "record_user_details";
const DEFAULT_NAME: &str = "Name not provided";
const DEFAULT_NOTES: &str = "not provided";

#[derive(Deserialize)]
struct Args {
    email: String,
    name: String,
    notes: String,
}

pub struct RecordUserDetails {
    notifier: Arc<dyn Notifier>,
}

impl RecordUserDetails {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl ToolHandler for RecordUserDetails {
    async fn call(&self, args: Map<String, Value>) -> Result<Value, ToolError> {
        let args: Args = serde_json::from_value(Value::Object(args)).map_err(|e| {
            ToolError::InvalidArguments {
                tool: NAME.to_string(),
                reason: e.to_string(),
            }
        })?;

        let text = format!(
            "Recording interest from {} with email {} and notes {}",
            args.name, args.email, args.notes
        );
        if let Err(e) = self.notifier.notify(&text).await {
            tracing::warn!(tool = NAME, error = %e, "notification failed");
        }
        Ok(super::recorded())
    }
}

pub fn spec(notifier: Arc<dyn Notifier>) -> ToolSpec {
    ToolSpec::new(
        NAME,
        "Use this tool to record a user's interest in being in touch and provided an email address",
        ParameterSchema::new(vec![
            Parameter::required("email", ParamType::String, "the email address of this user"),
            Parameter::optional(
                "name",
                ParamType::String,
                "the user's name, if they provided it",
                Some(Value::from(DEFAULT_NAME)),
            ),
            Parameter::optional(
                "notes",
                ParamType::String,
                "Any additional information about the conversation that's worth recording to give context",
                Some(Value::from(DEFAULT_NOTES)),
            ),
        ]),
        RecordUserDetails::new(notifier),
    )
}
