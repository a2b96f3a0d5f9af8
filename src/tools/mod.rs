use crate::error::RegistryError;
use crate::notifier::Notifier;
use crate::tool_registry::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;

pub mod record_unknown_question;
pub mod record_user_details;

fn recorded() -> Value {
    serde_json::json!({ "recorded": "ok" })
}

/// Registry holding the two tools the assistant is allowed to call.
pub fn builtin_registry(notifier: Arc<dyn Notifier>) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(record_user_details::spec(notifier.clone()))?;
    registry.register(record_unknown_question::spec(notifier))?;
    Ok(registry)
}
