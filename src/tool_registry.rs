use crate::error::{RegistryError, ToolError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    pub kind: ParamType,
    pub description: String,
    pub required: bool,
    pub default: Option<Value>,
}

impl Parameter {
    pub fn required(name: &str, kind: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &str, kind: ParamType, description: &str, default: Option<Value>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: false,
            default,
        }
    }
}

/// Closed object schema: only declared parameters are accepted.
#[derive(Clone, Debug, Default)]
pub struct ParameterSchema {
    params: Vec<Parameter>,
}

impl ParameterSchema {
    pub fn new(params: Vec<Parameter>) -> Self {
        Self { params }
    }

    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        for p in &self.params {
            let mut prop = serde_json::json!({
                "type": p.kind.as_str(),
                "description": p.description,
            });
            if let Some(default) = &p.default {
                prop["default"] = default.clone();
            }
            properties.insert(p.name.clone(), prop);
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        })
    }

    /// Checks `args` against the schema and fills in declared defaults.
    pub fn validate(&self, tool: &str, args: Value) -> Result<Map<String, Value>, ToolError> {
        let invalid = |reason: String| ToolError::InvalidArguments {
            tool: tool.to_string(),
            reason,
        };

        let Value::Object(mut args) = args else {
            return Err(invalid("arguments must be a JSON object".to_string()));
        };

        if let Some(unknown) = args
            .keys()
            .find(|k| !self.params.iter().any(|p| &p.name == *k))
        {
            return Err(invalid(format!("unexpected parameter '{}'", unknown)));
        }

        for p in &self.params {
            // null on an optional parameter means "not provided"
            if !p.required && args.get(&p.name).is_some_and(Value::is_null) {
                args.remove(&p.name);
            }
            match args.get(&p.name) {
                Some(v) if !p.kind.matches(v) => {
                    return Err(invalid(format!(
                        "parameter '{}' must be a {}",
                        p.name,
                        p.kind.as_str()
                    )));
                }
                Some(_) => {}
                None if p.required => {
                    return Err(invalid(format!("missing required parameter '{}'", p.name)));
                }
                None => {
                    if let Some(default) = &p.default {
                        args.insert(p.name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(args)
    }
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: Map<String, Value>) -> Result<Value, ToolError>;
}

#[derive(Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
    handler: Arc<dyn ToolHandler>,
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl ToolSpec {
    pub fn new(
        name: &str,
        description: &str,
        parameters: ParameterSchema,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
            handler: Arc::new(handler),
        }
    }

    /// OpenAI function-tool entry advertised to the model.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters.to_json()
            }
        })
    }

    /// Parses and validates the raw argument text, then runs the handler.
    /// The handler never sees arguments that fail validation.
    pub async fn invoke(&self, raw_args: &str) -> Result<Value, ToolError> {
        let args: Value = if raw_args.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(raw_args).map_err(|e| ToolError::InvalidArguments {
                tool: self.name.clone(),
                reason: format!("arguments are not valid JSON: {}", e),
            })?
        };
        let args = self.parameters.validate(&self.name, args)?;
        self.handler.call(args).await
    }
}

/// Name -> tool table, built at startup and read-only afterwards.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: ToolSpec) -> Result<(), RegistryError> {
        if self.index.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateToolName(spec.name));
        }
        self.index.insert(spec.name.clone(), self.tools.len());
        self.tools.push(spec);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<&ToolSpec> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Registered tools in registration order.
    pub fn schema_list(&self) -> &[ToolSpec] {
        &self.tools
    }

    // Single source of truth for "tools" schema the LLM sees
    pub fn schemas(&self) -> Value {
        Value::Array(self.schema_list().iter().map(ToolSpec::to_json).collect())
    }
}
