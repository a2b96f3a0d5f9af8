use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures that abort a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("model call timed out after {0:?}")]
    ModelTimeout(Duration),

    #[error("no final answer after {0} model turns")]
    MaxTurnsExceeded(usize),
}

/// Failures inside a single tool invocation. Never abort the turn.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("tool '{tool}' failed: {reason}")]
    Execution { tool: String, reason: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateToolName(String),
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Conditions that keep the process from serving any request.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value '{value}' for environment variable {name}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("failed to read context file {path}: {source}")]
    ContextFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract text from {path}: {reason}")]
    Pdf { path: PathBuf, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
