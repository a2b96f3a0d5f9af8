//! Personal-assistant chat agent: answers visitor questions as a persona,
//! grounded in profile documents, with two notification tools.

pub mod agent;
pub mod chat;
pub mod config;
pub mod context;
pub mod error;
pub mod llm_client;
pub mod notifier;
pub mod prompt;
pub mod session;
pub mod tool_registry;
pub mod tools;
pub mod types;

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod tests;
