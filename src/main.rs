use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use persona_chat::agent::{Agent, AgentOptions};
use persona_chat::chat::ChatEndpoint;
use persona_chat::config::Config;
use persona_chat::context::PersonaContext;
use persona_chat::llm_client::LlmClient;
use persona_chat::notifier::{Notifier, PushoverNotifier};
use persona_chat::session::Session;
use persona_chat::tools;

const HELP: &str = "Type a question and press enter. Commands: help, clear (forget this chat), quit";

fn build_endpoint(config: &Config) -> anyhow::Result<ChatEndpoint> {
    let persona = PersonaContext::load(
        &config.persona_name,
        &config.profile_pdf,
        &config.profile_summary,
    )?;

    let notifier: Arc<dyn Notifier> = Arc::new(PushoverNotifier::new(
        config.pushover_user.clone(),
        config.pushover_token.clone(),
    )?);
    let registry = tools::builtin_registry(notifier)?;

    let llm = LlmClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    )?;
    tracing::info!(
        model = llm.model(),
        tools = registry.schema_list().len(),
        "model client ready"
    );

    let agent = Agent::new(
        Arc::new(llm),
        Arc::new(registry),
        AgentOptions {
            max_turns: config.max_turns,
            step_timeout: config.model_timeout,
        },
    );
    Ok(ChatEndpoint::new(Arc::new(persona), agent))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let endpoint = build_endpoint(&config)?;
    tracing::debug!(prompt_chars = endpoint.system_prompt().len(), "system prompt built");

    println!(
        "\u{001b}[94mChatting with {}'s assistant. Type 'help' for commands.\u{001b}[0m",
        endpoint.persona().name
    );

    let mut session = Session::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\u{001b}[93mYou:\u{001b}[0m ");
        std::io::stdout().flush()?;

        let Some(input) = lines.next_line().await? else {
            break;
        };

        match input.trim() {
            "" => continue,
            "quit" => break,
            "help" => println!("{}", HELP),
            "clear" => {
                session.clear();
                println!("\u{001b}[90m(conversation cleared)\u{001b}[0m");
            }
            message => match endpoint.chat(message, &session.messages).await {
                Ok(answer) => {
                    println!("\u{001b}[96mAgent:\u{001b}[0m {}", answer);
                    session.record_exchange(message, &answer);
                }
                Err(_) => {
                    println!(
                        "\u{001b}[91mSorry, something went wrong while answering. Please try again.\u{001b}[0m"
                    );
                }
            },
        }
    }

    tracing::info!(
        session = %session.id,
        started = %session.created_at,
        turns = session.turns(),
        "chat ended"
    );
    Ok(())
}
