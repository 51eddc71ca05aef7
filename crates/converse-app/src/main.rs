//! Converse application binary - composition root.
//!
//! Ties the Converse crates into a terminal front-end:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the HTTP answering client and the notification sink
//! 4. Create the conversation controller seeded with the greeting
//! 5. Run a line-oriented read-eval loop over stdin
//!
//! The terminal host has no speech engine, so dictation is constructed
//! without a capability and the toggle degrades to the documented no-op.
//! Hosts that do have one (a webview shell, an OS speech service) inject it
//! through `ConversationController::new`.

mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use converse_chat::{ConversationController, SubmitOutcome, TracingNotificationSink};
use converse_client::HttpAnswerClient;
use converse_core::config::ConverseConfig;

use cli::CliArgs;

/// Print one transcript entry the way the scrolling log would show it.
fn render(message: &converse_core::types::Message) {
    let speaker = if message.is_bot { "assistant" } else { "you" };
    println!("{}> {}", speaker, message.text);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first so its log level can seed the tracing filter.
    let config_path = args.resolve_config_path();
    let config = ConverseConfig::load_or_default(&config_path);

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Converse v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_path.display(), "Configuration resolved");

    let endpoint = args.resolve_endpoint(&config.backend.ask_url);
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.backend.timeout_secs))
        .build()?;
    let client = Arc::new(HttpAnswerClient::with_client(endpoint.clone(), http));
    tracing::info!(endpoint = %endpoint, "Answering service configured");

    let sink = Arc::new(TracingNotificationSink);
    // No speech engine in a terminal host; dictation degrades to a no-op.
    let controller = Arc::new(ConversationController::new(
        &config.chat.greeting,
        client,
        sink,
        None,
    ));
    if !controller.dictation_available() {
        tracing::info!("No speech capability in this host; dictation disabled");
    }

    // Surface the domain events at debug level, the way a UI shell would
    // consume them for scrolling and the thinking indicator.
    let mut events = controller.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::debug!(event = event.event_name(), "domain event");
        }
    });

    for message in controller.messages() {
        render(&message);
    }
    println!("(type your question, or /quit to exit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line == "/quit" || line == "/exit" {
            break;
        }

        let before = controller.messages().len();
        match controller.submit(&line).await {
            SubmitOutcome::Answered | SubmitOutcome::Failed => {
                // The user's own line is already on screen; render the
                // reply that settled after it.
                for message in controller.messages().iter().skip(before + 1) {
                    render(message);
                }
            }
            SubmitOutcome::RejectedBlank => continue,
            SubmitOutcome::RejectedBusy => {
                // Unreachable in a sequential loop; kept for parity with
                // event-driven hosts.
                tracing::debug!("submission rejected: busy");
            }
        }
    }

    tracing::info!(session_id = %controller.session_id(), "Conversation ended");
    Ok(())
}
