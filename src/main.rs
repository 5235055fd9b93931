//! Interactive customer-support chat in the terminal

use std::sync::Arc;
use support_chat::{console, ChatConfig, ChatSession, HttpTransport, LoggingTransport};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (stderr, so it does not interleave with the chat)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "support_chat=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = ChatConfig::from_env()?;
    tracing::info!(
        endpoint = %config.chat_endpoint(),
        timeout_ms = %config.timeout.as_millis(),
        "Support chat configured"
    );

    let transport = Arc::new(LoggingTransport::new(HttpTransport::new(&config)?));

    console::run(
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        || ChatSession::new(Arc::clone(&transport)),
    )
    .await?;

    Ok(())
}
