//! skybrief CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config & reports directory
//! - `chat`    — Interactive chat or single-message mode
//! - `weather` — One-shot weather lookup without the chat model
//! - `monitor` — Run the background weather monitor

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "skybrief",
    about = "skybrief — weather assistant with a chat-model tool loop",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and the reports directory
    Onboard,

    /// Chat with the weather assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Look up current weather directly, without the chat model
    Weather {
        /// City name or alias
        city: String,

        /// Also run an analysis: clothing, activity, or health
        #[arg(short, long)]
        analyze: Option<String>,
    },

    /// Run the background weather monitor
    Monitor {
        /// Poll once and exit instead of running on the interval
        #[arg(long)]
        once: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Weather { city, analyze } => commands::weather::run(&city, analyze).await?,
        Commands::Monitor { once } => commands::monitor::run(once).await?,
    }

    Ok(())
}
