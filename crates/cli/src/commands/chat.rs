//! `skybrief chat` — Interactive or single-message chat mode.

use std::sync::Arc;

use skybrief_agent::Orchestrator;
use skybrief_config::AppConfig;
use skybrief_core::{Conversation, Message};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = super::build_provider(&config)?;
    let weather = super::build_weather_service(&config)?;

    // Keep the cache bounded while the process runs
    let sweeper = weather
        .cache()
        .spawn_sweeper(std::time::Duration::from_secs(config.weather.cache_sweep_secs));

    let toolkit = Arc::new(super::build_toolkit(&config, weather));

    let orchestrator = Orchestrator::new(provider, toolkit, &config.model)
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens)
        .with_max_rounds(config.max_tool_rounds);

    let result = if let Some(msg) = message {
        single_message(&orchestrator, &msg).await
    } else {
        interactive(&orchestrator, &config).await
    };

    sweeper.abort();
    result
}

async fn single_message(
    orchestrator: &Orchestrator,
    message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut conversation = Conversation::new();
    conversation.push(Message::user(message));

    let outcome = orchestrator.run(&mut conversation).await?;
    println!("{}", outcome.reply);

    if let Some(report) = outcome.artifacts.report {
        println!("\nReport: {}", report.file_url);
    }

    Ok(())
}

async fn interactive(
    orchestrator: &Orchestrator,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    use tokio::io::{AsyncBufReadExt, BufReader};

    println!();
    println!("  skybrief — Interactive Mode");
    println!();
    println!("  Model: {}", config.model);
    println!("  Tools: get_weather, analyze_weather, save_weather_report");
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut conversation = Conversation::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_prompt()?;
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            print_prompt()?;
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        conversation.push(Message::user(input));

        match orchestrator.run(&mut conversation).await {
            Ok(outcome) => {
                println!("\n{}\n", outcome.reply);
                if let Some(report) = outcome.artifacts.report {
                    println!("Report: {}\n", report.file_url);
                }
            }
            Err(e) => {
                eprintln!("\nError: {e}\n");
            }
        }

        print_prompt()?;
    }

    Ok(())
}

fn print_prompt() -> Result<(), Box<dyn std::error::Error>> {
    use std::io::Write;
    print!("  You > ");
    std::io::stdout().flush()?;
    Ok(())
}
