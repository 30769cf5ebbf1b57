//! CLI entrypoint for askema
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod cli;

use anyhow::Result;
use askema_application::StructuredAskUseCase;
use askema_domain::ModelTag;
use askema_infrastructure::{ConfigLoader, OllamaTransport};
use clap::Parser;
use cli::{Cli, Command};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Resolve configuration: files first, flags override
    let config = ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?;
    let base_url = cli.base_url.unwrap_or(config.ollama.base_url.clone());
    let model: ModelTag = match &cli.model {
        Some(tag) => tag.parse()?,
        None => config.ollama.model_tag()?,
    };

    info!("Using model {} at {}", model, base_url);

    // === Dependency Injection ===
    // Create the infrastructure adapter and inject it into the use case
    let transport = Arc::new(OllamaTransport::new(base_url));
    let ask = StructuredAskUseCase::new(transport, model);

    match cli.command {
        Command::Bool { question } => {
            let answer = ask.ask_boolean(&question).await?;
            println!("{answer}");
        }
        Command::Choose { question, options } => {
            let answer = ask.ask_single_choice(&question, options).await?;
            match answer {
                Some(selected) => println!("{selected}"),
                None => println!("(no answer)"),
            }
        }
        Command::ChooseMany { question, options } => {
            let answer = ask.ask_multi_choice(&question, options).await?;
            println!("{}", answer.join(", "));
        }
        Command::Pattern {
            question,
            pattern,
            description,
        } => {
            let answer = ask
                .ask_pattern(&question, &pattern, description.as_deref())
                .await?;
            match answer {
                Some(text) => println!("{text}"),
                None => println!("(no answer)"),
            }
        }
        Command::Demo => run_demo(&ask).await?,
    }

    Ok(())
}

/// The showcase questions: one per answer shape.
async fn run_demo(ask: &StructuredAskUseCase) -> Result<()> {
    let is_cosmetic = ask.ask_boolean("Is BMW a cosmetic company?").await?;
    println!("Boolean result: {is_cosmetic}");

    let palette = ["Red", "Blue", "Green", "Yellow", "Purple", "Orange"];

    let color = ask
        .ask_single_choice("What is sun's color?", palette)
        .await?;
    println!("SingleChoice result: {}", color.unwrap_or_default());

    let colors = ask
        .ask_multi_choice("What are the primary colors?", palette)
        .await?;
    println!("MultiChoice result: {}", colors.join(", "));

    let phone = ask
        .ask_pattern("Generate a US phone number", r"^\(\d{3}\) \d{3}-\d{4}$", None)
        .await?;
    println!("Pattern result: {}", phone.unwrap_or_default());

    Ok(())
}
