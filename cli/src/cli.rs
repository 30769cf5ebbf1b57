//! Command-line interface definition

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Ask a chat model questions with typed, machine-parseable answers.
#[derive(Debug, Parser)]
#[command(name = "askema", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a config file (overrides discovered configs)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model tag to ask (overrides config)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Ollama base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a yes/no question
    Bool {
        /// The question to ask
        question: String,
    },

    /// Ask the model to pick exactly one option
    Choose {
        /// The question to ask
        question: String,
        /// An allowed option (repeatable)
        #[arg(short = 'o', long = "option", required = true)]
        options: Vec<String>,
    },

    /// Ask the model to pick any number of options
    ChooseMany {
        /// The question to ask
        question: String,
        /// An allowed option (repeatable)
        #[arg(short = 'o', long = "option", required = true)]
        options: Vec<String>,
    },

    /// Ask for an answer matching a regex pattern
    Pattern {
        /// The question to ask
        question: String,
        /// Regex the answer must match
        #[arg(short, long)]
        pattern: String,
        /// Optional description of the expected answer
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Run the showcase questions against the configured endpoint
    Demo,
}
