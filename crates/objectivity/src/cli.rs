use clap::{Parser, Subcommand};
use domain_classifier::Domain;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "objectivity",
    version,
    about = "Detects rhetorical bias in prompts and rewrites them neutrally"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "objectivity.yaml", global = true)]
    pub config: PathBuf,

    /// Listen address (overrides config file setting)
    #[arg(long, global = true)]
    pub listen: Option<String>,

    /// Log level or filter directive (overrides config file setting)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API (the default)
    Serve,

    /// Analyze one prompt and print the response as JSON
    Analyze {
        /// Prompt text
        text: String,
        /// Domain override: political, science, medical or general
        #[arg(long)]
        domain: Option<Domain>,
        /// Use the LLM backend instead of the rule-based rewriter
        #[arg(long)]
        ai: bool,
    },

    /// Detect and score biases in one prompt and print them as JSON
    Detect {
        /// Prompt text
        text: String,
    },
}
