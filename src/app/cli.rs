use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meetings")]
#[command(about = "AI meeting summary assistant: generate, review, and publish summaries")]
#[command(version)]
pub struct Cli {
    /// Path to the YAML config file (default: ~/.meeting-agent/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to a YAML meetings file (overrides the config's meetings_file)
    #[arg(long)]
    pub meetings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a summary without the TUI and print it as JSON
    Generate {
        /// Id of the meeting to summarize
        #[arg(long)]
        meeting: String,

        /// Channel override for context gathering and posting
        #[arg(long)]
        channel: Option<String>,

        /// Post the generated summary to the target channel
        #[arg(long)]
        post: bool,

        /// Save the generated summary to history as a draft
        #[arg(long, conflicts_with = "post")]
        draft: bool,
    },
}
