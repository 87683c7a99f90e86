mod agents;
mod app;
mod config;
mod domain;
mod history;
mod normalize;
mod state;
mod state_machine;
mod structured_logger;
mod tui;

use anyhow::Result;
use app::cli::{Cli, Command};
use app::headless::{run_generate, GenerateArgs};
use clap::Parser;
use config::Config;
use domain::Meeting;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;

    let meetings_file = cli
        .meetings
        .as_deref()
        .or(config.defaults.meetings_file.as_deref());
    let meetings = match meetings_file {
        Some(path) => domain::load_meetings(path)?,
        None => Meeting::samples(),
    };

    match cli.command {
        Some(Command::Generate {
            meeting,
            channel,
            post,
            draft,
        }) => {
            run_generate(
                config,
                meetings,
                GenerateArgs {
                    meeting_id: meeting,
                    channel,
                    post,
                    draft,
                },
            )
            .await
        }
        None => tui::run_tui(config, meetings).await,
    }
}
