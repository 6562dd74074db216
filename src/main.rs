use appnotify::cli::{Cli, execute_command, init_logger_from_settings, load_settings};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_logger_from_settings(&settings, &cli)?;

    execute_command(&cli, settings).await
}
