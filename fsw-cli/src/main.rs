//! fsw CLI - watch FRED series and alert on threshold crossings.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "fsw-cli",
    version,
    about = "FRED series watcher: standardized-change monitoring and alerting"
)]
struct Cli {
    #[command(subcommand)]
    command: fsw_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    fsw_cmd::run(cli.command).await
}
