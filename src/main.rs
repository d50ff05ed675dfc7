use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use cloudkeep::cli;
use cloudkeep::cli::Args;
use cloudkeep::config::load_config;
use cloudkeep::error::Result;
use cloudkeep::storage::StorageClient;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // Unknown commands exit 1 with usage; help and version exit 0
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    if let Err(e) = run_app(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_app(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    // Configuration problems abort here, before any remote call
    let config = load_config()?;
    let client = StorageClient::new(config.storage.clone()).await?;
    cli::run(command, client, &config).await
}
