use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

mod args;
mod card;
mod terminal;

use args::Cli;
use repo_search_core::SearchViewModel;

fn init_logger() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_logger();

    let cli = Cli::parse();
    let config = cli.config();
    debug!(?config, "starting search");

    let host = terminal::host(&config.base_url, !cli.no_probe);
    let strings = host.strings.clone();
    let vm = SearchViewModel::from_config(&config, host);

    // Failures have already been reported through the notifier.
    if let Err(err) = vm.query(&cli.query()).await {
        debug!(error = %err, "search did not complete");
        return Ok(ExitCode::FAILURE);
    }

    let items = vm.items().await;
    if cli.json {
        let json = serde_json::to_string_pretty(&items).context("serializing results")?;
        println!("{json}");
    } else {
        print!("{}", card::render_all(&items, &*strings, cli.expand));
    }
    Ok(ExitCode::SUCCESS)
}
