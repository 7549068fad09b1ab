use std::time::Duration;

use clap::Parser;
use repo_search_core::config::DEFAULT_BASE_URL;
use repo_search_core::ClientConfig;

/// Search GitHub repositories from the terminal
#[derive(Parser, Debug)]
#[command(name = "repo-search", author, version, about, long_about = None)]
pub struct Cli {
    /// Search terms, joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// API base URL
    #[arg(long, env = "REPO_SEARCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Connect and read timeout in seconds
    #[arg(long, env = "REPO_SEARCH_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Show every card with its detail section
    #[arg(long)]
    pub expand: bool,

    /// Print the fetched items as JSON instead of cards
    #[arg(long)]
    pub json: bool,

    /// Skip the connectivity probe before searching
    #[arg(long)]
    pub no_probe: bool,
}

impl Cli {
    pub fn query(&self) -> String {
        self.query.join(" ")
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(self.base_url.as_str())
            .with_token(self.token.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
