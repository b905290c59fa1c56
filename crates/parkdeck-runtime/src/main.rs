//! parkdeck: parking-session watcher binary.
//! Single-process CLI embedding the polling reconciler; talks to the
//! remote session store over HTTPS.

use clap::Parser;

use parkdeck_api::{HttpSessionApi, StaticToken};

mod cli;
mod feed_loop;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let filter = std::env::var("PARKDECK_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let api = build_api(&args)?;

    match args.command {
        cli::Command::Watch(opts) => feed_loop::run_watch(&api, &opts).await?,
        cli::Command::Ls(opts) => feed_loop::run_ls(&api, &opts).await?,
        cli::Command::Create(opts) => feed_loop::run_create(&api, &opts).await?,
        cli::Command::Complete(opts) => feed_loop::run_complete(&api, &opts).await?,
    }

    Ok(())
}

fn build_api(args: &cli::Cli) -> anyhow::Result<HttpSessionApi<StaticToken>> {
    let api_url = args
        .api_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--api-url or PARKDECK_API_URL is required"))?;
    let token = args
        .token
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--token or PARKDECK_TOKEN is required"))?;

    Ok(HttpSessionApi::new(api_url, StaticToken::new(token))?)
}
