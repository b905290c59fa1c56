//! CLI definition using clap derive.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "parkdeck", about = "parking session watcher")]
pub struct Cli {
    /// Base URL of the session API
    #[arg(long, env = "PARKDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the session API
    #[arg(long, env = "PARKDECK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Live table view: poll on an interval, re-render on every change
    Watch(WatchOpts),
    /// Fetch once and print the table
    Ls(LsOpts),
    /// Start a new parking session
    Create(CreateOpts),
    /// End an active parking session
    Complete(CompleteOpts),
}

#[derive(clap::Args)]
pub struct WatchOpts {
    /// Poll interval in seconds
    #[arg(long, default_value = "10")]
    pub interval: u64,

    /// Only show active sessions
    #[arg(long)]
    pub active_only: bool,

    /// Seconds before an outstanding fetch is reported as delayed
    #[arg(long, default_value = "1")]
    pub delayed_after: u64,
}

#[derive(clap::Args, Default)]
pub struct LsOpts {
    /// Only show active sessions
    #[arg(long)]
    pub active_only: bool,
}

#[derive(clap::Args)]
pub struct CreateOpts {
    /// License plate number
    #[arg(long)]
    pub plate: String,

    /// License plate state
    #[arg(long)]
    pub state: String,

    #[arg(long)]
    pub make: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub color: Option<String>,
}

#[derive(clap::Args)]
pub struct CompleteOpts {
    /// Id of the session to finalize
    pub id: String,
}
