use anyhow::{Context, Result};
use clap::Parser;
use headliner::app::{App, AppEvent};
use headliner::config::Config;
use headliner::ui;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Get the config directory path (~/.config/headliner/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("headliner"))
}

#[derive(Parser, Debug)]
#[command(
    name = "headliner",
    about = "Terminal RSS reader backed by a feed-to-JSON conversion service"
)]
struct Args {
    /// Path to a config file (default: ~/.config/headliner/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the conversion endpoint for this run
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => {
            let config_dir = get_config_dir()?;
            if !config_dir.exists() {
                std::fs::create_dir_all(&config_dir)
                    .context("Failed to create config directory")?;
            }
            config_dir.join("config.toml")
        }
    };

    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    let mut app = App::new(&config).context("Failed to create application")?;

    // Channel for background load completions
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
