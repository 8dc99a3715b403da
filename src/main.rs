//! fishrack - terminal rack grid manager for zebrafish facilities
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use fishrack::headless;
use fishrack_api::{HttpTankService, SessionProvider, StaticSession};
use fishrack_app::config::{
    apply_env_overrides, default_config_path, load_settings, token_from_env, Settings,
};
use fishrack_app::{AppState, Message};
use fishrack_core::{logging, RackId};

/// fishrack - rack grid manager for zebrafish facilities
#[derive(Parser, Debug)]
#[command(name = "fishrack")]
#[command(about = "Terminal rack grid manager for zebrafish facilities", long_about = None)]
struct Args {
    /// Base URL of the tank service (overrides config and FISHRACK_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Bearer token (defaults to FISHRACK_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Path to config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Rack to open first
    #[arg(long, value_name = "ID")]
    rack: Option<u64>,

    /// Print every rack grid with statistics and exit (no TUI)
    #[arg(long)]
    dump: bool,

    /// Print the dump as JSON
    #[arg(long, requires = "dump")]
    json: bool,
}

fn load_config(args: &Args) -> Settings {
    let mut settings = args
        .config
        .clone()
        .or_else(default_config_path)
        .map(|path| load_settings(&path))
        .unwrap_or_default();
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    if let Some(url) = args.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        settings.api.base_url = url.to_string();
    }
    settings
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let settings = load_config(&args);
    let token = args
        .token
        .clone()
        .or_else(|| token_from_env(|key| std::env::var(key).ok()));
    info!("Using tank service at {}", settings.api.base_url);

    let session = Arc::new(StaticSession::new(token));
    let service = Arc::new(HttpTankService::new(
        &settings.api.base_url,
        Duration::from_millis(settings.api.timeout_ms),
        session.clone(),
    )?);

    if args.dump {
        let output = headless::dump(service.as_ref(), args.json).await?;
        println!("{}", output);
        return Ok(());
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);

    let hook_tx = msg_tx.clone();
    session.on_auth_failure(Arc::new(move |status| {
        info!("Session rejected (status {:?})", status);
        if let Err(e) = hook_tx.try_send(Message::AuthenticationFailed) {
            warn!("Failed to report session rejection: {}", e);
        }
    }));

    let mut state = AppState::new(settings);
    state.preferred_rack = args.rack.map(RackId);

    fishrack_tui::run(state, service, msg_tx, msg_rx).await?;
    Ok(())
}
