// Widget Dashboard
// TUI for browsing categories of widgets and adding or removing them

// IMPORTS ------------------>>

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use widget_dashboard::core::{App, AppConfig};
use widget_dashboard::logging::setup_tracing;
use widget_dashboard::operations::{HttpCategoryApi, SyncStore};
use widget_dashboard::ui::run_app;

//--------------------------------------------------------<<

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "widget-dashboard")]
#[command(about = "Terminal dashboard for categories of widgets")]
struct Args {
    /// Root URL of the categories API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file (defaults to ./widget-dashboard.yaml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

// ┌──────────────────────────────────────────────────────────────────────────┐
// │                             MAIN ENTRY POINT                             │
// └──────────────────────────────────────────────────────────────────────────┘

fn main() -> Result<()> {
    let args = Args::parse();

    setup_tracing(args.verbose);

    // Resolve configuration before touching the terminal so errors stay readable
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let mut config = AppConfig::load(args.config.as_deref(), &cwd)?;
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }
    info!(api = %config.api.base_url, "starting widget-dashboard");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let api = HttpCategoryApi::new(&config.api.base_url, config.api.request_timeout)?;
    let store = Arc::new(SyncStore::new(Arc::new(api)));
    let mut app = App::new(config, store, runtime.handle().clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // In-flight requests are abandoned; nothing is committed after exit
    runtime.shutdown_timeout(Duration::from_millis(500));

    if let Err(err) = &result {
        error!(error = %err, "application error");
    }
    info!("exiting widget-dashboard");
    result
}
