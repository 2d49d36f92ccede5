//! Birthday TUI entry point
//!
//! Terminal setup and teardown around the [`App`] event loop. Logging
//! goes to a file when asked for, never to the terminal the UI owns.

use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use birthday_tui::App;

#[derive(Parser, Debug)]
#[command(name = "birthday-tui", about = "Baby birthday screen over WebSocket")]
struct Args {
    /// Server address as host:port; connects on startup when given
    #[arg(long, env = "BIRTHDAY_SERVER")]
    server: Option<String>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let mut terminal = setup_terminal()?;
    let result = App::new(args.server).run(&mut terminal).await;
    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

fn restore_terminal() -> Result<()> {
    io::stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}
