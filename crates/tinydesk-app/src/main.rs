//! TINYDESK console entry point.
//!
//! Runs the desktop headless: windows live in an in-memory scene and every
//! action is typed on stdin. Type `help` for the command list.

mod commands;
mod console;

use std::io;

use anyhow::{Context, Result};

use commands::Action;
use console::Console;
use tinydesk_core::{DesktopConfig, Shell};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Config path from CLI arg or TINYDESK_CONFIG, defaults otherwise.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TINYDESK_CONFIG").ok())
    {
        Some(path) => {
            DesktopConfig::load(&path).with_context(|| format!("failed to load config {path}"))?
        },
        None => DesktopConfig::default(),
    };
    log::info!(
        "Starting {} ({}x{})",
        config.title,
        config.width,
        config.height
    );

    let mut shell = Shell::new(config);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    console.print(&format!("{}\nType 'help' for commands.\n", shell.about()))?;

    while let Some(line) = console.read_line()? {
        if commands::run_line(&mut shell, &mut console, &line)? == Action::Quit {
            break;
        }
    }

    log::info!("Shutting down");
    Ok(())
}
