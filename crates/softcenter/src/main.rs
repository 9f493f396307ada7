mod command;
mod display;

use anyhow::{Context, Error};
use clap::Parser;
use command::Command;
use display::TerminalDisplay;
use softcenter_core::logging::{init_logging, shutdown_logging};
use softcenter_core::settings::{Settings, DEFAULT_SETTINGS_PATH};
use softcenter_core::view::BrowsePane;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "softcenter")]
#[command(about = "Browse the software catalog from a terminal")]
struct Cli {
    /// Settings file; defaults are used when it doesn't exist
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Log filter overriding the configured level
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings)?;
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }

    init_logging(&settings.logging)?;
    tracing::info!(settings = %cli.settings.display(), "Starting software center");

    let result = run(&settings);

    tracing::info!("Exiting software center");
    shutdown_logging();
    result
}

fn run(settings: &Settings) -> Result<(), Error> {
    let display = Rc::new(TerminalDisplay::new(io::stdout()));
    let mut pane = BrowsePane::new(display, settings);
    print_buttons(&pane);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("can't read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::History) => println!("{}", pane.breadcrumbs().join(" > ")),
            Ok(Command::Pane(evt)) => match pane.handle_event(evt) {
                Ok(()) => print_buttons(&pane),
                Err(e) => eprintln!("{}", e),
            },
            Err(e) => eprintln!("{}", e),
        }
        io::stdout().flush().context("can't flush output")?;
    }

    Ok(())
}

fn print_buttons(pane: &BrowsePane) {
    let buttons = pane.buttons();
    let back = match pane.back_tooltip() {
        Some(tooltip) if buttons.back => format!("[< {}]", tooltip),
        _ => "[<]".to_string(),
    };
    let forward = match pane.forward_tooltip() {
        Some(tooltip) if buttons.forward => format!("[{} >]", tooltip),
        _ => "[>]".to_string(),
    };
    println!("{} {}", back, forward);
}
