//! BotMatata Hero Entry Point
//!
//! Launches the terminal hero section with the animated chat widget.
//!
//! Usage:
//!   botmatata-hero [OPTIONS]
//!
//! Options:
//!   --config <FILE>       Config file (default: $XDG_CONFIG_HOME/botmatata/hero.toml)
//!   --speed <FACTOR>      Playback speed factor
//!   --log-level <LEVEL>   Log filter when RUST_LOG is unset
//!   --timeline <CYCLES>   Print the virtual timeline and exit (no TTY needed)
//!   --json                Timeline as JSON lines

use std::io::{self, IsTerminal};
use std::panic;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use botmatata_core::{load_config, HeroConfig, Timeline};
use botmatata_tui::cli::write_timeline;
use botmatata_tui::logging::{self, LogTarget};
use botmatata_tui::{App, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args.overrides()).context("loading hero configuration")?;

    if let Some(cycles) = args.timeline {
        logging::init(&args.log_level, &LogTarget::Stderr)?;
        return print_timeline(&config, cycles, args.json);
    }

    let log_path = logging::default_log_path();
    logging::init(&args.log_level, &LogTarget::File(log_path.clone()))?;
    info!(
        source = %config.source(),
        speed = config.speed,
        log = %log_path.display(),
        "Starting botmatata-hero"
    );

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: botmatata-hero requires a terminal (TTY)");
        eprintln!();
        eprintln!("For non-interactive use, print the timeline instead:");
        eprintln!("  botmatata-hero --timeline 2");
        eprintln!("  botmatata-hero --timeline 2 --json");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &HeroConfig,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.run(terminal).await?;
    info!(mounts = app.mounts(), "botmatata-hero exiting");
    Ok(())
}

fn print_timeline(config: &HeroConfig, cycles: u64, json: bool) -> anyhow::Result<()> {
    let timing = config
        .effective_timing()
        .context("resolving animation timing")?;
    let timeline = Timeline::record(config.script.clone(), timing, cycles);
    info!(
        cycles,
        entries = timeline.entries().len(),
        "Recorded virtual timeline"
    );

    let stdout = io::stdout();
    write_timeline(&mut stdout.lock(), &timeline, json)
}
