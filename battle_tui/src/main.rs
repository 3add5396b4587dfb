//! battle_tui - Terminal host for battle_core battles
//!
//! `--auto` runs a headless AI-vs-AI battle, logging through `tracing` to
//! stderr (filter with `RUST_LOG`). `--json` also dumps every event to
//! stdout as JSON lines.

mod app;
mod simulation;
mod ui;

use app::App;
use battle_core::config::{
    default_battle_setup, default_gameplay_config, load_ability_configs, load_gameplay_config,
    ConfigError,
};
use battle_core::{BattleSetup, GameplayConfig};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const DEFAULT_SEED: u64 = 0x5EED;

/// Turn-based party battles in the terminal
#[derive(Parser, Debug)]
#[command(name = "battle_tui")]
#[command(about = "Play a party-vs-party battle, or watch the AI fight itself with --auto")]
struct Args {
    /// Run AI vs AI without the terminal UI
    #[arg(long)]
    auto: bool,

    /// With --auto, print every event to stdout as JSON lines
    #[arg(long)]
    json: bool,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Encounter file (defaults to the bundled battle.toml)
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Gameplay constants file (defaults to the bundled gameplay.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ability library that setup members can reference by name
    #[arg(long)]
    abilities: Option<PathBuf>,
}

fn load(args: &Args) -> Result<(BattleSetup, GameplayConfig), ConfigError> {
    let config = match &args.config {
        Some(path) => load_gameplay_config(path)?,
        None => default_gameplay_config(),
    };
    let mut setup = match &args.setup {
        Some(path) => BattleSetup::load(path)?,
        None => default_battle_setup(),
    };
    if let Some(path) = &args.abilities {
        setup = setup.with_ability_library(load_ability_configs(path)?)?;
    }
    Ok((setup, config))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let (setup, config) = load(&args)?;

    if args.auto {
        run_headless(&args, &setup, config)?;
        return Ok(());
    }

    run_interactive(App::new(setup, config, args.seed))?;
    Ok(())
}

fn run_headless(args: &Args, setup: &BattleSetup, config: GameplayConfig) -> io::Result<()> {
    // Stderr keeps stdout clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let summary = simulation::run_headless(setup, config, args.seed, args.json)?;
    tracing::info!("{}", summary.describe());
    Ok(())
}

fn run_interactive(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut last_tick = Instant::now();

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => app.on_enter(),
                    (KeyCode::Esc, _) | (KeyCode::Backspace, _) => app.on_cancel(),
                    (KeyCode::Char('p'), _) => app.pass_turn(),
                    (KeyCode::PageUp, _) => app.scroll_log_up(),
                    (KeyCode::PageDown, _) => app.scroll_log_down(),
                    (KeyCode::Char('r'), _) => app.reset(),
                    (KeyCode::Char('?'), _) => app.toggle_help(),
                    _ => {}
                }
            }
        }

        // Tick battle
        let now = Instant::now();
        app.tick(now.duration_since(last_tick).as_secs_f64());
        last_tick = now;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
