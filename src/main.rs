//! Kerplunk entry point
//!
//! Picks a backend, loads settings and runs the game loop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use kerplunk::game::{Game, run_headless};
use kerplunk::platform::{CrosstermInput, StdinInput};
use kerplunk::renderer::{PlainRenderer, TerminalRenderer};
use kerplunk::{Backend, Settings};

#[derive(Parser, Debug)]
#[command(name = "kerplunk", version, about = "Dodge the plunks falling down the lanes")]
struct Cli {
    /// JSON settings file; missing fields use defaults.
    #[arg(short, long, env = "KERPLUNK_CONFIG")]
    config: Option<PathBuf>,

    /// Display backend: auto, terminal or plain.
    #[arg(long, value_parser = parse_backend)]
    backend: Option<Backend>,

    /// Shorthand for `--backend plain`.
    #[arg(long, conflicts_with = "backend")]
    plain: bool,

    /// Let the autopilot steer.
    #[arg(long)]
    autopilot: bool,

    /// Run this many ticks without a display and print a JSON summary.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Seed the run RNG for a repeatable run.
    #[arg(long)]
    seed: Option<u64>,

    /// Target frame rate.
    #[arg(long)]
    fps: Option<f32>,
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    Backend::from_str(s).ok_or_else(|| format!("unknown backend '{}'", s))
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }
        if self.plain {
            settings.backend = Backend::Plain;
        }
        if self.autopilot {
            settings.autopilot = true;
        }
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        settings.validate().context("invalid settings")?;
        Ok(settings)
    }
}

fn run_plain(settings: Settings, seed: Option<u64>) -> Result<()> {
    let mut game = Game::new(
        settings,
        seed,
        Box::new(PlainRenderer::stdout()),
        Box::new(StdinInput::spawn()),
    );
    game.run()?;
    Ok(())
}

fn run_terminal(renderer: TerminalRenderer, settings: Settings, seed: Option<u64>) -> Result<()> {
    let mut game = Game::new(settings, seed, Box::new(renderer), Box::new(CrosstermInput))
        .with_exit_pause(true);
    game.run()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = cli.settings()?;
    log::info!("Kerplunk starting (backend={})", settings.backend.as_str());

    if let Some(ticks) = cli.headless {
        let summary = run_headless(&settings, ticks, cli.seed);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    match settings.backend {
        Backend::Plain => run_plain(settings, cli.seed),
        Backend::Terminal => run_terminal(TerminalRenderer::start()?, settings, cli.seed),
        Backend::Auto => match TerminalRenderer::start() {
            Ok(renderer) => run_terminal(renderer, settings, cli.seed),
            Err(err) => {
                log::warn!("Terminal backend unavailable: {:#}", err);
                println!("Terminal mode failed, falling back to simple console mode.");
                run_plain(settings, cli.seed)
            }
        },
    }
}
