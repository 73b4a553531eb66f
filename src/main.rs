//! Terminal pairs runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output, and a fixed
//! `TICK_MS` step driving the round.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tui_pairs::app::{App, Screen};
use tui_pairs::core::{dispatch_cue, BoardGenerator, BoardRng, RoundConfig, RoundSnapshot, Session};
use tui_pairs::input::{handle_key_event, should_quit};
use tui_pairs::store::{BestScoreStore, FileBestScore, MemoryBestScore};
use tui_pairs::term::{BellCues, FrameBuffer, GameView, MenuView, TerminalRenderer, Viewport, FACE_GLYPHS};
use tui_pairs::types::{Preset, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_STARTING_TIME_SECS, TICK_MS};

const DEFAULT_LOG_FILTER: &str = "tui_pairs=info,tui_pairs_core=info";

#[derive(Parser, Debug)]
#[command(name = "tui-pairs", version, about = "Memory pairs in the terminal", long_about = None)]
struct Cli {
    /// Board rows for the "Custom" entry.
    #[arg(long, env = "PAIRS_ROWS", default_value_t = DEFAULT_ROWS)]
    rows: u16,

    /// Board columns for the "Custom" entry.
    #[arg(long, env = "PAIRS_COLS", default_value_t = DEFAULT_COLS)]
    cols: u16,

    /// Starting time in seconds for the "Custom" entry.
    #[arg(long = "time", env = "PAIRS_TIME", default_value_t = DEFAULT_STARTING_TIME_SECS)]
    time_secs: u32,

    /// Skip the menu and start this preset (easy, normal, hard).
    #[arg(long, env = "PAIRS_PRESET", value_parser = parse_preset)]
    preset: Option<Preset>,

    /// Board shuffle seed; random when omitted.
    #[arg(long, env = "PAIRS_SEED")]
    seed: Option<u64>,

    /// Where the best score is kept.
    #[arg(long, env = "PAIRS_BEST_FILE", default_value = ".tui-pairs-best.json")]
    best_file: PathBuf,

    /// Keep the best score in memory only.
    #[arg(long, env = "PAIRS_NO_SAVE")]
    no_save: bool,

    /// Write logs to this file (filter with PAIRS_LOG).
    #[arg(long, env = "PAIRS_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Ring the terminal bell on matches and at round end.
    #[arg(long, env = "PAIRS_BELL")]
    bell: bool,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    Preset::from_str(s).ok_or_else(|| format!("unknown preset '{s}' (expected easy, normal or hard)"))
}

/// The "Custom" entry's board. Only fatal when it is the board about to be played.
fn custom_config(cli: &Cli) -> Result<RoundConfig> {
    match RoundConfig::custom_clamped(cli.rows, cli.cols, cli.time_secs) {
        Ok(config) => Ok(config),
        Err(err) if cli.preset.is_some() => {
            tracing::warn!(%err, "ignoring invalid custom board, using defaults");
            Ok(RoundConfig::default())
        }
        Err(err) => Err(err).context("invalid custom board"),
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("PAIRS_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout belongs to the game screen, so logs only ever go to the file.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let custom = custom_config(&cli)?;

    let mut store: Box<dyn BestScoreStore> = if cli.no_save {
        Box::new(MemoryBestScore::default())
    } else {
        Box::new(FileBestScore::new(&cli.best_file))
    };
    let best = store.load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "best score unavailable, starting from 0");
        0
    });

    let rng = cli.seed.map_or_else(BoardRng::from_entropy, BoardRng::new);
    tracing::info!(seed = rng.seed(), best, "session start");
    let session = Session::new(custom, BoardGenerator::new(FACE_GLYPHS.len()), rng).with_best_score(best);

    let mut app = App::new(session, custom);
    if let Some(preset) = cli.preset {
        app.play(RoundConfig::from_preset(preset));
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, store.as_mut(), cli.bell);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App, store: &mut dyn BestScoreStore, bell: bool) -> Result<()> {
    let game_view = GameView::default();
    let menu_view = MenuView;
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = RoundSnapshot::default();
    let mut cues = bell.then(BellCues::new);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        match app.screen() {
            Screen::Menu => {
                let labels = app.menu_labels();
                menu_view.render_into(&labels, app.menu_selected(), app.session().best_score(), viewport, &mut fb);
            }
            Screen::CustomEdit => {
                let (fields, focused) = app.custom_labels();
                menu_view.render_custom_into(&fields, focused, viewport, &mut fb);
            }
            Screen::Playing => {
                app.snapshot_into(&mut snap);
                game_view.render_into(&snap, Some(app.cursor()), viewport, &mut fb);
            }
        }
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.handle_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(TICK_MS);

            for event in app.take_events() {
                tracing::trace!(?event, "round event");
                if let Some(cues) = cues.as_mut() {
                    dispatch_cue(cues, &event);
                }
            }
            if cues.as_mut().is_some_and(BellCues::take_ring) {
                term.ring_bell();
            }

            if let Some(best) = app.take_new_best() {
                if let Err(err) = store.save(best) {
                    tracing::warn!(error = %err, best, "failed to save best score");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tui-pairs").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_custom_board_from_flags() {
        let config = custom_config(&cli(&["--rows", "3", "--cols", "1", "--time", "5"])).unwrap();
        assert_eq!((config.rows(), config.cols(), config.starting_time_secs()), (3, 2, 10));
    }

    #[test]
    fn test_invalid_custom_board_is_fatal_without_preset() {
        assert!(custom_config(&cli(&["--rows", "20"])).is_err());
    }

    #[test]
    fn test_preset_ignores_invalid_custom_board() {
        let config = custom_config(&cli(&["--preset", "easy", "--rows", "20"])).unwrap();
        assert_eq!(config, RoundConfig::default());
    }
}
