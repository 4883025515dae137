//! Terminal gridfall runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::core::GameSession;
use gridfall::input::{map, KeyTracker};
use gridfall::term::{GameView, TerminalRenderer, Viewport};
use gridfall::types::{
    BoardConfig, DEFAULT_CELL_PX, DEFAULT_DROP_INTERVAL_MS, DEFAULT_GRID_HEIGHT,
    DEFAULT_GRID_WIDTH, DEFAULT_INPUT_LOCKOUT_MS, TICK_MS,
};

#[derive(Debug, Parser)]
#[command(name = "gridfall", about = "A falling-block puzzle for the terminal")]
struct Cli {
    /// Grid width in cells (clamped to 4..=20).
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u8,

    /// Grid height in cells (clamped to 4..=20).
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u8,

    /// Logical pixels per grid cell.
    #[arg(long, default_value_t = DEFAULT_CELL_PX)]
    cell_px: u16,

    /// Gravity interval in milliseconds.
    #[arg(long, default_value_t = DEFAULT_DROP_INTERVAL_MS)]
    drop_ms: u32,

    /// Input lockout window in milliseconds.
    #[arg(long, default_value_t = DEFAULT_INPUT_LOCKOUT_MS)]
    lockout_ms: u32,

    /// RNG seed; defaults to the current time.
    #[arg(long)]
    seed: Option<u32>,
}

impl Cli {
    fn board_config(&self) -> BoardConfig {
        BoardConfig {
            width: self.width,
            height: self.height,
            cell_px: self.cell_px,
            drop_interval_ms: self.drop_ms,
            input_lockout_ms: self.lockout_ms,
        }
        .clamped()
    }

    fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u32)
                .unwrap_or(1)
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, cli: &Cli) -> Result<()> {
    let config = cli.board_config();
    let mut session = GameSession::new(config, cli.seed());

    let view = GameView::default();
    let mut tracker = KeyTracker::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut fb = view.render(&session, Viewport::new(w, h));
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if map::should_quit(key) {
                            return Ok(());
                        }
                        if session.game_over() && map::should_restart(key) {
                            session = GameSession::new(config, cli.seed());
                            tracker.reset();
                            continue;
                        }
                        tracker.key_press(key);
                    }
                    KeyEventKind::Release => {
                        tracker.key_release(key);
                    }
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let input = tracker.sample();
            session.tick(TICK_MS, &input);
            tracker.end_tick();
        }
    }
}
