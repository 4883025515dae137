//! GameSession - explicit ownership root for one game.
//!
//! Owns one grid and one supply and passes references explicitly; nothing
//! in the core is reachable through globals. The session relays supply
//! notifications to the embedder and latches game-over when a spawn is
//! blocked.

use std::collections::VecDeque;

use crate::core::grid::Grid;
use crate::core::piece::Piece;
use crate::core::supply::{ActionInput, Supply, SupplyEvent};
use crate::types::BoardConfig;

/// One running game: grid, supply, and the event mailbox.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: BoardConfig,
    grid: Grid,
    supply: Supply,
    events: VecDeque<SupplyEvent>,
    game_over: bool,
}

impl GameSession {
    pub fn new(config: BoardConfig, seed: u32) -> Self {
        let config = config.clamped();
        Self {
            config,
            grid: Grid::new(&config),
            supply: Supply::new(&config, seed),
            events: VecDeque::new(),
            game_over: false,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.supply.active()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Advance one fixed tick. A finished game ignores further ticks.
    pub fn tick(&mut self, elapsed_ms: u32, input: &impl ActionInput) {
        if self.game_over {
            return;
        }

        self.supply.tick(elapsed_ms, input, &mut self.grid);

        while let Some(event) = self.supply.pop_event() {
            if event == SupplyEvent::SpawnBlocked {
                self.game_over = true;
            }
            self.events.push_back(event);
        }
    }

    /// Take the oldest queued notification; each is delivered once.
    pub fn pop_event(&mut self) -> Option<SupplyEvent> {
        self.events.pop_front()
    }
}
