//! Supply - the piece-supply state machine.
//!
//! Generates pieces from a shuffled 7-bag, owns the drop (gravity) timer
//! and the input-lockout timer, translates per-tick action state into
//! piece movement and rotation, and reacts to a piece locking by going
//! inactive until the next tick's generation.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::core::piece::{MoveOutcome, Piece};
use crate::core::rng::SevenBag;
use crate::core::timer::IntervalTimer;
use crate::types::{BoardConfig, Direction, GameAction};

/// Per-action boolean input signal the core consumes.
///
/// Implemented by the terminal input layer; tests provide table-backed
/// stand-ins.
pub trait ActionInput {
    /// The action's key is currently held.
    fn is_pressed(&self, action: GameAction) -> bool;
    /// The action's key went down this tick.
    fn is_just_pressed(&self, action: GameAction) -> bool;
}

/// Supply lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyState {
    /// No piece is falling; one is generated on the next tick.
    Inactive,
    /// A piece is falling and the drop timer is running.
    Active,
}

/// Notifications queued for the owning session, consumed once each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyEvent {
    /// The active piece froze into the grid. Emitted exactly once per lock.
    PieceLocked,
    /// A freshly generated piece overlapped existing occupancy.
    SpawnBlocked,
}

/// The driving state machine: bag, active piece, and both timers.
#[derive(Debug, Clone)]
pub struct Supply {
    config: BoardConfig,
    bag: SevenBag,
    active: Option<Piece>,
    state: SupplyState,
    drop_timer: IntervalTimer,
    input_timer: IntervalTimer,
    events: VecDeque<SupplyEvent>,
}

impl Supply {
    pub fn new(config: &BoardConfig, seed: u32) -> Self {
        let config = config.clamped();
        Self {
            config,
            bag: SevenBag::new(seed),
            active: None,
            state: SupplyState::Inactive,
            drop_timer: IntervalTimer::repeating(config.drop_interval_ms),
            input_timer: IntervalTimer::one_shot(config.input_lockout_ms),
            events: VecDeque::new(),
        }
    }

    pub fn state(&self) -> SupplyState {
        self.state
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn bag(&self) -> &SevenBag {
        &self.bag
    }

    /// Take the oldest queued notification, if any.
    pub fn pop_event(&mut self) -> Option<SupplyEvent> {
        self.events.pop_front()
    }

    /// Advance one fixed tick.
    ///
    /// Ordering within a tick: generation runs before input handling, so a
    /// freshly spawned piece still receives this tick's input; gravity runs
    /// last and is skipped implicitly when an input move already locked the
    /// piece (the drop timer stops on lock).
    pub fn tick(&mut self, elapsed_ms: u32, input: &impl ActionInput, grid: &mut Grid) {
        // Expire the lockout window first so input freed up this tick counts.
        self.input_timer.advance(elapsed_ms);

        if self.state == SupplyState::Inactive {
            self.generate(grid);
        }

        self.handle_input(input, grid);
        self.apply_gravity(elapsed_ms, grid);
    }

    /// INACTIVE -> ACTIVE: draw the next kind from the bag, spawn it, and
    /// start the drop timer. A spawn that overlaps existing occupancy is
    /// reported and leaves the supply inactive.
    fn generate(&mut self, grid: &mut Grid) {
        let kind = self.bag.draw();
        let piece = Piece::spawn(kind, &self.config);

        if !piece.is_valid(grid) {
            self.events.push_back(SupplyEvent::SpawnBlocked);
            return;
        }

        self.active = Some(piece);
        self.drop_timer.start();
        self.state = SupplyState::Active;
    }

    /// Apply held/just-pressed actions, gated by the lockout timer. Any
    /// accepted action restarts the lockout so at most one input window
    /// fires per `input_lockout_ms` regardless of how long keys are held.
    fn handle_input(&mut self, input: &impl ActionInput, grid: &mut Grid) {
        if !self.input_timer.is_stopped() || self.active.is_none() {
            return;
        }

        // Hard drop fires on the key edge only; everything else repeats
        // while held, throttled by the lockout window.
        let mut requests = ArrayVec::<GameAction, 6>::new();
        if input.is_just_pressed(GameAction::HardDrop) {
            requests.push(GameAction::HardDrop);
        }
        for action in [
            GameAction::SoftDrop,
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::RotateCcw,
            GameAction::RotateCw,
        ] {
            if input.is_pressed(action) {
                requests.push(action);
            }
        }

        let mut acted = false;
        for action in requests {
            if self.active.is_none() {
                break;
            }
            acted = true;
            match action {
                GameAction::HardDrop => self.hard_drop(grid),
                GameAction::SoftDrop => self.drop_step(grid),
                GameAction::MoveLeft => {
                    self.move_active(Direction::Left, grid);
                }
                GameAction::MoveRight => {
                    self.move_active(Direction::Right, grid);
                }
                GameAction::RotateCcw | GameAction::RotateCw => {
                    if let Some(piece) = self.active.as_mut() {
                        piece.try_rotate(action == GameAction::RotateCw, true, grid);
                    }
                }
            }
        }

        if acted {
            self.input_timer.start();
        }
    }

    /// Gravity: one downward step each time the drop timer expires.
    fn apply_gravity(&mut self, elapsed_ms: u32, grid: &mut Grid) {
        if self.drop_timer.advance(elapsed_ms) {
            self.move_active(Direction::Down, grid);
        }
    }

    /// One manual downward step; restarts the drop timer so gravity's
    /// cadence resets after a soft drop.
    fn drop_step(&mut self, grid: &mut Grid) {
        self.move_active(Direction::Down, grid);
        if self.state == SupplyState::Active {
            self.drop_timer.start();
        }
    }

    /// Instant fall: repeat downward steps until the piece locks.
    fn hard_drop(&mut self, grid: &mut Grid) {
        while self.move_active(Direction::Down, grid) == MoveOutcome::Moved {}
    }

    fn move_active(&mut self, dir: Direction, grid: &mut Grid) -> MoveOutcome {
        let Some(piece) = self.active.as_mut() else {
            return MoveOutcome::Blocked;
        };
        let outcome = piece.try_move(dir, grid);
        if outcome == MoveOutcome::Locked {
            self.on_locked();
        }
        outcome
    }

    /// ACTIVE -> INACTIVE: the one-notification-per-lock contract.
    fn on_locked(&mut self) {
        self.active = None;
        self.state = SupplyState::Inactive;
        self.drop_timer.stop();
        self.events.push_back(SupplyEvent::PieceLocked);
    }
}
