//! Per-tick action state for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::core::supply::ActionInput;
use crate::input::map;
use crate::types::GameAction;

const ACTION_COUNT: usize = GameAction::ALL.len();

// In terminals without key-release events, a short timeout prevents a single
// tap from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Held/just-pressed flags per action, sampled once per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionState {
    pressed: [bool; ACTION_COUNT],
    just: [bool; ACTION_COUNT],
}

impl ActionState {
    pub fn press(&mut self, action: GameAction) {
        let i = action.index();
        if !self.pressed[i] {
            self.just[i] = true;
        }
        self.pressed[i] = true;
    }

    pub fn release(&mut self, action: GameAction) {
        let i = action.index();
        self.pressed[i] = false;
        self.just[i] = false;
    }

    /// Drop the just-pressed edge; call after each tick has consumed it.
    pub fn clear_just(&mut self) {
        self.just = [false; ACTION_COUNT];
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl ActionInput for ActionState {
    fn is_pressed(&self, action: GameAction) -> bool {
        self.pressed[action.index()]
    }

    fn is_just_pressed(&self, action: GameAction) -> bool {
        self.just[action.index()]
    }
}

/// Feeds terminal key events into an [`ActionState`], auto-releasing actions
/// whose key has not repeated within the release timeout.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    state: ActionState,
    last_press: [Option<Instant>; ACTION_COUNT],
    key_release_timeout_ms: u32,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            state: ActionState::default(),
            last_press: [None; ACTION_COUNT],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Record a key press event.
    pub fn key_press(&mut self, key: KeyEvent) {
        if let Some(action) = map::map_key(key) {
            self.state.press(action);
            self.last_press[action.index()] = Some(Instant::now());
        }
    }

    /// Record a key release event, for terminals that deliver them.
    pub fn key_release(&mut self, key: KeyEvent) {
        if let Some(action) = map::map_key(key) {
            self.state.release(action);
            self.last_press[action.index()] = None;
        }
    }

    /// Auto-release stale keys, then hand out the sampled state.
    pub fn sample(&mut self) -> ActionState {
        for action in GameAction::ALL {
            let i = action.index();
            if let Some(at) = self.last_press[i] {
                if at.elapsed().as_millis() as u32 > self.key_release_timeout_ms {
                    self.state.release(action);
                    self.last_press[i] = None;
                }
            }
        }
        self.state
    }

    /// Call once the tick has run so taps fire exactly once.
    pub fn end_tick(&mut self) {
        self.state.clear_just();
    }

    pub fn reset(&mut self) {
        self.state.clear();
        self.last_press = [None; ACTION_COUNT];
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use std::time::Duration;

    #[test]
    fn test_press_sets_held_and_edge() {
        let mut s = ActionState::default();
        s.press(GameAction::MoveLeft);
        assert!(s.is_pressed(GameAction::MoveLeft));
        assert!(s.is_just_pressed(GameAction::MoveLeft));
        assert!(!s.is_pressed(GameAction::MoveRight));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut s = ActionState::default();
        s.press(GameAction::HardDrop);
        s.clear_just();
        s.press(GameAction::HardDrop);
        assert!(s.is_pressed(GameAction::HardDrop));
        assert!(!s.is_just_pressed(GameAction::HardDrop));
    }

    #[test]
    fn test_release_clears_both_flags() {
        let mut s = ActionState::default();
        s.press(GameAction::SoftDrop);
        s.release(GameAction::SoftDrop);
        assert!(!s.is_pressed(GameAction::SoftDrop));
        assert!(!s.is_just_pressed(GameAction::SoftDrop));
    }

    #[test]
    fn test_tracker_maps_key_to_action() {
        let mut tracker = KeyTracker::new();
        tracker.key_press(KeyEvent::from(KeyCode::Left));
        let state = tracker.sample();
        assert!(state.is_pressed(GameAction::MoveLeft));
        assert!(state.is_just_pressed(GameAction::MoveLeft));
    }

    #[test]
    fn test_tracker_auto_releases_after_timeout() {
        let mut tracker = KeyTracker::new().with_key_release_timeout_ms(50);
        tracker.key_press(KeyEvent::from(KeyCode::Left));

        // Simulate no key-release events by moving the press time into the past.
        let i = GameAction::MoveLeft.index();
        tracker.last_press[i] = Some(Instant::now() - Duration::from_millis(51));

        let state = tracker.sample();
        assert!(!state.is_pressed(GameAction::MoveLeft));
    }

    #[test]
    fn test_end_tick_clears_edges_but_keeps_holds() {
        let mut tracker = KeyTracker::new();
        tracker.key_press(KeyEvent::from(KeyCode::Down));
        tracker.end_tick();
        let state = tracker.sample();
        assert!(state.is_pressed(GameAction::SoftDrop));
        assert!(!state.is_just_pressed(GameAction::SoftDrop));
    }
}
