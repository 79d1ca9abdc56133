//! Shared game loop trait for the idle host and the simulator.

use crate::core::events::GameEvent;
use crate::core::game_state::GameState;

/// Result of one engine tick: everything that happened, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<GameEvent>,
    /// A combat turn was resolved this tick.
    pub turn_resolved: bool,
}

impl TickResult {
    pub fn has(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

/// Core game loop trait, implemented by the engine.
///
/// Lets the real-time host and the simulator drive the same logic with
/// their own clocks.
pub trait GameLoop {
    /// Advances the simulation to `now` (ms). Returns what happened.
    fn tick(&mut self, now: u64) -> TickResult;

    /// Starts over from a fresh state.
    fn reset(&mut self) -> Vec<GameEvent>;

    /// Get current game state (read-only).
    fn state(&self) -> &GameState;

    /// Get current game state (mutable).
    fn state_mut(&mut self) -> &mut GameState;
}
