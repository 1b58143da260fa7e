//! Classic Snake on a fixed square grid.
//!
//! [`engine::GameEngine`] owns the whole game state and is driven by its own
//! virtual timers; the host only feeds it the current time and key commands,
//! and draws through the traits in [`frontend`]. [`term::TermManager`] is the
//! terminal implementation of those traits.

pub mod config;
pub mod engine;
pub mod frontend;
pub mod input;
pub mod logging;
pub mod scheduler;
pub mod snake;
pub mod term;

pub use engine::{Collision, GameEngine, Phase, TickOutcome};
pub use snake::{Cell, Direction, Velocity};
