//! Move input and turn orchestration for a chess client.
//!
//! The controller sits between pointer input, a rules engine and the
//! renderer: it turns press/drag/release gestures into moves, runs the
//! automated side and recorded replays, and keeps a client-side mirror of
//! the board in sync with the engine. Drawing is left to the host, which
//! reads [`board::PieceMirror`] and the gesture phase.

pub mod agent;
pub mod board;
pub mod config;
pub mod engine;
pub mod executor;
pub mod game_repr;
pub mod input;
pub mod layout;
pub mod orchestrator;

pub use config::{ControllerConfig, GameMode};
pub use engine::{RulesEngine, StandardEngine};
pub use executor::Outcome;
pub use orchestrator::Orchestrator;
