//! Boundary to the external rules engine.
//!
//! The controller never decides legality, check or game end itself. It asks a
//! [`RulesEngine`] and reacts to the tagged signal it gets back. Every way a
//! move can go is a distinct variant, so callers have to handle each one.

pub mod standard;

pub use standard::StandardEngine;

use crate::game_repr::{Color, Destination, Move, Piece, Square};
use smallvec::SmallVec;
use std::collections::HashMap;
use thiserror::Error;

/// Authoritative "square -> piece" placement reported by the engine.
pub type Placement = HashMap<Square, Piece>;

/// Legal destinations from one origin square.
pub type Destinations = SmallVec<[Destination; 32]>;

/// Why the engine refused a move. The position is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("piece belongs to the side not on move")]
    InvalidColor,

    #[error("no piece on the origin square")]
    InvalidStart,

    #[error("destination is not reachable")]
    InvalidEnd,

    #[error("missing or illegal promotion piece")]
    InvalidPromotion,

    #[error("move text could not be parsed")]
    InvalidNotation,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOver {
    Win(Color),
    Stalemate,
    DrawRepetition,
    DrawInsufficientMaterial,
    DrawFiftyMove,
}

impl GameOver {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOver::Win(color) => Some(*color),
            _ => None,
        }
    }
}

/// What happened after the engine applied a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSignal {
    /// Applied, nothing to report.
    Quiet,
    /// Applied, and the side now on move is in check.
    Check,
    /// Applied, and the game is over.
    GameOver(GameOver),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Over(GameOver),
}

impl GameStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStatus::Playing)
    }
}

/// Which way to step through the engine's position history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

/// Errors raised while setting up an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid FEN `{0}`")]
    InvalidFen(String),
}

/// Operations the controller consumes from a rules engine.
///
/// All calls are synchronous. A slow `best_move` blocks the tick it is called
/// from; no timeout is applied.
pub trait RulesEngine {
    /// Edge length of the board the engine plays on.
    fn board_size(&self) -> u8;

    /// Validate and apply `mv`.
    fn make_move(&mut self, mv: Move) -> Result<EngineSignal, Rejection>;

    /// Same as [`make_move`](Self::make_move) but takes serialized move text.
    fn apply_notation(&mut self, text: &str) -> Result<EngineSignal, Rejection> {
        match Move::from_notation(text) {
            Ok(mv) => self.make_move(mv),
            Err(err) => {
                log::debug!("Unparseable move `{}`: {}", text, err);
                Err(Rejection::InvalidNotation)
            }
        }
    }

    /// Squares the piece on `square` may legally move to.
    fn legal_destinations_from(&self, square: Square) -> Destinations;

    /// Move the automated player would make for the side on move, if any.
    fn best_move(&mut self) -> Option<Move>;

    fn current_placement(&self) -> Placement;

    fn side_to_move(&self) -> Color;

    fn status(&self) -> GameStatus;

    /// Start a fresh game from the engine's initial position.
    fn reset(&mut self);

    /// Step through previously played positions. Returns `false` when there
    /// is nothing further in that direction.
    fn navigate(&mut self, _direction: Direction) -> bool {
        false
    }
}
