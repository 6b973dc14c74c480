//! Move submission and outcome interpretation.
//!
//! [`MoveExecutor`] is the only place that calls the engine's move
//! application. It translates the engine's signal into an [`Outcome`] and
//! applies the matching bookkeeping: mirror rebuild, move counter, turn
//! alternation. Each `submit` performs each of those at most once.

use crate::board::PieceMirror;
use crate::engine::{Direction, EngineSignal, GameOver, GameStatus, Rejection, RulesEngine};
use crate::game_repr::{Color, Move, Square};
use crate::layout::GeometryMap;

/// What a submitted move turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Applied, play continues.
    Accepted,
    /// Refused by the engine, nothing changed.
    Rejected(Rejection),
    /// Applied, and the side now on move is in check. Counts like `Accepted`.
    Check,
    /// Applied, and this move ended the game.
    GameOver(GameOver),
    /// Not submitted because the game had already ended.
    GameAlreadyOver(GameOver),
}

impl Outcome {
    /// Whether the engine applied the move.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Accepted | Outcome::Check | Outcome::GameOver(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The game-over kind, whether this move ended the game or it had
    /// already ended.
    pub fn game_over(&self) -> Option<GameOver> {
        match self {
            Outcome::GameOver(over) | Outcome::GameAlreadyOver(over) => Some(*over),
            _ => None,
        }
    }
}

/// Whether an applied move toggles the turn-alternation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    Toggle,
    /// The caller tracks alternation itself (automated replies).
    Suppress,
}

/// Turn bookkeeping mirrored from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    side_to_move: Color,
    move_count: u32,
    /// Alternation flag: set after the first side's move, cleared after
    /// the reply.
    awaiting_reply: bool,
}

impl TurnState {
    pub fn new(side_to_move: Color) -> Self {
        Self { side_to_move, move_count: 0, awaiting_reply: false }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub(crate) fn toggle_alternation(&mut self) {
        self.awaiting_reply = !self.awaiting_reply;
    }

    pub(crate) fn sync_side(&mut self, side: Color) {
        self.side_to_move = side;
    }

    fn record_move(&mut self) {
        self.move_count += 1;
    }
}

pub struct MoveExecutor<E: RulesEngine> {
    engine: E,
    mirror: PieceMirror,
    turn: TurnState,
    geometry: GeometryMap,
}

impl<E: RulesEngine> MoveExecutor<E> {
    /// Wrap `engine` and build the initial mirror from its placement.
    pub fn new(engine: E, geometry: GeometryMap) -> Self {
        let mut mirror = PieceMirror::new();
        mirror.rebuild(&engine.current_placement(), &geometry);
        let turn = TurnState::new(engine.side_to_move());
        Self { engine, mirror, turn, geometry }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn mirror(&self) -> &PieceMirror {
        &self.mirror
    }

    pub(crate) fn mirror_mut(&mut self) -> &mut PieceMirror {
        &mut self.mirror
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub(crate) fn turn_mut(&mut self) -> &mut TurnState {
        &mut self.turn
    }

    pub fn geometry(&self) -> &GeometryMap {
        &self.geometry
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    /// Submit a move through the engine's move application.
    pub fn submit(&mut self, mv: Move, flip: Flip) -> Outcome {
        if let GameStatus::Over(over) = self.engine.status() {
            log::warn!("Ignoring {}: game already over ({:?})", mv, over);
            return Outcome::GameAlreadyOver(over);
        }
        log::debug!("Submitting {}", mv);
        let result = self.engine.make_move(mv);
        self.settle(&mv.to_string(), result, flip)
    }

    /// Submit serialized move text through the engine's notation path.
    pub fn submit_notation(&mut self, text: &str, flip: Flip) -> Outcome {
        if let GameStatus::Over(over) = self.engine.status() {
            log::warn!("Ignoring {}: game already over ({:?})", text, over);
            return Outcome::GameAlreadyOver(over);
        }
        log::debug!("Submitting notation {}", text);
        let result = self.engine.apply_notation(text);
        self.settle(text, result, flip)
    }

    /// Return the piece on `square` to the center of its square.
    pub(crate) fn snap_back(&mut self, square: Square) {
        self.mirror.snap_back(square, &self.geometry);
    }

    /// Rebuild the mirror and re-read the side to move without counting a
    /// move. Used after navigation and reset.
    pub(crate) fn resync(&mut self) {
        self.mirror.rebuild(&self.engine.current_placement(), &self.geometry);
        self.turn.sync_side(self.engine.side_to_move());
    }

    /// Move one ply through the engine's history. The alternation flag
    /// steps with the position so it keeps matching the side on move.
    /// The move counter is left alone.
    pub(crate) fn step_history(&mut self, direction: Direction) -> bool {
        if !self.engine.navigate(direction) {
            return false;
        }
        self.resync();
        self.turn.toggle_alternation();
        true
    }

    pub(crate) fn reset(&mut self) {
        self.engine.reset();
        self.turn = TurnState::new(self.engine.side_to_move());
        self.resync();
    }

    fn settle(&mut self, label: &str, result: Result<EngineSignal, Rejection>, flip: Flip) -> Outcome {
        let signal = match result {
            Ok(signal) => signal,
            Err(rejection) => {
                log::warn!("Move {} rejected: {}", label, rejection);
                return Outcome::Rejected(rejection);
            }
        };

        self.mirror.rebuild(&self.engine.current_placement(), &self.geometry);
        self.turn.record_move();
        self.turn.sync_side(self.engine.side_to_move());

        let outcome = match signal {
            EngineSignal::Quiet => Outcome::Accepted,
            EngineSignal::Check => Outcome::Check,
            EngineSignal::GameOver(over) => Outcome::GameOver(over),
        };

        // A finished game has no reply to wait for
        if flip == Flip::Toggle && !matches!(outcome, Outcome::GameOver(_)) {
            self.turn.toggle_alternation();
        }

        match outcome {
            Outcome::Check => log::info!("Move {} accepted, check", label),
            Outcome::GameOver(over) => log::info!("Move {} ends the game: {:?}", label, over),
            _ => log::info!("Move {} accepted", label),
        }
        outcome
    }
}
