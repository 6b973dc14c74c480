//! Replay of a recorded game, one move per tick.

use crate::engine::{GameOver, Rejection, RulesEngine};
use crate::executor::{Flip, MoveExecutor, Outcome};

/// Why a replay stopped before its last move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayHalt {
    /// The engine refused the move at `index`; it was not applied.
    Rejected { index: usize, notation: String, rejection: Rejection },
    /// The game ended, either on the move at `index` or before it.
    GameOver { index: usize, over: GameOver },
}

/// One replayed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub index: usize,
    pub notation: String,
    pub outcome: Outcome,
}

/// Feeds recorded move notations to the executor in order.
///
/// A halt only stops the replay. The board stays interactive and the moves
/// applied so far stay on it.
#[derive(Debug, Clone)]
pub struct ReplayDriver {
    moves: Vec<String>,
    cursor: usize,
    done: bool,
    halt: Option<ReplayHalt>,
}

/// An empty replay, already done.
impl Default for ReplayDriver {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl ReplayDriver {
    pub fn new<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let moves: Vec<String> = moves.into_iter().map(Into::into).collect();
        let done = moves.is_empty();
        Self { moves, cursor: 0, done, halt: None }
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Still has moves to play.
    pub fn is_active(&self) -> bool {
        !self.done
    }

    pub fn halt(&self) -> Option<&ReplayHalt> {
        self.halt.as_ref()
    }

    /// Submit the move under the cursor. Returns `None` once done.
    pub fn tick<E: RulesEngine>(&mut self, executor: &mut MoveExecutor<E>) -> Option<ReplayStep> {
        if self.done {
            return None;
        }
        let index = self.cursor;
        let notation = self.moves.get(index)?.clone();
        let outcome = executor.submit_notation(&notation, Flip::Toggle);

        match outcome {
            Outcome::Rejected(rejection) => {
                log::warn!("Replay halted at move {} ({}): {}", index + 1, notation, rejection);
                self.stop(ReplayHalt::Rejected { index, notation: notation.clone(), rejection });
            }
            Outcome::GameAlreadyOver(over) => {
                log::warn!("Replay halted at move {} ({}): game already over", index + 1, notation);
                self.stop(ReplayHalt::GameOver { index, over });
            }
            Outcome::GameOver(over) => {
                self.cursor += 1;
                if self.cursor < self.moves.len() {
                    log::warn!("Game ended at move {}, {} recorded moves left", index + 1, self.moves.len() - self.cursor);
                    self.stop(ReplayHalt::GameOver { index, over });
                } else {
                    self.done = true;
                }
            }
            Outcome::Accepted | Outcome::Check => {
                self.cursor += 1;
                if self.cursor == self.moves.len() {
                    log::info!("Replay finished after {} moves", self.cursor);
                    self.done = true;
                }
            }
        }

        Some(ReplayStep { index, notation, outcome })
    }

    fn stop(&mut self, halt: ReplayHalt) {
        self.halt = Some(halt);
        self.done = true;
    }
}
