//! Automated move source.
//!
//! Once per tick the [`TurnScheduler`] checks whether the side on move is
//! played by the engine and, if so, asks for its best move and submits it.
//! In engine-vs-engine games the sides therefore alternate one move per tick.

use crate::config::{ControllerConfig, GameMode};
use crate::engine::RulesEngine;
use crate::executor::{Flip, MoveExecutor, Outcome};
use crate::game_repr::Move;
use std::time::Duration;

/// Minimum spacing between automated moves.
///
/// When disabled the gate is always open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceGate {
    interval: Duration,
    enabled: bool,
    elapsed: Duration,
}

impl CadenceGate {
    pub fn new(interval: Duration, enabled: bool) -> Self {
        // Start open so the first automated move does not wait
        Self { interval, enabled, elapsed: interval }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    pub fn is_open(&self) -> bool {
        !self.enabled || self.elapsed >= self.interval
    }

    fn fire(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn reset(&mut self) {
        self.elapsed = self.interval;
    }
}

/// An automated move and what became of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatedMove {
    pub mv: Move,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct TurnScheduler {
    mode: GameMode,
    gate: CadenceGate,
}

impl TurnScheduler {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            mode: config.mode,
            gate: CadenceGate::new(config.automated_move_interval, config.pace_automated_moves),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn gate(&self) -> &CadenceGate {
        &self.gate
    }

    pub(crate) fn reset(&mut self) {
        self.gate.reset();
    }

    /// Run one scheduling pass. `blocked` is set while a gesture is pending
    /// or a replay is running. Returns the move made, if any.
    pub fn tick<E: RulesEngine>(
        &mut self,
        dt: Duration,
        executor: &mut MoveExecutor<E>,
        blocked: bool,
    ) -> Option<AutomatedMove> {
        self.gate.advance(dt);

        if blocked || !executor.status().is_playing() {
            return None;
        }
        let side = executor.engine().side_to_move();
        if !self.mode.is_automated(side) || !self.gate.is_open() {
            return None;
        }

        let Some(mv) = executor.engine_mut().best_move() else {
            log::warn!("Engine has no move for {:?}", side);
            return None;
        };

        log::debug!("Automated {:?} plays {}", side, mv);
        let outcome = executor.submit(mv, Flip::Suppress);
        if outcome.is_applied() && outcome.game_over().is_none() {
            executor.turn_mut().toggle_alternation();
        }
        self.gate.fire();

        Some(AutomatedMove { mv, outcome })
    }
}
