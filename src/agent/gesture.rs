//! Pointer gesture state machine.
//!
//! A move is proposed by pressing on a piece, dragging it and releasing it on
//! the destination. Pawns released on the far rank open a promotion chooser
//! first. The phases are:
//!
//! ```text
//!            press on own piece                release on target
//!   Idle ───────────────────────▶ PieceHeld ─────────────────────▶ Resolving ──▶ Idle
//!    ▲                              │   │                              ▲
//!    │ secondary press / same sq /  │   │ pawn to far rank             │ release on
//!    │ off-board release            │   ▼                              │ a chooser piece
//!    └──────────────────────────────┘ PromotionPending ────────────────┘
//! ```
//!
//! Only one gesture exists at a time: the phase is a single enum, so a held
//! piece and a promotion request can never coexist.

use super::promotion::PromotionChooser;
use crate::config::GameMode;
use crate::engine::RulesEngine;
use crate::executor::{Flip, MoveExecutor, Outcome};
use crate::game_repr::{Color, Move, Piece, Square, Type};
use smallvec::SmallVec;
use winit::dpi::PhysicalPosition;
use winit::event::MouseButton;

/// A legal destination shown while a piece is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationHint {
    pub square: Square,
    /// An enemy piece stands on the square
    pub capture: bool,
}

pub type Hints = SmallVec<[DestinationHint; 32]>;

/// The piece currently held under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGesture {
    pub origin: Square,
    pub piece: Piece,
    pub pointer: PhysicalPosition<f64>,
    pub hints: Hints,
}

/// A pawn move waiting for its promotion piece.
///
/// The request only lives until a piece is chosen. The choice itself is
/// reported as the `promotion` of the submitted [`Move`].
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRequest {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    pub chooser: PromotionChooser,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    PieceHeld(PendingGesture),
    PromotionPending(PromotionRequest),
    /// A move is being submitted. Only observable inside a release.
    Resolving,
}

/// What a pointer event did to the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    PickedUp(Square),
    /// Secondary button dropped the gesture.
    Cancelled,
    /// Released on the origin or off the board.
    SnappedBack,
    PromotionOffered { from: Square, to: Square },
    Submitted { mv: Move, outcome: Outcome },
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    mode: GameMode,
    choices: [Type; 4],
    show_hints: bool,
    phase: GesturePhase,
}

impl GestureTracker {
    pub fn new(mode: GameMode, choices: [Type; 4], show_hints: bool) -> Self {
        Self { mode, choices, show_hints, phase: GesturePhase::Idle }
    }

    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle)
    }

    pub fn pending(&self) -> Option<&PendingGesture> {
        match &self.phase {
            GesturePhase::PieceHeld(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn promotion(&self) -> Option<&PromotionRequest> {
        match &self.phase {
            GesturePhase::PromotionPending(request) => Some(request),
            _ => None,
        }
    }

    /// Drop any gesture without touching the board.
    pub(crate) fn clear(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    /// Drop any gesture and put the held piece back on its square.
    pub(crate) fn abandon<E: RulesEngine>(&mut self, executor: &mut MoveExecutor<E>) {
        self.cancel(executor);
    }

    /// Handle a button press. `enabled` is false while replay runs or once
    /// the game is over; cancelling still works then.
    pub fn press<E: RulesEngine>(
        &mut self,
        button: MouseButton,
        pos: PhysicalPosition<f64>,
        executor: &mut MoveExecutor<E>,
        enabled: bool,
    ) -> Option<GestureOutcome> {
        let holding = matches!(self.phase, GesturePhase::PieceHeld(_) | GesturePhase::PromotionPending(_));
        match button {
            MouseButton::Right if holding => {
                self.cancel(executor);
                Some(GestureOutcome::Cancelled)
            }
            MouseButton::Left if enabled && self.is_idle() => self.pick_up(pos, executor),
            _ => None,
        }
    }

    /// Handle a button release.
    pub fn release<E: RulesEngine>(
        &mut self,
        button: MouseButton,
        pos: PhysicalPosition<f64>,
        executor: &mut MoveExecutor<E>,
    ) -> Option<GestureOutcome> {
        if button != MouseButton::Left {
            return None;
        }

        match std::mem::replace(&mut self.phase, GesturePhase::Resolving) {
            GesturePhase::PieceHeld(pending) => Some(self.drop_piece(pending, pos, executor)),
            GesturePhase::PromotionPending(request) => match request.chooser.hit(pos) {
                Some(kind) => {
                    let mv = Move::with_promotion(request.from, request.to, kind);
                    Some(self.resolve(mv, executor))
                }
                None => {
                    // Keep waiting for a choice
                    self.phase = GesturePhase::PromotionPending(request);
                    None
                }
            },
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Track pointer motion: drag the held piece or hover the chooser.
    pub fn motion<E: RulesEngine>(&mut self, pos: PhysicalPosition<f64>, executor: &mut MoveExecutor<E>) {
        match &mut self.phase {
            GesturePhase::PieceHeld(pending) => {
                pending.pointer = pos;
                executor.mirror_mut().drag(pending.origin, pos);
            }
            GesturePhase::PromotionPending(request) => {
                request.chooser.hover(pos);
            }
            _ => {}
        }
    }

    fn pick_up<E: RulesEngine>(
        &mut self,
        pos: PhysicalPosition<f64>,
        executor: &mut MoveExecutor<E>,
    ) -> Option<GestureOutcome> {
        let origin = executor.geometry().square_at(pos)?;
        let piece = executor.mirror().piece_at(origin)?;
        let side = executor.turn().side_to_move();

        if piece.color != side || self.mode.is_automated(side) {
            log::debug!("Press on {} ignored: {} is not allowed to move", origin, piece.to_char());
            return None;
        }

        let hints: Hints = if self.show_hints {
            executor
                .engine()
                .legal_destinations_from(origin)
                .iter()
                .map(|d| DestinationHint { square: d.square, capture: executor.mirror().is_occupied(d.square) })
                .collect()
        } else {
            Hints::new()
        };

        executor.mirror_mut().drag(origin, pos);
        log::debug!("Picked up {} from {}", piece.to_char(), origin);
        self.phase = GesturePhase::PieceHeld(PendingGesture { origin, piece, pointer: pos, hints });
        Some(GestureOutcome::PickedUp(origin))
    }

    fn drop_piece<E: RulesEngine>(
        &mut self,
        pending: PendingGesture,
        pos: PhysicalPosition<f64>,
        executor: &mut MoveExecutor<E>,
    ) -> GestureOutcome {
        let origin = pending.origin;
        let target = match executor.geometry().square_at(pos) {
            Some(target) if target != origin => target,
            _ => {
                executor.snap_back(origin);
                self.phase = GesturePhase::Idle;
                log::debug!("Released {} without a move", origin);
                return GestureOutcome::SnappedBack;
            }
        };

        if self.is_promotion(&pending, target, executor) {
            let geometry = *executor.geometry();
            executor.mirror_mut().drag(origin, geometry.center_of(target));
            let color = pending.piece.color;
            let chooser = PromotionChooser::new(target, color, self.choices, &geometry);
            log::debug!("Promotion offered for {}{}", origin, target);
            self.phase = GesturePhase::PromotionPending(PromotionRequest { from: origin, to: target, color, chooser });
            return GestureOutcome::PromotionOffered { from: origin, to: target };
        }

        self.resolve(Move::new(origin, target), executor)
    }

    /// A pawn reaching its far rank through a square the engine lists as
    /// legal for it.
    fn is_promotion<E: RulesEngine>(
        &self,
        pending: &PendingGesture,
        target: Square,
        executor: &MoveExecutor<E>,
    ) -> bool {
        pending.piece.is_pawn()
            && target.rank == pending.piece.color.far_rank(executor.geometry().board_size())
            && executor
                .engine()
                .legal_destinations_from(pending.origin)
                .iter()
                .any(|d| d.square == target)
    }

    fn resolve<E: RulesEngine>(&mut self, mv: Move, executor: &mut MoveExecutor<E>) -> GestureOutcome {
        self.phase = GesturePhase::Resolving;
        let outcome = executor.submit(mv, Flip::Toggle);
        if outcome.is_rejected() {
            executor.snap_back(mv.from);
        }
        self.phase = GesturePhase::Idle;
        GestureOutcome::Submitted { mv, outcome }
    }

    fn cancel<E: RulesEngine>(&mut self, executor: &mut MoveExecutor<E>) {
        let origin = match &self.phase {
            GesturePhase::PieceHeld(pending) => Some(pending.origin),
            GesturePhase::PromotionPending(request) => Some(request.from),
            _ => None,
        };
        if let Some(origin) = origin {
            executor.snap_back(origin);
            log::debug!("Gesture on {} cancelled", origin);
        }
        self.phase = GesturePhase::Idle;
    }
}
