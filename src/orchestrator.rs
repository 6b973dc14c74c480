//! Controller lifecycle and move-source coordination.
//!
//! This module contains the [`Orchestrator`] component, the root coordinator
//! of the controller. It manages:
//! - The move executor and the piece mirror it keeps in sync with the engine
//! - Pointer gestures from the human side(s)
//! - Automated moves for engine-played sides
//! - Replay of a recorded move list
//! - Post-game navigation and reset
//!
//! # Architecture
//!
//! The Orchestrator owns a single [`MoveExecutor`]. Every move source borrows
//! it mutably for the duration of one call, so only one move can ever be in
//! flight:
//! - [`GestureTracker`] turns pointer events into moves
//! - [`TurnScheduler`] asks the engine for moves on automated turns
//! - [`ReplayDriver`] feeds recorded notation instead of live input
//!
//! # Tick Flow
//!
//! ```text
//! host loop: pointer events -> handle_pointer() -> GestureTracker -> MoveExecutor
//!            then once      -> tick()           -> ReplayDriver | TurnScheduler -> MoveExecutor
//! ```
//!
//! While a replay runs, gestures and automated moves are held back. Once the
//! replay finishes (or halts) the board behaves like a normal game.

use crate::agent::{
    AutomatedMove, GestureOutcome, GesturePhase, GestureTracker, PendingGesture, PromotionRequest, ReplayDriver,
    ReplayStep, TurnScheduler,
};
use crate::board::PieceMirror;
use crate::config::{ConfigError, ControllerConfig};
use crate::engine::{Direction, GameStatus, RulesEngine};
use crate::executor::{MoveExecutor, Outcome, TurnState};
use crate::input::PointerEvent;
use crate::layout::GeometryMap;
use std::time::Duration;
use winit::dpi::PhysicalPosition;
use winit::event::WindowEvent;

/// Moves made during one [`Orchestrator::tick`].
///
/// At most one of the two fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub replayed: Option<ReplayStep>,
    pub automated: Option<AutomatedMove>,
}

impl TickReport {
    /// Outcome of the move made this tick, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        self.replayed
            .as_ref()
            .map(|step| step.outcome)
            .or_else(|| self.automated.map(|played| played.outcome))
    }

    pub fn is_idle(&self) -> bool {
        self.replayed.is_none() && self.automated.is_none()
    }
}

/// Root component of the controller.
///
/// The Orchestrator is responsible for:
/// - Routing pointer input to the gesture state machine
/// - Running one scheduling pass per tick (replay or automated move)
/// - Refusing new moves once the engine reports the game over
/// - Navigation through the engine's history and resetting the game
///
/// # Game Flow
///
/// 1. Host forwards window events to [`handle_window_event`](Orchestrator::handle_window_event)
/// 2. Host calls [`tick`](Orchestrator::tick) once per frame
/// 3. Renderer reads [`mirror`](Orchestrator::mirror), [`phase`](Orchestrator::phase)
///    and [`status`](Orchestrator::status) to draw the board
pub struct Orchestrator<E: RulesEngine> {
    /// Fixed configuration the controller was built with
    config: ControllerConfig,

    /// Engine, mirror and turn bookkeeping
    executor: MoveExecutor<E>,

    /// Human move input
    gesture: GestureTracker,

    /// Automated move input
    scheduler: TurnScheduler,

    /// Recorded move input; an empty driver is already done
    replay: ReplayDriver,

    /// Last known pointer position, attached to button events
    cursor: PhysicalPosition<f64>,
}

impl<E: RulesEngine> Orchestrator<E> {
    /// Create a controller around `engine`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation or the engine
    /// plays on a different board size than configured.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = ControllerConfig::with_mode(GameMode::HumanVsAutomated);
    /// let mut orchestrator = Orchestrator::new(StandardEngine::new(), config)?;
    /// ```
    pub fn new(engine: E, config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if engine.board_size() != config.board_size {
            return Err(ConfigError::BoardSizeMismatch { configured: config.board_size, engine: engine.board_size() });
        }

        let geometry = GeometryMap::new(config.board_origin, config.square_size, config.board_size, config.orientation);
        let executor = MoveExecutor::new(engine, geometry);
        let gesture = GestureTracker::new(config.mode, config.promotion_choices, config.show_destination_hints);
        let scheduler = TurnScheduler::new(&config);

        log::debug!("Controller created in {} mode", config.mode.short_name());

        Ok(Self {
            config,
            executor,
            gesture,
            scheduler,
            replay: ReplayDriver::default(),
            cursor: PhysicalPosition::new(0.0, 0.0),
        })
    }

    /// Play `moves` (engine notation) one per tick before live play starts.
    ///
    /// A gesture in progress is abandoned and its piece returns to its
    /// square.
    pub fn with_replay<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gesture.abandon(&mut self.executor);
        self.replay = ReplayDriver::new(moves);
        log::info!("Replaying {} recorded moves", self.replay.moves().len());
        self
    }

    /// Handle a window event. Cursor movement is tracked so that button
    /// events can be located on the board.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<GestureOutcome> {
        let pointer = PointerEvent::from_window_event(event, self.cursor)?;
        self.handle_pointer(pointer)
    }

    /// Feed one pointer event to the gesture state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<GestureOutcome> {
        match event {
            PointerEvent::Pressed { button, position } => {
                self.cursor = position;
                let enabled = self.accepts_gestures();
                self.gesture.press(button, position, &mut self.executor, enabled)
            }
            PointerEvent::Released { button, position } => {
                self.cursor = position;
                self.gesture.release(button, position, &mut self.executor)
            }
            PointerEvent::Moved { position } => {
                self.cursor = position;
                self.gesture.motion(position, &mut self.executor);
                None
            }
        }
    }

    /// Run one scheduling pass.
    ///
    /// While a replay runs it plays its next move. Otherwise the automated
    /// player moves if it is its turn and no gesture is in progress.
    pub fn tick(&mut self, dt: Duration) -> TickReport {
        if self.replay.is_active() {
            // Keep the cadence clock running
            self.scheduler.tick(dt, &mut self.executor, true);
            return TickReport { replayed: self.replay.tick(&mut self.executor), automated: None };
        }

        let blocked = !self.gesture.is_idle();
        TickReport { replayed: None, automated: self.scheduler.tick(dt, &mut self.executor, blocked) }
    }

    /// Step through the engine's position history.
    ///
    /// Only available when no replay is running and no gesture is held.
    /// Returns `false` if nothing changed.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        if self.replay.is_active() || !self.gesture.is_idle() {
            log::debug!("Navigation ignored while replay or gesture is in progress");
            return false;
        }
        if !self.executor.step_history(direction) {
            return false;
        }
        log::debug!("Navigated {:?}", direction);
        true
    }

    /// Start a new game: engine, gesture, replay, counters and mirror.
    pub fn reset(&mut self) {
        self.executor.reset();
        self.gesture.clear();
        self.scheduler.reset();
        self.replay = ReplayDriver::default();
        log::info!("Game reset");
    }

    /// Whether a press may start a gesture right now.
    pub fn accepts_gestures(&self) -> bool {
        self.executor.status().is_playing() && !self.replay.is_active()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn executor(&self) -> &MoveExecutor<E> {
        &self.executor
    }

    pub fn engine(&self) -> &E {
        self.executor.engine()
    }

    pub fn geometry(&self) -> &GeometryMap {
        self.executor.geometry()
    }

    pub fn mirror(&self) -> &PieceMirror {
        self.executor.mirror()
    }

    pub fn turn(&self) -> &TurnState {
        self.executor.turn()
    }

    pub fn status(&self) -> GameStatus {
        self.executor.status()
    }

    pub fn phase(&self) -> &GesturePhase {
        self.gesture.phase()
    }

    pub fn pending(&self) -> Option<&PendingGesture> {
        self.gesture.pending()
    }

    pub fn promotion(&self) -> Option<&PromotionRequest> {
        self.gesture.promotion()
    }

    pub fn replay(&self) -> &ReplayDriver {
        &self.replay
    }

    pub fn cursor(&self) -> PhysicalPosition<f64> {
        self.cursor
    }
}
