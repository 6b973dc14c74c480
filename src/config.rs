//! Controller configuration.
//!
//! A [`ControllerConfig`] is handed to the orchestrator at construction and
//! never changes afterwards. The game mode decides, per color, whether moves
//! come from pointer gestures or from the engine's move generator.

use crate::game_repr::{Color, Type};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use winit::dpi::PhysicalPosition;

/// Who supplies the moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// Moves come from pointer gestures
    Human,
    /// Moves come from the engine's best-move call
    Automated,
}

/// The four supported ways of assigning sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans on the same device
    BothHuman,
    /// Human plays White, the engine plays Black
    HumanVsAutomated,
    /// The engine plays White, human plays Black
    AutomatedVsHuman,
    /// The engine plays both sides
    BothAutomated,
}

impl GameMode {
    pub fn player(&self, color: Color) -> PlayerKind {
        let (white, black) = match self {
            GameMode::BothHuman => (PlayerKind::Human, PlayerKind::Human),
            GameMode::HumanVsAutomated => (PlayerKind::Human, PlayerKind::Automated),
            GameMode::AutomatedVsHuman => (PlayerKind::Automated, PlayerKind::Human),
            GameMode::BothAutomated => (PlayerKind::Automated, PlayerKind::Automated),
        };
        match color {
            Color::White => white,
            Color::Black => black,
        }
    }

    pub fn is_automated(&self, color: Color) -> bool {
        self.player(color) == PlayerKind::Automated
    }

    /// The human's color when exactly one side is human.
    pub fn human_color(&self) -> Option<Color> {
        match self {
            GameMode::HumanVsAutomated => Some(Color::White),
            GameMode::AutomatedVsHuman => Some(Color::Black),
            _ => None,
        }
    }

    /// Short name used on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            GameMode::BothHuman => "pvp",
            GameMode::HumanVsAutomated => "pvb",
            GameMode::AutomatedVsHuman => "bvp",
            GameMode::BothAutomated => "bvb",
        }
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pvp" => Ok(GameMode::BothHuman),
            "pvb" => Ok(GameMode::HumanVsAutomated),
            "bvp" => Ok(GameMode::AutomatedVsHuman),
            "bvb" => Ok(GameMode::BothAutomated),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size {0} is outside 1..=26")]
    BoardSize(u8),

    #[error("square size {0} must be a positive number of pixels")]
    SquareSize(f64),

    #[error("tick rate must be at least 1")]
    TickRate,

    #[error("promotion choices must be four distinct promotable pieces, got {0:?}")]
    PromotionChoices([Type; 4]),

    #[error("engine plays on a {engine}x{engine} board but {configured}x{configured} was configured")]
    BoardSizeMismatch { configured: u8, engine: u8 },

    #[error("unknown game mode `{0}` (expected pvp, pvb, bvp or bvb)")]
    UnknownMode(String),
}

/// Everything the controller needs to know up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub mode: GameMode,

    /// Squares per side of the board
    pub board_size: u8,

    /// Edge length of one square in pixels
    pub square_size: f64,

    /// Screen position of the board's top-left corner
    pub board_origin: PhysicalPosition<f64>,

    /// Color shown at the bottom of the board
    pub orientation: Color,

    /// Pieces offered by the promotion chooser, in display order
    pub promotion_choices: [Type; 4],

    /// Ticks per second of the host loop
    pub tick_rate: u32,

    /// Minimum time between automated moves when pacing is on
    pub automated_move_interval: Duration,

    /// When false, automated moves fire on every eligible tick
    pub pace_automated_moves: bool,

    /// Attach legal-destination hints to a picked-up piece
    pub show_destination_hints: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::BothHuman,
            board_size: 8,
            square_size: 80.0,
            board_origin: PhysicalPosition::new(0.0, 0.0),
            orientation: Color::White,
            promotion_choices: [Type::Queen, Type::Rook, Type::Bishop, Type::Knight],
            tick_rate: 60,
            automated_move_interval: Duration::from_secs(1),
            pace_automated_moves: false,
            show_destination_hints: true,
        }
    }
}

impl ControllerConfig {
    /// Default configuration with the given mode.
    pub fn with_mode(mode: GameMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Two humans on one board.
    pub fn pvp() -> Self {
        Self::with_mode(GameMode::BothHuman)
    }

    /// Human plays White against the engine.
    pub fn pvb() -> Self {
        Self::with_mode(GameMode::HumanVsAutomated)
    }

    /// Engine plays White, human plays Black.
    pub fn bvp() -> Self {
        Self {
            orientation: Color::Black,
            ..Self::with_mode(GameMode::AutomatedVsHuman)
        }
    }

    /// Engine against itself.
    pub fn bvb() -> Self {
        Self::with_mode(GameMode::BothAutomated)
    }

    /// Duration of one tick at the configured rate.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=26).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if !self.square_size.is_finite() || self.square_size <= 0.0 {
            return Err(ConfigError::SquareSize(self.square_size));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::TickRate);
        }

        let choices = self.promotion_choices;
        let distinct = choices
            .iter()
            .enumerate()
            .all(|(i, kind)| !choices[..i].contains(kind));
        if !distinct || !choices.iter().all(|kind| kind.is_promotion_target()) {
            return Err(ConfigError::PromotionChoices(choices));
        }
        Ok(())
    }
}
