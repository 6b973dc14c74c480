use super::{Square, Type};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A proposed move: origin, destination and the piece kind a pawn turns
/// into, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Type>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to, promotion: None }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: Type) -> Self {
        Self { from, to, promotion: Some(promotion) }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Coordinate notation, `e2e4` or `e7e8q`.
    pub fn to_notation(&self) -> String {
        self.to_string()
    }

    pub fn from_notation(text: &str) -> Result<Self, NotationError> {
        let text = text.trim();
        let (from, used) = Square::parse_prefix(text)
            .ok_or_else(|| NotationError::BadSquare(text.to_string()))?;
        let rest = &text[used..];
        let (to, used) = Square::parse_prefix(rest)
            .ok_or_else(|| NotationError::BadSquare(text.to_string()))?;
        let rest = &rest[used..];

        let mut chars = rest.chars();
        let promotion = match chars.next() {
            None => None,
            Some(c) => match Type::from_char(c) {
                Some(kind) => Some(kind),
                None => return Err(NotationError::BadPromotion(c)),
            },
        };
        if chars.next().is_some() {
            return Err(NotationError::TrailingInput(text.to_string()));
        }

        Ok(Self { from, to, promotion })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

/// One entry of an engine's legal-destination set for an origin square.
///
/// `promotion` marks destinations that can only be reached by promoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Destination {
    pub square: Square,
    pub promotion: bool,
}

impl Destination {
    pub fn new(square: Square) -> Self {
        Self { square, promotion: false }
    }

    pub fn promoting(square: Square) -> Self {
        Self { square, promotion: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("malformed square in move `{0}`")]
    BadSquare(String),

    #[error("unknown promotion piece `{0}`")]
    BadPromotion(char),

    #[error("unexpected trailing characters in move `{0}`")]
    TrailingInput(String),
}
