//! Move sources: pointer gestures, the automated player and game replay.

pub mod automated;
pub use automated::*;

pub mod gesture;
pub use gesture::*;

pub mod promotion;
pub use promotion::*;

pub mod replay;
pub use replay::*;
