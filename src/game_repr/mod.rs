mod moves;
mod piece;
mod square;

pub use moves::*;
pub use piece::*;
pub use square::*;
