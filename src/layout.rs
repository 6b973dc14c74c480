//! Board layout and square coordinate system.
//!
//! This module is the single source of truth for where squares sit on screen.
//! The same [`GeometryMap`] is used for hit detection of pointer events and
//! for placing pieces (and the promotion chooser) when the mirror is rebuilt.
//!
//! # Coordinate System
//!
//! Screen pixels, `(0, 0)` at the top-left, Y increasing downward. With the
//! default orientation (White at the bottom) rank 1 is the lowest row and
//! file 1 the leftmost column.

use crate::game_repr::{Color, Square};
use winit::dpi::PhysicalPosition;

/// An axis-aligned screen rectangle in pixels.
///
/// Containment is half-open: the left and top edges belong to the rect, the
/// right and bottom edges belong to its neighbour, so adjacent squares never
/// both claim a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> PhysicalPosition<f64> {
        PhysicalPosition::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, pos: PhysicalPosition<f64>) -> bool {
        pos.x >= self.left && pos.x < self.right() && pos.y >= self.top && pos.y < self.bottom()
    }
}

/// Converts pointer coordinates to squares and back.
///
/// Stateless apart from its fixed parameters, so it is `Copy` and shared by
/// value between the gesture tracker and the piece mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMap {
    origin: PhysicalPosition<f64>,
    square_size: f64,
    board_size: u8,
    /// Color drawn at the bottom of the board
    pov: Color,
}

impl GeometryMap {
    pub fn new(origin: PhysicalPosition<f64>, square_size: f64, board_size: u8, pov: Color) -> Self {
        Self { origin, square_size, board_size, pov }
    }

    pub fn square_size(&self) -> f64 {
        self.square_size
    }

    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    pub fn pov(&self) -> Color {
        self.pov
    }

    /// Full board rectangle.
    pub fn board_rect(&self) -> Rect {
        let side = self.square_size * self.board_size as f64;
        Rect::new(self.origin.x, self.origin.y, side, side)
    }

    /// Square under the pointer, or `None` outside the board.
    pub fn square_at(&self, pos: PhysicalPosition<f64>) -> Option<Square> {
        if !self.board_rect().contains(pos) {
            return None;
        }

        let col = ((pos.x - self.origin.x) / self.square_size).floor() as u8;
        let row = ((pos.y - self.origin.y) / self.square_size).floor() as u8;

        // Float rounding on the far edge can still land one past the last column
        if col >= self.board_size || row >= self.board_size {
            return None;
        }

        let (file, rank) = match self.pov {
            Color::White => (col + 1, self.board_size - row),
            Color::Black => (self.board_size - col, row + 1),
        };
        Some(Square::new(file, rank))
    }

    /// Screen rectangle of `square`. Squares off the board still get a rect
    /// (extrapolated from the grid), callers check `is_on_board` first.
    pub fn rect_of(&self, square: Square) -> Rect {
        let (col, row) = self.cell_of(square);
        Rect::new(
            self.origin.x + col as f64 * self.square_size,
            self.origin.y + row as f64 * self.square_size,
            self.square_size,
            self.square_size,
        )
    }

    pub fn center_of(&self, square: Square) -> PhysicalPosition<f64> {
        self.rect_of(square).center()
    }

    /// Whether `rank` is drawn in the upper half of the board.
    pub fn is_upper_rank(&self, rank: u8) -> bool {
        let (_, row) = self.cell_of(Square::new(1, rank));
        row * 2 < self.board_size as i32
    }

    fn cell_of(&self, square: Square) -> (i32, i32) {
        let size = self.board_size as i32;
        let (file, rank) = (square.file as i32, square.rank as i32);
        match self.pov {
            Color::White => (file - 1, size - rank),
            Color::Black => (size - file, rank - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GeometryMap {
        GeometryMap::new(PhysicalPosition::new(0.0, 0.0), 80.0, 8, Color::White)
    }

    #[test]
    fn test_square_at_corners() {
        let g = geometry();
        assert_eq!(g.square_at(PhysicalPosition::new(1.0, 1.0)), Some(Square::new(1, 8)));
        assert_eq!(g.square_at(PhysicalPosition::new(639.0, 639.0)), Some(Square::new(8, 1)));
        assert_eq!(g.square_at(PhysicalPosition::new(360.0, 520.0)), Some(Square::new(5, 2)));
    }

    #[test]
    fn test_square_at_outside_board() {
        let g = geometry();
        assert_eq!(g.square_at(PhysicalPosition::new(-1.0, 10.0)), None);
        assert_eq!(g.square_at(PhysicalPosition::new(640.0, 10.0)), None);
        assert_eq!(g.square_at(PhysicalPosition::new(10.0, 640.0)), None);
    }

    #[test]
    fn test_rect_of_round_trips_through_center() {
        let g = GeometryMap::new(PhysicalPosition::new(25.0, 40.0), 64.0, 8, Color::White);
        for file in 1..=8 {
            for rank in 1..=8 {
                let square = Square::new(file, rank);
                assert_eq!(g.square_at(g.center_of(square)), Some(square));
            }
        }
    }

    #[test]
    fn test_black_pov_flips_board() {
        let g = GeometryMap::new(PhysicalPosition::new(0.0, 0.0), 80.0, 8, Color::Black);
        assert_eq!(g.square_at(PhysicalPosition::new(1.0, 1.0)), Some(Square::new(8, 1)));
        assert_eq!(g.rect_of(Square::new(1, 8)), Rect::new(560.0, 560.0, 80.0, 80.0));
        assert!(g.is_upper_rank(1));
        assert!(!g.is_upper_rank(8));
    }

    #[test]
    fn test_rect_edges_are_half_open() {
        let g = geometry();
        let a8 = g.rect_of(Square::new(1, 8));
        assert!(a8.contains(PhysicalPosition::new(0.0, 0.0)));
        assert!(!a8.contains(PhysicalPosition::new(80.0, 0.0)));
        assert_eq!(g.square_at(PhysicalPosition::new(80.0, 0.0)), Some(Square::new(2, 8)));
    }
}
