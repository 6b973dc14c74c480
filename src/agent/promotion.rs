use crate::game_repr::{Color, Square, Type};
use crate::layout::{GeometryMap, Rect};
use winit::dpi::PhysicalPosition;

/// One selectable piece in the chooser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromotionTarget {
    pub kind: Type,
    pub rect: Rect,
}

/// Column of four promotion pieces anchored on the destination square.
///
/// The column grows from the destination toward the middle of the board:
/// downward when the destination is drawn in the upper half, upward
/// otherwise. With White at the bottom that means downward for White and
/// upward for Black, so the chooser never leaves the board.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionChooser {
    color: Color,
    anchor: Square,
    bounds: Rect,
    targets: [PromotionTarget; 4],
    hovered: Option<usize>,
}

impl PromotionChooser {
    pub fn new(anchor: Square, color: Color, choices: [Type; 4], geometry: &GeometryMap) -> Self {
        let square = geometry.rect_of(anchor);
        let size = geometry.square_size();
        let downward = geometry.is_upper_rank(anchor.rank);

        let bounds = if downward {
            Rect::new(square.left, square.top, size, size * 4.0)
        } else {
            Rect::new(square.left, square.bottom() - size * 4.0, size, size * 4.0)
        };

        let targets = std::array::from_fn(|i| {
            let top = if downward {
                bounds.top + i as f64 * size
            } else {
                bounds.bottom() - (i as f64 + 1.0) * size
            };
            PromotionTarget { kind: choices[i], rect: Rect::new(bounds.left, top, size, size) }
        });

        Self { color, anchor, bounds, targets, hovered: None }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn anchor(&self) -> Square {
        self.anchor
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn targets(&self) -> &[PromotionTarget; 4] {
        &self.targets
    }

    /// Piece kind under the pointer, if any.
    pub fn hit(&self, pos: PhysicalPosition<f64>) -> Option<Type> {
        self.index_at(pos).map(|i| self.targets[i].kind)
    }

    /// Track which target the pointer is over, for highlighting.
    pub fn hover(&mut self, pos: PhysicalPosition<f64>) -> Option<Type> {
        self.hovered = self.index_at(pos);
        self.hovered.map(|i| self.targets[i].kind)
    }

    pub fn hovered(&self) -> Option<Type> {
        self.hovered.map(|i| self.targets[i].kind)
    }

    fn index_at(&self, pos: PhysicalPosition<f64>) -> Option<usize> {
        self.targets.iter().position(|target| target.rect.contains(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHOICES: [Type; 4] = [Type::Queen, Type::Rook, Type::Bishop, Type::Knight];

    fn geometry(pov: Color) -> GeometryMap {
        GeometryMap::new(PhysicalPosition::new(0.0, 0.0), 80.0, 8, pov)
    }

    #[test]
    fn test_white_chooser_grows_downward() {
        let chooser = PromotionChooser::new(Square::new(1, 8), Color::White, CHOICES, &geometry(Color::White));
        assert_eq!(chooser.bounds(), Rect::new(0.0, 0.0, 80.0, 320.0));
        assert_eq!(chooser.targets()[0].rect, Rect::new(0.0, 0.0, 80.0, 80.0));
        assert_eq!(chooser.targets()[3].rect, Rect::new(0.0, 240.0, 80.0, 80.0));
        assert_eq!(chooser.hit(PhysicalPosition::new(40.0, 120.0)), Some(Type::Rook));
    }

    #[test]
    fn test_black_chooser_grows_upward() {
        let chooser = PromotionChooser::new(Square::new(8, 1), Color::Black, CHOICES, &geometry(Color::White));
        assert_eq!(chooser.bounds(), Rect::new(560.0, 320.0, 80.0, 320.0));
        assert_eq!(chooser.targets()[0].rect, Rect::new(560.0, 560.0, 80.0, 80.0));
        assert_eq!(chooser.hit(PhysicalPosition::new(600.0, 350.0)), Some(Type::Knight));
        assert_eq!(chooser.hit(PhysicalPosition::new(600.0, 600.0)), Some(Type::Queen));
    }

    #[test]
    fn test_chooser_stays_on_flipped_board() {
        let g = geometry(Color::Black);
        let chooser = PromotionChooser::new(Square::new(1, 8), Color::White, CHOICES, &g);
        let board = g.board_rect();
        assert!(chooser.bounds().top >= board.top);
        assert!(chooser.bounds().bottom() <= board.bottom());
        assert_eq!(chooser.targets()[0].rect, g.rect_of(Square::new(1, 8)));
    }

    #[test]
    fn test_hit_outside_targets() {
        let chooser = PromotionChooser::new(Square::new(1, 8), Color::White, CHOICES, &geometry(Color::White));
        assert_eq!(chooser.hit(PhysicalPosition::new(120.0, 40.0)), None);
        assert_eq!(chooser.hit(PhysicalPosition::new(40.0, 330.0)), None);
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let mut chooser = PromotionChooser::new(Square::new(3, 8), Color::White, CHOICES, &geometry(Color::White));
        assert_eq!(chooser.hovered(), None);
        assert_eq!(chooser.hover(PhysicalPosition::new(200.0, 200.0)), Some(Type::Bishop));
        assert_eq!(chooser.hovered(), Some(Type::Bishop));
        chooser.hover(PhysicalPosition::new(0.0, 0.0));
        assert_eq!(chooser.hovered(), None);
    }
}
