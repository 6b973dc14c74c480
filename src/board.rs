use crate::engine::Placement;
use crate::game_repr::{Piece, Square};
use crate::layout::GeometryMap;
use std::collections::HashMap;
use winit::dpi::PhysicalPosition;

/// A piece as the client shows it: what it is and where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorPiece {
    pub piece: Piece,
    /// Screen position of the piece's center. Equals the center of its
    /// square except while the piece is being dragged.
    pub center: PhysicalPosition<f64>,
}

/// Client-side cache of the board placement.
///
/// The mirror is owned by the controller; renderers only read it.
///
/// # Resynchronisation
///
/// After every accepted move the whole mirror is thrown away and rebuilt
/// from the engine's [`Placement`]. It is never patched move by move, so it
/// cannot drift from the engine. The only other mutation is moving a held
/// piece's drawn position around during a gesture, which never changes
/// which piece stands on which square.
///
/// ```rust,ignore
/// let mut mirror = PieceMirror::new();
/// mirror.rebuild(&engine.current_placement(), &geometry);
/// assert!(mirror.matches(&engine.current_placement()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PieceMirror {
    pieces: HashMap<Square, MirrorPiece>,
    /// Number of rebuilds since creation
    generation: u64,
}

impl PieceMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mirror with `placement`, every piece centered on
    /// its square.
    pub fn rebuild(&mut self, placement: &Placement, geometry: &GeometryMap) {
        self.pieces = placement
            .iter()
            .map(|(&square, &piece)| (square, MirrorPiece { piece, center: geometry.center_of(square) }))
            .collect();
        self.generation += 1;
        log::trace!("Mirror rebuilt ({} pieces, generation {})", self.pieces.len(), self.generation);
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).map(|entry| entry.piece)
    }

    pub fn entry(&self, square: Square) -> Option<&MirrorPiece> {
        self.pieces.get(&square)
    }

    /// Where the piece standing on `square` is currently drawn.
    pub fn center_of(&self, square: Square) -> Option<PhysicalPosition<f64>> {
        self.pieces.get(&square).map(|entry| entry.center)
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.pieces.contains_key(&square)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Square, &MirrorPiece)> {
        self.pieces.iter()
    }

    /// Whether the mirror holds exactly `placement`.
    pub fn matches(&self, placement: &Placement) -> bool {
        self.pieces.len() == placement.len()
            && placement
                .iter()
                .all(|(square, piece)| self.piece_at(*square) == Some(*piece))
    }

    /// Draw the piece on `square` at `pos` instead of its square.
    pub(crate) fn drag(&mut self, square: Square, pos: PhysicalPosition<f64>) {
        if let Some(entry) = self.pieces.get_mut(&square) {
            entry.center = pos;
        }
    }

    /// Put the piece on `square` back at the center of that square.
    pub(crate) fn snap_back(&mut self, square: Square, geometry: &GeometryMap) {
        self.drag(square, geometry.center_of(square));
    }
}
