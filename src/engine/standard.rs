//! [`RulesEngine`] backed by the `chess` crate.
//!
//! Legality and move generation come from `chess::Board`; this adapter adds
//! what the controller expects on top of it: rejection kinds in a fixed
//! checking order, draw detection (insufficient material, threefold
//! repetition, fifty-move rule), a position history for navigation, and a
//! one-ply move picker for the automated side.

use super::{Destinations, Direction, EngineError, EngineSignal, GameOver, GameStatus, Placement, Rejection, RulesEngine};
use crate::game_repr::{Color, Destination, Move, Piece, Square, Type};
use chess::{Board, BoardStatus, ChessMove, File, MoveGen, Rank};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use smallvec::SmallVec;
use std::str::FromStr;

const BOARD_SIZE: u8 = 8;

/// Half-moves without pawn move or capture that end the game.
const FIFTY_MOVE_PLIES: u32 = 100;

/// Score the move picker gives a mating move.
const MATE_SCORE: i32 = 1_000;

#[derive(Clone, Copy)]
struct Snapshot {
    board: Board,
    halfmove_clock: u32,
}

pub struct StandardEngine {
    start: Snapshot,
    /// Every position reached in the current line, `positions[0]` is the start
    positions: Vec<Snapshot>,
    /// Index of the position currently shown, moves before the end of the
    /// line truncate it
    cursor: usize,
    rng: StdRng,
}

impl StandardEngine {
    /// Engine at the standard starting position.
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot { board: Board::default(), halfmove_clock: 0 }, StdRng::from_entropy())
    }

    /// Engine whose automated move choice is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_snapshot(Snapshot { board: Board::default(), halfmove_clock: 0 }, StdRng::seed_from_u64(seed))
    }

    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let board = Board::from_str(fen).map_err(|_| EngineError::InvalidFen(fen.to_string()))?;
        let halfmove_clock = fen.split_whitespace().nth(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        Ok(Self::from_snapshot(Snapshot { board, halfmove_clock }, StdRng::from_entropy()))
    }

    /// Replace the random source used by [`best_move`](RulesEngine::best_move).
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn from_snapshot(start: Snapshot, rng: StdRng) -> Self {
        Self {
            start,
            positions: vec![start],
            cursor: 0,
            rng,
        }
    }

    /// FEN of the position currently shown.
    pub fn fen(&self) -> String {
        self.board().to_string()
    }

    /// Number of positions in the current line, the start included.
    pub fn history_len(&self) -> usize {
        self.positions.len()
    }

    fn current(&self) -> &Snapshot {
        &self.positions[self.cursor]
    }

    fn board(&self) -> &Board {
        &self.current().board
    }

    fn evaluate(&self) -> GameStatus {
        let board = self.board();
        match board.status() {
            BoardStatus::Checkmate => GameStatus::Over(GameOver::Win(from_chess_color(board.side_to_move()).opposite())),
            BoardStatus::Stalemate => GameStatus::Over(GameOver::Stalemate),
            BoardStatus::Ongoing => {
                if is_insufficient_material(board) {
                    GameStatus::Over(GameOver::DrawInsufficientMaterial)
                } else if self.repetitions() >= 3 {
                    GameStatus::Over(GameOver::DrawRepetition)
                } else if self.current().halfmove_clock >= FIFTY_MOVE_PLIES {
                    GameStatus::Over(GameOver::DrawFiftyMove)
                } else {
                    GameStatus::Playing
                }
            }
        }
    }

    /// How often the current position occurred in the line so far.
    fn repetitions(&self) -> usize {
        let hash = self.board().get_hash();
        self.positions[..=self.cursor]
            .iter()
            .filter(|snapshot| snapshot.board.get_hash() == hash)
            .count()
    }

    /// Resolve `mv` against the legal moves, reporting the first failed check.
    fn resolve(&self, mv: Move) -> Result<ChessMove, Rejection> {
        let board = self.board();
        let from = to_chess_square(mv.from).ok_or(Rejection::InvalidStart)?;
        let to = to_chess_square(mv.to).ok_or(Rejection::InvalidEnd)?;

        let color = board.color_on(from).ok_or(Rejection::InvalidStart)?;
        if color != board.side_to_move() {
            return Err(Rejection::InvalidColor);
        }

        let candidates: SmallVec<[ChessMove; 4]> = MoveGen::new_legal(board)
            .filter(|m| m.get_source() == from && m.get_dest() == to)
            .collect();
        if candidates.is_empty() {
            return Err(Rejection::InvalidEnd);
        }

        let wanted = mv.promotion.map(to_chess_piece);
        candidates
            .into_iter()
            .find(|m| m.get_promotion() == wanted)
            .ok_or(Rejection::InvalidPromotion)
    }

    fn score(&self, mv: ChessMove) -> i32 {
        let board = self.board();
        if board.make_move_new(mv).status() == BoardStatus::Checkmate {
            return MATE_SCORE;
        }
        let captured = board.piece_on(mv.get_dest()).map(piece_value).unwrap_or(0);
        let promoted = mv.get_promotion().map(|p| piece_value(p) - 1).unwrap_or(0);
        captured + promoted
    }
}

impl Default for StandardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for StandardEngine {
    fn board_size(&self) -> u8 {
        BOARD_SIZE
    }

    fn make_move(&mut self, mv: Move) -> Result<EngineSignal, Rejection> {
        let chosen = self.resolve(mv)?;

        let board = *self.board();
        let is_pawn = board.piece_on(chosen.get_source()) == Some(chess::Piece::Pawn);
        let is_capture = board.piece_on(chosen.get_dest()).is_some()
            || (is_pawn && chosen.get_source().get_file() != chosen.get_dest().get_file());
        let halfmove_clock = if is_pawn || is_capture { 0 } else { self.current().halfmove_clock + 1 };

        let next = board.make_move_new(chosen);
        self.positions.truncate(self.cursor + 1);
        self.positions.push(Snapshot { board: next, halfmove_clock });
        self.cursor += 1;

        match self.evaluate() {
            GameStatus::Over(over) => {
                log::info!("Game over after {}: {:?} ({})", mv, over, self.fen());
                Ok(EngineSignal::GameOver(over))
            }
            GameStatus::Playing if next.checkers().popcnt() > 0 => {
                log::debug!("Check after {} ({})", mv, self.fen());
                Ok(EngineSignal::Check)
            }
            GameStatus::Playing => Ok(EngineSignal::Quiet),
        }
    }

    fn legal_destinations_from(&self, square: Square) -> Destinations {
        let mut destinations = Destinations::new();
        let Some(from) = to_chess_square(square) else {
            return destinations;
        };

        for m in MoveGen::new_legal(self.board()).filter(|m| m.get_source() == from) {
            let to = from_chess_square(m.get_dest());
            let destination = if m.get_promotion().is_some() {
                Destination::promoting(to)
            } else {
                Destination::new(to)
            };
            if !destinations.contains(&destination) {
                destinations.push(destination);
            }
        }
        destinations
    }

    fn best_move(&mut self) -> Option<Move> {
        let moves: Vec<ChessMove> = MoveGen::new_legal(self.board()).collect();
        let scored: Vec<(ChessMove, i32)> = moves.into_iter().map(|m| (m, self.score(m))).collect();
        let top = scored.iter().map(|(_, score)| *score).max()?;
        let best: Vec<ChessMove> = scored
            .into_iter()
            .filter(|(_, score)| *score == top)
            .map(|(m, _)| m)
            .collect();
        best.choose(&mut self.rng).map(|m| from_chess_move(*m))
    }

    fn current_placement(&self) -> Placement {
        let board = self.board();
        let mut placement = Placement::new();
        for sq in *board.combined() {
            if let (Some(kind), Some(color)) = (board.piece_on(sq), board.color_on(sq)) {
                placement.insert(
                    from_chess_square(sq),
                    Piece::new(from_chess_color(color), from_chess_piece(kind)),
                );
            }
        }
        placement
    }

    fn side_to_move(&self) -> Color {
        from_chess_color(self.board().side_to_move())
    }

    fn status(&self) -> GameStatus {
        self.evaluate()
    }

    fn reset(&mut self) {
        self.positions = vec![self.start];
        self.cursor = 0;
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Back if self.cursor > 0 => self.cursor -= 1,
            Direction::Forward if self.cursor + 1 < self.positions.len() => self.cursor += 1,
            _ => return false,
        }
        true
    }
}

/// Whether neither side can possibly deliver mate.
///
/// Covers king vs king, king and minor piece vs king, and king and bishop
/// vs king and bishop with both bishops on the same shade.
fn is_insufficient_material(board: &Board) -> bool {
    let minors = *board.pieces(chess::Piece::Knight) | *board.pieces(chess::Piece::Bishop);
    match board.combined().popcnt() {
        2 => true,
        3 => minors.popcnt() == 1,
        4 => {
            let bishops = *board.pieces(chess::Piece::Bishop);
            let white_bishops = bishops & *board.color_combined(chess::Color::White);
            if bishops.popcnt() != 2 || white_bishops.popcnt() != 1 {
                return false;
            }
            let mut shades = bishops.map(|sq| (sq.get_rank().to_index() + sq.get_file().to_index()) % 2);
            shades.next() == shades.next()
        }
        _ => false,
    }
}

fn piece_value(piece: chess::Piece) -> i32 {
    match piece {
        chess::Piece::Pawn => 1,
        chess::Piece::Knight | chess::Piece::Bishop => 3,
        chess::Piece::Rook => 5,
        chess::Piece::Queen => 9,
        chess::Piece::King => 0,
    }
}

fn to_chess_square(square: Square) -> Option<chess::Square> {
    if !square.is_on_board(BOARD_SIZE) {
        return None;
    }
    Some(chess::Square::make_square(
        Rank::from_index(square.rank as usize - 1),
        File::from_index(square.file as usize - 1),
    ))
}

fn from_chess_square(sq: chess::Square) -> Square {
    Square::new(sq.get_file().to_index() as u8 + 1, sq.get_rank().to_index() as u8 + 1)
}

fn from_chess_move(m: ChessMove) -> Move {
    Move {
        from: from_chess_square(m.get_source()),
        to: from_chess_square(m.get_dest()),
        promotion: m.get_promotion().map(from_chess_piece),
    }
}

fn to_chess_piece(kind: Type) -> chess::Piece {
    match kind {
        Type::King => chess::Piece::King,
        Type::Queen => chess::Piece::Queen,
        Type::Rook => chess::Piece::Rook,
        Type::Bishop => chess::Piece::Bishop,
        Type::Knight => chess::Piece::Knight,
        Type::Pawn => chess::Piece::Pawn,
    }
}

fn from_chess_piece(piece: chess::Piece) -> Type {
    match piece {
        chess::Piece::King => Type::King,
        chess::Piece::Queen => Type::Queen,
        chess::Piece::Rook => Type::Rook,
        chess::Piece::Bishop => Type::Bishop,
        chess::Piece::Knight => Type::Knight,
        chess::Piece::Pawn => Type::Pawn,
    }
}

fn from_chess_color(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}
