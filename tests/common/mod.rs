//! Shared helpers for the integration tests.
#![allow(dead_code)]

use chess_controller::engine::{
    Destinations, EngineSignal, GameStatus, Placement, Rejection, RulesEngine,
};
use chess_controller::game_repr::{Color, Destination, Move, Piece, Square};
use chess_controller::layout::GeometryMap;
use std::collections::{HashMap, VecDeque};
use winit::dpi::PhysicalPosition;

/// `"e2"` -> `Square::new(5, 2)`.
pub fn sq(name: &str) -> Square {
    let file = name.as_bytes()[0] - b'a' + 1;
    let rank = name[1..].parse().unwrap();
    Square::new(file, rank)
}

/// Board geometry used by every test: origin (0, 0), 80px squares, White
/// at the bottom. The center of e2 is (360, 520).
pub fn geometry() -> GeometryMap {
    GeometryMap::new(PhysicalPosition::new(0.0, 0.0), 80.0, 8, Color::White)
}

pub fn center(name: &str) -> PhysicalPosition<f64> {
    geometry().center_of(sq(name))
}

/// Engine that plays back scripted answers and records every call.
///
/// Accepted moves are applied to the placement naively (the piece moves,
/// promotions replace it) and flip the side to move.
pub struct ScriptedEngine {
    pub placement: Placement,
    pub side: Color,
    pub status: GameStatus,
    /// Answers for successive `make_move` calls; `Quiet` once exhausted
    pub responses: VecDeque<Result<EngineSignal, Rejection>>,
    pub destinations: HashMap<Square, Destinations>,
    pub best_moves: VecDeque<Move>,
    /// Every move passed to `make_move`, accepted or not
    pub submitted: Vec<Move>,
    pub best_move_calls: usize,
    pub resets: usize,
}

impl ScriptedEngine {
    pub fn new(pieces: &[(&str, char)]) -> Self {
        let placement = pieces
            .iter()
            .map(|(square, c)| (sq(square), Piece::from_char(*c).unwrap()))
            .collect();
        Self {
            placement,
            side: Color::White,
            status: GameStatus::Playing,
            responses: VecDeque::new(),
            destinations: HashMap::new(),
            best_moves: VecDeque::new(),
            submitted: Vec::new(),
            best_move_calls: 0,
            resets: 0,
        }
    }

    /// Kings on e1/e8 and pawns on e2, e7.
    pub fn small() -> Self {
        Self::new(&[("e1", 'K'), ("e2", 'P'), ("e8", 'k'), ("e7", 'p')])
    }

    pub fn respond(mut self, response: Result<EngineSignal, Rejection>) -> Self {
        self.responses.push_back(response);
        self
    }

    pub fn allow(mut self, from: &str, to: &[&str]) -> Self {
        self.destinations
            .insert(sq(from), to.iter().map(|name| Destination::new(sq(name))).collect());
        self
    }

    pub fn plays(mut self, moves: &[&str]) -> Self {
        self.best_moves
            .extend(moves.iter().map(|text| Move::from_notation(text).unwrap()));
        self
    }
}

impl RulesEngine for ScriptedEngine {
    fn board_size(&self) -> u8 {
        8
    }

    fn make_move(&mut self, mv: Move) -> Result<EngineSignal, Rejection> {
        self.submitted.push(mv);
        let response = self.responses.pop_front().unwrap_or(Ok(EngineSignal::Quiet));
        if let Ok(signal) = response {
            if let Some(mut piece) = self.placement.remove(&mv.from) {
                if let Some(kind) = mv.promotion {
                    piece.piece_type = kind;
                }
                self.placement.insert(mv.to, piece);
            }
            self.side = self.side.opposite();
            if let EngineSignal::GameOver(over) = signal {
                self.status = GameStatus::Over(over);
            }
        }
        response
    }

    fn legal_destinations_from(&self, square: Square) -> Destinations {
        self.destinations.get(&square).cloned().unwrap_or_default()
    }

    fn best_move(&mut self) -> Option<Move> {
        self.best_move_calls += 1;
        self.best_moves.pop_front()
    }

    fn current_placement(&self) -> Placement {
        self.placement.clone()
    }

    fn side_to_move(&self) -> Color {
        self.side
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.status = GameStatus::Playing;
        self.side = Color::White;
    }
}
