//! Pointer gesture tests driven through the orchestrator.
//!
//! Covers:
//! - Rejected releases snap the piece back without touching the counters
//! - Promotion is offered only for pawns reaching the far rank legally
//! - The chooser submits the selected piece
//! - A held piece and a promotion request never coexist

mod common;

use chess_controller::agent::{GestureOutcome, GesturePhase};
use chess_controller::config::{ControllerConfig, GameMode};
use chess_controller::engine::{Rejection, RulesEngine, StandardEngine};
use chess_controller::executor::Outcome;
use chess_controller::game_repr::{Color, Move, Type};
use chess_controller::input::PointerEvent;
use chess_controller::orchestrator::Orchestrator;
use common::{center, sq, ScriptedEngine};
use winit::event::MouseButton;

fn press<E: RulesEngine>(orchestrator: &mut Orchestrator<E>, square: &str) -> Option<GestureOutcome> {
    let pos = center(square);
    orchestrator.handle_pointer(PointerEvent::pressed(MouseButton::Left, pos.x, pos.y))
}

fn release<E: RulesEngine>(orchestrator: &mut Orchestrator<E>, square: &str) -> Option<GestureOutcome> {
    let pos = center(square);
    orchestrator.handle_pointer(PointerEvent::released(MouseButton::Left, pos.x, pos.y))
}

fn drag<E: RulesEngine>(orchestrator: &mut Orchestrator<E>, from: &str, to: &str) -> Option<GestureOutcome> {
    press(orchestrator, from);
    let pos = center(to);
    orchestrator.handle_pointer(PointerEvent::moved(pos.x, pos.y));
    release(orchestrator, to)
}

fn pvp<E: RulesEngine>(engine: E) -> Orchestrator<E> {
    Orchestrator::new(engine, ControllerConfig::with_mode(GameMode::BothHuman)).unwrap()
}

#[test]
fn test_unreachable_release_snaps_back() {
    // e2 has no legal destination, the engine refuses e2e4
    let engine = ScriptedEngine::small().respond(Err(Rejection::InvalidEnd));
    let mut orchestrator = pvp(engine);
    let before = orchestrator.mirror().generation();

    let outcome = drag(&mut orchestrator, "e2", "e4");

    assert_eq!(
        outcome,
        Some(GestureOutcome::Submitted {
            mv: Move::new(sq("e2"), sq("e4")),
            outcome: Outcome::Rejected(Rejection::InvalidEnd),
        })
    );
    assert_eq!(orchestrator.mirror().center_of(sq("e2")), Some(center("e2")));
    assert_eq!(orchestrator.mirror().generation(), before);
    assert!(orchestrator.mirror().matches(&orchestrator.engine().current_placement()));
    assert_eq!(orchestrator.turn().move_count(), 0);
    assert!(!orchestrator.turn().awaiting_reply());
    assert_eq!(orchestrator.phase(), &GesturePhase::Idle);
}

#[test]
fn test_illegal_move_on_real_engine_reverts() {
    let mut orchestrator = pvp(StandardEngine::new());

    let outcome = drag(&mut orchestrator, "e2", "e5");

    assert!(matches!(
        outcome,
        Some(GestureOutcome::Submitted { outcome: Outcome::Rejected(Rejection::InvalidEnd), .. })
    ));
    assert_eq!(orchestrator.mirror().center_of(sq("e2")), Some(center("e2")));
    assert_eq!(orchestrator.turn().move_count(), 0);
    assert_eq!(orchestrator.turn().side_to_move(), Color::White);
}

#[test]
fn test_accepted_gesture_rebuilds_mirror() {
    let mut orchestrator = pvp(StandardEngine::new());

    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
        let outcome = drag(&mut orchestrator, from, to);
        assert!(matches!(outcome, Some(GestureOutcome::Submitted { outcome: Outcome::Accepted, .. })));
        assert!(orchestrator.mirror().matches(&orchestrator.engine().current_placement()));
    }
    assert_eq!(orchestrator.turn().move_count(), 4);
    assert!(!orchestrator.turn().awaiting_reply());
}

#[test]
fn test_promotion_chooser_submits_second_target() {
    let engine = StandardEngine::from_fen("8/P7/7k/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut orchestrator = pvp(engine);

    let offered = drag(&mut orchestrator, "a7", "a8");
    assert_eq!(offered, Some(GestureOutcome::PromotionOffered { from: sq("a7"), to: sq("a8") }));

    let request = orchestrator.promotion().unwrap();
    assert_eq!(request.color, Color::White);
    assert_eq!(request.chooser.targets().len(), 4);
    assert!(orchestrator.pending().is_none());

    // Second target sits one square below a8
    let outcome = orchestrator.handle_pointer(PointerEvent::released(MouseButton::Left, 40.0, 120.0));
    assert_eq!(
        outcome,
        Some(GestureOutcome::Submitted {
            mv: Move::with_promotion(sq("a7"), sq("a8"), Type::Rook),
            outcome: Outcome::Accepted,
        })
    );
    let rook = orchestrator.mirror().piece_at(sq("a8")).unwrap();
    assert_eq!(rook.piece_type, Type::Rook);
    assert_eq!(rook.color, Color::White);
    assert_eq!(orchestrator.phase(), &GesturePhase::Idle);
}

#[test]
fn test_black_promotion_chooser_grows_upward() {
    let engine = StandardEngine::from_fen("4k3/8/8/8/8/K7/7p/8 b - - 0 1").unwrap();
    let mut orchestrator = pvp(engine);

    drag(&mut orchestrator, "h2", "h1");

    let chooser = &orchestrator.promotion().unwrap().chooser;
    assert_eq!(chooser.color(), Color::Black);
    assert_eq!(chooser.bounds().bottom(), 640.0);
    assert_eq!(chooser.bounds().top, 320.0);

    // Queen on h1 itself
    let outcome = release(&mut orchestrator, "h1");
    assert!(matches!(
        outcome,
        Some(GestureOutcome::Submitted { mv: Move { promotion: Some(Type::Queen), .. }, .. })
    ));
}

#[test]
fn test_promotion_requires_legal_destination() {
    // Pawn on a7 but the engine lists nothing for it
    let engine = ScriptedEngine::new(&[("e1", 'K'), ("a7", 'P'), ("h8", 'k')]).respond(Err(Rejection::InvalidPromotion));
    let mut orchestrator = pvp(engine);

    let outcome = drag(&mut orchestrator, "a7", "a8");
    assert!(matches!(
        outcome,
        Some(GestureOutcome::Submitted { outcome: Outcome::Rejected(Rejection::InvalidPromotion), .. })
    ));
    assert!(orchestrator.promotion().is_none());
    assert_eq!(orchestrator.mirror().center_of(sq("a7")), Some(center("a7")));
}

#[test]
fn test_no_promotion_for_other_pieces_or_ranks() {
    let engine = ScriptedEngine::new(&[("e1", 'K'), ("a7", 'R'), ("b6", 'P'), ("h8", 'k')])
        .allow("a7", &["a8"])
        .allow("b6", &["b7"]);
    let mut orchestrator = pvp(engine);

    let rook = drag(&mut orchestrator, "a7", "a8");
    assert!(matches!(rook, Some(GestureOutcome::Submitted { .. })));

    let mut orchestrator = pvp(
        ScriptedEngine::new(&[("e1", 'K'), ("b6", 'P'), ("h8", 'k')]).allow("b6", &["b7"]),
    );
    let pawn = drag(&mut orchestrator, "b6", "b7");
    assert!(matches!(pawn, Some(GestureOutcome::Submitted { mv: Move { promotion: None, .. }, .. })));
}

#[test]
fn test_held_piece_and_promotion_are_exclusive() {
    let engine = StandardEngine::from_fen("8/P7/7k/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut orchestrator = pvp(engine);

    let exclusive = |o: &Orchestrator<StandardEngine>| !(o.pending().is_some() && o.promotion().is_some());

    press(&mut orchestrator, "a7");
    assert!(orchestrator.pending().is_some());
    assert!(exclusive(&orchestrator));

    release(&mut orchestrator, "a8");
    assert!(orchestrator.promotion().is_some());
    assert!(exclusive(&orchestrator));

    // A second press while choosing does not pick anything up
    assert_eq!(press(&mut orchestrator, "e1"), None);
    assert!(orchestrator.pending().is_none());
    assert!(exclusive(&orchestrator));

    let cancel = orchestrator.handle_pointer(PointerEvent::pressed(MouseButton::Right, 0.0, 0.0));
    assert_eq!(cancel, Some(GestureOutcome::Cancelled));
    assert!(orchestrator.pending().is_none() && orchestrator.promotion().is_none());
}

#[test]
fn test_capture_hints() {
    let mut orchestrator = pvp(StandardEngine::new());
    for (from, to) in [("e2", "e4"), ("d7", "d5")] {
        drag(&mut orchestrator, from, to);
    }

    press(&mut orchestrator, "e4");
    let hints = &orchestrator.pending().unwrap().hints;
    assert_eq!(hints.len(), 2);
    assert!(hints.iter().any(|h| h.square == sq("d5") && h.capture));
    assert!(hints.iter().any(|h| h.square == sq("e5") && !h.capture));
}

#[test]
fn test_hints_can_be_disabled() {
    let config = ControllerConfig { show_destination_hints: false, ..ControllerConfig::default() };
    let mut orchestrator = Orchestrator::new(StandardEngine::new(), config).unwrap();
    press(&mut orchestrator, "e2");
    assert!(orchestrator.pending().unwrap().hints.is_empty());
}

#[test]
fn test_pointer_stream_drives_gestures() {
    use winit::event::WindowEvent;

    let mut orchestrator = pvp(StandardEngine::new());
    let (g1, f3) = (center("g1"), center("f3"));

    orchestrator.handle_pointer(PointerEvent::moved(g1.x, g1.y));
    let cursor = orchestrator.cursor();
    assert_eq!(
        orchestrator.handle_pointer(PointerEvent::pressed(MouseButton::Left, cursor.x, cursor.y)),
        Some(GestureOutcome::PickedUp(sq("g1")))
    );

    // The held knight follows the pointer
    orchestrator.handle_pointer(PointerEvent::moved(f3.x, f3.y));
    assert_eq!(orchestrator.mirror().center_of(sq("g1")), Some(f3));
    assert_eq!(orchestrator.pending().unwrap().pointer, f3);

    let cursor = orchestrator.cursor();
    let outcome = orchestrator.handle_pointer(PointerEvent::released(MouseButton::Left, cursor.x, cursor.y));
    assert!(matches!(outcome, Some(GestureOutcome::Submitted { outcome: Outcome::Accepted, .. })));
    assert!(orchestrator.mirror().piece_at(sq("f3")).is_some_and(|p| p.piece_type == Type::Knight));

    // Window events without pointer meaning are ignored
    assert_eq!(orchestrator.handle_window_event(&WindowEvent::Focused(true)), None);
    assert_eq!(orchestrator.phase(), &GesturePhase::Idle);
}
