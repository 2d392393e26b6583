//! Promotion Handshake Integration Tests
//!
//! Runs the real engine thread and answers its promotion requests from the
//! test thread, the way the interactive context would:
//! - The move is not published until the decision arrives
//! - Exactly one response per request
//! - Teardown, shutdown and timeout all release the engine with a Queen
//! - Ordinary notifications (rejections, illegal-from-check)

use checkmates::game::{
    GameEngine, GameError, GameSnapshot, Piece, PieceColor, PieceType, PromotionChoice,
    PromotionRequest, PromotionResponder, StateChange,
};
use checkmates::grid::{Grid, Position};
use checkmates::interaction::{BoardView, HandshakeError, MoveRequester};
use crossbeam_channel::Receiver;
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound for anything that waits on the engine thread
const LIMIT: Duration = Duration::from_secs(5);

fn sq(name: &str) -> Position {
    Position::from_algebraic(name).expect("valid square")
}

fn board_with(pieces: &[(PieceType, PieceColor, &str)]) -> GameSnapshot {
    let mut board = Grid::with_size(8, 8).expect("8x8 board");
    for &(piece_type, color, square) in pieces {
        board.replace(sq(square), Some(Piece::new(color, piece_type)));
    }
    GameSnapshot::from_board(board, PieceColor::White)
}

/// White pawn on b7 about to promote; both kings far away
fn promotion_position() -> GameSnapshot {
    board_with(&[
        (PieceType::King, PieceColor::White, "a1"),
        (PieceType::Pawn, PieceColor::White, "b7"),
        (PieceType::King, PieceColor::Black, "h1"),
    ])
}

fn wait_for_request(responder: &mut PromotionResponder) -> PromotionRequest {
    let start = Instant::now();
    loop {
        if let Some(request) = responder.poll().into_iter().next() {
            return request;
        }
        assert!(start.elapsed() < LIMIT, "promotion request never arrived");
        thread::sleep(Duration::from_millis(1));
    }
}

/// Next notification that is not a promotion report
fn next_move_notification(notifications: &Receiver<StateChange>) -> StateChange {
    loop {
        match notifications.recv_timeout(LIMIT) {
            Ok(StateChange::PromotionResolved { .. }) => continue,
            Ok(change) => return change,
            Err(e) => panic!("no notification from engine: {e}"),
        }
    }
}

fn promoted_piece(change: &StateChange) -> Option<PieceType> {
    match change {
        StateChange::MoveApplied { record, .. } => record.promotion,
        _ => None,
    }
}

// ============================================================================
// Resolution Tests
// ============================================================================

#[test]
fn test_promotion_resolved_by_interactive_side() {
    let (engine, mut channels) = GameEngine::spawn(promotion_position(), None).expect("engine");

    channels.moves.request_move(sq("b7"), sq("b8")).expect("send");
    let request = wait_for_request(&mut channels.decisions);

    assert_eq!(request.subject.color, PieceColor::White);
    assert_eq!(request.subject.square, sq("b8"));
    assert_eq!(request.choices, PromotionChoice::ALL.to_vec());
    assert_eq!(request.default, PromotionChoice::Queen);

    // The engine is suspended mid-move: nothing has been published yet
    let before = channels.snapshots.latest();
    assert_eq!(
        before.occupant_at(sq("b7")),
        Some(Piece::new(PieceColor::White, PieceType::Pawn))
    );
    assert_eq!(before.turn_color(), PieceColor::White);

    channels
        .decisions
        .resolve(request.id, PromotionChoice::Rook)
        .expect("resolve");

    match channels.notifications.recv_timeout(LIMIT) {
        Ok(StateChange::PromotionResolved { subject, choice }) => {
            assert_eq!(subject.square, sq("b8"));
            assert_eq!(choice, PromotionChoice::Rook);
        }
        other => panic!("expected promotion report, got {other:?}"),
    }
    let applied = next_move_notification(&channels.notifications);
    assert_eq!(promoted_piece(&applied), Some(PieceType::Rook));

    let after = channels.snapshots.latest();
    assert_eq!(
        after.occupant_at(sq("b8")),
        Some(Piece::new(PieceColor::White, PieceType::Rook))
    );
    assert_eq!(after.occupant_at(sq("b7")), None);
    assert_eq!(after.turn_color(), PieceColor::Black);

    engine.shutdown();
}

#[test]
fn test_second_resolution_is_rejected() {
    let (_engine, mut channels) = GameEngine::spawn(promotion_position(), None).expect("engine");

    channels.moves.request_move(sq("b7"), sq("b8")).expect("send");
    let request = wait_for_request(&mut channels.decisions);

    channels
        .decisions
        .resolve(request.id, PromotionChoice::Bishop)
        .expect("first resolve");
    assert_eq!(
        channels.decisions.resolve(request.id, PromotionChoice::Knight),
        Err(HandshakeError::UnknownRequest(request.id))
    );

    let applied = next_move_notification(&channels.notifications);
    assert_eq!(promoted_piece(&applied), Some(PieceType::Bishop));
}

// ============================================================================
// Teardown Tests
// ============================================================================

#[test]
fn test_teardown_without_response_defaults_to_queen() {
    //! Interactive side never answers and is torn down: the engine must resume
    let (engine, mut channels) = GameEngine::spawn(promotion_position(), None).expect("engine");
    let snapshots = channels.snapshots.clone();
    let notifications = channels.notifications.clone();

    channels.moves.request_move(sq("b7"), sq("b8")).expect("send");
    let _ = wait_for_request(&mut channels.decisions);
    drop(channels);

    let applied = next_move_notification(&notifications);
    assert_eq!(promoted_piece(&applied), Some(PieceType::Queen));
    assert_eq!(
        snapshots.latest().occupant_at(sq("b8")),
        Some(Piece::new(PieceColor::White, PieceType::Queen))
    );

    engine.shutdown();
}

#[test]
fn test_teardown_before_request_is_polled() {
    //! The request is still queued in the channel when the responder goes away
    let (_engine, channels) = GameEngine::spawn(promotion_position(), None).expect("engine");
    let notifications = channels.notifications.clone();
    let moves = channels.moves.clone();

    moves.request_move(sq("b7"), sq("b8")).expect("send");
    drop(channels);

    let applied = next_move_notification(&notifications);
    assert_eq!(promoted_piece(&applied), Some(PieceType::Queen));
}

#[test]
fn test_engine_shutdown_releases_pending_promotion() {
    let (engine, mut channels) = GameEngine::spawn(promotion_position(), None).expect("engine");

    channels.moves.request_move(sq("b7"), sq("b8")).expect("send");
    let _ = wait_for_request(&mut channels.decisions);

    let (done_tx, done_rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        engine.shutdown();
        let _ = done_tx.send(());
    });
    assert!(
        done_rx.recv_timeout(LIMIT).is_ok(),
        "shutdown blocked on an unanswered promotion"
    );
    assert_eq!(
        channels.moves.request_move(sq("a1"), sq("a2")),
        Err(GameError::EngineUnavailable)
    );
}

#[test]
fn test_decision_timeout_defaults_to_queen() {
    let (_engine, channels) =
        GameEngine::spawn(promotion_position(), Some(Duration::from_millis(20))).expect("engine");

    channels.moves.request_move(sq("b7"), sq("b8")).expect("send");

    let applied = next_move_notification(&channels.notifications);
    assert_eq!(promoted_piece(&applied), Some(PieceType::Queen));
}

#[test]
fn test_choice_after_timeout_is_refused() {
    //! Once the engine has promoted to a Queen, a late Knight must be refused
    //! and the request must no longer be listed
    let (_engine, mut channels) =
        GameEngine::spawn(promotion_position(), Some(Duration::from_millis(300))).expect("engine");

    channels.moves.request_move(sq("b7"), sq("b8")).expect("send");
    let request = wait_for_request(&mut channels.decisions);

    let applied = next_move_notification(&channels.notifications);
    assert_eq!(promoted_piece(&applied), Some(PieceType::Queen));

    assert!(channels.decisions.poll().is_empty());
    assert!(!channels.decisions.has_pending());
    assert_eq!(
        channels.decisions.resolve(request.id, PromotionChoice::Knight),
        Err(HandshakeError::Abandoned(request.id))
    );
    assert_eq!(
        channels.snapshots.latest().occupant_at(sq("b8")),
        Some(Piece::new(PieceColor::White, PieceType::Queen))
    );
}

// ============================================================================
// Notification Tests
// ============================================================================

#[test]
fn test_wrong_turn_is_reported_not_applied() {
    let (_engine, channels) = GameEngine::start(None).expect("engine");

    channels.moves.request_move(sq("e7"), sq("e5")).expect("send");

    match next_move_notification(&channels.notifications) {
        StateChange::MoveRejected { reason, .. } => assert_eq!(
            reason,
            GameError::WrongTurn {
                position: sq("e7"),
                color: PieceColor::Black
            }
        ),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(channels.snapshots.latest().turn_color(), PieceColor::White);
}

#[test]
fn test_move_exposing_king_reports_illegal_from_check() {
    let position = board_with(&[
        (PieceType::King, PieceColor::White, "e1"),
        (PieceType::Bishop, PieceColor::White, "e2"),
        (PieceType::Rook, PieceColor::Black, "e8"),
        (PieceType::King, PieceColor::Black, "a8"),
    ]);
    let (_engine, channels) = GameEngine::spawn(position, None).expect("engine");

    channels.moves.request_move(sq("e2"), sq("d3")).expect("send");

    assert_eq!(
        next_move_notification(&channels.notifications),
        StateChange::IllegalMoveFromCheck {
            from: sq("e2"),
            to: sq("d3"),
            color: PieceColor::White
        }
    );
}

#[test]
fn test_checkmate_reports_game_over() {
    //! Scholar's mate, played through the engine
    let (_engine, channels) = GameEngine::start(None).expect("engine");
    for (from, to) in [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "h5"),
        ("g8", "f6"),
        ("h5", "f7"),
    ] {
        channels.moves.request_move(sq(from), sq(to)).expect("send");
        assert!(matches!(
            next_move_notification(&channels.notifications),
            StateChange::MoveApplied { .. }
        ));
    }

    assert_eq!(
        next_move_notification(&channels.notifications),
        StateChange::GameOver {
            status: checkmates::game::GameStatus::Checkmate {
                winner: PieceColor::White
            }
        }
    );
    assert!(channels.snapshots.latest().is_game_over());
}
