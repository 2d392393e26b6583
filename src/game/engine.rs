//! Game-state mutator running on its own thread
//!
//! The engine is the only owner of the live game state. The interactive
//! context talks to it exclusively through channels:
//!
//! - [`MoveSender`] queues [`MoveCommand`]s (commands are applied one at a
//!   time, so a second promotion request can never overlap the first)
//! - [`SnapshotSource`] exposes the latest published [`GameSnapshot`]
//! - a `Receiver<StateChange>` carries notifications back, to be drained on
//!   the interactive context's own schedule
//! - a [`PromotionResponder`] receives promotion decisions
//!
//! # Publishing
//!
//! A move is applied to the engine's private copy, including any promotion
//! round trip, and only then published. The snapshot lock is held for the
//! `Arc` swap alone, so readers never wait on a human decision.
//!
//! # Shutdown
//!
//! Dropping [`GameEngine`] (or calling [`GameEngine::shutdown`]) raises the
//! abort signal, which releases a pending promotion with its default, then
//! stops and joins the thread.

use super::error::{GameError, GameResult};
use super::promotion::{PromotionChoice, PromotionRequester, PromotionResponder, PromotionSubject};
use super::rules;
use super::snapshot::{GameSnapshot, GameStatus, MoveRecord};
use crate::grid::Position;
use crate::interaction::handshake::decision_channel;
use crate::interaction::{BoardView, MoveRequester};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

const ENGINE_THREAD_NAME: &str = "checkmates-engine";

/// Request to move the piece on `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub from: Position,
    pub to: Position,
}

enum EngineCommand {
    Move(MoveCommand),
    Shutdown,
}

/// Result of applying one [`MoveCommand`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(MoveRecord),
    /// The piece can reach the square but doing so leaves its king attacked
    IllegalInCheck,
    Rejected(GameError),
}

/// Notification pushed to the interactive context after each command
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    MoveApplied {
        record: MoveRecord,
        snapshot: Arc<GameSnapshot>,
    },
    IllegalMoveFromCheck {
        from: Position,
        to: Position,
        color: super::PieceColor,
    },
    MoveRejected {
        from: Position,
        to: Position,
        reason: GameError,
    },
    GameOver {
        status: GameStatus,
    },
    PromotionResolved {
        subject: PromotionSubject,
        choice: PromotionChoice,
    },
}

/// Shared handle to the most recently published snapshot
#[derive(Clone)]
pub struct SnapshotSource {
    current: Arc<RwLock<Arc<GameSnapshot>>>,
}

impl SnapshotSource {
    pub fn new(initial: GameSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// The latest snapshot; hold it for one computation, then drop it
    pub fn latest(&self) -> Arc<GameSnapshot> {
        Arc::clone(&self.current.read())
    }

    fn publish(&self, snapshot: GameSnapshot) -> Arc<GameSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write() = Arc::clone(&snapshot);
        snapshot
    }
}

/// Cloneable move-commit entry point
#[derive(Clone)]
pub struct MoveSender {
    commands: Sender<EngineCommand>,
}

impl MoveRequester for MoveSender {
    fn request_move(&self, from: Position, to: Position) -> GameResult<()> {
        self.commands
            .send(EngineCommand::Move(MoveCommand { from, to }))
            .map_err(|_| GameError::EngineUnavailable)
    }
}

/// Interactive-side ends of the engine's channels
pub struct EngineChannels {
    pub snapshots: SnapshotSource,
    pub moves: MoveSender,
    pub notifications: Receiver<StateChange>,
    pub decisions: PromotionResponder,
}

/// Owner of the engine thread
pub struct GameEngine {
    commands: Sender<EngineCommand>,
    snapshots: SnapshotSource,
    abort: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl GameEngine {
    /// Start an engine from the standard position
    pub fn start(decision_timeout: Option<Duration>) -> GameResult<(Self, EngineChannels)> {
        Self::spawn(GameSnapshot::standard(), decision_timeout)
    }

    /// Start an engine from `initial`
    ///
    /// `decision_timeout` bounds how long a promotion waits for the human
    /// before taking the default; `None` waits until teardown.
    pub fn spawn(
        initial: GameSnapshot,
        decision_timeout: Option<Duration>,
    ) -> GameResult<(Self, EngineChannels)> {
        let (command_tx, command_rx) = unbounded();
        let (notification_tx, notification_rx) = unbounded();
        let (abort_tx, abort_rx) = crossbeam_channel::bounded(0);
        let (requester, responder) = decision_channel();

        let snapshots = SnapshotSource::new(initial.clone());
        let worker = EngineWorker {
            state: initial,
            snapshots: snapshots.clone(),
            notifications: notification_tx,
            promotions: requester.with_timeout(decision_timeout).abort_on(abort_rx),
        };

        let handle = thread::Builder::new()
            .name(ENGINE_THREAD_NAME.to_string())
            .spawn(move || worker.run(command_rx))
            .map_err(|e| {
                warn!("[GAME] Failed to spawn engine thread: {}", e);
                GameError::EngineUnavailable
            })?;

        let engine = Self {
            commands: command_tx.clone(),
            snapshots: snapshots.clone(),
            abort: Some(abort_tx),
            handle: Some(handle),
        };
        let channels = EngineChannels {
            snapshots,
            moves: MoveSender {
                commands: command_tx,
            },
            notifications: notification_rx,
            decisions: responder,
        };
        Ok((engine, channels))
    }

    pub fn snapshots(&self) -> SnapshotSource {
        self.snapshots.clone()
    }

    /// Stop the thread and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        // Releases a promotion that is still waiting on the human
        self.abort.take();
        let _ = self.commands.send(EngineCommand::Shutdown);
        if handle.join().is_err() {
            warn!("[GAME] Engine thread panicked");
        }
        info!("[GAME] Engine stopped");
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

struct EngineWorker {
    state: GameSnapshot,
    snapshots: SnapshotSource,
    notifications: Sender<StateChange>,
    promotions: PromotionRequester,
}

impl EngineWorker {
    fn run(mut self, commands: Receiver<EngineCommand>) {
        info!("[GAME] Engine thread started");
        for command in commands.iter() {
            match command {
                EngineCommand::Move(command) => self.handle(command),
                EngineCommand::Shutdown => break,
            }
        }
        debug!("[GAME] Engine thread exiting");
    }

    fn handle(&mut self, command: MoveCommand) {
        let MoveCommand { from, to } = command;
        match self.apply(command) {
            MoveOutcome::Applied(record) => {
                let snapshot = self.snapshots.publish(self.state.clone());
                info!("[GAME] {} played {}", record.piece.color, record.notation());
                self.notify(StateChange::MoveApplied { record, snapshot });
                let status = self.state.status();
                if status.is_over() {
                    info!("[GAME] Game over: {:?}", status);
                    self.notify(StateChange::GameOver { status });
                }
            }
            MoveOutcome::IllegalInCheck => {
                let color = self.state.turn();
                debug!("[GAME] {} -> {} would leave {} in check", from, to, color);
                self.notify(StateChange::IllegalMoveFromCheck { from, to, color });
            }
            MoveOutcome::Rejected(reason) => {
                debug!("[GAME] Rejected {} -> {}: {}", from, to, reason);
                self.notify(StateChange::MoveRejected { from, to, reason });
            }
        }
    }

    /// Validate and apply one move to the private state
    fn apply(&mut self, command: MoveCommand) -> MoveOutcome {
        let MoveCommand { from, to } = command;
        if self.state.status().is_over() {
            return MoveOutcome::Rejected(GameError::GameOver);
        }
        let Some(piece) = self.state.occupant_at(from) else {
            return MoveOutcome::Rejected(GameError::PieceNotFound { position: from });
        };
        if piece.color != self.state.turn() {
            return MoveOutcome::Rejected(GameError::WrongTurn {
                position: from,
                color: piece.color,
            });
        }
        let board = self.state.board();
        if !rules::pseudo_legal_destinations(board, from).contains(&to) {
            return MoveOutcome::Rejected(GameError::InvalidMove { from, to });
        }
        if rules::leaves_king_in_check(board, from, to) {
            return MoveOutcome::IllegalInCheck;
        }

        let rows = board.rows();
        let captured = {
            let board = self.state.board_mut();
            board.replace(from, None);
            board.replace(to, Some(piece)).flatten()
        };
        if let Some(taken) = captured {
            self.state.captured_mut().add_capture(taken.color, taken.piece_type);
        }

        let mut promotion = None;
        if rules::is_promotion_move(piece, to, rows) {
            let subject = PromotionSubject {
                color: piece.color,
                square: to,
            };
            info!("[PROMOTION] Waiting for {} to choose a piece on {}", piece.color, to);
            let choice = self.promotions.request(
                subject,
                PromotionChoice::ALL.to_vec(),
                PromotionChoice::default(),
            );
            let promoted = super::Piece::new(piece.color, choice.piece_type());
            self.state.board_mut().replace(to, Some(promoted));
            self.notify(StateChange::PromotionResolved { subject, choice });
            promotion = Some(choice.piece_type());
        }

        let gives_check = rules::is_in_check(self.state.board(), piece.color.opponent());
        let record = MoveRecord {
            piece,
            from,
            to,
            captured: captured.map(|p| p.piece_type),
            promotion,
            gives_check,
        };
        self.state.finish_move(record);
        MoveOutcome::Applied(record)
    }

    fn notify(&self, change: StateChange) {
        if self.notifications.send(change).is_err() {
            debug!("[GAME] Notification receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Piece, PieceColor, PieceType};
    use crate::grid::Grid;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).expect("square")
    }

    fn worker_for(state: GameSnapshot) -> (EngineWorker, Receiver<StateChange>, PromotionResponder) {
        let (notification_tx, notification_rx) = unbounded();
        let (requester, responder) = decision_channel();
        let worker = EngineWorker {
            snapshots: SnapshotSource::new(state.clone()),
            state,
            notifications: notification_tx,
            promotions: requester,
        };
        (worker, notification_rx, responder)
    }

    fn mv(from: &str, to: &str) -> MoveCommand {
        MoveCommand {
            from: sq(from),
            to: sq(to),
        }
    }

    #[test]
    fn test_apply_opening_move() {
        let (mut worker, _rx, _responder) = worker_for(GameSnapshot::standard());
        let outcome = worker.apply(mv("e2", "e4"));

        assert!(matches!(outcome, MoveOutcome::Applied(_)));
        assert_eq!(worker.state.turn(), PieceColor::Black);
        assert_eq!(worker.state.occupant_at(sq("e2")), None);
        assert_eq!(worker.state.history().len(), 1);
    }

    #[test]
    fn test_apply_rejects_wrong_turn_and_empty_square() {
        let (mut worker, _rx, _responder) = worker_for(GameSnapshot::standard());
        assert_eq!(
            worker.apply(mv("e7", "e5")),
            MoveOutcome::Rejected(GameError::WrongTurn {
                position: sq("e7"),
                color: PieceColor::Black
            })
        );
        assert_eq!(
            worker.apply(mv("e4", "e5")),
            MoveOutcome::Rejected(GameError::PieceNotFound { position: sq("e4") })
        );
        assert_eq!(
            worker.apply(mv("e2", "e5")),
            MoveOutcome::Rejected(GameError::InvalidMove {
                from: sq("e2"),
                to: sq("e5")
            })
        );
    }

    #[test]
    fn test_apply_reports_illegal_in_check() {
        //! Pinned bishop: reachable square, but the king would be exposed
        let mut board: rules::Board = Grid::with_size(8, 8).expect("board");
        board.replace(sq("e1"), Some(Piece::new(PieceColor::White, PieceType::King)));
        board.replace(sq("e2"), Some(Piece::new(PieceColor::White, PieceType::Bishop)));
        board.replace(sq("e8"), Some(Piece::new(PieceColor::Black, PieceType::Rook)));
        board.replace(sq("a8"), Some(Piece::new(PieceColor::Black, PieceType::King)));

        let (mut worker, _rx, _responder) =
            worker_for(GameSnapshot::from_board(board, PieceColor::White));
        assert_eq!(worker.apply(mv("e2", "d3")), MoveOutcome::IllegalInCheck);
        assert_eq!(worker.state.turn(), PieceColor::White);
    }

    #[test]
    fn test_capture_is_recorded() {
        let mut board: rules::Board = Grid::with_size(8, 8).expect("board");
        board.replace(sq("e1"), Some(Piece::new(PieceColor::White, PieceType::King)));
        board.replace(sq("d1"), Some(Piece::new(PieceColor::White, PieceType::Rook)));
        board.replace(sq("d7"), Some(Piece::new(PieceColor::Black, PieceType::Knight)));
        board.replace(sq("h8"), Some(Piece::new(PieceColor::Black, PieceType::King)));

        let (mut worker, _rx, _responder) =
            worker_for(GameSnapshot::from_board(board, PieceColor::White));
        let MoveOutcome::Applied(record) = worker.apply(mv("d1", "d7")) else {
            panic!("capture should apply");
        };
        assert_eq!(record.captured, Some(PieceType::Knight));
        assert_eq!(worker.state.captured().material_advantage(), 3);
    }

    #[test]
    fn test_promotion_waits_for_decision() {
        let mut board: rules::Board = Grid::with_size(8, 8).expect("board");
        board.replace(sq("a1"), Some(Piece::new(PieceColor::White, PieceType::King)));
        board.replace(sq("b7"), Some(Piece::new(PieceColor::White, PieceType::Pawn)));
        board.replace(sq("h1"), Some(Piece::new(PieceColor::Black, PieceType::King)));

        let (mut worker, rx, mut responder) =
            worker_for(GameSnapshot::from_board(board, PieceColor::White));
        let mover = thread::spawn(move || {
            let outcome = worker.apply(mv("b7", "b8"));
            (outcome, worker)
        });

        let request = loop {
            if let Some(request) = responder.poll().into_iter().next() {
                break request;
            }
            thread::sleep(Duration::from_millis(1));
        };
        assert_eq!(request.subject.color, PieceColor::White);
        assert_eq!(request.subject.square, sq("b8"));
        responder.resolve(request.id, PromotionChoice::Knight).expect("resolve");

        let (outcome, worker) = mover.join().expect("mover");
        let MoveOutcome::Applied(record) = outcome else {
            panic!("promotion should apply");
        };
        assert_eq!(record.promotion, Some(PieceType::Knight));
        assert_eq!(
            worker.state.occupant_at(sq("b8")),
            Some(Piece::new(PieceColor::White, PieceType::Knight))
        );
        assert!(matches!(
            rx.try_recv(),
            Ok(StateChange::PromotionResolved {
                choice: PromotionChoice::Knight,
                ..
            })
        ));
    }
}
