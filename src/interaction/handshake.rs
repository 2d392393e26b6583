//! Cross-thread decision handshake
//!
//! Lets a thread that is mutating game state obtain a choice that only the
//! interactive context can supply (the promotion piece, for example) without
//! ever calling presentation code from the mutating thread.
//!
//! # Protocol
//!
//! 1. The mutating side calls [`DecisionRequester::request`]. A fresh
//!    [`RequestId`] and a single-slot reply channel are created, the request
//!    is queued for the interactive side, and the caller blocks on the reply.
//! 2. The interactive side calls [`DecisionResponder::poll`] from its own
//!    update loop (never blocking) and shows the request to the human.
//! 3. [`DecisionResponder::resolve`] delivers exactly one response. A second
//!    call for the same id fails with [`HandshakeError::UnknownRequest`].
//!
//! A requester that stops waiting (timeout, abort) drops its side of a
//! per-request liveness channel. The responder then stops listing the request
//! and answers a late `resolve` with [`HandshakeError::Abandoned`].
//!
//! # Teardown
//!
//! The requester never waits forever. It returns the request's default
//! choice when any of these happen:
//! - the responder is dropped (its liveness channel disconnects)
//! - the request is cancelled
//! - the optional timeout elapses
//! - the owner of the requester raises its abort signal
//!
//! # Reference
//!
//! Channel layout follows the UI/network split used by the p2pgo client
//! (`crossbeam_channel` in both directions, the UI side draining with
//! `try_recv`).

use crossbeam_channel::{after, bounded, never, select, unbounded, Receiver, Sender, TryRecvError};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Unique identifier of one outstanding decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors reported to the interactive side
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandshakeError {
    /// Never issued, already resolved, or already cancelled
    #[error("No outstanding decision request {0}")]
    UnknownRequest(RequestId),

    /// The response is not one of the request's legal choices
    #[error("Choice is not legal for decision request {0}")]
    ChoiceNotAllowed(RequestId),

    /// The requester stopped waiting and already used its default
    #[error("Decision request {0} was abandoned by its requester")]
    Abandoned(RequestId),
}

/// Result type alias for handshake operations
pub type HandshakeResult<T> = Result<T, HandshakeError>;

/// A decision the interactive side has been asked to make
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRequest<S, R> {
    pub id: RequestId,
    /// Context shown to the human (e.g. which colour is promoting)
    pub subject: S,
    /// The finite set of legal responses
    pub choices: Vec<R>,
    /// Delivered when the request is cancelled or abandoned
    pub default: R,
}

struct PendingDecision<S, R> {
    request: DecisionRequest<S, R>,
    reply: Sender<R>,
    /// Never receives a value; disconnects when the requester stops waiting
    requester_waiting: Receiver<()>,
}

impl<S, R> PendingDecision<S, R> {
    fn is_abandoned(&self) -> bool {
        matches!(
            self.requester_waiting.try_recv(),
            Err(TryRecvError::Disconnected)
        )
    }
}

/// Create a connected requester/responder pair
pub fn decision_channel<S, R>() -> (DecisionRequester<S, R>, DecisionResponder<S, R>) {
    let (request_tx, request_rx) = unbounded();
    let (alive_tx, alive_rx) = bounded(0);

    let requester = DecisionRequester {
        requests: request_tx,
        responder_alive: alive_rx,
        abort: None,
        timeout: None,
    };
    let responder = DecisionResponder {
        requests: request_rx,
        pending: HashMap::new(),
        order: Vec::new(),
        _alive: alive_tx,
    };
    (requester, responder)
}

/// Mutating-thread half of the handshake
pub struct DecisionRequester<S, R> {
    requests: Sender<PendingDecision<S, R>>,
    /// Never receives a value; disconnects when the responder is dropped
    responder_alive: Receiver<()>,
    abort: Option<Receiver<()>>,
    timeout: Option<Duration>,
}

impl<S, R> Clone for DecisionRequester<S, R> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            responder_alive: self.responder_alive.clone(),
            abort: self.abort.clone(),
            timeout: self.timeout,
        }
    }
}

impl<S, R> DecisionRequester<S, R>
where
    S: fmt::Debug,
    R: Copy + fmt::Debug,
{
    /// Give up and return the default after `timeout` (None waits until teardown)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Return the default as soon as `signal` disconnects or fires
    pub fn abort_on(mut self, signal: Receiver<()>) -> Self {
        self.abort = Some(signal);
        self
    }

    /// Ask the interactive side for a choice and block until one arrives
    ///
    /// This is the only suspension point of the mutating thread. It always
    /// returns: with the chosen value, or with `default` if the responder is
    /// gone, the request is cancelled, the timeout elapses or the abort
    /// signal fires.
    pub fn request(&self, subject: S, choices: Vec<R>, default: R) -> R {
        let (reply_tx, reply_rx) = bounded(1);
        // Held until this call returns
        let (_waiting, waiting_rx) = bounded::<()>(0);
        let id = RequestId::new();
        debug!("[HANDSHAKE] Issuing decision request {} for {:?}", id, subject);

        let pending = PendingDecision {
            request: DecisionRequest {
                id,
                subject,
                choices,
                default,
            },
            reply: reply_tx,
            requester_waiting: waiting_rx,
        };
        if self.requests.send(pending).is_err() {
            warn!("[HANDSHAKE] Responder is gone, using default {:?} for {}", default, id);
            return default;
        }

        let deadline = self.timeout.map(after).unwrap_or_else(never);
        let abort = self.abort.clone().unwrap_or_else(never);

        let response = select! {
            recv(reply_rx) -> reply => reply.unwrap_or(default),
            recv(self.responder_alive) -> _ => reply_rx.try_recv().unwrap_or(default),
            recv(abort) -> _ => reply_rx.try_recv().unwrap_or(default),
            recv(deadline) -> _ => {
                warn!("[HANDSHAKE] Request {} timed out, using default {:?}", id, default);
                reply_rx.try_recv().unwrap_or(default)
            },
        };
        debug!("[HANDSHAKE] Request {} resolved with {:?}", id, response);
        response
    }
}

/// Interactive-context half of the handshake
///
/// Dropping the responder delivers the default to every outstanding request.
pub struct DecisionResponder<S, R> {
    requests: Receiver<PendingDecision<S, R>>,
    pending: HashMap<RequestId, PendingDecision<S, R>>,
    /// Arrival order of pending ids
    order: Vec<RequestId>,
    _alive: Sender<()>,
}

impl<S, R> DecisionResponder<S, R>
where
    S: Clone + fmt::Debug,
    R: Copy + PartialEq + fmt::Debug,
{
    /// Take newly queued requests without blocking
    ///
    /// Returns only the requests that arrived since the last poll. Requests
    /// whose requester has stopped waiting are dropped, new or old.
    pub fn poll(&mut self) -> Vec<DecisionRequest<S, R>> {
        self.discard_abandoned();
        let mut arrived = Vec::new();
        while let Ok(pending) = self.requests.try_recv() {
            let id = pending.request.id;
            if pending.is_abandoned() {
                debug!("[HANDSHAKE] Skipping abandoned request {}", id);
                continue;
            }
            debug!("[HANDSHAKE] Received decision request {}", id);
            arrived.push(pending.request.clone());
            self.order.push(id);
            self.pending.insert(id, pending);
        }
        arrived
    }

    /// Outstanding requests in arrival order
    pub fn pending(&self) -> Vec<&DecisionRequest<S, R>> {
        self.order
            .iter()
            .filter_map(|id| self.pending.get(id))
            .filter(|p| !p.is_abandoned())
            .map(|p| &p.request)
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.values().any(|p| !p.is_abandoned())
    }

    /// Deliver `response` to the request, unblocking its requester once
    pub fn resolve(&mut self, id: RequestId, response: R) -> HandshakeResult<()> {
        let pending = self
            .pending
            .get(&id)
            .ok_or(HandshakeError::UnknownRequest(id))?;
        if !pending.request.choices.contains(&response) {
            return Err(HandshakeError::ChoiceNotAllowed(id));
        }
        self.deliver(id, Some(response)).map(|_| ())
    }

    /// Resolve the request with its default choice
    pub fn cancel(&mut self, id: RequestId) -> HandshakeResult<R> {
        self.deliver(id, None)
    }

    /// Resolve every outstanding or still-queued request with its default
    ///
    /// Returns how many requests were released.
    pub fn cancel_all(&mut self) -> usize {
        self.poll();
        let ids: Vec<RequestId> = self.order.clone();
        ids.into_iter()
            .filter(|id| self.deliver(*id, None).is_ok())
            .count()
    }

    fn deliver(&mut self, id: RequestId, response: Option<R>) -> HandshakeResult<R> {
        let pending = self
            .pending
            .remove(&id)
            .ok_or(HandshakeError::UnknownRequest(id))?;
        self.order.retain(|queued| *queued != id);
        let value = response.unwrap_or(pending.request.default);
        pending.reply.send(value).map_err(|_| {
            debug!("[HANDSHAKE] Requester for {} stopped waiting", id);
            HandshakeError::Abandoned(id)
        })?;
        Ok(value)
    }

    fn discard_abandoned(&mut self) {
        let pending = &mut self.pending;
        self.order.retain(|id| {
            let abandoned = pending.get(id).is_none_or(PendingDecision::is_abandoned);
            if abandoned {
                debug!("[HANDSHAKE] Dropping abandoned request {}", id);
                pending.remove(id);
            }
            !abandoned
        });
    }
}

impl<S, R> Drop for DecisionResponder<S, R> {
    fn drop(&mut self) {
        // Queued requests are drained too, so no requester waits on a
        // reply sender buried in the channel buffer.
        while let Ok(pending) = self.requests.try_recv() {
            let _ = pending.reply.send(pending.request.default);
        }
        for (id, pending) in self.pending.drain() {
            debug!("[HANDSHAKE] Releasing {} with default on teardown", id);
            let _ = pending.reply.send(pending.request.default);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    const LIMIT: Duration = Duration::from_secs(5);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pick {
        A,
        B,
        C,
    }

    /// Spin until the request shows up on the responder side
    fn wait_for_request(
        responder: &mut DecisionResponder<&'static str, Pick>,
    ) -> DecisionRequest<&'static str, Pick> {
        let start = Instant::now();
        loop {
            if let Some(request) = responder.poll().into_iter().next() {
                return request;
            }
            assert!(start.elapsed() < LIMIT, "request never arrived");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_resolve_unblocks_requester() {
        let (requester, mut responder) = decision_channel();
        let worker = thread::spawn(move || requester.request("white", vec![Pick::A, Pick::B], Pick::A));

        let request = wait_for_request(&mut responder);
        assert_eq!(request.subject, "white");
        assert_eq!(request.default, Pick::A);
        responder.resolve(request.id, Pick::B).expect("resolve");

        assert_eq!(worker.join().expect("worker"), Pick::B);
        assert!(!responder.has_pending());
    }

    #[test]
    fn test_second_resolve_is_rejected() {
        //! Exactly one response per request
        let (requester, mut responder) = decision_channel();
        let worker = thread::spawn(move || requester.request("white", vec![Pick::A, Pick::B], Pick::A));

        let request = wait_for_request(&mut responder);
        responder.resolve(request.id, Pick::B).expect("first resolve");
        assert_eq!(
            responder.resolve(request.id, Pick::A),
            Err(HandshakeError::UnknownRequest(request.id))
        );
        assert_eq!(worker.join().expect("worker"), Pick::B);
    }

    #[test]
    fn test_illegal_choice_keeps_request_open() {
        let (requester, mut responder) = decision_channel();
        let worker = thread::spawn(move || requester.request("black", vec![Pick::A, Pick::B], Pick::A));

        let request = wait_for_request(&mut responder);
        assert_eq!(
            responder.resolve(request.id, Pick::C),
            Err(HandshakeError::ChoiceNotAllowed(request.id))
        );
        assert!(responder.has_pending());
        responder.resolve(request.id, Pick::A).expect("legal resolve");
        assert_eq!(worker.join().expect("worker"), Pick::A);
    }

    #[test]
    fn test_cancel_delivers_default() {
        let (requester, mut responder) = decision_channel();
        let worker = thread::spawn(move || requester.request("white", vec![Pick::A, Pick::B], Pick::B));

        let request = wait_for_request(&mut responder);
        assert_eq!(responder.cancel(request.id), Ok(Pick::B));
        assert_eq!(worker.join().expect("worker"), Pick::B);
    }

    #[test]
    fn test_dropping_responder_releases_waiter() {
        //! Teardown mid-dialog must never leave the requester blocked
        let (requester, mut responder) = decision_channel();
        let worker = thread::spawn(move || requester.request("white", vec![Pick::A, Pick::B], Pick::A));

        let _ = wait_for_request(&mut responder);
        drop(responder);
        assert_eq!(worker.join().expect("worker"), Pick::A);
    }

    #[test]
    fn test_request_after_responder_dropped_returns_default() {
        let (requester, responder) = decision_channel::<&'static str, Pick>();
        drop(responder);
        assert_eq!(requester.request("white", vec![Pick::A], Pick::A), Pick::A);
    }

    #[test]
    fn test_timeout_falls_back_to_default() {
        let (requester, _responder) = decision_channel::<&'static str, Pick>();
        let requester = requester.with_timeout(Some(Duration::from_millis(20)));

        let start = Instant::now();
        assert_eq!(requester.request("white", vec![Pick::A, Pick::B], Pick::B), Pick::B);
        assert!(start.elapsed() < LIMIT);
    }

    #[test]
    fn test_late_resolve_after_timeout_is_abandoned() {
        //! The requester already used its default; a late answer must not be
        //! reported as accepted
        let (requester, mut responder) = decision_channel();
        let requester = requester.with_timeout(Some(Duration::from_millis(200)));
        let worker = thread::spawn(move || requester.request("white", vec![Pick::A, Pick::B], Pick::A));

        let request = wait_for_request(&mut responder);
        assert_eq!(worker.join().expect("worker"), Pick::A);

        assert!(!responder.has_pending());
        assert!(responder.pending().is_empty());
        assert_eq!(
            responder.resolve(request.id, Pick::B),
            Err(HandshakeError::Abandoned(request.id))
        );
        assert_eq!(
            responder.resolve(request.id, Pick::B),
            Err(HandshakeError::UnknownRequest(request.id))
        );
    }

    #[test]
    fn test_poll_skips_requests_abandoned_while_queued() {
        let (requester, mut responder) = decision_channel::<&'static str, Pick>();
        let requester = requester.with_timeout(Some(Duration::from_millis(5)));
        assert_eq!(requester.request("white", vec![Pick::A, Pick::B], Pick::B), Pick::B);

        assert!(responder.poll().is_empty());
        assert!(!responder.has_pending());
        assert_eq!(responder.cancel_all(), 0);
    }

    #[test]
    fn test_poll_drops_requests_abandoned_after_arrival() {
        let (requester, mut responder) = decision_channel();
        let requester = requester.with_timeout(Some(Duration::from_millis(200)));
        let worker = thread::spawn(move || requester.request("black", vec![Pick::C], Pick::C));

        let request = wait_for_request(&mut responder);
        assert_eq!(worker.join().expect("worker"), Pick::C);

        assert!(responder.poll().is_empty());
        assert_eq!(
            responder.cancel(request.id),
            Err(HandshakeError::UnknownRequest(request.id))
        );
    }

    #[test]
    fn test_abort_signal_releases_waiter() {
        let (abort_tx, abort_rx) = crossbeam_channel::bounded::<()>(0);
        let (requester, mut responder) = decision_channel();
        let requester = requester.abort_on(abort_rx);
        let worker = thread::spawn(move || requester.request("white", vec![Pick::A, Pick::C], Pick::C));

        let _ = wait_for_request(&mut responder);
        drop(abort_tx);
        assert_eq!(worker.join().expect("worker"), Pick::C);
    }

    #[test]
    fn test_pending_preserves_arrival_order() {
        let (requester, mut responder) = decision_channel();
        let first = requester.clone();
        let a = thread::spawn(move || first.request("first", vec![Pick::A], Pick::A));
        let _ = wait_for_request(&mut responder);
        let b = thread::spawn(move || requester.request("second", vec![Pick::B], Pick::B));
        let _ = wait_for_request(&mut responder);

        let subjects: Vec<_> = responder.pending().iter().map(|r| r.subject).collect();
        assert_eq!(subjects, vec!["first", "second"]);

        assert_eq!(responder.cancel_all(), 2);
        assert_eq!(a.join().expect("a"), Pick::A);
        assert_eq!(b.join().expect("b"), Pick::B);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let (_requester, mut responder) = decision_channel::<&'static str, Pick>();
        let id = RequestId::new();
        assert_eq!(responder.cancel(id), Err(HandshakeError::UnknownRequest(id)));
    }
}
