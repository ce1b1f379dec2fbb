//! Request generations
//!
//! Every fetch of a given kind begins a new generation. Beginning one cancels
//! the token of the previous generation, and a response may only be committed
//! while its generation is still the latest. A superseded response is dropped
//! no matter when it resolves.

use std::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct RequestGate {
    state: Mutex<GateState>,
}

#[derive(Debug)]
struct GateState {
    generation: u64,
    token: CancellationToken,
}

/// Handle of one in-flight request
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    token: CancellationToken,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once a newer generation has started (or the gate was closed)
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

impl RequestGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                generation: 0,
                token: CancellationToken::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a new generation, cancelling the previous one
    pub fn begin(&self) -> Ticket {
        let mut state = self.lock();
        state.token.cancel();
        state.generation += 1;
        state.token = CancellationToken::new();
        Ticket {
            generation: state.generation,
            token: state.token.clone(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.lock().generation == ticket.generation
    }

    /// Run `apply` only if `ticket` is still the latest generation.
    ///
    /// The check and the update happen under the gate lock, so a newer
    /// generation cannot begin in between.
    pub fn commit<F: FnOnce()>(&self, ticket: &Ticket, apply: F) -> bool {
        let state = self.lock();
        if state.generation != ticket.generation || ticket.token.is_cancelled() {
            return false;
        }
        apply();
        true
    }

    /// Cancel whatever is in flight without starting a new generation
    pub fn close(&self) {
        self.lock().token.cancel();
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_generation_supersedes_older() {
        let gate = RequestGate::new();
        let first = gate.begin();
        let second = gate.begin();

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(!gate.is_current(&first));

        let mut applied = Vec::new();
        assert!(!gate.commit(&first, || applied.push(1)));
        assert!(gate.commit(&second, || applied.push(2)));
        assert_eq!(applied, vec![2]);
        assert_eq!(gate.generation(), 2);
    }

    #[test]
    fn closed_gate_commits_nothing() {
        let gate = RequestGate::new();
        let ticket = gate.begin();
        gate.close();
        assert!(ticket.is_cancelled());
        assert!(!gate.commit(&ticket, || panic!("must not apply")));
    }

    #[tokio::test]
    async fn cancelled_future_resolves_when_superseded() {
        let gate = RequestGate::new();
        let ticket = gate.begin();
        let waiter = tokio::spawn({
            let ticket = ticket.clone();
            async move { ticket.cancelled().await }
        });
        gate.begin();
        waiter.await.unwrap();
    }
}
