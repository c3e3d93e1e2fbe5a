//! # Ledger State
//!
//! The single in-memory store, shared by every command.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► dispatch(op)                                               │
//! │               │  lock                                                   │
//! │               ▼                                                         │
//! │          sole_core::apply(&current, op, env)                            │
//! │               │                                                         │
//! │        Ok ────┴──── Err                                                 │
//! │        │             │                                                  │
//! │        ▼             ▼                                                  │
//! │  swap in new    keep current, return error                              │
//! │  snapshot                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is held for the whole transition, so operations are applied
//! one at a time in arrival order.

use std::sync::{Arc, Mutex};

use sole_core::{apply, CoreResult, LedgerEnv, Operation, StoreState, SystemEnv, Transition};

#[derive(Debug)]
pub struct LedgerState {
    store: Arc<Mutex<StoreState>>,
}

impl LedgerState {
    pub fn new(initial: StoreState) -> Self {
        LedgerState {
            store: Arc::new(Mutex::new(initial)),
        }
    }

    /// Executes a function with read access to the current snapshot.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&StoreState) -> R,
    {
        let store = self.store.lock().expect("Ledger mutex poisoned");
        f(&store)
    }

    /// Clone of the current snapshot.
    pub fn snapshot(&self) -> StoreState {
        self.with_state(|s| s.clone())
    }

    /// Applies an operation with fresh UUIDs and the system clock.
    pub fn dispatch(&self, op: Operation) -> CoreResult<Transition> {
        self.dispatch_with(op, &mut SystemEnv)
    }

    /// Applies an operation with the given environment.
    ///
    /// The returned transition carries a copy of the new snapshot.
    pub fn dispatch_with(&self, op: Operation, env: &mut impl LedgerEnv) -> CoreResult<Transition> {
        let mut store = self.store.lock().expect("Ledger mutex poisoned");
        let transition = apply(&store, op, env)?;
        *store = transition.state.clone();
        Ok(transition)
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(StoreState::default())
    }
}
