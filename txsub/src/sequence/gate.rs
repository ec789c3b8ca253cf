use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use parking_lot::Mutex;

use crate::SequenceError;

use super::entry::{Entry, ReleaseSlot};
use super::queue::AddressQueue;

/// Capacity used when none is configured.
pub const DEFAULT_MAX_SIZE: usize = 1024;

#[derive(Debug, Default)]
struct GateState {
    queues: HashMap<String, AddressQueue>,
    // always the sum of all queue lengths
    size: usize,
}

/// Holds submissions until the account sequence they intend to consume
/// becomes the account's next valid one.
///
/// Producers call [`push`](Self::push) from any number of tasks; the
/// ledger-close watcher calls [`update`](Self::update). Both take the same
/// lock, which is never held across an await point or while running caller
/// code. The gate is shared by `Arc`, it is not a global.
#[derive(Debug)]
pub struct SequenceGate {
    state: Mutex<GateState>,
    max_size: usize,
}

impl Default for SequenceGate {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SequenceGate {
    /// Creates a gate holding at most `max_size` pending submissions
    /// ([`DEFAULT_MAX_SIZE`] if `None`).
    pub fn new(max_size: Option<usize>) -> Self {
        Self {
            state: Mutex::new(GateState::default()),
            max_size: max_size.unwrap_or(DEFAULT_MAX_SIZE),
        }
    }

    /// Registers the intent to consume `sequence` for `account`.
    ///
    /// Never blocks. When the gate is full the returned slot already holds
    /// [`SequenceError::NoRoom`] and nothing is enqueued. Pushing the same
    /// account and sequence twice yields two independent submissions.
    pub fn push(&self, account: &str, sequence: u64) -> ReleaseSlot {
        let mut state = self.state.lock();
        if state.size >= self.max_size {
            return ReleaseSlot::resolved(SequenceError::NoRoom);
        }

        let (entry, slot) = Entry::new(sequence);
        state
            .queues
            .entry(account.to_owned())
            .or_default()
            .push(entry);
        state.size = state.size.saturating_add(1);
        slot
    }

    /// Applies the latest known sequence of each account in `current_sequences`.
    ///
    /// Every submission whose sequence equals `current + 1` is released with
    /// "proceed". Accounts not present in `current_sequences` are left alone.
    /// Returns the number of submissions released.
    pub fn update(&self, current_sequences: &HashMap<String, u64>) -> usize {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let mut released_total: usize = 0;
        for (account, current) in current_sequences {
            let Some(queue) = state.queues.get_mut(account) else {
                continue;
            };

            let released = queue.release_ready(*current);
            if queue.is_empty() {
                state.queues.remove(account);
            }
            state.size = state.size.saturating_sub(released);
            released_total = released_total.saturating_add(released);
        }
        released_total
    }

    /// Total number of pending submissions across all accounts.
    pub fn size(&self) -> usize {
        self.state.lock().size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Accounts that currently have at least one pending submission.
    pub fn addresses(&self) -> Vec<String> {
        self.state.lock().queues.keys().cloned().collect()
    }

    /// Sequences queued for `account` in insertion order, `None` if the
    /// account has nothing pending.
    pub fn pending_sequences(&self, account: &str) -> Option<Vec<u64>> {
        self.state
            .lock()
            .queues
            .get(account)
            .map(AddressQueue::sequences)
    }
}

impl fmt::Display for SequenceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        let accounts = state
            .queues
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(account, queue)| format!("{account}: {}", queue.len()))
            .join(", ");
        write!(
            f,
            "SequenceGate {{ size: {}, max_size: {}, accounts: [{accounts}] }}",
            state.size, self.max_size
        )
    }
}
