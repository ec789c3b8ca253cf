use std::mem;

use super::entry::Entry;

/// Pending entries of a single account, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct AddressQueue {
    entries: Vec<Entry>,
}

impl AddressQueue {
    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn sequences(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.sequence).collect()
    }

    /// Releases every entry whose sequence is exactly `current + 1` and
    /// returns how many were released. Everything else, including entries
    /// already behind `current + 1`, stays queued in its original order.
    pub(crate) fn release_ready(&mut self, current: u64) -> usize {
        let Some(ready) = current.checked_add(1) else {
            return 0;
        };
        if !self.entries.iter().any(|entry| entry.sequence == ready) {
            return 0;
        }

        let (matured, pending): (Vec<_>, Vec<_>) = mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.sequence == ready);
        self.entries = pending;

        let released = matured.len();
        matured.into_iter().for_each(Entry::release);
        released
    }
}

#[cfg(test)]
mod tests;
