//! Sequence arbitration for transaction submission.
//!
//! Submitters [`push`](SequenceGate::push) the sequence number they intend to
//! use for an account and wait on the returned [`ReleaseSlot`]. A
//! [`SequenceUpdater`] feeds the gate the authoritative account sequences on
//! every ledger close, which releases every submission whose sequence is now
//! the account's next valid one.

#![deny(clippy::unwrap_used, clippy::panic)]
#![deny(clippy::arithmetic_side_effects)]

pub use error::SequenceError;
pub use metrics::TxSubMetrics;
pub use sequence::{ReleaseOutcome, ReleaseSlot, SequenceGate, DEFAULT_MAX_SIZE};
pub use settings::{Level, Style, TracingConfig, TxSubSettings};
pub use updater::{AccountSequenceProvider, SequenceUpdater};

mod error;
mod metrics;
mod sequence;
mod settings;
mod updater;
