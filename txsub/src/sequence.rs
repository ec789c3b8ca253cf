pub use entry::{ReleaseOutcome, ReleaseSlot};
pub use gate::{SequenceGate, DEFAULT_MAX_SIZE};

mod entry;
mod gate;
mod queue;
