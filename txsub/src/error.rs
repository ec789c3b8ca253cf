/// Terminal outcomes, other than "proceed", that a submission waiting on a
/// [`ReleaseSlot`](crate::ReleaseSlot) can observe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// The gate was at capacity when the submission was pushed
    #[error("No more room in the submission queue")]
    NoRoom,
    /// The waiter's own deadline elapsed before the sequence matured
    #[error("Timed out waiting for the account sequence to mature")]
    Timeout,
    /// The gate was dropped while the submission was still queued
    #[error("Submission was abandoned before its sequence matured")]
    Abandoned,
}
