use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::SequenceError;

/// What a waiter eventually reads from its [`ReleaseSlot`]. `Ok(())` means
/// the requested sequence is now the account's next valid one.
pub type ReleaseOutcome = Result<(), SequenceError>;

/// A submission waiting for its sequence to mature. The owning
/// `AddressQueue` is keyed by account, so the entry only keeps what release needs.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) sequence: u64,
    slot: oneshot::Sender<ReleaseOutcome>,
}

impl Entry {
    pub(crate) fn new(sequence: u64) -> (Self, ReleaseSlot) {
        let (slot, receiver) = oneshot::channel();
        (
            Self { sequence, slot },
            ReleaseSlot {
                state: SlotState::Waiting(receiver),
            },
        )
    }

    /// Writes "proceed" into the slot. The waiter may have given up already,
    /// in which case the outcome is discarded.
    pub(crate) fn release(self) {
        let _ = self.slot.send(Ok(()));
    }
}

/// Read side of a submission's single-use result slot.
///
/// Await it (optionally through [`ReleaseSlot::wait_timeout`]) to learn when
/// the submission may proceed. Dropping the slot cancels the wait but does
/// not remove the submission from the gate. Once an outcome has been read,
/// every further read or await yields that same outcome.
#[derive(Debug)]
pub struct ReleaseSlot {
    state: SlotState,
}

#[derive(Debug)]
enum SlotState {
    Waiting(oneshot::Receiver<ReleaseOutcome>),
    Settled(ReleaseOutcome),
}

impl ReleaseSlot {
    /// A slot that already holds `err`.
    pub(crate) fn resolved(err: SequenceError) -> Self {
        Self {
            state: SlotState::Settled(Err(err)),
        }
    }

    fn settle(&mut self, outcome: ReleaseOutcome) -> ReleaseOutcome {
        self.state = SlotState::Settled(outcome.clone());
        outcome
    }

    /// Non-blocking read. `None` while the submission is still queued.
    pub fn try_outcome(&mut self) -> Option<ReleaseOutcome> {
        let received = match &mut self.state {
            SlotState::Settled(outcome) => return Some(outcome.clone()),
            SlotState::Waiting(receiver) => match receiver.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => Err(SequenceError::Abandoned),
            },
        };
        Some(self.settle(received))
    }

    /// Waits for the outcome, giving up with [`SequenceError::Timeout`] after `timeout`.
    pub async fn wait_timeout(self, timeout: Duration) -> ReleaseOutcome {
        tokio::time::timeout(timeout, self)
            .await
            .unwrap_or(Err(SequenceError::Timeout))
    }
}

impl Future for ReleaseSlot {
    type Output = ReleaseOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let received = match &mut self.state {
            SlotState::Settled(outcome) => return Poll::Ready(outcome.clone()),
            // the spent receiver is never polled again once settled
            SlotState::Waiting(receiver) => match Pin::new(receiver).poll(cx) {
                Poll::Ready(received) => received.unwrap_or(Err(SequenceError::Abandoned)),
                Poll::Pending => return Poll::Pending,
            },
        };
        Poll::Ready(self.settle(received))
    }
}
