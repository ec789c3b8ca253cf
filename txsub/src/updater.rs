use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::{SequenceGate, TxSubMetrics};

/// Source of authoritative account sequence numbers, typically the ingested
/// ledger state as of the last ledger close.
#[async_trait]
pub trait AccountSequenceProvider: Send + Sync {
    /// Current sequence of each of `accounts`. Accounts the provider knows
    /// nothing about may be missing from the result.
    async fn get_sequence_numbers(&self, accounts: &[String])
        -> eyre::Result<HashMap<String, u64>>;
}

/// Feeds the [`SequenceGate`] with current account sequences once per tick.
pub struct SequenceUpdater {
    gate: Arc<SequenceGate>,
    provider: Arc<dyn AccountSequenceProvider>,
    tick_interval: Duration,
    metrics: TxSubMetrics,
    tick_lock: Arc<Mutex<()>>,
    task: Option<JoinHandle<()>>,
}

impl SequenceUpdater {
    pub fn new(
        gate: Arc<SequenceGate>,
        provider: Arc<dyn AccountSequenceProvider>,
        tick_interval: Duration,
        metrics: TxSubMetrics,
    ) -> Self {
        Self {
            gate,
            provider,
            tick_interval,
            metrics,
            tick_lock: Arc::new(Mutex::new(())),
            task: None,
        }
    }

    /// Spawns the periodic tick loop. Calling it again replaces the running loop.
    pub fn run(&mut self) {
        let gate = self.gate.clone();
        let provider = self.provider.clone();
        let tick_interval = self.tick_interval;
        let metrics = self.metrics.clone();
        let tick_lock = self.tick_lock.clone();
        let task = tokio::spawn(
            async move {
                loop {
                    Self::tick_once(&gate, &provider, &metrics, &tick_lock).await;
                    sleep(tick_interval).await;
                }
            }
            .instrument(info_span!("SequenceUpdater")),
        );

        if let Some(previous) = self.task.replace(task) {
            previous.abort();
        }
    }

    /// Runs a single tick right away, e.g. on a ledger close notification.
    /// Returns the number of submissions released.
    pub async fn tick(&self) -> usize {
        Self::tick_once(&self.gate, &self.provider, &self.metrics, &self.tick_lock).await
    }

    async fn tick_once(
        gate: &SequenceGate,
        provider: &Arc<dyn AccountSequenceProvider>,
        metrics: &TxSubMetrics,
        tick_lock: &Mutex<()>,
    ) -> usize {
        let Ok(_guard) = tick_lock.try_lock() else {
            info!("Ticking in progress");
            return 0;
        };

        debug!(queued = %gate, "Ticking sequence gate");

        let accounts = gate.addresses();
        let released = if accounts.is_empty() {
            0
        } else {
            match provider.get_sequence_numbers(&accounts).await {
                Ok(current_sequences) => {
                    for account in accounts.iter() {
                        if !current_sequences.contains_key(account) {
                            warn!(?account, "Missing sequence number for account");
                        }
                    }
                    Self::release(gate, metrics, &current_sequences)
                }
                Err(err) => {
                    warn!(?err, "Cannot fetch sequence numbers");
                    metrics.update_sequence_fetch_failures_metric();
                    0
                }
            }
        };

        metrics.update_buffered_submissions_metric(gate.size());
        metrics.update_liveness_metric();
        released
    }

    fn release(
        gate: &SequenceGate,
        metrics: &TxSubMetrics,
        current_sequences: &HashMap<String, u64>,
    ) -> usize {
        let released = gate.update(current_sequences);
        if released > 0 {
            debug!(released, "Released submissions with matured sequences");
            metrics.update_released_submissions_metric(released);
        }
        released
    }
}

impl Drop for SequenceUpdater {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
