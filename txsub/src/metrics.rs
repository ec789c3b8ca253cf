use std::time::UNIX_EPOCH;

use prometheus::{
    opts, register_int_counter_with_registry, register_int_gauge_with_registry, Encoder,
    IntCounter, IntGauge, Registry,
};

const METRICS_NAMESPACE: &str = "txsub";

fn namespaced(name: &str) -> String {
    format!("{}_{}", METRICS_NAMESPACE, name)
}

/// Metrics published by the sequence updater
#[derive(Clone)]
pub struct TxSubMetrics {
    /// Metrics registry for adding new metrics and gathering reports
    registry: Registry,
    /// Submissions waiting in the sequence gate after the last tick
    pub buffered_submissions: IntGauge,
    /// Submissions released because their sequence became the next valid one
    pub released_submissions: IntCounter,
    /// Ticks where the current account sequences could not be fetched
    pub sequence_fetch_failures: IntCounter,
    /// Seconds since the epoch at the end of the last tick
    pub updater_liveness: IntGauge,
}

impl TxSubMetrics {
    pub fn new(registry: Registry) -> eyre::Result<Self> {
        let buffered_submissions = register_int_gauge_with_registry!(
            opts!(
                namespaced("buffered_submissions"),
                "The number of submissions buffered behind the sequence gate",
            ),
            registry.clone()
        )?;
        let released_submissions = register_int_counter_with_registry!(
            opts!(
                namespaced("released_submissions"),
                "The number of submissions released because their sequence matured",
            ),
            registry.clone()
        )?;
        let sequence_fetch_failures = register_int_counter_with_registry!(
            opts!(
                namespaced("sequence_fetch_failures"),
                "The number of times current account sequences could not be fetched",
            ),
            registry.clone()
        )?;
        let updater_liveness = register_int_gauge_with_registry!(
            opts!(
                namespaced("updater_liveness"),
                "The liveness of the sequence updater, expressed as a timestamp since the epoch",
            ),
            registry.clone()
        )?;
        Ok(Self {
            registry,
            buffered_submissions,
            released_submissions,
            sequence_fetch_failures,
            updater_liveness,
        })
    }

    pub fn update_liveness_metric(&self) {
        self.updater_liveness.set(
            UNIX_EPOCH
                .elapsed()
                .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
                .unwrap_or(0),
        );
    }

    pub fn update_buffered_submissions_metric(&self, size: usize) {
        self.buffered_submissions
            .set(i64::try_from(size).unwrap_or(i64::MAX));
    }

    pub fn update_released_submissions_metric(&self, released: usize) {
        self.released_submissions
            .inc_by(u64::try_from(released).unwrap_or(u64::MAX));
    }

    pub fn update_sequence_fetch_failures_metric(&self) {
        self.sequence_fetch_failures.inc();
    }

    pub fn gather(&self) -> prometheus::Result<Vec<u8>> {
        let collected_metrics = self.registry.gather();
        let mut out_buf = Vec::with_capacity(1024 * 64);
        let encoder = prometheus::TextEncoder::new();
        encoder.encode(&collected_metrics, &mut out_buf)?;
        Ok(out_buf)
    }

    #[cfg(test)]
    pub fn dummy_instance() -> Self {
        let registry = Registry::new();
        let instance = Self::new(registry);
        instance.unwrap()
    }
}
