use eyre::Result;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt,
    prelude::*,
    Layer, Registry,
};

/// Verbosity of the stdout log layer. Variants compare by how much they let
/// through, so `Level::Trace` is the most verbose.
#[derive(Default, Debug, Clone, Copy, serde::Deserialize, PartialOrd, Ord, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    /// Nothing is logged
    Off = 0,
    Error = 1,
    Warn = 2,
    Debug = 4,
    Trace = 5,
    /// Also used for any level name that is not recognised
    #[serde(other)]
    #[default]
    Info = 3,
}

impl Level {
    fn filter(self) -> LevelFilter {
        match self {
            Level::Off => LevelFilter::OFF,
            Level::Error => LevelFilter::ERROR,
            Level::Warn => LevelFilter::WARN,
            Level::Info => LevelFilter::INFO,
            Level::Debug => LevelFilter::DEBUG,
            Level::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format of the stdout log layer
#[derive(Default, Debug, Clone, Copy, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Style {
    /// Multi-line, human readable
    Pretty,
    /// Single line with span context
    #[default]
    Full,
    /// Single line, abbreviated
    Compact,
    /// Newline-delimited JSON
    Json,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

impl Style {
    fn layer(self) -> BoxedLayer {
        match self {
            Style::Pretty => Box::new(fmt::layer().pretty()),
            Style::Full => Box::new(fmt::layer()),
            Style::Compact => Box::new(fmt::layer().compact()),
            Style::Json => Box::new(fmt::layer().json()),
        }
    }
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct TracingConfig {
    #[serde(default)]
    pub fmt: Style,
    #[serde(default)]
    pub level: Level,
}

impl TracingConfig {
    /// Installs the global subscriber. Fails if one is already installed.
    pub fn start_tracing(&self) -> Result<()> {
        let mut target_layer = Targets::new().with_default(self.level.filter());
        if self.level < Level::Trace {
            // runtime internals are only interesting at trace level
            target_layer = target_layer
                .with_target("tokio", LevelFilter::INFO)
                .with_target("runtime", LevelFilter::INFO);
        }
        let fmt_layer = self.fmt.layer().with_filter(target_layer);
        let err_layer = tracing_error::ErrorLayer::default();

        let subscriber = Registry::default().with(fmt_layer).with(err_layer);

        subscriber.try_init()?;
        Ok(())
    }
}
