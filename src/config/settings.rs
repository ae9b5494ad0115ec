use serde::Deserialize;

/// Top-level configuration settings for the simulator host.
///
/// Includes the simulator limits and the logging level.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub simulator: SimulatorSettings,
    pub logging: LoggingSettings,
}

/// Limits and defaults applied by the simulator.
///
/// `batch_timeout_ms` is stored for parity with real brokers but never read
/// by the simulator, which publishes batches synchronously.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorSettings {
    pub queue_capacity: usize,
    pub max_message_size: usize,
    pub max_batch_size: usize,
    pub dead_letter_capacity: usize,
    pub retention_seconds: u64,
    pub ack_deadline_seconds: u64,
    pub batch_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled in from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub simulator: Option<PartialSimulatorSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSimulatorSettings {
    pub queue_capacity: Option<usize>,
    pub max_message_size: Option<usize>,
    pub max_batch_size: Option<usize>,
    pub dead_letter_capacity: Option<usize>,
    pub retention_seconds: Option<u64>,
    pub ack_deadline_seconds: Option<u64>,
    pub batch_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 10_000,
            max_message_size: 10 * 1024 * 1024,
            max_batch_size: 100,
            dead_letter_capacity: 1000,
            retention_seconds: 604_800,
            ack_deadline_seconds: 60,
            batch_timeout_ms: 1000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Provides default values for `Settings`.
impl Default for Settings {
    fn default() -> Self {
        Self {
            simulator: SimulatorSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl PartialSettings {
    /// Overlay whatever was provided on top of `default`.
    pub fn merge_over(self, default: Settings) -> Settings {
        let sim = self.simulator;
        let d = default.simulator;

        Settings {
            simulator: SimulatorSettings {
                queue_capacity: sim
                    .as_ref()
                    .and_then(|s| s.queue_capacity)
                    .unwrap_or(d.queue_capacity),
                max_message_size: sim
                    .as_ref()
                    .and_then(|s| s.max_message_size)
                    .unwrap_or(d.max_message_size),
                max_batch_size: sim
                    .as_ref()
                    .and_then(|s| s.max_batch_size)
                    .unwrap_or(d.max_batch_size),
                dead_letter_capacity: sim
                    .as_ref()
                    .and_then(|s| s.dead_letter_capacity)
                    .unwrap_or(d.dead_letter_capacity),
                retention_seconds: sim
                    .as_ref()
                    .and_then(|s| s.retention_seconds)
                    .unwrap_or(d.retention_seconds),
                ack_deadline_seconds: sim
                    .as_ref()
                    .and_then(|s| s.ack_deadline_seconds)
                    .unwrap_or(d.ack_deadline_seconds),
                batch_timeout_ms: sim
                    .as_ref()
                    .and_then(|s| s.batch_timeout_ms)
                    .unwrap_or(d.batch_timeout_ms),
            },
            logging: LoggingSettings {
                level: self
                    .logging
                    .and_then(|l| l.level)
                    .unwrap_or(default.logging.level),
            },
        }
    }
}
