mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{LoggingSettings, Settings, SimulatorSettings};

/// Prefix of the environment variables read by `load_config`,
/// e.g. `PUBSIM_SIMULATOR__QUEUE_CAPACITY=500`.
pub const ENV_PREFIX: &str = "PUBSIM";

/// Loads the configuration from `config/default` (optional) and environment variables,
/// then merges whatever was found over `Settings::default()`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge_over(Settings::default()))
}

#[cfg(test)]
mod tests;
