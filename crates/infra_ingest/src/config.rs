//! Record splitting configuration

use serde::Deserialize;

use core_kernel::CoreError;

/// Record splitting configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fields kept in the retained stream, in output order
    pub keys_to_retain: Vec<String>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            keys_to_retain: vec!["timestamp".to_string(), "last_price".to_string()],
        }
    }
}

impl SplitConfig {
    /// Loads configuration from `INGEST_*` environment variables
    ///
    /// `INGEST_KEYS_TO_RETAIN` is a comma-separated list.
    pub fn from_env() -> Result<Self, CoreError> {
        let config: SplitConfig = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("INGEST")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("keys_to_retain"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that at least one non-blank key is retained
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.keys_to_retain.iter().all(|k| k.trim().is_empty()) {
            return Err(CoreError::configuration("keys_to_retain cannot be empty"));
        }
        Ok(())
    }
}
