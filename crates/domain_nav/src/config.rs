//! NAV engine configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::CoreError;

use crate::{DEFAULT_BASE_NAV, NAV_DISPLAY_PRECISION};

/// NAV engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// NAV reported on the first relevant date
    pub base_nav: Decimal,
    /// Decimal places used when rounding a series for display
    pub display_precision: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            base_nav: DEFAULT_BASE_NAV,
            display_precision: NAV_DISPLAY_PRECISION,
        }
    }
}

impl NavConfig {
    /// Loads configuration from `PFNAV_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, CoreError> {
        let config: NavConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("PFNAV"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Sets the base NAV
    pub fn with_base_nav(mut self, base_nav: Decimal) -> Self {
        self.base_nav = base_nav;
        self
    }

    /// Sets the display precision
    pub fn with_display_precision(mut self, dp: u32) -> Self {
        self.display_precision = dp;
        self
    }

    /// Checks that the base NAV is positive
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_nav <= Decimal::ZERO {
            return Err(CoreError::configuration(format!(
                "base_nav must be positive, got {}",
                self.base_nav
            )));
        }
        Ok(())
    }
}
