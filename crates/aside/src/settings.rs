use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for the navigator, stored under the `aside` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsideSettings {
    /// How long the lock stays engaged after the main page is rebuilt.
    pub settle_delay_ms: u64,
}

impl AsideSettings {
    pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for AsideSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: Self::DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl settings::Settings for AsideSettings {
    const SECTION: &'static str = "aside";
}
