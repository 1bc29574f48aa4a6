//! Monitor configuration defaults
//!
//! Build-time defaults for the monitor's runtime options. The `DP`
//! command serializes [`MonitorConfig::default`] with postcard and hands
//! the blob to the platform's parameter store.

use crate::tick::TickConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serialized size upper bound for a postcard-encoded [`MonitorConfig`].
pub const CONFIG_BLOB_MAX: usize = 16;

/// Runtime options with build-time defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonitorConfig {
    /// Start the HCI in interactive (echo + prompt) mode
    pub interactive_on_startup: bool,
    /// Tick sub-divider ratios
    pub tick: TickConfig,
    /// Refresh interval for the watch-data command, in milliseconds
    pub watch_interval_ms: u16,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interactive_on_startup: true,
            tick: TickConfig::default(),
            watch_interval_ms: 100,
        }
    }
}

#[cfg(feature = "serde")]
impl MonitorConfig {
    /// Encode into a postcard blob for the parameter store.
    pub fn to_blob(&self, buf: &mut [u8]) -> Result<usize, postcard::Error> {
        let used = postcard::to_slice(self, buf)?;
        Ok(used.len())
    }

    /// Decode from a postcard blob read back from the parameter store.
    pub fn from_blob(blob: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert!(config.interactive_on_startup);
        assert_eq!(config.tick.fast_ratio, 5);
        assert_eq!(config.watch_interval_ms, 100);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_blob_roundtrip() {
        let config = MonitorConfig::default();
        let mut buf = [0u8; CONFIG_BLOB_MAX];
        let len = config.to_blob(&mut buf).unwrap();
        assert!(len <= CONFIG_BLOB_MAX);
        let back = MonitorConfig::from_blob(&buf[..len]).unwrap();
        assert_eq!(back, config);
    }
}
