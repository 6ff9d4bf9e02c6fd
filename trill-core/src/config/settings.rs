//! Serializable session settings
//!
//! With the `toml` feature, settings can be read from a document such as:
//! ```toml
//! device = "ring"
//! mode = "diff"
//! resolution_bits = 12
//! transmission_width = 12
//! transmission_shift = 0
//! channel_mask = 0x3FFFFFFF
//! ```
//! Omitted keys keep their defaults. Validation happens in
//! [`SessionConfig::from_settings`](crate::SessionConfig::from_settings).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::session::DEFAULT_RESOLUTION_BITS;
use crate::device::{DeviceType, Mode};
#[cfg(feature = "toml")]
use crate::error::ConfigError;

/// Unvalidated session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionSettings {
    /// Device type
    pub device: DeviceType,
    /// Acquisition mode (`Auto` selects the device default)
    pub mode: Mode,
    /// Scan resolution in bits (9-16)
    pub resolution_bits: u8,
    /// Channel value width on the wire (8, 12 or 16)
    pub transmission_width: u8,
    /// Right shift applied before transmission
    pub transmission_shift: u8,
    /// Channel selection bitset
    pub channel_mask: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            device: DeviceType::None,
            mode: Mode::Auto,
            resolution_bits: DEFAULT_RESOLUTION_BITS,
            transmission_width: 16,
            transmission_shift: 0,
            channel_mask: u32::MAX,
        }
    }
}

impl SessionSettings {
    /// Default settings for `device`
    pub fn for_device(device: DeviceType) -> Self {
        Self {
            device,
            ..Self::default()
        }
    }

    /// Parse settings from a TOML document
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|_| ConfigError::InvalidSettings)
    }
}
