//! Error types

use trill_protocol::WireError;

/// Errors raised while building or changing a session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Device type has no profile (none, unknown or unrecognized id)
    UnknownDevice,
    /// Resolution outside 9..=16 bits
    UnsupportedResolution(u8),
    /// Transmission width other than 8, 12 or 16 bits
    UnsupportedWidth(u8),
    /// Transmission right shift larger than a channel value
    ShiftOutOfRange(u8),
    /// Settings document could not be parsed
    InvalidSettings,
}

impl From<WireError> for ConfigError {
    fn from(e: WireError) -> Self {
        match e {
            WireError::UnsupportedWidth(bits) => ConfigError::UnsupportedWidth(bits),
            _ => ConfigError::InvalidSettings,
        }
    }
}

/// Errors raised while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Buffer holds fewer bytes than the configuration requires
    Truncated {
        /// Bytes required by the session configuration
        expected: usize,
        /// Bytes available
        actual: usize,
    },
    /// Session has no device geometry to decode against
    NoDevice,
}
