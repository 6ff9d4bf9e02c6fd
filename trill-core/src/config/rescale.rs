//! Rescale factors derived from device profile and resolution

use crate::config::session::{MAX_RESOLUTION_BITS, MIN_RESOLUTION_BITS};
use crate::device::DeviceProfile;
use crate::error::ConfigError;

/// Resolution at which profile size scales were measured
pub const SIZE_REFERENCE_BITS: u8 = 12;

/// Multipliers turning raw words into normalized values
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RescaleTable {
    /// Channel and button readings
    pub raw: f32,
    /// Touch location on the (vertical) axis
    pub position: f32,
    /// Touch location on the horizontal axis, two-axis devices only
    pub horizontal_position: Option<f32>,
    /// Touch size
    pub size: f32,
}

impl RescaleTable {
    /// Derive the table for `profile` scanning at `resolution_bits`
    ///
    /// Size readings grow with resolution, so the 12-bit size calibration
    /// is scaled by `2^(16 - bits) / 2^(16 - 12)`.
    pub fn derive(profile: &DeviceProfile, resolution_bits: u8) -> Result<Self, ConfigError> {
        if !(MIN_RESOLUTION_BITS..=MAX_RESOLUTION_BITS).contains(&resolution_bits) {
            return Err(ConfigError::UnsupportedResolution(resolution_bits));
        }

        let size_correction = (1u32 << (16 - resolution_bits)) as f32
            / (1u32 << (16 - SIZE_REFERENCE_BITS)) as f32;

        Ok(Self {
            raw: 1.0 / (1u32 << resolution_bits) as f32,
            position: 1.0 / profile.position_scale,
            horizontal_position: profile.horizontal_position_scale.map(|scale| 1.0 / scale),
            size: size_correction / profile.size_scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceType;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= b.abs() * 1e-6
    }

    #[test]
    fn test_reference_resolution() {
        let profile = DeviceType::Bar.profile().unwrap();
        let table = RescaleTable::derive(profile, 12).unwrap();
        assert!(close(table.raw, 1.0 / 4096.0));
        assert!(close(table.position, 1.0 / 3200.0));
        assert!(close(table.size, 1.0 / 4566.0));
        assert_eq!(table.horizontal_position, None);
    }

    #[test]
    fn test_size_follows_resolution() {
        let profile = DeviceType::Ring.profile().unwrap();
        let at_12 = RescaleTable::derive(profile, 12).unwrap();
        let at_16 = RescaleTable::derive(profile, 16).unwrap();
        let at_9 = RescaleTable::derive(profile, 9).unwrap();
        assert!(close(at_16.size, at_12.size / 16.0));
        assert!(close(at_9.size, at_12.size * 8.0));
        assert!(close(at_16.raw, 1.0 / 65536.0));
        // positions do not depend on resolution
        assert_eq!(at_9.position, at_16.position);
    }

    #[test]
    fn test_horizontal_axis() {
        let profile = DeviceType::Hex.profile().unwrap();
        let table = RescaleTable::derive(profile, 12).unwrap();
        assert!(close(table.horizontal_position.unwrap(), 1.0 / 1664.0));
        assert!(close(table.position, 1.0 / 1920.0));
    }

    #[test]
    fn test_resolution_bounds() {
        let profile = DeviceType::Square.profile().unwrap();
        assert_eq!(
            RescaleTable::derive(profile, 8),
            Err(ConfigError::UnsupportedResolution(8))
        );
        assert_eq!(
            RescaleTable::derive(profile, 17),
            Err(ConfigError::UnsupportedResolution(17))
        );
    }
}
