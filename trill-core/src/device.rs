//! Device types, acquisition modes and per-device profiles
//!
//! Profiles are compile-time constants selected by an exhaustive match, so
//! a new device type cannot be added without choosing its geometry and
//! calibration.

use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use trill_protocol::{
    CENTROID_LEN_1D, CENTROID_LEN_2D, CENTROID_LEN_RING, MAX_TOUCHES_1D, MAX_TOUCHES_2D,
};

use crate::error::ConfigError;

/// Largest channel count of any device
pub const MAX_CHANNELS: usize = 30;

/// Noise threshold set up on every device except the flex
pub const DEFAULT_NOISE_THRESHOLD: f32 = 0x28 as f32 / 4096.0;

/// Trill device type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceType {
    /// No device attached
    #[default]
    None,
    /// Device answered but did not identify as a known type
    Unknown,
    Bar,
    Square,
    Craft,
    Ring,
    Hex,
    Flex,
}

impl DeviceType {
    /// Frame layout class of this device
    pub const fn geometry(self) -> Geometry {
        match self {
            DeviceType::Bar | DeviceType::Craft | DeviceType::Flex => Geometry::OneAxis,
            DeviceType::Square | DeviceType::Hex => Geometry::TwoAxis,
            DeviceType::Ring => Geometry::RingWithButtons,
            DeviceType::None | DeviceType::Unknown => Geometry::None,
        }
    }

    /// Profile of this device
    pub fn profile(self) -> Result<&'static DeviceProfile, ConfigError> {
        DeviceProfile::of(self)
    }

    /// Type id reported by the device firmware
    pub const fn wire_id(self) -> Option<u8> {
        match self {
            DeviceType::None => None,
            DeviceType::Unknown => Some(0),
            DeviceType::Bar => Some(1),
            DeviceType::Square => Some(2),
            DeviceType::Craft => Some(3),
            DeviceType::Ring => Some(4),
            DeviceType::Hex => Some(5),
            DeviceType::Flex => Some(6),
        }
    }
}

impl TryFrom<u8> for DeviceType {
    type Error = ConfigError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(DeviceType::Unknown),
            1 => Ok(DeviceType::Bar),
            2 => Ok(DeviceType::Square),
            3 => Ok(DeviceType::Craft),
            4 => Ok(DeviceType::Ring),
            5 => Ok(DeviceType::Hex),
            6 => Ok(DeviceType::Flex),
            _ => Err(ConfigError::UnknownDevice),
        }
    }
}

/// Acquisition mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Use the device's default mode
    #[default]
    Auto,
    /// Device computes touch locations and sizes
    Centroid,
    /// Raw channel readings
    Raw,
    /// Baseline channel readings
    Baseline,
    /// Raw minus baseline
    Diff,
}

impl Mode {
    /// Mode id understood by the device firmware
    ///
    /// `Auto` is resolved on the host and has no id.
    pub const fn wire_id(self) -> Option<u8> {
        match self {
            Mode::Auto => None,
            Mode::Centroid => Some(0),
            Mode::Raw => Some(1),
            Mode::Baseline => Some(2),
            Mode::Diff => Some(3),
        }
    }

    /// Display name of the mode
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Auto => "Auto",
            Mode::Centroid => "Centroid",
            Mode::Raw => "Raw",
            Mode::Baseline => "Baseline",
            Mode::Diff => "Diff",
        }
    }

    /// Replace `Auto` with the default mode of `profile`
    pub fn resolve(self, profile: &DeviceProfile) -> Mode {
        match self {
            Mode::Auto => profile.default_mode,
            mode => mode,
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = ConfigError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Mode::Centroid),
            1 => Ok(Mode::Raw),
            2 => Ok(Mode::Baseline),
            3 => Ok(Mode::Diff),
            _ => Err(ConfigError::InvalidSettings),
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    /// Parse a mode name, ignoring ASCII case
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [Mode::Auto, Mode::Centroid, Mode::Raw, Mode::Baseline, Mode::Diff]
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
            .ok_or(ConfigError::InvalidSettings)
    }
}

/// Frame layout class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Geometry {
    /// Single measurement axis (bar, craft, flex)
    OneAxis,
    /// Independent vertical and horizontal axes (square, hex)
    TwoAxis,
    /// Single circular axis plus two buttons (ring)
    RingWithButtons,
    /// No device
    None,
}

impl Geometry {
    /// Touch slots per axis in centroid frames
    pub const fn max_touches(self) -> usize {
        match self {
            Geometry::OneAxis | Geometry::RingWithButtons => MAX_TOUCHES_1D,
            Geometry::TwoAxis => MAX_TOUCHES_2D,
            Geometry::None => 0,
        }
    }

    /// Centroid payload length, excluding the status byte
    pub const fn centroid_len(self) -> usize {
        match self {
            Geometry::OneAxis => CENTROID_LEN_1D,
            Geometry::RingWithButtons => CENTROID_LEN_RING,
            Geometry::TwoAxis => CENTROID_LEN_2D,
            Geometry::None => 0,
        }
    }
}

/// Immutable per-device constants
///
/// Position and size scales are the raw values that map to 1.0. Size
/// scales were measured at 12-bit resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceProfile {
    /// Device this profile describes
    pub device: DeviceType,
    /// Frame layout class
    pub geometry: Geometry,
    /// Channels scanned after setup
    pub default_channels: u8,
    /// Channels the firmware can address
    pub max_channels: u8,
    /// Raw location at the end of the (vertical) axis
    pub position_scale: f32,
    /// Raw location at the end of the horizontal axis, if there is one
    pub horizontal_position_scale: Option<f32>,
    /// Raw size of a full touch at 12-bit resolution
    pub size_scale: f32,
    /// Mode selected by `Mode::Auto`
    pub default_mode: Mode,
    /// Noise threshold configured during setup, as a fraction of full scale
    pub default_noise_threshold: f32,
}

const BAR: DeviceProfile = DeviceProfile {
    device: DeviceType::Bar,
    geometry: Geometry::OneAxis,
    default_channels: 26,
    max_channels: MAX_CHANNELS as u8,
    position_scale: 3200.0,
    horizontal_position_scale: None,
    size_scale: 4566.0,
    default_mode: Mode::Centroid,
    default_noise_threshold: DEFAULT_NOISE_THRESHOLD,
};

const SQUARE: DeviceProfile = DeviceProfile {
    device: DeviceType::Square,
    geometry: Geometry::TwoAxis,
    default_channels: 30,
    max_channels: MAX_CHANNELS as u8,
    position_scale: 1792.0,
    horizontal_position_scale: Some(1792.0),
    size_scale: 3780.0,
    default_mode: Mode::Centroid,
    default_noise_threshold: DEFAULT_NOISE_THRESHOLD,
};

const CRAFT: DeviceProfile = DeviceProfile {
    device: DeviceType::Craft,
    geometry: Geometry::OneAxis,
    default_channels: 30,
    max_channels: MAX_CHANNELS as u8,
    position_scale: 4096.0,
    horizontal_position_scale: None,
    size_scale: 1.0,
    default_mode: Mode::Diff,
    default_noise_threshold: DEFAULT_NOISE_THRESHOLD,
};

const RING: DeviceProfile = DeviceProfile {
    device: DeviceType::Ring,
    geometry: Geometry::RingWithButtons,
    default_channels: 30,
    max_channels: MAX_CHANNELS as u8,
    position_scale: 3584.0,
    horizontal_position_scale: None,
    size_scale: 5000.0,
    default_mode: Mode::Centroid,
    default_noise_threshold: DEFAULT_NOISE_THRESHOLD,
};

const HEX: DeviceProfile = DeviceProfile {
    device: DeviceType::Hex,
    geometry: Geometry::TwoAxis,
    default_channels: 30,
    max_channels: MAX_CHANNELS as u8,
    position_scale: 1920.0,
    horizontal_position_scale: Some(1664.0),
    size_scale: 4000.0,
    default_mode: Mode::Centroid,
    default_noise_threshold: DEFAULT_NOISE_THRESHOLD,
};

const FLEX: DeviceProfile = DeviceProfile {
    device: DeviceType::Flex,
    geometry: Geometry::OneAxis,
    default_channels: 30,
    max_channels: MAX_CHANNELS as u8,
    position_scale: 3712.0,
    horizontal_position_scale: None,
    size_scale: 1200.0,
    default_mode: Mode::Centroid,
    default_noise_threshold: 0.03,
};

impl DeviceProfile {
    /// Look up the profile of `device`
    ///
    /// `None` and `Unknown` have no calibration and are rejected.
    pub fn of(device: DeviceType) -> Result<&'static DeviceProfile, ConfigError> {
        match device {
            DeviceType::Bar => Ok(&BAR),
            DeviceType::Square => Ok(&SQUARE),
            DeviceType::Craft => Ok(&CRAFT),
            DeviceType::Ring => Ok(&RING),
            DeviceType::Hex => Ok(&HEX),
            DeviceType::Flex => Ok(&FLEX),
            DeviceType::None | DeviceType::Unknown => Err(ConfigError::UnknownDevice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DeviceType; 6] = [
        DeviceType::Bar,
        DeviceType::Square,
        DeviceType::Craft,
        DeviceType::Ring,
        DeviceType::Hex,
        DeviceType::Flex,
    ];

    #[test]
    fn test_no_profile_without_device() {
        assert_eq!(DeviceProfile::of(DeviceType::None), Err(ConfigError::UnknownDevice));
        assert_eq!(DeviceProfile::of(DeviceType::Unknown), Err(ConfigError::UnknownDevice));
    }

    #[test]
    fn test_profiles_are_decode_capable() {
        for device in ALL {
            let profile = DeviceProfile::of(device).unwrap();
            assert_eq!(profile.device, device);
            assert_eq!(profile.geometry, device.geometry());
            assert!(profile.position_scale > 0.0);
            assert!(profile.size_scale > 0.0);
            assert!(profile.default_channels <= profile.max_channels);
            assert_ne!(profile.default_mode, Mode::Auto);
            // only two-axis devices have a horizontal axis
            assert_eq!(
                profile.horizontal_position_scale.is_some(),
                profile.geometry == Geometry::TwoAxis
            );
        }
    }

    #[test]
    fn test_wire_ids() {
        for device in ALL {
            let id = device.wire_id().unwrap();
            assert_eq!(DeviceType::try_from(id), Ok(device));
        }
        assert_eq!(DeviceType::try_from(0), Ok(DeviceType::Unknown));
        assert_eq!(DeviceType::try_from(7), Err(ConfigError::UnknownDevice));
        assert_eq!(DeviceType::None.wire_id(), None);
    }

    #[test]
    fn test_auto_resolves_to_device_default() {
        let craft = DeviceProfile::of(DeviceType::Craft).unwrap();
        let bar = DeviceProfile::of(DeviceType::Bar).unwrap();
        assert_eq!(Mode::Auto.resolve(craft), Mode::Diff);
        assert_eq!(Mode::Auto.resolve(bar), Mode::Centroid);
        assert_eq!(Mode::Raw.resolve(bar), Mode::Raw);
    }

    #[test]
    fn test_geometry_lengths() {
        assert_eq!(DeviceType::Bar.geometry().centroid_len(), 20);
        assert_eq!(DeviceType::Flex.geometry().centroid_len(), 20);
        assert_eq!(DeviceType::Ring.geometry().centroid_len(), 24);
        assert_eq!(DeviceType::Square.geometry().centroid_len(), 32);
        assert_eq!(DeviceType::Hex.geometry().max_touches(), 4);
        assert_eq!(DeviceType::Ring.geometry().max_touches(), 5);
    }

    #[test]
    fn test_mode_names() {
        for mode in [Mode::Auto, Mode::Centroid, Mode::Raw, Mode::Baseline, Mode::Diff] {
            assert_eq!(mode.name().parse::<Mode>(), Ok(mode));
        }
        assert_eq!(Mode::Baseline.name(), "Baseline");
        assert_eq!("diff".parse::<Mode>(), Ok(Mode::Diff));
        assert_eq!("CENTROID".parse::<Mode>(), Ok(Mode::Centroid));
        assert_eq!("differential".parse::<Mode>(), Err(ConfigError::InvalidSettings));
        assert_eq!("".parse::<Mode>(), Err(ConfigError::InvalidSettings));
    }

    #[test]
    fn test_noise_thresholds() {
        for device in ALL {
            let profile = DeviceProfile::of(device).unwrap();
            let expected = match device {
                DeviceType::Flex => 0.03,
                _ => 40.0 / 4096.0,
            };
            assert!((profile.default_noise_threshold - expected).abs() < 1e-6);
        }
    }
}
