//! Validated session configuration
//!
//! Holds what the host has configured on the device: mode, scan
//! resolution, transmission format and channel mask. The derived values
//! (channel count, rescale table) are recomputed here whenever their inputs
//! change and cannot be set directly.

use trill_protocol::TransmissionWidth;

use crate::config::rescale::RescaleTable;
use crate::config::settings::SessionSettings;
use crate::decode;
use crate::device::{DeviceProfile, DeviceType, Geometry, Mode};
use crate::error::ConfigError;

/// Lowest scan resolution the device supports
pub const MIN_RESOLUTION_BITS: u8 = 9;

/// Highest scan resolution the device supports
pub const MAX_RESOLUTION_BITS: u8 = 16;

/// Resolution selected during device setup
pub const DEFAULT_RESOLUTION_BITS: u8 = 12;

/// Largest transmission right shift that leaves a 16-bit value non-zero
pub const MAX_RIGHT_SHIFT: u8 = 15;

/// Clamp a requested resolution into the supported range
///
/// The device clamps silently when configured over the bus; hosts call
/// this before [`SessionConfig::set_resolution`] to mirror that.
pub const fn clamp_resolution(bits: u8) -> u8 {
    if bits < MIN_RESOLUTION_BITS {
        MIN_RESOLUTION_BITS
    } else if bits > MAX_RESOLUTION_BITS {
        MAX_RESOLUTION_BITS
    } else {
        bits
    }
}

/// Bits of `mask` that address channels of a device with `channels` channels
const fn channel_width_mask(channels: u8) -> u32 {
    if channels >= 32 {
        u32::MAX
    } else {
        (1u32 << channels) - 1
    }
}

/// Number of channels a device reports for `channel_mask`
///
/// Mask bits beyond the device's channel count are ignored.
pub fn derive_channel_count(device: DeviceType, channel_mask: u32) -> Result<u8, ConfigError> {
    let profile = DeviceProfile::of(device)?;
    Ok(count_channels(profile, channel_mask))
}

fn count_channels(profile: &DeviceProfile, channel_mask: u32) -> u8 {
    let selected = channel_mask & channel_width_mask(profile.default_channels);
    (selected.count_ones() as u8).min(profile.default_channels)
}

/// Configuration of one sensor session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionConfig {
    profile: &'static DeviceProfile,
    mode: Mode,
    resolution_bits: u8,
    transmission_width: TransmissionWidth,
    right_shift: u8,
    channel_mask: u32,
    num_channels: u8,
    rescale: RescaleTable,
}

impl SessionConfig {
    /// Configuration a device has right after setup
    ///
    /// Default mode, 12-bit resolution, 16-bit transmission without shift,
    /// and every channel enabled.
    pub fn new(device: DeviceType) -> Result<Self, ConfigError> {
        let profile = DeviceProfile::of(device)?;
        Ok(Self {
            profile,
            mode: profile.default_mode,
            resolution_bits: DEFAULT_RESOLUTION_BITS,
            transmission_width: TransmissionWidth::Bits16,
            right_shift: 0,
            channel_mask: channel_width_mask(profile.default_channels),
            num_channels: profile.default_channels,
            rescale: RescaleTable::derive(profile, DEFAULT_RESOLUTION_BITS)?,
        })
    }

    /// Build and validate a configuration from plain settings
    pub fn from_settings(settings: &SessionSettings) -> Result<Self, ConfigError> {
        let mut config = Self::new(settings.device)?;
        config.set_mode(settings.mode);
        config.set_resolution(settings.resolution_bits)?;
        let width = TransmissionWidth::try_from(settings.transmission_width)?;
        config.set_transmission_format(width, settings.transmission_shift)?;
        config.set_channel_mask(settings.channel_mask);
        Ok(config)
    }

    /// Plain settings reproducing this configuration
    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            device: self.profile.device,
            mode: self.mode,
            resolution_bits: self.resolution_bits,
            transmission_width: self.transmission_width.bits(),
            transmission_shift: self.right_shift,
            channel_mask: self.channel_mask,
        }
    }

    /// Select the acquisition mode, resolving `Auto` to the device default
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode.resolve(self.profile);
        #[cfg(feature = "defmt")]
        defmt::debug!("Trill mode set to {}", self.mode);
    }

    /// Set the scan resolution and recompute the rescale table
    ///
    /// Values outside 9..=16 are rejected; see [`clamp_resolution`].
    pub fn set_resolution(&mut self, bits: u8) -> Result<(), ConfigError> {
        self.rescale = RescaleTable::derive(self.profile, bits)?;
        self.resolution_bits = bits;
        #[cfg(feature = "defmt")]
        defmt::debug!("Trill resolution set to {} bits", bits);
        Ok(())
    }

    /// Set the width and right shift of transmitted channel values
    pub fn set_transmission_format(
        &mut self,
        width: TransmissionWidth,
        right_shift: u8,
    ) -> Result<(), ConfigError> {
        if right_shift > MAX_RIGHT_SHIFT {
            return Err(ConfigError::ShiftOutOfRange(right_shift));
        }
        self.transmission_width = width;
        self.right_shift = right_shift;
        Ok(())
    }

    /// Select which channels are reported in non-centroid modes
    pub fn set_channel_mask(&mut self, mask: u32) {
        self.channel_mask = mask & channel_width_mask(self.profile.default_channels);
        self.num_channels = count_channels(self.profile, mask);
    }

    /// Device type
    pub fn device(&self) -> DeviceType {
        self.profile.device
    }

    /// Device profile
    pub fn profile(&self) -> &'static DeviceProfile {
        self.profile
    }

    /// Frame layout class
    pub fn geometry(&self) -> Geometry {
        self.profile.geometry
    }

    /// Acquisition mode, never `Auto`
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Scan resolution in bits
    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    /// Width of transmitted channel values
    pub fn transmission_width(&self) -> TransmissionWidth {
        self.transmission_width
    }

    /// Right shift applied by the device before transmission
    pub fn right_shift(&self) -> u8 {
        self.right_shift
    }

    /// Active channel mask, truncated to the device's channels
    pub fn channel_mask(&self) -> u32 {
        self.channel_mask
    }

    /// Number of channels reported in non-centroid modes
    pub fn num_channels(&self) -> usize {
        self.num_channels as usize
    }

    /// Current rescale factors
    pub fn rescale(&self) -> &RescaleTable {
        &self.rescale
    }

    /// Frames carry a single axis of touches
    pub fn is_1d(&self) -> bool {
        self.mode == Mode::Centroid
            && matches!(
                self.profile.geometry,
                Geometry::OneAxis | Geometry::RingWithButtons
            )
    }

    /// Frames carry vertical and horizontal touches
    pub fn is_2d(&self) -> bool {
        self.mode == Mode::Centroid && self.profile.geometry == Geometry::TwoAxis
    }

    /// Bytes to read from the device for one frame
    pub fn required_byte_count(&self, include_status: bool) -> usize {
        decode::required_byte_count(self, include_status)
    }
}
