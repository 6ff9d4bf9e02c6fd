//! Status byte
//!
//! When requested, every frame starts with one status byte:
//! - bits 0-5: sequence id, wraps every 64 frames
//! - bit 6: activity, set when the device saw a touch during the last scan
//! - bit 7: initialized, cleared after the device has (re)started
//!
//! The layout is fixed by the device firmware and extracted with explicit
//! masks, never through a bitfield overlay.

/// Mask of the wrapped sequence id
pub const FRAME_ID_MASK: u8 = 0x3F;

/// Activity flag
pub const ACTIVITY_BIT: u8 = 1 << 6;

/// Initialized flag
pub const INITIALIZED_BIT: u8 = 1 << 7;

/// Sequence id period (ids run 0..=63)
pub const FRAME_ID_PERIOD: u32 = 0x40;

/// Parsed status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusByte(u8);

impl StatusByte {
    /// Wrap a raw status byte as read from the bus
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Build a status byte from its fields
    ///
    /// Only the low 6 bits of `frame_id` are kept.
    pub const fn new(frame_id: u8, activity: bool, initialized: bool) -> Self {
        let mut raw = frame_id & FRAME_ID_MASK;
        if activity {
            raw |= ACTIVITY_BIT;
        }
        if initialized {
            raw |= INITIALIZED_BIT;
        }
        Self(raw)
    }

    /// Raw byte value
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Wrapped 6-bit sequence id
    pub const fn frame_id(self) -> u8 {
        self.0 & FRAME_ID_MASK
    }

    /// Device reported activity during the last scan
    pub const fn activity(self) -> bool {
        self.0 & ACTIVITY_BIT != 0
    }

    /// Device has been initialized since it last started
    pub const fn initialized(self) -> bool {
        self.0 & INITIALIZED_BIT != 0
    }
}

impl From<u8> for StatusByte {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}
