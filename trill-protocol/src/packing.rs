//! Channel packing for raw, baseline and diff frames
//!
//! In non-centroid modes the device sends one value per selected channel,
//! in ascending channel order. The transmission width picks the packing:
//! - 16 bit: big-endian word per channel
//! - 8 bit: one byte per channel
//! - 12 bit: two channels share three bytes
//!
//! 12-bit layout for a channel pair `(a, b)`:
//! ```text
//! ┌───────────┬─────────────────────┬───────────┐
//! │ a[11:4]   │ a[3:0]   │ b[11:8]  │ b[7:0]    │
//! └───────────┴─────────────────────┴───────────┘
//! ```
//! An odd channel count leaves the low nibble of the last byte unused.

use crate::{read_u16_be, WireError};

/// Width of each channel value on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmissionWidth {
    /// One byte per channel
    Bits8,
    /// Two channels per three bytes
    Bits12,
    /// Big-endian word per channel
    #[default]
    Bits16,
}

impl TransmissionWidth {
    /// Number of bits per channel value
    pub const fn bits(self) -> u8 {
        match self {
            TransmissionWidth::Bits8 => 8,
            TransmissionWidth::Bits12 => 12,
            TransmissionWidth::Bits16 => 16,
        }
    }

    /// Largest value representable at this width
    pub const fn max_value(self) -> u16 {
        match self {
            TransmissionWidth::Bits8 => 0xFF,
            TransmissionWidth::Bits12 => 0x0FFF,
            TransmissionWidth::Bits16 => 0xFFFF,
        }
    }
}

impl TryFrom<u8> for TransmissionWidth {
    type Error = WireError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(TransmissionWidth::Bits8),
            12 => Ok(TransmissionWidth::Bits12),
            16 => Ok(TransmissionWidth::Bits16),
            other => Err(WireError::UnsupportedWidth(other)),
        }
    }
}

/// Number of payload bytes carrying `channels` values
pub const fn packed_len(channels: usize, width: TransmissionWidth) -> usize {
    match width {
        TransmissionWidth::Bits16 => channels * 2,
        TransmissionWidth::Bits12 => channels + (channels + 1) / 2,
        TransmissionWidth::Bits8 => channels,
    }
}

/// Offset of the first byte touched by a 12-bit channel
#[inline]
const fn offset_12(index: usize) -> usize {
    index + index / 2
}

/// Extract the value of channel `index` from a packed payload
///
/// Returns `None` when the payload ends before the channel's last byte.
pub fn unpack(payload: &[u8], index: usize, width: TransmissionWidth) -> Option<u16> {
    match width {
        TransmissionWidth::Bits16 => read_u16_be(payload, 2 * index),
        TransmissionWidth::Bits8 => payload.get(index).map(|&b| b as u16),
        TransmissionWidth::Bits12 => {
            let k = offset_12(index);
            let first = *payload.get(k)? as u16;
            let second = *payload.get(k + 1)? as u16;
            if index & 1 == 0 {
                Some((first << 4) | (second >> 4))
            } else {
                Some(((first & 0x0F) << 8) | second)
            }
        }
    }
}

/// Pack channel values the way the device transmits them
///
/// Returns the number of bytes written. Values wider than the
/// transmission width are rejected rather than truncated.
pub fn pack(values: &[u16], width: TransmissionWidth, out: &mut [u8]) -> Result<usize, WireError> {
    let len = packed_len(values.len(), width);
    if out.len() < len {
        return Err(WireError::BufferTooSmall);
    }
    if values.iter().any(|&v| v > width.max_value()) {
        return Err(WireError::ValueOutOfRange);
    }

    let out = &mut out[..len];
    out.fill(0);
    for (index, &value) in values.iter().enumerate() {
        match width {
            TransmissionWidth::Bits16 => {
                out[2 * index..2 * index + 2].copy_from_slice(&value.to_be_bytes());
            }
            TransmissionWidth::Bits8 => out[index] = value as u8,
            TransmissionWidth::Bits12 => {
                let k = offset_12(index);
                if index & 1 == 0 {
                    out[k] = (value >> 4) as u8;
                    out[k + 1] |= ((value & 0x0F) << 4) as u8;
                } else {
                    out[k] |= (value >> 8) as u8;
                    out[k + 1] = value as u8;
                }
            }
        }
    }
    Ok(len)
}
