//! Trill sensor wire format
//!
//! This crate defines the byte layout of the frames a Trill touch sensor
//! returns over I2C. Nothing here performs I/O; every function works on
//! plain byte slices so the same code serves the decoder on the host and
//! simulators that synthesize device frames.
//!
//! # Frame Overview
//!
//! A read from the device optionally starts with a status byte, followed
//! by a payload whose shape depends on the acquisition mode:
//! ```text
//! ┌────────┬──────────────────────────────────────────────┐
//! │ STATUS │ PAYLOAD                                      │
//! │ 0–1B   │ centroid slots (20/24/32B) or packed channels│
//! └────────┴──────────────────────────────────────────────┘
//! ```
//!
//! - [`status`] - status byte bit layout (sequence id, activity, initialized)
//! - [`packing`] - 8/12/16-bit channel packing used by raw/baseline/diff modes
//! - [`centroid`] - touch slot layout and the `0xFFFF` no-touch sentinel

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod centroid;
pub mod packing;
pub mod status;

pub use centroid::{
    CentroidBlock, BUTTON_COUNT, BUTTON_MASK, CENTROID_LEN_1D, CENTROID_LEN_2D, CENTROID_LEN_RING,
    MAX_TOUCHES_1D, MAX_TOUCHES_2D, NO_TOUCH,
};
pub use packing::{packed_len, TransmissionWidth};
pub use status::StatusByte;

/// Errors raised while reading or writing wire data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireError {
    /// Buffer is too small for the requested layout
    BufferTooSmall,
    /// Value does not fit in the transmission width
    ValueOutOfRange,
    /// Transmission width other than 8, 12 or 16 bits
    UnsupportedWidth(u8),
}

/// Read a big-endian 16-bit word at `offset`
///
/// Returns `None` if the word would extend past the end of `bytes`.
#[inline]
pub fn read_u16_be(bytes: &[u8], offset: usize) -> Option<u16> {
    let hi = *bytes.get(offset)?;
    let lo = *bytes.get(offset + 1)?;
    Some(u16::from_be_bytes([hi, lo]))
}

/// Write a big-endian 16-bit word at `offset`
#[inline]
pub fn write_u16_be(bytes: &mut [u8], offset: usize, value: u16) -> Result<(), WireError> {
    let slot = bytes
        .get_mut(offset..offset + 2)
        .ok_or(WireError::BufferTooSmall)?;
    slot.copy_from_slice(&value.to_be_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16_be() {
        let bytes = [0x12, 0x34, 0x56];
        assert_eq!(read_u16_be(&bytes, 0), Some(0x1234));
        assert_eq!(read_u16_be(&bytes, 1), Some(0x3456));
        assert_eq!(read_u16_be(&bytes, 2), None);
    }

    #[test]
    fn test_write_u16_be() {
        let mut bytes = [0u8; 3];
        write_u16_be(&mut bytes, 1, 0xBEEF).unwrap();
        assert_eq!(bytes, [0x00, 0xBE, 0xEF]);
        assert_eq!(
            write_u16_be(&mut bytes, 2, 1),
            Err(WireError::BufferTooSmall)
        );
    }
}
