//! Centroid frame layout
//!
//! In centroid mode the device reports touches instead of channel values.
//! A block of `N` slots holds all locations first, then all sizes:
//! ```text
//! ┌──────┬──────┬─────┬────────┬──────┬──────┬─────┬────────┐
//! │ loc0 │ loc1 │ ... │ locN-1 │ siz0 │ siz1 │ ... │ sizN-1 │
//! └──────┴──────┴─────┴────────┴──────┴──────┴─────┴────────┘
//! ```
//! Every field is a big-endian word. The first location equal to
//! [`NO_TOUCH`] ends the touch list.
//!
//! - One-axis devices send one 5-slot block (20 bytes)
//! - Ring devices append two button words after the block (24 bytes)
//! - Two-axis devices send a vertical then a horizontal 4-slot block (32 bytes)

use crate::{read_u16_be, write_u16_be, WireError};

/// Location value marking the end of the touch list
pub const NO_TOUCH: u16 = 0xFFFF;

/// Touch slots per block on one-axis and ring devices
pub const MAX_TOUCHES_1D: usize = 5;

/// Touch slots per axis on two-axis devices
pub const MAX_TOUCHES_2D: usize = 4;

/// Buttons on ring devices
pub const BUTTON_COUNT: usize = 2;

/// Button words carry a 12-bit reading
pub const BUTTON_MASK: u16 = 0x0FFF;

/// One-axis centroid frame length
pub const CENTROID_LEN_1D: usize = CentroidBlock::byte_len(MAX_TOUCHES_1D);

/// Ring centroid frame length (touch block plus buttons)
pub const CENTROID_LEN_RING: usize = CENTROID_LEN_1D + 2 * BUTTON_COUNT;

/// Two-axis centroid frame length (vertical and horizontal blocks)
pub const CENTROID_LEN_2D: usize = 2 * CentroidBlock::byte_len(MAX_TOUCHES_2D);

/// View over one block of touch slots
#[derive(Debug, Clone, Copy)]
pub struct CentroidBlock<'a> {
    bytes: &'a [u8],
    slots: usize,
}

impl<'a> CentroidBlock<'a> {
    /// Bytes occupied by a block of `slots` touch slots
    pub const fn byte_len(slots: usize) -> usize {
        4 * slots
    }

    /// Wrap the start of `bytes` as a block of `slots` touch slots
    pub fn new(bytes: &'a [u8], slots: usize) -> Result<Self, WireError> {
        let len = Self::byte_len(slots);
        let bytes = bytes.get(..len).ok_or(WireError::BufferTooSmall)?;
        Ok(Self { bytes, slots })
    }

    /// Number of touch slots in this block
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Number of active touches
    ///
    /// Index of the first sentinel location, or the slot count when the
    /// block has no sentinel.
    pub fn touch_count(&self) -> usize {
        (0..self.slots)
            .position(|slot| self.raw_location(slot) == NO_TOUCH)
            .unwrap_or(self.slots)
    }

    /// Raw location word of `slot`, whether or not it is an active touch
    pub fn location(&self, slot: usize) -> Option<u16> {
        (slot < self.slots).then(|| self.raw_location(slot))
    }

    /// Raw size word of `slot`, whether or not it is an active touch
    pub fn size(&self, slot: usize) -> Option<u16> {
        (slot < self.slots).then(|| self.raw_size(slot))
    }

    /// Active touches as raw `(location, size)` pairs, in slot order
    pub fn touches(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        (0..self.touch_count()).map(move |slot| (self.raw_location(slot), self.raw_size(slot)))
    }

    fn raw_location(&self, slot: usize) -> u16 {
        u16::from_be_bytes([self.bytes[2 * slot], self.bytes[2 * slot + 1]])
    }

    fn raw_size(&self, slot: usize) -> u16 {
        let offset = 2 * (self.slots + slot);
        u16::from_be_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }
}

/// Encode a block of touches the way the device transmits them
///
/// Unused slots get the [`NO_TOUCH`] sentinel and a zero size. A touch
/// whose location equals the sentinel cannot be represented and is
/// rejected. Returns the number of bytes written.
pub fn encode_block(
    touches: &[(u16, u16)],
    slots: usize,
    out: &mut [u8],
) -> Result<usize, WireError> {
    let len = CentroidBlock::byte_len(slots);
    if out.len() < len {
        return Err(WireError::BufferTooSmall);
    }
    if touches.len() > slots || touches.iter().any(|&(location, _)| location == NO_TOUCH) {
        return Err(WireError::ValueOutOfRange);
    }

    for slot in 0..slots {
        let (location, size) = touches.get(slot).copied().unwrap_or((NO_TOUCH, 0));
        write_u16_be(out, 2 * slot, location)?;
        write_u16_be(out, 2 * (slots + slot), size)?;
    }
    Ok(len)
}

/// Read ring button `index` from the bytes following the touch block
pub fn read_button(bytes: &[u8], index: usize) -> Option<u16> {
    if index >= BUTTON_COUNT {
        return None;
    }
    read_u16_be(bytes, 2 * index).map(|word| word & BUTTON_MASK)
}

/// Encode ring button readings after the touch block
pub fn encode_buttons(buttons: [u16; BUTTON_COUNT], out: &mut [u8]) -> Result<usize, WireError> {
    if buttons.iter().any(|&b| b > BUTTON_MASK) {
        return Err(WireError::ValueOutOfRange);
    }
    for (index, &value) in buttons.iter().enumerate() {
        write_u16_be(out, 2 * index, value)?;
    }
    Ok(2 * BUTTON_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_lengths() {
        assert_eq!(CENTROID_LEN_1D, 20);
        assert_eq!(CENTROID_LEN_RING, 24);
        assert_eq!(CENTROID_LEN_2D, 32);
    }

    #[test]
    fn test_sentinel_in_first_slot() {
        let mut bytes = [0u8; CENTROID_LEN_1D];
        encode_block(&[], MAX_TOUCHES_1D, &mut bytes).unwrap();
        let block = CentroidBlock::new(&bytes, MAX_TOUCHES_1D).unwrap();
        assert_eq!(block.touch_count(), 0);
        assert_eq!(block.touches().count(), 0);
    }

    #[test]
    fn test_no_sentinel_fills_all_slots() {
        let bytes = [0x01u8; CENTROID_LEN_1D];
        let block = CentroidBlock::new(&bytes, MAX_TOUCHES_1D).unwrap();
        assert_eq!(block.touch_count(), MAX_TOUCHES_1D);
    }

    #[test]
    fn test_slots_after_sentinel_are_not_touches() {
        let mut bytes = [0u8; CENTROID_LEN_1D];
        // slot 0 active, slot 1 sentinel, slot 2 holds stale data
        bytes[0..2].copy_from_slice(&100u16.to_be_bytes());
        bytes[2..4].copy_from_slice(&NO_TOUCH.to_be_bytes());
        bytes[4..6].copy_from_slice(&300u16.to_be_bytes());
        let block = CentroidBlock::new(&bytes, MAX_TOUCHES_1D).unwrap();
        assert_eq!(block.touch_count(), 1);
        assert_eq!(block.location(2), Some(300));
        assert_eq!(block.location(5), None);
    }

    #[test]
    fn test_block_layout() {
        let mut bytes = [0u8; 16];
        encode_block(&[(0x0102, 0x0304)], MAX_TOUCHES_2D, &mut bytes).unwrap();
        assert_eq!(&bytes[0..2], &[0x01, 0x02]);
        assert_eq!(&bytes[2..4], &[0xFF, 0xFF]);
        assert_eq!(&bytes[8..10], &[0x03, 0x04]);
        assert_eq!(&bytes[10..12], &[0x00, 0x00]);
    }

    #[test]
    fn test_block_too_short() {
        let bytes = [0u8; 19];
        assert!(matches!(
            CentroidBlock::new(&bytes, MAX_TOUCHES_1D),
            Err(WireError::BufferTooSmall)
        ));
    }

    #[test]
    fn test_encode_rejects_sentinel_location() {
        let mut bytes = [0u8; CENTROID_LEN_1D];
        assert_eq!(
            encode_block(&[(NO_TOUCH, 10)], MAX_TOUCHES_1D, &mut bytes),
            Err(WireError::ValueOutOfRange)
        );
        assert_eq!(
            encode_block(&[(1, 1); 6], MAX_TOUCHES_1D, &mut bytes),
            Err(WireError::ValueOutOfRange)
        );
    }

    #[test]
    fn test_buttons_masked_to_12_bits() {
        let bytes = [0xF1, 0x23, 0x0A, 0xBC];
        assert_eq!(read_button(&bytes, 0), Some(0x123));
        assert_eq!(read_button(&bytes, 1), Some(0xABC));
        assert_eq!(read_button(&bytes, 2), None);
    }

    proptest! {
        #[test]
        fn prop_touch_roundtrip(
            touches in proptest::collection::vec((0u16..NO_TOUCH, any::<u16>()), 0..=MAX_TOUCHES_1D)
        ) {
            let mut bytes = [0u8; CENTROID_LEN_1D];
            encode_block(&touches, MAX_TOUCHES_1D, &mut bytes).unwrap();
            let block = CentroidBlock::new(&bytes, MAX_TOUCHES_1D).unwrap();
            prop_assert_eq!(block.touch_count(), touches.len());
            for (decoded, original) in block.touches().zip(touches.iter()) {
                prop_assert_eq!(decoded, *original);
            }
        }
    }
}
