//! Frame sequence tracking
//!
//! The device numbers frames with a 6-bit counter carried in the status
//! byte. The tracker unwraps it into a monotonic 32-bit frame id and keeps
//! the activity and reset flags of the latest status.
//!
//! Unwrapping assumes fewer than 64 frames are missed between two reads;
//! a loss of 64 or more frames is indistinguishable from no loss.

use trill_protocol::status::{FRAME_ID_MASK, FRAME_ID_PERIOD};
use trill_protocol::StatusByte;

/// Unwrapped frame id and device health from the status byte stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceTracker {
    /// Unwrapped frame id
    frame_id: u32,
    /// Latest status byte, `None` until the first update
    status: Option<StatusByte>,
    /// A reset was seen and not yet acknowledged
    reset_latched: bool,
}

impl SequenceTracker {
    /// Tracker that has not seen a status byte yet
    pub const fn new() -> Self {
        Self {
            frame_id: 0,
            status: None,
            reset_latched: false,
        }
    }

    /// Process the status byte of a new frame
    ///
    /// Returns the unwrapped frame id. A sequence id lower than the previous
    /// one counts as exactly one wrap.
    pub fn update(&mut self, status: StatusByte) -> u32 {
        let new_id = u32::from(status.frame_id());
        let mask = u32::from(FRAME_ID_MASK);

        if new_id < (self.frame_id & mask) {
            self.frame_id = self.frame_id.wrapping_add(FRAME_ID_PERIOD);
            #[cfg(feature = "defmt")]
            defmt::trace!("Trill frame id wrapped, now {}", self.frame_id);
        }
        self.frame_id = (self.frame_id & !mask) | new_id;

        if !status.initialized() && !self.reset_latched {
            #[cfg(feature = "defmt")]
            defmt::warn!("Trill reports a reset at frame {}", self.frame_id);
            self.reset_latched = true;
        }
        self.status = Some(status);
        self.frame_id
    }

    /// Unwrapped frame id
    pub fn frame_id(&self) -> u32 {
        self.frame_id
    }

    /// 6-bit frame id as sent by the device
    pub fn wrapped_frame_id(&self) -> u8 {
        (self.frame_id & u32::from(FRAME_ID_MASK)) as u8
    }

    /// Latest status byte
    pub fn status(&self) -> Option<StatusByte> {
        self.status
    }

    /// Latest status says the device has not been initialized since it started
    ///
    /// This is a level: it stays true for as long as the device keeps
    /// reporting it. See [`reset_detected`](Self::reset_detected) for an
    /// acknowledged variant.
    pub fn has_reset(&self) -> bool {
        self.status.is_some_and(|s| !s.initialized())
    }

    /// Latest status reports touch activity
    pub fn has_activity(&self) -> bool {
        self.status.is_some_and(|s| s.activity())
    }

    /// A reset was reported since the last [`acknowledge_reset`](Self::acknowledge_reset)
    pub fn reset_detected(&self) -> bool {
        self.reset_latched
    }

    /// Clear the latched reset
    ///
    /// If the latest status still reports a reset, the next update latches
    /// it again.
    pub fn acknowledge_reset(&mut self) {
        self.reset_latched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status(id: u8) -> StatusByte {
        StatusByte::new(id, false, true)
    }

    #[test]
    fn test_single_wrap() {
        let mut tracker = SequenceTracker::new();
        let ids = (0..64u8).chain([0, 1, 2]);
        let unwrapped: Vec<u32> = ids.map(|id| tracker.update(status(id))).collect();
        let expected: Vec<u32> = (0..67).collect();
        assert_eq!(unwrapped, expected);
        assert_eq!(tracker.wrapped_frame_id(), 2);
    }

    #[test]
    fn test_gaps_within_period() {
        let mut tracker = SequenceTracker::new();
        assert_eq!(tracker.update(status(10)), 10);
        assert_eq!(tracker.update(status(50)), 50);
        // 50 -> 3 skips 16 frames across the wrap
        assert_eq!(tracker.update(status(3)), 67);
        // repeated id is not a wrap
        assert_eq!(tracker.update(status(3)), 67);
    }

    #[test]
    fn test_loss_of_full_period_is_invisible() {
        let mut tracker = SequenceTracker::new();
        tracker.update(status(5));
        // 64 frames later the id is 5 again: no wrap detected
        assert_eq!(tracker.update(status(5)), 5);
    }

    #[test]
    fn test_flags_follow_latest_status() {
        let mut tracker = SequenceTracker::new();
        assert!(!tracker.has_reset());
        assert!(!tracker.has_activity());
        assert_eq!(tracker.status(), None);

        tracker.update(StatusByte::new(1, true, false));
        assert!(tracker.has_reset());
        assert!(tracker.has_activity());

        tracker.update(StatusByte::new(2, false, true));
        assert!(!tracker.has_reset());
        assert!(!tracker.has_activity());
    }

    #[test]
    fn test_reset_latch_needs_acknowledgement() {
        let mut tracker = SequenceTracker::new();
        tracker.update(StatusByte::new(0, false, false));
        tracker.update(StatusByte::new(1, false, true));
        assert!(!tracker.has_reset());
        assert!(tracker.reset_detected());

        tracker.acknowledge_reset();
        assert!(!tracker.reset_detected());

        tracker.update(StatusByte::new(2, false, false));
        assert!(tracker.reset_detected());
    }

    #[test]
    fn test_counter_wraps_without_overflow() {
        let mut tracker = SequenceTracker {
            frame_id: u32::MAX,
            status: None,
            reset_latched: false,
        };
        assert_eq!(tracker.update(status(0)), 0);
    }

    proptest! {
        #[test]
        fn prop_monotonic_with_small_steps(steps in proptest::collection::vec(0u32..64, 1..200)) {
            let mut tracker = SequenceTracker::new();
            let mut true_id = 0u32;
            tracker.update(status(0));
            for step in steps {
                true_id += step;
                let id = tracker.update(status((true_id & 0x3F) as u8));
                prop_assert_eq!(id, true_id);
            }
        }
    }
}
