//! Decoded frames and their queries
//!
//! Index queries return `None` for indices past the active count rather
//! than stale slot contents.

use heapless::Vec;
use trill_protocol::{StatusByte, BUTTON_COUNT, MAX_TOUCHES_1D, MAX_TOUCHES_2D};

use crate::device::MAX_CHANNELS;

/// A single touch, rescaled
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Touch {
    /// Position along the axis, 0.0 to 1.0
    pub location: f32,
    /// Touch size, 1.0 for a full-size touch at the calibrated resolution
    pub size: f32,
}

/// Touches on one axis, in the order the device reported them
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSet<const N: usize> {
    touches: Vec<Touch, N>,
}

impl<const N: usize> TouchSet<N> {
    /// Empty touch set
    pub const fn new() -> Self {
        Self { touches: Vec::new() }
    }

    /// Append a touch, handing it back if the set is full
    pub fn push(&mut self, touch: Touch) -> Result<(), Touch> {
        self.touches.push(touch)
    }

    /// Number of active touches
    pub fn count(&self) -> usize {
        self.touches.len()
    }

    /// No touches on this axis
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Touch `index`, if active
    pub fn get(&self, index: usize) -> Option<&Touch> {
        self.touches.get(index)
    }

    /// Location of touch `index`, if active
    pub fn location(&self, index: usize) -> Option<f32> {
        self.get(index).map(|t| t.location)
    }

    /// Size of touch `index`, if active
    pub fn size(&self, index: usize) -> Option<f32> {
        self.get(index).map(|t| t.size)
    }

    /// Active touches
    pub fn as_slice(&self) -> &[Touch] {
        &self.touches
    }

    /// Iterate over active touches
    pub fn iter(&self) -> core::slice::Iter<'_, Touch> {
        self.touches.iter()
    }

    /// Size-weighted mean location, 0.0 without touches
    pub fn compound_location(&self) -> f32 {
        compound_location(&self.touches)
    }

    /// Sum of touch sizes
    pub fn compound_size(&self) -> f32 {
        compound_size(&self.touches)
    }
}

impl<const N: usize> FromIterator<Touch> for TouchSet<N> {
    /// Collect up to `N` touches; the rest are dropped
    fn from_iter<I: IntoIterator<Item = Touch>>(iter: I) -> Self {
        Self {
            touches: iter.into_iter().take(N).collect(),
        }
    }
}

impl<'a, const N: usize> IntoIterator for &'a TouchSet<N> {
    type Item = &'a Touch;
    type IntoIter = core::slice::Iter<'a, Touch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Payload of a decoded frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameData {
    /// Raw, baseline or diff readings in ascending channel order
    Channels(Vec<f32, MAX_CHANNELS>),
    /// Centroid frame of a one-axis or ring device
    Touches {
        touches: TouchSet<MAX_TOUCHES_1D>,
        /// Button readings, ring devices only
        buttons: Option<[f32; BUTTON_COUNT]>,
    },
    /// Centroid frame of a two-axis device
    Touches2D {
        vertical: TouchSet<MAX_TOUCHES_2D>,
        horizontal: TouchSet<MAX_TOUCHES_2D>,
    },
}

/// One decoded frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedFrame {
    status: Option<StatusByte>,
    data: FrameData,
}

impl DecodedFrame {
    /// Assemble a frame from its parts
    pub fn new(status: Option<StatusByte>, data: FrameData) -> Self {
        Self { status, data }
    }

    /// Status byte, if the frame was read with one
    pub fn status(&self) -> Option<StatusByte> {
        self.status
    }

    /// Frame payload
    pub fn data(&self) -> &FrameData {
        &self.data
    }

    /// Consume the frame, returning its payload
    pub fn into_data(self) -> FrameData {
        self.data
    }

    /// Channel readings, non-centroid frames only
    pub fn channels(&self) -> Option<&[f32]> {
        match &self.data {
            FrameData::Channels(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Reading of channel `index`
    pub fn channel(&self, index: usize) -> Option<f32> {
        self.channels()?.get(index).copied()
    }

    /// Touches on the single axis, or the vertical axis of two-axis devices
    pub fn touches(&self) -> &[Touch] {
        match &self.data {
            FrameData::Channels(_) => &[],
            FrameData::Touches { touches, .. } => touches.as_slice(),
            FrameData::Touches2D { vertical, .. } => vertical.as_slice(),
        }
    }

    /// Touches on the horizontal axis of two-axis devices
    pub fn horizontal_touches(&self) -> &[Touch] {
        match &self.data {
            FrameData::Touches2D { horizontal, .. } => horizontal.as_slice(),
            _ => &[],
        }
    }

    /// Number of touches (vertical axis on two-axis devices)
    pub fn touch_count(&self) -> usize {
        self.touches().len()
    }

    /// Number of horizontal touches, 0 unless two-axis
    pub fn horizontal_touch_count(&self) -> usize {
        self.horizontal_touches().len()
    }

    /// Location of touch `index`
    pub fn touch_location(&self, index: usize) -> Option<f32> {
        self.touches().get(index).map(|t| t.location)
    }

    /// Size of touch `index`
    pub fn touch_size(&self, index: usize) -> Option<f32> {
        self.touches().get(index).map(|t| t.size)
    }

    /// Location of horizontal touch `index`
    pub fn horizontal_touch_location(&self, index: usize) -> Option<f32> {
        self.horizontal_touches().get(index).map(|t| t.location)
    }

    /// Size of horizontal touch `index`
    pub fn horizontal_touch_size(&self, index: usize) -> Option<f32> {
        self.horizontal_touches().get(index).map(|t| t.size)
    }

    /// Size-weighted mean location of all touches, 0.0 without touches
    pub fn compound_location(&self) -> f32 {
        compound_location(self.touches())
    }

    /// Sum of all touch sizes
    pub fn compound_size(&self) -> f32 {
        compound_size(self.touches())
    }

    /// Size-weighted mean location of horizontal touches
    pub fn compound_horizontal_location(&self) -> f32 {
        compound_location(self.horizontal_touches())
    }

    /// Sum of horizontal touch sizes
    pub fn compound_horizontal_size(&self) -> f32 {
        compound_size(self.horizontal_touches())
    }

    /// Reading of ring button `index`
    pub fn button(&self, index: usize) -> Option<f32> {
        match &self.data {
            FrameData::Touches {
                buttons: Some(buttons),
                ..
            } => buttons.get(index).copied(),
            _ => None,
        }
    }
}

fn compound_size(touches: &[Touch]) -> f32 {
    touches.iter().map(|t| t.size).sum()
}

fn compound_location(touches: &[Touch]) -> f32 {
    let total = compound_size(touches);
    if total == 0.0 {
        return 0.0;
    }
    touches.iter().map(|t| t.location * t.size).sum::<f32>() / total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_set<const N: usize>(touches: &[(f32, f32)]) -> TouchSet<N> {
        let mut set = TouchSet::new();
        for &(location, size) in touches {
            set.push(Touch { location, size }).unwrap();
        }
        set
    }

    #[test]
    fn test_compound_location_weighted_by_size() {
        let set: TouchSet<5> = touch_set(&[(100.0, 10.0), (300.0, 30.0)]);
        assert_eq!(set.compound_location(), 250.0);
        assert_eq!(set.compound_size(), 40.0);

        let frame = DecodedFrame::new(
            None,
            FrameData::Touches {
                touches: set,
                buttons: None,
            },
        );
        assert_eq!(frame.compound_location(), 250.0);
        assert_eq!(frame.compound_size(), 40.0);
    }

    #[test]
    fn test_compound_without_touches_is_zero() {
        let set: TouchSet<5> = TouchSet::new();
        assert_eq!(set.compound_location(), 0.0);
        assert_eq!(set.compound_size(), 0.0);

        // zero-size touches must not divide by zero either
        let set: TouchSet<5> = touch_set(&[(0.5, 0.0)]);
        assert_eq!(set.compound_location(), 0.0);
    }

    #[test]
    fn test_index_queries_past_count() {
        let frame = DecodedFrame::new(
            None,
            FrameData::Touches {
                touches: touch_set(&[(0.25, 1.0)]),
                buttons: Some([0.1, 0.2]),
            },
        );
        assert_eq!(frame.touch_location(0), Some(0.25));
        assert_eq!(frame.touch_location(1), None);
        assert_eq!(frame.touch_size(4), None);
        assert_eq!(frame.button(1), Some(0.2));
        assert_eq!(frame.button(2), None);
        assert_eq!(frame.horizontal_touch_count(), 0);
        assert_eq!(frame.channel(0), None);
    }

    #[test]
    fn test_collect_keeps_the_first_n() {
        let set: TouchSet<2> = (1..=4)
            .map(|i| Touch {
                location: i as f32,
                size: 1.0,
            })
            .collect();
        assert_eq!(set.count(), 2);
        assert_eq!(set.location(0), Some(1.0));
        assert_eq!(set.location(1), Some(2.0));
        assert_eq!(set.location(2), None);
    }

    #[test]
    fn test_two_axis_queries_are_independent() {
        let frame = DecodedFrame::new(
            None,
            FrameData::Touches2D {
                vertical: touch_set(&[(0.2, 1.0), (0.6, 3.0)]),
                horizontal: TouchSet::new(),
            },
        );
        assert_eq!(frame.touch_count(), 2);
        assert_eq!(frame.horizontal_touch_count(), 0);
        assert!((frame.compound_location() - 0.5).abs() < 1e-6);
        assert_eq!(frame.compound_horizontal_location(), 0.0);
        assert_eq!(frame.horizontal_touch_location(0), None);
        assert_eq!(frame.button(0), None);
    }

    #[test]
    fn test_channel_queries() {
        let mut values = Vec::new();
        values.extend_from_slice(&[0.5, 0.25]).unwrap();
        let frame = DecodedFrame::new(None, FrameData::Channels(values));
        assert_eq!(frame.channel(1), Some(0.25));
        assert_eq!(frame.channel(2), None);
        assert_eq!(frame.touch_count(), 0);
        assert_eq!(frame.compound_location(), 0.0);
    }

    #[test]
    fn test_push_past_capacity() {
        let mut set: TouchSet<1> = TouchSet::new();
        assert!(set.push(Touch::default()).is_ok());
        assert!(set.push(Touch::default()).is_err());
    }
}
