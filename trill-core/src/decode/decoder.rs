//! Byte-level frame decoder
//!
//! Frame sizes by mode:
//! - Centroid: fixed by geometry (20, 24 or 32 bytes)
//! - Raw/Baseline/Diff: packed channel values, see [`trill_protocol::packing`]
//!
//! plus one leading status byte when requested.

use heapless::Vec;
use trill_protocol::centroid::read_button;
use trill_protocol::packing::{packed_len, unpack};
use trill_protocol::{CentroidBlock, StatusByte, BUTTON_COUNT, MAX_TOUCHES_1D, MAX_TOUCHES_2D};

use crate::config::SessionConfig;
use crate::decode::frame::{DecodedFrame, FrameData, Touch, TouchSet};
use crate::device::{Geometry, Mode, MAX_CHANNELS};
use crate::error::DecodeError;

/// Payload bytes per frame, excluding the status byte
pub fn payload_len(config: &SessionConfig) -> usize {
    match config.mode() {
        Mode::Centroid => config.geometry().centroid_len(),
        _ => packed_len(config.num_channels(), config.transmission_width()),
    }
}

/// Bytes to read from the device for one frame
///
/// Centroid frame sizes depend only on geometry, not on channel count or
/// resolution.
pub fn required_byte_count(config: &SessionConfig, include_status: bool) -> usize {
    payload_len(config) + usize::from(include_status)
}

/// Decode one frame
///
/// `buf` must hold at least [`required_byte_count`] bytes; anything after
/// that is ignored. When `include_status` is set the first byte is the
/// status byte and is returned with the frame, so the caller can feed
/// its sequence tracker before looking at the payload.
pub fn decode(
    buf: &[u8],
    config: &SessionConfig,
    include_status: bool,
) -> Result<DecodedFrame, DecodeError> {
    let expected = required_byte_count(config, include_status);
    let frame = buf.get(..expected).ok_or(DecodeError::Truncated {
        expected,
        actual: buf.len(),
    })?;

    let (status, payload) = match frame.split_first() {
        Some((&status, payload)) if include_status => (Some(StatusByte::from_raw(status)), payload),
        _ => (None, frame),
    };

    let data = match config.mode() {
        Mode::Centroid => decode_centroid(payload, config)?,
        _ => decode_channels(payload, config)?,
    };
    Ok(DecodedFrame::new(status, data))
}

fn decode_channels(payload: &[u8], config: &SessionConfig) -> Result<FrameData, DecodeError> {
    let width = config.transmission_width();
    let count = config.num_channels();
    let scale = config.rescale().raw * (1u32 << config.right_shift()) as f32;

    // num_channels never exceeds MAX_CHANNELS
    let values = (0..count)
        .map(|index| {
            unpack(payload, index, width)
                .map(|raw| raw as f32 * scale)
                .ok_or(DecodeError::Truncated {
                    expected: packed_len(count, width),
                    actual: payload.len(),
                })
        })
        .collect::<Result<Vec<f32, MAX_CHANNELS>, _>>()?;
    Ok(FrameData::Channels(values))
}

fn decode_centroid(payload: &[u8], config: &SessionConfig) -> Result<FrameData, DecodeError> {
    let rescale = config.rescale();
    match config.geometry() {
        Geometry::OneAxis => Ok(FrameData::Touches {
            touches: read_touches(payload, rescale.position, rescale.size)?,
            buttons: None,
        }),
        Geometry::RingWithButtons => {
            let touches = read_touches(payload, rescale.position, rescale.size)?;
            let tail = &payload[CentroidBlock::byte_len(MAX_TOUCHES_1D)..];
            let mut buttons = [0.0; BUTTON_COUNT];
            for (index, button) in buttons.iter_mut().enumerate() {
                let raw = read_button(tail, index).ok_or(DecodeError::Truncated {
                    expected: 2 * BUTTON_COUNT,
                    actual: tail.len(),
                })?;
                *button = raw as f32 * rescale.raw;
            }
            Ok(FrameData::Touches {
                touches,
                buttons: Some(buttons),
            })
        }
        Geometry::TwoAxis => {
            let horizontal_position = rescale.horizontal_position.ok_or(DecodeError::NoDevice)?;
            let (vertical, horizontal) =
                payload.split_at(CentroidBlock::byte_len(MAX_TOUCHES_2D));
            Ok(FrameData::Touches2D {
                vertical: read_touches(vertical, rescale.position, rescale.size)?,
                horizontal: read_touches(horizontal, horizontal_position, rescale.size)?,
            })
        }
        Geometry::None => Err(DecodeError::NoDevice),
    }
}

/// Rescale the active touches of an `N`-slot block
fn read_touches<const N: usize>(
    bytes: &[u8],
    position_scale: f32,
    size_scale: f32,
) -> Result<TouchSet<N>, DecodeError> {
    let block = CentroidBlock::new(bytes, N).map_err(|_| DecodeError::Truncated {
        expected: CentroidBlock::byte_len(N),
        actual: bytes.len(),
    })?;

    Ok(block
        .touches()
        .map(|(location, size)| Touch {
            location: location as f32 * position_scale,
            size: size as f32 * size_scale,
        })
        .collect())
}
