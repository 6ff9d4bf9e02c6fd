//! Board-agnostic core of the Trill sensor host
//!
//! This crate turns raw frames read from a Trill capacitive touch sensor
//! into rescaled measurements. It performs no bus I/O:
//!
//! - Device profiles (geometry, channel counts, calibration constants)
//! - Session configuration and the derived rescale table
//! - Frame decoding for centroid, raw, baseline and diff modes
//! - Sequence tracking across the 6-bit wrapping frame id
//! - Serializable session settings
//!
//! # Example
//!
//! ```
//! use trill_core::{decode, DeviceType, SequenceTracker, SessionConfig};
//!
//! let config = SessionConfig::new(DeviceType::Bar).unwrap();
//! let mut tracker = SequenceTracker::new();
//!
//! // status byte, one touch, then the sentinel in slot 1
//! let mut buf = [0u8; 21];
//! buf[0] = 0x81;
//! buf[1..3].copy_from_slice(&1600u16.to_be_bytes());
//! buf[3..5].copy_from_slice(&0xFFFFu16.to_be_bytes());
//! buf[11..13].copy_from_slice(&200u16.to_be_bytes());
//!
//! let frame = decode(&buf, &config, true).unwrap();
//! if let Some(status) = frame.status() {
//!     tracker.update(status);
//! }
//! assert_eq!(tracker.frame_id(), 1);
//! assert_eq!(frame.touch_count(), 1);
//! let location = frame.touch_location(0).unwrap();
//! assert!((location - 0.5).abs() < 1e-6);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod decode;
pub mod device;
pub mod error;
pub mod sequence;

pub use config::{
    clamp_resolution, derive_channel_count, RescaleTable, SessionConfig, SessionSettings,
};
pub use decode::{decode, required_byte_count, DecodedFrame, FrameData, Touch, TouchSet};
pub use device::{
    DeviceProfile, DeviceType, Geometry, Mode, DEFAULT_NOISE_THRESHOLD, MAX_CHANNELS,
};
pub use error::{ConfigError, DecodeError};
pub use sequence::SequenceTracker;

pub use trill_protocol::{StatusByte, TransmissionWidth};
