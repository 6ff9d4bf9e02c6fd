//! Frame decoding
//!
//! [`decode`] is a pure function of the bytes read from the device and the
//! session configuration. It never reads past the bytes the configuration
//! calls for and never fills missing bytes with defaults.

pub mod decoder;
pub mod frame;

pub use decoder::{decode, payload_len, required_byte_count};
pub use frame::{DecodedFrame, FrameData, Touch, TouchSet};
