//! Sensor sessions

pub mod trill;

pub use trill::{ReadError, TrillSensor, MAX_FRAME_LEN, OFFSET_CHANNEL_DATA, OFFSET_STATUS};
