//! Session configuration
//!
//! [`SessionConfig`] is the validated configuration the decoder works
//! against. [`SessionSettings`] is its plain, serializable form.

pub mod rescale;
pub mod session;
pub mod settings;

pub use rescale::{RescaleTable, SIZE_REFERENCE_BITS};
pub use session::{
    clamp_resolution, derive_channel_count, SessionConfig, DEFAULT_RESOLUTION_BITS,
    MAX_RESOLUTION_BITS, MAX_RIGHT_SHIFT, MIN_RESOLUTION_BITS,
};
pub use settings::SessionSettings;
