//! Trill sensor drivers
//!
//! This crate connects the decoder in trill-core to a bus:
//!
//! - Sensor session that reads and decodes frames ([`sensor::TrillSensor`])
//! - Adapter from `embedded_hal::i2c::I2c` to [`trill_hal::I2cBus`]
//!
//! Device configuration commands are not sent from here; after changing
//! the device's mode, resolution or channel mask, the host mirrors the
//! change in the session's [`SessionConfig`](trill_core::SessionConfig).

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod sensor;

pub use bus::EmbeddedHalBus;
pub use sensor::{ReadError, TrillSensor};
