//! Trill Hardware Abstraction Layer
//!
//! This crate defines the bus trait a Trill host needs from its platform.
//! The frame decoder never touches the bus; only the host session in
//! `trill-drivers` does, through this trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Host application                       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trill-drivers (TrillSensor session)    │
//! └─────────────────────────────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌───────────────┐       ┌─────────────────┐
//! │  trill-hal    │       │  trill-core     │
//! │  (I2cBus)     │       │  (decode)       │
//! └───────────────┘       └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{I2cBus, I2cError};
