//! Trill touch sensor session
//!
//! Reads frames from a Trill device over I2C and decodes them against the
//! session configuration.
//!
//! # Read Sequence
//!
//! - Move the device read pointer to register 3 (status byte first) or
//!   register 4 (data only), skipped when it is already there
//! - Read exactly as many bytes as the configuration calls for
//! - Update the sequence tracker from the status byte
//! - Decode the payload
//!
//! A failed or short read latches: further reads are refused until the
//! host calls [`TrillSensor::clear_read_error`]. Reads are never retried
//! here.

use trill_core::device::MAX_CHANNELS;
use trill_core::{decode, DecodeError, DecodedFrame, SequenceTracker, SessionConfig};
use trill_hal::I2cBus;

/// Register holding the status byte, followed by frame data
pub const OFFSET_STATUS: u8 = 3;

/// Register holding frame data
pub const OFFSET_CHANNEL_DATA: u8 = 4;

/// Longest frame: every channel at 16 bits, plus the status byte
pub const MAX_FRAME_LEN: usize = 2 * MAX_CHANNELS + 1;

/// Errors from reading a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError<E> {
    /// Bus operation failed
    Bus(E),
    /// Device returned fewer bytes than requested
    ShortRead {
        /// Bytes requested
        expected: usize,
        /// Bytes received
        actual: usize,
    },
    /// A previous read failed and has not been cleared
    Latched,
    /// Frame could not be decoded
    Decode(DecodeError),
}

impl<E> From<DecodeError> for ReadError<E> {
    fn from(e: DecodeError) -> Self {
        ReadError::Decode(e)
    }
}

/// One Trill device on a bus
pub struct TrillSensor<B> {
    bus: B,
    address: u8,
    config: SessionConfig,
    tracker: SequenceTracker,
    buffer: [u8; MAX_FRAME_LEN],
    /// Register the device read pointer is at, if known
    read_offset: Option<u8>,
    read_failed: bool,
}

impl<B> TrillSensor<B> {
    /// Create a session for the device at `address`
    ///
    /// `config` must describe how the device is currently configured.
    pub fn new(bus: B, address: u8, config: SessionConfig) -> Self {
        Self {
            bus,
            address,
            config,
            tracker: SequenceTracker::new(),
            buffer: [0; MAX_FRAME_LEN],
            read_offset: None,
            read_failed: false,
        }
    }

    /// 7-bit I2C address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Mutable session configuration, to mirror device reconfiguration
    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    /// Sequence tracker
    pub fn tracker(&self) -> &SequenceTracker {
        &self.tracker
    }

    /// Mutable sequence tracker, to acknowledge resets
    pub fn tracker_mut(&mut self) -> &mut SequenceTracker {
        &mut self.tracker
    }

    /// A read failed and further reads are refused
    pub fn read_failed(&self) -> bool {
        self.read_failed
    }

    /// Allow reads again after a failure
    pub fn clear_read_error(&mut self) {
        self.read_failed = false;
    }

    /// Bytes a frame read transfers
    pub fn bytes_to_read(&self, include_status: bool) -> usize {
        self.config.required_byte_count(include_status)
    }

    /// Decode a frame that arrived by other means
    ///
    /// Updates the sequence tracker like [`read_frame`](Self::read_frame).
    /// `bytes` shorter than a frame are rejected, never padded.
    pub fn feed(
        &mut self,
        bytes: &[u8],
        include_status: bool,
    ) -> Result<DecodedFrame, DecodeError> {
        let frame = decode(bytes, &self.config, include_status)?;
        if let Some(status) = frame.status() {
            self.tracker.update(status);
        }
        Ok(frame)
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> TrillSensor<B> {
    /// Read and decode one frame
    pub fn read_frame(
        &mut self,
        include_status: bool,
    ) -> Result<DecodedFrame, ReadError<B::Error>> {
        if self.read_failed {
            return Err(ReadError::Latched);
        }

        self.prepare_for_read(include_status).map_err(ReadError::Bus)?;

        let expected = self.bytes_to_read(include_status);
        let actual = match self.bus.read(self.address, &mut self.buffer[..expected]) {
            Ok(actual) => actual,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Trill at {=u8:#x}: read failed", self.address);
                self.read_failed = true;
                return Err(ReadError::Bus(e));
            }
        };
        if actual != expected {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Trill at {=u8:#x}: {} of {} bytes read",
                self.address,
                actual,
                expected
            );
            self.read_failed = true;
            return Err(ReadError::ShortRead { expected, actual });
        }

        let frame = decode(&self.buffer[..expected], &self.config, include_status)?;
        if let Some(status) = frame.status() {
            self.tracker.update(status);
        }
        Ok(frame)
    }

    /// Point the device at the register the next read starts from
    ///
    /// A failed write leaves the pointer unknown but does not latch.
    fn prepare_for_read(&mut self, include_status: bool) -> Result<(), B::Error> {
        let offset = if include_status {
            OFFSET_STATUS
        } else {
            OFFSET_CHANNEL_DATA
        };
        if self.read_offset == Some(offset) {
            return Ok(());
        }

        self.read_offset = None;
        if let Err(e) = self.bus.write(self.address, &[offset]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Trill at {=u8:#x}: failed to prepare data read", self.address);
            return Err(e);
        }
        self.read_offset = Some(offset);
        Ok(())
    }
}
