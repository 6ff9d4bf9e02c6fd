//! embedded-hal bus adapter

use embedded_hal::i2c::{Error, ErrorKind, I2c};
use trill_hal::{I2cBus, I2cError};

/// Use any blocking `embedded_hal` I2C master as a Trill bus
///
/// embedded-hal reads either fill the whole buffer or fail, so a
/// successful read always reports the full length. Peripheral errors are
/// reduced to their [`ErrorKind`].
pub struct EmbeddedHalBus<I> {
    i2c: I,
}

impl<I> EmbeddedHalBus<I> {
    /// Wrap an I2C peripheral
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for EmbeddedHalBus<I> {
    type Error = I2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, data).map_err(to_i2c_error)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.i2c.read(address, buf).map_err(to_i2c_error)?;
        Ok(buf.len())
    }
}

fn to_i2c_error<E: Error>(e: E) -> I2cError {
    match e.kind() {
        ErrorKind::NoAcknowledge(_) => I2cError::NoAcknowledge,
        ErrorKind::ArbitrationLoss => I2cError::ArbitrationLoss,
        ErrorKind::Bus => I2cError::Bus,
        _ => I2cError::Other,
    }
}
