//! I2C bus abstractions
//!
//! Provides the I2C master operations a Trill host uses. Platform HALs
//! (or the embedded-hal adapter in `trill-drivers`) implement this trait.

/// I2C bus master
///
/// Reads report how many bytes actually arrived. Implementations must not
/// retry or pad a short read; the caller decides what a short read means.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// Returns the number of bytes placed at the start of `buf`.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Common I2C failure kinds
///
/// Platform implementations may use this as their error type when they
/// have nothing more specific to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Device did not acknowledge its address or data
    NoAcknowledge,
    /// Lost arbitration on a multi-master bus
    ArbitrationLoss,
    /// Bus-level fault
    Bus,
    /// Any other failure
    Other,
}

/// Exclusive references forward to the referenced bus
impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(address, buf)
    }
}
