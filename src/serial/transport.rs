use embedded_hal::i2c::{Error, ErrorKind, I2c};

use super::I2CError;

/// Byte transport towards a single RTC chip. The session that owns it never shares it.
///
/// Every call blocks until the transaction completes, times out or errors.
pub trait RtcTransport {
    /// Acquires whatever the backend needs to talk to the device (bus, device handle).
    fn open(&mut self) -> Result<(), I2CError>;

    /// Writes `bytes` to the device in a single transaction.
    fn write(&mut self, bytes: &[u8]) -> Result<(), I2CError>;

    /// Writes `bytes` and then fills `buffer` with the device answer.
    fn write_read(&mut self, bytes: &[u8], buffer: &mut [u8]) -> Result<(), I2CError>;

    /// Releases the resources taken by [RtcTransport::open]. Closing twice is harmless.
    fn close(&mut self);
}

/// Transport over any `embedded-hal` 1.0 I2C bus
pub struct HalTransport<I2C> {
    bus: I2C,
    addr: u8,
    probe: u8,
    opened: bool,
}

impl<I2C: I2c> HalTransport<I2C> {
    /// Creates a transport for the device on `addr`. The bus is expected to be already configured
    /// by the HAL, so opening only checks that the device acknowledges its address.
    pub fn new(bus: I2C, addr: u8) -> HalTransport<I2C> {
        HalTransport { bus, addr, probe: 0x00, opened: false }
    }

    /// Register address written when probing the device on open
    pub fn with_probe_register(mut self, reg: u8) -> HalTransport<I2C> {
        self.probe = reg;
        self
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Gives back the underlying bus
    pub fn release(self) -> I2C {
        self.bus
    }

    fn check_open(&self) -> Result<(), I2CError> {
        if self.opened {
            Ok(())
        } else {
            Err(I2CError::NotOpen)
        }
    }
}

impl<I2C: I2c> RtcTransport for HalTransport<I2C> {
    fn open(&mut self) -> Result<(), I2CError> {
        if self.opened {
            return Ok(());
        }
        self.bus.write(self.addr, &[self.probe]).map_err(|error| error_from_kind(error.kind()))?;
        self.opened = true;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), I2CError> {
        self.check_open()?;
        self.bus.write(self.addr, bytes).map_err(|error| error_from_kind(error.kind()))
    }

    fn write_read(&mut self, bytes: &[u8], buffer: &mut [u8]) -> Result<(), I2CError> {
        self.check_open()?;
        self.bus.write_read(self.addr, bytes, buffer).map_err(|error| error_from_kind(error.kind()))
    }

    fn close(&mut self) {
        self.opened = false;
    }
}

fn error_from_kind(kind: ErrorKind) -> I2CError {
    match kind {
        ErrorKind::NoAcknowledge(_) => I2CError::NoAcknowledge,
        ErrorKind::ArbitrationLoss => I2CError::ArbitrationLoss,
        ErrorKind::Bus => I2CError::BusError,
        _ => I2CError::DriverError,
    }
}
