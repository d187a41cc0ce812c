#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    hal::{gpio::AnyIOPin, i2c::{I2cConfig, I2cDriver, I2C0}, units::FromValueType},
    sys::{EspError, ESP_ERR_INVALID_ARG, ESP_ERR_NO_MEM, ESP_ERR_TIMEOUT},
};

#[cfg(target_os = "espidf")]
use crate::utils::auxiliary::micro_to_ticks;
#[cfg(target_os = "espidf")]
use super::RtcTransport;

/// Default 7-bit address of the RTC8563 family
pub const RTC8563_ADDR: u8 = 0x51;

const DEFAULT_BAUDRATE: u32 = 100;
const DEFAULT_SDA_PIN: i32 = 31;
const DEFAULT_SCL_PIN: i32 = 32;
const DEFAULT_TIMEOUT_US: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2CError {
    NotOpen,
    InvalidPin,
    InvalidArg,
    BufferTooSmall,
    NoAcknowledge,
    ArbitrationLoss,
    BusError,
    DriverError,
    TimeoutError,
}

/// Bus and device settings used by [I2CMaster] when it is opened.
///
/// The defaults match the wiring of the M5Stack boards: I2C port 0, SDA on GPIO31, SCL on GPIO32,
/// 100kHz, chip on [RTC8563_ADDR] and a 1 second timeout per transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cBusConfig {
    pub sda_pin: i32,
    pub scl_pin: i32,
    pub baudrate_khz: u32,
    pub device_addr: u8,
    pub timeout_us: u32,
}

impl Default for I2cBusConfig {
    fn default() -> Self {
        I2cBusConfig {
            sda_pin: DEFAULT_SDA_PIN,
            scl_pin: DEFAULT_SCL_PIN,
            baudrate_khz: DEFAULT_BAUDRATE,
            device_addr: RTC8563_ADDR,
            timeout_us: DEFAULT_TIMEOUT_US,
        }
    }
}

impl I2cBusConfig {
    pub fn with_pins(mut self, sda_pin: i32, scl_pin: i32) -> Self {
        self.sda_pin = sda_pin;
        self.scl_pin = scl_pin;
        self
    }

    pub fn with_baudrate_khz(mut self, baudrate_khz: u32) -> Self {
        self.baudrate_khz = baudrate_khz;
        self
    }

    pub fn with_device_addr(mut self, device_addr: u8) -> Self {
        self.device_addr = device_addr;
        self
    }

    pub fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }
}

/// Native ESP-IDF transport. The I2C0 driver is only created on [RtcTransport::open] and dropped
/// on [RtcTransport::close], so the bus is free while the session is not initialized.
#[cfg(target_os = "espidf")]
pub struct I2CMaster<'a> {
    config: I2cBusConfig,
    driver: Option<I2cDriver<'a>>,
}

#[cfg(target_os = "espidf")]
impl <'a>I2CMaster<'a> {
    pub fn new(config: I2cBusConfig) -> I2CMaster<'a> {
        I2CMaster { config, driver: None }
    }

    pub fn config(&self) -> &I2cBusConfig {
        &self.config
    }

    fn driver(&mut self) -> Result<&mut I2cDriver<'a>, I2CError> {
        self.driver.as_mut().ok_or(I2CError::NotOpen)
    }
}

#[cfg(target_os = "espidf")]
impl <'a>RtcTransport for I2CMaster<'a> {
    fn open(&mut self) -> Result<(), I2CError> {
        if self.driver.is_some() {
            return Ok(());
        }
        if self.config.sda_pin < 0 || self.config.scl_pin < 0 {
            return Err(I2CError::InvalidPin);
        }

        // The pins and the peripheral are owned by this transport alone for as long as the driver lives
        let i2c = unsafe { I2C0::new() };
        let sda = unsafe { AnyIOPin::new(self.config.sda_pin) };
        let scl = unsafe { AnyIOPin::new(self.config.scl_pin) };

        let config = I2cConfig::new().baudrate(self.config.baudrate_khz.kHz().into());
        let driver = I2cDriver::new(i2c, sda, scl, &config).map_err(|error| match error.code() {
            ESP_ERR_INVALID_ARG => I2CError::InvalidArg,
            _ => I2CError::DriverError,
        })?;

        self.driver = Some(driver);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), I2CError> {
        let addr = self.config.device_addr;
        let timeout: u32 = micro_to_ticks(self.config.timeout_us);
        self.driver()?.write(addr, bytes, timeout).map_err(map_transaction_error)
    }

    fn write_read(&mut self, bytes: &[u8], buffer: &mut [u8]) -> Result<(), I2CError> {
        let addr = self.config.device_addr;
        let timeout: u32 = micro_to_ticks(self.config.timeout_us);
        self.driver()?.write_read(addr, bytes, buffer, timeout).map_err(map_transaction_error)
    }

    fn close(&mut self) {
        self.driver = None;
    }
}

#[cfg(target_os = "espidf")]
fn map_transaction_error(error: EspError) -> I2CError {
    match error.code() {
        ESP_ERR_INVALID_ARG => I2CError::InvalidArg,
        ESP_ERR_NO_MEM => I2CError::BufferTooSmall,
        ESP_ERR_TIMEOUT => I2CError::TimeoutError,
        _ => I2CError::DriverError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_board_wiring() {
        let config = I2cBusConfig::default();
        assert_eq!(config.sda_pin, 31);
        assert_eq!(config.scl_pin, 32);
        assert_eq!(config.baudrate_khz, 100);
        assert_eq!(config.device_addr, 0x51);
        assert_eq!(config.timeout_us, 1_000_000);
    }

    #[test]
    fn config_setters_override_defaults() {
        let config = I2cBusConfig::default()
            .with_pins(5, 6)
            .with_baudrate_khz(400)
            .with_device_addr(0x68)
            .with_timeout_us(500);

        assert_eq!(config, I2cBusConfig { sda_pin: 5, scl_pin: 6, baudrate_khz: 400, device_addr: 0x68, timeout_us: 500 });
    }
}
