mod i2c;
mod transport;

pub use i2c::{I2CError, I2cBusConfig, RTC8563_ADDR};
#[cfg(target_os = "espidf")]
pub use i2c::I2CMaster;
pub use transport::{HalTransport, RtcTransport};
