pub mod bcd_codec;
mod calendar;
mod rtc_session;

pub use calendar::{BrokenDownTime, CalendarDate, CalendarDateTime, CalendarTime};
pub use rtc_session::RtcSession;

/// RTC8563 reached through the native esp-idf I2C driver
#[cfg(target_os = "espidf")]
pub type RTC8563<'a> = RtcSession<crate::serial::I2CMaster<'a>>;
