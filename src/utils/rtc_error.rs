use std::fmt;

use crate::serial::I2CError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcError {
    /// The session was used before a successful `begin`
    NotInitialized,
    TransportTimeout,
    TransportError(I2CError),
    /// A field is out of range or the calendar value is not a real date/time
    InvalidArgument,
    /// The system clock refused the new time, carries the status it returned
    SystemClockError(i32),
}

impl From<I2CError> for RtcError {
    fn from(error: I2CError) -> Self {
        match error {
            I2CError::TimeoutError => RtcError::TransportTimeout,
            other => RtcError::TransportError(other),
        }
    }
}

impl fmt::Display for RtcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcError::NotInitialized => write!(f, "RTC not initialized"),
            RtcError::TransportTimeout => write!(f, "RTC transaction timed out"),
            RtcError::TransportError(error) => write!(f, "RTC transport error: {:?}", error),
            RtcError::InvalidArgument => write!(f, "invalid RTC datetime"),
            RtcError::SystemClockError(status) => write!(f, "system clock rejected the time (status {})", status),
        }
    }
}

impl std::error::Error for RtcError {}
