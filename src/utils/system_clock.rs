#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{settimeofday, timeval, timezone};

use super::rtc_error::RtcError;

/// Time-zone information forwarded to the system clock together with the time,
/// same meaning as the fields of the C `struct timezone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimezoneHint {
    pub minutes_west: i32,
    pub dst_time: i32,
}

/// Process-wide wall clock that can be set from the RTC
pub trait SystemClock {
    fn set_system_time(&mut self, seconds_since_epoch: i64, timezone: Option<TimezoneHint>) -> Result<(), RtcError>;
}

/// System clock of the esp-idf newlib runtime
#[cfg(target_os = "espidf")]
#[derive(Debug, Default)]
pub struct EspSystemClock;

#[cfg(target_os = "espidf")]
impl SystemClock for EspSystemClock {
    fn set_system_time(&mut self, seconds_since_epoch: i64, tz_hint: Option<TimezoneHint>) -> Result<(), RtcError> {
        let now = timeval { tv_sec: seconds_since_epoch as _, tv_usec: 0 };
        let tz = tz_hint.map(|hint| timezone { tz_minuteswest: hint.minutes_west, tz_dsttime: hint.dst_time });
        let tz_ptr = tz.as_ref().map_or(std::ptr::null(), |tz| tz as *const timezone);

        let result = unsafe { settimeofday(&now, tz_ptr) };
        if result != 0 {
            ::log::error!("settimeofday failed with {}", result);
            return Err(RtcError::SystemClockError(result));
        }
        Ok(())
    }
}
