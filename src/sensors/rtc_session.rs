use crate::serial::RtcTransport;
use crate::utils::{rtc_error::RtcError, system_clock::{SystemClock, TimezoneHint}};

use super::bcd_codec::{decode_datetime, encode_datetime, DATETIME_READ_LEN, DATETIME_REG};
use super::calendar::{CalendarDate, CalendarDateTime, CalendarTime};

/// Alarm value reported when the alarm is disabled
const ALARM_DISABLED: i32 = -1;

/// Driver for an RTC8563 compatible clock, generic over the transport used to reach the chip.
///
/// The session starts uninitialized. Until [RtcSession::begin] succeeds every getter fails with
/// [RtcError::NotInitialized] and every setter returns the same error without touching the bus.
///
/// The session is not reentrant: share it between threads only behind a lock.
pub struct RtcSession<T: RtcTransport> {
    transport: T,
    initialized: bool,
}

impl <T: RtcTransport>RtcSession<T> {
    pub fn new(transport: T) -> RtcSession<T> {
        RtcSession { transport, initialized: false }
    }

    /// Opens the transport. On failure the session stays uninitialized and the error is returned.
    /// Calling it again once ready does nothing.
    pub fn begin(&mut self) -> Result<(), RtcError> {
        if self.initialized {
            ::log::warn!("RTC already initialized");
            return Ok(());
        }

        self.transport.open().map_err(|error| {
            ::log::error!("Failed to open RTC transport: {:?}", error);
            RtcError::from(error)
        })?;
        self.initialized = true;
        ::log::info!("RTC initialized successfully");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.initialized
    }

    /// Closes the transport and goes back to the uninitialized state
    pub fn end(&mut self) {
        if self.initialized {
            self.transport.close();
            self.initialized = false;
            ::log::info!("RTC deinitialized");
        }
    }

    /// Ends the session and hands back the transport
    pub fn release(mut self) -> T {
        self.end();
        self.transport
    }

    fn check_ready(&self) -> Result<(), RtcError> {
        if self.initialized {
            Ok(())
        } else {
            Err(RtcError::NotInitialized)
        }
    }

    /// Reads the full date and time from the chip
    pub fn get_datetime(&mut self) -> Result<CalendarDateTime, RtcError> {
        self.check_ready()?;

        let mut data = [0_u8; DATETIME_READ_LEN];
        self.transport.write_read(&[DATETIME_REG], &mut data).map_err(|error| {
            ::log::error!("Failed to read RTC time: {:?}", error);
            RtcError::from(error)
        })?;

        let datetime = decode_datetime(&data);
        ::log::debug!("RTC time read: {}", datetime);
        Ok(datetime)
    }

    /// Writes the full date and time in a single transaction. Bus errors are logged and returned.
    pub fn set_datetime(&mut self, datetime: &CalendarDateTime) -> Result<(), RtcError> {
        self.check_ready()?;

        self.transport.write(&encode_datetime(datetime)).map_err(|error| {
            ::log::error!("Failed to set RTC time: {:?}", error);
            RtcError::from(error)
        })?;

        ::log::info!("RTC time set: {}", datetime);
        Ok(())
    }

    pub fn get_time(&mut self) -> Result<CalendarTime, RtcError> {
        self.get_datetime().map(|datetime| datetime.time)
    }

    pub fn get_date(&mut self) -> Result<CalendarDate, RtcError> {
        self.get_datetime().map(|datetime| datetime.date)
    }

    /// Replaces the time keeping the current date. The date is read first, so if that read fails
    /// nothing is written.
    ///
    /// The chip keeps counting between the read and the write, so a date rollover in that window
    /// can be lost.
    pub fn set_time(&mut self, time: &CalendarTime) -> Result<(), RtcError> {
        let mut datetime = self.get_datetime()?;
        datetime.time = *time;
        self.set_datetime(&datetime)
    }

    /// Replaces the date keeping the current time. Same read-modify-write caveats as [RtcSession::set_time].
    pub fn set_date(&mut self, date: &CalendarDate) -> Result<(), RtcError> {
        let mut datetime = self.get_datetime()?;
        datetime.date = *date;
        self.set_datetime(&datetime)
    }

    /// Reads the RTC and sets the system clock with it. The RTC value is taken as UTC.
    ///
    /// # Returns
    ///
    /// The seconds since the epoch given to the system clock. If the RTC cannot be read the
    /// system clock is left untouched.
    pub fn push_to_system_clock<C: SystemClock>(&mut self, clock: &mut C, timezone: Option<TimezoneHint>) -> Result<i64, RtcError> {
        let datetime = self.get_datetime()?;
        let seconds = datetime.to_unix_seconds().map_err(|error| {
            ::log::error!("RTC holds an invalid datetime: {}", datetime);
            error
        })?;

        clock.set_system_time(seconds, timezone)?;
        ::log::info!("System time set from RTC: {}", datetime);
        Ok(seconds)
    }

    /// Alarm interrupts are not wired up yet. Negative values report the alarm as disabled (-1),
    /// any other value is echoed back.
    pub fn set_alarm_irq_after(&mut self, after_seconds: i32) -> i32 {
        if after_seconds < 0 {
            return ALARM_DISABLED;
        }
        after_seconds
    }

    /// Alarm interrupts are not wired up yet, always reports success (0)
    pub fn set_alarm_irq_at_time(&mut self, _time: &CalendarTime) -> i32 {
        0
    }

    /// Alarm interrupts are not wired up yet, always reports success (0)
    pub fn set_alarm_irq_at(&mut self, _date: &CalendarDate, _time: &CalendarTime) -> i32 {
        0
    }

    /// Alarm interrupts are not wired up yet, never pending
    pub fn get_irq_status(&mut self) -> bool {
        false
    }

    pub fn clear_irq(&mut self) {}

    pub fn disable_irq(&mut self) {}

    /// Backup battery check is not wired up, power is always reported as OK
    pub fn get_volt_low(&mut self) -> bool {
        false
    }
}
