use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::utils::rtc_error::RtcError;

const TM_YEAR_BASE: i32 = 1900;

/// Calendar date as kept by the RTC.
///
/// - `year`: full year, e.g. 2025. Only `year % 100` reaches the chip
/// - `month`: 1-12
/// - `day`: day of the month, 1-31
/// - `weekday`: 0-6, 0 being Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
}

/// Time of day in 24 hour format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarDateTime {
    pub date: CalendarDate,
    pub time: CalendarTime,
}

/// Broken-down time with the conventions of the C `struct tm`: months are 0-based, years count from
/// 1900 and the week starts on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrokenDownTime {
    pub seconds: i32,
    pub minutes: i32,
    pub hours: i32,
    pub month_day: i32,
    pub month: i32,
    pub years_since_1900: i32,
    pub week_day: i32,
    pub year_day: i32,
    pub is_dst: i32,
}

impl CalendarDate {
    pub fn new(year: u16, month: u8, day: u8, weekday: u8) -> Self {
        CalendarDate { year, month, day, weekday }
    }
}

impl CalendarTime {
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        CalendarTime { hours, minutes, seconds }
    }
}

impl CalendarDateTime {
    pub fn new(date: CalendarDate, time: CalendarTime) -> Self {
        CalendarDateTime { date, time }
    }

    /// Seconds since 1970-01-01 00:00:00, reading the value as UTC whatever the local time zone is.
    /// Fails with [RtcError::InvalidArgument] if the fields do not form an existing date and time.
    pub fn to_unix_seconds(&self) -> Result<i64, RtcError> {
        let datetime = NaiveDateTime::try_from(*self)?;
        Ok(datetime.and_utc().timestamp())
    }

    pub fn to_broken_down(&self) -> BrokenDownTime {
        BrokenDownTime::from(*self)
    }
}

impl From<CalendarDateTime> for BrokenDownTime {
    fn from(datetime: CalendarDateTime) -> Self {
        BrokenDownTime {
            seconds: datetime.time.seconds as i32,
            minutes: datetime.time.minutes as i32,
            hours: datetime.time.hours as i32,
            month_day: datetime.date.day as i32,
            month: datetime.date.month as i32 - 1,
            years_since_1900: datetime.date.year as i32 - TM_YEAR_BASE,
            week_day: datetime.date.weekday as i32,
            year_day: 0,
            is_dst: 0,
        }
    }
}

impl TryFrom<BrokenDownTime> for CalendarDateTime {
    type Error = RtcError;

    fn try_from(tm: BrokenDownTime) -> Result<Self, Self::Error> {
        let field = |value: i32| u8::try_from(value).map_err(|_| RtcError::InvalidArgument);
        let year = tm.years_since_1900.checked_add(TM_YEAR_BASE).ok_or(RtcError::InvalidArgument)?;
        let month = tm.month.checked_add(1).ok_or(RtcError::InvalidArgument)?;

        let date = CalendarDate {
            year: u16::try_from(year).map_err(|_| RtcError::InvalidArgument)?,
            month: field(month)?,
            day: field(tm.month_day)?,
            weekday: field(tm.week_day)?,
        };
        let time = CalendarTime {
            hours: field(tm.hours)?,
            minutes: field(tm.minutes)?,
            seconds: field(tm.seconds)?,
        };
        Ok(CalendarDateTime { date, time })
    }
}

impl TryFrom<CalendarDateTime> for NaiveDateTime {
    type Error = RtcError;

    fn try_from(datetime: CalendarDateTime) -> Result<Self, Self::Error> {
        let CalendarDateTime { date, time } = datetime;
        NaiveDate::from_ymd_opt(date.year as i32, date.month as u32, date.day as u32)
            .and_then(|day| day.and_hms_opt(time.hours as u32, time.minutes as u32, time.seconds as u32))
            .ok_or(RtcError::InvalidArgument)
    }
}

impl TryFrom<NaiveDateTime> for CalendarDateTime {
    type Error = RtcError;

    /// The weekday is derived from the date
    fn try_from(datetime: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = u16::try_from(datetime.year()).map_err(|_| RtcError::InvalidArgument)?;
        Ok(CalendarDateTime {
            date: CalendarDate {
                year,
                month: datetime.month() as u8,
                day: datetime.day() as u8,
                weekday: datetime.weekday().num_days_from_sunday() as u8,
            },
            time: CalendarTime {
                hours: datetime.hour() as u8,
                minutes: datetime.minute() as u8,
                seconds: datetime.second() as u8,
            },
        })
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}
