use super::calendar::{CalendarDate, CalendarDateTime, CalendarTime};

/// Register holding the seconds, first of the seven datetime registers
pub const DATETIME_REG: u8 = 0x00;
/// Bytes read back from the datetime registers
pub const DATETIME_READ_LEN: usize = 7;
/// Register address followed by the seven datetime registers
pub const DATETIME_WRITE_LEN: usize = DATETIME_READ_LEN + 1;
/// Century added to the two year digits kept by the chip
pub const CENTURY_BASE: u16 = 2000;

// Masks removing the flag and reserved bits of each register
const SECONDS_MASK: u8 = 0x7f;  // 0 1 1 1 1 1 1 1, top bit is the clock integrity flag
const MINUTES_MASK: u8 = 0x7f;  // 0 1 1 1 1 1 1 1
const HOURS_MASK: u8 = 0x3f;    // 0 0 1 1 1 1 1 1
const WEEKDAY_MASK: u8 = 0x07;  // 0 0 0 0 0 1 1 1
const DAY_MASK: u8 = 0x3f;      // 0 0 1 1 1 1 1 1
const MONTH_MASK: u8 = 0x1f;    // 0 0 0 1 1 1 1 1, top bit is the century flag

/// Turns a BCD byte into its binary value. Nibbles above 9 are not checked, so flag bits must be
/// masked out beforehand.
pub fn decode_byte(bcd: u8) -> u8 {
    ((bcd >> 4) * 10) + (bcd & 0x0F)
}

/// Turns a value between 0 and 99 into BCD. Larger values give a high nibble the chip cannot hold.
pub fn encode_byte(decimal: u8) -> u8 {
    ((decimal / 10) << 4) | (decimal % 10)
}

/// Builds the write transaction for the datetime registers: the register address followed by
/// seconds, minutes, hours, weekday, day, month and the last two digits of the year.
pub fn encode_datetime(datetime: &CalendarDateTime) -> [u8; DATETIME_WRITE_LEN] {
    let CalendarDateTime { date, time } = datetime;
    [
        DATETIME_REG,
        encode_byte(time.seconds),
        encode_byte(time.minutes),
        encode_byte(time.hours),
        encode_byte(date.weekday),
        encode_byte(date.day),
        encode_byte(date.month),
        encode_byte((date.year % 100) as u8),
    ]
}

/// Parses the seven datetime registers, ignoring the bits that do not hold digits
pub fn decode_datetime(data: &[u8; DATETIME_READ_LEN]) -> CalendarDateTime {
    let time = CalendarTime {
        seconds: decode_byte(data[0] & SECONDS_MASK),
        minutes: decode_byte(data[1] & MINUTES_MASK),
        hours: decode_byte(data[2] & HOURS_MASK),
    };
    let date = CalendarDate {
        weekday: decode_byte(data[3] & WEEKDAY_MASK),
        day: decode_byte(data[4] & DAY_MASK),
        month: decode_byte(data[5] & MONTH_MASK),
        year: CENTURY_BASE + decode_byte(data[6]) as u16,
    };
    CalendarDateTime { date, time }
}
