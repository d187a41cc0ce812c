use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use esp32rtc::{
    sensors::{CalendarDate, CalendarDateTime, CalendarTime, RtcSession},
    serial::{HalTransport, I2CError, RTC8563_ADDR},
    RtcError,
};

const SAMPLE_REGISTERS: [u8; 7] = [0x07, 0x41, 0x09, 0x06, 0x15, 0x03, 0x25];

fn sample() -> CalendarDateTime {
    CalendarDateTime::new(CalendarDate::new(2025, 3, 15, 6), CalendarTime::new(9, 41, 7))
}

fn probe() -> I2cTransaction {
    I2cTransaction::write(RTC8563_ADDR, vec![0x00])
}

fn read_registers(registers: [u8; 7]) -> I2cTransaction {
    I2cTransaction::write_read(RTC8563_ADDR, vec![0x00], registers.to_vec())
}

#[test]
fn reads_the_datetime_registers_after_the_register_address() {
    let expectations = [probe(), read_registers(SAMPLE_REGISTERS)];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    rtc.begin().unwrap();
    assert_eq!(rtc.get_datetime(), Ok(sample()));

    i2c.done();
}

#[test]
fn clock_integrity_flag_does_not_change_the_seconds() {
    let mut flagged = SAMPLE_REGISTERS;
    flagged[0] |= 0x80;
    let expectations = [probe(), read_registers(flagged)];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    rtc.begin().unwrap();
    assert_eq!(rtc.get_time(), Ok(sample().time));

    i2c.done();
}

#[test]
fn writes_the_datetime_in_one_transaction() {
    let expectations = [
        probe(),
        I2cTransaction::write(RTC8563_ADDR, vec![0x00, 0x07, 0x41, 0x09, 0x06, 0x15, 0x03, 0x25]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    rtc.begin().unwrap();
    rtc.set_datetime(&sample()).unwrap();

    i2c.done();
}

#[test]
fn set_time_writes_back_the_current_date() {
    let expectations = [
        probe(),
        read_registers(SAMPLE_REGISTERS),
        I2cTransaction::write(RTC8563_ADDR, vec![0x00, 0x30, 0x15, 0x22, 0x06, 0x15, 0x03, 0x25]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    rtc.begin().unwrap();
    rtc.set_time(&CalendarTime::new(22, 15, 30)).unwrap();

    i2c.done();
}

#[test]
fn set_date_writes_back_the_current_time() {
    let expectations = [
        probe(),
        read_registers(SAMPLE_REGISTERS),
        I2cTransaction::write(RTC8563_ADDR, vec![0x00, 0x07, 0x41, 0x09, 0x01, 0x01, 0x01, 0x29]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    rtc.begin().unwrap();
    rtc.set_date(&CalendarDate::new(2029, 1, 1, 1)).unwrap();

    i2c.done();
}

#[test]
fn missing_chip_fails_begin_and_later_reads_stay_off_the_bus() {
    let expectations = [probe().with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    assert_eq!(rtc.begin(), Err(RtcError::TransportError(I2CError::NoAcknowledge)));
    assert!(!rtc.is_ready());
    assert_eq!(rtc.get_datetime(), Err(RtcError::NotInitialized));

    i2c.done();
}

#[test]
fn failed_read_drops_the_partial_update() {
    let expectations = [
        probe(),
        read_registers(SAMPLE_REGISTERS).with_error(ErrorKind::Bus),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    rtc.begin().unwrap();
    assert_eq!(rtc.set_time(&CalendarTime::new(0, 0, 0)), Err(RtcError::TransportError(I2CError::BusError)));

    i2c.done();
}

#[test]
fn write_errors_reach_the_caller() {
    let expectations = [
        probe(),
        I2cTransaction::write(RTC8563_ADDR, vec![0x00, 0x07, 0x41, 0x09, 0x06, 0x15, 0x03, 0x25])
            .with_error(ErrorKind::ArbitrationLoss),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    rtc.begin().unwrap();
    assert_eq!(rtc.set_datetime(&sample()), Err(RtcError::TransportError(I2CError::ArbitrationLoss)));

    i2c.done();
}

#[test]
fn released_transport_is_closed_and_gives_back_the_bus() {
    let expectations = [probe()];
    let mut i2c = I2cMock::new(&expectations);
    let mut rtc = RtcSession::new(HalTransport::new(i2c.clone(), RTC8563_ADDR));

    rtc.begin().unwrap();
    let transport = rtc.release();
    assert!(!transport.is_open());
    assert_eq!(transport.address(), RTC8563_ADDR);
    drop(transport.release());

    i2c.done();
}
