//! Example using the default M5Stack wiring (GPIO31 sda, GPIO32 scl) to read the RTC8563,
//! print the date and time every second, and set the system clock from it once at startup.

#[cfg(target_os = "espidf")]
fn main() {
    use esp32rtc::{
        sensors::{CalendarDate, CalendarTime, RTC8563},
        serial::{I2CMaster, I2cBusConfig},
        system_clock::EspSystemClock,
    };
    use esp_idf_svc::hal::delay::FreeRtos;

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let mut rtc = RTC8563::new(I2CMaster::new(I2cBusConfig::default()));
    if let Err(error) = rtc.begin() {
        ::log::error!("No RTC found: {}", error);
        return;
    }

    if rtc.get_date().map(|date| date.year < 2025).unwrap_or(true) {
        if let Err(error) = rtc.set_date(&CalendarDate::new(2025, 3, 15, 6)) {
            ::log::error!("Could not set the RTC date: {}", error);
        }
        if let Err(error) = rtc.set_time(&CalendarTime::new(9, 41, 7)) {
            ::log::error!("Could not set the RTC time: {}", error);
        }
    }

    match rtc.push_to_system_clock(&mut EspSystemClock, None) {
        Ok(seconds) => ::log::info!("System clock set to {} s since epoch", seconds),
        Err(error) => ::log::error!("Could not set the system clock: {}", error),
    }

    loop {
        match rtc.get_datetime() {
            Ok(datetime) => println!("{}, weekday {}", datetime, datetime.date.weekday),
            Err(error) => println!("RTC read failed: {}", error),
        }
        FreeRtos::delay_ms(1000);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    println!("This example only runs on an esp-idf target");
}
