use std::time::Duration;

use esp_idf_svc::hal::delay::TickType;

/// Converts a timeout in microseconds into FreeRTOS ticks, as expected by the esp-idf drivers
pub fn micro_to_ticks(time_us: u32) -> u32 {
    TickType::from(Duration::from_micros(time_us as u64)).ticks()
}
