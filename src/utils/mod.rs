#[cfg(target_os = "espidf")]
pub(crate) mod auxiliary;
pub mod rtc_error;
pub mod system_clock;
