mod utils;

pub mod sensors;
pub mod serial;

pub use utils::rtc_error::RtcError;
pub use utils::system_clock;
