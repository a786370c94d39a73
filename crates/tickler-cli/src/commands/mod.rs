pub mod preview;
pub mod sweep;
pub mod tz;
