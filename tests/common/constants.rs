//! Shared constants for the end-to-end tests

pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const SERVER_READY_TIMEOUT_MS: u64 = 5_000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

// Seeded catalog (see fixtures.rs)
pub const GRACE_TITLE: &str = "Amazing Grace";
pub const GRACE_LANGUAGE: &str = "English";
pub const SILENT_TITLE: &str = "Silent Night";
pub const KANNADA_TITLE: &str = "ನಂಬಿಕೆ";
pub const KANNADA_LANGUAGE: &str = "Kannada";
