//! Browser console logging for the prediction page

use std::sync::Once;

static INIT: Once = Once::new();

pub struct Logger;

impl Logger {
    /// Initialize logging (call once at app startup)
    pub fn init() {
        INIT.call_once(|| {
            Self::log_info("Price prediction page initialized");
        });
    }

    pub fn log_info(msg: &str) {
        Self::log_with_level("INFO", msg);
    }

    pub fn warn(msg: &str) {
        Self::log_with_level("WARN", msg);
    }

    pub fn error(msg: &str) {
        Self::log_with_level("ERROR", msg);
    }

    pub fn debug(msg: &str) {
        Self::log_with_level("DEBUG", msg);
    }

    fn log_with_level(level: &str, msg: &str) {
        let line = Self::format_line(&Self::timestamp(), level, msg);

        match level {
            "ERROR" => web_sys::console::error_1(&line.into()),
            "WARN" => web_sys::console::warn_1(&line.into()),
            "DEBUG" => web_sys::console::debug_1(&line.into()),
            _ => web_sys::console::log_1(&line.into()),
        }
    }

    fn format_line(timestamp: &str, level: &str, msg: &str) -> String {
        format!("[{}] {} - {}", timestamp, level, msg)
    }

    fn timestamp() -> String {
        chrono::Local::now().format("%H:%M:%S%.3f").to_string()
    }
}
