//! Frontend monitoring: console logging only

pub mod logger;

pub use logger::Logger;

/// Initialize frontend monitoring
pub fn init() {
    Logger::init();
}
