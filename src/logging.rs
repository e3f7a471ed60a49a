use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Map `-v` counts and `--debug` onto a level. Warn is the default.
    pub fn from_flags(verbose: u8, debug: bool) -> Self {
        match (debug, verbose) {
            (true, _) | (false, 2..) => LogLevel::Debug,
            (false, 1) => LogLevel::Info,
            (false, 0) => LogLevel::Warn,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);

pub fn init(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn enabled(level: LogLevel) -> bool {
    LOG_LEVEL.load(Ordering::Relaxed) >= level as u8
}

pub fn error(message: impl AsRef<str>) {
    log(LogLevel::Error, message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    log(LogLevel::Warn, message.as_ref());
}

pub fn info(message: impl AsRef<str>) {
    log(LogLevel::Info, message.as_ref());
}

pub fn debug(message: impl AsRef<str>) {
    log(LogLevel::Debug, message.as_ref());
}

fn log(level: LogLevel, message: &str) {
    if enabled(level) {
        eprintln!("[{}] {}", level.label(), message);
    }
}
