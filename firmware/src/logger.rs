//! Forwards `log` records from the core crates to defmt.

use core::fmt::Write;

use heapless::String;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Longest formatted message; longer ones are cut.
const LINE_CAPACITY: usize = 96;

struct DefmtLogger;

static LOGGER: DefmtLogger = DefmtLogger;

impl Log for DefmtLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut line: String<LINE_CAPACITY> = String::new();
        // A full buffer keeps what fit.
        let _ = write!(line, "{}", record.args());
        let target = record.target();
        match record.level() {
            Level::Error => defmt::error!("[{=str}] {=str}", target, line.as_str()),
            Level::Warn => defmt::warn!("[{=str}] {=str}", target, line.as_str()),
            Level::Info => defmt::info!("[{=str}] {=str}", target, line.as_str()),
            Level::Debug => defmt::debug!("[{=str}] {=str}", target, line.as_str()),
            Level::Trace => defmt::trace!("[{=str}] {=str}", target, line.as_str()),
        }
    }

    fn flush(&self) {}
}

/// Install the defmt bridge as the global `log` logger.
///
/// Must be called once, before any task is spawned.
pub fn init(level: LevelFilter) {
    // SAFETY: called from `main` before the executor runs anything else.
    unsafe {
        if log::set_logger_racy(&LOGGER).is_err() {
            defmt::warn!("log backend already installed");
        }
        log::set_max_level_racy(level);
    }
}
