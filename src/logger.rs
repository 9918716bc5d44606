//! `log` sink over the RTT up channel.
use log::{LevelFilter, Log, Metadata, Record};
use rtt_target::{rprintln, rtt_init_print};

struct RttLogger;

static LOGGER: RttLogger = RttLogger;

impl Log for RttLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            rprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Set up RTT and route `log` through it. Logging stays silent if a logger
/// was already installed.
pub fn init() {
    rtt_init_print!();
    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
