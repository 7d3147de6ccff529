//! Kernel logger backed by the serial port
//!
//! Routes `log` records to COM2. Install once during early boot, after
//! `serial::init`.

use conquer_once::spin::OnceCell;
use log::{LevelFilter, Log, Metadata, Record};

static LOGGER: OnceCell<SerialLogger> = OnceCell::uninit();

struct SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            crate::serial::_print(format_args!(
                "[{:5}] {}: {}\n",
                record.level(),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {
        // UART output is synchronous
    }
}

/// Install the serial logger.
///
/// Later calls only adjust the level filter.
pub fn init(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| SerialLogger);
    let _ = log::set_logger(logger);
    log::set_max_level(level);
}
