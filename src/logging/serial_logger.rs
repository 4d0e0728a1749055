use core::fmt::Write;

use artybot_hardware::{
    bus::Mmio,
    uart::{UartLite, UART_LITE_BASE},
};
use log::{Level, Metadata, Record};

struct SerialLogger;

static SERIAL_LOGGER: SerialLogger = SerialLogger;

pub(super) fn get_logger() -> &'static dyn log::Log {
    &SERIAL_LOGGER
}

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // SAFETY: the UART Lite block belongs to this logger, see `ArtyHardware::steal`.
        let mut tx = UartLite::new(unsafe { Mmio::steal() }, UART_LITE_BASE);
        writeln!(tx, "{}: {}\r", level_tag(record.level()), record.args()).ok();
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRACE",
        Level::Debug => "DEBUG",
        Level::Info => "INFO",
        Level::Warn => "WARN",
        Level::Error => "ERROR",
    }
}
