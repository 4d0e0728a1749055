#[cfg(feature = "null_logger")]
#[cfg(not(feature = "serial_logger"))]
mod null_logger;

#[cfg(feature = "serial_logger")]
mod serial_logger;

pub use log::Level;
use log::SetLoggerError;

/// Installs the sink selected by cargo feature and sets the global level.
pub fn init(level: Level) -> Result<(), SetLoggerError> {
    #[cfg(feature = "serial_logger")]
    log::set_logger(serial_logger::get_logger())?;

    #[cfg(feature = "null_logger")]
    #[cfg(not(feature = "serial_logger"))]
    log::set_logger(null_logger::get_logger())?;

    log::set_max_level(level.to_level_filter());
    Ok(())
}
