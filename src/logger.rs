use flexi_logger::{Logger, LoggerHandle};

use crate::LoggerError;

pub const DEFAULT_LOG_SPEC: &str = "info";

/// Configures logging to stderr from `RUST_LOG`, or else from `spec`.
pub fn build_logger(spec: Option<&str>) -> Result<Logger, LoggerError> {
    let logger = Logger::try_with_env_or_str(spec.unwrap_or(DEFAULT_LOG_SPEC))?
        .log_to_stderr()
        .format(flexi_logger::detailed_format);
    Ok(logger)
}

/// Starts the logger of [`build_logger`].
///
/// Only one logger can be installed per process, so any call after the first
/// successful one fails. Keep the returned handle alive for as long as logs
/// should be written.
pub fn init_logger(spec: Option<&str>) -> Result<LoggerHandle, LoggerError> {
    let handle = build_logger(spec)?.start()?;
    log::debug!("Logger started");
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_logger() {
        assert!(build_logger(Some("debug")).is_ok());
        assert!(build_logger(None).is_ok());
    }
}
