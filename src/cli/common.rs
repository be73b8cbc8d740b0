//! Shared CLI plumbing: exit codes, errors and output helpers.

use crate::config::Configuration;
use crate::error::CalendarError;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Process exit codes of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input: invalid year, malformed configuration, bad argument
    ValidationError = 1,
    /// File system or rendering failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// A command failure with its exit code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    message: String,
    exit_code: ExitCode,
}

impl CliError {
    /// Failure caused by the user's input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }

    /// File system or render failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }

    /// Exit code to terminate with.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    /// Classifies an error from configuration loading.
    ///
    /// Read failures are I/O errors; everything else (parse errors, an
    /// out-of-range year) is the user's input.
    #[must_use]
    pub fn from_config_error(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if err.chain().any(|cause| cause.is::<std::io::Error>()) {
            Self::io(message)
        } else {
            Self::validation(message)
        }
    }
}

impl From<CalendarError> for CliError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidYear(_) | CalendarError::InvalidConfiguration(_) => {
                Self::validation(err.to_string())
            }
            CalendarError::Pdf(_) => Self::io(err.to_string()),
        }
    }
}

/// Result type of CLI commands.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Loads `path`, or the default calendar file when no path is given, then
/// applies a `--year` override.
pub fn load_configuration(path: Option<&Path>, year: Option<i32>) -> CliResult<Configuration> {
    let mut config = match path {
        Some(path) => Configuration::load(path),
        None => Configuration::load_default(),
    }
    .map_err(|e| CliError::from_config_error(&e))?;

    if let Some(year) = year {
        config.year = year;
    }
    config.validate()?;
    Ok(config)
}

/// Writes `bytes` to `path`, creating parent directories.
pub fn write_output(path: &Path, bytes: &[u8]) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CliError::io(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    fs::write(path, bytes)
        .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("x").exit_code().code(), 1);
        assert_eq!(CliError::io("x").exit_code().code(), 2);
    }

    #[test]
    fn test_calendar_error_classification() {
        let err: CliError = CalendarError::InvalidYear(99).into();
        assert_eq!(err.exit_code(), ExitCode::ValidationError);
        let err: CliError = CalendarError::Pdf(crate::error::PdfError::EmptyDocument).into();
        assert_eq!(err.exit_code(), ExitCode::IoError);
    }

    #[test]
    fn test_load_configuration_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.json");
        let err = load_configuration(Some(&missing), None).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::IoError);

        let bad = temp.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        let err = load_configuration(Some(&bad), None).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ValidationError);

        let good = temp.path().join("good.json");
        fs::write(&good, r#"{"year": 2030}"#).unwrap();
        let config = load_configuration(Some(&good), Some(2031)).unwrap();
        assert_eq!(config.year, 2031);

        let err = load_configuration(Some(&good), Some(12)).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ValidationError);
    }

    #[test]
    fn test_write_output_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/out.svg");
        write_output(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }
}
