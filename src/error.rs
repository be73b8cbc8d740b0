//! Error types for the calendar renderer

use thiserror::Error;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Errors that can occur while rendering a calendar
#[derive(Error, Debug)]
pub enum CalendarError {
    /// The configured year is outside the supported range
    #[error("Year {0} is outside the supported range {min}..={max}", min = crate::constants::MIN_YEAR, max = crate::constants::MAX_YEAR)]
    InvalidYear(i32),

    /// The configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Converting the rendered SVG to PDF failed
    #[error(transparent)]
    Pdf(#[from] PdfError),
}

impl From<serde_json::Error> for CalendarError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

/// Errors raised by the PDF transcoder.
///
/// These are the only genuinely fatal rendering failures: a PDF with dangling
/// references or an unparsable page cannot be emitted.
#[derive(Error, Debug)]
pub enum PdfError {
    /// No pages were supplied
    #[error("PDF document has no pages")]
    EmptyDocument,

    /// The SVG references an id that no element defines
    #[error("Unresolved SVG reference: #{0}")]
    UnresolvedReference(String),

    /// The SVG could not be parsed
    #[error("SVG parse failed: {0}")]
    Parse(String),

    /// The parsed SVG could not be converted to PDF objects
    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    /// PDF support was compiled out
    #[error("PDF output requires the `pdf` feature")]
    Unsupported,
}
