// journal-pdf: error type shared by the CLI, config boundary and renderer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Invalid date format: {0}")]
    DateError(String),
    #[error("End date {end} is before start date {start}")]
    ReversedRange { start: String, end: String },
    #[error("Date range covers {days} days, at most {max} are supported")]
    RangeTooLong { days: u32, max: u32 },
    #[error("Invalid category list: {0}")]
    CategoryError(String),
    #[error("Unsupported locale: {0}")]
    LocaleError(String),
    #[error("Failed to load translations: {0}")]
    TranslationError(String),
    #[error("Failed to load cover image: {0}")]
    ImageError(String),
    #[error("Failed to start logger: {0}")]
    LoggingError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
