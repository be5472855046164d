//! Form definitions backing the page routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod assistant;
pub mod auth;
pub mod cases;
#[cfg(feature = "server")]
pub mod documents;
pub mod filters;
pub mod lawyers;
pub mod legal_templates;
pub mod notifications;
pub mod profile;
pub mod scraper;
pub mod translation;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("Please check the highlighted fields: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password must be at least {0} characters.")]
    PasswordTooShort(usize),

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Unknown gender option.")]
    InvalidGender,

    #[error("{0} is not a valid date.")]
    InvalidDate(&'static str),

    #[error("{0} must be a year between 1947 and 2100.")]
    InvalidYear(&'static str),

    #[error("Rating must be between 1 and 5.")]
    InvalidRating,

    #[error("Message cannot be empty.")]
    EmptyMessage,

    #[error("Unsupported language: {0}")]
    InvalidLanguage(String),

    #[error("Unknown document type: {0}")]
    InvalidDocType(String),

    #[error("Please choose a file to upload.")]
    MissingFile,

    #[error("Unknown scraper selected.")]
    InvalidScraper,

    #[error("The form could not be read.")]
    Malformed,
}
