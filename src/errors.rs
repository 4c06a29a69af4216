/*!
 * Error types for the aozora2mdx application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while converting source markup
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The required main-content region is missing from the source markup.
    /// This is a hard precondition of the extractor; there is no fallback.
    #[error("main text region not found in source markup")]
    MissingMainContent,
}

/// Errors that can occur while working with the reading store
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// Strict-mode consumption from an empty queue. The caller asserted the
    /// store fully covered the document, so this is a contract violation.
    #[error("no stored reading left for base text '{base}'")]
    StoreExhausted {
        /// Base text whose queue ran dry
        base: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from markup conversion
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Error from annotation handling
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
