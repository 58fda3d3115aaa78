//! Error types for offergen.
//!
//! Library crates use [`OffergenError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Only [`OffergenError::PageUnavailable`] and [`OffergenError::Network`]
//! surface from the extraction pipeline; a missing field or a failed registry
//! lookup is reflected as an empty value, never as an error.

use std::path::PathBuf;

/// Top-level error type for all offergen operations.
#[derive(Debug, thiserror::Error)]
pub enum OffergenError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching a page.
    #[error("network error: {0}")]
    Network(String),

    /// The notice page failed to load or rendered an error page.
    /// Fatal to the extraction call: no partial record is produced.
    #[error("page unavailable: {url}: {reason}")]
    PageUnavailable { url: String, reason: String },

    /// HTML parsing error (total structural absence of a parseable body).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (invalid URL, malformed input, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OffergenError>;

impl OffergenError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Mark a notice page as unavailable, with the reason the fetch failed.
    pub fn page_unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PageUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = OffergenError::config("missing registry endpoint");
        assert_eq!(err.to_string(), "config error: missing registry endpoint");

        let err = OffergenError::page_unavailable("https://example.com/view/1", "HTTP 404");
        assert!(err.to_string().contains("HTTP 404"));
        assert!(err.to_string().contains("page unavailable"));
    }
}
