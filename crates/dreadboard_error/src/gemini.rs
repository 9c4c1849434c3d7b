//! Gemini-specific error types and retry classification.

/// Gemini-specific error conditions.
///
/// The adapter classifies every failure into one of these kinds, so retry
/// decisions never depend on the wording of an upstream error message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Failed to create the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Connection could not be established or was dropped mid-request
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// Request exceeded the configured timeout
    #[display("Request timed out: {}", _0)]
    Timeout(String),
    /// Response body could not be parsed into the expected shape
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
}

impl GeminiErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Rate limiting, server-side failures and transport problems are
    /// transient. Everything else (bad request, auth, unparsable output)
    /// fails immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeminiErrorKind::HttpError { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            GeminiErrorKind::Transport(_) => true,
            GeminiErrorKind::Timeout(_) => true,
            _ => false,
        }
    }
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use dreadboard_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use dreadboard_error::{GeminiError, GeminiErrorKind, RetryableError};
///
/// let err = GeminiError::new(GeminiErrorKind::HttpError {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = GeminiError::new(GeminiErrorKind::HttpError {
///     status_code: 400,
///     message: "Bad request".to_string(),
/// });
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503 (service unavailable), 429 (rate limit),
    /// or network timeouts should return true. Permanent errors like 401
    /// (unauthorized) or 400 (bad request) should return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GeminiError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status_code: u16) -> GeminiErrorKind {
        GeminiErrorKind::HttpError {
            status_code,
            message: String::new(),
        }
    }

    #[test]
    fn transient_statuses_are_retryable() {
        for code in [408, 429, 500, 502, 503, 504] {
            assert!(http(code).is_retryable(), "status {code} should retry");
        }
    }

    #[test]
    fn client_errors_are_permanent() {
        for code in [400, 401, 403, 404] {
            assert!(!http(code).is_retryable(), "status {code} should not retry");
        }
        assert!(!GeminiErrorKind::MissingApiKey.is_retryable());
        assert!(!GeminiErrorKind::MalformedResponse("eof".into()).is_retryable());
    }

    #[test]
    fn transport_failures_are_retryable() {
        assert!(GeminiErrorKind::Transport("connection reset".into()).is_retryable());
        assert!(GeminiErrorKind::Timeout("300s".into()).is_retryable());
    }
}
