use std::time::Duration;

use thiserror::Error;

/// Error type shared by every Hyperbrowser client operation.
#[derive(Error, Debug)]
pub enum HyperbrowserError {
    /// Client configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request parameters were rejected before any network call.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The API answered with a non-success status.
    #[error("HTTP {status_code}: {message}")]
    HttpError { message: String, status_code: u16 },

    /// Request timed out.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A successful response carried a body that is not the expected JSON.
    #[error("Failed to parse JSON response: {message}")]
    ParseError {
        message: String,
        status_code: Option<u16>,
    },

    /// JSON serialization of request parameters failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The start call succeeded but returned no job identifier.
    #[error("Failed to start {job}, could not get job ID")]
    MissingJobId { job: String },

    /// Status polling hit the consecutive-failure ceiling.
    #[error("Failed to poll {job} {job_id} after {attempts} attempts: {source}")]
    PollFailed {
        job: String,
        job_id: String,
        attempts: u32,
        #[source]
        source: Box<HyperbrowserError>,
    },

    /// Fetching the final result hit the consecutive-failure ceiling.
    #[error("Failed to get {job} {job_id} after {attempts} attempts: {source}")]
    FetchFailed {
        job: String,
        job_id: String,
        attempts: u32,
        #[source]
        source: Box<HyperbrowserError>,
    },

    /// Fetching a result page hit the consecutive-failure ceiling.
    #[error("Failed to get batch page {page} for {job} {job_id} after {attempts} attempts: {source}")]
    PageFailed {
        job: String,
        job_id: String,
        page: u32,
        attempts: u32,
        #[source]
        source: Box<HyperbrowserError>,
    },

    /// The caller cancelled the wait.
    #[error("Wait cancelled for {0}")]
    Cancelled(String),

    /// The configured wait deadline elapsed.
    #[error("Deadline of {limit:?} exceeded waiting for {what}")]
    DeadlineExceeded { what: String, limit: Duration },
}

impl HyperbrowserError {
    /// HTTP status code associated with this error, if any.
    ///
    /// Ceiling errors report the status of the last underlying failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HyperbrowserError::HttpError { status_code, .. } => Some(*status_code),
            HyperbrowserError::ParseError { status_code, .. } => *status_code,
            HyperbrowserError::PollFailed { source, .. }
            | HyperbrowserError::FetchFailed { source, .. }
            | HyperbrowserError::PageFailed { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Returns true if the caller asked the wait to stop (cancel or deadline).
    ///
    /// Interruptions end a wait immediately and never count as poll failures.
    pub fn is_interruption(&self) -> bool {
        matches!(
            self,
            HyperbrowserError::Cancelled(_) | HyperbrowserError::DeadlineExceeded { .. }
        )
    }
}
