use std::time::Duration;

/// Error type for the monitor-stream-rs crate.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum MonitorError {
    /// No access token was available for the request.
    #[error("Missing credentials.")]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::MissingCredentials))]
    MissingCredentials,

    /// The requested page size was zero.
    #[error("The page size must be at least 1.")]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::InvalidPageSize))]
    InvalidPageSize,

    /// The server answered with a status code outside of 200-399.
    #[error("The server responded with status {status}: {message}")]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::Status))]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The message sent by the server, or the canonical reason if the body was empty.
        message: String,
        /// A user-facing hint for a known failure case.
        #[help]
        advisory: Option<String>,
    },

    /// The response body could not be parsed as a JSON document.
    #[error("The response body is not a valid JSON document.")]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::MalformedBody))]
    MalformedBody(#[source] serde_json::Error),

    /// The response body did not carry a string `endCursor` field.
    #[error("The response body does not contain a string `endCursor` field.")]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::MissingEndCursor))]
    MissingEndCursor,

    /// The stream produced more pages than the configured maximum.
    #[error("Stopped after {0} pages without reaching the end of the stream.")]
    #[diagnostic(
        code(monitor_stream_rs::error::MonitorError::PageLimitExceeded),
        help("Raise `max_pages` or check whether the server ever repeats the cursor.")
    )]
    PageLimitExceeded(u32),

    /// The pagination did not finish within the configured duration.
    #[error("The stream did not finish within {0:?}.")]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::DeadlineExceeded))]
    DeadlineExceeded(Duration),

    /// Header value contained non-ASCII characters.
    #[error("Header value contained non-ASCII characters.")]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::HeaderValueToStrError))]
    HeaderValueToStrError(#[from] reqwest::header::ToStrError),

    /// Writing a request dump failed.
    #[error(transparent)]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::FormatError))]
    FormatError(#[from] std::fmt::Error),

    /// The request to the server has failed.
    #[error(transparent)]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::ReqwestError))]
    ReqwestError(#[from] reqwest::Error),

    /// An invalid header value has been provided.
    #[error(transparent)]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::InvalidHeaderValue))]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    /// Url parsing error.
    #[error(transparent)]
    #[diagnostic(code(monitor_stream_rs::error::MonitorError::UrlParseError))]
    UrlParseError(#[from] url::ParseError),
}

impl MonitorError {
    /// Builds a status error, attaching the connection advisory when the server sent it.
    pub(crate) fn status(status: u16, message: String) -> Self {
        let advisory = (message.trim() == crate::CONNECTION_ADVISORY)
            .then(|| crate::CONNECTION_ADVISORY.to_string());
        MonitorError::Status {
            status,
            message,
            advisory,
        }
    }

    /// Returns the user-facing advisory message, if this error has one.
    pub fn advisory(&self) -> Option<&str> {
        match self {
            MonitorError::Status { advisory, .. } => advisory.as_deref(),
            _ => None,
        }
    }

    /// Returns whether the error happened before a status line was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, MonitorError::ReqwestError(e) if e.status().is_none() && !e.is_decode())
    }

    /// Returns whether the server answered, but not in the way the stream protocol expects.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            MonitorError::Status { .. }
                | MonitorError::MalformedBody(_)
                | MonitorError::MissingEndCursor
        )
    }
}
