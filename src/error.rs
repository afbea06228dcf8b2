use thiserror::Error;

/// Uniform error definition for every ping and query call.
#[derive(Error, Debug)]
pub enum StatErr {
    /// Connect, read, write or timeout failure reported by the socket.
    #[error("{0}")]
    IoErr(#[from] std::io::Error),
    /// The server answered with an unexpected packet id, envelope byte or session id.
    #[error("Unexpected {subject}, expected: {expected}, but got: {actual}")]
    MismatchErr {
        subject: &'static str,
        expected: String,
        actual: String,
    },
    /// Fewer bytes were available than a fixed-width field requires.
    #[error("Incomplete data, expected {expected} bytes, but got {actual}")]
    IncompleteErr { expected: usize, actual: usize },
    /// The response body could not be turned into a status.
    #[error("Malformed status: {0}")]
    MalformedErr(String),
    /// Invalid configuration input, such as an unparsable address.
    #[error("{0}")]
    DataErr(String),
    /// Internal errors, such as the system clock going backwards.
    #[error("{0}")]
    InternalErr(String),
}

impl StatErr {
    pub(crate) fn mismatch(
        subject: &'static str,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        StatErr::MismatchErr {
            subject,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        StatErr::MalformedErr(reason.into())
    }
}

impl From<std::time::SystemTimeError> for StatErr {
    fn from(err: std::time::SystemTimeError) -> Self {
        StatErr::InternalErr(err.to_string())
    }
}
