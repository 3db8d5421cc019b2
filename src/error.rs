use std::fmt;

use thiserror::Error;

/// Failure of a single call against one of the remote APIs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("can't decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(status: u16, url: impl Into<String>) -> ApiError {
        ApiError::Status {
            status,
            url: url.into(),
        }
    }
}

/// What the user gets told. Every [`ApiError`] a panel operation hits is
/// folded into one of these, whatever layer it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    LoadFailed,
    SubmitFailed,
    DeleteFailed,
    EmptyReview,
}

impl Failure {
    pub fn message(&self) -> &'static str {
        match self {
            Failure::LoadFailed => "Error while loading comments.",
            Failure::SubmitFailed => "Error while sending the review.",
            Failure::DeleteFailed => "Error while deleting the comment.",
            Failure::EmptyReview => "Write something before sending the review.",
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Joins an error and its chain of sources into one line.
pub fn unpack_error(err: &dyn std::error::Error) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
