use thiserror::Error;

/// Problems found while building the intent registry. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid pattern for intent '{name}': {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("intent '{name}' captures {captures} argument(s) but its handler takes {expected}")]
    ArityMismatch {
        name: &'static str,
        captures: usize,
        expected: usize,
    },

    #[error("duplicate intent name: {0}")]
    DuplicateName(&'static str),
}

/// A handler could not produce a response.
///
/// Collaborator outages are normally turned into spoken failure text by the
/// handler itself; this error is reserved for what a handler cannot recover from.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing required argument #{index}")]
    MissingArgument { index: usize },

    #[error("collaborator failed: {0}")]
    Collaborator(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("speech recognition service unavailable: {0}")]
    Unavailable(anyhow::Error),

    #[error("input stream closed")]
    Closed,
}
