use std::io;
use thiserror::Error;

/// Construction-time configuration errors. Once a handler is built these can
/// no longer occur; everything per-request is recoverable and handled inline.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("capability list is empty")]
    EmptyCapabilityList,

    #[error("no valid encoding in capability list: {names:?}")]
    NoValidCapability { names: Vec<String> },
}

/// Errors surfaced by a response body stream while it is being encoded.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl BodyError {
    pub fn invalid_body<S: Into<String>>(reason: S) -> Self {
        Self::InvalidBody { reason: reason.into() }
    }
}
