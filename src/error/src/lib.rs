//! Shared error type for the state-machine core.
//!
//! Every fallible operation in `tskv-*` returns this crate's [`Result`]. The
//! variants line up with the three error kinds the core is allowed to surface
//! to its consensus driver: a decode failure, a bad query argument, or a
//! failure from the underlying store.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Transaction or query payload failed JSON decoding, or a response
    /// failed to re-serialize.
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A query precondition was violated: `start >= end`, `ownerId` too
    /// long, or a null `qualifier`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying store returned an error from a batch write, iterator
    /// creation, or point lookup.
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
