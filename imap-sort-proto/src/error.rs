use thiserror::Error;

use crate::types::Extension;

/// Reasons a command cannot be built for the current session.
///
/// None of these are retryable: they do not change until the request or
/// the server's capabilities do.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("SORT is not supported")]
    UnsupportedBaseExtension,
    #[error("sort keys are missing")]
    MissingSortKeys,
    #[error("{0} is not supported")]
    UnsupportedExtension(Extension),
}
