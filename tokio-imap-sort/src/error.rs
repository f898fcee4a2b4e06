use thiserror::Error;

use crate::codec::CodecError;
use imap_sort_proto::types::Status;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("Connection closed before the command completed")]
    ConnectionClosed,
    #[error("Command failed with {status}: {information}")]
    Rejected { status: Status, information: String },
}

/// Failure of a command, either before it was sent or on the wire.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] imap_sort_proto::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
