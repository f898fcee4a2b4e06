pub mod client;
pub mod codec;
mod error;

pub use crate::client::{Client, CommandTransport, ResponseCollection};
pub use crate::error::{Error, TransportError};

pub mod types {
    pub use imap_sort_proto::types::*;
}
