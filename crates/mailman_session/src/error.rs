use mailman_core::PageError;

use crate::decode::DecodeError;
use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("incorrect password for list {list}")]
    IncorrectPassword { list: String },
    #[error("unexpected status {status} while {operation}")]
    UnexpectedStatus { operation: &'static str, status: u16 },
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Page(#[from] PageError),
}
