//! Mailman session: HTTP transport and the admin client for one list.
mod decode;
pub mod endpoints;
mod error;
mod session;
mod transport;

pub use decode::{decode_page, DecodeError, DecodedPage};
pub use endpoints::Endpoints;
pub use error::SessionError;
pub use session::ListSession;
pub use transport::{
    RawResponse, ReqwestTransport, Transport, TransportError, TransportErrorKind,
    TransportSettings,
};
