//! Accept-Encoding negotiation for async HTTP handlers.
//!
//! Given an inbound request and the set of encodings a downstream handler can
//! produce, this crate selects the single best mutually acceptable content
//! coding per RFC 7231 §5.3.1 and wraps the response body in that coding's
//! transform, transparently to the handler.

mod body;
mod capability;
mod encoding;
mod error;
mod handler;
mod preference;
mod qvalue;
mod request;
mod token;
mod wrapper;

pub use body::ResponseBody;
pub use capability::CapabilitySet;
pub use error::{BodyError, NegotiationError};
pub use handler::{EncodingHandler, RequestHandler};
pub use preference::{AcceptEncoding, Preference};
pub use qvalue::parse_qvalue;
pub use request::RequestContext;
pub use token::EncodingToken;
pub use wrapper::{EncodingWrapper, Wrapper};
