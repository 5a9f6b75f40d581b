use crate::capability::CapabilitySet;
use crate::error::NegotiationError;
use crate::handler::{EncodingHandler, RequestHandler};

/// A wrapper that can wrap a handler to another
pub trait Wrapper<H> {
    /// the wrapper's output
    type Out;

    /// wrap the handler to another
    fn wrap(&self, handler: H) -> Self::Out;
}

/// Builds [`EncodingHandler`]s around downstream handlers.
///
/// The capability list is validated here, once; an invalid list is a
/// configuration error and the wrapper is never constructed, so the caller
/// can fall back to the unwrapped handler or halt as it sees fit.
#[derive(Debug, Clone)]
pub struct EncodingWrapper {
    capabilities: CapabilitySet,
}

impl EncodingWrapper {
    pub fn new<I, S>(capability_names: I) -> Result<Self, NegotiationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { capabilities: CapabilitySet::new(capability_names)? })
    }

    pub fn from_capabilities(capabilities: CapabilitySet) -> Self {
        Self { capabilities }
    }
}

impl<H: RequestHandler> Wrapper<H> for EncodingWrapper {
    type Out = EncodingHandler<H>;

    fn wrap(&self, handler: H) -> Self::Out {
        EncodingHandler::new(handler, self.capabilities.clone())
    }
}
