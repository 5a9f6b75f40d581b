//! The set of encodings a downstream handler declares it can produce.

use crate::error::NegotiationError;
use crate::token::EncodingToken;
use std::collections::HashSet;
use tracing::warn;

/// Read-only configuration supplied once when the middleware is built.
/// Concurrent requests read it without synchronization.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    encodings: HashSet<EncodingToken>,
    preferred: EncodingToken,
}

impl CapabilitySet {
    /// Builds a capability set from encoding names.
    ///
    /// Each name goes through [`EncodingToken::normalize`]; unknown names are
    /// dropped with a warning. Construction fails when the input list is
    /// empty or when no name normalizes to a valid token.
    pub fn new<I, S>(names: I) -> Result<Self, NegotiationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut encodings = HashSet::new();
        let mut seen = Vec::new();
        for name in names {
            let name = name.as_ref();
            seen.push(name.to_owned());
            match EncodingToken::normalize(name) {
                Some(token) => {
                    encodings.insert(token);
                }
                None => warn!("unknown encoding {name:?} in capability list, ignoring it"),
            }
        }

        if seen.is_empty() {
            return Err(NegotiationError::EmptyCapabilityList);
        }
        if encodings.is_empty() {
            return Err(NegotiationError::NoValidCapability { names: seen });
        }

        Ok(Self { encodings, preferred: EncodingToken::Identity })
    }

    /// Sets the token a `*` preference entry stands in for
    /// (default: `identity`).
    pub fn with_preferred(mut self, preferred: EncodingToken) -> Self {
        self.preferred = preferred;
        self
    }

    pub fn contains(&self, token: EncodingToken) -> bool {
        self.encodings.contains(&token)
    }

    pub fn preferred(&self) -> EncodingToken {
        self.preferred
    }
}
