//! Accept-Encoding header parsing and selection,
//! per <https://tools.ietf.org/html/rfc7231#section-5.3.1>.
//!
//! Parsing is a pure per-request operation: [`AcceptEncoding::from_headers`]
//! returns an immutable value holding the client's sorted preferences and the
//! encodings it explicitly disabled. Nothing is shared across requests.

use crate::capability::CapabilitySet;
use crate::qvalue::parse_qvalue;
use crate::token::EncodingToken;
use http::{HeaderMap, header};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::warn;

/// Two qvalues closer than this are treated as equal.
pub(crate) const QVALUE_EPSILON: f64 = 0.0001;

/// One client-stated acceptability with its weight. The weight is always in
/// `(0.0, 1.0]`: a zero weight routes the token into the disabled set instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preference {
    pub encoding: EncodingToken,
    pub qvalue: f64,
}

/// The parsed preferences of one request's `Accept-Encoding` header.
#[derive(Debug)]
pub struct AcceptEncoding {
    preferences: Vec<Preference>,
    disabled: HashSet<EncodingToken>,
}

impl AcceptEncoding {
    /// Parses the `Accept-Encoding` header out of a request's header map.
    ///
    /// Repeated header instances are tolerated with only-first-used semantics;
    /// a value that is not valid UTF-8 is treated like an empty one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut values = headers.get_all(header::ACCEPT_ENCODING).iter();
        let Some(first) = values.next() else {
            return Self::parse(None);
        };

        let ignored = values.count();
        if ignored > 0 {
            warn!("multiple accept-encoding headers in request, only the first one is used ({ignored} ignored)");
        }

        match first.to_str() {
            Ok(value) => Self::parse(Some(value)),
            Err(_) => {
                warn!("accept-encoding header value is not valid utf-8, treating it as empty");
                Self::parse(Some(""))
            }
        }
    }

    /// Parses a raw header value (`None` when the header is absent).
    ///
    /// An absent header means the client accepts anything (a single `*` entry);
    /// a present-but-empty one means no preference was stated, which leaves
    /// only `identity` acceptable. Malformed entries are dropped silently, the
    /// rest of the header still parses.
    pub fn parse(header_value: Option<&str>) -> Self {
        let mut accept = Self { preferences: Vec::new(), disabled: HashSet::new() };

        let Some(value) = header_value else {
            accept.preferences.push(Preference { encoding: EncodingToken::Wildcard, qvalue: 1.0 });
            return accept;
        };

        if value.is_empty() {
            accept.preferences.push(Preference { encoding: EncodingToken::Identity, qvalue: 1.0 });
            return accept;
        }

        // encoding tokens are case-insensitive per RFC 7231 §3.1.2.1
        let value = value.to_ascii_lowercase();
        for entry in value.split(',') {
            accept.push_entry(entry);
        }
        accept.sort();
        accept
    }

    fn push_entry(&mut self, entry: &str) {
        let segments: Vec<&str> = entry.split(';').collect();
        if segments.is_empty() || segments.len() > 2 {
            return;
        }

        let Some(encoding) = EncodingToken::normalize(segments[0]) else {
            return;
        };

        let mut qvalue = 1.0;
        if segments.len() == 2 {
            let Some(parsed) = parse_qvalue(segments[1]) else {
                return;
            };
            if parsed < QVALUE_EPSILON {
                // a zero weight disables the encoding outright
                self.disabled.insert(encoding);
                return;
            }
            qvalue = parsed;
        }

        self.preferences.push(Preference { encoding, qvalue });
    }

    /// Stable descending sort by qvalue. On a tie the wildcard always orders
    /// after any concrete token, making it a catch-all fallback rather than a
    /// genuine equal preference; concrete tokens keep their original order.
    fn sort(&mut self) {
        self.preferences.sort_by(|a, b| {
            if (a.qvalue - b.qvalue).abs() < QVALUE_EPSILON {
                match (a.encoding, b.encoding) {
                    (EncodingToken::Wildcard, EncodingToken::Wildcard) => Ordering::Equal,
                    (EncodingToken::Wildcard, _) => Ordering::Greater,
                    (_, EncodingToken::Wildcard) => Ordering::Less,
                    _ => Ordering::Equal,
                }
            } else if a.qvalue > b.qvalue {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        });
    }

    /// Picks the first mutually acceptable encoding, or `None` when
    /// negotiation fails.
    ///
    /// The scan is linear over the sorted preferences; a `*` entry stands in
    /// for the capability set's preferred default and is never returned
    /// itself. Every candidate is checked against the disabled set, including
    /// tokens the client also listed with a positive weight.
    pub fn select(&self, capabilities: &CapabilitySet) -> Option<EncodingToken> {
        for preference in &self.preferences {
            let candidate = if preference.encoding == EncodingToken::Wildcard {
                capabilities.preferred()
            } else {
                preference.encoding
            };

            if capabilities.contains(candidate) && !self.disabled.contains(&candidate) {
                return Some(candidate);
            }
        }

        None
    }

    /// The sorted preference entries.
    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    /// Whether the client disabled the token with a zero qvalue.
    pub fn is_disabled(&self, token: EncodingToken) -> bool {
        self.disabled.contains(&token)
    }
}
