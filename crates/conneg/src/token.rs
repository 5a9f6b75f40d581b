//! The closed registry of content-coding tokens this crate negotiates over.
//!
//! Tokens are a fixed set: the registered content codings we recognize, the
//! `identity` no-op marker and the `*` wildcard. Two legacy aliases
//! (`x-gzip`, `x-compress`) normalize to their modern canonical forms,
//! see <https://tools.ietf.org/html/rfc7231#section-5.3.4>.

use std::fmt;

/// One member of the closed set of content-coding identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingToken {
    Aes128Gcm,
    Br,
    Compress,
    Deflate,
    Exi,
    Gzip,
    Identity,
    Pack200Gzip,
    Zstd,
    /// The `*` catch-all marker. Never selected itself, only substituted.
    Wildcard,
}

impl EncodingToken {
    /// Normalizes a raw header token into a registry member.
    ///
    /// Surrounding whitespace is trimmed; the comparison itself is
    /// case-sensitive (callers lower-case the header value up front, field
    /// values here are case-insensitive per RFC 7231 §3.1.2.1). The legacy
    /// `x-gzip` and `x-compress` aliases map to their canonical tokens.
    /// Anything else, including the empty string, is rejected.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim() {
            "aes128gcm" => Some(Self::Aes128Gcm),
            "br" => Some(Self::Br),
            "compress" | "x-compress" => Some(Self::Compress),
            "deflate" => Some(Self::Deflate),
            "exi" => Some(Self::Exi),
            "gzip" | "x-gzip" => Some(Self::Gzip),
            "identity" => Some(Self::Identity),
            "pack200-gzip" => Some(Self::Pack200Gzip),
            "zstd" => Some(Self::Zstd),
            "*" => Some(Self::Wildcard),
            _ => None,
        }
    }

    /// Returns the canonical wire name of the token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes128Gcm => "aes128gcm",
            Self::Br => "br",
            Self::Compress => "compress",
            Self::Deflate => "deflate",
            Self::Exi => "exi",
            Self::Gzip => "gzip",
            Self::Identity => "identity",
            Self::Pack200Gzip => "pack200-gzip",
            Self::Zstd => "zstd",
            Self::Wildcard => "*",
        }
    }
}

impl fmt::Display for EncodingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
