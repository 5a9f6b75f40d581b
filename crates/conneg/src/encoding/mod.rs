//! The stream-transform side of negotiation.
//!
//! This module wraps a response body in the negotiated encoding's transform.
//! Only the reference encoding (gzip) carries an actual codec here; identity
//! bypasses this module entirely.
//!
//! The main components are:
//! - `Writer`: an internal buffer collecting encoded output
//! - `encoder`: the gzip encoder and the body wrapper driving it
//!
//! The implementation is inspired by the actix-http crate's encoding
//! functionality.

use bytes::{Bytes, BytesMut};
use std::io;

pub(crate) mod encoder;

// inspired by from actix-http
pub(crate) struct Writer {
    buf: BytesMut,
}

impl Writer {
    fn new() -> Self {
        Self { buf: BytesMut::with_capacity(4096) }
    }

    fn take(&mut self) -> Bytes {
        self.buf.split().freeze()
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
