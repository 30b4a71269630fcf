//! Abstract stream trait for slipstream.
//!
//! Every stream kind in this crate satisfies this trait, so sinks can be
//! stored and driven uniformly as `Box<dyn ByteStream>`.

use crate::error::{StreamError, StreamResult};

pub use std::io::SeekFrom;

/// A synchronous, seekable byte stream with an explicit lifecycle.
///
/// All operations fail with [`StreamError::Closed`] once [`close`] has run,
/// with no exception for the read-only accessors or a second close.
///
/// [`close`]: ByteStream::close
pub trait ByteStream {
    /// Read up to `buf.len()` bytes at the current position.
    /// Returns the number of bytes read, 0 = end of available data.
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize>;

    /// Write all of `buf` at the current position.
    fn write(&mut self, buf: &[u8]) -> StreamResult<()>;

    /// Reposition the cursor. Returns the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64>;

    /// Push any buffered state through to the backing storage.
    fn flush(&mut self) -> StreamResult<()>;

    /// Close this stream, releasing its storage.
    fn close(&mut self) -> StreamResult<()>;

    /// Number of bytes currently retained.
    fn len(&self) -> StreamResult<u64>;

    /// Absolute cursor position, measured from the logical start.
    fn position(&self) -> StreamResult<u64>;

    /// Reposition to `pos` bytes from the start.
    fn set_position(&mut self, pos: u64) -> StreamResult<u64> {
        self.seek(SeekFrom::Start(pos))
    }

    /// Length is derived from write activity; setting it directly is not
    /// defined for any stream kind in this crate.
    fn set_len(&mut self, _len: u64) -> StreamResult<()> {
        Err(StreamError::Unsupported("set_len"))
    }

    /// Whether this stream kind supports reading.
    fn readable(&self) -> bool {
        true
    }

    /// Whether this stream kind supports writing.
    fn writable(&self) -> bool {
        true
    }

    /// Whether this stream kind supports seeking.
    fn seekable(&self) -> bool {
        true
    }
}
