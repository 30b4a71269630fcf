//! Write-only fan-out over multiple sink streams.

use crate::error::{StreamError, StreamResult};
use crate::stream::{ByteStream, SeekFrom};

/// Duplicates every write to each registered sink, in registration order.
///
/// Sinks are owned by the fan-out. A sink failure aborts the fan-out of that
/// write; sinks earlier in the order keep the bytes they already received.
#[derive(Default)]
pub struct MultiStream {
    sinks: Vec<Box<dyn ByteStream>>,
    written: u64,
    closed: bool,
}

impl MultiStream {
    /// Create an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sink. Writes reach sinks in the order they were pushed.
    pub fn push(&mut self, sink: Box<dyn ByteStream>) {
        self.sinks.push(sink);
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Consume the fan-out and hand back its sinks.
    pub fn into_sinks(self) -> Vec<Box<dyn ByteStream>> {
        self.sinks
    }

    fn ensure_open(&self) -> StreamResult<()> {
        if self.closed {
            Err(StreamError::Closed)
        } else {
            Ok(())
        }
    }
}

impl ByteStream for MultiStream {
    fn read(&mut self, _buf: &mut [u8]) -> StreamResult<usize> {
        self.ensure_open()?;
        Err(StreamError::Unsupported("read"))
    }

    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.ensure_open()?;
        for sink in &mut self.sinks {
            sink.write(buf)?;
        }
        self.written += buf.len() as u64;
        Ok(())
    }

    fn seek(&mut self, _pos: SeekFrom) -> StreamResult<u64> {
        self.ensure_open()?;
        Err(StreamError::Unsupported("seek"))
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.ensure_open()?;
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> StreamResult<()> {
        self.ensure_open()?;
        for sink in &mut self.sinks {
            sink.close()?;
        }
        self.closed = true;
        Ok(())
    }

    /// Total bytes fanned out so far.
    fn len(&self) -> StreamResult<u64> {
        self.ensure_open()?;
        Ok(self.written)
    }

    fn position(&self) -> StreamResult<u64> {
        self.ensure_open()?;
        Ok(self.written)
    }

    fn readable(&self) -> bool {
        false
    }

    fn seekable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowStream;

    fn fanout_over_two_windows() -> MultiStream {
        let mut ms = MultiStream::new();
        ms.push(Box::new(WindowStream::with_block_capacity(4, 4).unwrap()));
        ms.push(Box::new(WindowStream::with_block_capacity(1, 4).unwrap()));
        ms
    }

    #[test]
    fn writes_reach_every_sink() {
        let mut ms = fanout_over_two_windows();
        ms.write(b"abcdef").unwrap();
        assert_eq!(ms.len().unwrap(), 6);
        assert_eq!(ms.position().unwrap(), 6);

        let mut sinks = ms.into_sinks();
        // The large window kept everything.
        sinks[0].seek(SeekFrom::Start(0)).unwrap();
        let mut buf = [0u8; 6];
        assert_eq!(sinks[0].read(&mut buf).unwrap(), 6);
        assert_eq!(&buf, b"abcdef");
        // The one-block window slid and kept only the newest bytes.
        assert_eq!(sinks[1].len().unwrap(), 2);
        sinks[1].seek(SeekFrom::Start(0)).unwrap();
        let n = sinks[1].read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"ef");
    }

    #[test]
    fn empty_fanout_accepts_writes() {
        let mut ms = MultiStream::new();
        assert_eq!(ms.sink_count(), 0);
        ms.write(b"nowhere").unwrap();
        assert_eq!(ms.len().unwrap(), 7);
    }

    #[test]
    fn read_and_seek_unsupported() {
        let mut ms = fanout_over_two_windows();
        let mut buf = [0u8; 4];
        assert!(matches!(
            ms.read(&mut buf),
            Err(StreamError::Unsupported(_))
        ));
        assert!(matches!(
            ms.seek(SeekFrom::Start(0)),
            Err(StreamError::Unsupported(_))
        ));
        assert!(!ms.readable());
        assert!(ms.writable());
        assert!(!ms.seekable());
    }

    #[test]
    fn close_forwards_to_sinks_and_sticks() {
        let mut ms = fanout_over_two_windows();
        ms.write(b"xy").unwrap();
        ms.close().unwrap();
        assert!(matches!(ms.write(b"z"), Err(StreamError::Closed)));
        assert!(matches!(ms.close(), Err(StreamError::Closed)));

        let mut sinks = ms.into_sinks();
        assert!(matches!(sinks[0].len(), Err(StreamError::Closed)));
    }
}
