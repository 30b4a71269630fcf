//! Read-only source of random bytes.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::{StreamError, StreamResult};
use crate::stream::{ByteStream, SeekFrom};

/// An unbounded stream of random bytes.
///
/// Reads always fill the whole destination. The source has no length, and
/// writing or seeking it has no defined semantics.
#[derive(Debug)]
pub struct RandomStream {
    rng: StdRng,
    produced: u64,
    closed: bool,
}

impl RandomStream {
    /// Create a stream seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a deterministic stream from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            produced: 0,
            closed: false,
        }
    }

    fn ensure_open(&self) -> StreamResult<()> {
        if self.closed {
            Err(StreamError::Closed)
        } else {
            Ok(())
        }
    }
}

impl Default for RandomStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteStream for RandomStream {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        self.ensure_open()?;
        self.rng.fill_bytes(buf);
        self.produced += buf.len() as u64;
        Ok(buf.len())
    }

    fn write(&mut self, _buf: &[u8]) -> StreamResult<()> {
        self.ensure_open()?;
        Err(StreamError::Unsupported("write"))
    }

    fn seek(&mut self, _pos: SeekFrom) -> StreamResult<u64> {
        self.ensure_open()?;
        Err(StreamError::Unsupported("seek"))
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.ensure_open()
    }

    fn close(&mut self) -> StreamResult<()> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }

    fn len(&self) -> StreamResult<u64> {
        self.ensure_open()?;
        Err(StreamError::Unsupported("len"))
    }

    /// Total bytes produced so far.
    fn position(&self) -> StreamResult<u64> {
        self.ensure_open()?;
        Ok(self.produced)
    }

    fn writable(&self) -> bool {
        false
    }

    fn seekable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fill_the_destination() {
        let mut rs = RandomStream::with_seed(1);
        let mut buf = [0u8; 32];
        assert_eq!(rs.read(&mut buf).unwrap(), 32);
        assert_eq!(rs.position().unwrap(), 32);
    }

    #[test]
    fn same_seed_same_bytes() {
        let mut a = RandomStream::with_seed(7);
        let mut b = RandomStream::with_seed(7);
        let mut buf_a = [0u8; 16];
        let mut buf_b = [0u8; 16];
        a.read(&mut buf_a).unwrap();
        b.read(&mut buf_b).unwrap();
        assert_eq!(buf_a, buf_b);
    }

    #[test]
    fn write_seek_len_unsupported() {
        let mut rs = RandomStream::with_seed(0);
        assert!(matches!(rs.write(&[1]), Err(StreamError::Unsupported(_))));
        assert!(matches!(
            rs.seek(SeekFrom::Start(0)),
            Err(StreamError::Unsupported(_))
        ));
        assert!(matches!(rs.len(), Err(StreamError::Unsupported(_))));
        assert!(rs.readable());
        assert!(!rs.writable());
        assert!(!rs.seekable());
    }

    #[test]
    fn closed_rejects_everything() {
        let mut rs = RandomStream::with_seed(0);
        rs.close().unwrap();
        let mut buf = [0u8; 4];
        assert!(matches!(rs.read(&mut buf), Err(StreamError::Closed)));
        assert!(matches!(rs.position(), Err(StreamError::Closed)));
        assert!(matches!(rs.close(), Err(StreamError::Closed)));
    }
}
