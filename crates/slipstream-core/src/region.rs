//! Stream view over a fixed region of memory.

use crate::error::{StreamError, StreamResult};
use crate::stream::{ByteStream, SeekFrom};

/// A read-only or read-write stream over a contiguous byte region.
///
/// The region never grows or shrinks: writes that would run past its end are
/// rejected before any byte is copied.
#[derive(Debug)]
pub struct RegionStream {
    data: Box<[u8]>,
    position: usize,
    writable: bool,
    closed: bool,
}

impl RegionStream {
    /// View `data` as a read-only stream.
    pub fn read_only(data: Vec<u8>) -> Self {
        Self::with_mode(data, false)
    }

    /// View `data` as a read-write stream.
    pub fn read_write(data: Vec<u8>) -> Self {
        Self::with_mode(data, true)
    }

    fn with_mode(data: Vec<u8>, writable: bool) -> Self {
        Self {
            data: data.into_boxed_slice(),
            position: 0,
            writable,
            closed: false,
        }
    }

    /// Consume the stream and recover the region.
    pub fn into_inner(self) -> Vec<u8> {
        self.data.into_vec()
    }

    fn ensure_open(&self) -> StreamResult<()> {
        if self.closed {
            Err(StreamError::Closed)
        } else {
            Ok(())
        }
    }

    fn clamp(&self, target: i64) -> usize {
        target.clamp(0, self.data.len() as i64) as usize
    }
}

impl ByteStream for RegionStream {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        self.ensure_open()?;
        let remaining = self.data.len() - self.position;
        let step = remaining.min(buf.len());
        buf[..step].copy_from_slice(&self.data[self.position..self.position + step]);
        self.position += step;
        Ok(step)
    }

    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.ensure_open()?;
        if !self.writable {
            return Err(StreamError::Unsupported("write"));
        }
        if self.position + buf.len() > self.data.len() {
            return Err(StreamError::InvalidArgument(format!(
                "write of {} bytes at {} exceeds region of {} bytes",
                buf.len(),
                self.position,
                self.data.len()
            )));
        }
        self.data[self.position..self.position + buf.len()].copy_from_slice(buf);
        self.position += buf.len();
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64> {
        self.ensure_open()?;
        let len = self.data.len();
        self.position = match pos {
            SeekFrom::Start(offset) => usize::try_from(offset).unwrap_or(usize::MAX).min(len),
            SeekFrom::End(offset) => {
                if offset > 0 {
                    len
                } else {
                    self.clamp(len as i64 + offset)
                }
            }
            SeekFrom::Current(offset) => self.clamp(self.position as i64 + offset),
        };
        Ok(self.position as u64)
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.ensure_open()
    }

    fn close(&mut self) -> StreamResult<()> {
        self.ensure_open()?;
        self.data = Box::default();
        self.closed = true;
        Ok(())
    }

    fn len(&self) -> StreamResult<u64> {
        self.ensure_open()?;
        Ok(self.data.len() as u64)
    }

    fn position(&self) -> StreamResult<u64> {
        self.ensure_open()?;
        Ok(self.position as u64)
    }

    fn writable(&self) -> bool {
        self.writable
    }
}
