//! Bounded, auto-evicting byte buffer with stream semantics.
//!
//! Stores the newest bytes written through it in a chain of fixed-capacity
//! blocks. Once the write cursor would grow the chain past its configured
//! block count, the oldest block is dropped and the logical start of the
//! stream advances, so the buffer never holds more than
//! `max_blocks * block_capacity` bytes.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::{StreamError, StreamResult};
use crate::stream::{ByteStream, SeekFrom};

/// Block capacity used by [`WindowStream::new`].
pub const DEFAULT_BLOCK_CAPACITY: usize = 1024;

/// A fixed-capacity byte array plus the count of valid bytes in it.
#[derive(Debug)]
struct Block {
    data: Box<[u8]>,
    used: usize,
}

impl Block {
    fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            used: 0,
        }
    }
}

/// A stream over a sliding window of the most recently written bytes.
///
/// The capacity is a sliding cap, not a hard write limit: writes never fail
/// for lack of space. Instead the oldest block is evicted and both `position`
/// and `len` are rebased to describe the retained window only.
///
/// Invariants:
/// - the chain is never empty while the stream is open;
/// - every block the write cursor has passed over is fully packed
///   (`used == block_capacity`); only the last block may be partial;
/// - the chain never holds more than `max_blocks` blocks.
#[derive(Debug)]
pub struct WindowStream {
    blocks: VecDeque<Block>,
    max_blocks: usize,
    block_capacity: usize,
    /// Index of the active block in `blocks`.
    active: usize,
    /// Offset of the cursor within the active block, `<= used` between
    /// operations.
    cursor: usize,
    /// Sum of `used` across all blocks.
    size: usize,
    /// Absolute cursor offset from the start of the retained window.
    position: usize,
    closed: bool,
}

impl WindowStream {
    /// Create a window of `max_blocks` blocks of [`DEFAULT_BLOCK_CAPACITY`]
    /// bytes each.
    pub fn new(max_blocks: usize) -> StreamResult<Self> {
        Self::with_block_capacity(max_blocks, DEFAULT_BLOCK_CAPACITY)
    }

    /// Create a window of `max_blocks` blocks of `block_capacity` bytes each.
    ///
    /// Both parameters must be positive.
    pub fn with_block_capacity(max_blocks: usize, block_capacity: usize) -> StreamResult<Self> {
        if max_blocks == 0 {
            return Err(StreamError::InvalidArgument(
                "max_blocks must be positive".into(),
            ));
        }
        if block_capacity == 0 {
            return Err(StreamError::InvalidArgument(
                "block_capacity must be positive".into(),
            ));
        }

        let mut blocks = VecDeque::new();
        blocks.push_back(Block::new(block_capacity));

        Ok(Self {
            blocks,
            max_blocks,
            block_capacity,
            active: 0,
            cursor: 0,
            size: 0,
            position: 0,
            closed: false,
        })
    }

    /// Maximum number of bytes the window retains.
    pub fn capacity(&self) -> usize {
        self.max_blocks * self.block_capacity
    }

    /// Capacity of a single block.
    pub fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    /// Maximum number of blocks in the chain.
    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    /// Whether [`ByteStream::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Discard all retained bytes and reset to a single empty block.
    pub fn clear(&mut self) -> StreamResult<()> {
        self.ensure_open()?;
        self.blocks.clear();
        self.blocks.push_back(Block::new(self.block_capacity));
        self.active = 0;
        self.cursor = 0;
        self.size = 0;
        self.position = 0;
        debug!("window stream cleared");
        Ok(())
    }

    fn ensure_open(&self) -> StreamResult<()> {
        if self.closed {
            Err(StreamError::Closed)
        } else {
            Ok(())
        }
    }

    /// Move the write cursor into the next block, appending and, past
    /// `max_blocks`, evicting the oldest block.
    ///
    /// Only called with the cursor at `block_capacity`, which for the last
    /// block implies `position == size`, so the rebase below cannot
    /// underflow.
    fn advance_write_block(&mut self) {
        if self.active + 1 >= self.blocks.len() {
            self.blocks.push_back(Block::new(self.block_capacity));
            if self.blocks.len() > self.max_blocks {
                if let Some(evicted) = self.blocks.pop_front() {
                    self.size -= evicted.used;
                    self.position -= evicted.used;
                    self.active -= 1;
                    trace!(evicted_bytes = evicted.used, "evicted oldest block");
                }
            }
        }
        self.active += 1;
        self.cursor = 0;
    }

    /// Walk the cursor forward `n` bytes, clamping at the end of the
    /// retained data.
    fn walk_forward(&mut self, mut n: usize) {
        while n > 0 {
            let used = self.blocks[self.active].used;
            let step = n.min(used - self.cursor);
            self.cursor += step;
            self.position += step;
            n -= step;
            if n == 0 {
                break;
            }
            if self.active + 1 < self.blocks.len() {
                self.active += 1;
                self.cursor = 0;
            } else {
                break;
            }
        }
    }

    /// Walk the cursor backward `n` bytes, clamping at the start of the
    /// retained data.
    fn walk_backward(&mut self, mut n: usize) {
        while n > 0 {
            let step = n.min(self.cursor);
            self.cursor -= step;
            self.position -= step;
            n -= step;
            if n == 0 {
                break;
            }
            if self.active > 0 {
                self.active -= 1;
                self.cursor = self.blocks[self.active].used;
            } else {
                break;
            }
        }
    }
}

impl ByteStream for WindowStream {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        self.ensure_open()?;

        let mut copied = 0;
        while copied < buf.len() && self.position < self.size {
            if self.cursor == self.blocks[self.active].used {
                if self.active + 1 < self.blocks.len() {
                    self.active += 1;
                    self.cursor = 0;
                } else {
                    break;
                }
            }
            let block = &self.blocks[self.active];
            let step = (block.used - self.cursor).min(buf.len() - copied);
            buf[copied..copied + step].copy_from_slice(&block.data[self.cursor..self.cursor + step]);
            self.cursor += step;
            self.position += step;
            copied += step;
        }
        Ok(copied)
    }

    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.ensure_open()?;

        for &byte in buf {
            if self.cursor == self.block_capacity {
                self.advance_write_block();
            }
            let block = &mut self.blocks[self.active];
            // Writing at the block's used boundary extends the stream;
            // anything before it is an overwrite.
            if self.cursor == block.used {
                block.used += 1;
                self.size += 1;
            }
            block.data[self.cursor] = byte;
            self.cursor += 1;
            self.position += 1;
        }
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> StreamResult<u64> {
        self.ensure_open()?;

        match pos {
            SeekFrom::Start(offset) => {
                self.active = 0;
                self.cursor = 0;
                self.position = 0;
                self.walk_forward(usize::try_from(offset).unwrap_or(usize::MAX));
            }
            SeekFrom::End(offset) => {
                self.active = self.blocks.len() - 1;
                self.cursor = self.blocks[self.active].used;
                self.position = self.size;
                // Seeking past the end is not supported; position stays at
                // the size for positive offsets.
                if offset < 0 {
                    self.walk_backward(usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX));
                }
            }
            SeekFrom::Current(offset) => {
                if offset >= 0 {
                    self.walk_forward(usize::try_from(offset).unwrap_or(usize::MAX));
                } else {
                    self.walk_backward(usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX));
                }
            }
        }
        Ok(self.position as u64)
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.ensure_open()
    }

    fn close(&mut self) -> StreamResult<()> {
        self.ensure_open()?;
        self.blocks.clear();
        self.closed = true;
        debug!("window stream closed");
        Ok(())
    }

    fn len(&self) -> StreamResult<u64> {
        self.ensure_open()?;
        Ok(self.size as u64)
    }

    fn position(&self) -> StreamResult<u64> {
        self.ensure_open()?;
        Ok(self.position as u64)
    }
}

impl std::io::Read for WindowStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        ByteStream::read(self, buf).map_err(Into::into)
    }
}

impl std::io::Write for WindowStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        ByteStream::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        ByteStream::flush(self).map_err(Into::into)
    }
}

impl std::io::Seek for WindowStream {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        ByteStream::seek(self, pos).map_err(Into::into)
    }
}
