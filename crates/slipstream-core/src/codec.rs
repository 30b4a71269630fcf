//! Typed read/write helpers over any stream.
//!
//! All multi-byte values use big-endian byte order.

use crate::error::{StreamError, StreamResult};
use crate::stream::ByteStream;

/// Fixed-size typed reads, available on every [`ByteStream`].
pub trait ReadTyped: ByteStream {
    /// Fill `buf` completely, failing if the stream ends first.
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                return Err(StreamError::Codec(format!(
                    "unexpected end of stream: {} of {} bytes missing",
                    buf.len() - filled,
                    buf.len()
                )));
            }
            filled += n;
        }
        Ok(())
    }

    fn read_u8(&mut self) -> StreamResult<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_u16(&mut self) -> StreamResult<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_u32(&mut self) -> StreamResult<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    fn read_u64(&mut self) -> StreamResult<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    fn read_i32(&mut self) -> StreamResult<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    fn read_i64(&mut self) -> StreamResult<i64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }
}

impl<S: ByteStream + ?Sized> ReadTyped for S {}

/// Fixed-size typed writes, available on every [`ByteStream`].
pub trait WriteTyped: ByteStream {
    fn write_u8(&mut self, value: u8) -> StreamResult<()> {
        self.write(&[value])
    }

    fn write_u16(&mut self, value: u16) -> StreamResult<()> {
        self.write(&value.to_be_bytes())
    }

    fn write_u32(&mut self, value: u32) -> StreamResult<()> {
        self.write(&value.to_be_bytes())
    }

    fn write_u64(&mut self, value: u64) -> StreamResult<()> {
        self.write(&value.to_be_bytes())
    }

    fn write_i32(&mut self, value: i32) -> StreamResult<()> {
        self.write(&value.to_be_bytes())
    }

    fn write_i64(&mut self, value: i64) -> StreamResult<()> {
        self.write(&value.to_be_bytes())
    }
}

impl<S: ByteStream + ?Sized> WriteTyped for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SeekFrom;
    use crate::window::WindowStream;

    #[test]
    fn round_trip_typed_values() {
        let mut ws = WindowStream::with_block_capacity(8, 4).unwrap();
        ws.write_u8(0xAB).unwrap();
        ws.write_u16(0xBEEF).unwrap();
        ws.write_u32(0xDEAD_BEEF).unwrap();
        ws.write_u64(0x0123_4567_89AB_CDEF).unwrap();
        ws.write_i32(-7).unwrap();
        ws.write_i64(i64::MIN).unwrap();

        ws.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(ws.read_u8().unwrap(), 0xAB);
        assert_eq!(ws.read_u16().unwrap(), 0xBEEF);
        assert_eq!(ws.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(ws.read_u64().unwrap(), 0x0123_4567_89AB_CDEF);
        assert_eq!(ws.read_i32().unwrap(), -7);
        assert_eq!(ws.read_i64().unwrap(), i64::MIN);
    }

    #[test]
    fn values_straddle_block_boundaries() {
        // Three-byte blocks force every u32 across a boundary.
        let mut ws = WindowStream::with_block_capacity(8, 3).unwrap();
        ws.write_u32(0x0102_0304).unwrap();
        ws.write_u32(0x0506_0708).unwrap();
        ws.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(ws.read_u32().unwrap(), 0x0102_0304);
        assert_eq!(ws.read_u32().unwrap(), 0x0506_0708);
    }

    #[test]
    fn short_stream_fails_mid_value() {
        let mut ws = WindowStream::with_block_capacity(2, 4).unwrap();
        ws.write(&[1, 2]).unwrap();
        ws.seek(SeekFrom::Start(0)).unwrap();
        assert!(matches!(ws.read_u32(), Err(StreamError::Codec(_))));
    }

    #[test]
    fn works_through_trait_objects() {
        let mut stream: Box<dyn ByteStream> =
            Box::new(WindowStream::with_block_capacity(4, 4).unwrap());
        stream.write_u16(513).unwrap();
        stream.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(stream.read_u16().unwrap(), 513);
    }

    #[test]
    fn window_keeps_newest_records() {
        // Each record is 4 bytes; a 2x4 window holds the last two records.
        let mut ws = WindowStream::with_block_capacity(2, 4).unwrap();
        for record in 0u32..10 {
            ws.write_u32(record).unwrap();
        }
        ws.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(ws.read_u32().unwrap(), 8);
        assert_eq!(ws.read_u32().unwrap(), 9);
    }
}
