use super::error::{DecodeError, DecodeResult};

/// Read cursor over one packet buffer.
///
/// The cursor only moves forward and never passes `buf.len()`: a read that
/// would overrun fails with [`DecodeError::UnexpectedEof`] and leaves the
/// cursor where it was.
#[derive(Debug, Clone)]
pub struct PacketReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> PacketReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// The whole underlying buffer, including bytes already consumed.
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// True once every byte has been consumed.
    pub fn is_eof(&self) -> bool {
        self.offset >= self.buf.len()
    }

    /// Bytes not yet consumed. Does not move the cursor.
    pub fn unread(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    // ── Raw bytes ───────────────────────────────────────────────────────

    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let out = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Consume everything left in the buffer (opaque trailing sections).
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let out = &self.buf[self.offset..];
        self.offset = self.buf.len();
        out
    }

    // ── Fixed-width scalars ─────────────────────────────────────────────

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_bool(&mut self) -> DecodeResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16_le(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Big-endian i32 (used by the login protocol number).
    pub fn read_i32_be(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i64_le(&mut self) -> DecodeResult<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> DecodeResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32_le(&mut self) -> DecodeResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Three consecutive little-endian f32s.
    pub fn read_vec3(&mut self) -> DecodeResult<[f32; 3]> {
        Ok([self.read_f32_le()?, self.read_f32_le()?, self.read_f32_le()?])
    }

    /// A rotation packed into one byte (256 steps per full turn).
    pub fn read_byte_rotation(&mut self) -> DecodeResult<f32> {
        Ok(self.read_u8()? as f32 * (360.0 / 256.0))
    }

    // ── Variable-length integers ────────────────────────────────────────

    fn read_var(&mut self, max_bytes: usize) -> DecodeResult<u64> {
        let start = self.offset;
        let mut value: u64 = 0;
        for i in 0..max_bytes {
            let byte = match self.read_u8() {
                Ok(b) => b,
                Err(e) => {
                    self.offset = start;
                    return Err(e);
                }
            };
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        self.offset = start;
        Err(DecodeError::VarIntTooLong {
            offset: start,
            max_bytes,
        })
    }

    pub fn read_var_u32(&mut self) -> DecodeResult<u32> {
        let start = self.offset;
        let value = self.read_var(5)?;
        u32::try_from(value).map_err(|_| {
            self.offset = start;
            DecodeError::VarIntTooLong {
                offset: start,
                max_bytes: 5,
            }
        })
    }

    /// Zigzag-encoded signed 32-bit varint.
    pub fn read_var_i32(&mut self) -> DecodeResult<i32> {
        let raw = self.read_var_u32()?;
        Ok(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }

    pub fn read_var_u64(&mut self) -> DecodeResult<u64> {
        self.read_var(10)
    }

    /// Zigzag-encoded signed 64-bit varint.
    pub fn read_var_i64(&mut self) -> DecodeResult<i64> {
        let raw = self.read_var_u64()?;
        Ok(((raw >> 1) as i64) ^ -((raw & 1) as i64))
    }

    // ── Strings ─────────────────────────────────────────────────────────

    /// varuint32 length prefix followed by that many raw bytes.
    pub fn read_byte_string(&mut self) -> DecodeResult<&'a [u8]> {
        let start = self.offset;
        let len = self.read_var_u32()? as usize;
        self.read_bytes(len).inspect_err(|_| self.offset = start)
    }

    /// Length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let start = self.offset;
        let bytes = self.read_byte_string()?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => {
                self.offset = start;
                Err(DecodeError::InvalidUtf8 { offset: start })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_zigzag() {
        // 1 -> -1, 2 -> 1, 3 -> -2
        let mut r = PacketReader::new(&[0x01, 0x02, 0x03]);
        assert_eq!(r.read_var_i32().unwrap(), -1);
        assert_eq!(r.read_var_i32().unwrap(), 1);
        assert_eq!(r.read_var_i32().unwrap(), -2);
        assert!(r.is_eof());
    }

    #[test]
    fn multi_byte_varint() {
        let mut r = PacketReader::new(&[0xac, 0x02]);
        assert_eq!(r.read_var_u32().unwrap(), 300);
    }

    #[test]
    fn truncated_read_leaves_cursor() {
        let mut r = PacketReader::new(&[0x05, b'a', b'b']);
        let err = r.read_string().unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEof { needed: 5, .. }));
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn overlong_varint() {
        let mut r = PacketReader::new(&[0xff; 6]);
        assert!(matches!(
            r.read_var_u32(),
            Err(DecodeError::VarIntTooLong { offset: 0, .. })
        ));
    }
}
