use bytes::{BufMut, Bytes, BytesMut};

/// Outbound counterpart of [`super::PacketReader`], writing the same wire
/// primitives into a growable buffer.
#[derive(Debug, Default)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.put_slice(bytes);
        self
    }

    pub fn put_u8(&mut self, v: u8) -> &mut Self {
        self.buf.put_u8(v);
        self
    }

    pub fn put_bool(&mut self, v: bool) -> &mut Self {
        self.put_u8(u8::from(v))
    }

    pub fn put_i32_le(&mut self, v: i32) -> &mut Self {
        self.buf.put_i32_le(v);
        self
    }

    pub fn put_u32_le(&mut self, v: u32) -> &mut Self {
        self.buf.put_u32_le(v);
        self
    }

    pub fn put_f32_le(&mut self, v: f32) -> &mut Self {
        self.buf.put_f32_le(v);
        self
    }

    pub fn put_vec3(&mut self, v: [f32; 3]) -> &mut Self {
        for c in v {
            self.put_f32_le(c);
        }
        self
    }

    fn put_var(&mut self, mut v: u64) -> &mut Self {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.put_u8(byte);
                return self;
            }
            self.buf.put_u8(byte | 0x80);
        }
    }

    pub fn put_var_u32(&mut self, v: u32) -> &mut Self {
        self.put_var(u64::from(v))
    }

    pub fn put_var_i32(&mut self, v: i32) -> &mut Self {
        self.put_var_u32(((v << 1) ^ (v >> 31)) as u32)
    }

    pub fn put_var_u64(&mut self, v: u64) -> &mut Self {
        self.put_var(v)
    }

    pub fn put_var_i64(&mut self, v: i64) -> &mut Self {
        self.put_var(((v << 1) ^ (v >> 63)) as u64)
    }

    pub fn put_string(&mut self, s: &str) -> &mut Self {
        self.put_var_u32(s.len() as u32);
        self.put_bytes(s.as_bytes())
    }
}
