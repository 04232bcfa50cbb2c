//! Length-prefixed frames: a varuint32 byte count followed by the packet.

use anyhow::{Result, bail};
use bytes::{Bytes, BytesMut};
use ember_engine::codec::PacketWriter;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Largest frame accepted from or sent to a client.
pub const MAX_FRAME_LEN: usize = 2 * 1024 * 1024;

/// Read one frame. `Ok(None)` on a clean end of stream between frames.
pub async fn read_frame<R: AsyncRead + Unpin>(read: &mut R) -> Result<Option<Bytes>> {
    let Some(len) = read_length(read).await? else {
        return Ok(None);
    };
    if len > MAX_FRAME_LEN {
        bail!("frame of {} bytes exceeds the {} byte limit", len, MAX_FRAME_LEN);
    }

    let mut frame = BytesMut::zeroed(len);
    read.read_exact(&mut frame).await?;
    Ok(Some(frame.freeze()))
}

async fn read_length<R: AsyncRead + Unpin>(read: &mut R) -> Result<Option<usize>> {
    let mut value: u32 = 0;
    for i in 0..5 {
        let byte = match read.read_u8().await {
            Ok(b) => b,
            Err(e) if i == 0 && e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        value |= u32::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some(value as usize));
        }
    }
    bail!("frame length prefix longer than 5 bytes")
}

/// Prefix `payload` with its length.
pub fn encode_frame(payload: &[u8]) -> Bytes {
    let mut w = PacketWriter::with_capacity(payload.len() + 5);
    w.put_var_u32(payload.len() as u32).put_bytes(payload);
    w.finish()
}

pub async fn write_frame<W: AsyncWrite + Unpin>(write: &mut W, payload: &[u8]) -> Result<()> {
    if payload.len() > MAX_FRAME_LEN {
        bail!("refusing to send a {} byte frame", payload.len());
    }
    write.write_all(&encode_frame(payload)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn frames_survive_a_byte_stream() {
        let mut wire = Vec::new();
        write_frame(&mut wire, b"hello").await.unwrap();
        write_frame(&mut wire, &[0u8; 300]).await.unwrap();

        let mut read = &wire[..];
        assert_eq!(read_frame(&mut read).await.unwrap().unwrap(), &b"hello"[..]);
        assert_eq!(read_frame(&mut read).await.unwrap().unwrap().len(), 300);
        assert!(read_frame(&mut read).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn oversized_frame_is_rejected() {
        let header = encode_frame(&[]);
        assert_eq!(&header[..], &[0]);

        let mut w = PacketWriter::new();
        w.put_var_u32((MAX_FRAME_LEN + 1) as u32);
        let wire = w.finish();
        let mut read = &wire[..];
        assert!(read_frame(&mut read).await.is_err());
    }

    #[tokio::test]
    async fn truncated_frame_is_an_error() {
        let mut read: &[u8] = &[5, b'a', b'b'];
        assert!(read_frame(&mut read).await.is_err());
    }
}
