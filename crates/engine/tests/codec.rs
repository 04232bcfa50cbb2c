//! Read-cursor invariants and reader/writer agreement on the wire primitives.

use ember_engine::codec::{DecodeError, PacketReader, PacketWriter};
use proptest::prelude::*;

#[test]
fn writer_output_reads_back_field_by_field() {
    let mut w = PacketWriter::new();
    w.put_var_u32(0x45)
        .put_var_i32(-12)
        .put_string("héllo")
        .put_vec3([1.5, -2.0, 64.0])
        .put_bool(true)
        .put_var_i64(-1_000_000_000_000);
    let bytes = w.finish();

    let mut r = PacketReader::new(&bytes);
    assert_eq!(r.read_var_u32().unwrap(), 0x45);
    assert_eq!(r.read_var_i32().unwrap(), -12);
    assert_eq!(r.read_string().unwrap(), "héllo");
    assert_eq!(r.read_vec3().unwrap(), [1.5, -2.0, 64.0]);
    assert!(r.read_bool().unwrap());
    assert_eq!(r.read_var_i64().unwrap(), -1_000_000_000_000);
    assert!(r.is_eof());
    assert_eq!(r.offset(), bytes.len());
}

#[test]
fn invalid_utf8_is_reported_with_offset() {
    let mut r = PacketReader::new(&[0x00, 0x02, 0xc3, 0x28]);
    r.read_u8().unwrap();
    assert_eq!(r.read_string(), Err(DecodeError::InvalidUtf8 { offset: 1 }));
    assert_eq!(r.offset(), 1);
}

#[test]
fn read_remaining_consumes_everything() {
    let data = [1u8, 2, 3, 4];
    let mut r = PacketReader::new(&data);
    r.read_u8().unwrap();
    assert_eq!(r.unread(), &[2, 3, 4]);
    assert_eq!(r.read_remaining(), &[2, 3, 4]);
    assert!(r.is_eof());
    assert_eq!(r.read_remaining(), &[] as &[u8]);
}

#[test]
fn big_endian_login_protocol() {
    let mut r = PacketReader::new(&[0x00, 0x00, 0x01, 0x5d]);
    assert_eq!(r.read_i32_be().unwrap(), 349);
}

proptest! {
    /// Reading arbitrary garbage with any mix of primitives never moves the
    /// cursor backwards or past the end, and never panics.
    #[test]
    fn cursor_is_monotonic_and_bounded(
        data in proptest::collection::vec(any::<u8>(), 0..64),
        ops in proptest::collection::vec(0u8..8, 0..32),
    ) {
        let mut r = PacketReader::new(&data);
        let mut last = r.offset();
        for op in ops {
            let _ = match op {
                0 => r.read_u8().map(|_| ()),
                1 => r.read_var_u32().map(|_| ()),
                2 => r.read_var_i64().map(|_| ()),
                3 => r.read_string().map(|_| ()),
                4 => r.read_f32_le().map(|_| ()),
                5 => r.read_u64_le().map(|_| ()),
                6 => r.read_byte_string().map(|_| ()),
                _ => r.read_array::<16>().map(|_| ()),
            };
            prop_assert!(r.offset() >= last);
            prop_assert!(r.offset() <= data.len());
            last = r.offset();
        }
    }

    #[test]
    fn signed_varints_agree(v in any::<i32>(), w in any::<i64>()) {
        let mut out = PacketWriter::new();
        out.put_var_i32(v).put_var_i64(w);
        let bytes = out.finish();
        let mut r = PacketReader::new(&bytes);
        prop_assert_eq!(r.read_var_i32().unwrap(), v);
        prop_assert_eq!(r.read_var_i64().unwrap(), w);
    }
}
