//! Fixed-width integers, strings and byte runs shared by every protocol generation.
//!
//! Writers append to a `Vec<u8>` packet buffer, readers pull from any [Read].
//! Nothing here interprets counts or separators.

use crate::{
    varint::{read_uvarint, write_uvarint},
    StatErr,
};
use std::io::Read;

const UTF16_BOM: u16 = 0xFEFF;

/// Read exactly `size` bytes, failing with [StatErr::IncompleteErr] on a short stream.
///
/// `size` usually comes off the wire, so the buffer only grows with the data
/// actually read.
pub fn read_exact_bytes<R: Read + ?Sized>(reader: &mut R, size: usize) -> Result<Vec<u8>, StatErr> {
    let mut bufs = Vec::new();

    reader.take(size as u64).read_to_end(&mut bufs)?;

    if bufs.len() < size {
        return Err(StatErr::IncompleteErr {
            expected: size,
            actual: bufs.len(),
        });
    }

    Ok(bufs)
}

fn read_array<const N: usize, R: Read + ?Sized>(reader: &mut R) -> Result<[u8; N], StatErr> {
    let mut arr = [0u8; N];

    arr.copy_from_slice(&read_exact_bytes(reader, N)?);

    Ok(arr)
}

pub fn read_u8<R: Read + ?Sized>(reader: &mut R) -> Result<u8, StatErr> {
    Ok(read_array::<1, R>(reader)?[0])
}

pub fn read_u16_be<R: Read + ?Sized>(reader: &mut R) -> Result<u16, StatErr> {
    Ok(u16::from_be_bytes(read_array(reader)?))
}

pub fn read_i32_be<R: Read + ?Sized>(reader: &mut R) -> Result<i32, StatErr> {
    Ok(i32::from_be_bytes(read_array(reader)?))
}

pub fn read_u32_be<R: Read + ?Sized>(reader: &mut R) -> Result<u32, StatErr> {
    Ok(u32::from_be_bytes(read_array(reader)?))
}

pub fn read_i64_be<R: Read + ?Sized>(reader: &mut R) -> Result<i64, StatErr> {
    Ok(i64::from_be_bytes(read_array(reader)?))
}

pub fn write_u16_be(buf: &mut Vec<u8>, num: u16) {
    buf.extend_from_slice(&num.to_be_bytes());
}

pub fn write_i32_be(buf: &mut Vec<u8>, num: i32) {
    buf.extend_from_slice(&num.to_be_bytes());
}

pub fn write_u32_be(buf: &mut Vec<u8>, num: u32) {
    buf.extend_from_slice(&num.to_be_bytes());
}

pub fn write_i64_be(buf: &mut Vec<u8>, num: i64) {
    buf.extend_from_slice(&num.to_be_bytes());
}

/// UTF-8 string prefixed with its size in bytes as a VarInt.
pub fn write_string(buf: &mut Vec<u8>, s: &str) {
    write_uvarint(buf, s.len() as u32);
    buf.extend_from_slice(s.as_bytes());
}

pub fn read_string<R: Read + ?Sized>(reader: &mut R) -> Result<String, StatErr> {
    let size = read_uvarint(reader)? as usize;
    let bufs = read_exact_bytes(reader, size)?;

    String::from_utf8(bufs)
        .map_err(|err| StatErr::malformed(format!("String is not valid UTF-8, reason: {}", err)))
}

/// Encode text as UTF-16BE without a byte order mark.
pub fn encode_utf16_be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|unit| unit.to_be_bytes()).collect()
}

/// Decode UTF-16BE bytes, dropping a leading byte order mark.
pub fn decode_utf16_be(bufs: &[u8]) -> Result<String, StatErr> {
    if bufs.len() % 2 != 0 {
        return Err(StatErr::malformed(format!(
            "Conversion from UTF-16 to string failed. Expected length to be even, but got: {}",
            bufs.len()
        )));
    }

    let mut units = bufs
        .chunks_exact(2)
        .map(|x| u16::from_be_bytes([x[0], x[1]]))
        .peekable();

    if units.peek() == Some(&UTF16_BOM) {
        units.next();
    }

    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|err| StatErr::malformed(format!("Can not parse UTF-16 data, reason: {}", err)))
}

/// Read bytes until a zero byte, which is consumed but not returned.
///
/// The end of the stream ends the run as well and is not an error at this layer.
pub fn read_nt_bytes<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<u8>, StatErr> {
    let mut result = Vec::new();
    let mut buf = [0u8; 1];

    loop {
        if reader.read(&mut buf)? == 0 {
            break;
        }

        match buf[0] {
            0x00 => break,
            common_buf => result.push(common_buf),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn fixed_width_integers_are_big_endian() {
        let mut buf = Vec::new();
        write_u16_be(&mut buf, 0x1234);
        write_i32_be(&mut buf, -2);
        write_u32_be(&mut buf, 25565);
        write_i64_be(&mut buf, 0x0102_0304_0506_0708);

        assert_eq!(&buf[..2], &[0x12, 0x34]);
        assert_eq!(&buf[2..6], &[0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(&buf[6..10], &[0x00, 0x00, 0x63, 0xDD]);

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_u16_be(&mut cursor).unwrap(), 0x1234);
        assert_eq!(read_i32_be(&mut cursor).unwrap(), -2);
        assert_eq!(read_u32_be(&mut cursor).unwrap(), 25565);
        assert_eq!(read_i64_be(&mut cursor).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn short_fixed_width_read_is_incomplete() {
        let mut cursor = Cursor::new(vec![0x00, 0x01, 0x02]);

        assert!(matches!(
            read_i32_be(&mut cursor),
            Err(StatErr::IncompleteErr {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn string_is_length_prefixed() {
        let mut buf = Vec::new();
        write_string(&mut buf, "localhost");

        assert_eq!(buf[0], 9);
        assert_eq!(&buf[1..], b"localhost");
        assert_eq!(read_string(&mut Cursor::new(buf)).unwrap(), "localhost");
    }

    #[test]
    fn truncated_string_is_incomplete() {
        let mut cursor = Cursor::new(vec![0x05, b'a', b'b']);

        assert!(matches!(
            read_string(&mut cursor),
            Err(StatErr::IncompleteErr {
                expected: 5,
                actual: 2
            })
        ));
    }

    #[test]
    fn huge_string_length_fails_on_the_short_read() {
        let mut cursor = Cursor::new(vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F, b'x']);

        assert!(matches!(
            read_string(&mut cursor),
            Err(StatErr::IncompleteErr {
                expected: 4294967295,
                actual: 1
            })
        ));
    }

    #[test]
    fn utf16_survives_a_round_trip() {
        for s in ["", "A Minecraft Server§0§20", "§1", "日本語のサーバー", "🎮 emoji"] {
            assert_eq!(decode_utf16_be(&encode_utf16_be(s)).unwrap(), s);
        }
    }

    #[test]
    fn utf16_section_sign_layout() {
        assert_eq!(encode_utf16_be("§1"), vec![0x00, 0xA7, 0x00, 0x31]);
    }

    #[test]
    fn utf16_leading_bom_is_ignored() {
        let bufs = [0xFE, 0xFF, 0x00, 0x41];

        assert_eq!(decode_utf16_be(&bufs).unwrap(), "A");
    }

    #[test]
    fn utf16_odd_length_is_malformed() {
        assert!(matches!(
            decode_utf16_be(&[0x00, 0x41, 0x00]),
            Err(StatErr::MalformedErr(_))
        ));
    }

    #[test]
    fn utf16_unpaired_surrogate_is_malformed() {
        assert!(decode_utf16_be(&[0xD8, 0x00]).is_err());
    }

    #[test]
    fn nt_bytes_stop_at_terminator() {
        let mut cursor = Cursor::new(b"key\0value\0".to_vec());

        assert_eq!(read_nt_bytes(&mut cursor).unwrap(), b"key");
        assert_eq!(read_nt_bytes(&mut cursor).unwrap(), b"value");
        assert_eq!(read_nt_bytes(&mut cursor).unwrap(), b"");
    }

    #[test]
    fn nt_bytes_tolerate_end_of_stream() {
        let mut cursor = Cursor::new(b"tail".to_vec());

        assert_eq!(read_nt_bytes(&mut cursor).unwrap(), b"tail");
    }
}
