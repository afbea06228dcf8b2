use crate::StatErr;
use std::io::Read;

const SEGMENT_BITS: u32 = 0x7F;
const CHECKER_BIT: u8 = 0x80;
/// VarInts are never longer than 5 bytes.
const MAX_VARINT_LEN: usize = 5;

/// Encode the given number as a [VarInt](https://wiki.vg/Protocol#VarInt_and_VarLong)
/// and append it to `buf`.
pub fn write_uvarint(buf: &mut Vec<u8>, num: u32) {
    let mut num = num;

    loop {
        if (num & (!SEGMENT_BITS)) == 0 {
            buf.push(num as u8);

            return;
        }

        buf.push(((num & SEGMENT_BITS) | (!SEGMENT_BITS)) as u8);
        num >>= 7;
    }
}

/// Encode a signed number as a VarInt.
///
/// Negative values are written through their two's complement representation,
/// so they always take the maximum of 5 bytes. This is not zig-zag encoding.
pub fn write_varint(buf: &mut Vec<u8>, num: i32) {
    write_uvarint(buf, num as u32)
}

/// Decode a VarInt from the given bytes, which must contain exactly one VarInt.
pub fn decode_uvarint(arr: &[u8]) -> Result<u32, StatErr> {
    if arr.len() > MAX_VARINT_LEN {
        return Err(StatErr::malformed(format!(
            "VarInts are never longer than 5 bytes, but got {}",
            arr.len()
        )));
    }

    match arr.last() {
        Some(&n) => {
            if n & CHECKER_BIT != 0 {
                return Err(StatErr::malformed(format!(
                    "Invalid VarInt data: [{}]",
                    arr.iter()
                        .map(|&x| format!("0x{:02X}", x))
                        .collect::<Vec<String>>()
                        .join(", ")
                )));
            }

            let mut result = 0u32;

            for (i, &n) in arr.iter().enumerate() {
                result |= ((n as u32) & SEGMENT_BITS) << (i * 7);
            }

            Ok(result)
        }
        None => Err(StatErr::malformed("VarInt is empty")),
    }
}

/// Read one unsigned VarInt from a stream.
///
/// A stream ending in the middle of the VarInt is an [StatErr::IncompleteErr].
pub fn read_uvarint<R: Read + ?Sized>(reader: &mut R) -> Result<u32, StatErr> {
    let mut buffer = Vec::<u8>::with_capacity(MAX_VARINT_LEN);
    let mut temp_buffer = [0u8; 1];

    loop {
        if reader.read(&mut temp_buffer)? == 0 {
            return Err(StatErr::IncompleteErr {
                expected: buffer.len() + 1,
                actual: buffer.len(),
            });
        }

        buffer.push(temp_buffer[0]);

        if temp_buffer[0] & CHECKER_BIT == 0 || buffer.len() > MAX_VARINT_LEN {
            break;
        }
    }

    decode_uvarint(&buffer)
}

/// Read one signed VarInt from a stream.
pub fn read_varint<R: Read + ?Sized>(reader: &mut R) -> Result<i32, StatErr> {
    Ok(read_uvarint(reader)? as i32)
}
