use crate::{
    codec::{read_exact_bytes, write_i64_be, write_string, write_u16_be},
    varint::{read_uvarint, write_uvarint, write_varint},
    StatErr,
};
use log::trace;
use std::io::{Cursor, Read, Write};

/// Packets cannot be larger than 2^21 - 1 bytes, the largest 3-byte VarInt.
pub const MAX_PACKET_SIZE: usize = 2097151;

/// Outbound [packet](https://wiki.vg/Protocol#Packet_format) of the 1.7+ protocol.
///
/// Fields are appended to the body in call order, the header and the length
/// prefix are only computed by [Packet::to_bytes].
#[derive(Debug)]
pub struct Packet {
    id: u32,
    body: Vec<u8>,
}

impl Packet {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            body: Vec::new(),
        }
    }

    pub fn put_varint(&mut self, num: i32) -> &mut Self {
        write_varint(&mut self.body, num);
        self
    }

    pub fn put_uvarint(&mut self, num: u32) -> &mut Self {
        write_uvarint(&mut self.body, num);
        self
    }

    pub fn put_string(&mut self, s: &str) -> &mut Self {
        write_string(&mut self.body, s);
        self
    }

    pub fn put_u16(&mut self, num: u16) -> &mut Self {
        write_u16_be(&mut self.body, num);
        self
    }

    pub fn put_i64(&mut self, num: i64) -> &mut Self {
        write_i64_be(&mut self.body, num);
        self
    }

    /// `varint(header.len + body.len)`, then the header, then the body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut header = Vec::new();
        write_uvarint(&mut header, self.id);

        let mut packet = Vec::with_capacity(header.len() + self.body.len() + 3);
        write_uvarint(&mut packet, (header.len() + self.body.len()) as u32);
        packet.append(&mut header);
        packet.extend_from_slice(&self.body);

        packet
    }

    pub fn push<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), StatErr> {
        let bufs = self.to_bytes();

        trace!("send packet 0x{:02X}: {:?}", self.id, bufs);
        writer.write_all(&bufs)?;

        Ok(())
    }
}

/// Read one length-prefixed packet and check its id.
///
/// Returns the remaining payload, bounded to the packet length.
pub fn read_packet<R: Read + ?Sized>(
    reader: &mut R,
    expected_id: u32,
) -> Result<Cursor<Vec<u8>>, StatErr> {
    let size = read_uvarint(reader)? as usize;

    if size > MAX_PACKET_SIZE {
        return Err(StatErr::malformed(format!(
            "Packet length cannot be larger than {}, but got {}",
            MAX_PACKET_SIZE, size
        )));
    }

    let mut payload = Cursor::new(read_exact_bytes(reader, size)?);
    let id = read_uvarint(&mut payload)?;

    trace!("recv packet 0x{:02X}, {} bytes", id, size);

    if id != expected_id {
        return Err(StatErr::mismatch(
            "packet id",
            format!("0x{:02X}", expected_id),
            format!("0x{:02X}", id),
        ));
    }

    Ok(payload)
}
