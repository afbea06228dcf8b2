mod ancient_server;
mod extended_legacy_server;
mod legacy_server;
pub mod packet;
mod regular_server;

use crate::{
    codec::{decode_utf16_be, read_exact_bytes, read_u16_be, read_u8},
    StatErr,
};
pub use ancient_server::*;
pub use extended_legacy_server::*;
pub use legacy_server::*;
use log::{debug, trace};
pub use regular_server::*;
use std::io::{Read, Write};

/// Packet id of the kick packet pre-Netty servers answer every ping with.
const KICK_PACKET_ID: u8 = 0xFF;
/// Separator of the ancient and legacy status fields.
const LEGACY_FIELD_SEPARATOR: char = '§';

/// One Server List Ping generation.
///
/// Each implementation knows how to write its request, how to unwrap the
/// response envelope into a text body, and how to turn that body into its
/// own status type.
pub trait Protocol {
    type Status;

    fn write_request<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), StatErr>;

    fn read_response<R: Read + ?Sized>(&self, reader: &mut R) -> Result<String, StatErr>;

    fn parse_body(&self, body: &str) -> Result<Self::Status, StatErr>;
}

/// Run one request/response exchange of `protocol` over an already connected stream.
///
/// # Example
///
/// ```
/// use mcstat::{codec::encode_utf16_be, ping_status, AncientPing};
/// use std::io::{Cursor, Read, Write};
///
/// struct Replay(Cursor<Vec<u8>>);
///
/// impl Read for Replay {
///     fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
///         self.0.read(buf)
///     }
/// }
///
/// impl Write for Replay {
///     fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
///         Ok(buf.len())
///     }
///
///     fn flush(&mut self) -> std::io::Result<()> {
///         Ok(())
///     }
/// }
///
/// let payload = encode_utf16_be("A Minecraft Server§0§20");
/// let mut response = vec![0xFF, 0x00, (payload.len() / 2) as u8];
/// response.extend(payload);
///
/// let status = ping_status(&mut Replay(Cursor::new(response)), &AncientPing::default()).unwrap();
///
/// assert_eq!(status.motd, "A Minecraft Server");
/// assert_eq!(status.max_players, 20);
/// ```
pub fn ping_status<P, S>(stream: &mut S, protocol: &P) -> Result<P::Status, StatErr>
where
    P: Protocol,
    S: Read + Write + ?Sized,
{
    protocol.write_request(stream)?;
    stream.flush()?;

    let body = protocol.read_response(stream)?;

    debug!("status body received, {} chars", body.chars().count());
    protocol.parse_body(&body)
}

/// Read the `0xFF` kick packet: an unsigned short character count
/// followed by twice as many bytes of UTF-16BE text.
pub(crate) fn read_kick_payload<R: Read + ?Sized>(reader: &mut R) -> Result<String, StatErr> {
    let id = read_u8(reader)?;

    if id != KICK_PACKET_ID {
        return Err(StatErr::mismatch(
            "packet id",
            format!("0x{:02X}", KICK_PACKET_ID),
            format!("0x{:02X}", id),
        ));
    }

    // Length is counted in UTF-16 code units, not bytes.
    let length = read_u16_be(reader)? as usize;
    let bufs = read_exact_bytes(reader, length * 2)?;

    trace!("recv kick packet, {} units", length);

    decode_utf16_be(&bufs)
}

/// Split a status body into exactly `count` fields.
pub(crate) fn split_fields(body: &str, separator: char, count: usize) -> Result<Vec<&str>, StatErr> {
    let fields = body.split(separator).collect::<Vec<_>>();

    if fields.len() != count {
        return Err(StatErr::malformed(format!(
            "Expected {} status fields, but got {}",
            count,
            fields.len()
        )));
    }

    Ok(fields)
}

/// Soft limit on the payload length, only enforced in strict mode.
pub(crate) fn check_payload_len(body: &str, max_units: usize, strict: bool) -> Result<(), StatErr> {
    let units = body.encode_utf16().count();

    if strict && units > max_units {
        return Err(StatErr::malformed(format!(
            "Status payload cannot be longer than {} characters, but got {}",
            max_units, units
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_utf16_be;
    use std::io::Cursor;

    pub(crate) fn kick_packet(payload: &str) -> Vec<u8> {
        let bufs = encode_utf16_be(payload);
        let mut packet = vec![KICK_PACKET_ID];

        packet.extend_from_slice(&((bufs.len() / 2) as u16).to_be_bytes());
        packet.extend(bufs);

        packet
    }

    #[test]
    fn kick_payload_is_decoded() {
        let packet = kick_packet("A Minecraft Server§0§20");

        assert_eq!(
            read_kick_payload(&mut Cursor::new(packet)).unwrap(),
            "A Minecraft Server§0§20"
        );
    }

    #[test]
    fn wrong_envelope_byte_is_a_mismatch() {
        let mut packet = kick_packet("x");
        packet[0] = 0xFE;

        assert!(matches!(
            read_kick_payload(&mut Cursor::new(packet)),
            Err(StatErr::MismatchErr { .. })
        ));
    }

    #[test]
    fn truncated_payload_is_incomplete() {
        let mut packet = kick_packet("abc");
        packet.truncate(packet.len() - 1);

        assert!(matches!(
            read_kick_payload(&mut Cursor::new(packet)),
            Err(StatErr::IncompleteErr {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn field_count_is_exact() {
        assert_eq!(split_fields("a§1§2", '§', 3).unwrap(), vec!["a", "1", "2"]);
        assert!(split_fields("a§1", '§', 3).is_err());
        assert!(split_fields("a§1§2§3", '§', 3).is_err());
    }

    #[test]
    fn payload_length_only_matters_when_strict() {
        let body = "x".repeat(101);

        assert!(check_payload_len(&body, 100, false).is_ok());
        assert!(check_payload_len(&body, 100, true).is_err());
        assert!(check_payload_len(&body[..100], 100, true).is_ok());
    }
}
