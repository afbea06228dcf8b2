use super::{check_payload_len, read_kick_payload, split_fields, Protocol};
use crate::{
    codec::{encode_utf16_be, write_u16_be, write_u32_be},
    share::parse_number,
    StatErr,
};
use log::trace;
use serde::Serialize;
use std::io::{Read, Write};

/// Protocol version of Minecraft 1.6.1.
pub const LEGACY_PROTOCOL_VERSION_161: u8 = 73;
/// Protocol version of Minecraft 1.6.2, the latest known 1.6 ping protocol.
pub const LEGACY_PROTOCOL_VERSION_162: u8 = 74;

/// Packet id, ping payload and the plugin message packet id.
const PING_HOST_HEADER: [u8; 3] = [0xFE, 0x01, 0xFA];
const PING_HOST_CHANNEL: &str = "MC|PingHost";
/// The 1.6 response begins with these two characters, followed by a NUL.
pub(crate) const EXTENDED_LEGACY_MARKER: &str = "§1";
const EXTENDED_LEGACY_FIELD_SEPARATOR: char = '\0';
/// Kick messages are read with a 256 character limit.
pub(crate) const LEGACY_MAX_PAYLOAD_LEN: usize = 256;

/// Status returned by 1.6 servers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExtendedLegacyStatus {
    pub protocol_version: i32,
    pub server_version: String,
    pub motd: String,
    pub online_players: i32,
    pub max_players: i32,
}

impl std::fmt::Display for ExtendedLegacyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

/// Server [1.6](https://wiki.vg/Server_List_Ping#1.6) ping.
#[derive(Debug, Clone)]
pub struct ExtendedLegacyPing {
    pub host: String,
    pub port: u16,
    /// Sent as a single byte in the `MC|PingHost` message.
    pub protocol_version: u8,
    pub strict: bool,
}

impl ExtendedLegacyPing {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            protocol_version: LEGACY_PROTOCOL_VERSION_162,
            strict: false,
        }
    }

    /// Build the whole ping packet.
    pub fn build_request(&self) -> Vec<u8> {
        let mut packet = Vec::from(PING_HOST_HEADER);
        let channel = encode_utf16_be(PING_HOST_CHANNEL);
        let host = encode_utf16_be(&self.host);

        // Channel name, length in characters as a short.
        write_u16_be(&mut packet, (channel.len() / 2) as u16);
        packet.extend_from_slice(&channel);
        // Length of the rest of the data: hostname bytes + 7.
        write_u16_be(&mut packet, (host.len() + 7) as u16);
        packet.push(self.protocol_version);
        write_u16_be(&mut packet, (host.len() / 2) as u16);
        packet.extend_from_slice(&host);
        write_u32_be(&mut packet, self.port as u32);

        packet
    }
}

impl Protocol for ExtendedLegacyPing {
    type Status = ExtendedLegacyStatus;

    fn write_request<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), StatErr> {
        let packet = self.build_request();

        trace!("send ping host packet: {:?}", packet);
        writer.write_all(&packet)?;

        Ok(())
    }

    fn read_response<R: Read + ?Sized>(&self, reader: &mut R) -> Result<String, StatErr> {
        read_kick_payload(reader)
    }

    fn parse_body(&self, body: &str) -> Result<ExtendedLegacyStatus, StatErr> {
        parse_extended_legacy_body(body, self.strict)
    }
}

/// Parse a `§1\0<protocol>\0<version>\0<motd>\0<online>\0<max>` payload.
pub(crate) fn parse_extended_legacy_body(
    body: &str,
    strict: bool,
) -> Result<ExtendedLegacyStatus, StatErr> {
    check_payload_len(body, LEGACY_MAX_PAYLOAD_LEN, strict)?;

    let rest = body
        .strip_prefix(EXTENDED_LEGACY_MARKER)
        .and_then(|rest| rest.strip_prefix(EXTENDED_LEGACY_FIELD_SEPARATOR))
        .ok_or_else(|| {
            StatErr::malformed(format!(
                "Server response info must start with: §1, but got: {}",
                body.chars().take(2).collect::<String>()
            ))
        })?;
    let fields = split_fields(rest, EXTENDED_LEGACY_FIELD_SEPARATOR, 5)?;

    Ok(ExtendedLegacyStatus {
        protocol_version: parse_number(fields[0], "protocol version")?,
        server_version: fields[1].into(),
        motd: fields[2].into(),
        online_players: parse_number(fields[3], "online players")?,
        max_players: parse_number(fields[4], "max players")?,
    })
}
