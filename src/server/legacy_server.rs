use super::{
    check_payload_len, extended_legacy_server::parse_extended_legacy_body,
    extended_legacy_server::EXTENDED_LEGACY_MARKER, extended_legacy_server::LEGACY_MAX_PAYLOAD_LEN,
    read_kick_payload, split_fields, Protocol, LEGACY_FIELD_SEPARATOR,
};
use crate::{share::parse_number, StatErr};
use log::{trace, warn};
use serde::Serialize;
use std::io::{Read, Write};

const LEGACY_PING_PACKET: [u8; 2] = [0xFE, 0x01];

/// Status returned by 1.4 to 1.5 servers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LegacyStatus {
    pub motd: String,
    pub online_players: i32,
    pub max_players: i32,
}

impl std::fmt::Display for LegacyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

/// Server [1.4 to 1.5](https://wiki.vg/Server_List_Ping#1.4_to_1.5) ping.
///
/// Servers of this era disagree on the reply format. Some send the three
/// `§` separated fields, others (Spigot among them) already reply with the
/// 1.6 layout. A body starting with `§1` is handed to the 1.6 parser unless
/// `strict` is set, in which case it is rejected.
#[derive(Debug, Clone, Default)]
pub struct LegacyPing {
    pub strict: bool,
}

impl LegacyPing {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl Protocol for LegacyPing {
    type Status = LegacyStatus;

    fn write_request<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), StatErr> {
        trace!("send legacy ping: {:?}", LEGACY_PING_PACKET);
        writer.write_all(&LEGACY_PING_PACKET)?;

        Ok(())
    }

    fn read_response<R: Read + ?Sized>(&self, reader: &mut R) -> Result<String, StatErr> {
        read_kick_payload(reader)
    }

    fn parse_body(&self, body: &str) -> Result<LegacyStatus, StatErr> {
        if body.starts_with(EXTENDED_LEGACY_MARKER) {
            if self.strict {
                return Err(StatErr::malformed(
                    "Server unexpectedly replied with the 1.6 response format",
                ));
            }

            warn!("server replied to a 1.4 ping with the 1.6 response format");

            let status = parse_extended_legacy_body(body, false)?;

            return Ok(LegacyStatus {
                motd: status.motd,
                online_players: status.online_players,
                max_players: status.max_players,
            });
        }

        check_payload_len(body, LEGACY_MAX_PAYLOAD_LEN, self.strict)?;

        let fields = split_fields(body, LEGACY_FIELD_SEPARATOR, 3)?;

        Ok(LegacyStatus {
            motd: fields[0].into(),
            online_players: parse_number(fields[1], "online players")?,
            max_players: parse_number(fields[2], "max players")?,
        })
    }
}
