use super::{read_kick_payload, split_fields, Protocol, LEGACY_FIELD_SEPARATOR};
use crate::{share::parse_number, StatErr};
use log::trace;
use serde::Serialize;
use std::io::{Read, Write};

const ANCIENT_PING_PACKET: [u8; 1] = [0xFE];
/// Beta servers cap the MOTD at 64 bytes.
const ANCIENT_MAX_MOTD_LEN: usize = 64;

/// Status returned by Beta 1.8 to 1.3 servers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AncientStatus {
    pub motd: String,
    pub online_players: i32,
    pub max_players: i32,
}

impl std::fmt::Display for AncientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

/// Server [Beta 1.8 to 1.3](https://wiki.vg/Server_List_Ping#Beta_1.8_to_1.3) ping.
#[derive(Debug, Clone, Default)]
pub struct AncientPing {
    /// Reject MOTDs longer than a beta server can send.
    pub strict: bool,
}

impl AncientPing {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl Protocol for AncientPing {
    type Status = AncientStatus;

    fn write_request<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), StatErr> {
        trace!("send ancient ping: {:?}", ANCIENT_PING_PACKET);
        writer.write_all(&ANCIENT_PING_PACKET)?;

        Ok(())
    }

    fn read_response<R: Read + ?Sized>(&self, reader: &mut R) -> Result<String, StatErr> {
        read_kick_payload(reader)
    }

    fn parse_body(&self, body: &str) -> Result<AncientStatus, StatErr> {
        // MOTD, online players and max players, in that order.
        let fields = split_fields(body, LEGACY_FIELD_SEPARATOR, 3)?;

        if self.strict && fields[0].len() > ANCIENT_MAX_MOTD_LEN {
            return Err(StatErr::malformed(format!(
                "MOTD is longer than {} bytes, got {}",
                ANCIENT_MAX_MOTD_LEN,
                fields[0].len()
            )));
        }

        Ok(AncientStatus {
            motd: fields[0].into(),
            online_players: parse_number(fields[1], "online players")?,
            max_players: parse_number(fields[2], "max players")?,
        })
    }
}
