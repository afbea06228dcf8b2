use super::{
    packet::{read_packet, Packet},
    Protocol,
};
use crate::{
    codec::{read_i64_be, read_string},
    share::get_server_current_time,
    StatErr,
};
use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    io::{Read, Write},
    time::Duration,
};

/// If the client is pinging to determine what version to use,
/// by convention -1 should be set.
pub const PROTOCOL_VERSION_UNDEFINED: i32 = -1;
/// Protocol version of Minecraft 1.7.2.
pub const PROTOCOL_VERSION_172: i32 = 4;

const HANDSHAKE_PACKET_ID: u32 = 0x00;
const STATUS_REQUEST_PACKET_ID: u32 = 0x00;
const STATUS_RESPONSE_PACKET_ID: u32 = 0x00;
const PING_PACKET_ID: u32 = 0x01;
/// Next state, should be 1 for status, but could also be 2 for login.
const NEXT_STATE_STATUS: u32 = 1;

/// Status returned by 1.7+ servers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModernStatus {
    /// Server version. Includes version name and protocol number.
    pub version: Version,
    /// Server Player info.
    #[serde(default)]
    pub players: Players,
    /// Server description, similar to MOTD.
    #[serde(default)]
    pub description: Description,
    /// Server icon, base64 encoded PNG data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    /// Forge plugin server unique information, including mod and channel info.
    #[serde(rename = "forgeData", default, skip_serializing_if = "Option::is_none")]
    pub forge_data: Option<ForgeData>,

    /// Whether the server enables enforces secure chat, default is false.
    #[serde(rename = "enforcesSecureChat", default)]
    pub enforces_secure_chat: bool,
}

impl ModernStatus {
    /// Description flattened into plain text.
    pub fn description_text(&self) -> String {
        self.description.text()
    }
}

impl std::fmt::Display for ModernStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub name: String,
    pub protocol: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Players {
    pub max: i32,
    pub online: i32,
    pub sample: Vec<Player>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub id: String,
}

/// Servers send the description either as a bare string or as a chat component.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Description {
    PlainText(String),
    Structured(ChatComponent),
}

impl Description {
    /// Text of the description, including every nested `extra` component.
    pub fn text(&self) -> String {
        match self {
            Description::PlainText(text) => text.clone(),
            Description::Structured(component) => {
                let mut text = component.text.clone();

                for extra in &component.extra {
                    text.push_str(&extra.text());
                }

                text
            }
        }
    }
}

impl Default for Description {
    fn default() -> Self {
        Description::PlainText(String::new())
    }
}

impl<'de> Deserialize<'de> for Description {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;

        Ok(match value {
            serde_json::Value::String(text) => Description::PlainText(text),
            value => match ChatComponent::deserialize(&value) {
                Ok(component) => Description::Structured(component),
                Err(err) => {
                    // Keep the raw fragment rather than failing the whole status.
                    debug!("description is not a chat component ({}), using raw json", err);
                    Description::PlainText(value.to_string())
                }
            },
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatComponent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Description>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ForgeData {
    pub mods: Vec<ForgeMod>,
    pub channels: Vec<ForgeChannel>,
    #[serde(
        alias = "fmlNetworkVersion",
        rename = "fmlNetworkVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub fml_network_version: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForgeMod {
    #[serde(alias = "modId", rename = "modId")]
    pub mod_id: String,
    pub modmarker: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForgeChannel {
    pub res: String,
    pub version: String,
    pub required: bool,
}

/// Server [1.7+](https://wiki.vg/Server_List_Ping#Current_.281.7.2B.29) ping.
#[derive(Debug, Clone)]
pub struct ModernPing {
    pub host: String,
    pub port: u16,
    /// See protocol version [numbers](https://wiki.vg/Protocol_version_numbers).
    pub protocol_version: i32,
}

impl ModernPing {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            protocol_version: PROTOCOL_VERSION_UNDEFINED,
        }
    }

    /// Build handshake packet.
    pub fn build_handshake_packet(&self) -> Packet {
        let mut packet = Packet::new(HANDSHAKE_PACKET_ID);

        packet
            .put_varint(self.protocol_version)
            .put_string(&self.host)
            .put_u16(self.port)
            .put_uvarint(NEXT_STATE_STATUS);

        packet
    }

    /// Measure the round trip of a ping packet.
    ///
    /// Must follow a status exchange on the same connection. The server has to
    /// echo the payload, which is the current time in milliseconds.
    pub fn read_latency<S: Read + Write + ?Sized>(&self, stream: &mut S) -> Result<Duration, StatErr> {
        let req_t = get_server_current_time()?;

        Packet::new(PING_PACKET_ID)
            .put_i64(req_t as i64)
            .push(stream)?;
        stream.flush()?;

        let mut payload = read_packet(stream, PING_PACKET_ID)?;
        let receive_t = read_i64_be(&mut payload)? as u64;

        if receive_t != req_t {
            return Err(StatErr::mismatch("pong payload", req_t, receive_t));
        }

        let res_t = get_server_current_time()?;

        Ok(Duration::from_millis(res_t.saturating_sub(req_t)))
    }
}

impl Protocol for ModernPing {
    type Status = ModernStatus;

    fn write_request<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), StatErr> {
        self.build_handshake_packet().push(writer)?;
        Packet::new(STATUS_REQUEST_PACKET_ID).push(writer)
    }

    fn read_response<R: Read + ?Sized>(&self, reader: &mut R) -> Result<String, StatErr> {
        let mut payload = read_packet(reader, STATUS_RESPONSE_PACKET_ID)?;

        read_string(&mut payload)
    }

    fn parse_body(&self, body: &str) -> Result<ModernStatus, StatErr> {
        trace!("status json: {}", body);

        serde_json::from_str::<ModernStatus>(body).map_err(|err| {
            StatErr::malformed(format!("Can not parse status json, reason: {}", err))
        })
    }
}
