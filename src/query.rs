use crate::{
    codec::{read_exact_bytes, read_i32_be, read_nt_bytes, read_u8, write_i32_be},
    conf::Conf,
    share::{create_udp_socket, get_server_current_time, parse_number},
    StatErr,
};
use log::{debug, trace, warn};
use serde::Serialize;
use std::{
    collections::HashMap,
    io::{self, Cursor},
    net::UdpSocket,
};

/// Only the lower 4 bits of each byte of a session ID are used by the server.
pub const SESSION_ID_MASK: i32 = 0x0F0F0F0F;

const MAGIC_NUM: [u8; 2] = [0xFE, 0xFD];
const HANDSHAKE_TYPE: u8 = 0x09;
const STAT_TYPE: u8 = 0x00;
/// Full query payload must be padded to 8 bytes.
const FULL_STAT_PADDING: [u8; 4] = [0xFF, 0xFF, 0xFF, 0x01];
/// `splitnum\0\x80\0`
const KV_SECTION_PADDING: [u8; 11] = [
    0x73, 0x70, 0x6C, 0x69, 0x74, 0x6E, 0x75, 0x6D, 0x00, 0x80, 0x00,
];
/// `\x01player_\0\0`
const PLAYER_SECTION_PADDING: [u8; 10] = [0x01, 0x70, 0x6C, 0x61, 0x79, 0x65, 0x72, 0x5F, 0x00, 0x00];
const GAME_TYPE: &str = "SMP";
const GAME_ID: &str = "MINECRAFT";
const MAX_DATAGRAM_SIZE: usize = 65507;

/// Result of a [basic stat](https://wiki.vg/Query#Basic_stat) request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryBasic {
    pub motd: String,
    pub game_type: String,
    pub map: String,
    pub online_players: i32,
    pub max_players: i32,
    pub port: u16,
    pub host: String,
}

impl std::fmt::Display for QueryBasic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

/// Result of a [full stat](https://wiki.vg/Query#Full_stat) request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryFull {
    pub motd: String,
    pub game_type: String,
    pub game_id: String,
    pub version: String,
    /// Server software, the part of the `plugins` field before the colon.
    pub server_version: String,
    pub plugins: Vec<QueryPlugin>,
    pub map: String,
    pub online_players: i32,
    pub max_players: i32,
    pub players: Vec<String>,
    pub port: u16,
    /// Not every server reports `hostip`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl std::fmt::Display for QueryFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryPlugin {
    pub name: String,
    pub version: String,
}

/// Session ID and the challenge token the server issued for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub session_id: i32,
    pub token: i32,
}

/// A connected datagram endpoint.
pub trait Datagram {
    fn send(&self, buf: &[u8]) -> io::Result<usize>;

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}

impl Datagram for UdpSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        UdpSocket::send(self, buf)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        UdpSocket::recv(self, buf)
    }
}

/// Session ID derived from the current time.
pub fn generate_session_id() -> Result<i32, StatErr> {
    Ok((get_server_current_time()? as i32) & SESSION_ID_MASK)
}

/// Perform the handshake with a freshly generated session ID.
pub fn create_session<D: Datagram + ?Sized>(socket: &D) -> Result<Session, StatErr> {
    create_session_with_id(socket, generate_session_id()?)
}

/// Perform the [handshake](https://wiki.vg/Query#Handshake) and get the challenge token.
pub fn create_session_with_id<D: Datagram + ?Sized>(
    socket: &D,
    session_id: i32,
) -> Result<Session, StatErr> {
    let mut packet = Vec::from(MAGIC_NUM);
    packet.push(HANDSHAKE_TYPE);
    write_i32_be(&mut packet, session_id);

    send_packet(socket, &packet)?;

    let bufs = recv_packet(socket)?;
    let token = parse_handshake_response(&bufs, session_id)?;

    debug!("query session 0x{:08X} established", session_id);

    Ok(Session { session_id, token })
}

/// Send a [stat request](https://wiki.vg/Query#Request_2) and return the response body.
fn request_stat<D: Datagram + ?Sized>(
    socket: &D,
    session: &Session,
    full_query: bool,
) -> Result<Vec<u8>, StatErr> {
    let mut packet = Vec::from(MAGIC_NUM);
    packet.push(STAT_TYPE);
    write_i32_be(&mut packet, session.session_id);
    write_i32_be(&mut packet, session.token);

    if full_query {
        packet.extend_from_slice(&FULL_STAT_PADDING);
    }

    send_packet(socket, &packet)?;

    let bufs = recv_packet(socket)?;
    let body_start = check_response_header(&bufs, STAT_TYPE, session.session_id)?;

    Ok(bufs[body_start..].to_vec())
}

/// Get basic status over an already connected socket.
pub fn query_basic_with<D: Datagram + ?Sized>(socket: &D, strict: bool) -> Result<QueryBasic, StatErr> {
    let session = create_session(socket)?;
    let body = request_stat(socket, &session, false)?;

    parse_basic_stat(&body, strict)
}

/// Get full status over an already connected socket.
pub fn query_full_with<D: Datagram + ?Sized>(socket: &D, strict: bool) -> Result<QueryFull, StatErr> {
    let session = create_session(socket)?;
    let body = request_stat(socket, &session, true)?;

    parse_full_stat(&body, strict)
}

/// Get basic [status](https://wiki.vg/Query#Basic_stat)
pub fn query_basic_status(conf: &Conf) -> Result<QueryBasic, StatErr> {
    let socket = create_udp_socket(conf)?;

    query_basic_with(&socket, conf.strict)
}

/// Get full [status](https://wiki.vg/Query#Full_stat)
pub fn query_full_status(conf: &Conf) -> Result<QueryFull, StatErr> {
    let socket = create_udp_socket(conf)?;

    query_full_with(&socket, conf.strict)
}

fn send_packet<D: Datagram + ?Sized>(socket: &D, packet: &[u8]) -> Result<(), StatErr> {
    trace!("send query packet: {:?}", packet);
    socket.send(packet)?;

    Ok(())
}

fn recv_packet<D: Datagram + ?Sized>(socket: &D) -> Result<Vec<u8>, StatErr> {
    let mut bufs = vec![0u8; MAX_DATAGRAM_SIZE];
    let size = socket.recv(&mut bufs)?;

    bufs.truncate(size);
    trace!("recv query packet: {:?}", bufs);

    Ok(bufs)
}

/// Check the type byte and the echoed session ID, returning where the body starts.
fn check_response_header(bufs: &[u8], packet_type: u8, session_id: i32) -> Result<usize, StatErr> {
    let mut reader = Cursor::new(bufs);
    let res_type = read_u8(&mut reader)?;

    if res_type != packet_type {
        return Err(StatErr::mismatch(
            "query packet type",
            format!("0x{:02X}", packet_type),
            format!("0x{:02X}", res_type),
        ));
    }

    let res_session_id = read_i32_be(&mut reader)?;

    if res_session_id != session_id {
        return Err(StatErr::mismatch(
            "query session ID",
            format!("0x{:08X}", session_id),
            format!("0x{:08X}", res_session_id),
        ));
    }

    Ok(reader.position() as usize)
}

/// Process query handshake response [packet](https://wiki.vg/Query#Response),
/// and get challenge token.
fn parse_handshake_response(bufs: &[u8], session_id: i32) -> Result<i32, StatErr> {
    let body_start = check_response_header(bufs, HANDSHAKE_TYPE, session_id)?;
    let token = &bufs[body_start..];

    let token = token
        .strip_suffix(&[0x00])
        .ok_or_else(|| StatErr::malformed("Challenge token did not end with NUL byte"))?;

    if token.is_empty() {
        return Err(StatErr::malformed("Challenge token is empty"));
    }

    let token_str = std::str::from_utf8(token)
        .map_err(|_| StatErr::malformed(format!("Challenge token is not ASCII: {:?}", token)))?;

    parse_number(token_str, "challenge token")
}

/// Query strings are usually ISO-8859-1, decode them as UTF-8 only when they are valid UTF-8.
fn decode_query_str(bufs: &[u8]) -> String {
    match std::str::from_utf8(bufs) {
        Ok(s) => s.into(),
        Err(_) => bufs.iter().map(|&b| b as char).collect(),
    }
}

fn strip_terminator(data: &[u8], strict: bool) -> Result<&[u8], StatErr> {
    if data.is_empty() {
        return Err(StatErr::malformed("Empty response body"));
    }

    match data.strip_suffix(&[0x00]) {
        Some(data) => Ok(data),
        None if strict => Err(StatErr::malformed("Response body is not NUL-terminated")),
        None => {
            warn!("query response body is not NUL-terminated");
            Ok(data)
        }
    }
}

fn check_game_type(game_type: &str, strict: bool) -> Result<(), StatErr> {
    if strict && game_type != GAME_TYPE {
        return Err(StatErr::malformed(format!(
            "Expected gametype field to be {:?}, but got {:?}",
            GAME_TYPE, game_type
        )));
    }

    Ok(())
}

fn parse_basic_stat(data: &[u8], strict: bool) -> Result<QueryBasic, StatErr> {
    let data = strip_terminator(data, strict)?;
    // The last part is binary: port and host, so split no further than that.
    let fields = data.splitn(6, |&b| b == 0x00).collect::<Vec<_>>();

    if fields.len() != 6 {
        return Err(StatErr::malformed(format!(
            "Expected 6 fields in basic stat body, but got {}",
            fields.len()
        )));
    }

    let game_type = decode_query_str(fields[1]);
    check_game_type(&game_type, strict)?;

    let tail = fields[5];

    if tail.len() < 2 {
        return Err(StatErr::IncompleteErr {
            expected: 2,
            actual: tail.len(),
        });
    }

    Ok(QueryBasic {
        motd: decode_query_str(fields[0]),
        game_type,
        map: decode_query_str(fields[2]),
        online_players: parse_number(&decode_query_str(fields[3]), "online players")?,
        max_players: parse_number(&decode_query_str(fields[4]), "max players")?,
        // Port is the only little endian number of the protocol.
        port: u16::from_le_bytes([tail[0], tail[1]]),
        host: decode_query_str(&tail[2..]),
    })
}

fn expect_padding(
    reader: &mut Cursor<&[u8]>,
    padding: &[u8],
    section: &str,
    strict: bool,
) -> Result<(), StatErr> {
    let bufs = read_exact_bytes(reader, padding.len())?;

    if bufs != padding {
        if strict {
            return Err(StatErr::malformed(format!(
                "{} padding is invalid: {:?}",
                section, bufs
            )));
        }

        warn!("query {} padding is invalid: {:?}", section, bufs);
    }

    Ok(())
}

fn read_kv_section(reader: &mut Cursor<&[u8]>) -> Result<HashMap<String, String>, StatErr> {
    let mut fields = HashMap::new();

    loop {
        let key = read_nt_bytes(reader)?;

        if key.is_empty() {
            break;
        }

        let value = read_nt_bytes(reader)?;
        fields.insert(decode_query_str(&key), decode_query_str(&value));
    }

    Ok(fields)
}

fn read_player_section(reader: &mut Cursor<&[u8]>) -> Result<Vec<String>, StatErr> {
    let mut players = Vec::new();

    loop {
        let name = read_nt_bytes(reader)?;

        if name.is_empty() {
            break;
        }

        players.push(decode_query_str(&name));
    }

    Ok(players)
}

fn get_field<'a>(fields: &'a HashMap<String, String>, key: &str) -> Result<&'a str, StatErr> {
    fields
        .get(key)
        .map(|value| value.as_str())
        .ok_or_else(|| StatErr::malformed(format!("Response body does not contain {} field", key)))
}

/// Plugin format: `SERVER_VERSION[: PLUGIN VERSION(; PLUGIN VERSION...)]`
fn parse_plugins(value: &str) -> Result<(String, Vec<QueryPlugin>), StatErr> {
    let (server_version, rest) = match value.split_once(':') {
        Some(parts) => parts,
        None => return Ok((value.into(), Vec::new())),
    };

    let mut plugins = Vec::new();

    for entry in rest.split(';').map(|x| x.trim()) {
        match entry.split_once(' ') {
            Some((name, version)) => plugins.push(QueryPlugin {
                name: name.into(),
                version: version.trim().into(),
            }),
            None => {
                return Err(StatErr::malformed(format!(
                    "Invalid plugin field syntax: {:?}",
                    entry
                )));
            }
        }
    }

    Ok((server_version.trim().into(), plugins))
}

fn parse_full_stat(data: &[u8], strict: bool) -> Result<QueryFull, StatErr> {
    let data = strip_terminator(data, strict)?;
    let mut reader = Cursor::new(data);

    expect_padding(&mut reader, &KV_SECTION_PADDING, "key-value section", strict)?;
    let fields = read_kv_section(&mut reader)?;
    expect_padding(&mut reader, &PLAYER_SECTION_PADDING, "player section", strict)?;
    let players = read_player_section(&mut reader)?;

    let game_type = get_field(&fields, "gametype")?;
    check_game_type(game_type, strict)?;

    let game_id = get_field(&fields, "game_id")?;

    if strict && game_id != GAME_ID {
        return Err(StatErr::malformed(format!(
            "Expected game_id field to be {:?}, but got {:?}",
            GAME_ID, game_id
        )));
    }

    let (server_version, plugins) = parse_plugins(get_field(&fields, "plugins")?)?;

    Ok(QueryFull {
        motd: get_field(&fields, "hostname")?.into(),
        game_type: game_type.into(),
        game_id: game_id.into(),
        version: get_field(&fields, "version")?.into(),
        server_version,
        plugins,
        map: get_field(&fields, "map")?.into(),
        online_players: parse_number(get_field(&fields, "numplayers")?, "numplayers")?,
        max_players: parse_number(get_field(&fields, "maxplayers")?, "maxplayers")?,
        players,
        port: parse_number(get_field(&fields, "hostport")?, "hostport")?,
        host: fields.get("hostip").cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handshake_response(session_id: i32, token: &[u8]) -> Vec<u8> {
        let mut bufs = vec![HANDSHAKE_TYPE];
        bufs.extend_from_slice(&session_id.to_be_bytes());
        bufs.extend_from_slice(token);
        bufs
    }

    fn kv_body(pairs: &[(&str, &str)], players: &[&str]) -> Vec<u8> {
        let mut body = KV_SECTION_PADDING.to_vec();

        for (key, value) in pairs {
            body.extend_from_slice(key.as_bytes());
            body.push(0);
            body.extend_from_slice(value.as_bytes());
            body.push(0);
        }

        body.push(0);
        body.extend_from_slice(&PLAYER_SECTION_PADDING);

        for player in players {
            body.extend_from_slice(player.as_bytes());
            body.push(0);
        }

        body.push(0);
        body
    }

    const FULL_FIELDS: [(&str, &str); 10] = [
        ("hostname", "A Minecraft Server"),
        ("gametype", "SMP"),
        ("game_id", "MINECRAFT"),
        ("version", "1.20.1"),
        ("plugins", ""),
        ("map", "world"),
        ("numplayers", "2"),
        ("maxplayers", "20"),
        ("hostport", "25565"),
        ("hostip", "127.0.0.1"),
    ];

    #[test]
    fn session_id_keeps_lower_nibbles() {
        let session_id = generate_session_id().unwrap();

        assert_eq!(session_id & !SESSION_ID_MASK, 0);
    }

    #[test]
    fn handshake_token_is_parsed() {
        let bufs = handshake_response(0x01020304, b"12345678\0");

        assert_eq!(parse_handshake_response(&bufs, 0x01020304).unwrap(), 12345678);
    }

    #[test]
    fn negative_handshake_token_is_parsed() {
        let bufs = handshake_response(1, b"-9513307\0");

        assert_eq!(parse_handshake_response(&bufs, 1).unwrap(), -9513307);
    }

    #[test]
    fn mismatched_session_id_is_rejected() {
        let bufs = handshake_response(0x01020304, b"12345678\0");

        assert!(matches!(
            parse_handshake_response(&bufs, 0x01020305),
            Err(StatErr::MismatchErr { .. })
        ));
    }

    #[test]
    fn wrong_handshake_type_is_rejected() {
        let mut bufs = handshake_response(1, b"1\0");
        bufs[0] = STAT_TYPE;

        assert!(matches!(
            parse_handshake_response(&bufs, 1),
            Err(StatErr::MismatchErr { .. })
        ));
    }

    #[test]
    fn empty_or_unterminated_token_is_malformed() {
        for token in [&b""[..], &b"\0"[..], &b"1234"[..]] {
            let bufs = handshake_response(1, token);

            assert!(matches!(
                parse_handshake_response(&bufs, 1),
                Err(StatErr::MalformedErr(_))
            ));
        }
    }

    #[test]
    fn truncated_handshake_is_incomplete() {
        assert!(matches!(
            parse_handshake_response(&[HANDSHAKE_TYPE, 0x00], 1),
            Err(StatErr::IncompleteErr { .. })
        ));
    }

    #[test]
    fn basic_stat_body() {
        let body = b"A Minecraft Server\0SMP\0world\x002\x0020\0\xDD\x63127.0.0.1\0";
        let status = parse_basic_stat(body, true).unwrap();

        assert_eq!(
            status,
            QueryBasic {
                motd: "A Minecraft Server".into(),
                game_type: "SMP".into(),
                map: "world".into(),
                online_players: 2,
                max_players: 20,
                port: 25565,
                host: "127.0.0.1".into(),
            }
        );
    }

    #[test]
    fn basic_stat_port_may_contain_nul() {
        // Port 25600 is [0x00, 0x64] in little endian.
        let body = b"motd\0SMP\0world\x000\x0020\0\x00\x64localhost\0";
        let status = parse_basic_stat(body, false).unwrap();

        assert_eq!(status.port, 25600);
        assert_eq!(status.host, "localhost");
    }

    #[test]
    fn basic_stat_game_type_is_checked_when_strict() {
        let body = b"A Minecraft Server\0CTF\0world\x000\x0020\0\xDD\x63127.0.0.1\0";

        assert_eq!(parse_basic_stat(body, false).unwrap().game_type, "CTF");
        assert!(matches!(
            parse_basic_stat(body, true),
            Err(StatErr::MalformedErr(_))
        ));
    }

    #[test]
    fn basic_stat_missing_terminator_is_tolerated_unless_strict() {
        let body = b"motd\0SMP\0world\x000\x0020\0\xDD\x63127.0.0.1";

        assert_eq!(parse_basic_stat(body, false).unwrap().host, "127.0.0.1");
        assert!(parse_basic_stat(body, true).is_err());
    }

    #[test]
    fn basic_stat_field_count_is_exact() {
        assert!(matches!(
            parse_basic_stat(b"motd\0SMP\0world\x000\0", false),
            Err(StatErr::MalformedErr(_))
        ));
        assert!(parse_basic_stat(b"", false).is_err());
    }

    #[test]
    fn basic_stat_latin1_motd() {
        let body = b"\xA7aGreen\0SMP\0world\x000\x0020\0\xDD\x63127.0.0.1\0";

        assert_eq!(parse_basic_stat(body, false).unwrap().motd, "§aGreen");
    }

    #[test]
    fn full_stat_body() {
        let body = kv_body(&FULL_FIELDS, &["Notch", "jeb_"]);
        let status = parse_full_stat(&body, true).unwrap();

        assert_eq!(status.motd, "A Minecraft Server");
        assert_eq!(status.game_type, "SMP");
        assert_eq!(status.game_id, "MINECRAFT");
        assert_eq!(status.version, "1.20.1");
        assert_eq!(status.server_version, "");
        assert!(status.plugins.is_empty());
        assert_eq!(status.map, "world");
        assert_eq!(status.online_players, 2);
        assert_eq!(status.max_players, 20);
        assert_eq!(status.players, vec!["Notch", "jeb_"]);
        assert_eq!(status.port, 25565);
        assert_eq!(status.host.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn full_stat_kv_section_ends_at_empty_key() {
        let body = kv_body(&FULL_FIELDS, &[]);
        let data = strip_terminator(&body, true).unwrap();
        let mut reader = Cursor::new(data);

        expect_padding(&mut reader, &KV_SECTION_PADDING, "key-value section", true).unwrap();
        let fields = read_kv_section(&mut reader).unwrap();

        assert_eq!(fields.len(), FULL_FIELDS.len());
        assert_eq!(fields["numplayers"], "2");

        expect_padding(&mut reader, &PLAYER_SECTION_PADDING, "player section", true).unwrap();
        assert!(read_player_section(&mut reader).unwrap().is_empty());
    }

    #[test]
    fn full_stat_missing_key_is_named() {
        let pairs = FULL_FIELDS
            .iter()
            .copied()
            .filter(|(key, _)| *key != "maxplayers")
            .collect::<Vec<_>>();
        let body = kv_body(&pairs, &[]);

        for strict in [false, true] {
            let err = parse_full_stat(&body, strict).unwrap_err();

            assert!(matches!(err, StatErr::MalformedErr(_)));
            assert!(err.to_string().contains("maxplayers"));
        }
    }

    #[test]
    fn full_stat_padding_is_checked_when_strict() {
        let mut body = kv_body(&FULL_FIELDS, &[]);
        body[0] = b'S';

        assert!(parse_full_stat(&body, false).is_ok());
        assert!(matches!(
            parse_full_stat(&body, true),
            Err(StatErr::MalformedErr(_))
        ));
    }

    #[test]
    fn full_stat_game_id_is_checked_when_strict() {
        let mut pairs = FULL_FIELDS.to_vec();
        pairs[2] = ("game_id", "TERRARIA");
        let body = kv_body(&pairs, &[]);

        assert!(parse_full_stat(&body, false).is_ok());
        assert!(parse_full_stat(&body, true).is_err());
    }

    #[test]
    fn full_stat_short_body_is_incomplete() {
        assert!(matches!(
            parse_full_stat(b"split\0", false),
            Err(StatErr::IncompleteErr { .. })
        ));
    }

    #[test]
    fn plugins_without_colon_are_the_server_version() {
        let (server_version, plugins) = parse_plugins("CraftBukkit on Bukkit 1.2.5-R4.0").unwrap();

        assert_eq!(server_version, "CraftBukkit on Bukkit 1.2.5-R4.0");
        assert!(plugins.is_empty());
    }

    #[test]
    fn plugin_list_is_split() {
        let (server_version, plugins) =
            parse_plugins("Paper on 1.20.1: WorldEdit 7.2.15; Essentials 2.20.0").unwrap();

        assert_eq!(server_version, "Paper on 1.20.1");
        assert_eq!(
            plugins,
            vec![
                QueryPlugin {
                    name: "WorldEdit".into(),
                    version: "7.2.15".into(),
                },
                QueryPlugin {
                    name: "Essentials".into(),
                    version: "2.20.0".into(),
                },
            ]
        );
    }

    #[test]
    fn empty_plugin_entry_is_malformed() {
        for value in ["Paper: A 1;", "Paper: A 1;; B 2", "Paper:"] {
            assert!(
                matches!(parse_plugins(value), Err(StatErr::MalformedErr(_))),
                "{:?} should be rejected",
                value
            );
        }
    }

    #[test]
    fn stat_header_is_checked() {
        let mut bufs = vec![STAT_TYPE];
        bufs.extend_from_slice(&7i32.to_be_bytes());
        bufs.extend_from_slice(b"body");

        assert_eq!(check_response_header(&bufs, STAT_TYPE, 7).unwrap(), 5);
        assert!(matches!(
            check_response_header(&bufs, STAT_TYPE, 8),
            Err(StatErr::MismatchErr { .. })
        ));
        assert!(matches!(
            check_response_header(&bufs, HANDSHAKE_TYPE, 7),
            Err(StatErr::MismatchErr { .. })
        ));
    }

    #[test]
    fn plugin_without_version_is_malformed() {
        assert!(matches!(
            parse_plugins("Paper: WorldEdit"),
            Err(StatErr::MalformedErr(_))
        ));
    }
}
