//! Minecraft Java Edition server status client.
//!
//! Every generation of the Server List Ping is supported, from beta 1.8
//! up to the current JSON status, together with the UDP [Query](https://wiki.vg/Query)
//! protocol. Most users only need [Conf]:
//!
//! ```no_run
//! use mcstat::{Conf, StatErr};
//!
//! fn main() -> Result<(), StatErr> {
//!     let conf = Conf::create_from_str("www.example.com:25565")?.with_strict(true);
//!     let status = conf.get_server_status()?;
//!
//!     println!("{}", status);
//!     Ok(())
//! }
//! ```
//!
//! The handlers themselves only need a `Read + Write` stream, see [ping_status],
//! and the Query protocol any [Datagram], see [query_basic_with].

pub mod codec;
mod conf;
mod error;
mod query;
mod server;
mod share;
pub mod varint;

pub use conf::{Conf, SocketConf, DEFAULT_PORT};
pub use error::StatErr;
pub use query::{
    create_session, create_session_with_id, generate_session_id, query_basic_with,
    query_full_with, Datagram, QueryBasic, QueryFull, QueryPlugin, Session, SESSION_ID_MASK,
};
pub use server::packet;
pub use server::{
    ping_status, AncientPing, AncientStatus, ChatComponent, Description, ExtendedLegacyPing,
    ExtendedLegacyStatus, ForgeChannel, ForgeData, ForgeMod, LegacyPing, LegacyStatus, ModernPing,
    ModernStatus, Player, Players, Protocol, Version, LEGACY_PROTOCOL_VERSION_161,
    LEGACY_PROTOCOL_VERSION_162, PROTOCOL_VERSION_172, PROTOCOL_VERSION_UNDEFINED,
};
