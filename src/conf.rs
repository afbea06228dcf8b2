use crate::{
    query,
    server::{
        ping_status, AncientPing, AncientStatus, ExtendedLegacyPing, ExtendedLegacyStatus,
        LegacyPing, LegacyStatus, ModernPing, ModernStatus, LEGACY_PROTOCOL_VERSION_162,
        PROTOCOL_VERSION_UNDEFINED,
    },
    share::create_tcp_socket,
    QueryBasic, QueryFull, StatErr,
};
use std::{
    net::{Ipv4Addr, SocketAddr, ToSocketAddrs},
    time::Duration,
};

/// Default port of a Java Edition server.
pub const DEFAULT_PORT: u16 = 25565;

/// Main struct used for configuring the connection.
#[derive(Debug, Clone)]
pub struct Conf {
    /// Server IP address or a domain name.
    pub host: String,
    /// Server port, also used as the query port.
    pub port: u16,
    /// See [SocketConf].
    pub socket_conf: SocketConf,
    /// Turn tolerated deviations of the server response into errors.
    pub strict: bool,
    /// Protocol version sent in the 1.6 `MC|PingHost` message.
    pub legacy_protocol_version: u8,
    /// Protocol version sent in the modern handshake, `-1` if undetermined.
    pub modern_protocol_version: i32,
}

/// Additional socket configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConf {
    /// Set the read timeout for socket.
    pub read_time_out: Option<Duration>,
    /// Set the write timeout for socket.
    pub write_timeout: Option<Duration>,
    /// Timeout of establishing a TCP connection.
    pub connect_timeout: Option<Duration>,
    /// Specify the address for creating a UDP connection.
    /// The default value is [Ipv4Addr::UNSPECIFIED].
    pub rep_udp_ipv4: Ipv4Addr,
    /// Specify the port for creating a UDP connection.
    /// The default value is 0, which lets the system pick one.
    pub rep_udp_port: u16,
}

impl Default for SocketConf {
    fn default() -> Self {
        Self {
            read_time_out: None,
            write_timeout: None,
            connect_timeout: None,
            rep_udp_ipv4: Ipv4Addr::UNSPECIFIED,
            rep_udp_port: 0,
        }
    }
}

impl ToSocketAddrs for Conf {
    type Iter = std::vec::IntoIter<SocketAddr>;

    fn to_socket_addrs(&self) -> std::io::Result<Self::Iter> {
        (&*self.host, self.port).to_socket_addrs()
    }
}

impl std::fmt::Display for Conf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl Conf {
    /// Create a connection configuration using the default port(25565).
    ///
    /// # Examples
    ///
    /// ```
    /// # use mcstat::{Conf, SocketConf};
    /// #
    /// let conf = Conf::create("www.example.com");
    /// #
    /// # assert_eq!(conf.host, "www.example.com");
    /// # assert_eq!(conf.port, 25565);
    /// # assert_eq!(conf.socket_conf, SocketConf::default());
    /// # assert!(!conf.strict);
    /// ```
    pub fn create(host: &str) -> Self {
        Self::create_with_port(host, DEFAULT_PORT)
    }

    /// Create a connection configuration using the specified port.
    ///
    /// # Example
    ///
    /// ```
    /// # use mcstat::Conf;
    /// #
    /// let conf = Conf::create_with_port("www.example.com", 25575);
    /// #
    /// # assert_eq!(conf.port, 25575);
    /// ```
    pub fn create_with_port(host: &str, port: u16) -> Self {
        Self {
            host: host.trim().into(),
            port,
            socket_conf: SocketConf::default(),
            strict: false,
            legacy_protocol_version: LEGACY_PROTOCOL_VERSION_162,
            modern_protocol_version: PROTOCOL_VERSION_UNDEFINED,
        }
    }

    /// Create a connection configuration by using a string.
    ///
    /// The string is split on its last colon, the first part being the host
    /// of the server and the second part its port. A string without a colon
    /// uses the default port. If the port cannot be converted to [u16], a
    /// [StatErr::DataErr] is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use mcstat::{Conf, StatErr};
    /// #
    /// # fn main() -> Result<(), StatErr> {
    ///     let conf = Conf::create_from_str("www.example.com:25566")?;
    /// #
    /// #   assert_eq!(conf.host, "www.example.com");
    /// #   assert_eq!(conf.port, 25566);
    /// #
    /// #   let conf = Conf::create_from_str("www.example.com")?;
    /// #   assert_eq!(conf.port, 25565);
    /// #   let conf = Conf::create_from_str("www.example.com:-1");
    /// #   assert!(conf.is_err());
    /// #   Ok(())
    /// # }
    /// ```
    pub fn create_from_str(addr: &str) -> Result<Self, StatErr> {
        let addr = addr.trim();

        let (host, port) = match addr.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| StatErr::DataErr(format!("Invalid port: {}", port)))?;

                (host.trim(), port)
            }
            None => (addr, DEFAULT_PORT),
        };

        if host.is_empty() {
            return Err(StatErr::DataErr(format!(
                "Invalid socket address syntax: {}",
                addr
            )));
        }

        Ok(Self::create_with_port(host, port))
    }

    /// Enable or disable strict response checking.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Use the same timeout for connecting, reading and writing.
    ///
    /// # Example
    ///
    /// ```
    /// # use mcstat::Conf;
    /// # use std::time::Duration;
    /// #
    /// let conf = Conf::create("www.example.com").with_timeout(Duration::from_secs(3));
    /// #
    /// # assert_eq!(conf.socket_conf.read_time_out, Some(Duration::from_secs(3)));
    /// # assert_eq!(conf.socket_conf.connect_timeout, Some(Duration::from_secs(3)));
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.socket_conf.read_time_out = Some(timeout);
        self.socket_conf.write_timeout = Some(timeout);
        self.socket_conf.connect_timeout = Some(timeout);
        self
    }

    pub fn with_legacy_protocol_version(mut self, version: u8) -> Self {
        self.legacy_protocol_version = version;
        self
    }

    pub fn with_modern_protocol_version(mut self, version: i32) -> Self {
        self.modern_protocol_version = version;
        self
    }

    fn modern_ping(&self) -> ModernPing {
        let mut ping = ModernPing::new(&self.host, self.port);
        ping.protocol_version = self.modern_protocol_version;
        ping
    }

    /// Get info from a Java Edition server in beta release.
    ///
    /// Suitable for Java Edition servers version beta 1.8 to 1.3.
    /// Return type is [AncientStatus].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mcstat::{Conf, StatErr};
    ///
    /// fn main() -> Result<(), StatErr> {
    ///     let server = Conf::create("www.example.com");
    ///     let info = server.get_ancient_server_status()?;
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn get_ancient_server_status(&self) -> Result<AncientStatus, StatErr> {
        let mut stream = create_tcp_socket(self)?;

        ping_status(&mut stream, &AncientPing::new(self.strict))
    }

    /// Get info from a legacy Java Edition server.
    ///
    /// Suitable for Java Edition servers version 1.4 to 1.5. Return type is [LegacyStatus].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mcstat::{Conf, StatErr};
    ///
    /// fn main() -> Result<(), StatErr> {
    ///     let server = Conf::create("www.example.com");
    ///     let info = server.get_legacy_server_status()?;
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn get_legacy_server_status(&self) -> Result<LegacyStatus, StatErr> {
        let mut stream = create_tcp_socket(self)?;

        ping_status(&mut stream, &LegacyPing::new(self.strict))
    }

    /// Get info from a legacy Java Edition server.
    ///
    /// This uses a protocol which is compatible with the client-server protocol
    /// as it was before the Netty rewrite. Suitable for Java Edition servers
    /// version 1.6, and answered by most later servers too.
    /// Return type is [ExtendedLegacyStatus].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mcstat::{Conf, StatErr};
    ///
    /// fn main() -> Result<(), StatErr> {
    ///     let server = Conf::create("www.example.com");
    ///     let info = server.get_extended_legacy_server_status()?;
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn get_extended_legacy_server_status(&self) -> Result<ExtendedLegacyStatus, StatErr> {
        let mut stream = create_tcp_socket(self)?;
        let mut ping = ExtendedLegacyPing::new(&self.host, self.port);
        ping.protocol_version = self.legacy_protocol_version;
        ping.strict = self.strict;

        ping_status(&mut stream, &ping)
    }

    /// Get info from a modern Java Edition server.
    ///
    /// Using the [Server List Ping](https://wiki.vg/Server_List_Ping#Current_.281.7.2B.29) protocol.
    /// Suitable for Java Edition servers version 1.7 and above. Return type is [ModernStatus].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mcstat::{Conf, StatErr};
    ///
    /// fn main() -> Result<(), StatErr> {
    ///     let server = Conf::create("www.example.com");
    ///     let info = server.get_server_status()?;
    ///
    ///     println!("{}", info.description_text());
    ///     Ok(())
    /// }
    /// ```
    pub fn get_server_status(&self) -> Result<ModernStatus, StatErr> {
        let mut stream = create_tcp_socket(self)?;

        ping_status(&mut stream, &self.modern_ping())
    }

    /// Measure the round trip of a ping packet to a modern Java Edition server.
    ///
    /// The status exchange is performed first, as servers close the connection
    /// when a ping arrives before it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mcstat::{Conf, StatErr};
    ///
    /// fn main() -> Result<(), StatErr> {
    ///     let server = Conf::create("www.example.com");
    ///     let latency = server.get_server_latency()?;
    ///
    ///     println!("{} ms", latency.as_millis());
    ///     Ok(())
    /// }
    /// ```
    pub fn get_server_latency(&self) -> Result<Duration, StatErr> {
        let mut stream = create_tcp_socket(self)?;
        let ping = self.modern_ping();

        ping_status(&mut stream, &ping)?;
        ping.read_latency(&mut stream)
    }

    /// Get **basic** info from a modern Java Edition server using the [Query](https://wiki.vg/Query) protocol.
    ///
    /// To use this protocol, you need to enable the enable-query option on the server side.
    /// See [Server Config](https://wiki.vg/Query#Server_Config). Return type is [QueryBasic].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mcstat::{Conf, StatErr};
    ///
    /// fn main() -> Result<(), StatErr> {
    ///     let server = Conf::create_with_port("www.example.com", 25565);
    ///     let info = server.query()?;
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn query(&self) -> Result<QueryBasic, StatErr> {
        query::query_basic_status(self)
    }

    /// Get **full** info from a modern Java Edition server using the [Query](https://wiki.vg/Query) protocol.
    ///
    /// Return type is [QueryFull].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mcstat::{Conf, StatErr};
    ///
    /// fn main() -> Result<(), StatErr> {
    ///     let server = Conf::create_with_port("www.example.com", 25565);
    ///     let info = server.query_full()?;
    ///
    ///     for player in info.players {
    ///         println!("{}", player);
    ///     }
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn query_full(&self) -> Result<QueryFull, StatErr> {
        query::query_full_status(self)
    }
}
