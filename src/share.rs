use crate::{conf::Conf, StatErr};
use log::debug;
use std::{
    net::{TcpStream, ToSocketAddrs, UdpSocket},
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

pub fn get_server_current_time() -> Result<u64, StatErr> {
    let tm = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();

    // Time should not exceed `u64::MAX`
    u64::try_from(tm).map_err(|_| {
        StatErr::InternalErr(format!(
            "Failed to obtain current time. It should not exceed u64::MAX, but got: {}",
            tm
        ))
    })
}

/// Parse a decimal status field, naming the field on failure.
pub fn parse_number<T>(value: &str, field: &str) -> Result<T, StatErr>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|err| {
        StatErr::malformed(format!(
            "Can not parse {} field {:?}, reason: {}",
            field, value, err
        ))
    })
}

/// Open a TCP connection and apply the configured timeouts once.
pub fn create_tcp_socket(conf: &Conf) -> Result<TcpStream, StatErr> {
    let socket = match conf.socket_conf.connect_timeout {
        Some(timeout) => {
            let addr = conf.to_socket_addrs()?.next().ok_or_else(|| {
                StatErr::DataErr(format!("Can not resolve server address: {}", conf))
            })?;

            TcpStream::connect_timeout(&addr, timeout)?
        }
        None => TcpStream::connect(conf)?,
    };

    socket.set_read_timeout(conf.socket_conf.read_time_out)?;
    socket.set_write_timeout(conf.socket_conf.write_timeout)?;
    debug!("tcp connected to {}", conf);

    Ok(socket)
}

/// Bind a local UDP socket and connect it to the server.
pub fn create_udp_socket(conf: &Conf) -> Result<UdpSocket, StatErr> {
    let socket_conf = &conf.socket_conf;
    let socket = UdpSocket::bind((socket_conf.rep_udp_ipv4, socket_conf.rep_udp_port))?;

    socket.set_read_timeout(socket_conf.read_time_out)?;
    socket.set_write_timeout(socket_conf.write_timeout)?;
    socket.connect(conf)?;
    debug!("udp socket {} connected to {}", socket.local_addr()?, conf);

    Ok(socket)
}
