// Dual-stack socket construction and target resolution
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, ErrorKind};
use std::net::{Ipv6Addr, SocketAddr, TcpListener, ToSocketAddrs, UdpSocket};

pub const LISTEN_BACKLOG: i32 = 5;

// IPv6 wildcard socket with mapped IPv4 enabled; the flag must be cleared
// before bind.
fn dual_stack(port: u16, ty: Type, proto: Protocol) -> io::Result<Socket> {
    let socket = Socket::new(Domain::IPV6, ty, Some(proto))?;
    socket.set_only_v6(false)?;
    let addr = SocketAddr::from((Ipv6Addr::UNSPECIFIED, port));
    socket.bind(&addr.into())?;
    Ok(socket)
}

/// Bind a dual-stack UDP socket on the wildcard address.
pub fn bind_udp(port: u16) -> io::Result<UdpSocket> {
    let socket = dual_stack(port, Type::DGRAM, Protocol::UDP)?;
    Ok(socket.into())
}

/// Bind a dual-stack TCP listener on the wildcard address.
pub fn bind_tcp(port: u16) -> io::Result<TcpListener> {
    let socket = dual_stack(port, Type::STREAM, Protocol::TCP)?;
    socket.listen(LISTEN_BACKLOG)?;
    Ok(socket.into())
}

/// Resolve a target host and port, taking the first candidate
/// unconditionally. Later candidates are never tried, even when a connect
/// or send against the first one fails.
pub fn resolve_target(host: &str, port: u16) -> io::Result<SocketAddr> {
    (host, port).to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(
            ErrorKind::AddrNotAvailable,
            format!("no addresses found for {}:{}", host, port),
        )
    })
}
