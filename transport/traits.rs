// Transport abstraction - allows pluggable send/receive backends
use std::io::Result;
use std::net::SocketAddr;

/// Sender side of the relay: one socket, one resolved target.
pub trait Transport: Send {
    fn send(&mut self, data: &[u8]) -> Result<usize>;
    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self) -> Result<()>;
}

/// Listener side of the relay. Each `receive_from` call yields one inbound
/// message and its peer address; for TCP that means one accept plus one read.
pub trait Receiver: Send {
    fn bind(&mut self) -> Result<()>;
    fn receive_from(&mut self, buf: &mut [u8]) -> Result<(usize, SocketAddr)>;
}
