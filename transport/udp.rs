// UDP transport implementation
use crate::socket;
use crate::traits::{Receiver, Transport};
use std::io::Result;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

/// One datagram per `send`, addressed to the resolved target.
pub struct UdpTransport {
    target: SocketAddr,
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    pub fn new(target: SocketAddr) -> Self {
        UdpTransport {
            target,
            socket: None,
        }
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        if let Some(ref socket) = self.socket {
            socket.send_to(data, self.target)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Not connected",
            ))
        }
    }

    fn connect(&mut self) -> Result<()> {
        // The local socket family follows the resolved target, which may
        // differ from the listener's dual-stack IPv6 wildcard.
        let local: SocketAddr = match self.target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        self.socket = Some(UdpSocket::bind(local)?);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.socket = None;
        Ok(())
    }
}

/// Dual-stack UDP socket yielding one datagram per `receive_from` call.
pub struct UdpReceiver {
    port: u16,
    socket: Option<UdpSocket>,
}

impl UdpReceiver {
    pub fn new(port: u16) -> Self {
        UdpReceiver { port, socket: None }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        match self.socket {
            Some(ref socket) => socket.local_addr(),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Not bound",
            )),
        }
    }
}

impl Receiver for UdpReceiver {
    fn bind(&mut self) -> Result<()> {
        self.socket = Some(socket::bind_udp(self.port)?);
        Ok(())
    }

    fn receive_from(&mut self, buf: &mut [u8]) -> Result<(usize, SocketAddr)> {
        if let Some(ref socket) = self.socket {
            socket.recv_from(buf)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Not bound",
            ))
        }
    }
}
