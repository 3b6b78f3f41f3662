// TCP transport implementation
use crate::socket;
use crate::traits::{Receiver, Transport};
use std::io::{Read, Result, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

/// One connected stream to the resolved target; each `send` is a single
/// write with no added framing.
pub struct TcpTransport {
    target: SocketAddr,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    pub fn new(target: SocketAddr) -> Self {
        TcpTransport {
            target,
            stream: None,
        }
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        if let Some(ref mut stream) = self.stream {
            stream.write(data)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Not connected",
            ))
        }
    }

    fn connect(&mut self) -> Result<()> {
        let stream = TcpStream::connect(self.target)?;
        self.stream = Some(stream);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.stream = None;
        Ok(())
    }
}

/// Dual-stack TCP listener servicing one connection at a time.
pub struct TcpReceiver {
    port: u16,
    listener: Option<TcpListener>,
}

impl TcpReceiver {
    pub fn new(port: u16) -> Self {
        TcpReceiver {
            port,
            listener: None,
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        match self.listener {
            Some(ref listener) => listener.local_addr(),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Not bound",
            )),
        }
    }
}

impl Receiver for TcpReceiver {
    fn bind(&mut self) -> Result<()> {
        self.listener = Some(socket::bind_tcp(self.port)?);
        Ok(())
    }

    // Known limitation: a single read per accepted connection. The socket
    // is dropped afterwards, so data written beyond that read, or past one
    // buffer, is never observed.
    fn receive_from(&mut self, buf: &mut [u8]) -> Result<(usize, SocketAddr)> {
        if let Some(ref listener) = self.listener {
            let (mut conn, peer) = listener.accept()?;
            let n = conn.read(buf)?;
            Ok((n, peer))
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Not bound",
            ))
        }
    }
}
