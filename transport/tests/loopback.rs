// Loopback integration tests for the transport layer. All sockets bind
// ephemeral ports so tests never race each other on a fixed port.
use relay_transport::{
    resolve_target, Receiver, TcpReceiver, TcpTransport, Transport, UdpReceiver, UdpTransport,
};
use std::io::{ErrorKind, Write};
use std::net::{SocketAddr, TcpStream, UdpSocket};
use std::thread;
use std::time::Duration;

#[test]
fn dual_stack_udp_receives_ipv4_and_ipv6() {
    let mut receiver = UdpReceiver::new(0);
    receiver.bind().expect("bind receiver");
    let port = receiver.local_addr().expect("local addr").port();

    let v4 = UdpSocket::bind("127.0.0.1:0").expect("bind v4 client");
    v4.send_to(b"hello v4", ("127.0.0.1", port)).expect("send v4");

    let mut buf = [0u8; 4096];
    let (n, peer) = receiver.receive_from(&mut buf).expect("receive v4");
    assert_eq!(&buf[..n], b"hello v4");
    assert_eq!(peer.port(), v4.local_addr().expect("v4 addr").port());

    let v6 = UdpSocket::bind("[::1]:0").expect("bind v6 client");
    v6.send_to(b"hello v6", ("::1", port)).expect("send v6");

    let (n, peer) = receiver.receive_from(&mut buf).expect("receive v6");
    assert_eq!(&buf[..n], b"hello v6");
    assert_eq!(peer.port(), v6.local_addr().expect("v6 addr").port());
}

#[test]
fn udp_round_trip_is_byte_exact() {
    let mut receiver = UdpReceiver::new(0);
    receiver.bind().expect("bind receiver");
    let port = receiver.local_addr().expect("local addr").port();

    let target = resolve_target("127.0.0.1", port).expect("resolve");
    let mut transport = UdpTransport::new(target);
    transport.connect().expect("connect");

    let line = "a line with spaces and non-ascii: héllo";
    let sent = transport.send(line.as_bytes()).expect("send");
    assert_eq!(sent, line.len());

    let mut buf = [0u8; 4096];
    let (n, _) = receiver.receive_from(&mut buf).expect("receive");
    assert_eq!(&buf[..n], line.as_bytes());

    transport.disconnect().expect("disconnect");
}

#[test]
fn tcp_receiver_reads_once_per_accepted_connection() {
    let mut receiver = TcpReceiver::new(0);
    receiver.bind().expect("bind receiver");
    let port = receiver.local_addr().expect("local addr").port();

    let client = thread::spawn(move || {
        let mut first = TcpStream::connect(("127.0.0.1", port)).expect("connect first");
        first.write_all(b"ping").expect("write first");
        thread::sleep(Duration::from_millis(100));
        // Written after the receiver's single read; never observed.
        let _ = first.write_all(b"extra");

        let mut second = TcpStream::connect(("127.0.0.1", port)).expect("connect second");
        second.write_all(b"next").expect("write second");
    });

    let mut buf = [0u8; 4096];
    let (n, _) = receiver.receive_from(&mut buf).expect("first accept");
    assert_eq!(&buf[..n], b"ping");

    let (n, _) = receiver.receive_from(&mut buf).expect("second accept");
    assert_eq!(&buf[..n], b"next");

    client.join().expect("client thread");
}

#[test]
fn tcp_round_trip_over_ipv6() {
    let mut receiver = TcpReceiver::new(0);
    receiver.bind().expect("bind receiver");
    let port = receiver.local_addr().expect("local addr").port();

    let sender = thread::spawn(move || {
        let target = resolve_target("::1", port).expect("resolve");
        let mut transport = TcpTransport::new(target);
        transport.connect().expect("connect");
        transport.send(b"stream line").expect("send");
        transport.disconnect().expect("disconnect");
    });

    let mut buf = [0u8; 4096];
    let (n, _) = receiver.receive_from(&mut buf).expect("accept");
    assert_eq!(&buf[..n], b"stream line");

    sender.join().expect("sender thread");
}

#[test]
fn resolve_target_takes_first_candidate() {
    let v4 = resolve_target("127.0.0.1", 9000).expect("resolve v4");
    assert_eq!(v4, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());

    let v6 = resolve_target("::1", 9001).expect("resolve v6");
    assert_eq!(v6, "[::1]:9001".parse::<SocketAddr>().unwrap());
}

#[test]
fn send_before_connect_is_not_connected() {
    let target: SocketAddr = "127.0.0.1:9000".parse().unwrap();

    let mut udp = UdpTransport::new(target);
    assert_eq!(udp.send(b"x").unwrap_err().kind(), ErrorKind::NotConnected);

    let mut tcp = TcpTransport::new(target);
    assert_eq!(tcp.send(b"x").unwrap_err().kind(), ErrorKind::NotConnected);
}

#[test]
fn receive_before_bind_is_not_connected() {
    let mut buf = [0u8; 16];

    let mut udp = UdpReceiver::new(0);
    assert_eq!(
        udp.receive_from(&mut buf).unwrap_err().kind(),
        ErrorKind::NotConnected
    );

    let mut tcp = TcpReceiver::new(0);
    assert_eq!(
        tcp.receive_from(&mut buf).unwrap_err().kind(),
        ErrorKind::NotConnected
    );
}
