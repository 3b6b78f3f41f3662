// netrelay: bidirectional TCP/UDP data relay with a dual-stack listener
// and an optional line-oriented sender
use std::env;
use std::io::{self, BufRead};
use std::net::SocketAddr;
use std::process;
use std::str;
use std::thread;

use relay_core::{parse_command, Command, ParseError, TransportMode, USAGE};
use relay_transport::{
    resolve_target, Receiver, TcpReceiver, TcpTransport, Transport, UdpReceiver, UdpTransport,
};

const RECV_BUFFER_SIZE: usize = 4096;

fn main() {
    let args: Vec<String> = env::args().collect();

    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(ParseError::Usage) => {
            println!("{}", USAGE);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("netrelay: {}", e);
            println!("{}", USAGE);
            process::exit(1);
        }
    };

    let port = command.port();
    let mode = command.mode();

    let listener = thread::spawn(move || run_listener(port, mode));

    if let Command::ListenAndSend {
        host, target_port, ..
    } = command
    {
        // First resolution result, unconditionally; failure is fatal before
        // the sender ever starts.
        let target = match resolve_target(&host, target_port) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!(
                    "netrelay: failed to resolve {}:{}: {}",
                    host, target_port, e
                );
                process::exit(1);
            }
        };

        let sender = thread::spawn(move || run_sender(target, mode));
        let _ = sender.join();
    }

    // The listener never returns on its own, so this join holds the process
    // open until it is killed or the listener loop dies of an error. Exiting
    // abandons any still-running thread; there is no shutdown handshake and
    // no socket draining.
    let _ = listener.join();
}

// Receive loop: owns the dual-stack socket for the process lifetime. Decode
// and socket errors end this loop only; a concurrent sender is unaffected.
fn run_listener(port: u16, mode: TransportMode) {
    let mut receiver: Box<dyn Receiver> = match mode {
        TransportMode::Udp => Box::new(UdpReceiver::new(port)),
        TransportMode::Tcp => Box::new(TcpReceiver::new(port)),
    };

    if let Err(e) = receiver.bind() {
        eprintln!("netrelay: failed to bind port {}: {}", port, e);
        return;
    }
    println!("Listening on port {}...", port);

    let mut buf = vec![0u8; RECV_BUFFER_SIZE];
    loop {
        let (n, peer) = match receiver.receive_from(&mut buf) {
            Ok(received) => received,
            Err(e) => {
                eprintln!("netrelay: receive error: {}", e);
                break;
            }
        };

        match str::from_utf8(&buf[..n]) {
            Ok(text) => println!("Received from ({}, {}): {}", peer.ip(), peer.port(), text),
            Err(e) => {
                eprintln!("netrelay: invalid UTF-8 from {}: {}", peer, e);
                break;
            }
        }
    }
}

// Send loop: one stdin line in, one transmit out. End of input or a read
// error ends the loop; nothing signals the listener.
fn run_sender(target: SocketAddr, mode: TransportMode) {
    let mut transport: Box<dyn Transport> = match mode {
        TransportMode::Udp => Box::new(UdpTransport::new(target)),
        TransportMode::Tcp => Box::new(TcpTransport::new(target)),
    };

    if let Err(e) = transport.connect() {
        eprintln!("netrelay: failed to connect to {}: {}", target, e);
        return;
    }
    println!("Sending data to {} on port {}...", target.ip(), target.port());

    let mut input = io::stdin().lock();
    let mut line = String::new();
    loop {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("netrelay: stdin read error: {}", e);
                break;
            }
        }

        let text = line.strip_suffix('\n').unwrap_or(&line);
        let text = text.strip_suffix('\r').unwrap_or(text);
        if let Err(e) = transport.send(text.as_bytes()) {
            eprintln!("netrelay: send error: {}", e);
            break;
        }
    }
}
