//! Newline-delimited TCP transport.
//!
//! Implements [`LineTransport`] over a plain `std::net::TcpStream`: one
//! protocol line per `\n`-terminated text line.  Used for host-side
//! simulation against a local server and in integration tests.
//!
//! ## Connection model
//!
//! 1. `connect()` opens the socket and spawns a reader thread.
//! 2. The reader thread pushes each received line into the shared
//!    [`LineChannel`] and clears the `open` flag on EOF or error.
//! 3. `recv_line()` never blocks; it only drains the channel.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use log::{info, warn};

use crate::error::TransportError;
use crate::protocol::channels::{InboundLine, LineChannel, MAX_LINE_LEN, pop_line, push_line};
use crate::protocol::transport::LineTransport;

pub struct TcpLineTransport {
    stream: TcpStream,
    open: Arc<AtomicBool>,
    inbound: &'static LineChannel,
}

impl TcpLineTransport {
    /// Connect to `host:port` and start the reader thread.
    pub fn connect(addr: &str, inbound: &'static LineChannel) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr).map_err(|e| {
            warn!("TCP: connect to {} failed: {}", addr, e);
            TransportError::ConnectFailed
        })?;
        let _ = stream.set_nodelay(true);
        let reader = stream.try_clone().map_err(|_| TransportError::Io)?;

        let open = Arc::new(AtomicBool::new(true));
        let reader_open = Arc::clone(&open);
        thread::Builder::new()
            .name("botwave-rx".into())
            .spawn(move || read_loop(reader, inbound, &reader_open))
            .map_err(|_| TransportError::Io)?;

        info!("TCP: connected to {}", addr);
        Ok(Self { stream, open, inbound })
    }

    /// Shut the socket down; the reader thread exits on its own.
    pub fn close(&mut self) {
        self.open.store(false, Ordering::Release);
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
    }
}

fn read_loop(stream: TcpStream, inbound: &LineChannel, open: &AtomicBool) {
    for line in BufReader::new(stream).lines() {
        match line {
            Ok(line) => {
                push_line(inbound, &line);
            }
            Err(e) => {
                warn!("TCP: read failed: {}", e);
                break;
            }
        }
    }
    info!("TCP: connection closed by peer");
    open.store(false, Ordering::Release);
}

impl LineTransport for TcpLineTransport {
    type Error = TransportError;

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::NotConnected);
        }
        if line.len() > MAX_LINE_LEN {
            return Err(TransportError::LineTooLong);
        }

        let result = self
            .stream
            .write_all(line.as_bytes())
            .and_then(|()| self.stream.write_all(b"\n"))
            .and_then(|()| self.stream.flush());

        result.map_err(|e| {
            warn!("TCP: write failed: {}", e);
            self.open.store(false, Ordering::Release);
            TransportError::Io
        })
    }

    fn recv_line(&mut self) -> Option<InboundLine> {
        pop_line(self.inbound)
    }
}

impl Drop for TcpLineTransport {
    fn drop(&mut self) {
        self.close();
    }
}
