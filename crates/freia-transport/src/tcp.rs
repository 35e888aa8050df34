// ============================================
// File: crates/freia-transport/src/tcp.rs
// ============================================
//! # TCP Connector
//!
//! ## Creation Reason
//! Opens the single outbound stream to the relay with a bounded connect
//! timeout, built on socket2 for control over options before connecting.
//!
//! ## Main Functionality
//! - `TcpConnector`: Resolves an `Endpoint` and connects to it
//!
//! ## Timeout Handling
//! ```text
//! set SO_RCVTIMEO / SO_SNDTIMEO = connect_timeout
//! connect_timeout(addr, connect_timeout)
//! clear SO_RCVTIMEO / SO_SNDTIMEO          ← steady state blocks forever
//! ```
//! A quiet relay after connect is normal; only the attempt is bounded.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Only the first resolved address is tried
//! - The returned stream is blocking; unblock a reader with
//!   `shutdown(Shutdown::Both)`, not by dropping a clone
//!
//! ## Last Modified
//! v0.1.0 - Initial TCP connector

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::{debug, info};

use freia_common::Endpoint;

use crate::error::{Result, TransportError};

/// Default bound on a connect attempt.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

// ============================================
// TcpConnector
// ============================================

/// Opens blocking TCP streams with a bounded connect timeout.
///
/// # Example
/// ```ignore
/// use freia_common::Endpoint;
/// use freia_transport::TcpConnector;
///
/// let stream = TcpConnector::default().connect(&Endpoint::new("127.0.0.1", 9000))?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    connect_timeout: Duration,
}

impl TcpConnector {
    /// Creates a connector with the given connect timeout.
    #[must_use]
    pub const fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// Returns the connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Resolves `endpoint` and connects to its first address.
    ///
    /// # Errors
    /// - `Resolve`: lookup failed or returned no address
    /// - `SocketCreate` / `SocketOption`: socket setup failed
    /// - `Connect`: refused, unreachable or timed out
    pub fn connect(&self, endpoint: &Endpoint) -> Result<TcpStream> {
        let addr = resolve(endpoint)?;
        self.connect_addr(addr)
    }

    /// Connects to an already resolved address.
    ///
    /// # Errors
    /// Same as [`TcpConnector::connect`], minus resolution.
    pub fn connect_addr(&self, addr: SocketAddr) -> Result<TcpStream> {
        debug!(%addr, timeout_ms = self.connect_timeout.as_millis(), "Connecting");

        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
            .map_err(|source| TransportError::SocketCreate { source })?;

        set_timeouts(&socket, Some(self.connect_timeout))?;

        socket
            .connect_timeout(&SockAddr::from(addr), self.connect_timeout)
            .map_err(|source| TransportError::Connect { addr, source })?;

        set_timeouts(&socket, None)?;

        let stream: TcpStream = socket.into();
        stream
            .set_nodelay(true)
            .map_err(|source| TransportError::SocketOption {
                option: "TCP_NODELAY",
                source,
            })?;

        info!(%addr, "TCP connection established");
        Ok(stream)
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }
}

fn resolve(endpoint: &Endpoint) -> Result<SocketAddr> {
    let target = endpoint.to_string();
    (endpoint.address(), endpoint.port())
        .to_socket_addrs()
        .map_err(|e| TransportError::resolve(&target, e.to_string()))?
        .next()
        .ok_or_else(|| TransportError::resolve(&target, "no addresses returned"))
}

fn set_timeouts(socket: &Socket, timeout: Option<Duration>) -> Result<()> {
    socket
        .set_read_timeout(timeout)
        .map_err(|source| TransportError::SocketOption {
            option: "SO_RCVTIMEO",
            source,
        })?;
    socket
        .set_write_timeout(timeout)
        .map_err(|source| TransportError::SocketOption {
            option: "SO_SNDTIMEO",
            source,
        })
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    #[test]
    fn test_connect_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let mut stream = TcpConnector::default()
            .connect(&Endpoint::new("127.0.0.1", port))
            .unwrap();
        let (mut peer, _) = listener.accept().unwrap();

        // Timeouts are cleared once connected.
        assert_eq!(stream.read_timeout().unwrap(), None);
        assert_eq!(stream.write_timeout().unwrap(), None);

        stream.write_all(b"ping").unwrap();
        let mut buf = [0u8; 4];
        peer.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ping");
    }

    #[test]
    fn test_connect_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = TcpConnector::new(Duration::from_millis(500))
            .connect(&Endpoint::new("127.0.0.1", port))
            .unwrap_err();
        assert_eq!(err.step(), "connect");
        assert!(matches!(err, TransportError::Connect { .. }));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(TcpConnector::default().connect_timeout(), Duration::from_secs(3));
    }
}
