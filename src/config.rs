//!Runtime settings.
//!
//!Both peers agree on a single well-known udp port out of band. The
//!settings are built once at startup and passed into the components,
//!so tests can run the whole thing on ephemeral ports.

use std::io::{Error, ErrorKind::Other, Result};
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

/// Well-known port used on both ends when none is given.
pub const DEFAULT_PORT: u16 = 6311;

/// Upper bound for the randomized keepalive wait.
///
/// Each iteration samples a whole-second wait uniformly from
/// `0..=MAX_WAIT` (inclusive on both ends), so the longest idle
/// stretch between probes is three seconds.
pub const MAX_WAIT: Duration = Duration::from_secs(3);

/// Immutable for the process lifetime.
#[derive(Clone, Debug)]
pub struct Config {
    pub remote_host: String,
    pub remote_port: u16,
    pub local_port: u16,
    pub max_wait: Duration,
}

impl Config {
    /// Port-symmetric config: the same port on both ends, default
    /// probe bound.
    pub fn new<A: AsRef<str>>(remote_host: A, port: u16) -> Self {
        Self {
            remote_host: remote_host.as_ref().into(),
            remote_port: port,
            local_port: port,
            max_wait: MAX_WAIT,
        }
    }

    /// resolve the remote peer, first address wins
    pub fn remote_addr(&self) -> Result<SocketAddr> {
        (self.remote_host.as_str(), self.remote_port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| Error::new(Other, "no addr"))
    }

    pub fn local_addr(&self) -> SocketAddr {
        ([0, 0, 0, 0], self.local_port).into()
    }
}
