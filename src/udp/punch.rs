use crate::config::Config;
use std::io::Result;
use std::net::UdpSocket;

/// One-shot hole punch toward the remote peer.
///
/// Sends a single empty datagram from the local port to the peer so
/// a NAT in front of us installs an inbound mapping for it, then
/// releases the socket so [`Keepalive`](super::Keepalive) can claim
/// the same port.
///
/// # example
/// ```no_run
/// use natpunch::config::Config;
/// use natpunch::udp::Puncher;
///
/// let cfg = Config::new("198.51.100.7", 6311);
/// if let Err(e) = Puncher::new(cfg).punch() {
///     log::warn!("hole punch failed: {}", e);
/// }
/// ```
pub struct Puncher {
    cfg: Config,
}

impl Puncher {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Send the punch datagram, best effort.
    ///
    /// The caller decides whether a failure matters. The socket is
    /// released on every path, so the local port is free again as
    /// soon as this returns.
    pub fn punch(&self) -> Result<()> {
        let remote_addr = self.cfg.remote_addr()?;

        let socket: UdpSocket = super::create_socket(self.cfg.local_addr())?.into();
        socket.send_to(&[], remote_addr)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::UdpSocket;
    use std::time::Duration;

    fn config_for(remote: std::net::SocketAddr) -> Config {
        Config {
            remote_host: remote.ip().to_string(),
            remote_port: remote.port(),
            local_port: 0,
            max_wait: Duration::from_secs(1),
        }
    }

    #[test]
    fn sends_one_empty_datagram() {
        let remote = UdpSocket::bind("127.0.0.1:0").unwrap();
        remote
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();

        let puncher = Puncher::new(config_for(remote.local_addr().unwrap()));
        puncher.punch().unwrap();

        let mut buf = [0; 16];
        let (n, _) = remote.recv_from(&mut buf).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn releases_port_when_send_fails() {
        let probe = UdpSocket::bind("127.0.0.1:0").unwrap();
        let local_port = probe.local_addr().unwrap().port();
        drop(probe);

        // port 0 as destination makes sendto fail after the bind
        let cfg = Config {
            remote_host: "127.0.0.1".into(),
            remote_port: 0,
            local_port,
            max_wait: Duration::from_secs(1),
        };

        assert!(Puncher::new(cfg).punch().is_err());

        // the failed punch must not hold the port
        UdpSocket::bind(("0.0.0.0", local_port)).unwrap();
    }

    #[test]
    fn unresolvable_remote_is_an_error() {
        let cfg = Config::new("host.invalid", 6311);
        assert!(Puncher::new(cfg).punch().is_err());
    }
}
