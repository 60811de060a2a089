use crate::config::Config;
use log;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use rand::Rng;
use std::io::{ErrorKind, Result};
use std::net::{SocketAddr, UdpSocket};
use std::os::fd::AsFd;
use std::sync::{
    atomic::{AtomicBool, Ordering::Relaxed},
    Arc,
};
use std::time::Duration;

/// What a single loop iteration did.
#[derive(Debug)]
pub enum Event {
    /// An inbound datagram arrived before the wait elapsed.
    Received { payload: Vec<u8>, from: SocketAddr },
    /// The wait elapsed, a timestamp probe went out to the peer.
    Probed,
}

/// Keeps the NAT mapping warm and surfaces inbound peer traffic.
///
/// Owns one long-lived socket bound to the local port. Each iteration
/// waits a freshly sampled number of seconds for an inbound datagram
/// and, when none shows up, sends the peer a small probe so the NAT
/// does not reclaim the idle mapping.
///
/// # example
/// ```no_run
/// use natpunch::config::Config;
/// use natpunch::udp::Keepalive;
///
/// let mut k = Keepalive::new(&Config::new("198.51.100.7", 6311)).unwrap();
/// let exit = k.stop_handle();
/// ctrlc::set_handler(move || exit.store(true, std::sync::atomic::Ordering::Relaxed)).unwrap();
/// k.run().unwrap();
/// ```
pub struct Keepalive {
    socket: UdpSocket,
    remote_addr: SocketAddr,
    max_wait: Duration,
    exit: Arc<AtomicBool>,
}

impl Keepalive {
    /// Resolve the peer and bind the long-lived socket. Both failures
    /// are fatal, there is no port failover.
    pub fn new(cfg: &Config) -> Result<Self> {
        let remote_addr = cfg.remote_addr()?;
        let socket = super::create_socket(cfg.local_addr())?;

        Ok(Self {
            socket: socket.into(),
            remote_addr,
            max_wait: cfg.max_wait,
            exit: Default::default(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Store `true` to make [`run`](Self::run) return after the
    /// iteration in flight.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.exit.clone()
    }

    /// Loop until the stop flag is set.
    ///
    /// Transient send/recv errors are logged and survived; the loop
    /// itself is the retry policy.
    pub fn run(&mut self) -> Result<()> {
        let mut rng = rand::thread_rng();

        while !self.exit.load(Relaxed) {
            let wait = Self::sample_wait(&mut rng, self.max_wait);

            match self.step(wait) {
                Ok(Event::Received { payload, from }) => {
                    println!(
                        "Response from {}:{} is {}",
                        from.ip(),
                        from.port(),
                        String::from_utf8_lossy(&payload)
                    );
                }
                Ok(Event::Probed) => println!("Sending a little something.."),
                // a signal interrupted the poll, re-check the flag
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => log::warn!("keepalive iteration failed: {}", e),
            }
        }

        Ok(())
    }

    /// Uniform whole seconds in `0..=max_wait`, resampled every call.
    fn sample_wait<R: Rng>(rng: &mut R, max_wait: Duration) -> Duration {
        Duration::from_secs(rng.gen_range(0..=max_wait.as_secs()))
    }

    /// One iteration: wait for an inbound datagram or the timeout,
    /// then take exactly one of the two actions.
    fn step(&mut self, wait: Duration) -> Result<Event> {
        if self.wait_readable(wait)? {
            let mut buf = [0; 1500];
            let (n, from) = self.socket.recv_from(&mut buf)?;

            Ok(Event::Received {
                payload: buf[..n].to_vec(),
                from,
            })
        } else {
            let now = chrono::Local::now().to_string();
            self.socket.send_to(now.as_bytes(), self.remote_addr)?;

            Ok(Event::Probed)
        }
    }

    fn wait_readable(&self, wait: Duration) -> Result<bool> {
        let mut fds = [PollFd::new(self.socket.as_fd(), PollFlags::POLLIN)];

        // poll takes millisecond timeouts, a zero wait means one
        // immediate readiness check
        let millis = u16::try_from(wait.as_millis()).unwrap_or(u16::MAX);

        match poll(&mut fds, PollTimeout::from(millis)) {
            Ok(n) => Ok(n > 0),
            Err(e) => Err(e.into()),
        }
    }
}
