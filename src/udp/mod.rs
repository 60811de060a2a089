//! UDP hole punching.
//!
//! use `Puncher` to open the NAT mapping toward the remote peer.
//!
//! use `Keepalive` to keep that mapping alive and surface inbound
//! datagrams.

mod keepalive;
mod punch;

pub use keepalive::{Event, Keepalive};
pub use punch::Puncher;

use socket2::{Domain, Protocol, Socket, Type};
use std::io::Result;
use std::net::SocketAddr;

fn create_socket(local_addr: SocketAddr) -> Result<Socket> {
    let socket = Socket::new(
        Domain::for_address(local_addr),
        Type::DGRAM,
        Some(Protocol::UDP),
    )?;
    socket.set_reuse_address(true)?;
    socket.bind(&local_addr.into())?;

    Ok(socket)
}
