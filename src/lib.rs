//!A minimal UDP hole punching keepalive to help NAT traversal.
//!
//!To reach a peer behind a NAT or firewall which only allows outbound connection,
//!the node behind it must send traffic toward you first. Sending one outbound
//!datagram installs a temporary inbound mapping on the NAT for that peer address;
//!idle udp mappings are silently reclaimed, so something small has to keep flowing.
//!
//!## How it works
//!Both peers agree on one well-known udp port. On startup we punch: bind the port,
//!send a single empty datagram to the peer, drop the socket. Then the keepalive
//!takes over the same port: each iteration it waits a randomized number of seconds
//!for an inbound datagram, and when nothing arrives in time it sends the peer a
//!timestamp probe to refresh the mapping.
//!
//!The essential is, punch and keepalive must use the same local port, one after
//!the other.
//!
//!There is exactly one statically-known peer. No rendezvous, no NAT-type
//!detection, no payload framing.

pub mod config;
pub mod udp;
