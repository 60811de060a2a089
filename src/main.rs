use log;
use natpunch::config::Config;
use natpunch::udp::{Keepalive, Puncher};
use std::io::{Error, ErrorKind::Other, Result};
use std::sync::atomic::Ordering::Relaxed;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "natpunch")]
struct Opt {
    /// remote peer host or address
    remote_host: String,

    /// udp port used on both ends
    #[structopt(long = "port", default_value = "6311")]
    port: u16,
}

fn main() -> Result<()> {
    env_logger::init();

    let opt: Opt = StructOpt::from_args();
    let cfg = Config::new(&opt.remote_host, opt.port);

    // best effort, the keepalive still runs if the punch failed
    if let Err(e) = Puncher::new(cfg.clone()).punch() {
        log::warn!("hole punch failed: {}", e);
    }

    let mut keepalive = Keepalive::new(&cfg)?;
    println!(
        "Binding to local port {}",
        keepalive.local_addr()?.port()
    );

    let exit = keepalive.stop_handle();
    ctrlc::set_handler(move || exit.store(true, Relaxed))
        .map_err(|e| Error::new(Other, e.to_string()))?;

    keepalive.run()
}
