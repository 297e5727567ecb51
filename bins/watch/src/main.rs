//! nlqueue-watch - Unix listener backlog monitor.
//!
//! Periodically reports how many connections are waiting on each of the
//! given Unix stream listeners, and their listen backlog. With `--bind` the
//! program owns the listeners itself, which is handy for trying it out.

mod output;

use std::io;
use std::os::fd::AsRawFd;
use std::os::linux::net::SocketAddrExt;
use std::os::unix::net::{SocketAddr, UnixListener};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use nlqueue::netlink::DEFAULT_RECV_BUFFER;
use nlqueue::{MonitorConfig, QueueMonitor, SocketEntry, SocketRegistry};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "nlqueue-watch",
    version,
    about = "Watch the backlog of Unix listening sockets"
)]
struct Cli {
    /// Socket paths to watch (`@name` for the abstract namespace).
    #[arg(required = true)]
    sockets: Vec<String>,

    /// Milliseconds between ticks.
    #[arg(short = 'i', long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Milliseconds to wait for each kernel reply.
    #[arg(short = 't', long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Receive buffer size in bytes.
    #[arg(long, default_value_t = DEFAULT_RECV_BUFFER)]
    buffer: usize,

    /// Bind and listen on the sockets instead of watching existing ones.
    #[arg(short = 'b', long)]
    bind: bool,

    /// Listen backlog used with --bind.
    #[arg(long, default_value_t = 128)]
    backlog: i32,

    /// Output one JSON object per tick.
    #[arg(short = 'j', long)]
    json: bool,

    /// Stop after this many ticks.
    #[arg(short = 'c', long)]
    count: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut registry: SocketRegistry = cli
        .sockets
        .iter()
        .map(|name| SocketEntry::unix(name.as_str()))
        .collect();

    let listeners = if cli.bind {
        cli.sockets
            .iter()
            .map(|name| bind(name, cli.backlog))
            .collect::<anyhow::Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    let config = MonitorConfig::new()
        .recv_timeout(Duration::from_millis(cli.timeout))
        .recv_buffer(cli.buffer);
    let mut monitor = QueueMonitor::with_config(config);
    info!(
        sockets = registry.len(),
        bound = listeners.len(),
        "watching unix listeners"
    );

    let mut interval = tokio::time::interval(Duration::from_millis(cli.interval));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut tick = 0u64;
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        tick += 1;
        let stats = monitor.tick(&mut registry).await;
        if cli.json {
            output::print_json(tick, &registry, &stats)?;
        } else {
            output::print_text(tick, &registry, &stats)?;
        }

        if cli.count.is_some_and(|n| tick >= n) {
            break;
        }
    }

    drop(listeners);
    if cli.bind {
        for name in cli.sockets.iter().filter(|n| !n.starts_with('@')) {
            if let Err(e) = std::fs::remove_file(name) {
                debug!(%name, error = %e, "failed to remove socket file");
            }
        }
    }

    Ok(())
}

/// Bind a Unix stream listener with the given backlog.
fn bind(name: &str, backlog: i32) -> anyhow::Result<UnixListener> {
    let listener = match name.strip_prefix('@') {
        Some(abstract_name) => {
            let addr = SocketAddr::from_abstract_name(abstract_name)?;
            UnixListener::bind_addr(&addr)
        }
        None => UnixListener::bind(name),
    }
    .with_context(|| format!("failed to bind {}", name))?;

    // Linux applies a new backlog when listen() is called again.
    // SAFETY: the descriptor is owned by `listener` and open.
    if unsafe { libc::listen(listener.as_raw_fd(), backlog) } < 0 {
        return Err(io::Error::last_os_error())
            .with_context(|| format!("failed to listen on {}", name));
    }

    debug!(%name, backlog, "bound listener");
    Ok(listener)
}
