//! Output formatting for nlqueue-watch.

use std::io::{self, Write};

use nlqueue::{RefreshStats, SocketRegistry};

/// Print one tick as a table.
pub fn print_text(tick: u64, registry: &SocketRegistry, stats: &RefreshStats) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if tick == 1 {
        writeln!(handle, "{:<6} {:>8} {:>8}  Socket", "Tick", "Queue", "Backlog")?;
    }
    for (_, entry) in registry.unix_entries() {
        writeln!(
            handle,
            "{:<6} {:>8} {:>8}  {}",
            tick, entry.queue, entry.max_queue, entry.name
        )?;
    }
    if stats.missing > 0 {
        writeln!(handle, "{:<6} {} sockets gone", tick, stats.missing)?;
    }
    if stats.failed > 0 {
        writeln!(handle, "{:<6} {} queries failed", tick, stats.failed)?;
    }
    Ok(())
}

/// Print one tick as a JSON line.
pub fn print_json(tick: u64, registry: &SocketRegistry, stats: &RefreshStats) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let value = serde_json::json!({
        "tick": tick,
        "stats": stats,
        "sockets": registry,
    });
    serde_json::to_writer(&mut handle, &value)?;
    writeln!(handle)?;
    Ok(())
}
