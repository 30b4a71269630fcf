//! # Scenario 1: Scrollback Capture and Replay
//!
//! Simulates a long-running terminal session whose output is captured into a
//! small sliding window. The window holds only the newest output, so a client
//! reattaching late receives a bounded scrollback snapshot instead of the
//! full history.
//!
//! Demonstrates:
//! - Bounded capture: the window never grows past its configured capacity
//! - Block eviction (visible as trace events) as old output is dropped
//! - Replay from position 0 after reattach
//! - Tail replay via a negative end-relative seek
//! - Stream lifecycle: close makes the window permanently unusable

use anyhow::Result;
use slipstream_core::{ByteStream, SeekFrom, WindowStream};

fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {title}");
    println!("{}\n", "=".repeat(60));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    separator("SCENARIO: scrollback capture over a sliding window");

    // Four blocks of 64 bytes: a 256-byte scrollback budget.
    let mut scrollback = WindowStream::with_block_capacity(4, 64)?;
    println!(
        "window: {} blocks x {} bytes = {} byte budget",
        scrollback.max_blocks(),
        scrollback.block_capacity(),
        scrollback.capacity()
    );

    // ── Session produces far more output than the budget ────────
    let mut emitted = 0usize;
    for line_no in 1..=40 {
        let line = format!("[{line_no:03}] service heartbeat ok, queue depth {}\n", line_no % 7);
        emitted += line.len();
        scrollback.write(line.as_bytes())?;
    }
    println!(
        "session emitted {emitted} bytes, window retained {} bytes",
        scrollback.len()?
    );

    // ── Client reattaches: replay the whole retained window ─────
    separator("reattach: full snapshot replay");
    scrollback.seek(SeekFrom::Start(0))?;
    let mut snapshot = vec![0u8; scrollback.len()? as usize];
    let n = scrollback.read(&mut snapshot)?;
    snapshot.truncate(n);
    println!("{}", String::from_utf8_lossy(&snapshot));
    println!("first 16 bytes: {}", hex::encode(&snapshot[..16]));

    // ── A second client only wants the tail ─────────────────────
    separator("reattach: last 80 bytes only");
    scrollback.seek(SeekFrom::End(-80))?;
    let mut tail = vec![0u8; 80];
    let n = scrollback.read(&mut tail)?;
    println!("{}", String::from_utf8_lossy(&tail[..n]));

    // ── Session ends ────────────────────────────────────────────
    separator("session teardown");
    scrollback.close()?;
    match scrollback.write(b"late output") {
        Err(e) => println!("write after close rejected: {e}"),
        Ok(()) => unreachable!("closed window accepted a write"),
    }

    println!("\nscenario complete");
    Ok(())
}
