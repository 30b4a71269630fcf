//! # Scenario 2: Telemetry Fan-Out
//!
//! Writes a stream of fixed-size telemetry records through a fan-out into
//! two sliding windows of different depths: a deep window for recent-history
//! queries and a shallow one for a cheap "latest readings" view.
//!
//! Demonstrates:
//! - Typed big-endian records over the stream trait
//! - One write reaching every sink in order
//! - Each window independently retaining only its newest records
//! - A fixed memory region used as a read-write header page

use anyhow::Result;
use slipstream_core::{
    ByteStream, MultiStream, RandomStream, ReadTyped, RegionStream, SeekFrom, WindowStream,
    WriteTyped,
};

/// One record: 4-byte sequence number + 8-byte reading.
const RECORD_BYTES: usize = 12;

fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {title}");
    println!("{}\n", "=".repeat(60));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    separator("SCENARIO: telemetry fan-out to two window depths");

    // One block per record keeps eviction record-aligned.
    let deep = WindowStream::with_block_capacity(10, RECORD_BYTES)?;
    let shallow = WindowStream::with_block_capacity(2, RECORD_BYTES)?;

    let mut fanout = MultiStream::new();
    fanout.push(Box::new(deep));
    fanout.push(Box::new(shallow));
    println!("fan-out over {} sinks", fanout.sink_count());

    // ── Produce 25 records with noisy readings ──────────────────
    let mut entropy = RandomStream::with_seed(42);
    for seq in 0u32..25 {
        fanout.write_u32(seq)?;
        let reading = entropy.read_u64()?;
        fanout.write_u64(reading)?;
    }
    println!("fanned out {} bytes total", fanout.len()?);

    // ── Read back what each window retained ─────────────────────
    let mut sinks = fanout.into_sinks();
    for (label, sink) in ["deep", "shallow"].iter().zip(sinks.iter_mut()) {
        separator(&format!("{label} window replay"));
        let records = sink.len()? as usize / RECORD_BYTES;
        println!("retained {records} records");
        sink.seek(SeekFrom::Start(0))?;
        for _ in 0..records {
            let seq = sink.read_u32()?;
            let reading = sink.read_u64()?;
            println!("  record {seq:>2}: {reading:#018x}");
        }
    }

    // ── Stamp a fixed header page for the archive ───────────────
    separator("archive header page");
    let mut header = RegionStream::read_write(vec![0u8; 16]);
    header.write_u32(0x534C_4950)?; // "SLIP"
    header.write_u16(1)?; // format version
    header.write_u16(RECORD_BYTES as u16)?;
    header.write_u64(25)?; // records produced
    let page = header.into_inner();
    println!("header page: {}", hex::encode(&page));

    println!("\nscenario complete");
    Ok(())
}
