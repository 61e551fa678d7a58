//! # Soak Runner
//!
//! `SoakRunner` owns the cycle counter, the cumulative byte counters,
//! and the report sink, and drives the allocate → write → flush →
//! verify cycle. The write and verify passes are public so tests can
//! run them against a region of their own and corrupt words in between.

use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use eyre::Result;

use crate::config::{BYTES_PER_GIB, WORD_SIZE};
use crate::pattern::PatternGenerator;
use crate::storage::MappedRegion;

/// Process-lifetime progress counters. Owned by the runner and mutated
/// only by its passes; the counters are never reset.
#[derive(Debug, Clone, Copy)]
pub struct CycleStats {
    cycle: u64,
    bytes_written: u64,
    bytes_read: u64,
}

impl CycleStats {
    fn new() -> Self {
        Self {
            cycle: 1,
            bytes_written: 0,
            bytes_read: 0,
        }
    }

    /// Current cycle counter. Starts at 1 and only ever increments.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Total bytes written across all completed and in-flight cycles.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Total bytes read back across all verify passes.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

/// One verify-pass word whose observed value differed from the
/// regenerated pattern word at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Cumulative bytes-read counter at the moment of detection.
    pub bytes_read: u64,
    /// Byte offset of the bad word within the region.
    pub offset: usize,
    /// Word the generator produced at this position.
    pub expected: u64,
    /// Word actually stored in the region.
    pub observed: u64,
}

pub struct SoakRunner<W> {
    path: PathBuf,
    requested_bytes: u64,
    stats: CycleStats,
    sink: W,
}

impl<W: Write> SoakRunner<W> {
    /// Runner over a region of `size_gib` gibibytes backed by `path`.
    /// Report lines are written to `sink`.
    pub fn new<P: Into<PathBuf>>(path: P, size_gib: u64, sink: W) -> Self {
        Self::with_byte_size(path, size_gib.saturating_mul(BYTES_PER_GIB), sink)
    }

    /// Runner with an exact requested byte size. The effective region
    /// length is this rounded down to a page multiple each cycle.
    pub fn with_byte_size<P: Into<PathBuf>>(path: P, requested_bytes: u64, sink: W) -> Self {
        Self {
            path: path.into(),
            requested_bytes,
            stats: CycleStats::new(),
            sink,
        }
    }

    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Runs write/verify cycles until the process is externally
    /// terminated. The loop has no exit condition; it returns only by
    /// propagating a fatal region-construction error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.run_cycle()?;
        }
    }

    /// One full cycle over a freshly allocated region. Returns the
    /// number of mismatches the verify pass found.
    pub fn run_cycle(&mut self) -> Result<usize> {
        let mut region = MappedRegion::open(&self.path, self.requested_bytes)?;
        self.write_pass(&mut region)?;
        let mismatches = self.verify_pass(&region)?;
        drop(region);
        self.stats.cycle += 1;
        Ok(mismatches.len())
    }

    /// Fills the region with the current cycle's pattern, requests
    /// write-back, and reports the cumulative bytes written.
    pub fn write_pass(&mut self, region: &mut MappedRegion) -> Result<()> {
        let mut pattern = PatternGenerator::for_cycle(self.stats.cycle);
        for word in region.words_mut() {
            *word = pattern.next_word();
            self.stats.bytes_written += WORD_SIZE as u64;
        }

        // Best effort: the mapping path is what is under test, not the
        // durability guarantee.
        if let Err(e) = region.flush_async() {
            eprintln!("write-back request failed: {e:#}");
        }

        writeln!(
            self.sink,
            "[{}] {} {} bytes written.",
            self.stats.cycle,
            timestamp(),
            self.stats.bytes_written
        )?;
        self.sink.flush()?;
        Ok(())
    }

    /// Regenerates the cycle's pattern and compares every region word
    /// against it, reporting each mismatch as it is found. The pass
    /// always covers the whole region.
    pub fn verify_pass(&mut self, region: &MappedRegion) -> Result<Vec<Mismatch>> {
        let mut pattern = PatternGenerator::for_cycle(self.stats.cycle);
        let mut mismatches = Vec::new();

        for (index, &observed) in region.words().iter().enumerate() {
            self.stats.bytes_read += WORD_SIZE as u64;
            // The generator advances from its own state regardless of
            // what the region holds; one bad word must not cast doubt
            // on every word after it.
            let expected = pattern.next_word();
            if observed != expected {
                writeln!(
                    self.sink,
                    "[{}] {} Mismatch happened when {} bytes read.",
                    self.stats.cycle,
                    timestamp(),
                    self.stats.bytes_read
                )?;
                self.sink.flush()?;
                mismatches.push(Mismatch {
                    bytes_read: self.stats.bytes_read,
                    offset: index * WORD_SIZE,
                    expected,
                    observed,
                });
            }
        }

        writeln!(
            self.sink,
            "[{}] {} {} bytes read.",
            self.stats.cycle,
            timestamp(),
            self.stats.bytes_read
        )?;
        self.sink.flush()?;
        Ok(mismatches)
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
