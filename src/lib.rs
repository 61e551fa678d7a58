//! # memsoak - Storage Soak Tester
//!
//! memsoak hunts silent data corruption (bit flips in RAM, storage
//! controllers, or the page-cache/mmap path) by repeatedly writing a
//! deterministic pseudo-random pattern through a memory-mapped file and
//! reading every word back against a regenerated copy of the same pattern.
//!
//! Because each cycle reseeds the generator with the cycle counter, the
//! expected contents of the whole region are reproducible on demand and
//! never have to be stored alongside the data being checked.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::io;
//! use memsoak::SoakRunner;
//!
//! let stdout = io::stdout();
//! let mut runner = SoakRunner::new("/mnt/data/soak.bin", 8, stdout.lock());
//! runner.run()?; // loops until the process is killed
//! ```
//!
//! ## Architecture
//!
//! One sequential loop composed from three layers:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      Binary (src/bin/memsoak)        │   args, exit status
//! ├─────────────────────────────────────┤
//! │      Verification Loop (soak)        │   write pass / verify pass,
//! │                                      │   cumulative counters, reports
//! ├──────────────────┬──────────────────┤
//! │  Pattern          │  Mapped Region   │
//! │  (seeded ChaCha8) │  (O_DIRECT +     │
//! │                   │   mmap, unlinked)│
//! └──────────────────┴──────────────────┘
//! ```
//!
//! Every cycle allocates a fresh [`storage::MappedRegion`], fills it word
//! by word from a [`pattern::PatternGenerator`] seeded with the cycle
//! counter, requests write-back, then reseeds an identical generator and
//! compares every word in place. Mismatches are reported immediately and
//! the pass always runs to completion so that every corrupted word in a
//! cycle surfaces, not just the first.
//!
//! ## Lifecycle of the Backing File
//!
//! The backing file is created at the caller-supplied path and unlinked
//! before it is ever written, so the storage exists only as long as the
//! process holds the descriptor. No artifact survives process exit, even
//! an abrupt one.
//!
//! ## Module Overview
//!
//! - [`storage`]: page-aligned memory-mapped region over an unlinked file
//! - [`pattern`]: deterministic 64-bit word sequence, seeded per cycle
//! - [`soak`]: the write/flush/verify loop and its mismatch reports
//! - [`config`]: centralized size constants

pub mod config;
pub mod pattern;
pub mod soak;
pub mod storage;

pub use pattern::PatternGenerator;
pub use soak::{CycleStats, Mismatch, SoakRunner};
pub use storage::MappedRegion;
