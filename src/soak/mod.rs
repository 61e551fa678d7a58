//! # Verification Loop
//!
//! The soak loop ties the storage and pattern layers together. Each
//! cycle allocates a fresh [`crate::storage::MappedRegion`], writes the
//! cycle's deterministic word sequence through it, requests write-back,
//! then regenerates the sequence and compares every word in place.
//!
//! ## Reporting
//!
//! Three line shapes go to the runner's sink, each stamped with the
//! cycle counter and the wall-clock time:
//!
//! ```text
//! [3] 2026-08-07 10:12:44 25769803776 bytes written.
//! [3] 2026-08-07 10:13:02 Mismatch happened when 17179877376 bytes read.
//! [3] 2026-08-07 10:13:19 25769803776 bytes read.
//! ```
//!
//! Byte counts are cumulative over the process lifetime, so the numbers
//! grow cycle over cycle; a mismatch line pins down how far the verify
//! pass had read when the bad word surfaced. Mismatches are the tool's
//! output signal, not errors: the pass always runs to completion so that
//! every corrupted word in a cycle is reported.
//!
//! ## Error Policy
//!
//! A region that cannot be constructed is an environment problem
//! (permissions, disk space), not a corruption finding; it propagates
//! out and terminates the run. A failed write-back request is reported
//! and tolerated: durability is best effort here, the mapping path is
//! what is under test. There is no retry logic anywhere: retrying a
//! corrupted read would hide the signal being measured.
//!
//! ## Module Organization
//!
//! - [`runner`]: `SoakRunner`, the per-cycle passes and cumulative stats

pub mod runner;

pub use runner::{CycleStats, Mismatch, SoakRunner};
