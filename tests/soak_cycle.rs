//! # Soak Cycle Tests
//!
//! End-to-end tests of the write/verify cycle, specifically:
//! 1. A clean region verifies with zero mismatches
//! 2. Corrupted words are detected exhaustively, one report per word,
//!    without desynchronizing the rest of the pass
//! 3. Cumulative counters advance by the effective region length per
//!    cycle and the backing path never survives
//!
//! ## Background
//!
//! The verify pass regenerates the cycle's pattern from the same seed
//! the write pass used and compares position by position. Comparison is
//! position-independent per word: a corrupted word must produce exactly
//! one mismatch report and leave every later comparison intact. The
//! tests corrupt mapped words directly between the two passes to
//! simulate the bit flips the tool exists to catch.

use memsoak::storage::page_size;
use memsoak::{MappedRegion, SoakRunner};
use tempfile::tempdir;

fn sink_lines(sink: &[u8]) -> Vec<String> {
    String::from_utf8(sink.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

mod clean_region_tests {
    use super::*;

    #[test]
    fn full_cycle_reports_zero_mismatches() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let bytes = 2 * page_size() as u64;
        let mut runner = SoakRunner::with_byte_size(&path, bytes, Vec::new());

        let mismatches = runner.run_cycle().unwrap();

        assert_eq!(mismatches, 0);
    }

    #[test]
    fn counters_accumulate_region_length_per_cycle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let region_len = 2 * page_size() as u64;
        let mut runner = SoakRunner::with_byte_size(&path, region_len, Vec::new());

        for _ in 0..3 {
            runner.run_cycle().unwrap();
        }

        assert_eq!(runner.stats().cycle(), 4);
        assert_eq!(runner.stats().bytes_written(), 3 * region_len);
        assert_eq!(runner.stats().bytes_read(), 3 * region_len);
    }

    #[test]
    fn pass_reports_carry_cycle_and_cumulative_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let region_len = page_size() as u64;
        let mut sink = Vec::new();
        {
            let mut runner = SoakRunner::with_byte_size(&path, region_len, &mut sink);
            runner.run_cycle().unwrap();
            runner.run_cycle().unwrap();
        }

        let lines = sink_lines(&sink);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[1] "));
        assert!(lines[0].ends_with(&format!("{} bytes written.", region_len)));
        assert!(lines[1].starts_with("[1] "));
        assert!(lines[1].ends_with(&format!("{} bytes read.", region_len)));
        // Second cycle reports the running totals, not per-cycle counts.
        assert!(lines[2].starts_with("[2] "));
        assert!(lines[2].ends_with(&format!("{} bytes written.", 2 * region_len)));
        assert!(lines[3].starts_with("[2] "));
        assert!(lines[3].ends_with(&format!("{} bytes read.", 2 * region_len)));
    }

    #[test]
    fn sub_page_size_is_a_noop_cycle_not_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let mut sink = Vec::new();
        {
            let mut runner = SoakRunner::with_byte_size(&path, 100, &mut sink);

            let mismatches = runner.run_cycle().unwrap();

            assert_eq!(mismatches, 0);
            assert_eq!(runner.stats().bytes_written(), 0);
            assert_eq!(runner.stats().bytes_read(), 0);
        }

        // Both completion lines still print for the degenerate region.
        let lines = sink_lines(&sink);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[1] "));
        assert!(lines[0].ends_with("0 bytes written."));
        assert!(lines[1].starts_with("[1] "));
        assert!(lines[1].ends_with("0 bytes read."));
    }
}

mod mismatch_detection_tests {
    use super::*;
    use memsoak::config::WORD_SIZE;

    #[test]
    fn single_corrupt_word_is_reported_once_at_its_offset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let bytes = page_size() as u64;
        let mut sink = Vec::new();
        let mut runner = SoakRunner::with_byte_size(&path, bytes, &mut sink);

        let mut region = MappedRegion::open(&path, bytes).unwrap();
        runner.write_pass(&mut region).unwrap();

        let corrupt_index = 17;
        region.words_mut()[corrupt_index] ^= 1;

        let mismatches = runner.verify_pass(&region).unwrap();

        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].offset, corrupt_index * WORD_SIZE);
        // Detection fires after the bad word has been counted as read.
        assert_eq!(
            mismatches[0].bytes_read,
            (corrupt_index as u64 + 1) * WORD_SIZE as u64
        );
        assert_eq!(mismatches[0].observed, mismatches[0].expected ^ 1);
    }

    #[test]
    fn single_corrupt_word_does_not_desynchronize_later_words() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let bytes = page_size() as u64;
        let mut runner = SoakRunner::with_byte_size(&path, bytes, Vec::new());

        let mut region = MappedRegion::open(&path, bytes).unwrap();
        runner.write_pass(&mut region).unwrap();

        // Corrupt the very first word; every later word must still match.
        let first = region.words()[0];
        region.words_mut()[0] = !first;

        let mismatches = runner.verify_pass(&region).unwrap();

        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].offset, 0);
    }

    #[test]
    fn every_corrupt_word_is_reported_and_the_pass_completes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let bytes = 2 * page_size() as u64;
        let mut sink = Vec::new();
        {
            let mut runner = SoakRunner::with_byte_size(&path, bytes, &mut sink);

            let mut region = MappedRegion::open(&path, bytes).unwrap();
            runner.write_pass(&mut region).unwrap();

            let corrupt_indices = [3usize, 99, 200, 511];
            for &index in &corrupt_indices {
                region.words_mut()[index] ^= 0xFF00;
            }

            let mismatches = runner.verify_pass(&region).unwrap();

            assert_eq!(mismatches.len(), corrupt_indices.len());
            for (mismatch, &index) in mismatches.iter().zip(&corrupt_indices) {
                assert_eq!(mismatch.offset, index * WORD_SIZE);
            }
            // The full pass still ran: every byte was read.
            assert_eq!(runner.stats().bytes_read(), bytes);
        }

        let lines = sink_lines(&sink);
        let mismatch_lines = lines
            .iter()
            .filter(|l| l.contains("Mismatch happened when"))
            .count();
        assert_eq!(mismatch_lines, 4);
        // Final bytes-read line prints even after mismatches.
        assert!(lines.last().unwrap().ends_with("bytes read."));
    }

    #[test]
    fn clean_rerun_after_corrupt_cycle_reports_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let bytes = page_size() as u64;
        let mut runner = SoakRunner::with_byte_size(&path, bytes, Vec::new());

        let mut region = MappedRegion::open(&path, bytes).unwrap();
        runner.write_pass(&mut region).unwrap();
        region.words_mut()[5] ^= 1;
        assert_eq!(runner.verify_pass(&region).unwrap().len(), 1);
        drop(region);

        // Next cycle reallocates and rewrites; the finding does not
        // carry over.
        let mismatches = runner.run_cycle().unwrap();
        assert_eq!(mismatches, 0);
    }
}

mod cleanup_tests {
    use super::*;

    #[test]
    fn backing_path_never_survives_a_cycle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let mut runner =
            SoakRunner::with_byte_size(&path, page_size() as u64, Vec::new());

        runner.run_cycle().unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn same_path_is_reusable_across_cycles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soak.bin");
        let mut runner =
            SoakRunner::with_byte_size(&path, page_size() as u64, Vec::new());

        for _ in 0..5 {
            runner.run_cycle().unwrap();
            assert!(!path.exists());
        }
    }
}
