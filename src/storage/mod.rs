//! # Storage Module
//!
//! This module provides the mapped storage region the soak loop writes
//! and verifies: a page-aligned byte range backed by a file that is
//! unlinked the moment it has been opened, so the storage lives exactly
//! as long as the process holds the descriptor.
//!
//! ## Why Direct I/O
//!
//! The backing file is opened with `O_DIRECT` where the filesystem
//! allows it, so the bytes under test transit the storage medium and the
//! mapping layer rather than being served back out of an unrelated cache
//! tier, which would mask real corruption.
//!
//! ## Safety Model
//!
//! The region hands out `&[u64]` / `&mut [u64]` views of the mapping.
//! The unsafe pointer casts behind those views are confined to
//! [`region`]; everything above this module works with ordinary
//! bounds-checked slices, and the borrow checker keeps reads and writes
//! from overlapping a remap (there is none: a region is mapped once and
//! never grows).
//!
//! ## Module Organization
//!
//! - [`region`]: `MappedRegion`, the open/flush/view/drop lifecycle

pub mod region;

pub use region::MappedRegion;

use crate::config::FALLBACK_PAGE_SIZE;

/// System page size, used to round region lengths down to a page
/// multiple. Falls back to [`FALLBACK_PAGE_SIZE`] if the query fails.
#[cfg(unix)]
pub fn page_size() -> usize {
    // SAFETY: sysconf reads a static configuration value and touches no
    // caller-owned memory.
    let raw = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if raw <= 0 {
        FALLBACK_PAGE_SIZE
    } else {
        raw as usize
    }
}

#[cfg(not(unix))]
pub fn page_size() -> usize {
    FALLBACK_PAGE_SIZE
}
