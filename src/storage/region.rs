//! # Mapped Storage Region
//!
//! This module implements `MappedRegion`, the byte range the soak loop
//! exercises. A region is constructed from a path and a requested size,
//! and owns three things for its lifetime: the backing `File`, the
//! shared read/write mapping over it, and the rounded length.
//!
//! ## Anonymous-After-Creation Semantics
//!
//! The backing path is unlinked immediately after the file is opened.
//! From that point the inode is reachable only through the held
//! descriptor: the kernel reclaims it when the process exits, cleanly or
//! not, and successive runs can reuse the same path without colliding
//! with a leftover file. An unlink failure is reported but does not fail
//! construction; it degrades cleanup, not the test itself.
//!
//! ## Length Rounding
//!
//! The requested size is rounded down to the nearest page-size multiple
//! before the file is extended and mapped. A request smaller than one
//! page rounds to zero and produces a degenerate region with no mapping
//! at all; callers iterate its empty word view zero times.
//!
//! ## Error Handling
//!
//! Open, resize, and map failures return `eyre::Result` with the path
//! and operation in context. A constructed region is always usable;
//! there is no separate validity flag to check.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use eyre::{Result, WrapErr};
use memmap2::MmapMut;

use crate::config::WORD_SIZE;

use super::page_size;

#[derive(Debug)]
pub struct MappedRegion {
    // Field order is load-bearing: drop runs in declaration order, and
    // the mapping must be torn down before the descriptor it references
    // is closed.
    mmap: Option<MmapMut>,
    // Held only to keep the unlinked inode alive for the region's
    // lifetime.
    _file: File,
    len: usize,
}

impl MappedRegion {
    /// Opens a region of `requested_bytes` rounded down to a page-size
    /// multiple, backed by a freshly created and immediately unlinked
    /// file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, requested_bytes: u64) -> Result<Self> {
        let path = path.as_ref();

        let page = page_size() as u64;
        let len = (requested_bytes - requested_bytes % page) as usize;

        let file = open_backing_file(path)
            .wrap_err_with(|| format!("failed to open backing file '{}'", path.display()))?;

        // The name was only needed to reach the inode. Dropping it now
        // means the storage disappears with the descriptor, even if the
        // process is killed mid-cycle.
        if let Err(e) = fs::remove_file(path) {
            eprintln!("Couldn't unlink '{}': {}", path.display(), e);
        }

        file.set_len(len as u64).wrap_err_with(|| {
            format!("failed to extend '{}' to {} bytes", path.display(), len)
        })?;

        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: MmapMut::map_mut is unsafe because externally
            // modified mappings lead to undefined behavior. This is safe
            // because:
            // 1. The path was unlinked above, so no other process can
            //    open this file by name.
            // 2. The file was just extended to exactly `len` bytes, so
            //    the mapping covers the whole file and nothing else.
            // 3. The mmap lifetime is tied to MappedRegion, preventing
            //    use-after-unmap.
            // 4. All access goes through words()/words_mut(), which
            //    derive their bounds from `len`.
            let map = unsafe {
                MmapMut::map_mut(&file)
                    .wrap_err_with(|| format!("failed to memory-map '{}'", path.display()))?
            };
            Some(map)
        };

        Ok(Self {
            mmap,
            _file: file,
            len,
        })
    }

    /// Rounded byte length. Always an exact multiple of the page size
    /// and at most the requested size.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The whole region as native-endian 64-bit words.
    pub fn words(&self) -> &[u64] {
        match &self.mmap {
            // SAFETY: Reinterpreting the mapped bytes as u64 is safe
            // because:
            // 1. The mapping is valid for `len` bytes for the lifetime
            //    of self, and the returned borrow cannot outlive self.
            // 2. mmap returns page-aligned addresses and the page size
            //    is a multiple of 8, so u64 alignment holds at offset 0.
            // 3. `len` is a page-size multiple, so len / WORD_SIZE words
            //    cover exactly `len` bytes with no tail.
            // 4. Every bit pattern is a valid u64.
            Some(m) => unsafe {
                std::slice::from_raw_parts(m.as_ptr().cast::<u64>(), self.len / WORD_SIZE)
            },
            None => &[],
        }
    }

    /// Mutable word view of the whole region.
    pub fn words_mut(&mut self) -> &mut [u64] {
        match &mut self.mmap {
            // SAFETY: Same justification as words(); &mut self
            // guarantees the mutable view is exclusive.
            Some(m) => unsafe {
                std::slice::from_raw_parts_mut(m.as_mut_ptr().cast::<u64>(), self.len / WORD_SIZE)
            },
            None => &mut [],
        }
    }

    /// Requests asynchronous write-back of all dirty pages toward the
    /// backing medium. Returning Ok means the request was accepted, not
    /// that the data has reached stable storage.
    pub fn flush_async(&self) -> Result<()> {
        match &self.mmap {
            Some(m) => m
                .flush_async()
                .wrap_err("failed to request mmap write-back"),
            None => Ok(()),
        }
    }
}

/// Create-or-open `path` read/write with owner-only permissions, using
/// `O_DIRECT` where the filesystem supports it.
fn open_backing_file(path: &Path) -> io::Result<File> {
    #[cfg(target_os = "linux")]
    {
        use std::os::unix::fs::OpenOptionsExt;

        let direct = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .mode(0o600)
            .custom_flags(libc::O_DIRECT)
            .open(path);
        match direct {
            Ok(file) => return Ok(file),
            // tmpfs and some network/overlay filesystems reject O_DIRECT
            // at open time; run against the page cache there instead of
            // failing.
            Err(e)
                if e.raw_os_error() == Some(libc::EINVAL)
                    || e.raw_os_error() == Some(libc::EOPNOTSUPP) => {}
            Err(e) => return Err(e),
        }
    }

    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    opts.open(path)
}
