//! # Size Constants
//!
//! ```text
//! WORD_SIZE (8 bytes)
//!       │
//!       ├─> pattern generator output width (u64 per call)
//!       │
//!       └─> region stride: write and verify passes advance one word
//!           at a time, so a region length that is a multiple of the
//!           page size is automatically a multiple of WORD_SIZE
//!
//! BYTES_PER_GIB (1 << 30)
//!       │
//!       └─> CLI size argument unit; converted once at runner
//!           construction, never re-derived per cycle
//!
//! FALLBACK_PAGE_SIZE (4096)
//!       │
//!       └─> used only when sysconf(_SC_PAGESIZE) fails; every common
//!           platform page size is a multiple of this value
//! ```

/// Width of one pattern word. The generator emits `u64` values and the
/// region is striped in the same unit.
pub const WORD_SIZE: usize = std::mem::size_of::<u64>();

/// Multiplier from the CLI's whole-gibibyte size argument to bytes.
pub const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

/// Page size assumed when the runtime query is unavailable.
/// MUST be a power of two and a multiple of WORD_SIZE.
pub const FALLBACK_PAGE_SIZE: usize = 4096;

const _: () = assert!(FALLBACK_PAGE_SIZE % WORD_SIZE == 0);
const _: () = assert!(FALLBACK_PAGE_SIZE.is_power_of_two());
