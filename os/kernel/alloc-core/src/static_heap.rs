//! A [`HeapSource`] backed by a fixed-size static array.
//!
//! Suitable for early boot, before a virtual memory manager exists: the
//! whole region is reserved in `.bss` at link time and handed out by
//! bumping a cursor — `sbrk` against a preallocated arena rather than
//! against the OS.

use crate::error::HeapSourceError;
use crate::heap_source::HeapSource;
use core::sync::atomic::{AtomicBool, Ordering};

/// Total size of the statically reserved heap.
const HEAP_SIZE: usize = 64 * 1024 * 1024; // 64 MiB

/// Heap storage with a minimum alignment suitable for headers and common types.
#[repr(align(16))]
struct HeapMem([u8; HEAP_SIZE]);

/// Backing storage for the arena, placed in a dedicated `.bss` section.
#[unsafe(link_section = ".bss.heap")]
static mut HEAP: HeapMem = HeapMem([0; HEAP_SIZE]);

/// Guards against claiming the static arena more than once.
static TAKEN: AtomicBool = AtomicBool::new(false);

/// A [`HeapSource`] that bump-allocates out of a single static array.
///
/// Only one instance can ever exist: [`Self::claim`] panics on a second
/// call, since a second instance would hand out memory already owned by
/// the first.
pub struct StaticArenaHeapSource {
    start: *mut u8,
    cursor: usize,
}

// Safety: the arena is a fixed, process-wide region; `StaticArenaHeapSource`
// itself holds no thread-local state beyond a bump cursor, and callers are
// expected to serialize access the same way any `HeapSource` embedding does.
unsafe impl Send for StaticArenaHeapSource {}

impl StaticArenaHeapSource {
    /// Claims the static arena.
    ///
    /// # Panics
    /// Panics if called more than once over the life of the program.
    pub fn claim() -> Self {
        assert!(
            !TAKEN.swap(true, Ordering::AcqRel),
            "static heap arena already claimed"
        );
        let start = unsafe { (&raw mut HEAP.0).cast::<u8>() };
        Self { start, cursor: 0 }
    }
}

impl HeapSource for StaticArenaHeapSource {
    fn sbrk(&mut self, n_bytes: usize) -> Result<*mut u8, HeapSourceError> {
        let new_cursor = self
            .cursor
            .checked_add(n_bytes)
            .filter(|&c| c <= HEAP_SIZE)
            .ok_or(HeapSourceError::Exhausted {
                requested: n_bytes,
            })?;
        let ptr = unsafe { self.start.add(self.cursor) };
        self.cursor = new_cursor;
        Ok(ptr)
    }

    fn bounds(&self) -> (*mut u8, *mut u8) {
        (self.start, unsafe { self.start.add(self.cursor) })
    }
}
