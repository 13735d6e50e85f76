//! Heap bootstrap and growth.
//!
//! The managed region is always laid out as:
//!
//! ```text
//! [pad:4][prologue hdr:4][prologue ftr:4][ ...blocks... ][epilogue hdr:4]
//! ```
//!
//! The prologue and epilogue are permanently-allocated, zero-payload
//! blocks. They exist purely so every real block has an address-order
//! neighbor to test during coalescing — no special case is needed at
//! either end of the heap.

use crate::block;
use crate::config::{CHUNK_SIZE, DWORD_SIZE, WORD_SIZE, align_up};
use crate::coalesce;
use crate::error::{HeapSourceError, InitError};
use crate::free_list::{Bins, EMPTY_BINS};
use crate::heap_source::HeapSource;
use crate::block::BlockPtr;

/// A segregated-list heap growing on top of a [`HeapSource`].
///
/// Exposes a plain `&mut self` API: nothing here is thread-safe on its own,
/// which keeps the algorithm itself simple to construct and exercise in
/// tests. Concurrent embeddings serialize access from the outside — see
/// [`crate::global_alloc::Allocator`].
pub struct SegregatedHeap<H: HeapSource> {
    pub(crate) bins: Bins,
    source: H,
    heap_bytes: usize,
    allocated_bytes: usize,
    initialized: bool,
}

/// A point-in-time snapshot of heap usage.
///
/// Purely observational: nothing in this crate consults a `HeapStats` value
/// to make allocation decisions, so collecting one never perturbs the
/// allocator's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    /// Total bytes granted by the [`HeapSource`] so far, sentinels included.
    pub heap_bytes: usize,
    /// Bytes currently reachable from live allocations (header, footer, and
    /// payload together).
    pub allocated_bytes: usize,
}

impl<H: HeapSource> SegregatedHeap<H> {
    /// Wraps `source` in an uninitialized heap. Call [`Self::init`] before
    /// the first allocation.
    pub const fn new(source: H) -> Self {
        Self {
            bins: EMPTY_BINS,
            source,
            heap_bytes: 0,
            allocated_bytes: 0,
            initialized: false,
        }
    }

    /// Whether [`Self::init`] has already run successfully.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Lays down the prologue/epilogue sentinels and seeds the heap with one
    /// [`CHUNK_SIZE`]-sized extension.
    ///
    /// # Errors
    /// Returns [`InitError`] if the [`HeapSource`] cannot grant the initial
    /// region.
    pub fn init(&mut self) -> Result<(), InitError> {
        let setup_bytes = 4 * WORD_SIZE;
        let base = self.source.sbrk(setup_bytes).inspect_err(|err| {
            log::warn!("heap initialization failed: {err}");
        })?;
        unsafe {
            block::write_word(base, 0);
            block::write_word(base.add(WORD_SIZE), block::pack_tag(DWORD_SIZE, true));
            block::write_word(base.add(2 * WORD_SIZE), block::pack_tag(DWORD_SIZE, true));
            block::write_word(base.add(3 * WORD_SIZE), block::pack_tag(0, true));
        }
        self.heap_bytes = setup_bytes;

        if let Err(err) = self.extend_heap(CHUNK_SIZE / WORD_SIZE) {
            log::warn!("heap initialization failed: {err}");
            return Err(err.into());
        }
        self.initialized = true;
        log::trace!("heap initialized with {} bytes", self.heap_bytes);
        Ok(())
    }

    /// Grows the heap by at least `words` words (rounded up to a whole
    /// double word), installs a fresh epilogue past the new region, and
    /// coalesces the new free block with whatever free space preceded it.
    ///
    /// Returns the (possibly coalesced) free block so a caller looking for
    /// more room can place an allocation into it directly.
    pub(crate) fn extend_heap(&mut self, words: usize) -> Result<BlockPtr, HeapSourceError> {
        let size = align_up(words * WORD_SIZE);
        let base = self.source.sbrk(size)?;
        let bp = unsafe { BlockPtr::new(base) };
        bp.set_tags(size, false);

        let new_epilogue = unsafe { base.add(size - WORD_SIZE) };
        unsafe { block::write_word(new_epilogue, block::pack_tag(0, true)) };
        self.heap_bytes += size;
        log::debug!("extended heap by {size} bytes, {} total", self.heap_bytes);

        Ok(coalesce::coalesce(&mut self.bins, bp))
    }

    pub(crate) fn add_allocated(&mut self, delta: isize) {
        self.allocated_bytes = self.allocated_bytes.saturating_add_signed(delta);
    }

    /// Returns a snapshot of current heap usage.
    ///
    /// Cross-checks `heap_bytes` against [`HeapSource::bounds`] in debug
    /// builds: the span the source reports having granted must always equal
    /// the running total this heap has requested from it (invariant I4).
    pub fn stats(&self) -> HeapStats {
        let (start, end) = self.source.bounds();
        debug_assert_eq!(
            end as usize - start as usize,
            self.heap_bytes,
            "HeapSource::bounds span disagrees with bytes granted so far"
        );
        HeapStats {
            heap_bytes: self.heap_bytes,
            allocated_bytes: self.allocated_bytes,
        }
    }
}
