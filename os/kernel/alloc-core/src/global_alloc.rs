//! `#[global_allocator]` adapter.
//!
//! Wraps a [`SegregatedHeap`] in an [`alloc_sync::SpinLock`] and exposes
//! [`GlobalAlloc`] so the crate can be dropped in as the process-wide
//! allocator. `Layout`s requesting an alignment greater than
//! [`crate::config::ALIGNMENT`] are rejected by returning a null pointer —
//! the segregated-list algorithm only ever guarantees 8-byte alignment, and
//! a null return is exactly the failure contract `GlobalAlloc` callers
//! already handle.

use crate::config::ALIGNMENT;
use crate::error::InitError;
use crate::heap::{HeapStats, SegregatedHeap};
use crate::heap_source::HeapSource;
use alloc_sync::SpinLock;
use core::alloc::{GlobalAlloc, Layout};

/// A [`GlobalAlloc`] implementation backed by a segregated-list heap.
pub struct Allocator<H: HeapSource> {
    inner: SpinLock<SegregatedHeap<H>>,
}

impl<H: HeapSource> Allocator<H> {
    /// Wraps `source` in an uninitialized allocator. Call [`Self::init`]
    /// before the first allocation.
    pub const fn new(source: H) -> Self {
        Self {
            inner: SpinLock::new(SegregatedHeap::new(source)),
        }
    }

    /// Lays down the prologue/epilogue sentinels and performs the first
    /// heap extension.
    ///
    /// # Errors
    /// Returns [`InitError`] if the backing [`HeapSource`] cannot grant the
    /// initial region.
    pub fn init(&self) -> Result<(), InitError> {
        self.inner.with_lock(SegregatedHeap::init)
    }

    /// Returns a snapshot of current heap usage.
    pub fn stats(&self) -> HeapStats {
        self.inner.with_lock(SegregatedHeap::stats)
    }
}

// Safety: all access to the wrapped heap goes through `SpinLock::with_lock`,
// which serializes callers; `GlobalAlloc`'s own safety obligations (pointer
// provenance, matching layouts) fall on the caller of `alloc`/`dealloc`.
unsafe impl<H: HeapSource> GlobalAlloc for Allocator<H> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if layout.align() > ALIGNMENT {
            return core::ptr::null_mut();
        }
        self.inner.with_lock(|heap| heap.allocate(layout.size()))
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        self.inner.with_lock(|heap| heap.free(ptr));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if layout.align() > ALIGNMENT {
            return core::ptr::null_mut();
        }
        self.inner.with_lock(|heap| heap.reallocate(ptr, new_size))
    }
}
