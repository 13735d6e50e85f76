//! Request-facing operations: `allocate`, `free`, `reallocate`.
//!
//! This module only decides block sizes and moves bytes around; the header
//! and footer writes it needs all go through [`crate::placement`] and
//! [`crate::coalesce`].

use crate::block::BlockPtr;
use crate::config::{CHUNK_SIZE, DWORD_SIZE, WORD_SIZE, align_up};
use crate::coalesce;
use crate::free_list;
use crate::heap::SegregatedHeap;
use crate::heap_source::HeapSource;
use crate::placement;
use core::ptr::NonNull;

impl<H: HeapSource> SegregatedHeap<H> {
    /// Rounds a caller-requested payload size up to the block size actually
    /// reserved for it: header, footer, 8-byte alignment, and the
    /// free-list node's own minimum.
    fn block_size_for(size: usize) -> usize {
        if size <= DWORD_SIZE {
            crate::config::MIN_BLOCK_SIZE
        } else {
            align_up(size + DWORD_SIZE)
        }
    }

    /// Allocates a block of at least `size` bytes.
    ///
    /// Returns a null pointer if `size` is zero or the heap cannot be grown
    /// any further.
    pub fn allocate(&mut self, size: usize) -> *mut u8 {
        if size == 0 {
            return core::ptr::null_mut();
        }
        debug_assert!(self.is_initialized(), "allocate called before init");

        let asize = Self::block_size_for(size);

        let bp = match placement::find_fit(&self.bins, asize) {
            Some(bp) => Some(bp),
            None => {
                let words = core::cmp::max(asize, CHUNK_SIZE) / WORD_SIZE;
                match self.extend_heap(words) {
                    Ok(bp) => Some(bp),
                    Err(err) => {
                        log::warn!("allocation of {size} bytes failed: {err}");
                        None
                    }
                }
            }
        };

        let Some(bp) = bp else {
            return core::ptr::null_mut();
        };

        placement::place(&mut self.bins, bp, asize);
        self.add_allocated(bp.size() as isize);
        bp.as_ptr()
    }

    /// Returns `ptr`'s block to the free lists, coalescing with free
    /// neighbors. A null pointer is a no-op.
    pub fn free(&mut self, ptr: *mut u8) {
        let Some(nn) = NonNull::new(ptr) else {
            return;
        };
        debug_assert!(self.is_initialized(), "free called before init");

        let bp = unsafe { BlockPtr::from_nonnull(nn) };
        let size = bp.size();
        bp.set_tags(size, false);
        self.add_allocated(-(size as isize));
        coalesce::coalesce(&mut self.bins, bp);
    }

    /// Resizes the allocation at `ptr` to `size` bytes.
    ///
    /// `ptr == null` behaves like `allocate`; `size == 0` behaves like
    /// `free` and returns null. Shrinking keeps the original block (and its
    /// surplus) as-is rather than splitting or copying. Growing first tries
    /// to absorb a free next-neighbor in place, falling back to
    /// allocate-copy-free only if that isn't possible.
    pub fn reallocate(&mut self, ptr: *mut u8, size: usize) -> *mut u8 {
        let Some(nn) = NonNull::new(ptr) else {
            return self.allocate(size);
        };
        if size == 0 {
            self.free(ptr);
            return core::ptr::null_mut();
        }

        let bp = unsafe { BlockPtr::from_nonnull(nn) };
        let old_size = bp.size();
        let new_size = Self::block_size_for(size);

        if new_size <= old_size {
            return ptr;
        }

        let next = bp.next();
        if !next.is_allocated() && old_size + next.size() >= new_size {
            let combined = old_size + next.size();
            free_list::delete(&mut self.bins, next);
            bp.set_tags(combined, true);
            self.add_allocated((combined - old_size) as isize);
            log::debug!("grew block in place from {old_size} to {combined} bytes");
            return ptr;
        }

        let new_ptr = self.allocate(size);
        if new_ptr.is_null() {
            return core::ptr::null_mut();
        }
        let copyable = core::cmp::min(size, old_size - DWORD_SIZE);
        unsafe { core::ptr::copy_nonoverlapping(ptr, new_ptr, copyable) };
        self.free(ptr);
        new_ptr
    }
}
