//! Segregated, ascending-size-ordered, doubly-linked free lists.
//!
//! Each of the [`crate::config::NUM_BINS`] bins is a free list in its own
//! right; [`crate::size_class::list_index`] decides which bin a block
//! belongs to. Within a bin, blocks are kept sorted from smallest to
//! largest so [`crate::placement::find_fit`] can stop at the first block
//! that is big enough rather than scanning the whole bin.
//!
//! The predecessor/successor pointers live *inside* the block's payload —
//! a block can only be on a free list while nothing else needs its
//! payload, which is exactly the allocator's invariant for free blocks.

use crate::block::BlockPtr;
use crate::config::NUM_BINS;
use crate::size_class::list_index;
use core::ptr;

/// The `NUM_BINS` free-list heads, one per size class.
pub(crate) type Bins = [Option<BlockPtr>; NUM_BINS];

pub(crate) const EMPTY_BINS: Bins = [None; NUM_BINS];

#[repr(C)]
struct Node {
    pred: *mut u8,
    succ: *mut u8,
}

#[inline]
fn node_ptr(bp: BlockPtr) -> *mut Node {
    bp.as_ptr().cast()
}

fn pred(bp: BlockPtr) -> Option<BlockPtr> {
    let raw = unsafe { (*node_ptr(bp)).pred };
    core::ptr::NonNull::new(raw).map(|p| unsafe { BlockPtr::from_nonnull(p) })
}

fn succ(bp: BlockPtr) -> Option<BlockPtr> {
    let raw = unsafe { (*node_ptr(bp)).succ };
    core::ptr::NonNull::new(raw).map(|p| unsafe { BlockPtr::from_nonnull(p) })
}

fn set_pred(bp: BlockPtr, value: Option<BlockPtr>) {
    let raw = value.map_or(ptr::null_mut(), BlockPtr::as_ptr);
    unsafe { (*node_ptr(bp)).pred = raw };
}

fn set_succ(bp: BlockPtr, value: Option<BlockPtr>) {
    let raw = value.map_or(ptr::null_mut(), BlockPtr::as_ptr);
    unsafe { (*node_ptr(bp)).succ = raw };
}

/// Inserts `bp` (whose tags already report `size` and free) into its bin,
/// keeping the bin sorted in ascending size order.
pub(crate) fn insert(bins: &mut Bins, bp: BlockPtr, size: usize) {
    let idx = list_index(size);

    let mut after: Option<BlockPtr> = None;
    let mut before = bins[idx];
    while let Some(candidate) = before {
        if candidate.size() < size {
            after = Some(candidate);
            before = succ(candidate);
        } else {
            break;
        }
    }

    set_pred(bp, after);
    set_succ(bp, before);

    if let Some(b) = before {
        set_pred(b, Some(bp));
    }
    match after {
        Some(a) => set_succ(a, Some(bp)),
        None => bins[idx] = Some(bp),
    }
}

/// Removes `bp` from whichever bin it currently lives in.
pub(crate) fn delete(bins: &mut Bins, bp: BlockPtr) {
    let idx = list_index(bp.size());
    let before = pred(bp);
    let after = succ(bp);

    match before {
        Some(b) => set_succ(b, after),
        None => bins[idx] = after,
    }
    if let Some(a) = after {
        set_pred(a, before);
    }
}

/// Returns the head of bin `idx`, or `None` if it is empty.
pub(crate) fn head(bins: &Bins, idx: usize) -> Option<BlockPtr> {
    bins[idx]
}

/// Returns the block following `bp` within its own bin.
pub(crate) fn next_in_bin(bp: BlockPtr) -> Option<BlockPtr> {
    succ(bp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_BLOCK_SIZE;

    /// A small host-backed arena so these tests can build real, addressable
    /// blocks without going through a `HeapSource`.
    struct Arena {
        buf: Vec<u8>,
    }

    impl Arena {
        fn new(len: usize) -> Self {
            Self {
                buf: vec![0u8; len],
            }
        }

        /// Carves out a free block of `size` bytes at `offset` and returns
        /// its payload pointer.
        fn block_at(&mut self, offset: usize, size: usize) -> BlockPtr {
            let header_addr = unsafe { self.buf.as_mut_ptr().add(offset) };
            let payload = unsafe { header_addr.add(4) };
            let bp = unsafe { BlockPtr::new(payload) };
            bp.set_tags(size, false);
            bp
        }
    }

    #[test]
    fn insert_keeps_ascending_order_within_a_bin() {
        let mut arena = Arena::new(1024);
        let mut bins = EMPTY_BINS;

        // All three land in the same bin (sizes 24, 32, 40 all have the
        // same floor(log2) bin once MIN_BLOCK_SIZE-and-up sizes are used).
        let small = arena.block_at(0, MIN_BLOCK_SIZE);
        let medium = arena.block_at(32, MIN_BLOCK_SIZE + 8);
        let large = arena.block_at(72, MIN_BLOCK_SIZE + 16);

        insert(&mut bins, medium, medium.size());
        insert(&mut bins, large, large.size());
        insert(&mut bins, small, small.size());

        let idx = list_index(MIN_BLOCK_SIZE);
        let mut sizes = Vec::new();
        let mut cur = head(&bins, idx);
        while let Some(bp) = cur {
            sizes.push(bp.size());
            cur = next_in_bin(bp);
        }
        assert_eq!(sizes, vec![small.size(), medium.size(), large.size()]);
    }

    #[test]
    fn delete_splices_around_the_removed_node() {
        let mut arena = Arena::new(1024);
        let mut bins = EMPTY_BINS;

        let a = arena.block_at(0, MIN_BLOCK_SIZE);
        let b = arena.block_at(32, MIN_BLOCK_SIZE);
        let c = arena.block_at(64, MIN_BLOCK_SIZE);
        insert(&mut bins, a, a.size());
        insert(&mut bins, b, b.size());
        insert(&mut bins, c, c.size());

        delete(&mut bins, b);

        let idx = list_index(MIN_BLOCK_SIZE);
        let mut cur = head(&bins, idx);
        let mut seen = Vec::new();
        while let Some(bp) = cur {
            seen.push(bp.as_ptr());
            cur = next_in_bin(bp);
        }
        assert_eq!(seen, vec![a.as_ptr(), c.as_ptr()]);
    }

    #[test]
    fn deleting_the_only_node_empties_the_bin() {
        let mut arena = Arena::new(256);
        let mut bins = EMPTY_BINS;
        let a = arena.block_at(0, MIN_BLOCK_SIZE);
        insert(&mut bins, a, a.size());
        delete(&mut bins, a);
        assert!(head(&bins, list_index(MIN_BLOCK_SIZE)).is_none());
    }
}
