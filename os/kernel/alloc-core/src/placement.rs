//! First-fit placement with splitting.

use crate::block::BlockPtr;
use crate::config::{MIN_BLOCK_SIZE, NUM_BINS};
use crate::free_list::{self, Bins};
use crate::size_class::list_index;

/// Finds the first free block of at least `asize` bytes.
///
/// Scans bins from the smallest one that could possibly hold `asize`
/// upward; within a bin, blocks are already in ascending size order, so the
/// first candidate big enough is taken.
pub(crate) fn find_fit(bins: &Bins, asize: usize) -> Option<BlockPtr> {
    for idx in list_index(asize)..NUM_BINS {
        let mut cur = free_list::head(bins, idx);
        while let Some(bp) = cur {
            if bp.size() >= asize {
                return Some(bp);
            }
            cur = free_list::next_in_bin(bp);
        }
    }
    None
}

/// Removes `bp` from its free list and allocates `asize` bytes of it.
///
/// If the leftover is large enough to stand on its own as a block, it is
/// split off, tagged free, and reinserted; otherwise the whole block is
/// handed out, growing the payload by the would-be leftover.
pub(crate) fn place(bins: &mut Bins, bp: BlockPtr, asize: usize) {
    free_list::delete(bins, bp);
    let csize = bp.size();
    let remainder = csize - asize;

    if remainder >= MIN_BLOCK_SIZE {
        bp.set_tags(asize, true);
        let tail = bp.next();
        tail.set_tags(remainder, false);
        free_list::insert(bins, tail, remainder);
    } else {
        bp.set_tags(csize, true);
    }
}
