//! The four-case coalescing state machine.
//!
//! A freed or newly-extended block may have a free neighbor on either side.
//! `coalesce` inspects the allocated bit of both address-order neighbors and
//! merges accordingly:
//!
//! | prev alloc | next alloc | action                        |
//! |------------|------------|--------------------------------|
//! | 1          | 1          | no merge, reinsert `bp` as-is  |
//! | 1          | 0          | merge with next                |
//! | 0          | 1          | merge with prev                |
//! | 0          | 0          | merge with both                |
//!
//! The prologue and epilogue sentinels are permanently allocated, so this
//! never needs a special case at either end of the heap: `bp.prev()` on the
//! first real block resolves to the prologue, which simply reports
//! allocated.

use crate::block::BlockPtr;
use crate::free_list::{self, Bins};

/// Merges `bp` with any free neighbors, reinserts the result into `bins`,
/// and returns a pointer to the (possibly larger) coalesced block.
pub(crate) fn coalesce(bins: &mut Bins, bp: BlockPtr) -> BlockPtr {
    let prev = bp.prev();
    let next = bp.next();

    match (prev.is_allocated(), next.is_allocated()) {
        (true, true) => {
            free_list::insert(bins, bp, bp.size());
            bp
        }
        (true, false) => {
            let merged = bp.size() + next.size();
            free_list::delete(bins, next);
            bp.set_tags(merged, false);
            free_list::insert(bins, bp, merged);
            bp
        }
        (false, true) => {
            let merged = prev.size() + bp.size();
            free_list::delete(bins, prev);
            prev.set_tags(merged, false);
            free_list::insert(bins, prev, merged);
            prev
        }
        (false, false) => {
            let merged = prev.size() + bp.size() + next.size();
            free_list::delete(bins, prev);
            free_list::delete(bins, next);
            prev.set_tags(merged, false);
            free_list::insert(bins, prev, merged);
            prev
        }
    }
}
