//! The host collaborator boundary.
//!
//! The segregated-list algorithm in this crate never talks to an OS, a
//! bootloader, or a static array directly. It only ever asks a
//! [`HeapSource`] for more bytes. Swapping the source — a static arena
//! during early boot, a demand-paged VMM region later, a `Vec<u8>` in a
//! host-side test — never touches [`crate::heap`], [`crate::free_list`], or
//! [`crate::coalesce`].

use crate::error::HeapSourceError;

/// Supplies the raw address space a [`crate::heap::SegregatedHeap`] manages.
///
/// Modeled after a classical `sbrk`: each call grows the managed region by
/// exactly `n_bytes` and returns a pointer to the first byte of the new
/// extension (i.e. the previous break). The region only ever grows; nothing
/// in this crate ever asks a `HeapSource` to shrink.
pub trait HeapSource {
    /// Grows the managed region by `n_bytes` and returns a pointer to the
    /// first byte of the new extension.
    ///
    /// # Errors
    /// Returns [`HeapSourceError::Exhausted`] if the host cannot grant the
    /// requested extension.
    fn sbrk(&mut self, n_bytes: usize) -> Result<*mut u8, HeapSourceError>;

    /// Returns the `[start, end)` bounds of the region granted so far.
    ///
    /// Both ends are only ever pushed outward by `sbrk`; `start` is fixed
    /// after the first successful call.
    fn bounds(&self) -> (*mut u8, *mut u8);
}
