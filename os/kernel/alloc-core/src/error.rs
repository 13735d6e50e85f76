//! Error types surfaced across the host/allocator boundary.

use thiserror::Error;

/// Failure returned by a [`crate::heap_source::HeapSource`] when it cannot
/// grant more memory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HeapSourceError {
    /// The host ran out of backing memory for the requested extension.
    #[error("heap source exhausted while requesting {requested} additional bytes")]
    Exhausted {
        /// Number of bytes that were requested and could not be granted.
        requested: usize,
    },
}

/// Failure returned by [`crate::heap::SegregatedHeap::init`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InitError {
    /// The first heap extension (prologue/epilogue setup) failed.
    #[error("failed to reserve the initial heap region: {0}")]
    InitialExtension(#[from] HeapSourceError),
}
