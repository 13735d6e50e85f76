//! # Segregated-list heap allocator
//!
//! A general-purpose dynamic memory allocator built around boundary-tagged
//! blocks and segregated, size-class free lists — the same family of
//! algorithm as a textbook `malloc`/`free`/`realloc` implementation, wired
//! up so it can back a kernel's `#[global_allocator]` or run standalone
//! against any [`HeapSource`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              Allocator (GlobalAlloc)                │
//! │    • Layout <-> size/align translation               │
//! │    • SpinLock-serialized access                     │
//! └─────────────────┬───────────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────────┐
//! │         SegregatedHeap<H: HeapSource>                │
//! │    • allocate / free / reallocate                   │
//! │    • find_fit (placement) + coalesce                │
//! │    • 20 size-class free lists                        │
//! └─────────────────┬───────────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────────┐
//! │                   HeapSource                         │
//! │    • sbrk-style region growth                        │
//! │    • static arena, host `Vec`, or a real VMM region  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Block layout
//!
//! Every block — free or allocated — is bracketed by a one-word header and
//! a matching one-word footer, each packing the block's total size with the
//! allocated bit into the low bits alignment guarantees are zero:
//!
//! ```text
//! [header:4][ ... payload ... ][footer:4]
//! ```
//!
//! A free block additionally overlays a predecessor/successor pointer pair
//! on its payload — see [`free_list`] — which is safe precisely because
//! nothing else is using that payload while the block is free.
//!
//! ## Core components
//!
//! * [`block`] — boundary-tag encode/decode and address-order navigation.
//! * [`size_class`] — maps a block size to one of [`config::NUM_BINS`] bins.
//! * [`free_list`] — the segregated, ascending-size-ordered free lists.
//! * [`coalesce`] — the four-case coalescing state machine.
//! * [`placement`] — first-fit search and block splitting.
//! * [`heap`] — prologue/epilogue bootstrap and `sbrk`-style growth.
//! * [`front_end`] — `allocate`/`free`/`reallocate` on [`heap::SegregatedHeap`].
//! * [`heap_source`] — the [`HeapSource`] trait abstracting the backing store.
//! * [`static_heap`] — a `HeapSource` over a fixed, link-time-reserved arena.
//! * [`global_alloc`] — the `#[global_allocator]` adapter.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use alloc_core::{HeapSource, SegregatedHeap};
//!
//! fn bootstrap<H: HeapSource>(source: H) {
//!     let mut heap = SegregatedHeap::new(source);
//!     heap.init().expect("initial heap extension failed");
//!
//!     let ptr = heap.allocate(64);
//!     heap.free(ptr);
//! }
//! ```
//!
//! A kernel embedding instead reaches for [`Allocator`], which adds a
//! `SpinLock` and a `GlobalAlloc` impl around the same [`SegregatedHeap`],
//! with [`StaticArenaHeapSource::claim`] supplying the backing region.
//!
//! ## Non-goals
//!
//! This crate manages exactly one heap per [`HeapSource`] instance and does
//! not itself provide thread-local caches, a garbage collector, or a way to
//! return memory to the host once granted. Concurrency, where it's needed,
//! is bolted on at the [`global_alloc::Allocator`] layer via
//! `alloc_sync::SpinLock`, not inside the algorithm.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod block;
mod coalesce;
pub mod config;
mod error;
mod free_list;
mod front_end;
mod global_alloc;
mod heap;
mod heap_source;
mod placement;
mod size_class;
mod static_heap;

pub use error::{HeapSourceError, InitError};
pub use global_alloc::Allocator;
pub use heap::{HeapStats, SegregatedHeap};
pub use heap_source::HeapSource;
pub use static_heap::StaticArenaHeapSource;
