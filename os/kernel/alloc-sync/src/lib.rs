//! # Allocator synchronization primitives
//!
//! A minimal spinlock used to guard the segregated-list heap state behind
//! `#[global_allocator]` and other multi-caller embeddings. The allocator's
//! own state machine is single-writer by construction (see `alloc-core`);
//! this lock only enforces that precondition at the call boundary.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod spin_lock;

pub use spin_lock::SpinLock;
