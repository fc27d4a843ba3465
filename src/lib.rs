//! A user-space heap simulator for exploring placement policies.
//!
//! A [`Heap`] manages one contiguous, growable region the way a classic
//! `sbrk` allocator manages the program break: every allocation is a
//! header plus payload, freed blocks are found again by a placement
//! search, adjacent free neighbors merge, and oversized blocks split.
//! The region is an indexable byte arena and block links are offsets into
//! it, so the whole thing is safe to poke at and byte-for-byte
//! reproducible across runs.
//!
//! Five placement policies cover the classic design space, chosen once
//! per session with [`SearchMode`]:
//!
//! - first-fit: scan from the start, take the first block that fits
//! - next-fit: resume scanning where the last search succeeded
//! - best-fit: full scan, take the tightest block that fits
//! - explicit free-list: search an index of free blocks, not the chain
//! - segregated-list: five isolated chains, one per size class
//!
//! ```rust
//! use mound::{Heap, SearchMode};
//!
//! let mut heap = Heap::new(SearchMode::BestFit);
//!
//! let a = heap.alloc(64).unwrap();
//! let b = heap.alloc(16).unwrap();
//!
//! heap.free(a).unwrap();
//! heap.free(b).unwrap();
//!
//! // best-fit prefers the tightest candidate: the 16 byte block wins
//! // over the 64 byte one even though both are free
//! let c = heap.alloc(16).unwrap();
//! assert_eq!(c, b);
//! ```
//!
//! A session is single threaded by construction: every mutating operation
//! takes `&mut self`, and nothing inside the crate locks, spawns, or
//! blocks. Memory returns to the backing store only through
//! [`Heap::reset`], which rolls the whole session back at once.

mod arena;
mod block;
mod chain;
mod config;
mod constants;
mod error;
mod heap;
mod metrics;
mod policy;

pub use block::{BlockInfo, Handle};
pub use config::{HeapConfig, HEAP_CONFIG_DEFAULT_LIMIT};
pub use constants::{align, BUCKET_COUNT, HEADER_SIZE, MAX_BUCKET_SIZE, WORD};
pub use error::AllocError;
pub use heap::{Blocks, Heap};
pub use metrics::HeapMetrics;
pub use policy::SearchMode;
