//! The five placement policies and the seam they plug into.

mod best_fit;
mod first_fit;
mod free_list;
mod next_fit;
mod segregated;

use crate::arena::Arena;
use crate::block::BlockRef;
use crate::chain::Chain;
use crate::error::AllocError;

/// Which placement policy a heap session runs.
///
/// Picked once at construction; a session never changes policy. To move
/// to a different one, build a new [`crate::Heap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Scan the whole chain, take the first block that fits.
    FirstFit,
    /// Resume scanning wherever the previous search succeeded.
    NextFit,
    /// Scan the whole chain, take the tightest block that fits.
    BestFit,
    /// Search an explicit index of free blocks instead of the chain.
    FreeList,
    /// Five isolated chains, one per size class; no splitting, no merging.
    SegregatedList,
}

impl SearchMode {
    pub(crate) fn placement(self) -> Box<dyn Placement> {
        match self {
            SearchMode::FirstFit => Box::new(first_fit::FirstFit),
            SearchMode::NextFit => Box::new(next_fit::NextFit::new()),
            SearchMode::BestFit => Box::new(best_fit::BestFit),
            SearchMode::FreeList => Box::new(free_list::FreeList::new()),
            SearchMode::SegregatedList => Box::new(segregated::Segregated::new()),
        }
    }
}

/// The seam between the heap facade and a placement policy.
///
/// `find` is the search itself. The remaining hooks keep policy private
/// bookkeeping, the next-fit cursor, the explicit free list, and the
/// segregated buckets, in step with the chain surgery the facade performs.
pub(crate) trait Placement {
    fn mode(&self) -> SearchMode;

    /// Locates a free block able to hold `size` bytes, or decides the
    /// request cannot be served from the existing chains. Only the
    /// segregated policy can fail here, with `UnsupportedSizeClass`.
    fn find(
        &mut self,
        arena: &Arena,
        chain: &Chain,
        size: usize,
    ) -> Result<Option<BlockRef>, AllocError>;

    /// Links a freshly grown block into whichever chain owns it.
    fn append(&mut self, arena: &mut Arena, chain: &mut Chain, block: BlockRef) {
        chain.push(arena, block);
    }

    /// Whether found blocks may be split down to the requested size.
    fn splits(&self) -> bool {
        true
    }

    /// Whether freed blocks merge with a free successor.
    fn coalesces(&self) -> bool {
        true
    }

    /// A block was just marked free.
    fn note_freed(&mut self, _block: BlockRef) {}

    /// A split left this free remainder behind.
    fn note_remainder(&mut self, _block: BlockRef) {}

    /// Coalescing absorbed this block; forget any reference to it.
    fn note_absorbed(&mut self, _block: BlockRef) {}

    /// Chain heads to traverse, in reporting order.
    fn chain_heads(&self, chain: &Chain) -> Vec<BlockRef> {
        chain.start.into_iter().collect()
    }

    /// The resumption point of a cursor based search, where one exists.
    fn cursor(&self) -> Option<BlockRef> {
        None
    }

    /// Length of the explicit free list, where one exists.
    fn tracked_free_len(&self) -> Option<usize> {
        None
    }

    /// Drops all policy state at a session boundary.
    fn clear(&mut self) {}
}

/// First-fit over one chain: the building block the segregated policy
/// reuses bucket by bucket.
fn fit_in(arena: &Arena, chain: &Chain, size: usize) -> Option<BlockRef> {
    chain
        .iter(arena)
        .find(|block| !block.used(arena) && block.size(arena) >= size)
}
