use super::{Placement, SearchMode};
use crate::arena::Arena;
use crate::block::BlockRef;
use crate::chain::Chain;
use crate::error::AllocError;

/// Searches an explicit index of free blocks in insertion order instead
/// of walking the whole chain.
///
/// The list is a weak index into the chain, never an owner. Hits are
/// removed before the facade touches the block; freed blocks and split
/// remainders are appended; blocks absorbed by coalescing are dropped so
/// the index never dangles.
pub(crate) struct FreeList {
    free: Vec<BlockRef>,
}

impl FreeList {
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }
}

impl Placement for FreeList {
    fn mode(&self) -> SearchMode {
        SearchMode::FreeList
    }

    fn find(
        &mut self,
        arena: &Arena,
        _chain: &Chain,
        size: usize,
    ) -> Result<Option<BlockRef>, AllocError> {
        let hit = self.free.iter().position(|block| block.size(arena) >= size);

        Ok(hit.map(|index| self.free.remove(index)))
    }

    fn note_freed(&mut self, block: BlockRef) {
        self.free.push(block);
    }

    fn note_remainder(&mut self, block: BlockRef) {
        self.free.push(block);
    }

    fn note_absorbed(&mut self, block: BlockRef) {
        self.free.retain(|tracked| *tracked != block);
    }

    fn tracked_free_len(&self) -> Option<usize> {
        Some(self.free.len())
    }

    fn clear(&mut self) {
        self.free.clear();
    }
}
