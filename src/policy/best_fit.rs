use super::{Placement, SearchMode};
use crate::arena::Arena;
use crate::block::BlockRef;
use crate::chain::Chain;
use crate::error::AllocError;

/// Scans the whole chain and takes the tightest adequate block, leaving
/// the least slack per allocation. Ties go to the first block found.
pub(crate) struct BestFit;

impl Placement for BestFit {
    fn mode(&self) -> SearchMode {
        SearchMode::BestFit
    }

    fn find(
        &mut self,
        arena: &Arena,
        chain: &Chain,
        size: usize,
    ) -> Result<Option<BlockRef>, AllocError> {
        let mut best: Option<BlockRef> = None;

        for block in chain.iter(arena) {
            if block.used(arena) || block.size(arena) < size {
                continue;
            }

            match best {
                Some(found) if block.size(arena) >= found.size(arena) => {}
                _ => best = Some(block),
            }
        }

        Ok(best)
    }
}
