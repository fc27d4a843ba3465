use super::{fit_in, Placement, SearchMode};
use crate::arena::Arena;
use crate::block::BlockRef;
use crate::chain::Chain;
use crate::error::AllocError;

/// Takes the first adequate free block, scanning from the start of the
/// chain every time. Cheap to reason about; fragmentation collects near
/// the front.
pub(crate) struct FirstFit;

impl Placement for FirstFit {
    fn mode(&self) -> SearchMode {
        SearchMode::FirstFit
    }

    fn find(
        &mut self,
        arena: &Arena,
        chain: &Chain,
        size: usize,
    ) -> Result<Option<BlockRef>, AllocError> {
        Ok(fit_in(arena, chain, size))
    }
}
