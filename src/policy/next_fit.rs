use super::{Placement, SearchMode};
use crate::arena::Arena;
use crate::block::BlockRef;
use crate::chain::Chain;
use crate::error::AllocError;

/// Resumes scanning wherever the previous allocation succeeded, wrapping
/// around the chain at most once. Keeps the locality that first-fit gives
/// up by always restarting from the front.
pub(crate) struct NextFit {
    cursor: Option<BlockRef>,
}

impl NextFit {
    pub fn new() -> Self {
        Self { cursor: None }
    }
}

impl Placement for NextFit {
    fn mode(&self) -> SearchMode {
        SearchMode::NextFit
    }

    fn find(
        &mut self,
        arena: &Arena,
        chain: &Chain,
        size: usize,
    ) -> Result<Option<BlockRef>, AllocError> {
        let Some(start) = self.cursor.or(chain.start) else {
            return Ok(None);
        };

        let mut block = start;
        loop {
            if !block.used(arena) && block.size(arena) >= size {
                self.cursor = Some(block);
                return Ok(Some(block));
            }

            block = match block.next(arena) {
                Some(next) => next,
                None => match chain.start {
                    Some(head) => head,
                    None => return Ok(None),
                },
            };

            // did the full circle without finding; the cursor stays put
            if block == start {
                return Ok(None);
            }
        }
    }

    fn note_absorbed(&mut self, block: BlockRef) {
        // a merged-away block cannot anchor the next scan
        if self.cursor == Some(block) {
            self.cursor = None;
        }
    }

    fn cursor(&self) -> Option<BlockRef> {
        self.cursor
    }

    fn clear(&mut self) {
        self.cursor = None;
    }
}
