use super::{fit_in, Placement, SearchMode};
use crate::arena::Arena;
use crate::block::BlockRef;
use crate::chain::Chain;
use crate::constants::{BUCKET_COUNT, WORD};
use crate::error::AllocError;

/// Five isolated chains, one per word-multiple size class.
///
/// A request maps to exactly one bucket and is served from that bucket's
/// chain or by growing a fresh block onto it. Blocks never split, never
/// merge, and never migrate between buckets, so every block in bucket `k`
/// stays exactly `WORD * (k + 1)` bytes for the life of the session.
pub(crate) struct Segregated {
    buckets: [Chain; BUCKET_COUNT],
}

impl Segregated {
    pub fn new() -> Self {
        Self {
            buckets: [Chain::new(); BUCKET_COUNT],
        }
    }
}

/// Maps an aligned size onto its bucket, refusing sizes past the table
/// instead of indexing out of it.
fn bucket_for(size: usize) -> Result<usize, AllocError> {
    let bucket = size / WORD - 1;

    if bucket >= BUCKET_COUNT {
        return Err(AllocError::UnsupportedSizeClass { size });
    }

    Ok(bucket)
}

impl Placement for Segregated {
    fn mode(&self) -> SearchMode {
        SearchMode::SegregatedList
    }

    fn find(
        &mut self,
        arena: &Arena,
        _chain: &Chain,
        size: usize,
    ) -> Result<Option<BlockRef>, AllocError> {
        let bucket = bucket_for(size)?;

        Ok(fit_in(arena, &self.buckets[bucket], size))
    }

    fn append(&mut self, arena: &mut Arena, _chain: &mut Chain, block: BlockRef) {
        // find validated the class on this same request
        let bucket = block.size(arena) / WORD - 1;
        debug_assert!(bucket < BUCKET_COUNT);

        self.buckets[bucket].push(arena, block);
    }

    fn splits(&self) -> bool {
        false
    }

    fn coalesces(&self) -> bool {
        false
    }

    fn chain_heads(&self, _chain: &Chain) -> Vec<BlockRef> {
        self.buckets.iter().filter_map(|bucket| bucket.start).collect()
    }

    fn clear(&mut self) {
        self.buckets = [Chain::new(); BUCKET_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_cover_the_word_multiple_classes() {
        for k in 0..BUCKET_COUNT {
            assert_eq!(bucket_for(WORD * (k + 1)).unwrap(), k);
        }
    }

    #[test]
    fn sizes_past_the_table_are_refused() {
        let size = WORD * (BUCKET_COUNT + 1);

        assert_eq!(
            bucket_for(size),
            Err(AllocError::UnsupportedSizeClass { size })
        );
    }
}
