use crate::arena::Arena;
use crate::block::{BlockInfo, BlockRef, Handle};
use crate::chain::{Chain, ChainIter};
use crate::config::HeapConfig;
use crate::constants::{align, HEADER_SIZE};
use crate::error::AllocError;
use crate::metrics::HeapMetrics;
use crate::policy::{Placement, SearchMode};
use log::{debug, trace};
use std::fmt;

// Keeps align() and the header addition below overflow free.
const MAX_REQUEST: usize = usize::MAX - 2 * HEADER_SIZE;

/// One allocator session: a growable arena of linked blocks plus the
/// placement policy chosen at construction.
///
/// Every mutating operation takes `&mut self`, so exclusive single
/// threaded access is a compile time property of a session rather than a
/// usage convention.
///
/// # Examples
///
/// ```
/// use mound::{Heap, SearchMode, WORD};
///
/// let mut heap = Heap::new(SearchMode::FirstFit);
///
/// // a 3 byte request is served by a word aligned block
/// let p = heap.alloc(3).unwrap();
/// assert_eq!(heap.header_of(p).unwrap().size, WORD);
///
/// // freed blocks are found again by the placement search
/// heap.free(p).unwrap();
/// let q = heap.alloc(WORD).unwrap();
/// assert_eq!(p, q);
/// ```
pub struct Heap {
    arena: Arena,
    chain: Chain,
    policy: Box<dyn Placement>,
    config: HeapConfig,
    metrics: HeapMetrics,
}

impl Heap {
    /// Opens a session running `mode` with the default configuration.
    pub fn new(mode: SearchMode) -> Self {
        Self::with_config(mode, HeapConfig::default())
    }

    pub fn with_config(mode: SearchMode, config: HeapConfig) -> Self {
        debug!("opening {mode:?} heap, limit {} bytes", config.heap_limit);

        Self {
            arena: Arena::new(config.heap_limit),
            chain: Chain::new(),
            policy: mode.placement(),
            config,
            metrics: HeapMetrics::default(),
        }
    }

    /// The placement policy this session was built with.
    pub fn mode(&self) -> SearchMode {
        self.policy.mode()
    }

    /// Allocates `size` bytes and returns the payload handle.
    ///
    /// The size is rounded up to at least one machine word. The search,
    /// split, and growth behavior depend on the session's [`SearchMode`].
    pub fn alloc(&mut self, size: usize) -> Result<Handle, AllocError> {
        match self.try_alloc(size) {
            Ok(handle) => {
                self.metrics.allocations += 1;
                Ok(handle)
            }
            Err(err) => {
                self.metrics.failed_requests += 1;
                Err(err)
            }
        }
    }

    fn try_alloc(&mut self, size: usize) -> Result<Handle, AllocError> {
        if size > MAX_REQUEST {
            return Err(AllocError::OutOfMemory { requested: size });
        }
        let size = align(size.max(1));

        if let Some(block) = self.policy.find(&self.arena, &self.chain, size)? {
            if self.policy.splits() && self.chain.can_split(&self.arena, block, size) {
                let rest = self.chain.split(&mut self.arena, block, size);
                self.policy.note_remainder(rest);
                self.metrics.splits += 1;
            }

            block.set_used(&mut self.arena, true);
            block.set_size(&mut self.arena, size);
            self.metrics.reuses += 1;
            trace!("reused the block at {} for {size} bytes", block.0);

            return Ok(block.payload());
        }

        let offset = self.arena.grow_by(HEADER_SIZE + size)?;
        let block = BlockRef(offset);

        block.set_size(&mut self.arena, size);
        block.set_used(&mut self.arena, true);
        block.set_next(&mut self.arena, None);
        self.policy.append(&mut self.arena, &mut self.chain, block);
        self.metrics.grows += 1;
        trace!("grew a {size} byte block at {}", block.0);

        Ok(block.payload())
    }

    /// Returns `handle`'s block to the free state, merging it with a free
    /// successor where the policy permits.
    ///
    /// Handles that do not name a live allocation, double frees included,
    /// are refused with [`AllocError::InvalidFree`].
    pub fn free(&mut self, handle: Handle) -> Result<(), AllocError> {
        match self.try_free(handle) {
            Ok(()) => {
                self.metrics.frees += 1;
                Ok(())
            }
            Err(err) => {
                self.metrics.failed_requests += 1;
                Err(err)
            }
        }
    }

    fn try_free(&mut self, handle: Handle) -> Result<(), AllocError> {
        let block = self.resolve(handle)?;

        if !block.used(&self.arena) {
            return Err(AllocError::InvalidFree { handle });
        }

        if self.policy.coalesces() {
            if let Some(absorbed) = self.chain.coalesce(&mut self.arena, block) {
                self.policy.note_absorbed(absorbed);
                self.metrics.coalesces += 1;
            }
        }

        block.set_used(&mut self.arena, false);
        self.policy.note_freed(block);
        trace!("freed the block at {}", block.0);

        Ok(())
    }

    /// The `{ size, used }` header view behind any resolvable handle,
    /// live or freed. Diagnostic only; allocation never consults it.
    pub fn header_of(&self, handle: Handle) -> Result<BlockInfo, AllocError> {
        self.resolve(handle).map(|block| self.info(block))
    }

    /// Read access to a live allocation's payload bytes.
    pub fn payload(&self, handle: Handle) -> Result<&[u8], AllocError> {
        let block = self.live(handle)?;
        let size = block.size(&self.arena);

        Ok(self.arena.slice(handle.0, size))
    }

    /// Write access to a live allocation's payload bytes.
    pub fn payload_mut(&mut self, handle: Handle) -> Result<&mut [u8], AllocError> {
        let block = self.live(handle)?;
        let size = block.size(&self.arena);

        Ok(self.arena.slice_mut(handle.0, size))
    }

    /// Finite, restartable, lazy walk over every block the session owns:
    /// the main chain, or each bucket in turn in segregated mode.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            arena: &self.arena,
            heads: self.policy.chain_heads(&self.chain).into_iter(),
            cursor: None,
        }
    }

    /// Invokes `callback` with each block's view, in traversal order.
    /// The borrow is immutable, so callbacks cannot mutate the heap.
    pub fn traverse<F: FnMut(BlockInfo)>(&self, mut callback: F) {
        for info in self.blocks() {
            callback(info);
        }
    }

    /// Rolls the whole session back to its starting state: the arena
    /// boundary, the chains, the policy bookkeeping, and the metrics.
    /// Every handle handed out before this call is invalid afterwards, by
    /// contract of the caller. A session boundary operation, not a
    /// deallocation primitive.
    pub fn reset(&mut self) {
        debug!("resetting {:?} heap", self.mode());

        self.arena.reset();
        self.chain = Chain::new();
        self.policy.clear();
        self.metrics = HeapMetrics::default();
    }

    /// Length of the explicit free list; `None` outside free-list mode.
    pub fn free_list_len(&self) -> Option<usize> {
        self.policy.tracked_free_len()
    }

    /// The next-fit resumption point; `None` outside next-fit mode or
    /// when the cursor is unset.
    pub fn search_cursor(&self) -> Option<Handle> {
        self.policy.cursor().map(BlockRef::payload)
    }

    /// A snapshot of the session's counters.
    pub fn metrics(&self) -> HeapMetrics {
        self.metrics
    }

    /// The configuration this session was built with. There is no way to
    /// change it after construction.
    pub fn config(&self) -> HeapConfig {
        self.config
    }

    /// Total bytes claimed from the backing store, headers included.
    pub fn heap_size(&self) -> usize {
        self.arena.size()
    }

    fn info(&self, block: BlockRef) -> BlockInfo {
        BlockInfo {
            handle: block.payload(),
            size: block.size(&self.arena),
            used: block.used(&self.arena),
        }
    }

    /// Walks the handle back to its header and checks that it names a
    /// block reachable from the active chains.
    fn resolve(&self, handle: Handle) -> Result<BlockRef, AllocError> {
        let block = BlockRef::from_handle(handle);

        match block {
            Some(block) if self.block_refs().any(|live| live == block) => Ok(block),
            _ => Err(AllocError::InvalidFree { handle }),
        }
    }

    fn live(&self, handle: Handle) -> Result<BlockRef, AllocError> {
        let block = self.resolve(handle)?;

        if !block.used(&self.arena) {
            return Err(AllocError::InvalidFree { handle });
        }

        Ok(block)
    }

    fn block_refs(&self) -> impl Iterator<Item = BlockRef> + '_ {
        let arena = &self.arena;

        self.policy
            .chain_heads(&self.chain)
            .into_iter()
            .flat_map(move |head| ChainIter::new(arena, Some(head)))
    }
}

impl fmt::Display for Heap {
    /// Renders the block map as `[size, used]` pairs in traversal order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "[{}, {}]", block.size, block.used as u8)?;
        }

        Ok(())
    }
}

/// Lazy iterator over every block of a session, concatenating chains in
/// reporting order. Returned by [`Heap::blocks`].
pub struct Blocks<'a> {
    arena: &'a Arena,
    heads: std::vec::IntoIter<BlockRef>,
    cursor: Option<BlockRef>,
}

impl Iterator for Blocks<'_> {
    type Item = BlockInfo;

    fn next(&mut self) -> Option<BlockInfo> {
        loop {
            match self.cursor {
                Some(block) => {
                    self.cursor = block.next(self.arena);

                    return Some(BlockInfo {
                        handle: block.payload(),
                        size: block.size(self.arena),
                        used: block.used(self.arena),
                    });
                }
                None => self.cursor = Some(self.heads.next()?),
            }
        }
    }
}
