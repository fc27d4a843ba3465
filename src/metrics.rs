/// A snapshot of the counters describing one heap session.
///
/// Obtained by calling [`crate::Heap::metrics`]. The session is single
/// threaded, so these are plain integers updated synchronously by each
/// operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeapMetrics {
    /// Successful `alloc` calls.
    pub allocations: u64,

    /// Allocations satisfied by reusing an existing free block.
    pub reuses: u64,

    /// Allocations that grew the backing arena.
    pub grows: u64,

    /// Free blocks split to fit a smaller request.
    pub splits: u64,

    /// Successor merges performed while freeing.
    pub coalesces: u64,

    /// Successful `free` calls.
    pub frees: u64,

    /// Calls refused with an error, counting both allocs and frees.
    pub failed_requests: u64,
}
