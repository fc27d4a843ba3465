use crate::block::Handle;
use thiserror::Error;

/// Failures surfaced by heap operations.
///
/// Every variant is a local, synchronous failure returned to the immediate
/// caller. None of them poison the heap: the session stays consistent and
/// usable after any error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The backing arena refused to grow past its configured limit.
    #[error("out of memory: growing by {requested} bytes would pass the heap limit")]
    OutOfMemory { requested: usize },

    /// A segregated-mode request mapped outside the bucket table.
    #[error("no segregated size class serves {size} byte requests")]
    UnsupportedSizeClass { size: usize },

    /// The handle does not name a live allocation.
    #[error("{handle:?} does not name a live allocation")]
    InvalidFree { handle: Handle },
}
