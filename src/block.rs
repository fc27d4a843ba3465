use crate::arena::Arena;
use crate::constants::{HEADER_SIZE, NEXT_OFFSET, NO_BLOCK, SIZE_OFFSET, USED_OFFSET};
use std::fmt;

/// A payload handle, as returned by [`crate::Heap::alloc`].
///
/// Opaque to callers: it can be stored, copied, compared, and eventually
/// given back to [`crate::Heap::free`]. Two handles are equal exactly when
/// they name the same block of the same session.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) usize);

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

/// A block header by arena offset.
///
/// Field access goes through the arena, so a `BlockRef` on its own is
/// inert. The header occupies [`HEADER_SIZE`] bytes laid out as the words
/// `[size][used][next]`, with the payload starting immediately after.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct BlockRef(pub(crate) usize);

impl BlockRef {
    /// Fixed-offset arithmetic from a payload handle back to its header.
    pub fn from_handle(handle: Handle) -> Option<BlockRef> {
        handle.0.checked_sub(HEADER_SIZE).map(BlockRef)
    }

    pub fn payload(self) -> Handle {
        Handle(self.0 + HEADER_SIZE)
    }

    pub fn size(self, arena: &Arena) -> usize {
        arena.read_word(self.0 + SIZE_OFFSET)
    }

    pub fn set_size(self, arena: &mut Arena, size: usize) {
        arena.write_word(self.0 + SIZE_OFFSET, size);
    }

    pub fn used(self, arena: &Arena) -> bool {
        arena.read_word(self.0 + USED_OFFSET) != 0
    }

    pub fn set_used(self, arena: &mut Arena, used: bool) {
        arena.write_word(self.0 + USED_OFFSET, used as usize);
    }

    pub fn next(self, arena: &Arena) -> Option<BlockRef> {
        match arena.read_word(self.0 + NEXT_OFFSET) {
            NO_BLOCK => None,
            offset => Some(BlockRef(offset)),
        }
    }

    pub fn set_next(self, arena: &mut Arena, next: Option<BlockRef>) {
        arena.write_word(self.0 + NEXT_OFFSET, next.map_or(NO_BLOCK, |block| block.0));
    }
}

/// A diagnostic view of one block, as reported by traversal and
/// [`crate::Heap::header_of`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// The block's payload handle.
    pub handle: Handle,
    /// Payload bytes the block owns.
    pub size: usize,
    /// Whether the block currently backs a live allocation.
    pub used: bool,
}
