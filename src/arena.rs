use crate::constants::WORD;
use crate::error::AllocError;
use log::trace;

/// The backing store: one contiguous, growable byte region.
///
/// The boundary only moves forward, one bump per growth, and rolls back to
/// the empty mark recorded at construction only on [`Arena::reset`].
/// Blocks are identified by their byte offset into the region, so the
/// underlying buffer reallocating on growth is invisible to the rest of
/// the allocator.
pub struct Arena {
    bytes: Vec<u8>,
    limit: usize,
}

impl Arena {
    pub fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    /// Bumps the boundary by `total` bytes and returns the offset of the
    /// newly claimed region, zero filled. Refuses to pass the limit.
    pub fn grow_by(&mut self, total: usize) -> Result<usize, AllocError> {
        let start = self.bytes.len();
        let room = self.limit.saturating_sub(start);

        if total > room {
            return Err(AllocError::OutOfMemory { requested: total });
        }

        self.bytes.resize(start + total, 0);
        trace!("arena grew by {total} bytes to {}", self.bytes.len());

        Ok(start)
    }

    /// Rolls the boundary all the way back. Every offset handed out before
    /// this call stops naming anything, by contract of the caller.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn read_word(&self, offset: usize) -> usize {
        let bytes = &self.bytes[offset..offset + WORD];

        usize::from_ne_bytes(bytes.try_into().expect("word sized slice"))
    }

    pub fn write_word(&mut self, offset: usize, value: usize) {
        self.bytes[offset..offset + WORD].copy_from_slice(&value.to_ne_bytes());
    }

    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.bytes[offset..offset + len]
    }

    pub fn slice_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.bytes[offset..offset + len]
    }
}
