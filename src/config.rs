/// Settings for one heap session.
#[derive(Copy, Clone, Debug)]
pub struct HeapConfig {
    /// Upper bound, in bytes, on the backing arena, headers included.
    /// Growth past it makes `alloc` return `OutOfMemory`, which is also
    /// the lever tests use to provoke exhaustion deterministically.
    pub heap_limit: usize,
}

pub const HEAP_CONFIG_DEFAULT_LIMIT: usize = 64 * 1024 * 1024;

impl Default for HeapConfig {
    /// Creates a default HeapConfig. Good for most use cases.
    fn default() -> Self {
        HeapConfig {
            heap_limit: HEAP_CONFIG_DEFAULT_LIMIT,
        }
    }
}
