//! Arena allocation for the front end.
//!
//! All syntax nodes and node lists are allocated from a bump arena owned by
//! the enclosing compilation. Nodes are immutable once built; the whole
//! arena is torn down at once when the compilation ends, which is what lets
//! later stages read the tree concurrently without synchronization.

use bumpalo::Bump;

/// The compilation arena wraps a bump allocator for all parse-time
/// allocations. Nothing allocated here is freed piecewise.
pub struct CompilationArena {
    bump: Bump,
}

impl CompilationArena {
    /// Create a new arena with default capacity.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create a new arena with the specified initial capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Get a reference to the underlying bump allocator.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Allocate a value in the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocate a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocate a slice by copying it into the arena.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(src)
    }

    /// Returns the total bytes allocated in this arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Reset the arena, deallocating all objects but keeping the memory.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for CompilationArena {
    fn default() -> Self {
        Self::new()
    }
}
