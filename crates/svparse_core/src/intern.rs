//! String interning for the front end.
//!
//! Identifier and literal text is interned so tokens stay `Copy` and text
//! comparison is an O(1) integer comparison.

use lasso::{Key, Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// An interned string identifier. This is a lightweight handle (u32)
/// that can be used to look up the actual string content.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    /// Create from a raw lasso key.
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    /// Get the raw lasso key.
    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }

    /// A placeholder handle, used by tokens that carry no source text
    /// (punctuation, keywords, missing tokens).
    #[inline]
    pub fn dummy() -> Self {
        Self(Spur::try_from_usize(0).unwrap())
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner.
///
/// Stores one copy of each unique string and returns lightweight handles.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    /// Create a new string interner. Interns the empty string first so the
    /// dummy handle always resolves.
    pub fn new() -> Self {
        let rodeo = Arc::new(ThreadedRodeo::new());
        rodeo.get_or_intern_static("");
        Self { rodeo }
    }

    /// Intern a string, returning a handle to the interned value.
    /// If the string was already interned, returns the existing handle.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    /// Resolve a handle back to its string content.
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.rodeo.resolve(&s.as_spur())
    }

    /// Number of unique strings interned so far.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let interner = StringInterner::new();
        let a = interner.intern("clk");
        let b = interner.intern("clk");
        let c = interner.intern("rst_n");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "clk");
        assert_eq!(interner.resolve(c), "rst_n");
    }

    #[test]
    fn test_dummy_resolves_empty() {
        let interner = StringInterner::new();
        assert_eq!(interner.resolve(InternedString::dummy()), "");
    }
}
