//! svparse_core: Core utilities for the svparse SystemVerilog front end.
//!
//! Provides text spans, string interning, and the compilation arena used
//! throughout the parsing pipeline.

pub mod arena;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use arena::CompilationArena;
pub use intern::{InternedString, StringInterner};
pub use text::{TextRange, TextSpan};
