//! svparse_parser: recursive descent parser for SystemVerilog expressions,
//! hierarchical names, patterns, sequence expressions, and property
//! expressions.
//!
//! The parser never aborts: failures synthesize missing tokens, emit a
//! diagnostic, and parsing continues. All nodes are allocated from the
//! compilation arena and returned by reference.

mod assertions;
mod names;
mod parser;
pub mod precedence;
pub mod utilities;

pub use parser::{Parser, MAX_RECURSION_DEPTH};
