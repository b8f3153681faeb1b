//! svparse_ast: Syntax tree definitions for the svparse SystemVerilog front end.
//!
//! Tokens, syntax kinds, and every syntax node type live here. Nodes
//! reference child nodes via arena-allocated references and are immutable
//! once constructed; the parser is the only writer.

pub mod node;
pub mod syntax_kind;
pub mod token;
pub mod types;
pub mod writer;

pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use token::{Token, TokenKind};
pub use types::{ExpressionOptions, NameOptions, TokenFlags};
pub use writer::SourceWriter;
