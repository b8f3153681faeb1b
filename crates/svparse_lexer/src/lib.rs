//! svparse_lexer: Tokenizer for the svparse SystemVerilog front end.
//!
//! Produces the full token stream up front so the parser can use cheap
//! bounded lookahead over a slice.

mod keywords;
mod lexer;

pub use lexer::{tokenize, Lexer};
