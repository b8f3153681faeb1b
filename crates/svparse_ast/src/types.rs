//! Flag sets threaded through the parser.
//!
//! Both option sets are immutable values passed by parameter through every
//! recursive call; sibling calls at the same level can hold different
//! subsets, so nothing here is ever ambient state.

bitflags::bitflags! {
    /// Flags attached to individual tokens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        const NONE                 = 0;
        /// Synthesized during error recovery; carries no source text.
        const MISSING              = 1 << 0;
        /// A line break appears in the trivia before this token.
        const PRECEDING_LINE_BREAK = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Context options for expression parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExpressionOptions: u8 {
        const NONE                          = 0;
        /// Inside a class constructor body, where `super.new(...)` is legal.
        const ALLOW_SUPER_NEW_CALL          = 1 << 0;
        /// Inside a constraint block; `->` belongs to the constraint grammar.
        const CONSTRAINT_CONTEXT            = 1 << 1;
        /// Directly inside a procedural assignment; the first `<=` seen is a
        /// nonblocking assignment rather than a comparison.
        const PROCEDURAL_ASSIGNMENT_CONTEXT = 1 << 2;
        /// Inside a conditional-predicate pattern; don't consume `?`.
        const PATTERN_CONTEXT               = 1 << 3;
        /// Inside a sequence expression; `[` may start a repetition and
        /// `with [` belongs to an enclosing stream expression.
        const SEQUENCE_EXPR                 = 1 << 4;
        /// Vector literals (`4'b1010`) are not allowed (after `#`/`##`).
        const DISALLOW_VECTORS              = 1 << 5;
    }
}

bitflags::bitflags! {
    /// Context options for hierarchical name parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NameOptions: u8 {
        const NONE                 = 0;
        /// This name part is the first element of the path.
        const IS_FIRST             = 1 << 0;
        /// The previous path element was `this`.
        const PREVIOUS_WAS_THIS    = 1 << 1;
        /// The previous path element was `local`.
        const PREVIOUS_WAS_LOCAL   = 1 << 2;
        /// The name is a foreach loop variable; its brackets belong to the
        /// enclosing foreach construct.
        const FOREACH_NAME         = 1 << 3;
        /// An expression is expected here, so a missing identifier may be
        /// synthesized without an extra diagnostic.
        const EXPECTING_EXPRESSION = 1 << 4;
        /// Inside a sequence expression; `[` may start a repetition.
        const SEQUENCE_EXPR        = 1 << 5;
    }
}
