//! svparse_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Defines every diagnostic the lexer and parser can emit. Diagnostics are
//! appended to a [`DiagnosticCollection`] and never stop parsing; the parser
//! recovers and keeps building the tree.

use svparse_core::text::TextSpan;
use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 2001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The source text span where this diagnostic occurred, if any.
    pub span: Option<TextSpan>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
    /// Related diagnostics (e.g., "previous definition here" notes).
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Create a new diagnostic with a source span.
    pub fn with_span(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: Some(span),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Create a new diagnostic with file and span info.
    pub fn with_location(
        file: String,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            span: Some(span),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Add related diagnostic information.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(
            f,
            "{} SV{}: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a parse.
///
/// Single writer, append-only; the parser and lexer share one of these per
/// compilation unit.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether any diagnostic has already been recorded at the given offset.
    /// Used to avoid piling duplicate errors onto one location.
    pub fn has_diag_at(&self, pos: u32) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.span.map(|s| s.start) == Some(pos))
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort diagnostics by file and position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            let a_pos = a.span.map(|s| s.start).unwrap_or(0);
            let b_pos = b.span.map(|s| s.start).unwrap_or(0);
            a_pos.cmp(&b_pos)
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Lexer errors (1000-1999)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1001, Error, "unterminated string literal");
    pub const UNTERMINATED_BLOCK_COMMENT: DiagnosticMessage = diag!(1002, Error, "unterminated block comment");
    pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(1003, Error, "unexpected character '{0}'");
    pub const INVALID_BASE_DIGIT: DiagnosticMessage = diag!(1004, Error, "digit '{0}' is not valid for the given base");
    pub const MISSING_VECTOR_DIGITS: DiagnosticMessage = diag!(1005, Error, "expected vector literal digits");
    pub const ESCAPED_IDENTIFIER_EMPTY: DiagnosticMessage = diag!(1006, Error, "escaped identifier has no characters");

    // ========================================================================
    // Parser errors (2000-2999)
    // ========================================================================
    pub const EXPECTED_TOKEN: DiagnosticMessage = diag!(2001, Error, "expected '{0}'");
    pub const EXPECTED_EXPRESSION: DiagnosticMessage = diag!(2002, Error, "expected expression");
    pub const EXPECTED_IDENTIFIER: DiagnosticMessage = diag!(2003, Error, "expected identifier");
    pub const EXPECTED_ARGUMENT: DiagnosticMessage = diag!(2004, Error, "expected argument");
    pub const EXPECTED_OPEN_RANGE_ELEMENT: DiagnosticMessage = diag!(2005, Error, "expected open range element");
    pub const EXPECTED_STREAM_EXPRESSION: DiagnosticMessage = diag!(2006, Error, "expected stream expression");
    pub const EXPECTED_ASSIGNMENT_KEY: DiagnosticMessage = diag!(2007, Error, "expected assignment pattern key");
    pub const EXPECTED_CONDITIONAL_PATTERN: DiagnosticMessage = diag!(2008, Error, "expected conditional pattern");
    pub const EXPECTED_DIST_ITEM: DiagnosticMessage = diag!(2009, Error, "expected distribution item");
    pub const EXPECTED_ATTRIBUTE: DiagnosticMessage = diag!(2010, Error, "expected attribute specification");
    pub const EXPECTED_CONSTRAINT_ITEM: DiagnosticMessage = diag!(2011, Error, "expected constraint item");
    pub const INVALID_ACCESS_DOT_COLON: DiagnosticMessage = diag!(2020, Error, "invalid access token '{0}'; use '{1}' instead");
    pub const NEW_KEYWORD_QUALIFIED: DiagnosticMessage = diag!(2021, Error, "'new' must not be qualified with a scope");
    pub const INVALID_SUPER_NEW: DiagnosticMessage = diag!(2022, Error, "'super.new' call is only allowed in a class constructor");
    pub const SCOPED_CLASS_COPY: DiagnosticMessage = diag!(2023, Error, "class copy expression must use a plain 'new' keyword");
    pub const EMPTY_ASSIGNMENT_PATTERN: DiagnosticMessage = diag!(2024, Warning, "empty assignment pattern");
    pub const MULTIPLE_DEFAULT_CASES: DiagnosticMessage = diag!(2025, Error, "multiple default {0} items");
    pub const NOTE_PREVIOUS_DEFINITION: DiagnosticMessage = diag!(2026, Warning, "previous definition here");
    pub const CASE_STATEMENT_EMPTY: DiagnosticMessage = diag!(2027, Warning, "{0} statement has no items");
    pub const EXPECTED_VECTOR_LITERAL: DiagnosticMessage = diag!(2028, Error, "vector literals are not allowed here");
    pub const MAX_RECURSION_DEPTH_EXCEEDED: DiagnosticMessage = diag!(2030, Error, "expression nesting is too deep");
    pub const EXTRA_INPUT: DiagnosticMessage = diag!(2031, Error, "extra input after expression");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("expected '{0}'", &[")"]),
            "expected ')'"
        );
        assert_eq!(
            format_message("invalid access token '{0}'; use '{1}' instead", &["::", "."]),
            "invalid access token '::'; use '.' instead"
        );
    }

    #[test]
    fn test_collection_ordering() {
        let mut coll = DiagnosticCollection::new();
        coll.add(Diagnostic::with_span(
            TextSpan::new(10, 1),
            &messages::EXPECTED_EXPRESSION,
            &[],
        ));
        coll.add(Diagnostic::with_span(
            TextSpan::new(2, 1),
            &messages::EXPECTED_TOKEN,
            &[")"],
        ));
        assert!(coll.has_errors());
        assert_eq!(coll.error_count(), 2);
        coll.sort();
        assert_eq!(coll.diagnostics()[0].span.unwrap().start, 2);
        assert!(coll.has_diag_at(10));
        assert!(!coll.has_diag_at(3));
    }
}
