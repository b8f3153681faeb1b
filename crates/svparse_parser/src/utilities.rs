//! Token classification predicates used for dispatch and list recovery.

use svparse_ast::{SyntaxKind, TokenKind};

/// Whether a token can start an expression.
pub fn is_possible_expression(kind: TokenKind) -> bool {
    use TokenKind::*;
    match kind {
        Identifier | SystemIdentifier | StringLiteral | IntegerLiteral | IntegerBase
        | UnbasedUnsizedLiteral | RealLiteral | TimeLiteral | OneStep | NullKeyword
        | Dollar | ThisKeyword | SuperKeyword | LocalKeyword | NewKeyword
        | RootSystemName | UnitSystemName | TaggedKeyword | DefaultKeyword => true,
        OpenParenthesis | OpenBrace | ApostropheOpenBrace => true,
        Plus | Minus | And | TildeAnd | Or | TildeOr | Xor | TildeXor | XorTilde
        | Exclamation | Tilde | DoublePlus | DoubleMinus => true,
        SignedKeyword | UnsignedKeyword | ConstKeyword => true,
        Hash | At => true,
        _ => is_builtin_type_keyword(kind).is_some(),
    }
}

/// Whether a token is a built-in data type keyword, and the type node kind
/// it produces.
pub fn is_builtin_type_keyword(kind: TokenKind) -> Option<SyntaxKind> {
    use TokenKind::*;
    Some(match kind {
        BitKeyword => SyntaxKind::BitType,
        LogicKeyword => SyntaxKind::LogicType,
        RegKeyword => SyntaxKind::RegType,
        ByteKeyword => SyntaxKind::ByteType,
        ShortIntKeyword => SyntaxKind::ShortIntType,
        IntKeyword => SyntaxKind::IntType,
        LongIntKeyword => SyntaxKind::LongIntType,
        IntegerKeyword => SyntaxKind::IntegerType,
        TimeKeyword => SyntaxKind::TimeType,
        ShortRealKeyword => SyntaxKind::ShortRealType,
        RealKeyword => SyntaxKind::RealType,
        RealTimeKeyword => SyntaxKind::RealTimeType,
        StringKeyword => SyntaxKind::StringType,
        CHandleKeyword => SyntaxKind::CHandleType,
        EventKeyword => SyntaxKind::EventType,
        VoidKeyword => SyntaxKind::VoidType,
        _ => return None,
    })
}

/// Whether a token continues an already-complete expression as a binary
/// operator, conditional, or postfix construct. Drives the reinterpretation
/// of parenthesized sequence and property expressions.
pub fn is_binary_or_postfix_token(kind: TokenKind) -> bool {
    use TokenKind::*;
    if crate::precedence::get_binary_kind(kind).is_some() {
        return true;
    }
    matches!(
        kind,
        Question | Dot | OpenParenthesis | DoublePlus | DoubleMinus | Apostrophe
            | DistKeyword | MatchesKeyword
    )
}

/// Whether a token can start a name part.
pub fn is_possible_name_part(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        Identifier
            | ThisKeyword
            | SuperKeyword
            | LocalKeyword
            | NewKeyword
            | UnitSystemName
            | RootSystemName
            | UniqueKeyword
            | AndKeyword
            | OrKeyword
            | XorKeyword
    )
}

/// Whether a token can start a function argument.
pub fn is_possible_argument(kind: TokenKind) -> bool {
    kind == TokenKind::Dot || kind == TokenKind::At || is_possible_expression(kind)
}

/// Whether a token can start an open range element (`[` or an expression).
pub fn is_possible_open_range_element(kind: TokenKind) -> bool {
    kind == TokenKind::OpenBracket || is_possible_expression(kind)
}

/// Whether a token can start an edge-qualified event expression term.
pub fn is_possible_event_expression(kind: TokenKind) -> bool {
    is_edge_keyword(kind) || is_possible_expression(kind)
}

pub fn is_edge_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::PosEdgeKeyword | TokenKind::NegEdgeKeyword | TokenKind::EdgeKeyword
    )
}

/// Whether a token can start a delay or event control.
pub fn is_possible_timing_control(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Hash | TokenKind::At | TokenKind::RepeatKeyword
    )
}

/// Whether a token can start a property expression.
pub fn is_possible_property_expr(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        StrongKeyword
            | WeakKeyword
            | NotKeyword
            | NextTimeKeyword
            | SNextTimeKeyword
            | AlwaysKeyword
            | SAlwaysKeyword
            | EventuallyKeyword
            | SEventuallyKeyword
            | AcceptOnKeyword
            | RejectOnKeyword
            | SyncAcceptOnKeyword
            | SyncRejectOnKeyword
            | IfKeyword
            | CaseKeyword
            | FirstMatchKeyword
            | DoubleHash
    ) || is_possible_expression(kind)
}

/// Tokens that abort skip-ahead recovery inside a delimited list; recovery
/// never consumes past one of these.
pub fn is_recovery_boundary(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        EndOfFile
            | Semicolon
            | CloseParenthesis
            | CloseBrace
            | CloseBracket
            | StarCloseParenthesis
            | EndCaseKeyword
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_starts() {
        assert!(is_possible_expression(TokenKind::Identifier));
        assert!(is_possible_expression(TokenKind::OpenBrace));
        assert!(is_possible_expression(TokenKind::Tilde));
        assert!(is_possible_expression(TokenKind::BitKeyword));
        assert!(!is_possible_expression(TokenKind::CloseParenthesis));
        assert!(!is_possible_expression(TokenKind::Comma));
    }

    #[test]
    fn test_binary_or_postfix() {
        assert!(is_binary_or_postfix_token(TokenKind::Plus));
        assert!(is_binary_or_postfix_token(TokenKind::Question));
        assert!(is_binary_or_postfix_token(TokenKind::Dot));
        assert!(!is_binary_or_postfix_token(TokenKind::CloseBrace));
        assert!(!is_binary_or_postfix_token(TokenKind::OrMinusArrow));
    }
}
