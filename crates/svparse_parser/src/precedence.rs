//! Operator classification and precedence tables.
//!
//! Binary parsing is precedence climbing: the loop in the parser breaks when
//! the next operator binds looser than the current minimum, and a tie breaks
//! the loop unless the operator is right-associative.

use svparse_ast::{SyntaxKind, TokenKind};

/// Precedence of the conditional operator. A `?` continues the expression
/// only when the current minimum precedence is below this.
pub const CONDITIONAL_PRECEDENCE: u8 = 3;

/// Precedence assigned to unary prefix operators; binds tighter than every
/// binary operator, including power.
pub const UNARY_PRECEDENCE: u8 = 15;

/// Map a token to the unary prefix expression kind it starts, if any.
pub fn get_unary_prefix_kind(kind: TokenKind) -> Option<SyntaxKind> {
    use TokenKind::*;
    Some(match kind {
        Plus => SyntaxKind::UnaryPlusExpression,
        Minus => SyntaxKind::UnaryMinusExpression,
        And => SyntaxKind::UnaryBitwiseAndExpression,
        TildeAnd => SyntaxKind::UnaryBitwiseNandExpression,
        Or => SyntaxKind::UnaryBitwiseOrExpression,
        TildeOr => SyntaxKind::UnaryBitwiseNorExpression,
        Xor => SyntaxKind::UnaryBitwiseXorExpression,
        TildeXor | XorTilde => SyntaxKind::UnaryBitwiseXnorExpression,
        Exclamation => SyntaxKind::UnaryLogicalNotExpression,
        Tilde => SyntaxKind::UnaryBitwiseNotExpression,
        DoublePlus => SyntaxKind::UnaryPreincrementExpression,
        DoubleMinus => SyntaxKind::UnaryPredecrementExpression,
        _ => return None,
    })
}

/// Map a token to the binary expression kind it continues, if any.
/// `<=` always maps to the comparison here; the parser retags it as a
/// nonblocking assignment in procedural assignment context.
pub fn get_binary_kind(kind: TokenKind) -> Option<SyntaxKind> {
    use TokenKind::*;
    Some(match kind {
        Plus => SyntaxKind::AddExpression,
        Minus => SyntaxKind::SubtractExpression,
        Star => SyntaxKind::MultiplyExpression,
        Slash => SyntaxKind::DivideExpression,
        Percent => SyntaxKind::ModExpression,
        DoubleStar => SyntaxKind::PowerExpression,
        DoubleEquals => SyntaxKind::EqualityExpression,
        ExclamationEquals => SyntaxKind::InequalityExpression,
        TripleEquals => SyntaxKind::CaseEqualityExpression,
        ExclamationDoubleEquals => SyntaxKind::CaseInequalityExpression,
        DoubleEqualsQuestion => SyntaxKind::WildcardEqualityExpression,
        ExclamationEqualsQuestion => SyntaxKind::WildcardInequalityExpression,
        LessThan => SyntaxKind::LessThanExpression,
        LessThanEquals => SyntaxKind::LessThanEqualExpression,
        GreaterThan => SyntaxKind::GreaterThanExpression,
        GreaterThanEquals => SyntaxKind::GreaterThanEqualExpression,
        DoubleAnd => SyntaxKind::LogicalAndExpression,
        DoubleOr => SyntaxKind::LogicalOrExpression,
        And => SyntaxKind::BinaryAndExpression,
        Or => SyntaxKind::BinaryOrExpression,
        Xor => SyntaxKind::BinaryXorExpression,
        XorTilde | TildeXor => SyntaxKind::BinaryXnorExpression,
        MinusArrow => SyntaxKind::LogicalImplicationExpression,
        LessThanMinusArrow => SyntaxKind::LogicalEquivalenceExpression,
        LeftShift => SyntaxKind::LogicalShiftLeftExpression,
        RightShift => SyntaxKind::LogicalShiftRightExpression,
        TripleLeftShift => SyntaxKind::ArithmeticShiftLeftExpression,
        TripleRightShift => SyntaxKind::ArithmeticShiftRightExpression,
        InsideKeyword => SyntaxKind::InsideExpression,
        Equals => SyntaxKind::AssignmentExpression,
        PlusEqual => SyntaxKind::AddAssignmentExpression,
        MinusEqual => SyntaxKind::SubtractAssignmentExpression,
        StarEqual => SyntaxKind::MultiplyAssignmentExpression,
        SlashEqual => SyntaxKind::DivideAssignmentExpression,
        PercentEqual => SyntaxKind::ModAssignmentExpression,
        AndEqual => SyntaxKind::AndAssignmentExpression,
        OrEqual => SyntaxKind::OrAssignmentExpression,
        XorEqual => SyntaxKind::XorAssignmentExpression,
        LeftShiftEqual => SyntaxKind::LogicalLeftShiftAssignmentExpression,
        RightShiftEqual => SyntaxKind::LogicalRightShiftAssignmentExpression,
        TripleLeftShiftEqual => SyntaxKind::ArithmeticLeftShiftAssignmentExpression,
        TripleRightShiftEqual => SyntaxKind::ArithmeticRightShiftAssignmentExpression,
        _ => return None,
    })
}

/// Precedence of a binary or conditional expression kind.
pub fn get_precedence(kind: SyntaxKind) -> u8 {
    use SyntaxKind::*;
    if kind.is_assignment() {
        return 1;
    }
    match kind {
        LogicalImplicationExpression | LogicalEquivalenceExpression => 2,
        ConditionalExpression => CONDITIONAL_PRECEDENCE,
        LogicalOrExpression => 4,
        LogicalAndExpression => 5,
        BinaryOrExpression => 6,
        BinaryXorExpression | BinaryXnorExpression => 7,
        BinaryAndExpression => 8,
        EqualityExpression | InequalityExpression | CaseEqualityExpression
        | CaseInequalityExpression | WildcardEqualityExpression
        | WildcardInequalityExpression => 9,
        LessThanExpression | LessThanEqualExpression | GreaterThanExpression
        | GreaterThanEqualExpression | InsideExpression => 10,
        LogicalShiftLeftExpression | LogicalShiftRightExpression
        | ArithmeticShiftLeftExpression | ArithmeticShiftRightExpression => 11,
        AddExpression | SubtractExpression => 12,
        MultiplyExpression | DivideExpression | ModExpression => 13,
        PowerExpression => 14,
        _ => UNARY_PRECEDENCE,
    }
}

pub fn is_right_associative(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    kind.is_assignment()
        || matches!(
            kind,
            PowerExpression
                | LogicalImplicationExpression
                | LogicalEquivalenceExpression
                | ConditionalExpression
        )
}

/// Map a token to the binary sequence expression kind it continues.
pub fn get_sequence_binary_kind(kind: TokenKind) -> Option<SyntaxKind> {
    use TokenKind::*;
    Some(match kind {
        OrKeyword => SyntaxKind::OrSequenceExpr,
        AndKeyword => SyntaxKind::AndSequenceExpr,
        IntersectKeyword => SyntaxKind::IntersectSequenceExpr,
        WithinKeyword => SyntaxKind::WithinSequenceExpr,
        ThroughoutKeyword => SyntaxKind::ThroughoutSequenceExpr,
        _ => return None,
    })
}

pub fn get_sequence_precedence(kind: SyntaxKind) -> u8 {
    use SyntaxKind::*;
    match kind {
        OrSequenceExpr => 1,
        AndSequenceExpr => 2,
        IntersectSequenceExpr => 3,
        WithinSequenceExpr => 4,
        ThroughoutSequenceExpr => 5,
        _ => 0,
    }
}

pub fn is_sequence_right_associative(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::ThroughoutSequenceExpr
}

/// Map a token to the binary property expression kind it continues.
pub fn get_property_binary_kind(kind: TokenKind) -> Option<SyntaxKind> {
    use TokenKind::*;
    Some(match kind {
        OrKeyword => SyntaxKind::OrPropertyExpr,
        AndKeyword => SyntaxKind::AndPropertyExpr,
        IffKeyword => SyntaxKind::IffPropertyExpr,
        UntilKeyword => SyntaxKind::UntilPropertyExpr,
        SUntilKeyword => SyntaxKind::SUntilPropertyExpr,
        UntilWithKeyword => SyntaxKind::UntilWithPropertyExpr,
        SUntilWithKeyword => SyntaxKind::SUntilWithPropertyExpr,
        ImpliesKeyword => SyntaxKind::ImpliesPropertyExpr,
        OrMinusArrow => SyntaxKind::OverlappedImplicationPropertyExpr,
        OrEqualsArrow => SyntaxKind::NonOverlappedImplicationPropertyExpr,
        HashMinusHash => SyntaxKind::OverlappedFollowedByPropertyExpr,
        HashEqualsHash => SyntaxKind::NonOverlappedFollowedByPropertyExpr,
        _ => return None,
    })
}

pub fn get_property_precedence(kind: SyntaxKind) -> u8 {
    use SyntaxKind::*;
    match kind {
        UntilPropertyExpr | SUntilPropertyExpr | UntilWithPropertyExpr
        | SUntilWithPropertyExpr | ImpliesPropertyExpr | IffPropertyExpr => 1,
        OverlappedFollowedByPropertyExpr | NonOverlappedFollowedByPropertyExpr => 2,
        OverlappedImplicationPropertyExpr | NonOverlappedImplicationPropertyExpr => 3,
        OrPropertyExpr => 4,
        AndPropertyExpr => 5,
        _ => 0,
    }
}

pub fn is_property_right_associative(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        UntilPropertyExpr
            | SUntilPropertyExpr
            | UntilWithPropertyExpr
            | SUntilWithPropertyExpr
            | ImpliesPropertyExpr
            | IffPropertyExpr
            | OverlappedFollowedByPropertyExpr
            | NonOverlappedFollowedByPropertyExpr
            | OverlappedImplicationPropertyExpr
            | NonOverlappedImplicationPropertyExpr
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_ordering() {
        let add = get_precedence(SyntaxKind::AddExpression);
        let mul = get_precedence(SyntaxKind::MultiplyExpression);
        let pow = get_precedence(SyntaxKind::PowerExpression);
        let lor = get_precedence(SyntaxKind::LogicalOrExpression);
        assert!(lor < add && add < mul && mul < pow && pow < UNARY_PRECEDENCE);
        assert!(CONDITIONAL_PRECEDENCE < lor);
    }

    #[test]
    fn test_associativity() {
        assert!(is_right_associative(SyntaxKind::PowerExpression));
        assert!(is_right_associative(SyntaxKind::AssignmentExpression));
        assert!(!is_right_associative(SyntaxKind::AddExpression));
        assert!(is_sequence_right_associative(SyntaxKind::ThroughoutSequenceExpr));
        assert!(!is_sequence_right_associative(SyntaxKind::AndSequenceExpr));
    }

    #[test]
    fn test_token_mapping() {
        assert_eq!(
            get_binary_kind(TokenKind::InsideKeyword),
            Some(SyntaxKind::InsideExpression)
        );
        assert_eq!(
            get_unary_prefix_kind(TokenKind::TildeAnd),
            Some(SyntaxKind::UnaryBitwiseNandExpression)
        );
        assert_eq!(get_binary_kind(TokenKind::Question), None);
        assert_eq!(
            get_property_binary_kind(TokenKind::OrMinusArrow),
            Some(SyntaxKind::OverlappedImplicationPropertyExpr)
        );
    }
}
