//! Tokens produced by the lexer and quoted by syntax nodes.

use crate::types::TokenFlags;
use svparse_core::intern::InternedString;
use svparse_core::text::TextRange;

/// The kind of a lexed token. Covers the SystemVerilog token subset used by
/// the expression, sequence, and property grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TokenKind {
    Unknown,
    EndOfFile,

    // Identifiers and literals
    Identifier,
    SystemIdentifier,
    StringLiteral,
    IntegerLiteral,
    IntegerBase,
    UnbasedUnsizedLiteral,
    RealLiteral,
    TimeLiteral,
    OneStep,

    // Punctuation
    Apostrophe,
    ApostropheOpenBrace,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    OpenParenthesis,
    CloseParenthesis,
    OpenParenthesisStar,
    StarCloseParenthesis,
    Semicolon,
    Colon,
    ColonEquals,
    ColonSlash,
    DoubleColon,
    Comma,
    Dot,
    DotStar,
    Slash,
    SlashEqual,
    Star,
    DoubleStar,
    StarEqual,
    Plus,
    DoublePlus,
    PlusColon,
    PlusEqual,
    Minus,
    DoubleMinus,
    MinusColon,
    MinusEqual,
    MinusArrow,
    Equals,
    DoubleEquals,
    TripleEquals,
    DoubleEqualsQuestion,
    Exclamation,
    ExclamationEquals,
    ExclamationDoubleEquals,
    ExclamationEqualsQuestion,
    LessThan,
    LessThanEquals,
    LessThanMinusArrow,
    LeftShift,
    LeftShiftEqual,
    TripleLeftShift,
    TripleLeftShiftEqual,
    GreaterThan,
    GreaterThanEquals,
    RightShift,
    RightShiftEqual,
    TripleRightShift,
    TripleRightShiftEqual,
    And,
    DoubleAnd,
    TripleAnd,
    AndEqual,
    Or,
    DoubleOr,
    OrEqual,
    OrMinusArrow,
    OrEqualsArrow,
    Xor,
    XorTilde,
    XorEqual,
    Tilde,
    TildeAnd,
    TildeOr,
    TildeXor,
    Percent,
    PercentEqual,
    Hash,
    DoubleHash,
    HashMinusHash,
    HashEqualsHash,
    Question,
    At,
    Dollar,

    // Keywords
    AcceptOnKeyword,
    AlwaysKeyword,
    AndKeyword,
    BitKeyword,
    ByteKeyword,
    CaseKeyword,
    CHandleKeyword,
    ConstKeyword,
    DefaultKeyword,
    DistKeyword,
    EdgeKeyword,
    ElseKeyword,
    EndCaseKeyword,
    EventKeyword,
    EventuallyKeyword,
    FirstMatchKeyword,
    IffKeyword,
    IfKeyword,
    ImpliesKeyword,
    InsideKeyword,
    IntegerKeyword,
    IntersectKeyword,
    IntKeyword,
    LocalKeyword,
    LogicKeyword,
    LongIntKeyword,
    MatchesKeyword,
    NegEdgeKeyword,
    NewKeyword,
    NextTimeKeyword,
    NotKeyword,
    NullKeyword,
    OrKeyword,
    PosEdgeKeyword,
    RealKeyword,
    RealTimeKeyword,
    RegKeyword,
    RejectOnKeyword,
    RepeatKeyword,
    RootSystemName,
    SAlwaysKeyword,
    SEventuallyKeyword,
    ShortIntKeyword,
    ShortRealKeyword,
    SignedKeyword,
    SNextTimeKeyword,
    StringKeyword,
    StrongKeyword,
    SUntilKeyword,
    SUntilWithKeyword,
    SuperKeyword,
    SyncAcceptOnKeyword,
    SyncRejectOnKeyword,
    TaggedKeyword,
    ThisKeyword,
    ThroughoutKeyword,
    TimeKeyword,
    UniqueKeyword,
    UnitSystemName,
    UnsignedKeyword,
    UntilKeyword,
    UntilWithKeyword,
    VoidKeyword,
    WeakKeyword,
    WithinKeyword,
    WithKeyword,
    XorKeyword,
}

impl TokenKind {
    /// The fixed text of a punctuation token, if this is one.
    pub fn punctuation_text(self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            Apostrophe => "'",
            ApostropheOpenBrace => "'{",
            OpenBrace => "{",
            CloseBrace => "}",
            OpenBracket => "[",
            CloseBracket => "]",
            OpenParenthesis => "(",
            CloseParenthesis => ")",
            OpenParenthesisStar => "(*",
            StarCloseParenthesis => "*)",
            Semicolon => ";",
            Colon => ":",
            ColonEquals => ":=",
            ColonSlash => ":/",
            DoubleColon => "::",
            Comma => ",",
            Dot => ".",
            DotStar => ".*",
            Slash => "/",
            SlashEqual => "/=",
            Star => "*",
            DoubleStar => "**",
            StarEqual => "*=",
            Plus => "+",
            DoublePlus => "++",
            PlusColon => "+:",
            PlusEqual => "+=",
            Minus => "-",
            DoubleMinus => "--",
            MinusColon => "-:",
            MinusEqual => "-=",
            MinusArrow => "->",
            Equals => "=",
            DoubleEquals => "==",
            TripleEquals => "===",
            DoubleEqualsQuestion => "==?",
            Exclamation => "!",
            ExclamationEquals => "!=",
            ExclamationDoubleEquals => "!==",
            ExclamationEqualsQuestion => "!=?",
            LessThan => "<",
            LessThanEquals => "<=",
            LessThanMinusArrow => "<->",
            LeftShift => "<<",
            LeftShiftEqual => "<<=",
            TripleLeftShift => "<<<",
            TripleLeftShiftEqual => "<<<=",
            GreaterThan => ">",
            GreaterThanEquals => ">=",
            RightShift => ">>",
            RightShiftEqual => ">>=",
            TripleRightShift => ">>>",
            TripleRightShiftEqual => ">>>=",
            And => "&",
            DoubleAnd => "&&",
            TripleAnd => "&&&",
            AndEqual => "&=",
            Or => "|",
            DoubleOr => "||",
            OrEqual => "|=",
            OrMinusArrow => "|->",
            OrEqualsArrow => "|=>",
            Xor => "^",
            XorTilde => "^~",
            XorEqual => "^=",
            Tilde => "~",
            TildeAnd => "~&",
            TildeOr => "~|",
            TildeXor => "~^",
            Percent => "%",
            PercentEqual => "%=",
            Hash => "#",
            DoubleHash => "##",
            HashMinusHash => "#-#",
            HashEqualsHash => "#=#",
            Question => "?",
            At => "@",
            Dollar => "$",
            _ => return None,
        })
    }

    /// The fixed text of a keyword token, if this is one.
    pub fn keyword_text(self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            AcceptOnKeyword => "accept_on",
            AlwaysKeyword => "always",
            AndKeyword => "and",
            BitKeyword => "bit",
            ByteKeyword => "byte",
            CaseKeyword => "case",
            CHandleKeyword => "chandle",
            ConstKeyword => "const",
            DefaultKeyword => "default",
            DistKeyword => "dist",
            EdgeKeyword => "edge",
            ElseKeyword => "else",
            EndCaseKeyword => "endcase",
            EventKeyword => "event",
            EventuallyKeyword => "eventually",
            FirstMatchKeyword => "first_match",
            IffKeyword => "iff",
            IfKeyword => "if",
            ImpliesKeyword => "implies",
            InsideKeyword => "inside",
            IntegerKeyword => "integer",
            IntersectKeyword => "intersect",
            IntKeyword => "int",
            LocalKeyword => "local",
            LogicKeyword => "logic",
            LongIntKeyword => "longint",
            MatchesKeyword => "matches",
            NegEdgeKeyword => "negedge",
            NewKeyword => "new",
            NextTimeKeyword => "nexttime",
            NotKeyword => "not",
            NullKeyword => "null",
            OrKeyword => "or",
            PosEdgeKeyword => "posedge",
            RealKeyword => "real",
            RealTimeKeyword => "realtime",
            RegKeyword => "reg",
            RejectOnKeyword => "reject_on",
            RepeatKeyword => "repeat",
            RootSystemName => "$root",
            SAlwaysKeyword => "s_always",
            SEventuallyKeyword => "s_eventually",
            ShortIntKeyword => "shortint",
            ShortRealKeyword => "shortreal",
            SignedKeyword => "signed",
            SNextTimeKeyword => "s_nexttime",
            StringKeyword => "string",
            StrongKeyword => "strong",
            SUntilKeyword => "s_until",
            SUntilWithKeyword => "s_until_with",
            SuperKeyword => "super",
            SyncAcceptOnKeyword => "sync_accept_on",
            SyncRejectOnKeyword => "sync_reject_on",
            TaggedKeyword => "tagged",
            ThisKeyword => "this",
            ThroughoutKeyword => "throughout",
            TimeKeyword => "time",
            UniqueKeyword => "unique",
            UnitSystemName => "$unit",
            UnsignedKeyword => "unsigned",
            UntilKeyword => "until",
            UntilWithKeyword => "until_with",
            VoidKeyword => "void",
            WeakKeyword => "weak",
            WithinKeyword => "within",
            WithKeyword => "with",
            XorKeyword => "xor",
            OneStep => "1step",
            _ => return None,
        })
    }

    /// Fixed text for either a punctuation or keyword token.
    pub fn fixed_text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

/// A lexed token: kind tag, source range, interned text for tokens whose
/// text is not fixed by their kind, and flags.
///
/// Tokens are immutable once issued. A missing token is synthesized during
/// error recovery with the expected kind, an empty range at the failure
/// location, and the `MISSING` flag set.
#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub text: InternedString,
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(kind: TokenKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            text: InternedString::dummy(),
            flags: TokenFlags::NONE,
        }
    }

    pub fn with_text(mut self, text: InternedString) -> Self {
        self.text = text;
        self
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Synthesize a missing token of the expected kind at a location.
    pub fn missing(kind: TokenKind, pos: u32) -> Self {
        Self {
            kind,
            range: TextRange::empty(pos),
            text: InternedString::dummy(),
            flags: TokenFlags::MISSING,
        }
    }

    /// Whether this token was synthesized during error recovery.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(TokenFlags::MISSING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_text() {
        assert_eq!(TokenKind::OrMinusArrow.fixed_text(), Some("|->"));
        assert_eq!(TokenKind::FirstMatchKeyword.fixed_text(), Some("first_match"));
        assert_eq!(TokenKind::Identifier.fixed_text(), None);
    }

    #[test]
    fn test_missing_token() {
        let tok = Token::missing(TokenKind::CloseParenthesis, 12);
        assert!(tok.is_missing());
        assert!(tok.range.is_empty());
        assert_eq!(tok.range.pos, 12);
    }
}
