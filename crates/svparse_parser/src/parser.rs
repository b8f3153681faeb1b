//! Core parser: token cursor, list combinator, and the expression grammar.
//!
//! Name parsing lives in `names.rs`; sequence and property parsing in
//! `assertions.rs`. All of them are impl blocks on `Parser`.

use bumpalo::collections::Vec as BumpVec;
use svparse_ast::{
    Argument, ArgumentList, ArrayOrRandomizeMethodExpression, AssignmentPattern,
    AssignmentPatternExpression, AssignmentPatternItem, AttributeInstance, AttributeSpec,
    BinaryExpression, BitSelect, BuiltinType, CastExpression, ClockingEventArgument,
    ConcatenationExpression, ConditionalExpression, ConditionalPattern, ConditionalPredicate,
    ConstraintBlock, ConstraintItem, DataType, DelayControl, DistConstraintList, DistItem,
    DistWeight, ElementSelect, ElementSelectExpression, EmptyArgument, EmptyQueueExpression,
    EventControl, EventControlWithExpression, EventExpression, Expression, ExpressionOrDist,
    ExpressionOptions, ExpressionPattern, IffEventClause, ImplicitEventControl, InsideExpression,
    IntegerVectorExpression, InvocationExpression, LiteralExpression, MatchesClause,
    MemberAccessExpression, MinTypMaxExpression, MultipleConcatenationExpression, Name,
    NameOptions, NamedArgument, NodeData, OpenRangeExpression, OpenRangeList, OrderedArgument,
    ParenExpressionList, ParenthesizedEventExpression, ParenthesizedExpression, Pattern,
    PostfixUnaryExpression, PrefixUnaryExpression, RangeSelect, RepeatedEventControl, Selector,
    SeparatedList, SignalEventExpression, SignedCastExpression, SimpleAssignmentPattern,
    StreamExpression, StreamExpressionWithRange, StreamingConcatenationExpression,
    StructuredAssignmentPattern, ReplicatedAssignmentPattern, SyntaxKind, TaggedUnionExpression,
    TaggedPattern, TimingControl, TimingControlExpression, Token, TokenKind, VariablePattern,
    WildcardPattern,
};
use svparse_core::arena::CompilationArena;
use svparse_core::intern::StringInterner;
use svparse_core::text::TextRange;
use svparse_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

use crate::precedence::{
    get_binary_kind, get_precedence, get_unary_prefix_kind, is_right_associative,
    CONDITIONAL_PRECEDENCE, UNARY_PRECEDENCE,
};
use crate::utilities::{
    is_builtin_type_keyword, is_edge_keyword, is_possible_argument, is_possible_expression,
    is_possible_open_range_element, is_recovery_boundary,
};

/// Maximum expression nesting depth. Exceeding it emits a diagnostic and
/// unwinds the current construct without aborting the parse.
pub const MAX_RECURSION_DEPTH: u32 = 200;

pub struct Parser<'a> {
    arena: &'a CompilationArena,
    interner: StringInterner,
    tokens: Vec<Token>,
    index: usize,
    diagnostics: DiagnosticCollection,
    recursion_depth: u32,
}

impl<'a> Parser<'a> {
    /// Tokenize a source string and set up a parser over it.
    pub fn new(arena: &'a CompilationArena, interner: &StringInterner, source: &str) -> Self {
        let mut diagnostics = DiagnosticCollection::new();
        let tokens = svparse_lexer::tokenize(source, interner, &mut diagnostics);
        Self {
            arena,
            interner: interner.clone(),
            tokens,
            index: 0,
            diagnostics,
            recursion_depth: 0,
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticCollection {
        self.diagnostics
    }

    pub fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::EndOfFile
    }

    /// Span covering the tokens that were not consumed by the parse.
    pub fn remaining_span(&self) -> svparse_core::text::TextSpan {
        let start = self.peek().range.pos;
        let end = self.tokens[self.tokens.len() - 1].range.end;
        TextRange::new(start, end.max(start)).to_span()
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    pub(crate) fn peek(&self) -> Token {
        self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_n(&self, offset: usize) -> Token {
        self.tokens[(self.index + offset).min(self.tokens.len() - 1)]
    }

    pub(crate) fn consume(&mut self) -> Token {
        let token = self.peek();
        if token.kind != TokenKind::EndOfFile {
            self.index += 1;
        }
        token
    }

    pub(crate) fn consume_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == kind {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Consume a token of the given kind, or synthesize a missing one and
    /// report a diagnostic. At most one diagnostic is emitted per position.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Token {
        if self.peek_kind() == kind {
            return self.consume();
        }
        let pos = self.peek().range.pos;
        if !self.diagnostics.has_diag_at(pos) {
            self.diagnostics.add(Diagnostic::with_span(
                TextRange::empty(pos).to_span(),
                &messages::EXPECTED_TOKEN,
                &[token_name(kind)],
            ));
        }
        Token::missing(kind, pos)
    }

    pub(crate) fn add_diag(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let pos = self.peek().range.pos;
        if !self.diagnostics.has_diag_at(pos) {
            self.diagnostics.add(Diagnostic::with_span(
                TextRange::empty(pos).to_span(),
                message,
                args,
            ));
        }
    }

    pub(crate) fn add_diag_at(&mut self, range: TextRange, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics
            .add(Diagnostic::with_span(range.to_span(), message, args));
    }

    pub(crate) fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.add(diagnostic);
    }

    // ------------------------------------------------------------------
    // Arena helpers
    // ------------------------------------------------------------------

    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    pub(crate) fn vec<T>(&self) -> BumpVec<'a, T> {
        BumpVec::new_in(self.arena.bump())
    }

    /// Depth guard for recursive entry points. Returns false once the
    /// nesting limit is reached so the caller can bail out of the current
    /// construct.
    pub(crate) fn enter(&mut self) -> bool {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.add_diag(&messages::MAX_RECURSION_DEPTH_EXCEEDED, &[]);
            return false;
        }
        true
    }

    pub(crate) fn exit(&mut self) {
        self.recursion_depth -= 1;
    }

    /// A placeholder expression used when nothing can be parsed at the
    /// current position; carries a missing identifier token.
    pub(crate) fn missing_expr(&mut self) -> &'a Expression<'a> {
        let pos = self.peek().range.pos;
        let token = Token::missing(TokenKind::Identifier, pos);
        self.alloc(Expression::Name(Name::Identifier(svparse_ast::IdentifierName {
            data: NodeData::new(SyntaxKind::IdentifierName, pos, pos),
            identifier: token,
        })))
    }

    // ------------------------------------------------------------------
    // Delimited list combinator
    // ------------------------------------------------------------------

    /// Parse a comma-separated list terminated by `close`. Unexpected tokens
    /// are skipped with a diagnostic; recovery stops at closing tokens and
    /// other construct boundaries. Returns the list and the closing token.
    pub(crate) fn parse_separated_list<T>(
        &mut self,
        close: TokenKind,
        allow_empty: bool,
        error: &'static DiagnosticMessage,
        is_possible: impl Fn(TokenKind) -> bool,
        mut parse_item: impl FnMut(&mut Self) -> T,
    ) -> (SeparatedList<'a, T>, Token) {
        let mut items = self.vec();
        let mut separators = self.vec();

        if self.peek_kind() == close {
            if !allow_empty {
                self.add_diag(error, &[]);
            }
            let close_token = self.consume();
            return (
                SeparatedList {
                    items: items.into_bump_slice(),
                    separators: separators.into_bump_slice(),
                },
                close_token,
            );
        }

        'outer: loop {
            let before = self.index;
            items.push(parse_item(self));
            loop {
                let kind = self.peek_kind();
                if kind == close {
                    break 'outer;
                }
                if kind == TokenKind::Comma {
                    separators.push(self.consume());
                    if self.peek_kind() == close {
                        if allow_empty {
                            // the item parser produces an empty placeholder
                            items.push(parse_item(self));
                        } else {
                            self.add_diag(error, &[]);
                        }
                        break 'outer;
                    }
                    continue 'outer;
                }
                if is_possible(kind) && self.index > before {
                    // two items with no separator between them
                    separators.push(self.expect(TokenKind::Comma));
                    continue 'outer;
                }
                if is_recovery_boundary(kind) {
                    break 'outer;
                }
                // skip a token we can't make sense of
                self.add_diag(error, &[]);
                self.consume();
                if self.peek_kind() == close {
                    break 'outer;
                }
            }
        }

        let close_token = self.expect(close);
        (
            SeparatedList {
                items: items.into_bump_slice(),
                separators: separators.into_bump_slice(),
            },
            close_token,
        )
    }

    // ------------------------------------------------------------------
    // Expression entry points
    // ------------------------------------------------------------------

    pub fn parse_expression(&mut self) -> &'a Expression<'a> {
        self.parse_sub_expression(ExpressionOptions::NONE, 0)
    }

    pub fn parse_expression_with(&mut self, options: ExpressionOptions) -> &'a Expression<'a> {
        self.parse_sub_expression(options, 0)
    }

    /// Parse an expression that may be a `min:typ:max` triple. Only legal
    /// inside parentheses and delay values.
    pub fn parse_min_typ_max(&mut self, options: ExpressionOptions) -> &'a Expression<'a> {
        let min = self.parse_sub_expression(options, 0);
        if self.peek_kind() != TokenKind::Colon {
            return min;
        }
        let colon1 = self.consume();
        let typ = self.parse_sub_expression(options, 0);
        let colon2 = self.expect(TokenKind::Colon);
        let max = self.parse_sub_expression(options, 0);
        let data = NodeData::new(
            SyntaxKind::MinTypMaxExpression,
            min.data().range.pos,
            max.data().range.end,
        );
        self.alloc(Expression::MinTypMax(MinTypMaxExpression {
            data,
            min,
            colon1,
            typ,
            colon2,
            max,
        }))
    }

    /// Parse an expression followed by an optional `dist` constraint list.
    pub fn parse_expression_or_dist(&mut self, options: ExpressionOptions) -> &'a Expression<'a> {
        let expr = self.parse_sub_expression(options, 0);
        if self.peek_kind() != TokenKind::DistKeyword {
            return expr;
        }
        let dist = self.parse_dist_constraint_list();
        let data = NodeData::new(
            SyntaxKind::ExpressionOrDist,
            expr.data().range.pos,
            dist.data.range.end,
        );
        self.alloc(Expression::ExpressionOrDist(ExpressionOrDist {
            data,
            expr,
            dist,
        }))
    }

    // ------------------------------------------------------------------
    // Subexpressions
    // ------------------------------------------------------------------

    pub(crate) fn parse_sub_expression(
        &mut self,
        options: ExpressionOptions,
        precedence: u8,
    ) -> &'a Expression<'a> {
        if !self.enter() {
            self.recursion_depth -= 1;
            return self.missing_expr();
        }
        let result = self.parse_sub_expression_inner(options, precedence);
        self.exit();
        result
    }

    fn parse_sub_expression_inner(
        &mut self,
        mut options: ExpressionOptions,
        precedence: u8,
    ) -> &'a Expression<'a> {
        let current = self.peek_kind();

        // A leading delay or event control prefixes the whole expression.
        if precedence == 0 && matches!(current, TokenKind::Hash | TokenKind::At) {
            let timing = self.parse_timing_control();
            let expr = self.parse_sub_expression(options, 0);
            let data = NodeData::new(
                SyntaxKind::TimingControlExpression,
                timing.data().range.pos,
                expr.data().range.end,
            );
            return self.alloc(Expression::TimingControlExpr(TimingControlExpression {
                data,
                timing,
                expr,
            }));
        }

        if current == TokenKind::TaggedKeyword {
            return self.parse_tagged_union_expression(options);
        }

        let left = if let Some(op_kind) = get_unary_prefix_kind(current) {
            let operator = self.consume();
            let attributes = self.parse_attributes();
            let operand = self.parse_sub_expression(options, UNARY_PRECEDENCE);
            let data = NodeData::new(op_kind, operator.range.pos, operand.data().range.end);
            self.alloc(Expression::Prefix(PrefixUnaryExpression {
                data,
                operator,
                attributes,
                operand,
            }))
        } else {
            let primary = self.parse_primary_expression(options);
            // A new or scoped-new operator stands alone; it does not
            // participate in postfix or binary parsing.
            if matches!(
                primary,
                Expression::NewClass(_) | Expression::NewArray(_) | Expression::CopyClass(_)
            ) {
                return primary;
            }
            self.parse_postfix_expression(primary, options)
        };

        // A super.new call is only valid as the very first primary.
        options.remove(ExpressionOptions::ALLOW_SUPER_NEW_CALL);

        self.parse_binary_tail(left, options, precedence)
    }

    /// The binary operator loop plus the conditional tail. Factored out so
    /// the sequence and property parsers can resume an expression after
    /// reinterpreting a parenthesized term.
    pub(crate) fn parse_binary_tail(
        &mut self,
        mut left: &'a Expression<'a>,
        mut options: ExpressionOptions,
        precedence: u8,
    ) -> &'a Expression<'a> {
        loop {
            let token = self.peek();
            let Some(mut op_kind) = get_binary_kind(token.kind) else {
                break;
            };

            // In a constraint block, implication belongs to the constraint
            // grammar, not the expression.
            if op_kind == SyntaxKind::LogicalImplicationExpression
                && options.contains(ExpressionOptions::CONSTRAINT_CONTEXT)
            {
                break;
            }

            // Only the first operator directly inside a procedural assignment
            // can be a nonblocking `<=`; any later one is a comparison.
            if op_kind == SyntaxKind::LessThanEqualExpression
                && options.contains(ExpressionOptions::PROCEDURAL_ASSIGNMENT_CONTEXT)
            {
                op_kind = SyntaxKind::NonblockingAssignmentExpression;
            }
            options.remove(ExpressionOptions::PROCEDURAL_ASSIGNMENT_CONTEXT);

            let new_precedence = get_precedence(op_kind);
            if new_precedence < precedence {
                break;
            }
            if new_precedence == precedence && !is_right_associative(op_kind) {
                break;
            }

            if op_kind == SyntaxKind::InsideExpression {
                let inside = self.consume();
                let ranges = self.parse_open_range_list();
                let data = NodeData::new(
                    SyntaxKind::InsideExpression,
                    left.data().range.pos,
                    ranges.data.range.end,
                );
                left = self.alloc(Expression::Inside(InsideExpression {
                    data,
                    expr: left,
                    inside,
                    ranges,
                }));
                continue;
            }

            let operator = self.consume();
            let attributes = self.parse_attributes();
            let right = self.parse_sub_expression(options, new_precedence);
            let data = NodeData::new(op_kind, left.data().range.pos, right.data().range.end);
            left = self.alloc(Expression::Binary(BinaryExpression {
                data,
                left,
                operator,
                attributes,
                right,
            }));
        }

        // A `matches` or `&&&` here may begin the predicate of a conditional,
        // but only if a `?` actually follows the full predicate; otherwise the
        // predicate belongs to an enclosing statement.
        if precedence < CONDITIONAL_PRECEDENCE
            && !options.contains(ExpressionOptions::PATTERN_CONTEXT)
        {
            let take_conditional = match self.peek_kind() {
                TokenKind::Question => true,
                TokenKind::MatchesKeyword | TokenKind::TripleAnd => {
                    self.predicate_has_question()
                }
                _ => false,
            };
            if take_conditional {
                left = self.parse_conditional_expression(left, options);
            }
        }

        left
    }

    fn parse_conditional_expression(
        &mut self,
        first: &'a Expression<'a>,
        options: ExpressionOptions,
    ) -> &'a Expression<'a> {
        let predicate = self.parse_conditional_predicate(first, options);
        let question = self.expect(TokenKind::Question);
        let attributes = self.parse_attributes();
        let when_true = self.parse_sub_expression(options, CONDITIONAL_PRECEDENCE - 1);
        let colon = self.expect(TokenKind::Colon);
        let when_false = self.parse_sub_expression(options, CONDITIONAL_PRECEDENCE - 1);
        let data = NodeData::new(
            SyntaxKind::ConditionalExpression,
            predicate.data.range.pos,
            when_false.data().range.end,
        );
        self.alloc(Expression::Conditional(ConditionalExpression {
            data,
            predicate,
            question,
            attributes,
            when_true,
            colon,
            when_false,
        }))
    }

    /// Build the `&&&`-separated predicate of a conditional, seeded with an
    /// already-parsed first expression.
    pub(crate) fn parse_conditional_predicate(
        &mut self,
        first: &'a Expression<'a>,
        options: ExpressionOptions,
    ) -> ConditionalPredicate<'a> {
        let mut conditions = self.vec();
        let mut separators = self.vec();
        conditions.push(self.parse_conditional_pattern_with(first));
        while let Some(sep) = self.consume_if(TokenKind::TripleAnd) {
            separators.push(sep);
            let expr =
                self.parse_sub_expression(options | ExpressionOptions::PATTERN_CONTEXT, 0);
            conditions.push(self.parse_conditional_pattern_with(expr));
        }
        let conditions = conditions.into_bump_slice();
        let pos = conditions[0].data.range.pos;
        let end = conditions[conditions.len() - 1].data.range.end;
        ConditionalPredicate {
            data: NodeData::new(SyntaxKind::ConditionalPredicate, pos, end),
            conditions: SeparatedList {
                items: conditions,
                separators: separators.into_bump_slice(),
            },
        }
    }

    fn parse_conditional_pattern_with(
        &mut self,
        expr: &'a Expression<'a>,
    ) -> ConditionalPattern<'a> {
        let matches_clause = if self.peek_kind() == TokenKind::MatchesKeyword {
            let matches = self.consume();
            let pattern = self.parse_pattern();
            let data = NodeData::new(
                SyntaxKind::MatchesClause,
                matches.range.pos,
                pattern.data().range.end,
            );
            Some(MatchesClause {
                data,
                matches,
                pattern,
            })
        } else {
            None
        };
        let pos = expr.data().range.pos;
        let end = matches_clause
            .as_ref()
            .map(|c| c.data.range.end)
            .unwrap_or(expr.data().range.end);
        ConditionalPattern {
            data: NodeData::new(SyntaxKind::ConditionalPattern, pos, end),
            expr,
            matches_clause,
        }
    }

    // ------------------------------------------------------------------
    // Patterns
    // ------------------------------------------------------------------

    pub fn parse_pattern(&mut self) -> &'a Pattern<'a> {
        match self.peek_kind() {
            TokenKind::DotStar => {
                let dot_star = self.consume();
                self.alloc(Pattern::Wildcard(WildcardPattern {
                    data: NodeData::new(
                        SyntaxKind::WildcardPattern,
                        dot_star.range.pos,
                        dot_star.range.end,
                    ),
                    dot_star,
                }))
            }
            TokenKind::Dot => {
                let dot = self.consume();
                let identifier = self.expect(TokenKind::Identifier);
                self.alloc(Pattern::Variable(VariablePattern {
                    data: NodeData::new(
                        SyntaxKind::VariablePattern,
                        dot.range.pos,
                        identifier.range.end,
                    ),
                    dot,
                    identifier,
                }))
            }
            TokenKind::TaggedKeyword => {
                let tagged = self.consume();
                let name = self.expect(TokenKind::Identifier);
                self.alloc(Pattern::Tagged(TaggedPattern {
                    data: NodeData::new(
                        SyntaxKind::TaggedPattern,
                        tagged.range.pos,
                        name.range.end,
                    ),
                    tagged,
                    name,
                    pattern: None,
                }))
            }
            _ => {
                let expr =
                    self.parse_sub_expression(ExpressionOptions::PATTERN_CONTEXT, 0);
                self.alloc(Pattern::Expression(ExpressionPattern {
                    data: NodeData::new(
                        SyntaxKind::ExpressionPattern,
                        expr.data().range.pos,
                        expr.data().range.end,
                    ),
                    expr,
                }))
            }
        }
    }

    // ------------------------------------------------------------------
    // Primary expressions
    // ------------------------------------------------------------------

    pub(crate) fn parse_primary_expression(
        &mut self,
        options: ExpressionOptions,
    ) -> &'a Expression<'a> {
        use TokenKind::*;
        match self.peek_kind() {
            StringLiteral => self.parse_literal(SyntaxKind::StringLiteralExpression),
            UnbasedUnsizedLiteral => {
                self.parse_literal(SyntaxKind::UnbasedUnsizedLiteralExpression)
            }
            RealLiteral => self.parse_literal(SyntaxKind::RealLiteralExpression),
            TimeLiteral => self.parse_literal(SyntaxKind::TimeLiteralExpression),
            OneStep => self.parse_literal(SyntaxKind::OneStepLiteralExpression),
            NullKeyword => self.parse_literal(SyntaxKind::NullLiteralExpression),
            Dollar => self.parse_literal(SyntaxKind::WildcardLiteralExpression),
            DefaultKeyword => self.parse_literal(SyntaxKind::DefaultPatternKeyExpression),
            IntegerLiteral => {
                if self.peek_n(1).kind == IntegerBase
                    && !options.contains(ExpressionOptions::DISALLOW_VECTORS)
                {
                    let size = self.consume();
                    self.parse_integer_vector(Some(size))
                } else {
                    self.parse_literal(SyntaxKind::IntegerLiteralExpression)
                }
            }
            IntegerBase => {
                if options.contains(ExpressionOptions::DISALLOW_VECTORS) {
                    self.add_diag(&messages::EXPECTED_VECTOR_LITERAL, &[]);
                }
                self.parse_integer_vector(None)
            }
            OpenParenthesis => {
                let open_paren = self.consume();
                let expression = self.parse_min_typ_max(options);
                let close_paren = self.expect(CloseParenthesis);
                let data = NodeData::new(
                    SyntaxKind::ParenthesizedExpression,
                    open_paren.range.pos,
                    close_paren.range.end,
                );
                self.alloc(Expression::Parenthesized(ParenthesizedExpression {
                    data,
                    open_paren,
                    expression,
                    close_paren,
                }))
            }
            OpenBrace => self.parse_concatenation_or_stream(options),
            ApostropheOpenBrace => self.parse_assignment_pattern_expression(None),
            SignedKeyword | UnsignedKeyword | ConstKeyword => {
                let signing = self.consume();
                let apostrophe = self.expect(Apostrophe);
                let inner = self.parse_cast_parenthesized(options);
                let data = NodeData::new(
                    SyntaxKind::SignedCastExpression,
                    signing.range.pos,
                    inner.data.range.end,
                );
                self.alloc(Expression::SignedCast(SignedCastExpression {
                    data,
                    signing,
                    apostrophe,
                    inner,
                }))
            }
            kind if is_builtin_type_keyword(kind).is_some() => self.parse_data_type_primary(),
            _ => self.parse_name_primary(options),
        }
    }

    fn parse_literal(&mut self, kind: SyntaxKind) -> &'a Expression<'a> {
        let literal = self.consume();
        self.alloc(Expression::Literal(LiteralExpression {
            data: NodeData::new(kind, literal.range.pos, literal.range.end),
            literal,
        }))
    }

    fn parse_integer_vector(&mut self, size: Option<Token>) -> &'a Expression<'a> {
        let base = self.expect(TokenKind::IntegerBase);
        let value = self.expect(TokenKind::IntegerLiteral);
        let pos = size.map(|t| t.range.pos).unwrap_or(base.range.pos);
        self.alloc(Expression::IntegerVector(IntegerVectorExpression {
            data: NodeData::new(SyntaxKind::IntegerVectorExpression, pos, value.range.end),
            size,
            base,
            value,
        }))
    }

    fn parse_cast_parenthesized(
        &mut self,
        options: ExpressionOptions,
    ) -> &'a ParenthesizedExpression<'a> {
        let open_paren = self.expect(TokenKind::OpenParenthesis);
        let expression = self.parse_min_typ_max(options);
        let close_paren = self.expect(TokenKind::CloseParenthesis);
        let data = NodeData::new(
            SyntaxKind::ParenthesizedExpression,
            open_paren.range.pos,
            close_paren.range.end,
        );
        self.alloc(ParenthesizedExpression {
            data,
            open_paren,
            expression,
            close_paren,
        })
    }

    fn parse_data_type_primary(&mut self) -> &'a Expression<'a> {
        let kind = is_builtin_type_keyword(self.peek_kind())
            .unwrap_or(SyntaxKind::Unknown);
        let keyword = self.consume();
        let signing = if matches!(
            self.peek_kind(),
            TokenKind::SignedKeyword | TokenKind::UnsignedKeyword
        ) {
            Some(self.consume())
        } else {
            None
        };
        let mut dimensions = self.vec();
        while self.peek_kind() == TokenKind::OpenBracket {
            dimensions.push(self.parse_element_select());
        }
        let dimensions = dimensions.into_bump_slice();
        let end = dimensions
            .last()
            .map(|d| d.data.range.end)
            .or(signing.map(|t| t.range.end))
            .unwrap_or(keyword.range.end);
        let data_type = DataType::Builtin(BuiltinType {
            data: NodeData::new(kind, keyword.range.pos, end),
            keyword,
            signing,
            dimensions,
        });
        // A type name directly followed by '{ is an assignment pattern.
        if self.peek_kind() == TokenKind::ApostropheOpenBrace {
            let type_ = self.alloc(data_type);
            return self.parse_assignment_pattern_expression(Some(type_));
        }
        self.alloc(Expression::DataType(data_type))
    }

    fn parse_name_primary(&mut self, options: ExpressionOptions) -> &'a Expression<'a> {
        let mut name_options = NameOptions::EXPECTING_EXPRESSION;
        if options.contains(ExpressionOptions::SEQUENCE_EXPR) {
            name_options |= NameOptions::SEQUENCE_EXPR;
        }
        let name = self.parse_name_with(name_options);
        if Self::is_new_expr(&name) {
            return self.parse_new_expression(name, options);
        }
        // A named type directly followed by '{ is an assignment pattern.
        if self.peek_kind() == TokenKind::ApostropheOpenBrace {
            let type_ = self.alloc(DataType::Named(name));
            return self.parse_assignment_pattern_expression(Some(type_));
        }
        self.alloc(Expression::Name(name))
    }

    fn parse_tagged_union_expression(
        &mut self,
        options: ExpressionOptions,
    ) -> &'a Expression<'a> {
        let tagged = self.consume();
        let member = self.expect(TokenKind::Identifier);
        let expr = if is_possible_expression(self.peek_kind())
            && get_unary_prefix_kind(self.peek_kind()).is_none()
        {
            Some(self.parse_primary_expression(options))
        } else {
            None
        };
        let end = expr
            .map(|e| e.data().range.end)
            .unwrap_or(member.range.end);
        self.alloc(Expression::TaggedUnion(TaggedUnionExpression {
            data: NodeData::new(SyntaxKind::TaggedUnionExpression, tagged.range.pos, end),
            tagged,
            member,
            expr,
        }))
    }

    // ------------------------------------------------------------------
    // Postfix expressions
    // ------------------------------------------------------------------

    pub(crate) fn parse_postfix_expression(
        &mut self,
        mut expr: &'a Expression<'a>,
        options: ExpressionOptions,
    ) -> &'a Expression<'a> {
        loop {
            match self.peek_kind() {
                TokenKind::OpenBracket => {
                    if options.contains(ExpressionOptions::SEQUENCE_EXPR)
                        && self.is_sequence_repetition()
                    {
                        break;
                    }
                    let select = self.parse_element_select();
                    let data = NodeData::new(
                        SyntaxKind::ElementSelectExpression,
                        expr.data().range.pos,
                        select.data.range.end,
                    );
                    expr = self.alloc(Expression::ElementSelect(ElementSelectExpression {
                        data,
                        value: expr,
                        select,
                    }));
                }
                TokenKind::Dot => {
                    let dot = self.consume();
                    let name = self.expect(TokenKind::Identifier);
                    let data = NodeData::new(
                        SyntaxKind::MemberAccessExpression,
                        expr.data().range.pos,
                        name.range.end,
                    );
                    expr = self.alloc(Expression::MemberAccess(MemberAccessExpression {
                        data,
                        value: expr,
                        dot,
                        name,
                    }));
                }
                TokenKind::OpenParenthesis => {
                    let allow_clocking = matches!(expr, Expression::Name(Name::System(_)));
                    let arguments = self.parse_argument_list(false, allow_clocking);
                    let data = NodeData::new(
                        SyntaxKind::InvocationExpression,
                        expr.data().range.pos,
                        arguments.data.range.end,
                    );
                    expr = self.alloc(Expression::Invocation(InvocationExpression {
                        data,
                        left: expr,
                        attributes: &[],
                        arguments: Some(arguments),
                    }));
                }
                TokenKind::DoublePlus | TokenKind::DoubleMinus => {
                    expr = self.parse_postfix_increment(expr, &[]);
                }
                TokenKind::Apostrophe => {
                    let apostrophe = self.consume();
                    let inner = self.parse_cast_parenthesized(options);
                    let data = NodeData::new(
                        SyntaxKind::CastExpression,
                        expr.data().range.pos,
                        inner.data.range.end,
                    );
                    expr = self.alloc(Expression::Cast(CastExpression {
                        data,
                        left: expr,
                        apostrophe,
                        inner,
                    }));
                }
                TokenKind::OpenParenthesisStar => {
                    let attributes = self.parse_attributes();
                    match self.peek_kind() {
                        TokenKind::OpenParenthesis => {
                            let arguments = self.parse_argument_list(false, false);
                            let data = NodeData::new(
                                SyntaxKind::InvocationExpression,
                                expr.data().range.pos,
                                arguments.data.range.end,
                            );
                            expr = self.alloc(Expression::Invocation(InvocationExpression {
                                data,
                                left: expr,
                                attributes,
                                arguments: Some(arguments),
                            }));
                        }
                        TokenKind::DoublePlus | TokenKind::DoubleMinus => {
                            expr = self.parse_postfix_increment(expr, attributes);
                        }
                        _ => {
                            // Attributes with nothing after them decorate a
                            // call with no argument list.
                            let end = attributes
                                .last()
                                .map(|a| a.data.range.end)
                                .unwrap_or(expr.data().range.end);
                            let data = NodeData::new(
                                SyntaxKind::InvocationExpression,
                                expr.data().range.pos,
                                end,
                            );
                            expr = self.alloc(Expression::Invocation(InvocationExpression {
                                data,
                                left: expr,
                                attributes,
                                arguments: None,
                            }));
                        }
                    }
                }
                TokenKind::WithKeyword => {
                    // `with [` belongs to an enclosing stream expression.
                    match self.peek_n(1).kind {
                        TokenKind::OpenParenthesis | TokenKind::OpenBrace => {
                            expr = self.parse_array_or_randomize_method(expr);
                        }
                        _ => break,
                    }
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_postfix_increment(
        &mut self,
        operand: &'a Expression<'a>,
        attributes: &'a [AttributeInstance<'a>],
    ) -> &'a Expression<'a> {
        let operator = self.consume();
        let kind = if operator.kind == TokenKind::DoublePlus {
            SyntaxKind::PostincrementExpression
        } else {
            SyntaxKind::PostdecrementExpression
        };
        let data = NodeData::new(kind, operand.data().range.pos, operator.range.end);
        self.alloc(Expression::Postfix(PostfixUnaryExpression {
            data,
            operand,
            attributes,
            operator,
        }))
    }

    fn parse_array_or_randomize_method(
        &mut self,
        left: &'a Expression<'a>,
    ) -> &'a Expression<'a> {
        let with = self.consume();
        let args = if self.peek_kind() == TokenKind::OpenParenthesis {
            let open_paren = self.consume();
            let (items, close_paren) = self.parse_separated_list(
                TokenKind::CloseParenthesis,
                true,
                &messages::EXPECTED_EXPRESSION,
                is_possible_expression,
                |p| p.parse_expression(),
            );
            Some(ParenExpressionList {
                data: NodeData::new(
                    SyntaxKind::ParenExpressionList,
                    open_paren.range.pos,
                    close_paren.range.end,
                ),
                open_paren,
                items,
                close_paren,
            })
        } else {
            None
        };
        let constraints = if self.peek_kind() == TokenKind::OpenBrace {
            Some(self.parse_constraint_block())
        } else {
            None
        };
        let end = constraints
            .as_ref()
            .map(|c| c.data.range.end)
            .or(args.as_ref().map(|a| a.data.range.end))
            .unwrap_or(with.range.end);
        let data = NodeData::new(
            SyntaxKind::ArrayOrRandomizeMethodExpression,
            left.data().range.pos,
            end,
        );
        self.alloc(Expression::ArrayOrRandomizeMethod(
            ArrayOrRandomizeMethodExpression {
                data,
                left,
                with,
                args,
                constraints,
            },
        ))
    }

    // ------------------------------------------------------------------
    // Selects
    // ------------------------------------------------------------------

    /// Whether the `[` at the cursor starts a sequence repetition rather
    /// than an element select.
    pub(crate) fn is_sequence_repetition(&self) -> bool {
        matches!(
            self.peek_n(1).kind,
            TokenKind::Star | TokenKind::Plus | TokenKind::Equals | TokenKind::MinusArrow
        )
    }

    pub(crate) fn parse_element_select(&mut self) -> ElementSelect<'a> {
        let open_bracket = self.expect(TokenKind::OpenBracket);
        let selector = if self.peek_kind() == TokenKind::CloseBracket {
            None
        } else {
            Some(self.parse_selector())
        };
        let close_bracket = self.expect(TokenKind::CloseBracket);
        ElementSelect {
            data: NodeData::new(
                SyntaxKind::ElementSelect,
                open_bracket.range.pos,
                close_bracket.range.end,
            ),
            open_bracket,
            selector,
            close_bracket,
        }
    }

    pub(crate) fn parse_selector(&mut self) -> &'a Selector<'a> {
        let expr = self.parse_expression();
        let kind = match self.peek_kind() {
            TokenKind::Colon => SyntaxKind::SimpleRangeSelect,
            TokenKind::PlusColon => SyntaxKind::AscendingRangeSelect,
            TokenKind::MinusColon => SyntaxKind::DescendingRangeSelect,
            _ => {
                return self.alloc(Selector::Bit(BitSelect {
                    data: NodeData::new(
                        SyntaxKind::BitSelect,
                        expr.data().range.pos,
                        expr.data().range.end,
                    ),
                    expr,
                }));
            }
        };
        let range = self.consume();
        let right = self.parse_expression();
        self.alloc(Selector::Range(RangeSelect {
            data: NodeData::new(kind, expr.data().range.pos, right.data().range.end),
            left: expr,
            range,
            right,
        }))
    }

    // ------------------------------------------------------------------
    // Concatenations and streams
    // ------------------------------------------------------------------

    fn parse_concatenation_or_stream(
        &mut self,
        options: ExpressionOptions,
    ) -> &'a Expression<'a> {
        let open_brace = self.consume();

        if self.peek_kind() == TokenKind::CloseBrace {
            let close_brace = self.consume();
            return self.alloc(Expression::EmptyQueue(EmptyQueueExpression {
                data: NodeData::new(
                    SyntaxKind::EmptyQueueExpression,
                    open_brace.range.pos,
                    close_brace.range.end,
                ),
                open_brace,
                close_brace,
            }));
        }

        if matches!(self.peek_kind(), TokenKind::LeftShift | TokenKind::RightShift) {
            return self.parse_streaming_concatenation(open_brace, options);
        }

        let first = self.parse_sub_expression(options, 0);
        if self.peek_kind() == TokenKind::OpenBrace {
            // {count{a, b}} replication
            let concatenation = self.parse_concatenation_body(options);
            let close_brace = self.expect(TokenKind::CloseBrace);
            let data = NodeData::new(
                SyntaxKind::MultipleConcatenationExpression,
                open_brace.range.pos,
                close_brace.range.end,
            );
            return self.alloc(Expression::MultipleConcatenation(
                MultipleConcatenationExpression {
                    data,
                    open_brace,
                    expression: first,
                    concatenation,
                    close_brace,
                },
            ));
        }

        let (expressions, close_brace) =
            self.parse_seeded_expression_list(first, TokenKind::CloseBrace, options);
        let data = NodeData::new(
            SyntaxKind::ConcatenationExpression,
            open_brace.range.pos,
            close_brace.range.end,
        );
        self.alloc(Expression::Concatenation(ConcatenationExpression {
            data,
            open_brace,
            expressions,
            close_brace,
        }))
    }

    fn parse_concatenation_body(
        &mut self,
        options: ExpressionOptions,
    ) -> &'a ConcatenationExpression<'a> {
        let open_brace = self.expect(TokenKind::OpenBrace);
        let (expressions, close_brace) = self.parse_separated_list(
            TokenKind::CloseBrace,
            false,
            &messages::EXPECTED_EXPRESSION,
            is_possible_expression,
            |p| p.parse_sub_expression(options, 0),
        );
        self.alloc(ConcatenationExpression {
            data: NodeData::new(
                SyntaxKind::ConcatenationExpression,
                open_brace.range.pos,
                close_brace.range.end,
            ),
            open_brace,
            expressions,
            close_brace,
        })
    }

    /// Continue a comma-separated expression list whose first item is
    /// already parsed.
    fn parse_seeded_expression_list(
        &mut self,
        first: &'a Expression<'a>,
        close: TokenKind,
        options: ExpressionOptions,
    ) -> (SeparatedList<'a, &'a Expression<'a>>, Token) {
        let mut items = self.vec();
        let mut separators = self.vec();
        items.push(first);
        loop {
            let kind = self.peek_kind();
            if kind == close {
                break;
            }
            if kind == TokenKind::Comma {
                separators.push(self.consume());
                items.push(self.parse_sub_expression(options, 0));
                continue;
            }
            if is_possible_expression(kind) {
                separators.push(self.expect(TokenKind::Comma));
                items.push(self.parse_sub_expression(options, 0));
                continue;
            }
            if is_recovery_boundary(kind) {
                break;
            }
            self.add_diag(&messages::EXPECTED_EXPRESSION, &[]);
            self.consume();
        }
        let close_token = self.expect(close);
        (
            SeparatedList {
                items: items.into_bump_slice(),
                separators: separators.into_bump_slice(),
            },
            close_token,
        )
    }

    fn parse_streaming_concatenation(
        &mut self,
        open_brace: Token,
        options: ExpressionOptions,
    ) -> &'a Expression<'a> {
        let operator = self.consume();
        let slice_size = if self.peek_kind() != TokenKind::OpenBrace {
            Some(self.parse_sub_expression(options, 0))
        } else {
            None
        };
        let inner_open_brace = self.expect(TokenKind::OpenBrace);
        let (expressions, inner_close_brace) = self.parse_separated_list(
            TokenKind::CloseBrace,
            false,
            &messages::EXPECTED_STREAM_EXPRESSION,
            is_possible_expression,
            |p| p.parse_stream_expression(),
        );
        let close_brace = self.expect(TokenKind::CloseBrace);
        let data = NodeData::new(
            SyntaxKind::StreamingConcatenationExpression,
            open_brace.range.pos,
            close_brace.range.end,
        );
        self.alloc(Expression::StreamingConcatenation(
            StreamingConcatenationExpression {
                data,
                open_brace,
                operator,
                slice_size,
                inner_open_brace,
                expressions,
                inner_close_brace,
                close_brace,
            },
        ))
    }

    fn parse_stream_expression(&mut self) -> StreamExpression<'a> {
        let expression = self.parse_expression();
        let with_range = if self.peek_kind() == TokenKind::WithKeyword
            && self.peek_n(1).kind == TokenKind::OpenBracket
        {
            let with = self.consume();
            let range = self.parse_element_select();
            let data = NodeData::new(
                SyntaxKind::StreamExpressionWithRange,
                with.range.pos,
                range.data.range.end,
            );
            Some(StreamExpressionWithRange { data, with, range })
        } else {
            None
        };
        let pos = expression.data().range.pos;
        let end = with_range
            .as_ref()
            .map(|w| w.data.range.end)
            .unwrap_or(expression.data().range.end);
        StreamExpression {
            data: NodeData::new(SyntaxKind::StreamExpression, pos, end),
            expression,
            with_range,
        }
    }

    // ------------------------------------------------------------------
    // Assignment patterns
    // ------------------------------------------------------------------

    pub(crate) fn parse_assignment_pattern_expression(
        &mut self,
        type_: Option<&'a DataType<'a>>,
    ) -> &'a Expression<'a> {
        let open_brace = self.expect(TokenKind::ApostropheOpenBrace);

        if self.peek_kind() == TokenKind::CloseBrace {
            let open_range = open_brace.range;
            self.add_diag_at(open_range, &messages::EMPTY_ASSIGNMENT_PATTERN, &[]);
            let close_brace = self.consume();
            let pattern = AssignmentPattern::Simple(SimpleAssignmentPattern {
                data: NodeData::new(
                    SyntaxKind::SimpleAssignmentPattern,
                    open_brace.range.pos,
                    close_brace.range.end,
                ),
                open_brace,
                items: SeparatedList::empty(),
                close_brace,
            });
            return self.finish_assignment_pattern(type_, pattern);
        }

        let first = self.parse_expression();
        let pattern = match self.peek_kind() {
            TokenKind::Colon => self.parse_structured_pattern(open_brace, first),
            TokenKind::OpenBrace => self.parse_replicated_pattern(open_brace, first),
            _ => {
                // A comma, a close brace, or anything else: simple pattern,
                // with a forced separator on malformed input.
                let (items, close_brace) = self.parse_seeded_expression_list(
                    first,
                    TokenKind::CloseBrace,
                    ExpressionOptions::NONE,
                );
                AssignmentPattern::Simple(SimpleAssignmentPattern {
                    data: NodeData::new(
                        SyntaxKind::SimpleAssignmentPattern,
                        open_brace.range.pos,
                        close_brace.range.end,
                    ),
                    open_brace,
                    items,
                    close_brace,
                })
            }
        };
        self.finish_assignment_pattern(type_, pattern)
    }

    fn finish_assignment_pattern(
        &mut self,
        type_: Option<&'a DataType<'a>>,
        pattern: AssignmentPattern<'a>,
    ) -> &'a Expression<'a> {
        let pos = type_
            .map(|t| t.data().range.pos)
            .unwrap_or(pattern.data().range.pos);
        let data = NodeData::new(
            SyntaxKind::AssignmentPatternExpression,
            pos,
            pattern.data().range.end,
        );
        self.alloc(Expression::AssignmentPattern(AssignmentPatternExpression {
            data,
            type_,
            pattern,
        }))
    }

    fn parse_structured_pattern(
        &mut self,
        open_brace: Token,
        first_key: &'a Expression<'a>,
    ) -> AssignmentPattern<'a> {
        let mut items = self.vec();
        let mut separators = self.vec();
        items.push(self.parse_pattern_item_with_key(first_key));
        loop {
            let kind = self.peek_kind();
            if kind == TokenKind::CloseBrace {
                break;
            }
            if kind == TokenKind::Comma {
                separators.push(self.consume());
            } else if is_possible_expression(kind) {
                separators.push(self.expect(TokenKind::Comma));
            } else if is_recovery_boundary(kind) {
                break;
            } else {
                self.add_diag(&messages::EXPECTED_ASSIGNMENT_KEY, &[]);
                self.consume();
                continue;
            }
            let key = self.parse_expression();
            items.push(self.parse_pattern_item_with_key(key));
        }
        let close_brace = self.expect(TokenKind::CloseBrace);
        AssignmentPattern::Structured(StructuredAssignmentPattern {
            data: NodeData::new(
                SyntaxKind::StructuredAssignmentPattern,
                open_brace.range.pos,
                close_brace.range.end,
            ),
            open_brace,
            items: SeparatedList {
                items: items.into_bump_slice(),
                separators: separators.into_bump_slice(),
            },
            close_brace,
        })
    }

    fn parse_pattern_item_with_key(
        &mut self,
        key: &'a Expression<'a>,
    ) -> AssignmentPatternItem<'a> {
        let colon = self.expect(TokenKind::Colon);
        let value = self.parse_expression();
        AssignmentPatternItem {
            data: NodeData::new(
                SyntaxKind::AssignmentPatternItem,
                key.data().range.pos,
                value.data().range.end,
            ),
            key,
            colon,
            value,
        }
    }

    fn parse_replicated_pattern(
        &mut self,
        open_brace: Token,
        count: &'a Expression<'a>,
    ) -> AssignmentPattern<'a> {
        let inner_open_brace = self.consume();
        let (items, inner_close_brace) = self.parse_separated_list(
            TokenKind::CloseBrace,
            false,
            &messages::EXPECTED_EXPRESSION,
            is_possible_expression,
            |p| p.parse_expression(),
        );
        let close_brace = self.expect(TokenKind::CloseBrace);
        AssignmentPattern::Replicated(ReplicatedAssignmentPattern {
            data: NodeData::new(
                SyntaxKind::ReplicatedAssignmentPattern,
                open_brace.range.pos,
                close_brace.range.end,
            ),
            open_brace,
            count,
            inner_open_brace,
            items,
            inner_close_brace,
            close_brace,
        })
    }

    // ------------------------------------------------------------------
    // Open ranges and dist constraints
    // ------------------------------------------------------------------

    pub(crate) fn parse_open_range_list(&mut self) -> OpenRangeList<'a> {
        let open_brace = self.expect(TokenKind::OpenBrace);
        let (items, close_brace) = self.parse_separated_list(
            TokenKind::CloseBrace,
            false,
            &messages::EXPECTED_OPEN_RANGE_ELEMENT,
            is_possible_open_range_element,
            |p| p.parse_open_range_element(),
        );
        OpenRangeList {
            data: NodeData::new(
                SyntaxKind::OpenRangeList,
                open_brace.range.pos,
                close_brace.range.end,
            ),
            open_brace,
            items,
            close_brace,
        }
    }

    pub(crate) fn parse_open_range_element(&mut self) -> &'a Expression<'a> {
        if self.peek_kind() != TokenKind::OpenBracket {
            return self.parse_expression();
        }
        let open_bracket = self.consume();
        let left = self.parse_expression();
        let colon = self.expect(TokenKind::Colon);
        let right = self.parse_expression();
        let close_bracket = self.expect(TokenKind::CloseBracket);
        self.alloc(Expression::OpenRange(OpenRangeExpression {
            data: NodeData::new(
                SyntaxKind::OpenRangeExpression,
                open_bracket.range.pos,
                close_bracket.range.end,
            ),
            open_bracket,
            left,
            colon,
            right,
            close_bracket,
        }))
    }

    pub(crate) fn parse_dist_constraint_list(&mut self) -> DistConstraintList<'a> {
        let dist = self.expect(TokenKind::DistKeyword);
        let open_brace = self.expect(TokenKind::OpenBrace);
        let (items, close_brace) = self.parse_separated_list(
            TokenKind::CloseBrace,
            false,
            &messages::EXPECTED_DIST_ITEM,
            is_possible_open_range_element,
            |p| p.parse_dist_item(),
        );
        DistConstraintList {
            data: NodeData::new(
                SyntaxKind::DistConstraintList,
                dist.range.pos,
                close_brace.range.end,
            ),
            dist,
            open_brace,
            items,
            close_brace,
        }
    }

    fn parse_dist_item(&mut self) -> DistItem<'a> {
        let value = self.parse_open_range_element();
        let weight = if matches!(
            self.peek_kind(),
            TokenKind::ColonEquals | TokenKind::ColonSlash
        ) {
            let op = self.consume();
            let expr = self.parse_expression();
            Some(DistWeight {
                data: NodeData::new(
                    SyntaxKind::DistItem,
                    op.range.pos,
                    expr.data().range.end,
                ),
                op,
                expr,
            })
        } else {
            None
        };
        let pos = value.data().range.pos;
        let end = weight
            .as_ref()
            .map(|w| w.data.range.end)
            .unwrap_or(value.data().range.end);
        DistItem {
            data: NodeData::new(SyntaxKind::DistItem, pos, end),
            value,
            weight,
        }
    }

    /// Parse a `{ constraint; ... }` block attached to a randomize call.
    pub(crate) fn parse_constraint_block(&mut self) -> ConstraintBlock<'a> {
        let open_brace = self.expect(TokenKind::OpenBrace);
        let mut items = self.vec();
        while !matches!(
            self.peek_kind(),
            TokenKind::CloseBrace | TokenKind::EndOfFile
        ) {
            if !is_possible_expression(self.peek_kind()) {
                self.add_diag(&messages::EXPECTED_CONSTRAINT_ITEM, &[]);
                self.consume();
                continue;
            }
            let expr = self.parse_expression_or_dist(ExpressionOptions::CONSTRAINT_CONTEXT);
            let implication = if self.peek_kind() == TokenKind::MinusArrow {
                let arrow = self.consume();
                let right =
                    self.parse_expression_with(ExpressionOptions::CONSTRAINT_CONTEXT);
                Some((arrow, right))
            } else {
                None
            };
            let semi = self.expect(TokenKind::Semicolon);
            let kind = if implication.is_some() {
                SyntaxKind::ImplicationConstraint
            } else {
                SyntaxKind::ExpressionConstraint
            };
            items.push(ConstraintItem {
                data: NodeData::new(kind, expr.data().range.pos, semi.range.end),
                expr,
                implication,
                semi,
            });
        }
        let close_brace = self.expect(TokenKind::CloseBrace);
        ConstraintBlock {
            data: NodeData::new(
                SyntaxKind::ConstraintBlock,
                open_brace.range.pos,
                close_brace.range.end,
            ),
            open_brace,
            items: items.into_bump_slice(),
            close_brace,
        }
    }

    // ------------------------------------------------------------------
    // Arguments and attributes
    // ------------------------------------------------------------------

    /// `is_param_assignment` marks a `#(...)` parameter list: empty items are
    /// not allowed there, and values are parsed as min:typ:max. Clocking
    /// event arguments are only legal in system function calls.
    pub(crate) fn parse_argument_list(
        &mut self,
        is_param_assignment: bool,
        allow_clocking: bool,
    ) -> ArgumentList<'a> {
        let open_paren = self.expect(TokenKind::OpenParenthesis);
        let (args, close_paren) = self.parse_separated_list(
            TokenKind::CloseParenthesis,
            !is_param_assignment,
            &messages::EXPECTED_ARGUMENT,
            is_possible_argument,
            |p| p.parse_argument(is_param_assignment, allow_clocking),
        );
        ArgumentList {
            data: NodeData::new(
                SyntaxKind::ArgumentList,
                open_paren.range.pos,
                close_paren.range.end,
            ),
            open_paren,
            args,
            close_paren,
        }
    }

    fn parse_argument(&mut self, is_param_assignment: bool, allow_clocking: bool) -> Argument<'a> {
        match self.peek_kind() {
            TokenKind::Dot => {
                let dot = self.consume();
                let name = self.expect(TokenKind::Identifier);
                let (open_paren, expr, close_paren) =
                    if self.peek_kind() == TokenKind::OpenParenthesis {
                        let open = self.consume();
                        let expr = if self.peek_kind() == TokenKind::CloseParenthesis {
                            None
                        } else if is_param_assignment {
                            Some(self.parse_min_typ_max(ExpressionOptions::NONE))
                        } else {
                            Some(self.parse_expression())
                        };
                        let close = self.expect(TokenKind::CloseParenthesis);
                        (Some(open), expr, Some(close))
                    } else {
                        (None, None, None)
                    };
                let end = close_paren.map(|t| t.range.end).unwrap_or(name.range.end);
                Argument::Named(NamedArgument {
                    data: NodeData::new(SyntaxKind::NamedArgument, dot.range.pos, end),
                    dot,
                    name,
                    open_paren,
                    expr,
                    close_paren,
                })
            }
            TokenKind::Comma | TokenKind::CloseParenthesis if !is_param_assignment => {
                let pos = self.peek().range.pos;
                Argument::Empty(EmptyArgument {
                    data: NodeData::new(SyntaxKind::EmptyArgument, pos, pos),
                })
            }
            TokenKind::At if allow_clocking => {
                let timing = self.parse_timing_control();
                Argument::ClockingEvent(ClockingEventArgument {
                    data: NodeData::new(
                        SyntaxKind::ClockingEventArgument,
                        timing.data().range.pos,
                        timing.data().range.end,
                    ),
                    timing,
                })
            }
            _ => {
                let expr = if is_param_assignment {
                    self.parse_min_typ_max(ExpressionOptions::NONE)
                } else {
                    self.parse_expression()
                };
                Argument::Ordered(OrderedArgument {
                    data: NodeData::new(
                        SyntaxKind::OrderedArgument,
                        expr.data().range.pos,
                        expr.data().range.end,
                    ),
                    expr,
                })
            }
        }
    }

    /// Parse zero or more `(* ... *)` attribute instances.
    pub(crate) fn parse_attributes(&mut self) -> &'a [AttributeInstance<'a>] {
        if self.peek_kind() != TokenKind::OpenParenthesisStar {
            return &[];
        }
        let mut instances = self.vec();
        while self.peek_kind() == TokenKind::OpenParenthesisStar {
            let open = self.consume();
            let (specs, close) = self.parse_separated_list(
                TokenKind::StarCloseParenthesis,
                false,
                &messages::EXPECTED_ATTRIBUTE,
                |kind| kind == TokenKind::Identifier,
                |p| p.parse_attribute_spec(),
            );
            instances.push(AttributeInstance {
                data: NodeData::new(
                    SyntaxKind::AttributeInstance,
                    open.range.pos,
                    close.range.end,
                ),
                open,
                specs,
                close,
            });
        }
        instances.into_bump_slice()
    }

    fn parse_attribute_spec(&mut self) -> AttributeSpec<'a> {
        let name = self.expect(TokenKind::Identifier);
        let (equals, value) = if self.peek_kind() == TokenKind::Equals {
            let equals = self.consume();
            let value = self.parse_expression();
            (Some(equals), Some(value))
        } else {
            (None, None)
        };
        let end = value
            .map(|v| v.data().range.end)
            .unwrap_or(name.range.end);
        AttributeSpec {
            data: NodeData::new(SyntaxKind::AttributeSpec, name.range.pos, end),
            name,
            equals,
            value,
        }
    }

    // ------------------------------------------------------------------
    // Timing controls and event expressions
    // ------------------------------------------------------------------

    pub fn parse_timing_control(&mut self) -> &'a TimingControl<'a> {
        match self.peek_kind() {
            TokenKind::Hash | TokenKind::DoubleHash => {
                let hash = self.consume();
                let kind = if hash.kind == TokenKind::Hash {
                    SyntaxKind::DelayControl
                } else {
                    SyntaxKind::CycleDelay
                };
                let delay =
                    self.parse_primary_expression(ExpressionOptions::DISALLOW_VECTORS);
                let data = NodeData::new(kind, hash.range.pos, delay.data().range.end);
                self.alloc(TimingControl::Delay(DelayControl { data, hash, delay }))
            }
            TokenKind::At => self.parse_event_control(),
            TokenKind::RepeatKeyword => {
                let repeat = self.consume();
                let open_paren = self.expect(TokenKind::OpenParenthesis);
                let expr = self.parse_expression();
                let close_paren = self.expect(TokenKind::CloseParenthesis);
                let timing = if matches!(
                    self.peek_kind(),
                    TokenKind::At | TokenKind::Hash | TokenKind::DoubleHash
                ) {
                    Some(self.parse_timing_control())
                } else {
                    None
                };
                let end = timing
                    .map(|t| t.data().range.end)
                    .unwrap_or(close_paren.range.end);
                let data = NodeData::new(
                    SyntaxKind::RepeatedEventControl,
                    repeat.range.pos,
                    end,
                );
                self.alloc(TimingControl::RepeatedEventControl(RepeatedEventControl {
                    data,
                    repeat,
                    open_paren,
                    expr,
                    close_paren,
                    timing,
                }))
            }
            _ => {
                // Synthesize an @ event control so the caller has a node.
                let at = self.expect(TokenKind::At);
                let name = self.parse_name_with(NameOptions::NONE);
                let name = self.alloc(name);
                let data = NodeData::new(
                    SyntaxKind::EventControl,
                    at.range.pos,
                    name.data().range.end,
                );
                self.alloc(TimingControl::EventControl(EventControl { data, at, name }))
            }
        }
    }

    fn parse_event_control(&mut self) -> &'a TimingControl<'a> {
        let at = self.consume();
        match self.peek_kind() {
            TokenKind::Star => {
                let star = self.consume();
                let data = NodeData::new(
                    SyntaxKind::ImplicitEventControl,
                    at.range.pos,
                    star.range.end,
                );
                self.alloc(TimingControl::ImplicitEventControl(ImplicitEventControl {
                    data,
                    at,
                    open_paren: None,
                    star: Some(star),
                    close_paren: None,
                }))
            }
            TokenKind::OpenParenthesis
                if self.peek_n(1).kind == TokenKind::Star
                    && self.peek_n(2).kind == TokenKind::CloseParenthesis =>
            {
                let open_paren = self.consume();
                let star = self.consume();
                let close_paren = self.consume();
                let data = NodeData::new(
                    SyntaxKind::ImplicitEventControl,
                    at.range.pos,
                    close_paren.range.end,
                );
                self.alloc(TimingControl::ImplicitEventControl(ImplicitEventControl {
                    data,
                    at,
                    open_paren: Some(open_paren),
                    star: Some(star),
                    close_paren: Some(close_paren),
                }))
            }
            TokenKind::OpenParenthesisStar => {
                // @(*) lexes as @ (* ) when the star glues to the paren
                let open_star = self.consume();
                let close_paren = self.expect(TokenKind::CloseParenthesis);
                let data = NodeData::new(
                    SyntaxKind::ImplicitEventControl,
                    at.range.pos,
                    close_paren.range.end,
                );
                self.alloc(TimingControl::ImplicitEventControl(ImplicitEventControl {
                    data,
                    at,
                    open_paren: Some(open_star),
                    star: None,
                    close_paren: Some(close_paren),
                }))
            }
            TokenKind::OpenParenthesis => {
                let open_paren = self.consume();
                let expr = self.parse_event_expression();
                let close_paren = self.expect(TokenKind::CloseParenthesis);
                let data = NodeData::new(
                    SyntaxKind::EventControlWithExpression,
                    at.range.pos,
                    close_paren.range.end,
                );
                self.alloc(TimingControl::EventControlWithExpression(
                    EventControlWithExpression {
                        data,
                        at,
                        open_paren,
                        expr,
                        close_paren,
                    },
                ))
            }
            _ => {
                let name = self.parse_name_with(NameOptions::NONE);
                let name = self.alloc(name);
                let data = NodeData::new(
                    SyntaxKind::EventControl,
                    at.range.pos,
                    name.data().range.end,
                );
                self.alloc(TimingControl::EventControl(EventControl { data, at, name }))
            }
        }
    }

    pub fn parse_event_expression(&mut self) -> &'a EventExpression<'a> {
        let mut left = self.parse_event_primary();
        while matches!(self.peek_kind(), TokenKind::OrKeyword | TokenKind::Comma) {
            let operator = self.consume();
            let right = self.parse_event_primary();
            let data = NodeData::new(
                SyntaxKind::BinaryEventExpression,
                left.data().range.pos,
                right.data().range.end,
            );
            left = self.alloc(EventExpression::Binary(
                svparse_ast::BinaryEventExpression {
                    data,
                    left,
                    operator,
                    right,
                },
            ));
        }
        left
    }

    fn parse_event_primary(&mut self) -> &'a EventExpression<'a> {
        if self.peek_kind() == TokenKind::OpenParenthesis && !self.is_conditional_expression() {
            let open_paren = self.consume();
            let expr = self.parse_event_expression();
            let close_paren = self.expect(TokenKind::CloseParenthesis);
            let data = NodeData::new(
                SyntaxKind::ParenthesizedEventExpression,
                open_paren.range.pos,
                close_paren.range.end,
            );
            return self.alloc(EventExpression::Parenthesized(
                ParenthesizedEventExpression {
                    data,
                    open_paren,
                    expr,
                    close_paren,
                },
            ));
        }
        let edge = if is_edge_keyword(self.peek_kind()) {
            Some(self.consume())
        } else {
            None
        };
        let expr = self.parse_expression();
        let iff_clause = if self.peek_kind() == TokenKind::IffKeyword {
            let iff = self.consume();
            let iff_expr = self.parse_expression();
            Some(IffEventClause {
                data: NodeData::new(
                    SyntaxKind::IffEventClause,
                    iff.range.pos,
                    iff_expr.data().range.end,
                ),
                iff,
                expr: iff_expr,
            })
        } else {
            None
        };
        let pos = edge.map(|t| t.range.pos).unwrap_or(expr.data().range.pos);
        let end = iff_clause
            .as_ref()
            .map(|c| c.data.range.end)
            .unwrap_or(expr.data().range.end);
        self.alloc(EventExpression::Signal(SignalEventExpression {
            data: NodeData::new(SyntaxKind::SignalEventExpression, pos, end),
            edge,
            expr,
            iff_clause,
        }))
    }

    // ------------------------------------------------------------------
    // Lookahead scans
    // ------------------------------------------------------------------

    /// Bounded lookahead from a `matches` or `&&&` at the cursor: whether a
    /// top-level `?` follows before the enclosing construct ends. Balanced
    /// bracket pairs are skipped without inspecting their interiors.
    pub(crate) fn predicate_has_question(&self) -> bool {
        let mut depth = 0usize;
        let mut i = self.index + 1;
        while i < self.tokens.len() {
            match self.tokens[i].kind {
                TokenKind::OpenParenthesis
                | TokenKind::OpenBrace
                | TokenKind::ApostropheOpenBrace
                | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseParenthesis
                | TokenKind::CloseBrace
                | TokenKind::CloseBracket => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                TokenKind::Question if depth == 0 => return true,
                TokenKind::Semicolon | TokenKind::EndOfFile => return false,
                _ => {}
            }
            i += 1;
        }
        false
    }

    /// Bounded lookahead from an open parenthesis at the cursor: scans to
    /// the balanced close and reports whether the parenthesized term is the
    /// predicate of a conditional expression. A top-level `matches` or `&&&`
    /// inside the parens also makes it conditional.
    pub(crate) fn is_conditional_expression(&self) -> bool {
        debug_assert_eq!(self.peek_kind(), TokenKind::OpenParenthesis);
        let mut depth = 1usize;
        let mut i = self.index + 1;
        while i < self.tokens.len() {
            match self.tokens[i].kind {
                TokenKind::OpenParenthesis => depth += 1,
                TokenKind::CloseParenthesis => {
                    depth -= 1;
                    if depth == 0 {
                        return self
                            .tokens
                            .get(i + 1)
                            .map(|t| t.kind == TokenKind::Question)
                            .unwrap_or(false);
                    }
                }
                TokenKind::MatchesKeyword | TokenKind::TripleAnd if depth == 1 => {
                    return true;
                }
                TokenKind::EndOfFile => return false,
                _ => {}
            }
            i += 1;
        }
        false
    }
}

/// Printable name of a token kind for diagnostics.
pub(crate) fn token_name(kind: TokenKind) -> &'static str {
    if let Some(text) = kind.fixed_text() {
        return text;
    }
    match kind {
        TokenKind::Identifier => "identifier",
        TokenKind::IntegerLiteral => "integer literal",
        TokenKind::IntegerBase => "vector base",
        TokenKind::StringLiteral => "string literal",
        TokenKind::EndOfFile => "end of input",
        _ => "token",
    }
}
