//! Sequence and property expression parsing.
//!
//! Sequences and properties each have their own operator table; both bottom
//! out in the ordinary expression grammar. A parenthesized term is parsed as
//! the outer grammar first and reinterpreted as a plain expression when the
//! token after the closing paren can only continue an expression.

use svparse_ast::{
    BinaryPropertyExpr, BinarySequenceExpr, CasePropertyExpr, ClockingPropertyExpr,
    ClockingSequenceExpr, ConditionalPropertyExpr, DefaultPropertyCaseItem,
    DelayedSequenceElement, DelayedSequenceExpr, ElsePropertyClause, Expression,
    ExpressionOptions, ExpressionOrDist, FirstMatchSequenceExpr, NodeData,
    ParenthesizedExpression,
    ParenthesizedPropertyExpr, ParenthesizedSequenceExpr, PropertyCaseItem, PropertyExpr,
    AcceptOnPropertyExpr, SeparatedList, SequenceExpr, SequenceMatchList, SequenceRepetition,
    SimplePropertyExpr, SimpleSequenceExpr, StandardPropertyCaseItem, StrongWeakPropertyExpr,
    SyntaxKind, Token, TokenKind, UnaryPropertyExpr, UnarySelectPropertyExpr,
};
use svparse_diagnostics::{messages, Diagnostic};

use crate::parser::Parser;
use crate::precedence::{
    get_property_binary_kind, get_property_precedence, get_sequence_binary_kind,
    get_sequence_precedence, is_property_right_associative, is_sequence_right_associative,
};
use crate::utilities::{is_binary_or_postfix_token, is_possible_expression};

impl<'a> Parser<'a> {
    pub fn parse_sequence_expression(&mut self) -> &'a SequenceExpr<'a> {
        self.parse_sequence_expr(0, false)
    }

    pub fn parse_property_expression(&mut self) -> &'a PropertyExpr<'a> {
        self.parse_property_expr(0)
    }

    // ------------------------------------------------------------------
    // Sequences
    // ------------------------------------------------------------------

    /// `in_property` suppresses the sequence-level `and`/`or` operators so
    /// the enclosing property grammar gets them instead.
    pub(crate) fn parse_sequence_expr(
        &mut self,
        precedence: u8,
        in_property: bool,
    ) -> &'a SequenceExpr<'a> {
        if !self.enter() {
            let result = self.empty_sequence();
            self.exit();
            return result;
        }

        let mut left = self.parse_sequence_primary();
        if self.peek_kind() == TokenKind::DoubleHash {
            left = self.parse_delayed_sequence(Some(left));
        }
        left = self.parse_sequence_binary_tail(left, precedence, in_property);

        self.exit();
        left
    }

    /// The sequence binary operator loop. Factored out so the property
    /// parser can resume a sequence after unwrapping a parenthesized term.
    fn parse_sequence_binary_tail(
        &mut self,
        mut left: &'a SequenceExpr<'a>,
        precedence: u8,
        in_property: bool,
    ) -> &'a SequenceExpr<'a> {
        loop {
            let Some(op_kind) = get_sequence_binary_kind(self.peek_kind()) else {
                break;
            };
            if in_property
                && matches!(
                    op_kind,
                    SyntaxKind::AndSequenceExpr | SyntaxKind::OrSequenceExpr
                )
            {
                break;
            }
            let new_precedence = get_sequence_precedence(op_kind);
            if new_precedence < precedence {
                break;
            }
            if new_precedence == precedence && !is_sequence_right_associative(op_kind) {
                break;
            }
            let operator = self.consume();
            let right = self.parse_sequence_expr(new_precedence, in_property);
            let data = NodeData::new(
                op_kind,
                left.data().range.pos,
                right.data().range.end,
            );
            left = self.alloc(SequenceExpr::Binary(BinarySequenceExpr {
                data,
                left,
                operator,
                right,
            }));
        }
        left
    }

    fn empty_sequence(&mut self) -> &'a SequenceExpr<'a> {
        let expr = self.missing_expr();
        let range = expr.data().range;
        self.alloc(SequenceExpr::Simple(SimpleSequenceExpr {
            data: NodeData::new(SyntaxKind::SimpleSequenceExpr, range.pos, range.end),
            expr,
            repetition: None,
        }))
    }

    fn parse_sequence_primary(&mut self) -> &'a SequenceExpr<'a> {
        match self.peek_kind() {
            TokenKind::DoubleHash => self.parse_delayed_sequence(None),
            TokenKind::At => {
                let event = self.parse_timing_control();
                let expr = self.parse_sequence_expr(0, false);
                let data = NodeData::new(
                    SyntaxKind::ClockingSequenceExpr,
                    event.data().range.pos,
                    expr.data().range.end,
                );
                self.alloc(SequenceExpr::Clocking(ClockingSequenceExpr {
                    data,
                    event,
                    expr,
                }))
            }
            TokenKind::FirstMatchKeyword => self.parse_first_match(),
            TokenKind::OpenParenthesis => self.parse_parenthesized_sequence(),
            _ => {
                let expr = self.parse_expression_or_dist(ExpressionOptions::SEQUENCE_EXPR);
                let repetition = self.parse_sequence_repetition();
                let end = repetition
                    .as_ref()
                    .map(|r| r.data.range.end)
                    .unwrap_or(expr.data().range.end);
                self.alloc(SequenceExpr::Simple(SimpleSequenceExpr {
                    data: NodeData::new(
                        SyntaxKind::SimpleSequenceExpr,
                        expr.data().range.pos,
                        end,
                    ),
                    expr,
                    repetition,
                }))
            }
        }
    }

    fn parse_first_match(&mut self) -> &'a SequenceExpr<'a> {
        let keyword = self.consume();
        let open_paren = self.expect(TokenKind::OpenParenthesis);
        let expr = self.parse_sequence_expr(0, false);
        let match_list = self.parse_sequence_match_list();
        let close_paren = self.expect(TokenKind::CloseParenthesis);
        let data = NodeData::new(
            SyntaxKind::FirstMatchSequenceExpr,
            keyword.range.pos,
            close_paren.range.end,
        );
        self.alloc(SequenceExpr::FirstMatch(FirstMatchSequenceExpr {
            data,
            keyword,
            open_paren,
            expr,
            match_list,
            close_paren,
        }))
    }

    /// Parse `(...)` in a sequence position. A simple interior followed by a
    /// token that can only continue an expression means the parens belonged
    /// to the expression grammar; reinterpret and resume there.
    fn parse_parenthesized_sequence(&mut self) -> &'a SequenceExpr<'a> {
        let open_paren = self.consume();
        let expr = self.parse_sequence_expr(0, false);

        if let SequenceExpr::Simple(simple) = expr {
            if simple.repetition.is_none()
                && self.peek_kind() == TokenKind::CloseParenthesis
                && is_binary_or_postfix_token(self.peek_n(1).kind)
            {
                let close_paren = self.consume();
                return self.reinterpret_as_expression(open_paren, simple.expr, close_paren);
            }
        }

        let match_list = self.parse_sequence_match_list();
        let close_paren = self.expect(TokenKind::CloseParenthesis);
        let repetition = self.parse_sequence_repetition();
        let end = repetition
            .as_ref()
            .map(|r| r.data.range.end)
            .unwrap_or(close_paren.range.end);
        let data = NodeData::new(
            SyntaxKind::ParenthesizedSequenceExpr,
            open_paren.range.pos,
            end,
        );
        self.alloc(SequenceExpr::Parenthesized(ParenthesizedSequenceExpr {
            data,
            open_paren,
            expr,
            match_list,
            close_paren,
            repetition,
        }))
    }

    fn reinterpret_as_expression(
        &mut self,
        open_paren: Token,
        inner: &'a Expression<'a>,
        close_paren: Token,
    ) -> &'a SequenceExpr<'a> {
        let paren = self.alloc(Expression::Parenthesized(ParenthesizedExpression {
            data: NodeData::new(
                SyntaxKind::ParenthesizedExpression,
                open_paren.range.pos,
                close_paren.range.end,
            ),
            open_paren,
            expression: inner,
            close_paren,
        }));
        let expr = self.parse_postfix_expression(paren, ExpressionOptions::SEQUENCE_EXPR);
        let expr = self.parse_binary_tail(expr, ExpressionOptions::SEQUENCE_EXPR, 0);
        // The unwrapped expression may still carry a dist constraint.
        let expr = if self.peek_kind() == TokenKind::DistKeyword {
            let dist = self.parse_dist_constraint_list();
            let data = NodeData::new(
                SyntaxKind::ExpressionOrDist,
                expr.data().range.pos,
                dist.data.range.end,
            );
            self.alloc(Expression::ExpressionOrDist(ExpressionOrDist { data, expr, dist }))
        } else {
            expr
        };
        let repetition = self.parse_sequence_repetition();
        let end = repetition
            .as_ref()
            .map(|r| r.data.range.end)
            .unwrap_or(expr.data().range.end);
        self.alloc(SequenceExpr::Simple(SimpleSequenceExpr {
            data: NodeData::new(SyntaxKind::SimpleSequenceExpr, expr.data().range.pos, end),
            expr,
            repetition,
        }))
    }

    /// Parse `, expr, ...` before the closing paren of a sequence term.
    fn parse_sequence_match_list(&mut self) -> Option<SequenceMatchList<'a>> {
        if self.peek_kind() != TokenKind::Comma {
            return None;
        }
        let comma = self.consume();
        let mut items = self.vec();
        let mut separators = self.vec();
        items.push(self.parse_expression());
        while let Some(sep) = self.consume_if(TokenKind::Comma) {
            separators.push(sep);
            items.push(self.parse_expression());
        }
        let items = items.into_bump_slice();
        let end = items[items.len() - 1].data().range.end;
        Some(SequenceMatchList {
            data: NodeData::new(SyntaxKind::SequenceMatchList, comma.range.pos, end),
            comma,
            items: SeparatedList {
                items,
                separators: separators.into_bump_slice(),
            },
        })
    }

    fn parse_delayed_sequence(
        &mut self,
        first: Option<&'a SequenceExpr<'a>>,
    ) -> &'a SequenceExpr<'a> {
        let mut elements = self.vec();
        while self.peek_kind() == TokenKind::DoubleHash {
            let double_hash = self.consume();
            let element = if self.peek_kind() == TokenKind::OpenBracket {
                let open_bracket = self.consume();
                let (op, selector) = if matches!(
                    self.peek_kind(),
                    TokenKind::Star | TokenKind::Plus
                ) {
                    (Some(self.consume()), None)
                } else {
                    (None, Some(self.parse_selector()))
                };
                let close_bracket = self.expect(TokenKind::CloseBracket);
                let expr = self.parse_sequence_primary();
                DelayedSequenceElement {
                    data: NodeData::new(
                        SyntaxKind::DelayedSequenceElement,
                        double_hash.range.pos,
                        expr.data().range.end,
                    ),
                    double_hash,
                    delay: None,
                    open_bracket: Some(open_bracket),
                    op,
                    selector,
                    close_bracket: Some(close_bracket),
                    expr,
                }
            } else {
                let delay =
                    self.parse_primary_expression(ExpressionOptions::DISALLOW_VECTORS);
                let expr = self.parse_sequence_primary();
                DelayedSequenceElement {
                    data: NodeData::new(
                        SyntaxKind::DelayedSequenceElement,
                        double_hash.range.pos,
                        expr.data().range.end,
                    ),
                    double_hash,
                    delay: Some(delay),
                    open_bracket: None,
                    op: None,
                    selector: None,
                    close_bracket: None,
                    expr,
                }
            };
            elements.push(element);
        }
        let elements = elements.into_bump_slice();
        let pos = first
            .map(|f| f.data().range.pos)
            .unwrap_or(elements[0].data.range.pos);
        let end = elements[elements.len() - 1].data.range.end;
        self.alloc(SequenceExpr::Delayed(DelayedSequenceExpr {
            data: NodeData::new(SyntaxKind::DelayedSequenceExpr, pos, end),
            first,
            elements,
        }))
    }

    /// Parse `[*]`, `[+]`, `[*n]`, `[*n:m]`, `[=n]`, or `[->n]` if present.
    pub(crate) fn parse_sequence_repetition(&mut self) -> Option<SequenceRepetition<'a>> {
        if self.peek_kind() != TokenKind::OpenBracket || !self.is_sequence_repetition() {
            return None;
        }
        let open_bracket = self.consume();
        let op = self.consume();
        let selector = if self.peek_kind() == TokenKind::CloseBracket {
            None
        } else {
            Some(self.parse_selector())
        };
        let close_bracket = self.expect(TokenKind::CloseBracket);
        Some(SequenceRepetition {
            data: NodeData::new(
                SyntaxKind::SequenceRepetition,
                open_bracket.range.pos,
                close_bracket.range.end,
            ),
            open_bracket,
            op,
            selector,
            close_bracket,
        })
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub(crate) fn parse_property_expr(&mut self, precedence: u8) -> &'a PropertyExpr<'a> {
        if !self.enter() {
            let result = self.empty_property();
            self.exit();
            return result;
        }

        let mut left = self.parse_property_primary();
        loop {
            let Some(op_kind) = get_property_binary_kind(self.peek_kind()) else {
                break;
            };
            let new_precedence = get_property_precedence(op_kind);
            if new_precedence < precedence {
                break;
            }
            if new_precedence == precedence && !is_property_right_associative(op_kind) {
                break;
            }
            let operator = self.consume();
            let right = self.parse_property_expr(new_precedence);
            let data = NodeData::new(
                op_kind,
                left.data().range.pos,
                right.data().range.end,
            );
            left = self.alloc(PropertyExpr::Binary(BinaryPropertyExpr {
                data,
                left,
                operator,
                right,
            }));
        }

        self.exit();
        left
    }

    fn empty_property(&mut self) -> &'a PropertyExpr<'a> {
        let seq = self.empty_sequence();
        let range = seq.data().range;
        self.alloc(PropertyExpr::Simple(SimplePropertyExpr {
            data: NodeData::new(SyntaxKind::SimplePropertyExpr, range.pos, range.end),
            expr: seq,
        }))
    }

    fn parse_property_primary(&mut self) -> &'a PropertyExpr<'a> {
        use TokenKind::*;
        match self.peek_kind() {
            StrongKeyword | WeakKeyword => {
                let keyword = self.consume();
                let open_paren = self.expect(OpenParenthesis);
                let expr = self.parse_sequence_expr(0, false);
                let close_paren = self.expect(CloseParenthesis);
                let data = NodeData::new(
                    SyntaxKind::StrongWeakPropertyExpr,
                    keyword.range.pos,
                    close_paren.range.end,
                );
                self.alloc(PropertyExpr::StrongWeak(StrongWeakPropertyExpr {
                    data,
                    keyword,
                    open_paren,
                    expr,
                    close_paren,
                }))
            }
            // `not` binds tighter than the property `and`/`or`.
            NotKeyword => self.parse_unary_property(SyntaxKind::UnaryNotPropertyExpr, 6),
            NextTimeKeyword => self.parse_selectable_unary(SyntaxKind::NextTimePropertyExpr, true),
            SNextTimeKeyword => {
                self.parse_selectable_unary(SyntaxKind::SNextTimePropertyExpr, true)
            }
            AlwaysKeyword => self.parse_selectable_unary(SyntaxKind::AlwaysPropertyExpr, false),
            SAlwaysKeyword => self.parse_selectable_unary(SyntaxKind::SAlwaysPropertyExpr, false),
            EventuallyKeyword => {
                self.parse_selectable_unary(SyntaxKind::EventuallyPropertyExpr, false)
            }
            SEventuallyKeyword => {
                self.parse_selectable_unary(SyntaxKind::SEventuallyPropertyExpr, false)
            }
            AcceptOnKeyword => self.parse_accept_on(SyntaxKind::AcceptOnPropertyExpr),
            RejectOnKeyword => self.parse_accept_on(SyntaxKind::RejectOnPropertyExpr),
            SyncAcceptOnKeyword => self.parse_accept_on(SyntaxKind::SyncAcceptOnPropertyExpr),
            SyncRejectOnKeyword => self.parse_accept_on(SyntaxKind::SyncRejectOnPropertyExpr),
            IfKeyword => self.parse_conditional_property(),
            CaseKeyword => self.parse_case_property(),
            At => {
                let event = self.parse_timing_control();
                let expr = self.parse_property_expr(0);
                let data = NodeData::new(
                    SyntaxKind::ClockingPropertyExpr,
                    event.data().range.pos,
                    expr.data().range.end,
                );
                self.alloc(PropertyExpr::Clocking(ClockingPropertyExpr {
                    data,
                    event,
                    expr,
                }))
            }
            OpenParenthesis => self.parse_parenthesized_property(),
            _ => {
                let seq = self.parse_sequence_expr(0, true);
                self.alloc(PropertyExpr::Simple(SimplePropertyExpr {
                    data: NodeData::new(
                        SyntaxKind::SimplePropertyExpr,
                        seq.data().range.pos,
                        seq.data().range.end,
                    ),
                    expr: seq,
                }))
            }
        }
    }

    fn parse_unary_property(&mut self, kind: SyntaxKind, precedence: u8) -> &'a PropertyExpr<'a> {
        let op = self.consume();
        let expr = self.parse_property_expr(precedence);
        let data = NodeData::new(kind, op.range.pos, expr.data().range.end);
        self.alloc(PropertyExpr::Unary(UnaryPropertyExpr { data, op, expr }))
    }

    /// `nexttime p` / `always [n:m] p` and friends. A `nexttime` operand is
    /// a single property term; `always` and `eventually` extend as far right
    /// as possible.
    fn parse_selectable_unary(
        &mut self,
        kind: SyntaxKind,
        operand_is_primary: bool,
    ) -> &'a PropertyExpr<'a> {
        let op = self.consume();
        if self.peek_kind() == TokenKind::OpenBracket {
            let open_bracket = self.consume();
            let selector = if self.peek_kind() == TokenKind::CloseBracket {
                None
            } else {
                Some(self.parse_selector())
            };
            let close_bracket = self.expect(TokenKind::CloseBracket);
            let expr = if operand_is_primary {
                self.parse_property_primary()
            } else {
                self.parse_property_expr(0)
            };
            let data = NodeData::new(kind, op.range.pos, expr.data().range.end);
            return self.alloc(PropertyExpr::UnarySelect(UnarySelectPropertyExpr {
                data,
                op,
                open_bracket,
                selector,
                close_bracket,
                expr,
            }));
        }
        let expr = if operand_is_primary {
            self.parse_property_primary()
        } else {
            self.parse_property_expr(0)
        };
        let data = NodeData::new(kind, op.range.pos, expr.data().range.end);
        self.alloc(PropertyExpr::Unary(UnaryPropertyExpr { data, op, expr }))
    }

    fn parse_accept_on(&mut self, kind: SyntaxKind) -> &'a PropertyExpr<'a> {
        let keyword = self.consume();
        let open_paren = self.expect(TokenKind::OpenParenthesis);
        let condition = self.parse_expression_or_dist(ExpressionOptions::NONE);
        let close_paren = self.expect(TokenKind::CloseParenthesis);
        let expr = self.parse_property_expr(0);
        let data = NodeData::new(kind, keyword.range.pos, expr.data().range.end);
        self.alloc(PropertyExpr::AcceptOn(AcceptOnPropertyExpr {
            data,
            keyword,
            open_paren,
            condition,
            close_paren,
            expr,
        }))
    }

    fn parse_conditional_property(&mut self) -> &'a PropertyExpr<'a> {
        let if_keyword = self.consume();
        let open_paren = self.expect(TokenKind::OpenParenthesis);
        let condition = self.parse_expression_or_dist(ExpressionOptions::NONE);
        let close_paren = self.expect(TokenKind::CloseParenthesis);
        let expr = self.parse_property_expr(0);
        let else_clause = if self.peek_kind() == TokenKind::ElseKeyword {
            let else_keyword = self.consume();
            let else_expr = self.parse_property_expr(0);
            Some(ElsePropertyClause {
                data: NodeData::new(
                    SyntaxKind::ElsePropertyClause,
                    else_keyword.range.pos,
                    else_expr.data().range.end,
                ),
                else_keyword,
                expr: else_expr,
            })
        } else {
            None
        };
        let end = else_clause
            .as_ref()
            .map(|c| c.data.range.end)
            .unwrap_or(expr.data().range.end);
        let data = NodeData::new(
            SyntaxKind::ConditionalPropertyExpr,
            if_keyword.range.pos,
            end,
        );
        self.alloc(PropertyExpr::Conditional(ConditionalPropertyExpr {
            data,
            if_keyword,
            open_paren,
            condition,
            close_paren,
            expr,
            else_clause,
        }))
    }

    fn parse_case_property(&mut self) -> &'a PropertyExpr<'a> {
        let keyword = self.consume();
        let open_paren = self.expect(TokenKind::OpenParenthesis);
        let condition = self.parse_expression_or_dist(ExpressionOptions::NONE);
        let close_paren = self.expect(TokenKind::CloseParenthesis);

        let mut items = self.vec();
        let mut default_token: Option<Token> = None;
        loop {
            match self.peek_kind() {
                TokenKind::EndCaseKeyword | TokenKind::EndOfFile => break,
                TokenKind::DefaultKeyword => {
                    let default_keyword = self.consume();
                    if let Some(previous) = default_token {
                        let diag = Diagnostic::with_span(
                            default_keyword.range.to_span(),
                            &messages::MULTIPLE_DEFAULT_CASES,
                            &["case"],
                        )
                        .with_related(Diagnostic::with_span(
                            previous.range.to_span(),
                            &messages::NOTE_PREVIOUS_DEFINITION,
                            &[],
                        ));
                        self.add_diagnostic(diag);
                    } else {
                        default_token = Some(default_keyword);
                    }
                    let colon = self.consume_if(TokenKind::Colon);
                    let expr = self.parse_property_expr(0);
                    let semi = self.expect(TokenKind::Semicolon);
                    items.push(PropertyCaseItem::Default(DefaultPropertyCaseItem {
                        data: NodeData::new(
                            SyntaxKind::DefaultPropertyCaseItem,
                            default_keyword.range.pos,
                            semi.range.end,
                        ),
                        keyword: default_keyword,
                        colon,
                        expr,
                        semi,
                    }));
                }
                kind if is_possible_expression(kind) => {
                    items.push(self.parse_standard_case_item());
                }
                _ => {
                    self.add_diag(&messages::EXPECTED_EXPRESSION, &[]);
                    self.consume();
                }
            }
        }
        if items.is_empty() {
            self.add_diag_at(keyword.range, &messages::CASE_STATEMENT_EMPTY, &["case"]);
        }
        let endcase = self.expect(TokenKind::EndCaseKeyword);

        let data = NodeData::new(
            SyntaxKind::CasePropertyExpr,
            keyword.range.pos,
            endcase.range.end,
        );
        self.alloc(PropertyExpr::Case(CasePropertyExpr {
            data,
            keyword,
            open_paren,
            condition,
            close_paren,
            items: items.into_bump_slice(),
            endcase,
        }))
    }

    fn parse_standard_case_item(&mut self) -> PropertyCaseItem<'a> {
        let mut expressions = self.vec();
        let mut separators = self.vec();
        expressions.push(self.parse_expression_or_dist(ExpressionOptions::NONE));
        while let Some(sep) = self.consume_if(TokenKind::Comma) {
            separators.push(sep);
            expressions.push(self.parse_expression_or_dist(ExpressionOptions::NONE));
        }
        let colon = self.expect(TokenKind::Colon);
        let expr = self.parse_property_expr(0);
        let semi = self.expect(TokenKind::Semicolon);
        let expressions = expressions.into_bump_slice();
        let pos = expressions[0].data().range.pos;
        PropertyCaseItem::Standard(StandardPropertyCaseItem {
            data: NodeData::new(SyntaxKind::StandardPropertyCaseItem, pos, semi.range.end),
            expressions: SeparatedList {
                items: expressions,
                separators: separators.into_bump_slice(),
            },
            colon,
            expr,
            semi,
        })
    }

    /// Parse `(...)` in a property position. The interior parses as a
    /// property; a `,` or a repetition after the close paren means the
    /// parens were really a sequence term, and an expression-continuation
    /// token means they were a plain parenthesized expression.
    fn parse_parenthesized_property(&mut self) -> &'a PropertyExpr<'a> {
        let open_paren = self.consume();
        let inner = self.parse_property_expr(0);

        if let PropertyExpr::Simple(simple) = inner {
            // `, expr` before the close: sequence match list
            if self.peek_kind() == TokenKind::Comma {
                let match_list = self.parse_sequence_match_list();
                let close_paren = self.expect(TokenKind::CloseParenthesis);
                let repetition = self.parse_sequence_repetition();
                return self.wrap_paren_sequence(
                    open_paren,
                    simple.expr,
                    match_list,
                    close_paren,
                    repetition,
                );
            }
            if self.peek_kind() == TokenKind::CloseParenthesis {
                let next = self.peek_n(1).kind;
                if next == TokenKind::OpenBracket {
                    let close_paren = self.consume();
                    let repetition = self.parse_sequence_repetition();
                    return self.wrap_paren_sequence(
                        open_paren,
                        simple.expr,
                        None,
                        close_paren,
                        repetition,
                    );
                }
                if let SequenceExpr::Simple(simple_seq) = simple.expr {
                    if simple_seq.repetition.is_none() && is_binary_or_postfix_token(next) {
                        let close_paren = self.consume();
                        let seq = self.reinterpret_as_expression(
                            open_paren,
                            simple_seq.expr,
                            close_paren,
                        );
                        return self.alloc(PropertyExpr::Simple(SimplePropertyExpr {
                            data: NodeData::new(
                                SyntaxKind::SimplePropertyExpr,
                                seq.data().range.pos,
                                seq.data().range.end,
                            ),
                            expr: seq,
                        }));
                    }
                }
            }
        }

        let close_paren = self.expect(TokenKind::CloseParenthesis);
        let data = NodeData::new(
            SyntaxKind::ParenthesizedPropertyExpr,
            open_paren.range.pos,
            close_paren.range.end,
        );
        self.alloc(PropertyExpr::Parenthesized(ParenthesizedPropertyExpr {
            data,
            open_paren,
            expr: inner,
            close_paren,
        }))
    }

    fn wrap_paren_sequence(
        &mut self,
        open_paren: Token,
        expr: &'a SequenceExpr<'a>,
        match_list: Option<SequenceMatchList<'a>>,
        close_paren: Token,
        repetition: Option<SequenceRepetition<'a>>,
    ) -> &'a PropertyExpr<'a> {
        let end = repetition
            .as_ref()
            .map(|r| r.data.range.end)
            .unwrap_or(close_paren.range.end);
        let seq = self.alloc(SequenceExpr::Parenthesized(ParenthesizedSequenceExpr {
            data: NodeData::new(
                SyntaxKind::ParenthesizedSequenceExpr,
                open_paren.range.pos,
                end,
            ),
            open_paren,
            expr,
            match_list,
            close_paren,
            repetition,
        }));
        self.alloc(PropertyExpr::Simple(SimplePropertyExpr {
            data: NodeData::new(SyntaxKind::SimplePropertyExpr, open_paren.range.pos, end),
            expr: seq,
        }))
    }
}
