//! Hierarchical and scoped name parsing, plus `new` expressions.

use svparse_ast::{
    ArgumentList, ClassName, CopyClassExpression, ElementSelect, Expression, ExpressionOptions,
    IdentifierName, IdentifierSelectName, KeywordName, Name, NameOptions, NewArrayExpression,
    NewClassExpression, NodeData, ParameterValueAssignment, ScopedName, SyntaxKind, SystemName,
    Token, TokenKind,
};
use svparse_diagnostics::messages;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parse a full hierarchical name, e.g. `a.b[3].c` or `pkg::cls#(8)::fn`.
    pub fn parse_hierarchical_name(&mut self) -> Name<'a> {
        self.parse_name_with(NameOptions::NONE)
    }

    pub fn parse_name_with(&mut self, options: NameOptions) -> Name<'a> {
        let mut name = self.parse_name_part(options | NameOptions::IS_FIRST);
        let mut previous_kind = name.kind();

        // Only the first path element may stand in for a whole expression.
        let mut options = options;
        options.remove(NameOptions::EXPECTING_EXPRESSION);

        let mut used_dot = false;
        let mut reported_mixed = false;
        loop {
            let separator_kind = self.peek_kind();
            if separator_kind != TokenKind::Dot && separator_kind != TokenKind::DoubleColon {
                break;
            }
            // In a foreach loop the bracketed list ends the name; a lone
            // trailing separator belongs to the caller.
            if options.contains(NameOptions::FOREACH_NAME)
                && !crate::utilities::is_possible_name_part(self.peek_n(1).kind)
            {
                break;
            }

            // Once a path has used `.`, it may not switch back to `::`.
            if separator_kind == TokenKind::Dot {
                used_dot = true;
            } else if used_dot && !reported_mixed {
                reported_mixed = true;
                self.add_diag(&messages::INVALID_ACCESS_DOT_COLON, &["::", "."]);
            }

            self.check_separator(previous_kind, separator_kind);
            if previous_kind == SyntaxKind::ConstructorName {
                self.add_diag(&messages::NEW_KEYWORD_QUALIFIED, &[]);
            }
            let separator = self.consume();

            let mut part_options = options;
            part_options.remove(NameOptions::IS_FIRST);
            if previous_kind == SyntaxKind::ThisHandle {
                part_options |= NameOptions::PREVIOUS_WAS_THIS;
            }
            if previous_kind == SyntaxKind::LocalScope {
                part_options |= NameOptions::PREVIOUS_WAS_LOCAL;
            }

            let right = self.parse_name_part(part_options);
            previous_kind = right.kind();

            let left = self.alloc(name);
            let right = self.alloc(right);
            let data = NodeData::new(
                SyntaxKind::ScopedName,
                left.data().range.pos,
                right.data().range.end,
            );
            name = Name::Scoped(ScopedName {
                data,
                left,
                separator,
                right,
            });
        }

        // A bare `$unit`, `$root`, `super`, or `local` is incomplete; require
        // the separator and one more path element.
        let required = match name.kind() {
            SyntaxKind::UnitScope | SyntaxKind::LocalScope => Some(TokenKind::DoubleColon),
            SyntaxKind::RootScope | SyntaxKind::SuperHandle => Some(TokenKind::Dot),
            _ => None,
        };
        if let Some(required) = required {
            let separator = self.expect(required);
            let right = self.parse_name_part(options);
            let left = self.alloc(name);
            let right = self.alloc(right);
            let data = NodeData::new(
                SyntaxKind::ScopedName,
                left.data().range.pos,
                right.data().range.end,
            );
            name = Name::Scoped(ScopedName {
                data,
                left,
                separator,
                right,
            });
        }

        name
    }

    /// Report a mismatched access token. `this`, `super`, and `$root` are
    /// followed by `.`; `local` and `$unit` are followed by `::`.
    fn check_separator(&mut self, previous_kind: SyntaxKind, separator: TokenKind) {
        let required = match previous_kind {
            SyntaxKind::UnitScope | SyntaxKind::LocalScope => TokenKind::DoubleColon,
            SyntaxKind::RootScope | SyntaxKind::ThisHandle | SyntaxKind::SuperHandle => {
                TokenKind::Dot
            }
            _ => return,
        };
        if separator != required {
            let (actual, expected) = if required == TokenKind::Dot {
                ("::", ".")
            } else {
                (".", "::")
            };
            self.add_diag(&messages::INVALID_ACCESS_DOT_COLON, &[actual, expected]);
        }
    }

    fn parse_name_part(&mut self, options: NameOptions) -> Name<'a> {
        let keyword_kind = match self.peek_kind() {
            TokenKind::UnitSystemName => Some(SyntaxKind::UnitScope),
            TokenKind::RootSystemName => Some(SyntaxKind::RootScope),
            TokenKind::LocalKeyword => Some(SyntaxKind::LocalScope),
            TokenKind::ThisKeyword => Some(SyntaxKind::ThisHandle),
            TokenKind::SuperKeyword => Some(SyntaxKind::SuperHandle),
            TokenKind::NewKeyword => Some(SyntaxKind::ConstructorName),
            TokenKind::UniqueKeyword => Some(SyntaxKind::ArrayUniqueMethod),
            TokenKind::AndKeyword => Some(SyntaxKind::ArrayAndMethod),
            TokenKind::OrKeyword => Some(SyntaxKind::ArrayOrMethod),
            TokenKind::XorKeyword => Some(SyntaxKind::ArrayXorMethod),
            _ => None,
        };
        if let Some(kind) = keyword_kind {
            let is_first = options.contains(NameOptions::IS_FIRST);
            let allowed = match kind {
                // `new` names are always allowed.
                SyntaxKind::ConstructorName => true,
                // Built-in array reduction method names are ordinary keywords
                // elsewhere; they only name a member after a separator.
                SyntaxKind::ArrayUniqueMethod
                | SyntaxKind::ArrayAndMethod
                | SyntaxKind::ArrayOrMethod
                | SyntaxKind::ArrayXorMethod => !is_first,
                // `super` may follow `this` or `local`; `this` may follow
                // `local`; the rest only start a path.
                SyntaxKind::SuperHandle => {
                    is_first
                        || options.contains(NameOptions::PREVIOUS_WAS_THIS)
                        || options.contains(NameOptions::PREVIOUS_WAS_LOCAL)
                }
                SyntaxKind::ThisHandle => {
                    is_first || options.contains(NameOptions::PREVIOUS_WAS_LOCAL)
                }
                _ => is_first,
            };
            if allowed {
                let keyword = self.consume();
                return Name::Keyword(KeywordName {
                    data: NodeData::new(kind, keyword.range.pos, keyword.range.end),
                    keyword,
                });
            }
            // Fall through so the identifier handling reports the error.
        }

        if self.peek_kind() == TokenKind::SystemIdentifier {
            let identifier = self.consume();
            return Name::System(SystemName {
                data: NodeData::new(
                    SyntaxKind::SystemName,
                    identifier.range.pos,
                    identifier.range.end,
                ),
                identifier,
            });
        }

        let next = self.peek_kind();
        let identifier = if next == TokenKind::Identifier {
            self.consume()
        } else if next != TokenKind::Dot
            && next != TokenKind::DoubleColon
            && options.contains(NameOptions::EXPECTING_EXPRESSION)
        {
            self.add_diag(&messages::EXPECTED_EXPRESSION, &[]);
            Token::missing(TokenKind::Identifier, self.peek().range.pos)
        } else {
            self.expect(TokenKind::Identifier)
        };

        // class_name #(params)
        if self.peek_kind() == TokenKind::Hash && self.peek_n(1).kind == TokenKind::OpenParenthesis
        {
            let hash = self.consume();
            let arguments = self.parse_argument_list(true, false);
            let parameters = ParameterValueAssignment {
                data: NodeData::new(
                    SyntaxKind::ParameterValueAssignment,
                    hash.range.pos,
                    arguments.data.range.end,
                ),
                hash,
                arguments,
            };
            return Name::Class(ClassName {
                data: NodeData::new(
                    SyntaxKind::ClassName,
                    identifier.range.pos,
                    parameters.data.range.end,
                ),
                identifier,
                parameters,
            });
        }

        let selects = self.parse_name_selects(options);
        if selects.is_empty() {
            Name::Identifier(IdentifierName {
                data: NodeData::new(
                    SyntaxKind::IdentifierName,
                    identifier.range.pos,
                    identifier.range.end,
                ),
                identifier,
            })
        } else {
            let end = selects[selects.len() - 1].data.range.end;
            Name::IdentifierSelect(IdentifierSelectName {
                data: NodeData::new(SyntaxKind::IdentifierSelectName, identifier.range.pos, end),
                identifier,
                selects,
            })
        }
    }

    fn parse_name_selects(&mut self, options: NameOptions) -> &'a [ElementSelect<'a>] {
        // Foreach loop variables never carry selects; the bracket list is
        // the dimension list of the foreach itself.
        if options.contains(NameOptions::FOREACH_NAME) {
            return &[];
        }
        let mut selects = self.vec();
        while self.peek_kind() == TokenKind::OpenBracket {
            if options.contains(NameOptions::SEQUENCE_EXPR) && self.is_sequence_repetition() {
                break;
            }
            selects.push(self.parse_element_select());
        }
        selects.into_bump_slice()
    }

    /// Whether a parsed name ends in `new`, making it a constructor call.
    pub(crate) fn is_new_expr(name: &Name<'a>) -> bool {
        match name {
            Name::Keyword(k) => k.data.kind == SyntaxKind::ConstructorName,
            Name::Scoped(s) => Self::is_new_expr(s.right),
            _ => false,
        }
    }

    /// Parse the tail of a `new` expression. The name has already been
    /// parsed and ends in a constructor name.
    pub(crate) fn parse_new_expression(
        &mut self,
        name: Name<'a>,
        options: ExpressionOptions,
    ) -> &'a Expression<'a> {
        let scoped_with_dot = matches!(
            &name,
            Name::Scoped(s) if s.separator.kind == TokenKind::Dot
        );
        let name = self.alloc(name);

        if scoped_with_dot {
            // A dotted constructor is a super.new (or this.super.new) call,
            // which is only valid in a constructor body.
            if !options.contains(ExpressionOptions::ALLOW_SUPER_NEW_CALL) {
                self.add_diag_at(name.data().range, &messages::INVALID_SUPER_NEW, &[]);
            }
            let arguments = if self.peek_kind() == TokenKind::OpenParenthesis {
                Some(self.parse_argument_list(false, false))
            } else {
                None
            };
            return self.finish_new_class(name, arguments);
        }

        match self.peek_kind() {
            TokenKind::OpenBracket => {
                let open_bracket = self.consume();
                let size = self.parse_expression();
                let close_bracket = self.expect(TokenKind::CloseBracket);
                let initializer = if self.peek_kind() == TokenKind::OpenParenthesis {
                    let open_paren = self.consume();
                    let expression = self.parse_expression();
                    let close_paren = self.expect(TokenKind::CloseParenthesis);
                    Some(
                        &*self.alloc(svparse_ast::ParenthesizedExpression {
                            data: NodeData::new(
                                SyntaxKind::ParenthesizedExpression,
                                open_paren.range.pos,
                                close_paren.range.end,
                            ),
                            open_paren,
                            expression,
                            close_paren,
                        }),
                    )
                } else {
                    None
                };
                let end = initializer
                    .map(|i| i.data.range.end)
                    .unwrap_or(close_bracket.range.end);
                let data = NodeData::new(
                    SyntaxKind::NewArrayExpression,
                    name.data().range.pos,
                    end,
                );
                self.alloc(Expression::NewArray(NewArrayExpression {
                    data,
                    name,
                    open_bracket,
                    size,
                    close_bracket,
                    initializer,
                }))
            }
            TokenKind::OpenParenthesis => {
                let arguments = Some(self.parse_argument_list(false, false));
                self.finish_new_class(name, arguments)
            }
            kind if crate::utilities::is_possible_expression(kind) => {
                // Shallow copy: `new other`. Only a plain `new` may do this.
                if !matches!(name, Name::Keyword(_)) {
                    self.add_diag(&messages::SCOPED_CLASS_COPY, &[]);
                }
                let expr = self.parse_expression();
                let data = NodeData::new(
                    SyntaxKind::CopyClassExpression,
                    name.data().range.pos,
                    expr.data().range.end,
                );
                self.alloc(Expression::CopyClass(CopyClassExpression { data, name, expr }))
            }
            _ => self.finish_new_class(name, None),
        }
    }

    fn finish_new_class(
        &mut self,
        name: &'a Name<'a>,
        arguments: Option<ArgumentList<'a>>,
    ) -> &'a Expression<'a> {
        let end = arguments
            .as_ref()
            .map(|a| a.data.range.end)
            .unwrap_or(name.data().range.end);
        let data = NodeData::new(SyntaxKind::NewClassExpression, name.data().range.pos, end);
        self.alloc(Expression::NewClass(NewClassExpression {
            data,
            name,
            arguments,
        }))
    }
}
