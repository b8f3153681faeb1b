//! End-to-end parser tests: tree shapes, diagnostics, and lossless
//! re-serialization of the token stream.

use svparse_ast::writer::SourceWriter;
use svparse_ast::{
    Argument, AssignmentPattern, Expression, ExpressionOptions, Name, PropertyExpr,
    SequenceExpr, SyntaxKind, TimingControl, TokenKind,
};
use svparse_core::arena::CompilationArena;
use svparse_core::intern::StringInterner;
use svparse_diagnostics::DiagnosticCollection;
use svparse_parser::Parser;

fn check_expr(source: &str, f: impl FnOnce(&Expression<'_>)) {
    check_expr_with(source, ExpressionOptions::NONE, f);
}

fn check_expr_with(
    source: &str,
    options: ExpressionOptions,
    f: impl FnOnce(&Expression<'_>),
) {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, source);
    let expr = parser.parse_expression_with(options);
    assert!(
        !parser.diagnostics().has_errors(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.diagnostics().diagnostics()
    );
    assert!(parser.is_at_end(), "trailing tokens after {:?}", source);
    f(expr);
}

/// Token stream of a source string, ignoring whitespace differences.
fn token_stream(source: &str) -> Vec<(TokenKind, String)> {
    let interner = StringInterner::new();
    let mut diagnostics = DiagnosticCollection::new();
    svparse_lexer::tokenize(source, &interner, &mut diagnostics)
        .into_iter()
        .filter(|t| t.kind != TokenKind::EndOfFile)
        .map(|t| {
            let text = t
                .kind
                .fixed_text()
                .map(str::to_owned)
                .unwrap_or_else(|| interner.resolve(t.text).to_owned());
            (t.kind, text)
        })
        .collect()
}

fn assert_expr_round_trip(source: &str) {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, source);
    let expr = parser.parse_expression();
    assert!(
        !parser.diagnostics().has_errors(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.diagnostics().diagnostics()
    );
    let mut writer = SourceWriter::new(&interner);
    writer.expression(expr);
    let output = writer.finish();
    assert_eq!(
        token_stream(source),
        token_stream(&output),
        "round trip changed tokens: {:?} vs {:?}",
        source,
        output
    );
}

fn assert_property_round_trip(source: &str) {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, source);
    let prop = parser.parse_property_expression();
    assert!(
        !parser.diagnostics().has_errors(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.diagnostics().diagnostics()
    );
    let mut writer = SourceWriter::new(&interner);
    writer.property_expr(prop);
    let output = writer.finish();
    assert_eq!(
        token_stream(source),
        token_stream(&output),
        "round trip changed tokens: {:?} vs {:?}",
        source,
        output
    );
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn binary_precedence() {
    check_expr("a + b * c", |e| {
        assert_eq!(e.kind(), SyntaxKind::AddExpression);
        match e {
            Expression::Binary(b) => {
                assert_eq!(b.right.kind(), SyntaxKind::MultiplyExpression)
            }
            _ => panic!("expected binary"),
        }
    });
    check_expr("a | b ^ c & d", |e| {
        assert_eq!(e.kind(), SyntaxKind::BinaryOrExpression);
        match e {
            Expression::Binary(b) => {
                assert_eq!(b.right.kind(), SyntaxKind::BinaryXorExpression);
                match b.right {
                    Expression::Binary(x) => {
                        assert_eq!(x.right.kind(), SyntaxKind::BinaryAndExpression)
                    }
                    _ => panic!("expected binary"),
                }
            }
            _ => panic!("expected binary"),
        }
    });
}

#[test]
fn left_associativity() {
    check_expr("a - b - c", |e| {
        assert_eq!(e.kind(), SyntaxKind::SubtractExpression);
        match e {
            Expression::Binary(b) => {
                assert_eq!(b.left.kind(), SyntaxKind::SubtractExpression)
            }
            _ => panic!("expected binary"),
        }
    });
}

#[test]
fn power_is_right_associative() {
    check_expr("a ** b ** c", |e| {
        assert_eq!(e.kind(), SyntaxKind::PowerExpression);
        match e {
            Expression::Binary(b) => {
                assert_eq!(b.right.kind(), SyntaxKind::PowerExpression)
            }
            _ => panic!("expected binary"),
        }
    });
}

#[test]
fn unary_binds_tighter_than_power() {
    check_expr("-a ** b", |e| {
        assert_eq!(e.kind(), SyntaxKind::PowerExpression);
        match e {
            Expression::Binary(b) => {
                assert_eq!(b.left.kind(), SyntaxKind::UnaryMinusExpression)
            }
            _ => panic!("expected binary"),
        }
    });
}

#[test]
fn implication_is_right_associative() {
    check_expr("a -> b -> c", |e| {
        assert_eq!(e.kind(), SyntaxKind::LogicalImplicationExpression);
        match e {
            Expression::Binary(b) => assert_eq!(
                b.right.kind(),
                SyntaxKind::LogicalImplicationExpression
            ),
            _ => panic!("expected binary"),
        }
    });
}

#[test]
fn assignment_inside_expression() {
    check_expr("a = b + c", |e| {
        assert_eq!(e.kind(), SyntaxKind::AssignmentExpression);
    });
}

// ============================================================================
// Conditionals and pattern matching
// ============================================================================

#[test]
fn simple_conditional() {
    check_expr("a || b ? c + 1 : d", |e| {
        assert_eq!(e.kind(), SyntaxKind::ConditionalExpression);
        match e {
            Expression::Conditional(c) => {
                assert_eq!(c.predicate.conditions.len(), 1);
                assert!(c.predicate.conditions.items[0].matches_clause.is_none());
                assert_eq!(c.when_true.kind(), SyntaxKind::AddExpression);
            }
            _ => panic!("expected conditional"),
        }
    });
}

#[test]
fn nested_conditional_is_right_associative() {
    check_expr("a ? b : c ? d : e", |e| {
        match e {
            Expression::Conditional(c) => {
                assert_eq!(c.when_false.kind(), SyntaxKind::ConditionalExpression)
            }
            _ => panic!("expected conditional"),
        }
    });
}

#[test]
fn pattern_match_conditional() {
    check_expr("v matches tagged Valid ? 1 : 0", |e| {
        match e {
            Expression::Conditional(c) => {
                assert_eq!(c.predicate.conditions.len(), 1);
                let clause = c.predicate.conditions.items[0]
                    .matches_clause
                    .as_ref()
                    .expect("matches clause");
                assert_eq!(clause.pattern.data().kind, SyntaxKind::TaggedPattern);
            }
            _ => panic!("expected conditional"),
        }
    });
}

#[test]
fn triple_and_predicate() {
    check_expr("a matches .x &&& b > 0 ? x : 0", |e| {
        match e {
            Expression::Conditional(c) => {
                assert_eq!(c.predicate.conditions.len(), 2);
                let first = &c.predicate.conditions.items[0];
                assert_eq!(
                    first.matches_clause.as_ref().unwrap().pattern.data().kind,
                    SyntaxKind::VariablePattern
                );
                assert!(c.predicate.conditions.items[1].matches_clause.is_none());
            }
            _ => panic!("expected conditional"),
        }
    });
}

#[test]
fn trailing_matches_left_for_caller() {
    // `matches` with no `?` ahead belongs to an enclosing case or if
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "a matches .b");
    let expr = parser.parse_expression();
    assert_eq!(expr.kind(), SyntaxKind::IdentifierName);
    assert!(!parser.diagnostics().has_errors());
    assert!(!parser.is_at_end());
}

// ============================================================================
// Procedural assignment and constraint contexts
// ============================================================================

#[test]
fn nonblocking_assignment_retag() {
    check_expr_with(
        "a <= b <= c",
        ExpressionOptions::PROCEDURAL_ASSIGNMENT_CONTEXT,
        |e| {
            assert_eq!(e.kind(), SyntaxKind::NonblockingAssignmentExpression);
            match e {
                Expression::Binary(b) => {
                    assert_eq!(b.right.kind(), SyntaxKind::LessThanEqualExpression)
                }
                _ => panic!("expected binary"),
            }
        },
    );
    // without the context flag it stays a comparison
    check_expr("a <= b", |e| {
        assert_eq!(e.kind(), SyntaxKind::LessThanEqualExpression);
    });
    // only the first operator seen may be retagged
    check_expr_with(
        "a + b <= c",
        ExpressionOptions::PROCEDURAL_ASSIGNMENT_CONTEXT,
        |e| assert_eq!(e.kind(), SyntaxKind::LessThanEqualExpression),
    );
}

#[test]
fn constraint_context_leaves_arrow() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "a -> b");
    let expr = parser.parse_expression_with(ExpressionOptions::CONSTRAINT_CONTEXT);
    assert_eq!(expr.kind(), SyntaxKind::IdentifierName);
    // the arrow stays unconsumed for the enclosing constraint item
    assert!(!parser.is_at_end());
    assert!(!parser.diagnostics().has_errors());
}

#[test]
fn randomize_with_constraints() {
    check_expr("obj.randomize() with { x > 0; x -> y; len dist { [1:5] := 2 }; }", |e| {
        match e {
            Expression::ArrayOrRandomizeMethod(m) => {
                assert!(m.args.is_none());
                let block = m.constraints.as_ref().expect("constraint block");
                assert_eq!(block.items.len(), 3);
                assert_eq!(block.items[0].data.kind, SyntaxKind::ExpressionConstraint);
                assert_eq!(block.items[1].data.kind, SyntaxKind::ImplicationConstraint);
                assert_eq!(
                    block.items[2].expr.kind(),
                    SyntaxKind::ExpressionOrDist
                );
            }
            _ => panic!("expected randomize method"),
        }
    });
}

#[test]
fn array_method_with_arguments() {
    check_expr("arr.sum with (item > 0)", |e| {
        match e {
            Expression::ArrayOrRandomizeMethod(m) => {
                let args = m.args.as_ref().expect("with arguments");
                assert_eq!(args.items.len(), 1);
                assert!(m.constraints.is_none());
            }
            _ => panic!("expected with method"),
        }
    });
}

// ============================================================================
// new expressions
// ============================================================================

#[test]
fn new_class_forms() {
    check_expr("new", |e| {
        assert_eq!(e.kind(), SyntaxKind::NewClassExpression);
        match e {
            Expression::NewClass(n) => assert!(n.arguments.is_none()),
            _ => panic!("expected new class"),
        }
    });
    check_expr("new(1, 2)", |e| {
        match e {
            Expression::NewClass(n) => {
                assert_eq!(n.arguments.as_ref().unwrap().args.len(), 2)
            }
            _ => panic!("expected new class"),
        }
    });
    check_expr("pkg::cls::new(x)", |e| {
        assert_eq!(e.kind(), SyntaxKind::NewClassExpression);
    });
}

#[test]
fn constructor_call_ends_the_expression() {
    // nothing may follow a new expression; the `.` is for the caller
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "cls::new(x).y");
    let expr = parser.parse_expression();
    assert_eq!(expr.kind(), SyntaxKind::NewClassExpression);
    assert!(!parser.diagnostics().has_errors());
    assert!(!parser.is_at_end());
}

#[test]
fn new_array_forms() {
    check_expr("new [8]", |e| {
        match e {
            Expression::NewArray(n) => assert!(n.initializer.is_none()),
            _ => panic!("expected new array"),
        }
    });
    check_expr("new [depth] (defaults)", |e| {
        match e {
            Expression::NewArray(n) => assert!(n.initializer.is_some()),
            _ => panic!("expected new array"),
        }
    });
}

#[test]
fn copy_class() {
    check_expr("new other", |e| {
        assert_eq!(e.kind(), SyntaxKind::CopyClassExpression);
    });
    // a scoped name may not be used for a shallow copy
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "pkg::new other");
    let _ = parser.parse_expression();
    assert!(parser.diagnostics().has_errors());
}

#[test]
fn super_new_requires_context() {
    check_expr_with(
        "super.new(1)",
        ExpressionOptions::ALLOW_SUPER_NEW_CALL,
        |e| assert_eq!(e.kind(), SyntaxKind::NewClassExpression),
    );

    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "super.new(1)");
    let _ = parser.parse_expression();
    assert!(parser.diagnostics().has_errors());
}

// ============================================================================
// Assignment patterns and concatenations
// ============================================================================

#[test]
fn assignment_pattern_shapes() {
    check_expr("'{1, 2, 3}", |e| {
        match e {
            Expression::AssignmentPattern(p) => {
                assert!(matches!(p.pattern, AssignmentPattern::Simple(_)));
                assert!(p.type_.is_none());
            }
            _ => panic!("expected pattern"),
        }
    });
    check_expr("'{a: 1, default: 0}", |e| {
        match e {
            Expression::AssignmentPattern(p) => match &p.pattern {
                AssignmentPattern::Structured(s) => assert_eq!(s.items.len(), 2),
                _ => panic!("expected structured"),
            },
            _ => panic!("expected pattern"),
        }
    });
    check_expr("'{2{1, 0}}", |e| {
        match e {
            Expression::AssignmentPattern(p) => {
                assert!(matches!(p.pattern, AssignmentPattern::Replicated(_)))
            }
            _ => panic!("expected pattern"),
        }
    });
    check_expr("packet_t'{addr: 0, data: 1}", |e| {
        match e {
            Expression::AssignmentPattern(p) => assert!(p.type_.is_some()),
            _ => panic!("expected pattern"),
        }
    });
}

#[test]
fn empty_assignment_pattern_warns() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "'{}");
    let expr = parser.parse_expression();
    assert_eq!(expr.kind(), SyntaxKind::AssignmentPatternExpression);
    assert!(!parser.diagnostics().has_errors());
    assert_eq!(parser.diagnostics().len(), 1);
}

#[test]
fn concatenation_forms() {
    check_expr("{}", |e| assert_eq!(e.kind(), SyntaxKind::EmptyQueueExpression));
    check_expr("{a, b, c}", |e| {
        match e {
            Expression::Concatenation(c) => assert_eq!(c.expressions.len(), 3),
            _ => panic!("expected concatenation"),
        }
    });
    check_expr("{4{a}}", |e| {
        assert_eq!(e.kind(), SyntaxKind::MultipleConcatenationExpression);
    });
    check_expr("{<< 8 {a, b with [0 +: 2]}}", |e| {
        match e {
            Expression::StreamingConcatenation(s) => {
                assert!(s.slice_size.is_some());
                assert_eq!(s.expressions.len(), 2);
                assert!(s.expressions.items[1].with_range.is_some());
            }
            _ => panic!("expected stream"),
        }
    });
}

// ============================================================================
// Primaries, casts, selects
// ============================================================================

#[test]
fn literal_primaries() {
    check_expr("4'b1010", |e| {
        assert_eq!(e.kind(), SyntaxKind::IntegerVectorExpression)
    });
    check_expr("'hFF", |e| {
        match e {
            Expression::IntegerVector(v) => assert!(v.size.is_none()),
            _ => panic!("expected vector"),
        }
    });
    check_expr("null", |e| assert_eq!(e.kind(), SyntaxKind::NullLiteralExpression));
    check_expr("$", |e| {
        assert_eq!(e.kind(), SyntaxKind::WildcardLiteralExpression)
    });
    check_expr("10ns", |e| assert_eq!(e.kind(), SyntaxKind::TimeLiteralExpression));
}

#[test]
fn cast_expressions() {
    check_expr("signed'(x)", |e| {
        assert_eq!(e.kind(), SyntaxKind::SignedCastExpression)
    });
    check_expr("mytype'(x + 1)", |e| {
        assert_eq!(e.kind(), SyntaxKind::CastExpression)
    });
    check_expr("int'(x)", |e| assert_eq!(e.kind(), SyntaxKind::CastExpression));
}

#[test]
fn selects_and_member_access() {
    check_expr("mem[addr][7:0]", |e| {
        match e {
            Expression::Name(Name::IdentifierSelect(n)) => {
                assert_eq!(n.selects.len(), 2)
            }
            _ => panic!("expected name with selects"),
        }
    });
    check_expr("bus[base +: 8]", |e| {
        match e {
            Expression::Name(Name::IdentifierSelect(n)) => {
                let sel = n.selects[0].selector.expect("selector");
                assert_eq!(sel.data().kind, SyntaxKind::AscendingRangeSelect);
            }
            _ => panic!("expected name with selects"),
        }
    });
    check_expr("pkt.hdr.len", |e| {
        assert_eq!(e.kind(), SyntaxKind::ScopedName)
    });
    // member access after a non-name primary is a postfix node
    check_expr("f(x).len", |e| {
        assert_eq!(e.kind(), SyntaxKind::MemberAccessExpression)
    });
}

#[test]
fn tagged_union_expression() {
    check_expr("tagged Valid 42", |e| {
        match e {
            Expression::TaggedUnion(t) => assert!(t.expr.is_some()),
            _ => panic!("expected tagged union"),
        }
    });
    check_expr("tagged Invalid", |e| {
        match e {
            Expression::TaggedUnion(t) => assert!(t.expr.is_none()),
            _ => panic!("expected tagged union"),
        }
    });
}

#[test]
fn inside_expression() {
    check_expr("a inside {1, [2:5], b}", |e| {
        match e {
            Expression::Inside(i) => {
                assert_eq!(i.ranges.items.len(), 3);
                assert_eq!(
                    i.ranges.items.items[1].kind(),
                    SyntaxKind::OpenRangeExpression
                );
            }
            _ => panic!("expected inside"),
        }
    });
}

#[test]
fn min_typ_max_in_parens() {
    check_expr("(1 : 2 : 3)", |e| {
        match e {
            Expression::Parenthesized(p) => {
                assert_eq!(p.expression.kind(), SyntaxKind::MinTypMaxExpression)
            }
            _ => panic!("expected parens"),
        }
    });
}

// ============================================================================
// Arguments and attributes
// ============================================================================

#[test]
fn argument_list_variants() {
    check_expr("f(a, .b(1), .c, , d)", |e| {
        match e {
            Expression::Invocation(i) => {
                let args = &i.arguments.as_ref().unwrap().args;
                assert_eq!(args.len(), 5);
                assert_eq!(args.items[0].data().kind, SyntaxKind::OrderedArgument);
                assert_eq!(args.items[1].data().kind, SyntaxKind::NamedArgument);
                assert_eq!(args.items[2].data().kind, SyntaxKind::NamedArgument);
                assert_eq!(args.items[3].data().kind, SyntaxKind::EmptyArgument);
            }
            _ => panic!("expected invocation"),
        }
    });
    check_expr("$past(x, , , @(posedge clk))", |e| {
        match e {
            Expression::Invocation(i) => {
                let args = &i.arguments.as_ref().unwrap().args;
                assert_eq!(args.len(), 4);
                assert_eq!(
                    args.items[3].data().kind,
                    SyntaxKind::ClockingEventArgument
                );
            }
            _ => panic!("expected invocation"),
        }
    });
}

#[test]
fn parameter_values_are_min_typ_max() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "cls#(1:2:3, .w(4:5:6))");
    let name = parser.parse_hierarchical_name();
    assert!(!parser.diagnostics().has_errors());
    match name {
        Name::Class(c) => {
            let args = &c.parameters.arguments.args;
            assert_eq!(args.len(), 2);
            match &args.items[0] {
                Argument::Ordered(o) => {
                    assert_eq!(o.expr.kind(), SyntaxKind::MinTypMaxExpression)
                }
                _ => panic!("expected ordered argument"),
            }
            match &args.items[1] {
                Argument::Named(n) => assert_eq!(
                    n.expr.unwrap().kind(),
                    SyntaxKind::MinTypMaxExpression
                ),
                _ => panic!("expected named argument"),
            }
        }
        _ => panic!("expected class name"),
    }
}

#[test]
fn clocking_arguments_only_in_system_calls() {
    // a clocking event argument is rejected outside a system function call
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "foo(@(posedge clk))");
    let expr = parser.parse_expression();
    assert_eq!(expr.kind(), SyntaxKind::InvocationExpression);
    assert!(parser.diagnostics().has_errors());
}

#[test]
fn attributes_without_call_form_invocation() {
    check_expr("x (* keep *)", |e| {
        match e {
            Expression::Invocation(i) => {
                assert!(i.arguments.is_none());
                assert_eq!(i.attributes.len(), 1);
            }
            _ => panic!("expected invocation"),
        }
    });
}

#[test]
fn attributes_on_operators() {
    check_expr("a + (* keep *) b", |e| {
        match e {
            Expression::Binary(b) => assert_eq!(b.attributes.len(), 1),
            _ => panic!("expected binary"),
        }
    });
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn hierarchical_names() {
    check_expr("top.sub[2].leaf", |e| {
        assert_eq!(e.kind(), SyntaxKind::ScopedName);
    });
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "pkg::cls#(8)::item");
    let name = parser.parse_hierarchical_name();
    assert!(!parser.diagnostics().has_errors());
    assert_eq!(name.kind(), SyntaxKind::ScopedName);
    match name {
        Name::Scoped(s) => {
            assert_eq!(s.left.kind(), SyntaxKind::ScopedName);
            match s.left {
                Name::Scoped(inner) => assert_eq!(inner.right.kind(), SyntaxKind::ClassName),
                _ => panic!("expected scoped"),
            }
        }
        _ => panic!("expected scoped"),
    }
}

#[test]
fn wrong_separator_reports_error() {
    for source in ["this::x", "local.x", "$unit.x"] {
        let arena = CompilationArena::new();
        let interner = StringInterner::new();
        let mut parser = Parser::new(&arena, &interner, source);
        let _ = parser.parse_expression();
        assert!(
            parser.diagnostics().has_errors(),
            "expected separator error for {:?}",
            source
        );
    }
    check_expr("this.x", |e| assert_eq!(e.kind(), SyntaxKind::ScopedName));
    check_expr("local::x", |e| assert_eq!(e.kind(), SyntaxKind::ScopedName));
}

#[test]
fn keyword_name_positions() {
    // `super` may follow `this`, and array method names only follow a dot
    check_expr("this.super.x", |e| assert_eq!(e.kind(), SyntaxKind::ScopedName));
    check_expr("q.unique", |e| {
        match e {
            Expression::Name(Name::Scoped(s)) => {
                assert_eq!(s.right.kind(), SyntaxKind::ArrayUniqueMethod)
            }
            _ => panic!("expected scoped name"),
        }
    });
    // scope keywords may not appear mid-path
    for source in ["a.this", "a.local", "b.b::c"] {
        let arena = CompilationArena::new();
        let interner = StringInterner::new();
        let mut parser = Parser::new(&arena, &interner, source);
        let _ = parser.parse_expression();
        assert!(
            parser.diagnostics().has_errors(),
            "expected name error for {:?}",
            source
        );
    }
}

#[test]
fn incomplete_scope_names_report_errors() {
    for source in ["$root", "super", "$unit", "local"] {
        let arena = CompilationArena::new();
        let interner = StringInterner::new();
        let mut parser = Parser::new(&arena, &interner, source);
        let _ = parser.parse_expression();
        assert!(
            parser.diagnostics().has_errors(),
            "expected incomplete name error for {:?}",
            source
        );
    }
    check_expr("$root.top.x", |e| assert_eq!(e.kind(), SyntaxKind::ScopedName));
    check_expr("$unit::x", |e| assert_eq!(e.kind(), SyntaxKind::ScopedName));
    check_expr("this", |e| assert_eq!(e.kind(), SyntaxKind::ThisHandle));
}

// ============================================================================
// Timing controls
// ============================================================================

#[test]
fn timing_control_expressions() {
    check_expr("#10 done", |e| {
        match e {
            Expression::TimingControlExpr(t) => {
                assert_eq!(t.timing.data().kind, SyntaxKind::DelayControl)
            }
            _ => panic!("expected timing expr"),
        }
    });
    check_expr("@(posedge clk iff en) q", |e| {
        match e {
            Expression::TimingControlExpr(t) => assert_eq!(
                t.timing.data().kind,
                SyntaxKind::EventControlWithExpression
            ),
            _ => panic!("expected timing expr"),
        }
    });
    check_expr("@* y", |e| {
        match e {
            Expression::TimingControlExpr(t) => assert!(matches!(
                t.timing,
                TimingControl::ImplicitEventControl(_)
            )),
            _ => panic!("expected timing expr"),
        }
    });
}

#[test]
fn repeat_event_control() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "repeat (3) @(posedge clk)");
    let timing = parser.parse_timing_control();
    assert!(!parser.diagnostics().has_errors());
    match timing {
        TimingControl::RepeatedEventControl(r) => assert!(r.timing.is_some()),
        _ => panic!("expected repeat"),
    }
}

// ============================================================================
// Sequences and properties
// ============================================================================

fn parse_sequence<'a>(
    arena: &'a CompilationArena,
    interner: &StringInterner,
    source: &str,
) -> &'a SequenceExpr<'a> {
    let mut parser = Parser::new(arena, interner, source);
    let seq = parser.parse_sequence_expression();
    assert!(
        !parser.diagnostics().has_errors(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.diagnostics().diagnostics()
    );
    seq
}

fn parse_property<'a>(
    arena: &'a CompilationArena,
    interner: &StringInterner,
    source: &str,
) -> &'a PropertyExpr<'a> {
    let mut parser = Parser::new(arena, interner, source);
    let prop = parser.parse_property_expression();
    assert!(
        !parser.diagnostics().has_errors(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.diagnostics().diagnostics()
    );
    prop
}

#[test]
fn delayed_sequence() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let seq = parse_sequence(&arena, &interner, "req ##1 gnt ##[2:5] done");
    match seq {
        SequenceExpr::Delayed(d) => {
            assert!(d.first.is_some());
            assert_eq!(d.elements.len(), 2);
            assert!(d.elements[0].delay.is_some());
            assert!(d.elements[1].selector.is_some());
        }
        _ => panic!("expected delayed sequence"),
    }
}

#[test]
fn sequence_repetition_kinds() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let seq = parse_sequence(&arena, &interner, "busy [*3]");
    match seq {
        SequenceExpr::Simple(s) => {
            let rep = s.repetition.as_ref().expect("repetition");
            assert_eq!(rep.op.kind, TokenKind::Star);
            assert!(rep.selector.is_some());
        }
        _ => panic!("expected simple sequence"),
    }
    let seq = parse_sequence(&arena, &interner, "evt [-> 2]");
    match seq {
        SequenceExpr::Simple(s) => {
            assert_eq!(
                s.repetition.as_ref().unwrap().op.kind,
                TokenKind::MinusArrow
            );
        }
        _ => panic!("expected simple sequence"),
    }
}

#[test]
fn sequence_operator_precedence() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let seq = parse_sequence(&arena, &interner, "a or b and c");
    assert_eq!(seq.kind(), SyntaxKind::OrSequenceExpr);
    match seq {
        SequenceExpr::Binary(b) => assert_eq!(b.right.kind(), SyntaxKind::AndSequenceExpr),
        _ => panic!("expected binary sequence"),
    }
    let seq = parse_sequence(&arena, &interner, "en throughout req ##1 ack");
    assert_eq!(seq.kind(), SyntaxKind::ThroughoutSequenceExpr);
}

#[test]
fn first_match_with_match_list() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let seq = parse_sequence(&arena, &interner, "first_match(req ##1 ack, cnt = cnt + 1)");
    match seq {
        SequenceExpr::FirstMatch(f) => {
            let list = f.match_list.as_ref().expect("match list");
            assert_eq!(list.items.len(), 1);
        }
        _ => panic!("expected first_match"),
    }
}

#[test]
fn paren_fixup_to_expression() {
    // parens parsed as a sequence turn out to be an expression grouping
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let seq = parse_sequence(&arena, &interner, "(a + b) * c");
    match seq {
        SequenceExpr::Simple(s) => {
            assert_eq!(s.expr.kind(), SyntaxKind::MultiplyExpression)
        }
        _ => panic!("expected simple sequence"),
    }
}

#[test]
fn paren_fixup_keeps_dist() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let seq = parse_sequence(&arena, &interner, "(a == b) dist { [1:5] := 2 }");
    match seq {
        SequenceExpr::Simple(s) => {
            assert_eq!(s.expr.kind(), SyntaxKind::ExpressionOrDist)
        }
        _ => panic!("expected simple sequence"),
    }
}

#[test]
fn paren_sequence_with_repetition_stays_sequence() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let seq = parse_sequence(&arena, &interner, "(a ##1 b) [*2]");
    match seq {
        SequenceExpr::Parenthesized(p) => assert!(p.repetition.is_some()),
        _ => panic!("expected parenthesized sequence"),
    }
}

#[test]
fn property_operator_precedence() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let prop = parse_property(&arena, &interner, "a |-> b or c");
    assert_eq!(prop.kind(), SyntaxKind::OverlappedImplicationPropertyExpr);
    match prop {
        PropertyExpr::Binary(b) => assert_eq!(b.right.kind(), SyntaxKind::OrPropertyExpr),
        _ => panic!("expected binary property"),
    }
    let prop = parse_property(&arena, &interner, "a or b |=> c");
    assert_eq!(
        prop.kind(),
        SyntaxKind::NonOverlappedImplicationPropertyExpr
    );
    let prop = parse_property(&arena, &interner, "not a and b");
    assert_eq!(prop.kind(), SyntaxKind::AndPropertyExpr);
    match prop {
        PropertyExpr::Binary(b) => {
            assert_eq!(b.left.kind(), SyntaxKind::UnaryNotPropertyExpr)
        }
        _ => panic!("expected binary property"),
    }
}

#[test]
fn property_unary_operators() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    // a nexttime operand is a single property term, so the implication
    // binds outside it
    let prop = parse_property(&arena, &interner, "nexttime [2] a |-> b");
    assert_eq!(prop.kind(), SyntaxKind::OverlappedImplicationPropertyExpr);
    match prop {
        PropertyExpr::Binary(b) => {
            assert_eq!(b.left.kind(), SyntaxKind::NextTimePropertyExpr)
        }
        _ => panic!("expected binary property"),
    }
    let prop = parse_property(&arena, &interner, "nexttime a and b");
    assert_eq!(prop.kind(), SyntaxKind::AndPropertyExpr);
    // always and eventually extend maximally to the right
    let prop = parse_property(&arena, &interner, "always a and b");
    assert_eq!(prop.kind(), SyntaxKind::AlwaysPropertyExpr);
    let prop = parse_property(&arena, &interner, "s_eventually done");
    assert_eq!(prop.kind(), SyntaxKind::SEventuallyPropertyExpr);
    let prop = parse_property(&arena, &interner, "strong(req ##1 ack)");
    assert_eq!(prop.kind(), SyntaxKind::StrongWeakPropertyExpr);
    let prop = parse_property(&arena, &interner, "accept_on (rst) a until b");
    assert_eq!(prop.kind(), SyntaxKind::AcceptOnPropertyExpr);
}

#[test]
fn conditional_property() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let prop = parse_property(&arena, &interner, "if (mode) a |-> b else c |-> d");
    match prop {
        PropertyExpr::Conditional(c) => assert!(c.else_clause.is_some()),
        _ => panic!("expected conditional property"),
    }
}

#[test]
fn case_property() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let prop = parse_property(
        &arena,
        &interner,
        "case (sel) 0, 1: a |-> b; default: c; endcase",
    );
    match prop {
        PropertyExpr::Case(c) => assert_eq!(c.items.len(), 2),
        _ => panic!("expected case property"),
    }
}

#[test]
fn case_property_duplicate_default() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(
        &arena,
        &interner,
        "case (sel) default: a; default: b; endcase",
    );
    let _ = parser.parse_property_expression();
    assert!(parser.diagnostics().has_errors());
}

#[test]
fn property_paren_fixup() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    // expression direction
    let prop = parse_property(&arena, &interner, "(a + b) == c |-> d");
    assert_eq!(prop.kind(), SyntaxKind::OverlappedImplicationPropertyExpr);
    // sequence direction: repetition after the close paren
    let prop = parse_property(&arena, &interner, "(a ##1 b) [*2] |-> c");
    match prop {
        PropertyExpr::Binary(b) => match b.left {
            PropertyExpr::Simple(s) => {
                assert_eq!(s.expr.kind(), SyntaxKind::ParenthesizedSequenceExpr)
            }
            _ => panic!("expected simple property"),
        },
        _ => panic!("expected binary property"),
    }
    // plain property grouping
    let prop = parse_property(&arena, &interner, "(a |-> b) and c");
    match prop {
        PropertyExpr::Binary(b) => {
            assert_eq!(b.left.kind(), SyntaxKind::ParenthesizedPropertyExpr)
        }
        _ => panic!("expected binary property"),
    }
}

#[test]
fn clocked_property() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let prop = parse_property(&arena, &interner, "@(posedge clk) req |=> gnt");
    assert_eq!(prop.kind(), SyntaxKind::ClockingPropertyExpr);
}

// ============================================================================
// Recovery
// ============================================================================

#[test]
fn missing_close_paren_single_diagnostic() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "foo(a, b");
    let expr = parser.parse_expression();
    assert_eq!(parser.diagnostics().len(), 1);
    match expr {
        Expression::Invocation(i) => {
            let args = i.arguments.as_ref().unwrap();
            assert_eq!(args.args.len(), 2);
            assert!(args.close_paren.is_missing());
        }
        _ => panic!("expected invocation"),
    }
}

#[test]
fn skipped_tokens_keep_list_going() {
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, "{a, ;, b}");
    let expr = parser.parse_expression();
    assert!(parser.diagnostics().has_errors());
    // the close brace still terminates the concatenation
    assert_eq!(expr.kind(), SyntaxKind::ConcatenationExpression);
}

#[test]
fn deep_nesting_reports_without_panicking() {
    let mut source = String::new();
    for _ in 0..300 {
        source.push('(');
    }
    source.push('x');
    for _ in 0..300 {
        source.push(')');
    }
    let arena = CompilationArena::new();
    let interner = StringInterner::new();
    let mut parser = Parser::new(&arena, &interner, &source);
    let _ = parser.parse_expression();
    assert!(parser.diagnostics().has_errors());
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn expression_round_trips() {
    for source in [
        "a + b * (c - d)",
        "(a ^ b) === c ? ~d : e >>> 2",
        "4'b1010 | 'hFF & 8'shA5",
        "{a, {3{b}}, c[7:0]}",
        "{<< 16 {bus with [0 +: 4]}}",
        "'{addr: 0, data: '{default: 1}}",
        "p.q[i].r(x, .y(1), .z)",
        "a inside {1, [2:3]}",
        "new [n] (seed)",
        "std::randomize(v)",
        "signed'(a) + mytype'(b)",
        "tagged Valid (x + 1)",
        "#10 @(posedge clk iff en) q",
        "v matches tagged Busy &&& w ? 1 : 0",
        "arr.sum with (item * 2)",
        "(1 : 2 : 3)",
    ] {
        assert_expr_round_trip(source);
    }
}

#[test]
fn property_round_trips() {
    for source in [
        "req ##1 gnt ##[2:5] done",
        "@(posedge clk) a [*2] |-> strong(b ##1 c)",
        "not (a and b) or c",
        "if (sel) a |=> b else weak(d)",
        "first_match(x ##[+] y, z = 1) |-> w",
        "accept_on (rst) a s_until_with b",
        "nexttime [2] always [1:3] ok",
        "a ##1 b within c ##2 d",
        "(a) dist { [1:5] := 2 } |-> ack",
        "x #-# y #=# z",
        "x dist { [1:5] := 2, 9 :/ 1 } |-> ack",
    ] {
        assert_property_round_trip(source);
    }
}
