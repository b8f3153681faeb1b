//! Re-serialization of syntax trees back to source text.
//!
//! Walks a tree in source order and emits every token that was actually
//! lexed, separated by single spaces. Missing tokens synthesized during
//! error recovery are skipped, so the output of a recovered parse still
//! contains exactly the tokens the input did.

use crate::node::*;
use crate::token::Token;
use svparse_core::intern::StringInterner;

pub struct SourceWriter<'i> {
    interner: &'i StringInterner,
    output: String,
}

impl<'i> SourceWriter<'i> {
    pub fn new(interner: &'i StringInterner) -> Self {
        Self {
            interner,
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn token(&mut self, token: Token) {
        if token.is_missing() {
            return;
        }
        let text = match token.kind.fixed_text() {
            Some(text) => text,
            None => self.interner.resolve(token.text),
        };
        if text.is_empty() {
            return;
        }
        if !self.output.is_empty() {
            self.output.push(' ');
        }
        self.output.push_str(text);
    }

    fn opt_token(&mut self, token: Option<Token>) {
        if let Some(token) = token {
            self.token(token);
        }
    }

    fn separated<T>(&mut self, list: &SeparatedList<'_, T>, mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in list.items.iter().enumerate() {
            each(self, item);
            if i < list.separators.len() {
                self.token(list.separators[i]);
            }
        }
        // Recovery can leave a trailing separator past the last item.
        if list.separators.len() > list.items.len() {
            self.token(list.separators[list.items.len()]);
        }
    }

    fn attributes(&mut self, attributes: &[AttributeInstance<'_>]) {
        for attr in attributes {
            self.token(attr.open);
            self.separated(&attr.specs, |w, spec| {
                w.token(spec.name);
                w.opt_token(spec.equals);
                if let Some(value) = spec.value {
                    w.expression(value);
                }
            });
            self.token(attr.close);
        }
    }

    pub fn expression(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::Literal(n) => self.token(n.literal),
            Expression::IntegerVector(n) => {
                self.opt_token(n.size);
                self.token(n.base);
                self.token(n.value);
            }
            Expression::Name(n) => self.name(n),
            Expression::DataType(n) => self.data_type(n),
            Expression::Prefix(n) => {
                self.token(n.operator);
                self.attributes(n.attributes);
                self.expression(n.operand);
            }
            Expression::Postfix(n) => {
                self.expression(n.operand);
                self.attributes(n.attributes);
                self.token(n.operator);
            }
            Expression::Binary(n) => {
                self.expression(n.left);
                self.token(n.operator);
                self.attributes(n.attributes);
                self.expression(n.right);
            }
            Expression::Conditional(n) => {
                self.conditional_predicate(&n.predicate);
                self.token(n.question);
                self.attributes(n.attributes);
                self.expression(n.when_true);
                self.token(n.colon);
                self.expression(n.when_false);
            }
            Expression::Inside(n) => {
                self.expression(n.expr);
                self.token(n.inside);
                self.open_range_list(&n.ranges);
            }
            Expression::MinTypMax(n) => {
                self.expression(n.min);
                self.token(n.colon1);
                self.expression(n.typ);
                self.token(n.colon2);
                self.expression(n.max);
            }
            Expression::Parenthesized(n) => self.parenthesized(n),
            Expression::Concatenation(n) => self.concatenation(n),
            Expression::MultipleConcatenation(n) => {
                self.token(n.open_brace);
                self.expression(n.expression);
                self.concatenation(n.concatenation);
                self.token(n.close_brace);
            }
            Expression::StreamingConcatenation(n) => {
                self.token(n.open_brace);
                self.token(n.operator);
                if let Some(size) = n.slice_size {
                    self.expression(size);
                }
                self.token(n.inner_open_brace);
                self.separated(&n.expressions, |w, item| w.stream_expression(item));
                self.token(n.inner_close_brace);
                self.token(n.close_brace);
            }
            Expression::EmptyQueue(n) => {
                self.token(n.open_brace);
                self.token(n.close_brace);
            }
            Expression::AssignmentPattern(n) => {
                if let Some(type_) = n.type_ {
                    self.data_type(type_);
                }
                self.assignment_pattern(&n.pattern);
            }
            Expression::SignedCast(n) => {
                self.token(n.signing);
                self.token(n.apostrophe);
                self.parenthesized(n.inner);
            }
            Expression::Cast(n) => {
                self.expression(n.left);
                self.token(n.apostrophe);
                self.parenthesized(n.inner);
            }
            Expression::ElementSelect(n) => {
                self.expression(n.value);
                self.element_select(&n.select);
            }
            Expression::MemberAccess(n) => {
                self.expression(n.value);
                self.token(n.dot);
                self.token(n.name);
            }
            Expression::Invocation(n) => {
                self.expression(n.left);
                self.attributes(n.attributes);
                if let Some(args) = &n.arguments {
                    self.argument_list(args);
                }
            }
            Expression::ArrayOrRandomizeMethod(n) => {
                self.expression(n.left);
                self.token(n.with);
                if let Some(args) = &n.args {
                    self.token(args.open_paren);
                    self.separated(&args.items, |w, item| w.expression(item));
                    self.token(args.close_paren);
                }
                if let Some(constraints) = &n.constraints {
                    self.constraint_block(constraints);
                }
            }
            Expression::TaggedUnion(n) => {
                self.token(n.tagged);
                self.token(n.member);
                if let Some(inner) = n.expr {
                    self.expression(inner);
                }
            }
            Expression::OpenRange(n) => {
                self.token(n.open_bracket);
                self.expression(n.left);
                self.token(n.colon);
                self.expression(n.right);
                self.token(n.close_bracket);
            }
            Expression::ExpressionOrDist(n) => {
                self.expression(n.expr);
                self.dist_constraint_list(&n.dist);
            }
            Expression::NewArray(n) => {
                self.name(n.name);
                self.token(n.open_bracket);
                self.expression(n.size);
                self.token(n.close_bracket);
                if let Some(init) = n.initializer {
                    self.parenthesized(init);
                }
            }
            Expression::NewClass(n) => {
                self.name(n.name);
                if let Some(args) = &n.arguments {
                    self.argument_list(args);
                }
            }
            Expression::CopyClass(n) => {
                self.name(n.name);
                self.expression(n.expr);
            }
            Expression::TimingControlExpr(n) => {
                self.timing_control(n.timing);
                self.expression(n.expr);
            }
        }
    }

    fn parenthesized(&mut self, n: &ParenthesizedExpression<'_>) {
        self.token(n.open_paren);
        self.expression(n.expression);
        self.token(n.close_paren);
    }

    fn concatenation(&mut self, n: &ConcatenationExpression<'_>) {
        self.token(n.open_brace);
        self.separated(&n.expressions, |w, item| w.expression(item));
        self.token(n.close_brace);
    }

    fn stream_expression(&mut self, n: &StreamExpression<'_>) {
        self.expression(n.expression);
        if let Some(with_range) = &n.with_range {
            self.token(with_range.with);
            self.element_select(&with_range.range);
        }
    }

    fn assignment_pattern(&mut self, pattern: &AssignmentPattern<'_>) {
        match pattern {
            AssignmentPattern::Simple(n) => {
                self.token(n.open_brace);
                self.separated(&n.items, |w, item| w.expression(item));
                self.token(n.close_brace);
            }
            AssignmentPattern::Structured(n) => {
                self.token(n.open_brace);
                self.separated(&n.items, |w, item| {
                    w.expression(item.key);
                    w.token(item.colon);
                    w.expression(item.value);
                });
                self.token(n.close_brace);
            }
            AssignmentPattern::Replicated(n) => {
                self.token(n.open_brace);
                self.expression(n.count);
                self.token(n.inner_open_brace);
                self.separated(&n.items, |w, item| w.expression(item));
                self.token(n.inner_close_brace);
                self.token(n.close_brace);
            }
        }
    }

    fn open_range_list(&mut self, n: &OpenRangeList<'_>) {
        self.token(n.open_brace);
        self.separated(&n.items, |w, item| w.expression(item));
        self.token(n.close_brace);
    }

    fn dist_constraint_list(&mut self, n: &DistConstraintList<'_>) {
        self.token(n.dist);
        self.token(n.open_brace);
        self.separated(&n.items, |w, item| {
            w.expression(item.value);
            if let Some(weight) = &item.weight {
                w.token(weight.op);
                w.expression(weight.expr);
            }
        });
        self.token(n.close_brace);
    }

    fn constraint_block(&mut self, n: &ConstraintBlock<'_>) {
        self.token(n.open_brace);
        for item in n.items {
            self.expression(item.expr);
            if let Some((arrow, right)) = &item.implication {
                self.token(*arrow);
                self.expression(right);
            }
            self.token(item.semi);
        }
        self.token(n.close_brace);
    }

    pub fn name(&mut self, name: &Name<'_>) {
        match name {
            Name::Identifier(n) => self.token(n.identifier),
            Name::IdentifierSelect(n) => {
                self.token(n.identifier);
                for select in n.selects {
                    self.element_select(select);
                }
            }
            Name::Keyword(n) => self.token(n.keyword),
            Name::Class(n) => {
                self.token(n.identifier);
                self.token(n.parameters.hash);
                self.argument_list(&n.parameters.arguments);
            }
            Name::Scoped(n) => {
                self.name(n.left);
                self.token(n.separator);
                self.name(n.right);
            }
            Name::System(n) => self.token(n.identifier),
        }
    }

    fn data_type(&mut self, data_type: &DataType<'_>) {
        match data_type {
            DataType::Builtin(n) => {
                self.token(n.keyword);
                self.opt_token(n.signing);
                for dim in n.dimensions {
                    self.element_select(dim);
                }
            }
            DataType::Named(n) => self.name(n),
        }
    }

    fn element_select(&mut self, select: &ElementSelect<'_>) {
        self.token(select.open_bracket);
        if let Some(selector) = select.selector {
            self.selector(selector);
        }
        self.token(select.close_bracket);
    }

    fn selector(&mut self, selector: &Selector<'_>) {
        match selector {
            Selector::Bit(n) => self.expression(n.expr),
            Selector::Range(n) => {
                self.expression(n.left);
                self.token(n.range);
                self.expression(n.right);
            }
        }
    }

    fn argument_list(&mut self, args: &ArgumentList<'_>) {
        self.token(args.open_paren);
        self.separated(&args.args, |w, arg| w.argument(arg));
        self.token(args.close_paren);
    }

    fn argument(&mut self, arg: &Argument<'_>) {
        match arg {
            Argument::Ordered(n) => self.expression(n.expr),
            Argument::Named(n) => {
                self.token(n.dot);
                self.token(n.name);
                self.opt_token(n.open_paren);
                if let Some(expr) = n.expr {
                    self.expression(expr);
                }
                self.opt_token(n.close_paren);
            }
            Argument::Empty(_) => {}
            Argument::ClockingEvent(n) => self.timing_control(n.timing),
        }
    }

    pub fn pattern(&mut self, pattern: &Pattern<'_>) {
        match pattern {
            Pattern::Wildcard(n) => self.token(n.dot_star),
            Pattern::Variable(n) => {
                self.token(n.dot);
                self.token(n.identifier);
            }
            Pattern::Tagged(n) => {
                self.token(n.tagged);
                self.token(n.name);
                if let Some(sub) = n.pattern {
                    self.pattern(sub);
                }
            }
            Pattern::Expression(n) => self.expression(n.expr),
        }
    }

    fn conditional_predicate(&mut self, predicate: &ConditionalPredicate<'_>) {
        self.separated(&predicate.conditions, |w, cond| {
            w.expression(cond.expr);
            if let Some(clause) = &cond.matches_clause {
                w.token(clause.matches);
                w.pattern(clause.pattern);
            }
        });
    }

    pub fn timing_control(&mut self, timing: &TimingControl<'_>) {
        match timing {
            TimingControl::Delay(n) => {
                self.token(n.hash);
                self.expression(n.delay);
            }
            TimingControl::EventControl(n) => {
                self.token(n.at);
                self.name(n.name);
            }
            TimingControl::EventControlWithExpression(n) => {
                self.token(n.at);
                self.token(n.open_paren);
                self.event_expression(n.expr);
                self.token(n.close_paren);
            }
            TimingControl::ImplicitEventControl(n) => {
                self.token(n.at);
                self.opt_token(n.open_paren);
                self.opt_token(n.star);
                self.opt_token(n.close_paren);
            }
            TimingControl::RepeatedEventControl(n) => {
                self.token(n.repeat);
                self.token(n.open_paren);
                self.expression(n.expr);
                self.token(n.close_paren);
                if let Some(inner) = n.timing {
                    self.timing_control(inner);
                }
            }
        }
    }

    fn event_expression(&mut self, expr: &EventExpression<'_>) {
        match expr {
            EventExpression::Signal(n) => {
                self.opt_token(n.edge);
                self.expression(n.expr);
                if let Some(clause) = &n.iff_clause {
                    self.token(clause.iff);
                    self.expression(clause.expr);
                }
            }
            EventExpression::Binary(n) => {
                self.event_expression(n.left);
                self.token(n.operator);
                self.event_expression(n.right);
            }
            EventExpression::Parenthesized(n) => {
                self.token(n.open_paren);
                self.event_expression(n.expr);
                self.token(n.close_paren);
            }
        }
    }

    pub fn sequence_expr(&mut self, seq: &SequenceExpr<'_>) {
        match seq {
            SequenceExpr::Simple(n) => {
                self.expression(n.expr);
                if let Some(rep) = &n.repetition {
                    self.sequence_repetition(rep);
                }
            }
            SequenceExpr::Delayed(n) => {
                if let Some(first) = n.first {
                    self.sequence_expr(first);
                }
                for elem in n.elements {
                    self.token(elem.double_hash);
                    if let Some(delay) = elem.delay {
                        self.expression(delay);
                    }
                    self.opt_token(elem.open_bracket);
                    self.opt_token(elem.op);
                    if let Some(selector) = elem.selector {
                        self.selector(selector);
                    }
                    self.opt_token(elem.close_bracket);
                    self.sequence_expr(elem.expr);
                }
            }
            SequenceExpr::Clocking(n) => {
                self.timing_control(n.event);
                self.sequence_expr(n.expr);
            }
            SequenceExpr::FirstMatch(n) => {
                self.token(n.keyword);
                self.token(n.open_paren);
                self.sequence_expr(n.expr);
                if let Some(match_list) = &n.match_list {
                    self.sequence_match_list(match_list);
                }
                self.token(n.close_paren);
            }
            SequenceExpr::Parenthesized(n) => {
                self.token(n.open_paren);
                self.sequence_expr(n.expr);
                if let Some(match_list) = &n.match_list {
                    self.sequence_match_list(match_list);
                }
                self.token(n.close_paren);
                if let Some(rep) = &n.repetition {
                    self.sequence_repetition(rep);
                }
            }
            SequenceExpr::Binary(n) => {
                self.sequence_expr(n.left);
                self.token(n.operator);
                self.sequence_expr(n.right);
            }
        }
    }

    fn sequence_repetition(&mut self, rep: &SequenceRepetition<'_>) {
        self.token(rep.open_bracket);
        self.token(rep.op);
        if let Some(selector) = rep.selector {
            self.selector(selector);
        }
        self.token(rep.close_bracket);
    }

    fn sequence_match_list(&mut self, list: &SequenceMatchList<'_>) {
        self.token(list.comma);
        self.separated(&list.items, |w, item| w.expression(item));
    }

    pub fn property_expr(&mut self, prop: &PropertyExpr<'_>) {
        match prop {
            PropertyExpr::Simple(n) => self.sequence_expr(n.expr),
            PropertyExpr::Parenthesized(n) => {
                self.token(n.open_paren);
                self.property_expr(n.expr);
                self.token(n.close_paren);
            }
            PropertyExpr::Clocking(n) => {
                self.timing_control(n.event);
                self.property_expr(n.expr);
            }
            PropertyExpr::StrongWeak(n) => {
                self.token(n.keyword);
                self.token(n.open_paren);
                self.sequence_expr(n.expr);
                self.token(n.close_paren);
            }
            PropertyExpr::Unary(n) => {
                self.token(n.op);
                self.property_expr(n.expr);
            }
            PropertyExpr::UnarySelect(n) => {
                self.token(n.op);
                self.token(n.open_bracket);
                if let Some(selector) = n.selector {
                    self.selector(selector);
                }
                self.token(n.close_bracket);
                self.property_expr(n.expr);
            }
            PropertyExpr::AcceptOn(n) => {
                self.token(n.keyword);
                self.token(n.open_paren);
                self.expression(n.condition);
                self.token(n.close_paren);
                self.property_expr(n.expr);
            }
            PropertyExpr::Conditional(n) => {
                self.token(n.if_keyword);
                self.token(n.open_paren);
                self.expression(n.condition);
                self.token(n.close_paren);
                self.property_expr(n.expr);
                if let Some(else_clause) = &n.else_clause {
                    self.token(else_clause.else_keyword);
                    self.property_expr(else_clause.expr);
                }
            }
            PropertyExpr::Case(n) => {
                self.token(n.keyword);
                self.token(n.open_paren);
                self.expression(n.condition);
                self.token(n.close_paren);
                for item in n.items {
                    match item {
                        PropertyCaseItem::Standard(item) => {
                            self.separated(&item.expressions, |w, e| w.expression(e));
                            self.token(item.colon);
                            self.property_expr(item.expr);
                            self.token(item.semi);
                        }
                        PropertyCaseItem::Default(item) => {
                            self.token(item.keyword);
                            self.opt_token(item.colon);
                            self.property_expr(item.expr);
                            self.token(item.semi);
                        }
                    }
                }
                self.token(n.endcase);
            }
            PropertyExpr::Binary(n) => {
                self.property_expr(n.left);
                self.token(n.operator);
                self.property_expr(n.right);
            }
        }
    }
}
