//! Syntax node definitions.
//!
//! Every node owns its directly-quoted tokens and references child nodes
//! allocated from the compilation arena. A node's range runs from its first
//! token to its last. Nothing is mutated after construction, which lets
//! later compiler stages read the tree concurrently.

use crate::syntax_kind::SyntaxKind;
use crate::token::Token;
use svparse_core::text::TextRange;

// ============================================================================
// Core node wrapper
// ============================================================================

/// Common data shared by all syntax nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeData {
    /// The kind of this node.
    pub kind: SyntaxKind,
    /// Source position range, first token to last token.
    pub range: TextRange,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
        }
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// A delimited list that keeps its separator tokens, so the tree
/// re-serializes losslessly. There are either `items.len() - 1` or
/// `items.len()` separators (the latter when recovery forced a trailing
/// separator).
#[derive(Debug, Clone, Copy)]
pub struct SeparatedList<'a, T> {
    pub items: NodeList<'a, T>,
    pub separators: NodeList<'a, Token>,
}

impl<'a, T> SeparatedList<'a, T> {
    pub fn empty() -> Self {
        Self {
            items: &[],
            separators: &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Literal(LiteralExpression),
    IntegerVector(IntegerVectorExpression),
    Name(Name<'a>),
    DataType(DataType<'a>),
    Prefix(PrefixUnaryExpression<'a>),
    Postfix(PostfixUnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Inside(InsideExpression<'a>),
    MinTypMax(MinTypMaxExpression<'a>),
    Parenthesized(ParenthesizedExpression<'a>),
    Concatenation(ConcatenationExpression<'a>),
    MultipleConcatenation(MultipleConcatenationExpression<'a>),
    StreamingConcatenation(StreamingConcatenationExpression<'a>),
    EmptyQueue(EmptyQueueExpression),
    AssignmentPattern(AssignmentPatternExpression<'a>),
    SignedCast(SignedCastExpression<'a>),
    Cast(CastExpression<'a>),
    ElementSelect(ElementSelectExpression<'a>),
    MemberAccess(MemberAccessExpression<'a>),
    Invocation(InvocationExpression<'a>),
    ArrayOrRandomizeMethod(ArrayOrRandomizeMethodExpression<'a>),
    TaggedUnion(TaggedUnionExpression<'a>),
    OpenRange(OpenRangeExpression<'a>),
    ExpressionOrDist(ExpressionOrDist<'a>),
    NewArray(NewArrayExpression<'a>),
    NewClass(NewClassExpression<'a>),
    CopyClass(CopyClassExpression<'a>),
    TimingControlExpr(TimingControlExpression<'a>),
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Literal(n) => &n.data,
            Expression::IntegerVector(n) => &n.data,
            Expression::Name(n) => n.data(),
            Expression::DataType(n) => n.data(),
            Expression::Prefix(n) => &n.data,
            Expression::Postfix(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Inside(n) => &n.data,
            Expression::MinTypMax(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::Concatenation(n) => &n.data,
            Expression::MultipleConcatenation(n) => &n.data,
            Expression::StreamingConcatenation(n) => &n.data,
            Expression::EmptyQueue(n) => &n.data,
            Expression::AssignmentPattern(n) => &n.data,
            Expression::SignedCast(n) => &n.data,
            Expression::Cast(n) => &n.data,
            Expression::ElementSelect(n) => &n.data,
            Expression::MemberAccess(n) => &n.data,
            Expression::Invocation(n) => &n.data,
            Expression::ArrayOrRandomizeMethod(n) => &n.data,
            Expression::TaggedUnion(n) => &n.data,
            Expression::OpenRange(n) => &n.data,
            Expression::ExpressionOrDist(n) => &n.data,
            Expression::NewArray(n) => &n.data,
            Expression::NewClass(n) => &n.data,
            Expression::CopyClass(n) => &n.data,
            Expression::TimingControlExpr(n) => &n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }
}

/// A literal with a single token: string, integer, real, time, `null`, `$`,
/// `1step`, unbased unsized, or a `default` pattern key. The node kind
/// distinguishes them.
#[derive(Debug)]
pub struct LiteralExpression {
    pub data: NodeData,
    pub literal: Token,
}

/// A sized or unsized based vector literal, e.g. `4'b1010` or `'hFF`.
#[derive(Debug)]
pub struct IntegerVectorExpression {
    pub data: NodeData,
    pub size: Option<Token>,
    pub base: Token,
    pub value: Token,
}

#[derive(Debug)]
pub struct PrefixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: Token,
    pub attributes: NodeList<'a, AttributeInstance<'a>>,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct PostfixUnaryExpression<'a> {
    pub data: NodeData,
    pub operand: &'a Expression<'a>,
    pub attributes: NodeList<'a, AttributeInstance<'a>>,
    pub operator: Token,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: Token,
    pub attributes: NodeList<'a, AttributeInstance<'a>>,
    pub right: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub predicate: ConditionalPredicate<'a>,
    pub question: Token,
    pub attributes: NodeList<'a, AttributeInstance<'a>>,
    pub when_true: &'a Expression<'a>,
    pub colon: Token,
    pub when_false: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct InsideExpression<'a> {
    pub data: NodeData,
    pub expr: &'a Expression<'a>,
    pub inside: Token,
    pub ranges: OpenRangeList<'a>,
}

#[derive(Debug)]
pub struct MinTypMaxExpression<'a> {
    pub data: NodeData,
    pub min: &'a Expression<'a>,
    pub colon1: Token,
    pub typ: &'a Expression<'a>,
    pub colon2: Token,
    pub max: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub open_paren: Token,
    pub expression: &'a Expression<'a>,
    pub close_paren: Token,
}

#[derive(Debug)]
pub struct ConcatenationExpression<'a> {
    pub data: NodeData,
    pub open_brace: Token,
    pub expressions: SeparatedList<'a, &'a Expression<'a>>,
    pub close_brace: Token,
}

#[derive(Debug)]
pub struct MultipleConcatenationExpression<'a> {
    pub data: NodeData,
    pub open_brace: Token,
    pub expression: &'a Expression<'a>,
    pub concatenation: &'a ConcatenationExpression<'a>,
    pub close_brace: Token,
}

#[derive(Debug)]
pub struct StreamingConcatenationExpression<'a> {
    pub data: NodeData,
    pub open_brace: Token,
    pub operator: Token,
    pub slice_size: Option<&'a Expression<'a>>,
    pub inner_open_brace: Token,
    pub expressions: SeparatedList<'a, StreamExpression<'a>>,
    pub inner_close_brace: Token,
    pub close_brace: Token,
}

#[derive(Debug)]
pub struct StreamExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub with_range: Option<StreamExpressionWithRange<'a>>,
}

#[derive(Debug)]
pub struct StreamExpressionWithRange<'a> {
    pub data: NodeData,
    pub with: Token,
    pub range: ElementSelect<'a>,
}

#[derive(Debug)]
pub struct EmptyQueueExpression {
    pub data: NodeData,
    pub open_brace: Token,
    pub close_brace: Token,
}

#[derive(Debug)]
pub struct AssignmentPatternExpression<'a> {
    pub data: NodeData,
    pub type_: Option<&'a DataType<'a>>,
    pub pattern: AssignmentPattern<'a>,
}

#[derive(Debug)]
pub enum AssignmentPattern<'a> {
    Simple(SimpleAssignmentPattern<'a>),
    Structured(StructuredAssignmentPattern<'a>),
    Replicated(ReplicatedAssignmentPattern<'a>),
}

impl<'a> AssignmentPattern<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            AssignmentPattern::Simple(n) => &n.data,
            AssignmentPattern::Structured(n) => &n.data,
            AssignmentPattern::Replicated(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct SimpleAssignmentPattern<'a> {
    pub data: NodeData,
    pub open_brace: Token,
    pub items: SeparatedList<'a, &'a Expression<'a>>,
    pub close_brace: Token,
}

#[derive(Debug)]
pub struct StructuredAssignmentPattern<'a> {
    pub data: NodeData,
    pub open_brace: Token,
    pub items: SeparatedList<'a, AssignmentPatternItem<'a>>,
    pub close_brace: Token,
}

#[derive(Debug)]
pub struct AssignmentPatternItem<'a> {
    pub data: NodeData,
    pub key: &'a Expression<'a>,
    pub colon: Token,
    pub value: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ReplicatedAssignmentPattern<'a> {
    pub data: NodeData,
    pub open_brace: Token,
    pub count: &'a Expression<'a>,
    pub inner_open_brace: Token,
    pub items: SeparatedList<'a, &'a Expression<'a>>,
    pub inner_close_brace: Token,
    pub close_brace: Token,
}

/// `signed'(expr)` / `unsigned'(expr)` / `const'(expr)`.
#[derive(Debug)]
pub struct SignedCastExpression<'a> {
    pub data: NodeData,
    pub signing: Token,
    pub apostrophe: Token,
    pub inner: &'a ParenthesizedExpression<'a>,
}

/// A bit cast: `expr'(expr)`.
#[derive(Debug)]
pub struct CastExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub apostrophe: Token,
    pub inner: &'a ParenthesizedExpression<'a>,
}

#[derive(Debug)]
pub struct ElementSelectExpression<'a> {
    pub data: NodeData,
    pub value: &'a Expression<'a>,
    pub select: ElementSelect<'a>,
}

#[derive(Debug)]
pub struct MemberAccessExpression<'a> {
    pub data: NodeData,
    pub value: &'a Expression<'a>,
    pub dot: Token,
    pub name: Token,
}

#[derive(Debug)]
pub struct InvocationExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub attributes: NodeList<'a, AttributeInstance<'a>>,
    pub arguments: Option<ArgumentList<'a>>,
}

/// `expr with (args) { constraints }` array/randomize method suffix.
#[derive(Debug)]
pub struct ArrayOrRandomizeMethodExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub with: Token,
    pub args: Option<ParenExpressionList<'a>>,
    pub constraints: Option<ConstraintBlock<'a>>,
}

#[derive(Debug)]
pub struct TaggedUnionExpression<'a> {
    pub data: NodeData,
    pub tagged: Token,
    pub member: Token,
    pub expr: Option<&'a Expression<'a>>,
}

/// `[a:b]` inside an open range list.
#[derive(Debug)]
pub struct OpenRangeExpression<'a> {
    pub data: NodeData,
    pub open_bracket: Token,
    pub left: &'a Expression<'a>,
    pub colon: Token,
    pub right: &'a Expression<'a>,
    pub close_bracket: Token,
}

#[derive(Debug)]
pub struct OpenRangeList<'a> {
    pub data: NodeData,
    pub open_brace: Token,
    pub items: SeparatedList<'a, &'a Expression<'a>>,
    pub close_brace: Token,
}

#[derive(Debug)]
pub struct ExpressionOrDist<'a> {
    pub data: NodeData,
    pub expr: &'a Expression<'a>,
    pub dist: DistConstraintList<'a>,
}

#[derive(Debug)]
pub struct DistConstraintList<'a> {
    pub data: NodeData,
    pub dist: Token,
    pub open_brace: Token,
    pub items: SeparatedList<'a, DistItem<'a>>,
    pub close_brace: Token,
}

#[derive(Debug)]
pub struct DistItem<'a> {
    pub data: NodeData,
    pub value: &'a Expression<'a>,
    pub weight: Option<DistWeight<'a>>,
}

#[derive(Debug)]
pub struct DistWeight<'a> {
    pub data: NodeData,
    pub op: Token,
    pub expr: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct NewArrayExpression<'a> {
    pub data: NodeData,
    pub name: &'a Name<'a>,
    pub open_bracket: Token,
    pub size: &'a Expression<'a>,
    pub close_bracket: Token,
    pub initializer: Option<&'a ParenthesizedExpression<'a>>,
}

#[derive(Debug)]
pub struct NewClassExpression<'a> {
    pub data: NodeData,
    pub name: &'a Name<'a>,
    pub arguments: Option<ArgumentList<'a>>,
}

#[derive(Debug)]
pub struct CopyClassExpression<'a> {
    pub data: NodeData,
    pub name: &'a Name<'a>,
    pub expr: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TimingControlExpression<'a> {
    pub data: NodeData,
    pub timing: &'a TimingControl<'a>,
    pub expr: &'a Expression<'a>,
}

// ============================================================================
// Selects, arguments, attributes
// ============================================================================

#[derive(Debug)]
pub struct ElementSelect<'a> {
    pub data: NodeData,
    pub open_bracket: Token,
    pub selector: Option<&'a Selector<'a>>,
    pub close_bracket: Token,
}

#[derive(Debug)]
pub enum Selector<'a> {
    Bit(BitSelect<'a>),
    Range(RangeSelect<'a>),
}

impl<'a> Selector<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Selector::Bit(n) => &n.data,
            Selector::Range(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct BitSelect<'a> {
    pub data: NodeData,
    pub expr: &'a Expression<'a>,
}

/// A range select; kind is simple (`:`), ascending (`+:`), or
/// descending (`-:`).
#[derive(Debug)]
pub struct RangeSelect<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub range: Token,
    pub right: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ArgumentList<'a> {
    pub data: NodeData,
    pub open_paren: Token,
    pub args: SeparatedList<'a, Argument<'a>>,
    pub close_paren: Token,
}

#[derive(Debug)]
pub enum Argument<'a> {
    Ordered(OrderedArgument<'a>),
    Named(NamedArgument<'a>),
    Empty(EmptyArgument),
    ClockingEvent(ClockingEventArgument<'a>),
}

impl<'a> Argument<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Argument::Ordered(n) => &n.data,
            Argument::Named(n) => &n.data,
            Argument::Empty(n) => &n.data,
            Argument::ClockingEvent(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct OrderedArgument<'a> {
    pub data: NodeData,
    pub expr: &'a Expression<'a>,
}

/// `.name(expr)`, `.name()`, or `.name`.
#[derive(Debug)]
pub struct NamedArgument<'a> {
    pub data: NodeData,
    pub dot: Token,
    pub name: Token,
    pub open_paren: Option<Token>,
    pub expr: Option<&'a Expression<'a>>,
    pub close_paren: Option<Token>,
}

#[derive(Debug)]
pub struct EmptyArgument {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct ClockingEventArgument<'a> {
    pub data: NodeData,
    pub timing: &'a TimingControl<'a>,
}

/// `#(...)` parameter value assignment on a class name.
#[derive(Debug)]
pub struct ParameterValueAssignment<'a> {
    pub data: NodeData,
    pub hash: Token,
    pub arguments: ArgumentList<'a>,
}

/// `(* name = value, ... *)`.
#[derive(Debug)]
pub struct AttributeInstance<'a> {
    pub data: NodeData,
    pub open: Token,
    pub specs: SeparatedList<'a, AttributeSpec<'a>>,
    pub close: Token,
}

#[derive(Debug)]
pub struct AttributeSpec<'a> {
    pub data: NodeData,
    pub name: Token,
    pub equals: Option<Token>,
    pub value: Option<&'a Expression<'a>>,
}

#[derive(Debug)]
pub struct ParenExpressionList<'a> {
    pub data: NodeData,
    pub open_paren: Token,
    pub items: SeparatedList<'a, &'a Expression<'a>>,
    pub close_paren: Token,
}

#[derive(Debug)]
pub struct ConstraintBlock<'a> {
    pub data: NodeData,
    pub open_brace: Token,
    pub items: NodeList<'a, ConstraintItem<'a>>,
    pub close_brace: Token,
}

/// One `;`-terminated item in a constraint block; implication items carry
/// the `->` that the expression grammar deliberately leaves unconsumed in
/// constraint context.
#[derive(Debug)]
pub struct ConstraintItem<'a> {
    pub data: NodeData,
    pub expr: &'a Expression<'a>,
    pub implication: Option<(Token, &'a Expression<'a>)>,
    pub semi: Token,
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug)]
pub enum Name<'a> {
    Identifier(IdentifierName),
    IdentifierSelect(IdentifierSelectName<'a>),
    Keyword(KeywordName),
    Class(ClassName<'a>),
    Scoped(ScopedName<'a>),
    System(SystemName),
}

impl<'a> Name<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Name::Identifier(n) => &n.data,
            Name::IdentifierSelect(n) => &n.data,
            Name::Keyword(n) => &n.data,
            Name::Class(n) => &n.data,
            Name::Scoped(n) => &n.data,
            Name::System(n) => &n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    /// The last token of this name, used for `super.new` placement checks.
    pub fn last_token(&self) -> Token {
        match self {
            Name::Identifier(n) => n.identifier,
            Name::IdentifierSelect(n) => n
                .selects
                .last()
                .map(|s| s.close_bracket)
                .unwrap_or(n.identifier),
            Name::Keyword(n) => n.keyword,
            Name::Class(n) => n.parameters.arguments.close_paren,
            Name::Scoped(n) => n.right.last_token(),
            Name::System(n) => n.identifier,
        }
    }
}

#[derive(Debug)]
pub struct IdentifierName {
    pub data: NodeData,
    pub identifier: Token,
}

#[derive(Debug)]
pub struct IdentifierSelectName<'a> {
    pub data: NodeData,
    pub identifier: Token,
    pub selects: NodeList<'a, ElementSelect<'a>>,
}

/// `this`, `super`, `local`, `$unit`, `$root`, `new`, or one of the
/// built-in method names; kind distinguishes them.
#[derive(Debug)]
pub struct KeywordName {
    pub data: NodeData,
    pub keyword: Token,
}

#[derive(Debug)]
pub struct ClassName<'a> {
    pub data: NodeData,
    pub identifier: Token,
    pub parameters: ParameterValueAssignment<'a>,
}

#[derive(Debug)]
pub struct ScopedName<'a> {
    pub data: NodeData,
    pub left: &'a Name<'a>,
    pub separator: Token,
    pub right: &'a Name<'a>,
}

#[derive(Debug)]
pub struct SystemName {
    pub data: NodeData,
    pub identifier: Token,
}

// ============================================================================
// Data types
// ============================================================================

#[derive(Debug)]
pub enum DataType<'a> {
    Builtin(BuiltinType<'a>),
    Named(Name<'a>),
}

impl<'a> DataType<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            DataType::Builtin(n) => &n.data,
            DataType::Named(n) => n.data(),
        }
    }
}

/// A built-in type keyword with optional signing and packed dimensions,
/// e.g. `bit unsigned [7:0]`.
#[derive(Debug)]
pub struct BuiltinType<'a> {
    pub data: NodeData,
    pub keyword: Token,
    pub signing: Option<Token>,
    pub dimensions: NodeList<'a, ElementSelect<'a>>,
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug)]
pub enum Pattern<'a> {
    Wildcard(WildcardPattern),
    Variable(VariablePattern),
    Tagged(TaggedPattern<'a>),
    Expression(ExpressionPattern<'a>),
}

impl<'a> Pattern<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Pattern::Wildcard(n) => &n.data,
            Pattern::Variable(n) => &n.data,
            Pattern::Tagged(n) => &n.data,
            Pattern::Expression(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct WildcardPattern {
    pub data: NodeData,
    pub dot_star: Token,
}

#[derive(Debug)]
pub struct VariablePattern {
    pub data: NodeData,
    pub dot: Token,
    pub identifier: Token,
}

/// `tagged Ident`; the nested sub-pattern is reserved and currently
/// always `None`.
#[derive(Debug)]
pub struct TaggedPattern<'a> {
    pub data: NodeData,
    pub tagged: Token,
    pub name: Token,
    pub pattern: Option<&'a Pattern<'a>>,
}

#[derive(Debug)]
pub struct ExpressionPattern<'a> {
    pub data: NodeData,
    pub expr: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct MatchesClause<'a> {
    pub data: NodeData,
    pub matches: Token,
    pub pattern: &'a Pattern<'a>,
}

#[derive(Debug)]
pub struct ConditionalPattern<'a> {
    pub data: NodeData,
    pub expr: &'a Expression<'a>,
    pub matches_clause: Option<MatchesClause<'a>>,
}

/// One or more conditional patterns joined by `&&&`.
#[derive(Debug)]
pub struct ConditionalPredicate<'a> {
    pub data: NodeData,
    pub conditions: SeparatedList<'a, ConditionalPattern<'a>>,
}

// ============================================================================
// Timing controls and event expressions
// ============================================================================

#[derive(Debug)]
pub enum TimingControl<'a> {
    /// `#expr` or `##expr`; kind distinguishes delay from cycle delay.
    Delay(DelayControl<'a>),
    EventControl(EventControl<'a>),
    EventControlWithExpression(EventControlWithExpression<'a>),
    ImplicitEventControl(ImplicitEventControl),
    RepeatedEventControl(RepeatedEventControl<'a>),
}

impl<'a> TimingControl<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TimingControl::Delay(n) => &n.data,
            TimingControl::EventControl(n) => &n.data,
            TimingControl::EventControlWithExpression(n) => &n.data,
            TimingControl::ImplicitEventControl(n) => &n.data,
            TimingControl::RepeatedEventControl(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct DelayControl<'a> {
    pub data: NodeData,
    pub hash: Token,
    pub delay: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct EventControl<'a> {
    pub data: NodeData,
    pub at: Token,
    pub name: &'a Name<'a>,
}

#[derive(Debug)]
pub struct EventControlWithExpression<'a> {
    pub data: NodeData,
    pub at: Token,
    pub open_paren: Token,
    pub expr: &'a EventExpression<'a>,
    pub close_paren: Token,
}

/// `@*`, `@(*)`, or `@ (* )` as lexed.
#[derive(Debug)]
pub struct ImplicitEventControl {
    pub data: NodeData,
    pub at: Token,
    pub open_paren: Option<Token>,
    pub star: Option<Token>,
    pub close_paren: Option<Token>,
}

#[derive(Debug)]
pub struct RepeatedEventControl<'a> {
    pub data: NodeData,
    pub repeat: Token,
    pub open_paren: Token,
    pub expr: &'a Expression<'a>,
    pub close_paren: Token,
    pub timing: Option<&'a TimingControl<'a>>,
}

#[derive(Debug)]
pub enum EventExpression<'a> {
    Signal(SignalEventExpression<'a>),
    Binary(BinaryEventExpression<'a>),
    Parenthesized(ParenthesizedEventExpression<'a>),
}

impl<'a> EventExpression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            EventExpression::Signal(n) => &n.data,
            EventExpression::Binary(n) => &n.data,
            EventExpression::Parenthesized(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct SignalEventExpression<'a> {
    pub data: NodeData,
    pub edge: Option<Token>,
    pub expr: &'a Expression<'a>,
    pub iff_clause: Option<IffEventClause<'a>>,
}

#[derive(Debug)]
pub struct IffEventClause<'a> {
    pub data: NodeData,
    pub iff: Token,
    pub expr: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct BinaryEventExpression<'a> {
    pub data: NodeData,
    pub left: &'a EventExpression<'a>,
    pub operator: Token,
    pub right: &'a EventExpression<'a>,
}

#[derive(Debug)]
pub struct ParenthesizedEventExpression<'a> {
    pub data: NodeData,
    pub open_paren: Token,
    pub expr: &'a EventExpression<'a>,
    pub close_paren: Token,
}

// ============================================================================
// Sequence expressions
// ============================================================================

#[derive(Debug)]
pub enum SequenceExpr<'a> {
    Simple(SimpleSequenceExpr<'a>),
    Delayed(DelayedSequenceExpr<'a>),
    Clocking(ClockingSequenceExpr<'a>),
    FirstMatch(FirstMatchSequenceExpr<'a>),
    Parenthesized(ParenthesizedSequenceExpr<'a>),
    Binary(BinarySequenceExpr<'a>),
}

impl<'a> SequenceExpr<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            SequenceExpr::Simple(n) => &n.data,
            SequenceExpr::Delayed(n) => &n.data,
            SequenceExpr::Clocking(n) => &n.data,
            SequenceExpr::FirstMatch(n) => &n.data,
            SequenceExpr::Parenthesized(n) => &n.data,
            SequenceExpr::Binary(n) => &n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }
}

#[derive(Debug)]
pub struct SimpleSequenceExpr<'a> {
    pub data: NodeData,
    pub expr: &'a Expression<'a>,
    pub repetition: Option<SequenceRepetition<'a>>,
}

#[derive(Debug)]
pub struct DelayedSequenceExpr<'a> {
    pub data: NodeData,
    pub first: Option<&'a SequenceExpr<'a>>,
    pub elements: NodeList<'a, DelayedSequenceElement<'a>>,
}

/// One `##delay seq` element; the delay is either a primary expression or a
/// bracketed form (`[n]`, `[n:m]`, `[*]`, `[+]`).
#[derive(Debug)]
pub struct DelayedSequenceElement<'a> {
    pub data: NodeData,
    pub double_hash: Token,
    pub delay: Option<&'a Expression<'a>>,
    pub open_bracket: Option<Token>,
    pub op: Option<Token>,
    pub selector: Option<&'a Selector<'a>>,
    pub close_bracket: Option<Token>,
    pub expr: &'a SequenceExpr<'a>,
}

#[derive(Debug)]
pub struct ClockingSequenceExpr<'a> {
    pub data: NodeData,
    pub event: &'a TimingControl<'a>,
    pub expr: &'a SequenceExpr<'a>,
}

#[derive(Debug)]
pub struct FirstMatchSequenceExpr<'a> {
    pub data: NodeData,
    pub keyword: Token,
    pub open_paren: Token,
    pub expr: &'a SequenceExpr<'a>,
    pub match_list: Option<SequenceMatchList<'a>>,
    pub close_paren: Token,
}

#[derive(Debug)]
pub struct ParenthesizedSequenceExpr<'a> {
    pub data: NodeData,
    pub open_paren: Token,
    pub expr: &'a SequenceExpr<'a>,
    pub match_list: Option<SequenceMatchList<'a>>,
    pub close_paren: Token,
    pub repetition: Option<SequenceRepetition<'a>>,
}

#[derive(Debug)]
pub struct BinarySequenceExpr<'a> {
    pub data: NodeData,
    pub left: &'a SequenceExpr<'a>,
    pub operator: Token,
    pub right: &'a SequenceExpr<'a>,
}

/// `[*]`, `[+]`, `[=n]`, `[->n]`, `[*n:m]`, ... after a sequence.
#[derive(Debug)]
pub struct SequenceRepetition<'a> {
    pub data: NodeData,
    pub open_bracket: Token,
    pub op: Token,
    pub selector: Option<&'a Selector<'a>>,
    pub close_bracket: Token,
}

/// `, expr, expr` following a parenthesized sequence, before the `)`.
#[derive(Debug)]
pub struct SequenceMatchList<'a> {
    pub data: NodeData,
    pub comma: Token,
    pub items: SeparatedList<'a, &'a Expression<'a>>,
}

// ============================================================================
// Property expressions
// ============================================================================

#[derive(Debug)]
pub enum PropertyExpr<'a> {
    Simple(SimplePropertyExpr<'a>),
    Parenthesized(ParenthesizedPropertyExpr<'a>),
    Clocking(ClockingPropertyExpr<'a>),
    StrongWeak(StrongWeakPropertyExpr<'a>),
    Unary(UnaryPropertyExpr<'a>),
    UnarySelect(UnarySelectPropertyExpr<'a>),
    AcceptOn(AcceptOnPropertyExpr<'a>),
    Conditional(ConditionalPropertyExpr<'a>),
    Case(CasePropertyExpr<'a>),
    Binary(BinaryPropertyExpr<'a>),
}

impl<'a> PropertyExpr<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            PropertyExpr::Simple(n) => &n.data,
            PropertyExpr::Parenthesized(n) => &n.data,
            PropertyExpr::Clocking(n) => &n.data,
            PropertyExpr::StrongWeak(n) => &n.data,
            PropertyExpr::Unary(n) => &n.data,
            PropertyExpr::UnarySelect(n) => &n.data,
            PropertyExpr::AcceptOn(n) => &n.data,
            PropertyExpr::Conditional(n) => &n.data,
            PropertyExpr::Case(n) => &n.data,
            PropertyExpr::Binary(n) => &n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }
}

#[derive(Debug)]
pub struct SimplePropertyExpr<'a> {
    pub data: NodeData,
    pub expr: &'a SequenceExpr<'a>,
}

#[derive(Debug)]
pub struct ParenthesizedPropertyExpr<'a> {
    pub data: NodeData,
    pub open_paren: Token,
    pub expr: &'a PropertyExpr<'a>,
    pub close_paren: Token,
}

#[derive(Debug)]
pub struct ClockingPropertyExpr<'a> {
    pub data: NodeData,
    pub event: &'a TimingControl<'a>,
    pub expr: &'a PropertyExpr<'a>,
}

#[derive(Debug)]
pub struct StrongWeakPropertyExpr<'a> {
    pub data: NodeData,
    pub keyword: Token,
    pub open_paren: Token,
    pub expr: &'a SequenceExpr<'a>,
    pub close_paren: Token,
}

/// `not p`, `nexttime p`, `always p`, ...; kind carries the operator.
#[derive(Debug)]
pub struct UnaryPropertyExpr<'a> {
    pub data: NodeData,
    pub op: Token,
    pub expr: &'a PropertyExpr<'a>,
}

/// `nexttime [n] p`, `always [n:m] p`, ... with a bracketed index selector.
#[derive(Debug)]
pub struct UnarySelectPropertyExpr<'a> {
    pub data: NodeData,
    pub op: Token,
    pub open_bracket: Token,
    pub selector: Option<&'a Selector<'a>>,
    pub close_bracket: Token,
    pub expr: &'a PropertyExpr<'a>,
}

/// `accept_on (cond) p` and the reject/sync variants; kind distinguishes.
#[derive(Debug)]
pub struct AcceptOnPropertyExpr<'a> {
    pub data: NodeData,
    pub keyword: Token,
    pub open_paren: Token,
    pub condition: &'a Expression<'a>,
    pub close_paren: Token,
    pub expr: &'a PropertyExpr<'a>,
}

#[derive(Debug)]
pub struct ConditionalPropertyExpr<'a> {
    pub data: NodeData,
    pub if_keyword: Token,
    pub open_paren: Token,
    pub condition: &'a Expression<'a>,
    pub close_paren: Token,
    pub expr: &'a PropertyExpr<'a>,
    pub else_clause: Option<ElsePropertyClause<'a>>,
}

#[derive(Debug)]
pub struct ElsePropertyClause<'a> {
    pub data: NodeData,
    pub else_keyword: Token,
    pub expr: &'a PropertyExpr<'a>,
}

#[derive(Debug)]
pub struct CasePropertyExpr<'a> {
    pub data: NodeData,
    pub keyword: Token,
    pub open_paren: Token,
    pub condition: &'a Expression<'a>,
    pub close_paren: Token,
    pub items: NodeList<'a, PropertyCaseItem<'a>>,
    pub endcase: Token,
}

#[derive(Debug)]
pub enum PropertyCaseItem<'a> {
    Standard(StandardPropertyCaseItem<'a>),
    Default(DefaultPropertyCaseItem<'a>),
}

impl<'a> PropertyCaseItem<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            PropertyCaseItem::Standard(n) => &n.data,
            PropertyCaseItem::Default(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct StandardPropertyCaseItem<'a> {
    pub data: NodeData,
    pub expressions: SeparatedList<'a, &'a Expression<'a>>,
    pub colon: Token,
    pub expr: &'a PropertyExpr<'a>,
    pub semi: Token,
}

#[derive(Debug)]
pub struct DefaultPropertyCaseItem<'a> {
    pub data: NodeData,
    pub keyword: Token,
    pub colon: Option<Token>,
    pub expr: &'a PropertyExpr<'a>,
    pub semi: Token,
}

#[derive(Debug)]
pub struct BinaryPropertyExpr<'a> {
    pub data: NodeData,
    pub left: &'a PropertyExpr<'a>,
    pub operator: Token,
    pub right: &'a PropertyExpr<'a>,
}
