//! SyntaxKind enum - all syntax node kinds in the tree.
//!
//! Operator expressions share one node shape and are distinguished by kind,
//! so the precedence tables key off this enum.

/// The kind of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,

    // ========================================================================
    // Literal expressions
    // ========================================================================
    StringLiteralExpression,
    IntegerLiteralExpression,
    IntegerVectorExpression,
    UnbasedUnsizedLiteralExpression,
    RealLiteralExpression,
    TimeLiteralExpression,
    NullLiteralExpression,
    WildcardLiteralExpression,
    OneStepLiteralExpression,
    DefaultPatternKeyExpression,

    // ========================================================================
    // Unary operator expressions
    // ========================================================================
    UnaryPlusExpression,
    UnaryMinusExpression,
    UnaryBitwiseAndExpression,
    UnaryBitwiseNandExpression,
    UnaryBitwiseOrExpression,
    UnaryBitwiseNorExpression,
    UnaryBitwiseXorExpression,
    UnaryBitwiseXnorExpression,
    UnaryLogicalNotExpression,
    UnaryBitwiseNotExpression,
    UnaryPreincrementExpression,
    UnaryPredecrementExpression,
    PostincrementExpression,
    PostdecrementExpression,

    // ========================================================================
    // Binary operator expressions
    // ========================================================================
    AddExpression,
    SubtractExpression,
    MultiplyExpression,
    DivideExpression,
    ModExpression,
    PowerExpression,
    EqualityExpression,
    InequalityExpression,
    CaseEqualityExpression,
    CaseInequalityExpression,
    WildcardEqualityExpression,
    WildcardInequalityExpression,
    LessThanExpression,
    LessThanEqualExpression,
    GreaterThanExpression,
    GreaterThanEqualExpression,
    LogicalAndExpression,
    LogicalOrExpression,
    BinaryAndExpression,
    BinaryOrExpression,
    BinaryXorExpression,
    BinaryXnorExpression,
    LogicalImplicationExpression,
    LogicalEquivalenceExpression,
    LogicalShiftLeftExpression,
    LogicalShiftRightExpression,
    ArithmeticShiftLeftExpression,
    ArithmeticShiftRightExpression,
    InsideExpression,

    // Assignment operator expressions
    AssignmentExpression,
    AddAssignmentExpression,
    SubtractAssignmentExpression,
    MultiplyAssignmentExpression,
    DivideAssignmentExpression,
    ModAssignmentExpression,
    AndAssignmentExpression,
    OrAssignmentExpression,
    XorAssignmentExpression,
    LogicalLeftShiftAssignmentExpression,
    LogicalRightShiftAssignmentExpression,
    ArithmeticLeftShiftAssignmentExpression,
    ArithmeticRightShiftAssignmentExpression,
    NonblockingAssignmentExpression,

    // ========================================================================
    // Other expressions
    // ========================================================================
    ParenthesizedExpression,
    MinTypMaxExpression,
    ConditionalExpression,
    ConcatenationExpression,
    MultipleConcatenationExpression,
    StreamingConcatenationExpression,
    StreamExpression,
    StreamExpressionWithRange,
    EmptyQueueExpression,
    AssignmentPatternExpression,
    SimpleAssignmentPattern,
    StructuredAssignmentPattern,
    ReplicatedAssignmentPattern,
    AssignmentPatternItem,
    SignedCastExpression,
    CastExpression,
    ElementSelectExpression,
    MemberAccessExpression,
    InvocationExpression,
    ArrayOrRandomizeMethodExpression,
    TaggedUnionExpression,
    OpenRangeList,
    OpenRangeExpression,
    ExpressionOrDist,
    DistConstraintList,
    DistItem,
    NewArrayExpression,
    NewClassExpression,
    CopyClassExpression,
    TimingControlExpression,

    // ========================================================================
    // Selects and arguments
    // ========================================================================
    ElementSelect,
    BitSelect,
    SimpleRangeSelect,
    AscendingRangeSelect,
    DescendingRangeSelect,
    ArgumentList,
    OrderedArgument,
    NamedArgument,
    EmptyArgument,
    ClockingEventArgument,
    ParameterValueAssignment,
    AttributeInstance,
    AttributeSpec,
    ParenExpressionList,
    ConstraintBlock,
    ExpressionConstraint,
    ImplicationConstraint,

    // ========================================================================
    // Names
    // ========================================================================
    IdentifierName,
    IdentifierSelectName,
    ClassName,
    ScopedName,
    SystemName,
    ThisHandle,
    SuperHandle,
    LocalScope,
    UnitScope,
    RootScope,
    ConstructorName,
    ArrayUniqueMethod,
    ArrayAndMethod,
    ArrayOrMethod,
    ArrayXorMethod,

    // ========================================================================
    // Patterns
    // ========================================================================
    WildcardPattern,
    VariablePattern,
    TaggedPattern,
    ExpressionPattern,
    MatchesClause,
    ConditionalPattern,
    ConditionalPredicate,

    // ========================================================================
    // Timing controls and event expressions
    // ========================================================================
    DelayControl,
    CycleDelay,
    EventControl,
    EventControlWithExpression,
    ImplicitEventControl,
    RepeatedEventControl,
    SignalEventExpression,
    BinaryEventExpression,
    ParenthesizedEventExpression,
    IffEventClause,

    // ========================================================================
    // Data types
    // ========================================================================
    NamedType,
    BitType,
    LogicType,
    RegType,
    ByteType,
    ShortIntType,
    IntType,
    LongIntType,
    IntegerType,
    TimeType,
    ShortRealType,
    RealType,
    RealTimeType,
    StringType,
    CHandleType,
    EventType,
    VoidType,

    // ========================================================================
    // Sequence expressions
    // ========================================================================
    SimpleSequenceExpr,
    DelayedSequenceExpr,
    DelayedSequenceElement,
    ClockingSequenceExpr,
    FirstMatchSequenceExpr,
    ParenthesizedSequenceExpr,
    AndSequenceExpr,
    OrSequenceExpr,
    IntersectSequenceExpr,
    WithinSequenceExpr,
    ThroughoutSequenceExpr,
    SequenceRepetition,
    SequenceMatchList,

    // ========================================================================
    // Property expressions
    // ========================================================================
    SimplePropertyExpr,
    ParenthesizedPropertyExpr,
    ClockingPropertyExpr,
    StrongWeakPropertyExpr,
    UnaryNotPropertyExpr,
    NextTimePropertyExpr,
    SNextTimePropertyExpr,
    AlwaysPropertyExpr,
    SAlwaysPropertyExpr,
    EventuallyPropertyExpr,
    SEventuallyPropertyExpr,
    AcceptOnPropertyExpr,
    RejectOnPropertyExpr,
    SyncAcceptOnPropertyExpr,
    SyncRejectOnPropertyExpr,
    ConditionalPropertyExpr,
    ElsePropertyClause,
    CasePropertyExpr,
    StandardPropertyCaseItem,
    DefaultPropertyCaseItem,
    AndPropertyExpr,
    OrPropertyExpr,
    IffPropertyExpr,
    UntilPropertyExpr,
    SUntilPropertyExpr,
    UntilWithPropertyExpr,
    SUntilWithPropertyExpr,
    ImpliesPropertyExpr,
    OverlappedImplicationPropertyExpr,
    NonOverlappedImplicationPropertyExpr,
    OverlappedFollowedByPropertyExpr,
    NonOverlappedFollowedByPropertyExpr,
}

impl SyntaxKind {
    /// Whether this kind is an assignment-operator expression.
    pub fn is_assignment(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            AssignmentExpression
                | AddAssignmentExpression
                | SubtractAssignmentExpression
                | MultiplyAssignmentExpression
                | DivideAssignmentExpression
                | ModAssignmentExpression
                | AndAssignmentExpression
                | OrAssignmentExpression
                | XorAssignmentExpression
                | LogicalLeftShiftAssignmentExpression
                | LogicalRightShiftAssignmentExpression
                | ArithmeticLeftShiftAssignmentExpression
                | ArithmeticRightShiftAssignmentExpression
                | NonblockingAssignmentExpression
        )
    }

    /// Whether this kind is one of the keyword-name path segments.
    pub fn is_keyword_name(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            ThisHandle
                | SuperHandle
                | LocalScope
                | UnitScope
                | RootScope
                | ConstructorName
                | ArrayUniqueMethod
                | ArrayAndMethod
                | ArrayOrMethod
                | ArrayXorMethod
        )
    }

    /// Whether this kind is one of the built-in method names (`xor`,
    /// `unique`, ...) that may only appear after a separator.
    pub fn is_special_method_name(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            ArrayUniqueMethod | ArrayAndMethod | ArrayOrMethod | ArrayXorMethod
        )
    }
}
