//! Typed views over `SyntaxNode`s.
//!
//! Each syntactic category is a closed enum so consumers match exhaustively.

use crate::SyntaxKind::{self, *};
use crate::{SyntaxNode, SyntaxToken};

pub trait Node {
    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! nodes {
    ($($name:ident => $kind:ident,)*) => {$(
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl Node for $name {
            fn cast(syntax: SyntaxNode) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    )*};
}

macro_rules! category {
    ($(#[$attr:meta])* $name:ident { $($variant:ident($node:ident) => $kind:ident,)* }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($node),)*
        }

        impl Node for $name {
            fn cast(syntax: SyntaxNode) -> Option<Self> {
                match syntax.kind() {
                    $($kind => Some($name::$variant($node(syntax))),)*
                    _ => None,
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $($name::$variant(node) => &node.0,)*
                }
            }
        }
    };
}

nodes! {
    SourceFile => SOURCE_FILE,
    CodeBlock => CODE_BLOCK,
    CodeBlockItemList => CODE_BLOCK_ITEM_LIST,
    ConditionElementList => CONDITION_ELEMENT_LIST,
    OptionalBindingCondition => OPTIONAL_BINDING_CONDITION,
    SwitchCase => SWITCH_CASE,
    CatchClause => CATCH_CLAUSE,
    IfConfigClause => IF_CONFIG_CLAUSE,
    PatternBinding => PATTERN_BINDING,
    TypeAnnotation => TYPE_ANNOTATION,
    InitializerClause => INITIALIZER_CLAUSE,
    FunctionSignature => FUNCTION_SIGNATURE,
    Parameter => PARAMETER,
    ArgumentList => ARGUMENT_LIST,
    LabeledArgument => LABELED_ARGUMENT,
    ClosureSignature => CLOSURE_SIGNATURE,
    KeyPathComponent => KEY_PATH_COMPONENT,
    Unexpected => UNEXPECTED,

    IfStmt => IF_STMT,
    GuardStmt => GUARD_STMT,
    SwitchStmt => SWITCH_STMT,
    DoStmt => DO_STMT,
    ForStmt => FOR_STMT,
    WhileStmt => WHILE_STMT,
    RepeatStmt => REPEAT_STMT,
    ReturnStmt => RETURN_STMT,
    BreakStmt => BREAK_STMT,
    ContinueStmt => CONTINUE_STMT,
    ThrowStmt => THROW_STMT,
    DeferStmt => DEFER_STMT,
    FallthroughStmt => FALLTHROUGH_STMT,
    LabeledStmt => LABELED_STMT,
    IfConfigDecl => IF_CONFIG_DECL,
    VariableDecl => VARIABLE_DECL,
    FunctionDecl => FUNCTION_DECL,

    IdentifierPattern => IDENTIFIER_PATTERN,
    WildcardPattern => WILDCARD_PATTERN,
    TuplePattern => TUPLE_PATTERN,
    ValueBindingPattern => VALUE_BINDING_PATTERN,
    ExpressionPattern => EXPRESSION_PATTERN,
    IsTypePattern => IS_TYPE_PATTERN,
    MissingPattern => MISSING_PATTERN,

    BinaryExpr => BINARY_EXPR,
    TernaryExpr => TERNARY_EXPR,
    ArrowExpr => ARROW_EXPR,
    CastExpr => CAST_EXPR,
    IsExpr => IS_EXPR,
    PrefixExpr => PREFIX_EXPR,
    PostfixExpr => POSTFIX_EXPR,
    ForceUnwrapExpr => FORCE_UNWRAP_EXPR,
    OptionalChainingExpr => OPTIONAL_CHAINING_EXPR,
    TryExpr => TRY_EXPR,
    AwaitExpr => AWAIT_EXPR,
    MoveExpr => MOVE_EXPR,
    IdentifierExpr => IDENTIFIER_EXPR,
    DiscardExpr => DISCARD_EXPR,
    BooleanLiteralExpr => BOOLEAN_LITERAL_EXPR,
    NilLiteralExpr => NIL_LITERAL_EXPR,
    IntegerLiteralExpr => INTEGER_LITERAL_EXPR,
    FloatLiteralExpr => FLOAT_LITERAL_EXPR,
    StringLiteralExpr => STRING_LITERAL_EXPR,
    RegexLiteralExpr => REGEX_LITERAL_EXPR,
    TupleExpr => TUPLE_EXPR,
    ArrayExpr => ARRAY_EXPR,
    DictionaryExpr => DICTIONARY_EXPR,
    ClosureExpr => CLOSURE_EXPR,
    FunctionCallExpr => FUNCTION_CALL_EXPR,
    SubscriptExpr => SUBSCRIPT_EXPR,
    MemberAccessExpr => MEMBER_ACCESS_EXPR,
    ImplicitMemberExpr => IMPLICIT_MEMBER_EXPR,
    SpecializeExpr => SPECIALIZE_EXPR,
    KeyPathExpr => KEY_PATH_EXPR,
    MacroExpansionExpr => MACRO_EXPANSION_EXPR,
    ObjectLiteralExpr => OBJECT_LITERAL_EXPR,
    EditorPlaceholderExpr => EDITOR_PLACEHOLDER_EXPR,
    OperatorRefExpr => OPERATOR_REF_EXPR,
    TypeExpr => TYPE_EXPR,
    PatternExpr => PATTERN_EXPR,
    MissingExpr => MISSING_EXPR,

    SimpleType => SIMPLE_TYPE,
    MemberType => MEMBER_TYPE,
    OptionalType => OPTIONAL_TYPE,
    ImplicitlyUnwrappedType => IMPLICITLY_UNWRAPPED_TYPE,
    ArrayType => ARRAY_TYPE,
    DictionaryType => DICTIONARY_TYPE,
    TupleType => TUPLE_TYPE,
    FunctionType => FUNCTION_TYPE,
    AttributedType => ATTRIBUTED_TYPE,
    SomeOrAnyType => SOME_OR_ANY_TYPE,
    CompositionType => COMPOSITION_TYPE,
    MissingType => MISSING_TYPE,
}

category! {
    Stmt {
        If(IfStmt) => IF_STMT,
        Guard(GuardStmt) => GUARD_STMT,
        Switch(SwitchStmt) => SWITCH_STMT,
        Do(DoStmt) => DO_STMT,
        For(ForStmt) => FOR_STMT,
        While(WhileStmt) => WHILE_STMT,
        Repeat(RepeatStmt) => REPEAT_STMT,
        Return(ReturnStmt) => RETURN_STMT,
        Break(BreakStmt) => BREAK_STMT,
        Continue(ContinueStmt) => CONTINUE_STMT,
        Throw(ThrowStmt) => THROW_STMT,
        Defer(DeferStmt) => DEFER_STMT,
        Fallthrough(FallthroughStmt) => FALLTHROUGH_STMT,
        Labeled(LabeledStmt) => LABELED_STMT,
        IfConfig(IfConfigDecl) => IF_CONFIG_DECL,
        Variable(VariableDecl) => VARIABLE_DECL,
        Function(FunctionDecl) => FUNCTION_DECL,
    }
}

category! {
    Pattern {
        Identifier(IdentifierPattern) => IDENTIFIER_PATTERN,
        Wildcard(WildcardPattern) => WILDCARD_PATTERN,
        Tuple(TuplePattern) => TUPLE_PATTERN,
        ValueBinding(ValueBindingPattern) => VALUE_BINDING_PATTERN,
        Expression(ExpressionPattern) => EXPRESSION_PATTERN,
        IsType(IsTypePattern) => IS_TYPE_PATTERN,
        Missing(MissingPattern) => MISSING_PATTERN,
    }
}

category! {
    Expr {
        Binary(BinaryExpr) => BINARY_EXPR,
        Ternary(TernaryExpr) => TERNARY_EXPR,
        Arrow(ArrowExpr) => ARROW_EXPR,
        Cast(CastExpr) => CAST_EXPR,
        Is(IsExpr) => IS_EXPR,
        Prefix(PrefixExpr) => PREFIX_EXPR,
        Postfix(PostfixExpr) => POSTFIX_EXPR,
        ForceUnwrap(ForceUnwrapExpr) => FORCE_UNWRAP_EXPR,
        OptionalChaining(OptionalChainingExpr) => OPTIONAL_CHAINING_EXPR,
        Try(TryExpr) => TRY_EXPR,
        Await(AwaitExpr) => AWAIT_EXPR,
        Move(MoveExpr) => MOVE_EXPR,
        Identifier(IdentifierExpr) => IDENTIFIER_EXPR,
        Discard(DiscardExpr) => DISCARD_EXPR,
        BooleanLiteral(BooleanLiteralExpr) => BOOLEAN_LITERAL_EXPR,
        NilLiteral(NilLiteralExpr) => NIL_LITERAL_EXPR,
        IntegerLiteral(IntegerLiteralExpr) => INTEGER_LITERAL_EXPR,
        FloatLiteral(FloatLiteralExpr) => FLOAT_LITERAL_EXPR,
        StringLiteral(StringLiteralExpr) => STRING_LITERAL_EXPR,
        RegexLiteral(RegexLiteralExpr) => REGEX_LITERAL_EXPR,
        Tuple(TupleExpr) => TUPLE_EXPR,
        Array(ArrayExpr) => ARRAY_EXPR,
        Dictionary(DictionaryExpr) => DICTIONARY_EXPR,
        Closure(ClosureExpr) => CLOSURE_EXPR,
        FunctionCall(FunctionCallExpr) => FUNCTION_CALL_EXPR,
        Subscript(SubscriptExpr) => SUBSCRIPT_EXPR,
        MemberAccess(MemberAccessExpr) => MEMBER_ACCESS_EXPR,
        ImplicitMember(ImplicitMemberExpr) => IMPLICIT_MEMBER_EXPR,
        Specialize(SpecializeExpr) => SPECIALIZE_EXPR,
        KeyPath(KeyPathExpr) => KEY_PATH_EXPR,
        MacroExpansion(MacroExpansionExpr) => MACRO_EXPANSION_EXPR,
        ObjectLiteral(ObjectLiteralExpr) => OBJECT_LITERAL_EXPR,
        EditorPlaceholder(EditorPlaceholderExpr) => EDITOR_PLACEHOLDER_EXPR,
        OperatorRef(OperatorRefExpr) => OPERATOR_REF_EXPR,
        Type(TypeExpr) => TYPE_EXPR,
        Pattern(PatternExpr) => PATTERN_EXPR,
        Missing(MissingExpr) => MISSING_EXPR,
    }
}

category! {
    Type {
        Simple(SimpleType) => SIMPLE_TYPE,
        Member(MemberType) => MEMBER_TYPE,
        Optional(OptionalType) => OPTIONAL_TYPE,
        ImplicitlyUnwrapped(ImplicitlyUnwrappedType) => IMPLICITLY_UNWRAPPED_TYPE,
        Array(ArrayType) => ARRAY_TYPE,
        Dictionary(DictionaryType) => DICTIONARY_TYPE,
        Tuple(TupleType) => TUPLE_TYPE,
        Function(FunctionType) => FUNCTION_TYPE,
        Attributed(AttributedType) => ATTRIBUTED_TYPE,
        SomeOrAny(SomeOrAnyType) => SOME_OR_ANY_TYPE,
        Composition(CompositionType) => COMPOSITION_TYPE,
        Missing(MissingType) => MISSING_TYPE,
    }
}

/// Anything that may appear in a statement list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodeBlockItem {
    Stmt(Stmt),
    Expr(Expr),
    Unexpected(Unexpected),
}

impl Node for CodeBlockItem {
    fn cast(syntax: SyntaxNode) -> Option<Self> {
        if syntax.kind() == UNEXPECTED {
            return Some(CodeBlockItem::Unexpected(Unexpected(syntax)));
        }
        match Stmt::cast(syntax.clone()) {
            Some(stmt) => Some(CodeBlockItem::Stmt(stmt)),
            None => Expr::cast(syntax).map(CodeBlockItem::Expr),
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            CodeBlockItem::Stmt(stmt) => stmt.syntax(),
            CodeBlockItem::Expr(expr) => expr.syntax(),
            CodeBlockItem::Unexpected(unexpected) => &unexpected.0,
        }
    }
}

fn child<N: Node>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn nth_child<N: Node>(parent: &SyntaxNode, n: usize) -> Option<N> {
    parent.children().filter_map(N::cast).nth(n)
}

fn children<'a, N: Node + 'a>(parent: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
    parent.children().filter_map(N::cast)
}

/// Nodes one list below `parent`, as in a switch body's cases.
fn grandchildren<'a, N: Node + 'a>(parent: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
    parent.children().flat_map(|list| list.children().filter_map(N::cast).collect::<Vec<_>>())
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent.child_tokens().find(|token| token.kind() == kind && token.is_present())
}

fn first_token_where(
    parent: &SyntaxNode,
    predicate: impl Fn(SyntaxKind) -> bool,
) -> Option<SyntaxToken> {
    parent.child_tokens().find(|token| predicate(token.kind()) && token.is_present())
}

impl SourceFile {
    pub fn items(&self) -> impl Iterator<Item = CodeBlockItem> + '_ {
        grandchildren(&self.0)
    }
}

impl CodeBlockItemList {
    pub fn items(&self) -> impl Iterator<Item = CodeBlockItem> + '_ {
        children(&self.0)
    }
}

impl CodeBlock {
    pub fn statements(&self) -> Option<CodeBlockItemList> {
        child(&self.0)
    }

    pub fn is_closed(&self) -> bool {
        token(&self.0, RIGHT_BRACE).is_some()
    }
}

impl IfStmt {
    pub fn conditions(&self) -> Option<ConditionElementList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<CodeBlock> {
        child(&self.0)
    }

    pub fn else_branch(&self) -> Option<ElseBranch> {
        token(&self.0, ELSE_KW)?;
        match nth_child::<CodeBlock>(&self.0, 1) {
            Some(block) => Some(ElseBranch::Block(block)),
            None => child::<IfStmt>(&self.0).map(ElseBranch::If),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElseBranch {
    Block(CodeBlock),
    If(IfStmt),
}

impl ConditionElementList {
    pub fn bindings(&self) -> impl Iterator<Item = OptionalBindingCondition> + '_ {
        self.0.descendants().filter_map(OptionalBindingCondition::cast)
    }
}

impl OptionalBindingCondition {
    pub fn pattern(&self) -> Option<Pattern> {
        child(&self.0)
    }

    /// `None` for the `if let x` shorthand.
    pub fn initializer(&self) -> Option<InitializerClause> {
        child(&self.0)
    }
}

impl SwitchStmt {
    pub fn subject(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn cases(&self) -> impl Iterator<Item = SwitchCase> + '_ {
        grandchildren(&self.0)
    }

    pub fn if_configs(&self) -> impl Iterator<Item = IfConfigDecl> + '_ {
        grandchildren(&self.0)
    }
}

impl IfConfigDecl {
    pub fn clauses(&self) -> impl Iterator<Item = IfConfigClause> + '_ {
        children(&self.0)
    }
}

impl IfConfigClause {
    pub fn directive(&self) -> Option<SyntaxToken> {
        first_token_where(&self.0, |kind| matches!(kind, POUND_IF | POUND_ELSEIF | POUND_ELSE))
    }
}

impl DoStmt {
    pub fn body(&self) -> Option<CodeBlock> {
        child(&self.0)
    }

    pub fn catch_clauses(&self) -> impl Iterator<Item = CatchClause> + '_ {
        children(&self.0)
    }
}

impl ForStmt {
    pub fn pattern(&self) -> Option<Pattern> {
        child(&self.0)
    }

    pub fn sequence(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<CodeBlock> {
        child(&self.0)
    }
}

impl ReturnStmt {
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl VariableDecl {
    pub fn is_mutable(&self) -> bool {
        token(&self.0, VAR_KW).is_some()
    }

    pub fn bindings(&self) -> impl Iterator<Item = PatternBinding> + '_ {
        grandchildren(&self.0)
    }
}

impl PatternBinding {
    pub fn pattern(&self) -> Option<Pattern> {
        child(&self.0)
    }

    pub fn type_annotation(&self) -> Option<TypeAnnotation> {
        child(&self.0)
    }

    pub fn initializer(&self) -> Option<InitializerClause> {
        child(&self.0)
    }
}

impl TypeAnnotation {
    pub fn ty(&self) -> Option<Type> {
        child(&self.0)
    }
}

impl InitializerClause {
    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl FunctionDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_where(&self.0, |kind| kind == IDENTIFIER || kind.is_operator())
    }

    pub fn signature(&self) -> Option<FunctionSignature> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<CodeBlock> {
        child(&self.0)
    }
}

impl FunctionSignature {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.0.children().filter(|node| node.kind() == PARAMETER_CLAUSE).flat_map(|clause| {
            clause.children().filter_map(Parameter::cast).collect::<Vec<_>>()
        })
    }

    pub fn return_type(&self) -> Option<Type> {
        self.0
            .children()
            .find(|node| node.kind() == RETURN_CLAUSE)
            .and_then(|clause| child(&clause))
    }
}

impl IdentifierPattern {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token_where(&self.0, |kind| kind == IDENTIFIER || kind.is_keyword())
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        nth_child(&self.0, 0)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        self.0.child_tokens().next()
    }

    pub fn rhs(&self) -> Option<Expr> {
        nth_child(&self.0, 1)
    }
}

impl TernaryExpr {
    pub fn condition(&self) -> Option<Expr> {
        nth_child(&self.0, 0)
    }

    pub fn then_branch(&self) -> Option<Expr> {
        nth_child(&self.0, 1)
    }

    pub fn else_branch(&self) -> Option<Expr> {
        nth_child(&self.0, 2)
    }
}

impl PrefixExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        self.0.child_tokens().next()
    }

    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl PostfixExpr {
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        self.0.child_tokens().next()
    }
}

impl TryExpr {
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl IdentifierExpr {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.0.child_tokens().find(SyntaxToken::is_present)
    }
}

impl StringLiteralExpr {
    /// Number of `#` in the raw delimiter, 0 for plain literals.
    pub fn delimiter_len(&self) -> usize {
        token(&self.0, RAW_STRING_DELIMITER).map_or(0, |delimiter| delimiter.text_trimmed().len())
    }

    pub fn is_multiline(&self) -> bool {
        token(&self.0, MULTILINE_STRING_QUOTE).is_some()
    }

    pub fn interpolations(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|node| node.kind() == STRING_SEGMENT_LIST)
            .flat_map(|list| {
                list.children().filter(|node| node.kind() == EXPRESSION_SEGMENT).collect::<Vec<_>>()
            })
    }
}

impl ArrayExpr {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .flat_map(|list| {
                list.children().filter(|node| node.kind() == ARRAY_ELEMENT).collect::<Vec<_>>()
            })
            .filter_map(|element| child(&element))
    }
}

impl DictionaryExpr {
    pub fn entries(&self) -> impl Iterator<Item = (Option<Expr>, Option<Expr>)> + '_ {
        self.0
            .children()
            .flat_map(|list| {
                list.children()
                    .filter(|node| node.kind() == DICTIONARY_ELEMENT)
                    .collect::<Vec<_>>()
            })
            .map(|element| (nth_child(&element, 0), nth_child(&element, 1)))
    }
}

impl ClosureExpr {
    pub fn signature(&self) -> Option<ClosureSignature> {
        child(&self.0)
    }

    pub fn statements(&self) -> Option<CodeBlockItemList> {
        child(&self.0)
    }
}

impl FunctionCallExpr {
    pub fn callee(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn arguments(&self) -> impl Iterator<Item = LabeledArgument> + '_ {
        grandchildren(&self.0)
    }

    pub fn trailing_closure(&self) -> Option<ClosureExpr> {
        child(&self.0)
    }
}

impl LabeledArgument {
    pub fn label(&self) -> Option<SyntaxToken> {
        token(&self.0, COLON)?;
        self.0.child_tokens().find(|token| token.kind() != COLON && token.is_present())
    }

    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl MemberAccessExpr {
    pub fn base(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        self.0.child_tokens().filter(SyntaxToken::is_present).last()
    }
}

impl KeyPathExpr {
    pub fn root(&self) -> Option<SyntaxNode> {
        self.0.children().find(|node| node.kind() != KEY_PATH_COMPONENT_LIST)
    }

    pub fn components(&self) -> impl Iterator<Item = KeyPathComponent> + '_ {
        self.0.descendants().filter_map(KeyPathComponent::cast)
    }
}

impl Unexpected {
    pub fn text(&self) -> String {
        self.0.text_trimmed()
    }
}
