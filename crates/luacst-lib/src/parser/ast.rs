//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Accessors return `None` where recovery left a piece out.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken, token_sets};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Chunk, Chunk);
ast_node!(Block, Block);
ast_node!(Garbage, Garbage);

ast_node!(AssignmentStatement, AssignmentStatement);
ast_node!(CallStatement, CallStatement);
ast_node!(ExpressionStatement, ExpressionStatement);
ast_node!(DoStatement, DoStatement);
ast_node!(WhileStatement, WhileStatement);
ast_node!(RepeatStatement, RepeatStatement);
ast_node!(IfStatement, IfStatement);
ast_node!(ThenBranch, ThenBranch);
ast_node!(ElseifBranch, ElseifBranch);
ast_node!(ElseBranch, ElseBranch);
ast_node!(SimpleForStatement, SimpleForStatement);
ast_node!(RangeForStatement, RangeForStatement);
ast_node!(FunctionDefinitionStatement, FunctionDefinitionStatement);
ast_node!(FunctionName, FunctionName);
ast_node!(LocalFunctionStatement, LocalFunctionStatement);
ast_node!(LocalNameStatement, LocalNameStatement);
ast_node!(ReturnStatement, ReturnStatement);
ast_node!(BreakStatement, BreakStatement);
ast_node!(GotoStatement, GotoStatement);
ast_node!(LabelStatement, LabelStatement);

ast_node!(Name, Name);
ast_node!(NameList, NameList);
ast_node!(NameRef, NameRef);
ast_node!(Variable, Variable);
ast_node!(VariableList, VariableList);

ast_node!(ParenExpression, ParenExpression);
ast_node!(IndexExpression, IndexExpression);
ast_node!(CallExpression, CallExpression);
ast_node!(ExpressionList, ExpressionList);
ast_node!(NilLiteral, NilLiteral);
ast_node!(BooleanLiteral, BooleanLiteral);
ast_node!(NumberLiteral, NumberLiteral);
ast_node!(StringLiteral, StringLiteral);
ast_node!(VarargLiteral, VarargLiteral);
ast_node!(BinaryExpression, BinaryExpression);
ast_node!(UnaryExpression, UnaryExpression);
ast_node!(TableExpression, TableExpression);
ast_node!(TableField, TableField);
ast_node!(FunctionExpression, FunctionExpression);
ast_node!(FunctionBody, FunctionBody);
ast_node!(ParameterList, ParameterList);
ast_node!(ArgumentList, ArgumentList);

/// Any expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Nil(NilLiteral),
    Boolean(BooleanLiteral),
    Number(NumberLiteral),
    String(StringLiteral),
    Vararg(VarargLiteral),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Paren(ParenExpression),
    Index(IndexExpression),
    Call(CallExpression),
    NameRef(NameRef),
    Table(TableExpression),
    Function(FunctionExpression),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::NilLiteral => NilLiteral::cast(node).map(Expr::Nil),
            SyntaxKind::BooleanLiteral => BooleanLiteral::cast(node).map(Expr::Boolean),
            SyntaxKind::NumberLiteral => NumberLiteral::cast(node).map(Expr::Number),
            SyntaxKind::StringLiteral => StringLiteral::cast(node).map(Expr::String),
            SyntaxKind::VarargLiteral => VarargLiteral::cast(node).map(Expr::Vararg),
            SyntaxKind::BinaryExpression => BinaryExpression::cast(node).map(Expr::Binary),
            SyntaxKind::UnaryExpression => UnaryExpression::cast(node).map(Expr::Unary),
            SyntaxKind::ParenExpression => ParenExpression::cast(node).map(Expr::Paren),
            SyntaxKind::IndexExpression => IndexExpression::cast(node).map(Expr::Index),
            SyntaxKind::CallExpression => CallExpression::cast(node).map(Expr::Call),
            SyntaxKind::NameRef => NameRef::cast(node).map(Expr::NameRef),
            SyntaxKind::TableExpression => TableExpression::cast(node).map(Expr::Table),
            SyntaxKind::FunctionExpression => FunctionExpression::cast(node).map(Expr::Function),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Nil(n) => n.as_cst(),
            Expr::Boolean(n) => n.as_cst(),
            Expr::Number(n) => n.as_cst(),
            Expr::String(n) => n.as_cst(),
            Expr::Vararg(n) => n.as_cst(),
            Expr::Binary(n) => n.as_cst(),
            Expr::Unary(n) => n.as_cst(),
            Expr::Paren(n) => n.as_cst(),
            Expr::Index(n) => n.as_cst(),
            Expr::Call(n) => n.as_cst(),
            Expr::NameRef(n) => n.as_cst(),
            Expr::Table(n) => n.as_cst(),
            Expr::Function(n) => n.as_cst(),
        }
    }
}

/// Any statement node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Assignment(AssignmentStatement),
    Call(CallStatement),
    Expression(ExpressionStatement),
    Do(DoStatement),
    While(WhileStatement),
    Repeat(RepeatStatement),
    If(IfStatement),
    SimpleFor(SimpleForStatement),
    RangeFor(RangeForStatement),
    FunctionDefinition(FunctionDefinitionStatement),
    LocalFunction(LocalFunctionStatement),
    LocalName(LocalNameStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Goto(GotoStatement),
    Label(LabelStatement),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::AssignmentStatement => AssignmentStatement::cast(node).map(Stmt::Assignment),
            SyntaxKind::CallStatement => CallStatement::cast(node).map(Stmt::Call),
            SyntaxKind::ExpressionStatement => ExpressionStatement::cast(node).map(Stmt::Expression),
            SyntaxKind::DoStatement => DoStatement::cast(node).map(Stmt::Do),
            SyntaxKind::WhileStatement => WhileStatement::cast(node).map(Stmt::While),
            SyntaxKind::RepeatStatement => RepeatStatement::cast(node).map(Stmt::Repeat),
            SyntaxKind::IfStatement => IfStatement::cast(node).map(Stmt::If),
            SyntaxKind::SimpleForStatement => SimpleForStatement::cast(node).map(Stmt::SimpleFor),
            SyntaxKind::RangeForStatement => RangeForStatement::cast(node).map(Stmt::RangeFor),
            SyntaxKind::FunctionDefinitionStatement => {
                FunctionDefinitionStatement::cast(node).map(Stmt::FunctionDefinition)
            }
            SyntaxKind::LocalFunctionStatement => {
                LocalFunctionStatement::cast(node).map(Stmt::LocalFunction)
            }
            SyntaxKind::LocalNameStatement => LocalNameStatement::cast(node).map(Stmt::LocalName),
            SyntaxKind::ReturnStatement => ReturnStatement::cast(node).map(Stmt::Return),
            SyntaxKind::BreakStatement => BreakStatement::cast(node).map(Stmt::Break),
            SyntaxKind::GotoStatement => GotoStatement::cast(node).map(Stmt::Goto),
            SyntaxKind::LabelStatement => LabelStatement::cast(node).map(Stmt::Label),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Stmt::Assignment(n) => n.as_cst(),
            Stmt::Call(n) => n.as_cst(),
            Stmt::Expression(n) => n.as_cst(),
            Stmt::Do(n) => n.as_cst(),
            Stmt::While(n) => n.as_cst(),
            Stmt::Repeat(n) => n.as_cst(),
            Stmt::If(n) => n.as_cst(),
            Stmt::SimpleFor(n) => n.as_cst(),
            Stmt::RangeFor(n) => n.as_cst(),
            Stmt::FunctionDefinition(n) => n.as_cst(),
            Stmt::LocalFunction(n) => n.as_cst(),
            Stmt::LocalName(n) => n.as_cst(),
            Stmt::Return(n) => n.as_cst(),
            Stmt::Break(n) => n.as_cst(),
            Stmt::Goto(n) => n.as_cst(),
            Stmt::Label(n) => n.as_cst(),
        }
    }
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| !t.kind().is_trivia())
}

impl Chunk {
    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn garbage(&self) -> Option<Garbage> {
        self.0.children().find_map(Garbage::cast)
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::StatementList)
            .into_iter()
            .flat_map(|list| list.children())
            .filter_map(Stmt::cast)
    }
}

impl Garbage {
    /// Statements recovered from inside the garbage.
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl AssignmentStatement {
    pub fn targets(&self) -> Option<VariableList> {
        self.0.children().find_map(VariableList::cast)
    }

    pub fn values(&self) -> Option<ExpressionList> {
        self.0.children().find_map(ExpressionList::cast)
    }
}

impl CallStatement {
    pub fn call(&self) -> Option<CallExpression> {
        self.0.children().find_map(CallExpression::cast)
    }
}

impl ExpressionStatement {
    pub fn exprs(&self) -> Option<ExpressionList> {
        self.0.children().find_map(ExpressionList::cast)
    }
}

impl DoStatement {
    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl WhileStatement {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl RepeatStatement {
    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl IfStatement {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn then_branch(&self) -> Option<ThenBranch> {
        self.0.children().find_map(ThenBranch::cast)
    }

    pub fn elseif_branches(&self) -> impl Iterator<Item = ElseifBranch> + '_ {
        self.0.children().filter_map(ElseifBranch::cast)
    }

    pub fn else_branch(&self) -> Option<ElseBranch> {
        self.0.children().find_map(ElseBranch::cast)
    }
}

impl ThenBranch {
    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl ElseifBranch {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl ElseBranch {
    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl SimpleForStatement {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    /// Start, limit, and optional step.
    pub fn bounds(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl RangeForStatement {
    pub fn names(&self) -> Option<NameList> {
        self.0.children().find_map(NameList::cast)
    }

    pub fn exprs(&self) -> Option<ExpressionList> {
        self.0.children().find_map(ExpressionList::cast)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl FunctionDefinitionStatement {
    pub fn name(&self) -> Option<FunctionName> {
        self.0.children().find_map(FunctionName::cast)
    }

    pub fn body(&self) -> Option<FunctionBody> {
        self.0.children().find_map(FunctionBody::cast)
    }
}

impl FunctionName {
    /// Declared name when the function name is a single identifier.
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    /// Table the function is stored into, for `a.b.c` and `a:m` forms.
    pub fn base(&self) -> Option<NameRef> {
        self.0.children().find_map(NameRef::cast)
    }

    /// Whether the name ends with `:method`.
    pub fn is_method(&self) -> bool {
        token(&self.0, SyntaxKind::Colon).is_some()
    }
}

impl LocalFunctionStatement {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn body(&self) -> Option<FunctionBody> {
        self.0.children().find_map(FunctionBody::cast)
    }
}

impl LocalNameStatement {
    pub fn names(&self) -> Option<NameList> {
        self.0.children().find_map(NameList::cast)
    }

    pub fn values(&self) -> Option<ExpressionList> {
        self.0.children().find_map(ExpressionList::cast)
    }
}

impl ReturnStatement {
    pub fn values(&self) -> Option<ExpressionList> {
        self.0.children().find_map(ExpressionList::cast)
    }
}

impl GotoStatement {
    pub fn label(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

impl LabelStatement {
    pub fn label(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn text(&self) -> String {
        self.ident().map(|t| t.text().to_string()).unwrap_or_default()
    }
}

impl NameList {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.0.children().filter_map(Name::cast)
    }
}

impl NameRef {
    pub fn ident(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn text(&self) -> String {
        self.ident().map(|t| t.text().to_string()).unwrap_or_default()
    }
}

impl Variable {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl VariableList {
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.children().filter_map(Variable::cast)
    }
}

impl ParenExpression {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl IndexExpression {
    pub fn base(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// Field name in `a.name` and `a:name`.
    pub fn field(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    /// Key expression in `a[key]`.
    pub fn key(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn is_method(&self) -> bool {
        token(&self.0, SyntaxKind::Colon).is_some()
    }
}

impl CallExpression {
    pub fn callee(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn arguments(&self) -> Option<ArgumentList> {
        self.0.children().find_map(ArgumentList::cast)
    }
}

impl ArgumentList {
    /// `f(a, b)` yields both expressions; `f{...}` and `f"..."` yield the single literal.
    pub fn args(&self) -> Vec<Expr> {
        match self.0.children().find_map(ExpressionList::cast) {
            Some(list) => list.exprs().collect(),
            None => self.0.children().filter_map(Expr::cast).collect(),
        }
    }
}

impl ExpressionList {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl BooleanLiteral {
    pub fn value(&self) -> bool {
        token(&self.0, SyntaxKind::KwTrue).is_some()
    }
}

impl NumberLiteral {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0).filter(|t| token_sets::NUMBERS.contains(t.kind()))
    }
}

impl StringLiteral {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0).filter(|t| token_sets::STRINGS.contains(t.kind()))
    }
}

impl BinaryExpression {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::BinaryOperator)
            .and_then(|n| first_token(&n))
    }
}

impl UnaryExpression {
    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::UnaryOperator)
            .and_then(|n| first_token(&n))
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl TableExpression {
    pub fn fields(&self) -> impl Iterator<Item = TableField> + '_ {
        self.0.children().filter_map(TableField::cast)
    }
}

impl TableField {
    /// Key of a `name = value` field.
    pub fn name(&self) -> Option<SyntaxToken> {
        if token(&self.0, SyntaxKind::Equals).is_none() {
            return None;
        }
        token(&self.0, SyntaxKind::Ident)
    }

    /// Key of a `[key] = value` field.
    pub fn key(&self) -> Option<Expr> {
        token(&self.0, SyntaxKind::BracketOpen)?;
        self.0.children().find_map(Expr::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        if token(&self.0, SyntaxKind::BracketOpen).is_some() {
            return self.0.children().filter_map(Expr::cast).nth(1);
        }
        self.0.children().find_map(Expr::cast)
    }
}

impl FunctionExpression {
    pub fn body(&self) -> Option<FunctionBody> {
        self.0.children().find_map(FunctionBody::cast)
    }
}

impl FunctionBody {
    pub fn parameters(&self) -> Option<ParameterList> {
        self.0.children().find_map(ParameterList::cast)
    }

    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl ParameterList {
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.0.children().filter_map(Name::cast)
    }

    pub fn is_vararg(&self) -> bool {
        token(&self.0, SyntaxKind::Ellipsis).is_some()
    }
}
