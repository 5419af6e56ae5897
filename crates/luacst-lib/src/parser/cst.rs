//! Syntax kinds for Lua.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `LuaLanguage` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

use super::lexer::{lex_comment, lex_long_string, lex_quoted_string};

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("and")]
    KwAnd = 0,
    #[token("break")]
    KwBreak,
    #[token("do")]
    KwDo,
    #[token("else")]
    KwElse,
    #[token("elseif")]
    KwElseif,
    #[token("end")]
    KwEnd,
    #[token("false")]
    KwFalse,
    #[token("for")]
    KwFor,
    #[token("function")]
    KwFunction,
    #[token("goto")]
    KwGoto,
    #[token("if")]
    KwIf,
    #[token("in")]
    KwIn,
    #[token("local")]
    KwLocal,
    #[token("nil")]
    KwNil,
    #[token("not")]
    KwNot,
    #[token("or")]
    KwOr,
    #[token("repeat")]
    KwRepeat,
    #[token("return")]
    KwReturn,
    #[token("then")]
    KwThen,
    #[token("true")]
    KwTrue,
    #[token("until")]
    KwUntil,
    #[token("while")]
    KwWhile,

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,

    /// `::` label delimiter. Defined before `Colon` for correct precedence.
    #[token("::")]
    DoubleColon,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    /// String concatenation
    #[token("..")]
    DotDot,
    /// Vararg `...`
    #[token("...")]
    Ellipsis,

    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("|")]
    Pipe,
    #[token("&")]
    Ampersand,
    /// Bitwise not (prefix) and exclusive or (infix)
    #[token("~")]
    Tilde,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    /// Floor division
    #[token("//")]
    DoubleSlash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    /// Length operator
    #[token("#")]
    Hash,

    #[token("<")]
    Less,
    #[token("<=")]
    LessEquals,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEquals,
    #[token("==")]
    EqualsEquals,
    #[token("~=")]
    TildeEquals,
    #[token("=")]
    Equals,

    #[regex(r"[0-9]+")]
    DecInt,
    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexInt,
    /// Leading-zero integer such as `017`.
    #[regex(r"0[0-7]+")]
    OctInt,
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    #[regex(r"0[xX][0-9a-fA-F]*\.[0-9a-fA-F]*([pP][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+[pP][+-]?[0-9]+")]
    RealNumber,

    #[token("'", lex_quoted_string)]
    SingleQuotedString,
    #[token("\"", lex_quoted_string)]
    DoubleQuotedString,
    /// `[[ ... ]]` with any matching number of `=` between the brackets.
    #[regex(r"\[=*\[", lex_long_string)]
    LongString,

    /// Identifier. Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    Newline,

    #[token("--", lex_comment)]
    #[doc(hidden)]
    Comment, // Lexer-internal only

    LineComment,
    BlockComment,

    /// Unrecognized character, one per Unicode scalar
    InvalidChar,

    // --- Node kinds (non-terminals) ---
    Chunk,
    Block,
    StatementList,

    AssignmentStatement,
    CallStatement,
    ExpressionStatement,
    DoStatement,
    WhileStatement,
    RepeatStatement,
    IfStatement,
    ThenBranch,
    ElseifBranch,
    ElseBranch,
    SimpleForStatement,
    RangeForStatement,
    FunctionDefinitionStatement,
    FunctionName,
    LocalFunctionStatement,
    LocalNameStatement,
    ReturnStatement,
    BreakStatement,
    GotoStatement,
    LabelStatement,

    /// Declaration site of a name
    Name,
    NameList,
    /// Use site of a name
    NameRef,
    Variable,
    VariableList,

    ParenExpression,
    IndexExpression,
    CallExpression,
    ExpressionList,

    NilLiteral,
    BooleanLiteral,
    NumberLiteral,
    StringLiteral,
    VarargLiteral,

    BinaryExpression,
    BinaryOperator,
    UnaryExpression,
    UnaryOperator,

    TableExpression,
    TableField,
    TableFieldSeparator,

    FunctionExpression,
    FunctionBody,
    ParameterList,
    ArgumentList,

    /// Unparseable input after the top-level block
    Garbage,
    Error,

    /// Abandoned marker; never reaches the tree.
    #[doc(hidden)]
    Tombstone,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage | InvalidChar)
    }

    #[inline]
    pub fn is_token(self) -> bool {
        self < Chunk
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        token_sets::KEYWORDS.contains(self)
    }

    /// Source spelling for fixed-text tokens, used in "expected" messages.
    pub fn spelling(self) -> Option<&'static str> {
        let text = match self {
            KwAnd => "and",
            KwBreak => "break",
            KwDo => "do",
            KwElse => "else",
            KwElseif => "elseif",
            KwEnd => "end",
            KwFalse => "false",
            KwFor => "for",
            KwFunction => "function",
            KwGoto => "goto",
            KwIf => "if",
            KwIn => "in",
            KwLocal => "local",
            KwNil => "nil",
            KwNot => "not",
            KwOr => "or",
            KwRepeat => "repeat",
            KwReturn => "return",
            KwThen => "then",
            KwTrue => "true",
            KwUntil => "until",
            KwWhile => "while",
            ParenOpen => "(",
            ParenClose => ")",
            BraceOpen => "{",
            BraceClose => "}",
            BracketOpen => "[",
            BracketClose => "]",
            DoubleColon => "::",
            Semicolon => ";",
            Colon => ":",
            Comma => ",",
            Dot => ".",
            DotDot => "..",
            Ellipsis => "...",
            Shl => "<<",
            Shr => ">>",
            Pipe => "|",
            Ampersand => "&",
            Tilde => "~",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            DoubleSlash => "//",
            Percent => "%",
            Caret => "^",
            Hash => "#",
            Less => "<",
            LessEquals => "<=",
            Greater => ">",
            GreaterEquals => ">=",
            EqualsEquals => "==",
            TildeEquals => "~=",
            Equals => "=",
            _ => return None,
        };
        Some(text)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LuaLanguage {}

impl Language for LuaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<LuaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<LuaLanguage>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Creates an empty token set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Named token groups shared by the lexer consumers and the parser.
pub mod token_sets {
    use super::*;

    pub const KEYWORDS: TokenSet = TokenSet::new(&[
        KwAnd, KwBreak, KwDo, KwElse, KwElseif, KwEnd, KwFalse, KwFor, KwFunction, KwGoto, KwIf,
        KwIn, KwLocal, KwNil, KwNot, KwOr, KwRepeat, KwReturn, KwThen, KwTrue, KwUntil, KwWhile,
    ]);

    /// `true`, `false`, `nil`
    pub const CONSTANTS: TokenSet = TokenSet::new(&[KwTrue, KwFalse, KwNil]);

    pub const NUMBERS: TokenSet = TokenSet::new(&[DecInt, HexInt, OctInt, RealNumber]);

    pub const STRINGS: TokenSet =
        TokenSet::new(&[SingleQuotedString, DoubleQuotedString, LongString]);

    pub const LITERALS: TokenSet = CONSTANTS.union(NUMBERS).union(STRINGS);

    pub const COMMENTS: TokenSet = TokenSet::new(&[LineComment, BlockComment]);

    pub const TRIVIA: TokenSet = TokenSet::new(&[Whitespace, Newline, LineComment, BlockComment]);

    pub const OPERATORS: TokenSet = TokenSet::new(&[
        DotDot,
        Shl,
        Shr,
        Pipe,
        Ampersand,
        Tilde,
        Plus,
        Minus,
        Star,
        Slash,
        DoubleSlash,
        Percent,
        Caret,
        Hash,
        Less,
        LessEquals,
        Greater,
        GreaterEquals,
        EqualsEquals,
        TildeEquals,
        Equals,
    ]);

    // Binary operator sets, one per precedence level (lowest first).
    pub const OR_OPS: TokenSet = TokenSet::single(KwOr);
    pub const AND_OPS: TokenSet = TokenSet::single(KwAnd);
    pub const RELATIONAL_OPS: TokenSet = TokenSet::new(&[
        Less,
        LessEquals,
        Greater,
        GreaterEquals,
        EqualsEquals,
        TildeEquals,
    ]);
    pub const BIT_OR_OPS: TokenSet = TokenSet::single(Pipe);
    pub const BIT_XOR_OPS: TokenSet = TokenSet::single(Tilde);
    pub const BIT_AND_OPS: TokenSet = TokenSet::single(Ampersand);
    pub const SHIFT_OPS: TokenSet = TokenSet::new(&[Shl, Shr]);
    pub const CONCAT_OPS: TokenSet = TokenSet::single(DotDot);
    pub const ADDITIVE_OPS: TokenSet = TokenSet::new(&[Plus, Minus]);
    pub const MULTIPLICATIVE_OPS: TokenSet = TokenSet::new(&[Star, Slash, DoubleSlash, Percent]);
    pub const UNARY_OPERATORS: TokenSet = TokenSet::new(&[KwNot, Hash, Minus, Tilde]);
    pub const POWER_OPS: TokenSet = TokenSet::single(Caret);

    pub const BINARY_OPERATORS: TokenSet = OR_OPS
        .union(AND_OPS)
        .union(RELATIONAL_OPS)
        .union(BIT_OR_OPS)
        .union(BIT_XOR_OPS)
        .union(BIT_AND_OPS)
        .union(SHIFT_OPS)
        .union(CONCAT_OPS)
        .union(ADDITIVE_OPS)
        .union(MULTIPLICATIVE_OPS)
        .union(POWER_OPS);

    pub const FIELD_SEPARATORS: TokenSet = TokenSet::new(&[Comma, Semicolon]);

    /// Suffixes that extend a prefix-expression chain.
    pub const CHAIN_SUFFIX_FIRST: TokenSet = TokenSet::new(&[
        Dot,
        Colon,
        BracketOpen,
        ParenOpen,
        BraceOpen,
        SingleQuotedString,
        DoubleQuotedString,
        LongString,
    ]);

    /// FIRST set of expr.
    pub const EXPR_FIRST: TokenSet = LITERALS.union(UNARY_OPERATORS).union(TokenSet::new(&[
        Ellipsis, BraceOpen, KwFunction, ParenOpen, Ident,
    ]));

    /// FIRST set of statements.
    pub const STATEMENT_FIRST: TokenSet = TokenSet::new(&[
        KwDo,
        KwWhile,
        KwRepeat,
        KwIf,
        KwFor,
        KwFunction,
        KwLocal,
        KwBreak,
        KwReturn,
        KwGoto,
        DoubleColon,
        Ident,
        ParenOpen,
    ]);

    /// Tokens worth re-parsing as a statement inside trailing garbage.
    pub const GARBAGE_STATEMENT_FIRST: TokenSet = TokenSet::new(&[
        KwFunction, KwDo, KwWhile, KwRepeat, Ident, KwIf, KwFor,
    ]);
}
