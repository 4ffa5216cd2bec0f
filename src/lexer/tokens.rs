use lazy_static::lazy_static;
use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("struct", TokenKind::Struct);
        map.insert("enum", TokenKind::Enum);
        map.insert("delegate", TokenKind::Delegate);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("new", TokenKind::New);
        map.insert("as", TokenKind::As);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map.insert("bool", TokenKind::Bool);
        map.insert("num", TokenKind::Num);
        map.insert("char", TokenKind::Char);
        map.insert("string", TokenKind::StringType);
        map.insert("object", TokenKind::Object);
        map.insert("void", TokenKind::Void);
        map
    };

    /// Words the JavaScript target reserves. Identifiers are emitted verbatim,
    /// so none of these may reach the parser as a name.
    pub static ref TARGET_RESERVED: HashSet<&'static str> = [
        "arguments", "async", "await", "case", "catch", "class", "const", "debugger",
        "default", "delete", "do", "eval", "export", "extends", "finally", "function",
        "implements", "import", "in", "instanceof", "interface", "let", "of", "package",
        "private", "protected", "public", "static", "super", "switch", "this", "throw",
        "try", "typeof", "undefined", "var", "with", "yield", "NaN", "Infinity",
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Synthetic marker opening every file, its value is the file path
    File,
    EOF,
    Number,
    String,
    CharLiteral,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=
    TildeEquals, // ~=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Comma,

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,
    PercentEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
    Caret,

    // Reserved
    Struct,
    Enum,
    Delegate,
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,
    New,
    As,
    True,
    False,
    Null,

    // Primitive types
    Bool,
    Num,
    Char,
    StringType,
    Object,
    Void,
}

impl TokenKind {
    /// Whether the token names one of the builtin primitive types.
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Bool
                | TokenKind::Num
                | TokenKind::Char
                | TokenKind::StringType
                | TokenKind::Object
                | TokenKind::Void
        )
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::CharLiteral,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::File,
        ]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
