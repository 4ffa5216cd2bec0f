use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Span};

use super::{ast::NodeId, types::Type};

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// The name referenced by an object-less `Get`, if this is one.
    pub fn as_bare_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Get { object: None, name } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Group(Box<Expr>),
    Literal(Literal),
    /// `name` when `object` is absent, `object.name` otherwise
    Get {
        object: Option<Box<Expr>>,
        name: String,
    },
    Set {
        target: AssignTarget,
        operator: AssignOperator,
        value: Box<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
        postfix: bool,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `callee(arguments)` or `callee[argument]`, told apart by `site`
    Call {
        site: CallSite,
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Cast {
        operand: Box<Expr>,
        target: Type,
    },
    New {
        target: Type,
        arguments: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Char(char),
    Number(f64),
    String(String),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    /// `(`
    Invoke,
    /// `[`
    Index,
}

/// The three shapes an assignment may write to.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Name(String),
    Member { object: Box<Expr>, name: String },
    Index { object: Box<Expr>, index: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl AssignOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Assignment => Some(AssignOperator::Assign),
            TokenKind::PlusEquals => Some(AssignOperator::Add),
            TokenKind::MinusEquals => Some(AssignOperator::Subtract),
            TokenKind::StarEquals => Some(AssignOperator::Multiply),
            TokenKind::SlashEquals => Some(AssignOperator::Divide),
            TokenKind::PercentEquals => Some(AssignOperator::Remainder),
            _ => None,
        }
    }
}

impl Display for AssignOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            AssignOperator::Assign => "=",
            AssignOperator::Add => "+=",
            AssignOperator::Subtract => "-=",
            AssignOperator::Multiply => "*=",
            AssignOperator::Divide => "/=",
            AssignOperator::Remainder => "%=",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
    Increment,
    Decrement,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Not => Some(UnaryOperator::Not),
            TokenKind::Dash => Some(UnaryOperator::Negate),
            TokenKind::PlusPlus => Some(UnaryOperator::Increment),
            TokenKind::MinusMinus => Some(UnaryOperator::Decrement),
            _ => None,
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Negate => "-",
            UnaryOperator::Increment => "++",
            UnaryOperator::Decrement => "--",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    And,
    Or,
    Equals,
    NotEquals,
    ApproxEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::And => Some(BinaryOperator::And),
            TokenKind::Or => Some(BinaryOperator::Or),
            TokenKind::Equals => Some(BinaryOperator::Equals),
            TokenKind::NotEquals => Some(BinaryOperator::NotEquals),
            TokenKind::TildeEquals => Some(BinaryOperator::ApproxEquals),
            TokenKind::Less => Some(BinaryOperator::Less),
            TokenKind::LessEquals => Some(BinaryOperator::LessEquals),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEquals),
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::Percent => Some(BinaryOperator::Remainder),
            TokenKind::Caret => Some(BinaryOperator::Power),
            _ => None,
        }
    }

    pub fn is_equality(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Equals | BinaryOperator::NotEquals | BinaryOperator::ApproxEquals
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Less
                | BinaryOperator::LessEquals
                | BinaryOperator::Greater
                | BinaryOperator::GreaterEquals
        )
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::ApproxEquals => "~=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Power => "^",
        };
        write!(f, "{}", symbol)
    }
}
