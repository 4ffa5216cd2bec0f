use std::slice::Iter;

use crate::Span;

use super::{ast::VariableDecl, expressions::Expr};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    VarDecl(VariableDecl),
    Expression(ExpressionStmt),
    Control(ControlStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Control(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Return,
    Break,
    Continue,
}

/// `return`, `break` or `continue`, with an optional value.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlStmt {
    pub kind: ControlKind,
    pub value: Option<Expr>,
    pub span: Span,
}

/// One link of an `if` / `else if` / `else` chain. `next` holds another
/// `Stmt::If` for `else if`, or the plain `else` body.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub next: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    /// Variable declarations or expression statements
    pub initializers: Vec<Stmt>,
    pub condition: Option<Expr>,
    pub iterators: Vec<Expr>,
    pub body: Box<Stmt>,
    pub span: Span,
}
