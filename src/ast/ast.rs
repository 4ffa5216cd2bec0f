use std::{fmt::Display, rc::Rc};

use crate::Span;

use super::{expressions::Expr, statements::BlockStmt, types::Type};

/// Identity of an expression node, unique within one compilation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A parsed source file and its top level declarations, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub path: Rc<String>,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable(VariableDecl),
    Function(FunctionDecl),
    Enum(EnumDecl),
    Delegate(DelegateDecl),
    Struct(StructDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Variable(decl) => &decl.name,
            Declaration::Function(decl) => &decl.name,
            Declaration::Enum(decl) => &decl.name,
            Declaration::Delegate(decl) => &decl.name,
            Declaration::Struct(decl) => &decl.name,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Declaration::Variable(decl) => &decl.span,
            Declaration::Function(decl) => &decl.span,
            Declaration::Enum(decl) => &decl.span,
            Declaration::Delegate(decl) => &decl.span,
            Declaration::Struct(decl) => &decl.span,
        }
    }
}

/// A variable: a global, a local, or a struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub ty: Type,
    pub name: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub ty: Type,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub return_type: Type,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Option<BlockStmt>,
    /// The delegate type describing this function's signature
    pub delegate: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelegateDecl {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<VariableDecl>,
    pub span: Span,
}
