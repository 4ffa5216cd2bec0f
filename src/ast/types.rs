//! Type representations shared by the parser, the registry and the checker.
//!
//! A type is identified by its canonical path. Two types are the same type
//! exactly when their paths are equal:
//!
//! - `Primitive(name)` has the path `name`
//! - `Array(element)` has the path `element[]`
//! - `Map { key, value }` has the path `value[key]`

use std::fmt::Display;

pub const BOOL: &str = "bool";
pub const NUM: &str = "num";
pub const CHAR: &str = "char";
pub const STRING: &str = "string";
pub const OBJECT: &str = "object";
pub const VOID: &str = "void";
pub const NULL: &str = "null";

/// Names of the builtin primitive types, the null type included.
pub const BUILTIN_TYPES: [&str; 7] = [BOOL, NUM, CHAR, STRING, OBJECT, VOID, NULL];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A builtin type or a struct, enum or delegate name
    Primitive(String),
    Array(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
}

impl Type {
    pub fn primitive(name: &str) -> Type {
        Type::Primitive(name.to_string())
    }

    pub fn array(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    pub fn map(key: Type, value: Type) -> Type {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn bool() -> Type {
        Type::primitive(BOOL)
    }

    pub fn num() -> Type {
        Type::primitive(NUM)
    }

    pub fn char() -> Type {
        Type::primitive(CHAR)
    }

    pub fn string() -> Type {
        Type::primitive(STRING)
    }

    pub fn object() -> Type {
        Type::primitive(OBJECT)
    }

    pub fn void() -> Type {
        Type::primitive(VOID)
    }

    pub fn null() -> Type {
        Type::primitive(NULL)
    }

    /// The canonical path used as this type's identity.
    pub fn path(&self) -> String {
        match self {
            Type::Primitive(name) => name.clone(),
            Type::Array(element) => format!("{}[]", element.path()),
            Type::Map { key, value } => format!("{}[{}]", value.path(), key.path()),
        }
    }

    /// Whether this is the primitive called `name`.
    pub fn is(&self, name: &str) -> bool {
        matches!(self, Type::Primitive(primitive) if primitive == name)
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Type::Primitive(name) if BUILTIN_TYPES.contains(&name.as_str()))
    }

    pub fn primitive_name(&self) -> Option<&str> {
        match self {
            Type::Primitive(name) => Some(name),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
