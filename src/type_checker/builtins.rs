//! Builtin container operations.
//!
//! The prelude declares `array` and `map` with `object` based signatures.
//! Calls of the form `array.method(...)` and `map.method(...)` are checked
//! against this table instead, so that element, key and value types flow
//! through to the result.

/// The namespace a builtin lives in, named after its prelude global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Array,
    Map,
}

impl Namespace {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "array" => Some(Namespace::Array),
            "map" => Some(Namespace::Map),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Namespace::Array => "array",
            Namespace::Map => "map",
        }
    }
}

/// What an argument must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRule {
    /// The array or map operated on
    Container,
    Num,
    /// Assignable to the array's element type
    Element,
    /// Assignable to the map's key type
    Key,
    /// Assignable to the map's value type
    Value,
    /// `null` or a delegate comparing two elements
    Comparator,
}

/// What a call evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnRule {
    Void,
    Num,
    Bool,
    Element,
    Value,
    Container,
    Keys,
    Values,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    pub namespace: Namespace,
    pub method: &'static str,
    pub arguments: &'static [ArgumentRule],
    pub returns: ReturnRule,
}

use ArgumentRule::*;

const fn builtin(
    namespace: Namespace,
    method: &'static str,
    arguments: &'static [ArgumentRule],
    returns: ReturnRule,
) -> Builtin {
    Builtin {
        namespace,
        method,
        arguments,
        returns,
    }
}

pub const BUILTINS: &[Builtin] = &[
    builtin(Namespace::Array, "at", &[Container, Num], ReturnRule::Element),
    builtin(Namespace::Array, "push", &[Container, Element], ReturnRule::Void),
    builtin(Namespace::Array, "pop", &[Container], ReturnRule::Element),
    builtin(Namespace::Array, "length", &[Container], ReturnRule::Num),
    builtin(Namespace::Array, "insert", &[Container, Num, Element], ReturnRule::Void),
    builtin(Namespace::Array, "remove", &[Container, Num], ReturnRule::Element),
    builtin(Namespace::Array, "indexOf", &[Container, Element], ReturnRule::Num),
    builtin(Namespace::Array, "contains", &[Container, Element], ReturnRule::Bool),
    builtin(Namespace::Array, "sort", &[Container, Comparator], ReturnRule::Void),
    builtin(Namespace::Array, "slice", &[Container, Num, Num], ReturnRule::Container),
    builtin(Namespace::Array, "clear", &[Container], ReturnRule::Void),
    builtin(Namespace::Map, "get", &[Container, Key], ReturnRule::Value),
    builtin(Namespace::Map, "set", &[Container, Key, Value], ReturnRule::Void),
    builtin(Namespace::Map, "has", &[Container, Key], ReturnRule::Bool),
    builtin(Namespace::Map, "remove", &[Container, Key], ReturnRule::Void),
    builtin(Namespace::Map, "keys", &[Container], ReturnRule::Keys),
    builtin(Namespace::Map, "values", &[Container], ReturnRule::Values),
    builtin(Namespace::Map, "size", &[Container], ReturnRule::Num),
    builtin(Namespace::Map, "clear", &[Container], ReturnRule::Void),
];

pub fn lookup(namespace: Namespace, method: &str) -> Option<&'static Builtin> {
    BUILTINS
        .iter()
        .find(|builtin| builtin.namespace == namespace && builtin.method == method)
}
