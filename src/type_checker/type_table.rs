use std::collections::HashMap;

use crate::ast::{ast::NodeId, expressions::Expr, types::Type};

/// The resolved type of every checked expression, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeTable {
    types: HashMap<NodeId, Type>,
}

impl TypeTable {
    pub fn new() -> Self {
        TypeTable::default()
    }

    /// Records the type of a node. Each node is recorded once; a second
    /// record for the same node keeps the first.
    pub fn record(&mut self, id: NodeId, ty: Type) {
        self.types.entry(id).or_insert(ty);
    }

    pub fn get(&self, id: NodeId) -> Option<&Type> {
        self.types.get(&id)
    }

    pub fn type_of(&self, expr: &Expr) -> Option<&Type> {
        self.get(expr.id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Type)> {
        self.types.iter()
    }
}
