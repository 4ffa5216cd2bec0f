use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// One lexical scope: the names it binds and their types.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, Type>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Binds a name in this scope. Names already bound in the same scope
    /// are rejected, names from enclosing scopes are shadowed.
    pub fn declare_variable(
        &mut self,
        variable_name: &str,
        variable_type: Type,
        current_position: &Position,
    ) -> Result<(), Error> {
        if self.variable_lookup.contains_key(variable_name) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: variable_name.to_string(),
                },
                current_position.clone(),
            ));
        }

        self.variable_lookup
            .insert(variable_name.to_string(), variable_type);
        Ok(())
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<&Type> {
        self.variable_lookup.get(variable_name)
    }
}
