use std::{collections::HashMap, fmt::Display};

use tracing::trace;

use crate::{
    ast::types::{Type, BOOL, BUILTIN_TYPES, CHAR, NULL, NUM, OBJECT, STRING, VOID},
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// The category owning a top level name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOwner {
    Struct,
    Enum,
    Delegate,
    Global,
    Function,
}

impl Display for NameOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NameOwner::Struct => "struct",
            NameOwner::Enum => "enum",
            NameOwner::Delegate => "delegate",
            NameOwner::Global => "global variable",
            NameOwner::Function => "function",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructInfo {
    /// Fields in declaration order
    pub fields: Vec<(String, Type)>,
}

impl StructInfo {
    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, ty)| ty)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumInfo {
    pub members: Vec<(String, i64)>,
}

impl EnumInfo {
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|(member, _)| member == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelegateSignature {
    pub return_type: Type,
    pub parameters: Vec<Type>,
}

impl DelegateSignature {
    /// The canonical `ret(p1,p2)` path used for implicit function delegates.
    pub fn canonical(&self) -> String {
        let parameters: Vec<String> = self.parameters.iter().map(Type::path).collect();
        format!("{}({})", self.return_type.path(), parameters.join(","))
    }
}

/// Characters that would make a declared name ambiguous inside a type path.
const RESERVED_NAME_CHARACTERS: [char; 5] = ['[', ']', '(', ')', ','];

/// Every type, name and signature known to one compilation session.
///
/// The registry only grows: registering something that already exists is a
/// no-op, while declaring a top level name twice is an error.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: HashMap<String, Type>,
    names: HashMap<String, NameOwner>,
    structs: HashMap<String, StructInfo>,
    enums: HashMap<String, EnumInfo>,
    delegates: HashMap<String, DelegateSignature>,
    globals: HashMap<String, Type>,
    functions: HashMap<String, Type>,
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        for builtin in BUILTIN_TYPES {
            registry.register_type(&Type::primitive(builtin));
        }

        registry
    }

    pub fn validate_name(&self, name: &str, position: &Position) -> Result<(), Error> {
        let invalid = name.is_empty()
            || name
                .chars()
                .any(|c| c.is_whitespace() || RESERVED_NAME_CHARACTERS.contains(&c));

        if invalid {
            return Err(Error::new(
                ErrorImpl::InvalidName {
                    name: name.to_string(),
                },
                position.clone(),
            ));
        }

        Ok(())
    }

    /// Fails when `name` is malformed or owned by any top level declaration.
    pub fn check_name_free(&self, name: &str, position: &Position) -> Result<(), Error> {
        self.validate_name(name, position)?;

        if let Some(owner) = self.names.get(name) {
            return Err(Error::new(
                ErrorImpl::NameAlreadyDeclared {
                    name: name.to_string(),
                    owner: owner.to_string(),
                },
                position.clone(),
            ));
        }

        Ok(())
    }

    /// Claims a top level name for `owner`. Struct, enum and delegate names
    /// also become types right away so later declarations may refer to them.
    pub fn declare_name(
        &mut self,
        name: &str,
        owner: NameOwner,
        position: &Position,
    ) -> Result<(), Error> {
        self.check_name_free(name, position)?;

        trace!(name, %owner, "declared name");
        self.names.insert(name.to_string(), owner);

        if matches!(
            owner,
            NameOwner::Struct | NameOwner::Enum | NameOwner::Delegate
        ) {
            self.register_type(&Type::primitive(name));
        }

        Ok(())
    }

    pub fn owner(&self, name: &str) -> Option<NameOwner> {
        self.names.get(name).copied()
    }

    /// Records a type path. Maps also record the arrays of their keys and
    /// values.
    pub fn register_type(&mut self, ty: &Type) {
        match ty {
            Type::Primitive(_) => {}
            Type::Array(element) => self.register_type(element),
            Type::Map { key, value } => {
                self.register_type(key);
                self.register_type(value);
                self.register_type(&Type::Array(key.clone()));
                self.register_type(&Type::Array(value.clone()));
            }
        }

        let path = ty.path();
        if !self.types.contains_key(&path) {
            trace!(path = %path, "registered type");
            self.types.insert(path, ty.clone());
        }
    }

    pub fn has_type(&self, path: &str) -> bool {
        self.types.contains_key(path)
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    /// Checks that every primitive inside `ty` names a builtin or a declared
    /// struct, enum or delegate.
    pub fn resolve(&self, ty: &Type, position: &Position) -> Result<(), Error> {
        match ty {
            Type::Primitive(name) => {
                if ty.is_builtin() || self.types.contains_key(name) {
                    Ok(())
                } else {
                    Err(Error::new(
                        ErrorImpl::UnknownType {
                            type_: name.clone(),
                        },
                        position.clone(),
                    ))
                }
            }
            Type::Array(element) => self.resolve(element, position),
            Type::Map { key, value } => {
                self.resolve(key, position)?;
                self.resolve(value, position)
            }
        }
    }

    pub fn register_struct(&mut self, name: &str, fields: Vec<(String, Type)>) {
        self.register_type(&Type::primitive(name));
        for (_, ty) in &fields {
            self.register_type(ty);
        }

        self.structs
            .entry(name.to_string())
            .or_insert_with(|| StructInfo { fields });
    }

    pub fn register_enum(&mut self, name: &str, members: Vec<(String, i64)>) {
        self.register_type(&Type::primitive(name));
        self.enums
            .entry(name.to_string())
            .or_insert_with(|| EnumInfo { members });
    }

    pub fn register_delegate(&mut self, name: &str, signature: DelegateSignature) {
        self.register_type(&signature.return_type);
        for parameter in &signature.parameters {
            self.register_type(parameter);
        }

        self.register_type(&Type::primitive(name));
        self.delegates.entry(name.to_string()).or_insert(signature);
    }

    /// Registers a function and returns its delegate type. Functions with the
    /// same signature share one implicit delegate.
    pub fn register_function(&mut self, name: &str, signature: DelegateSignature) -> Type {
        let delegate = Type::Primitive(signature.canonical());
        if !self.delegates.contains_key(&signature.canonical()) {
            trace!(delegate = %delegate, "created implicit delegate");
            self.register_delegate(&signature.canonical(), signature);
        }

        self.functions
            .entry(name.to_string())
            .or_insert_with(|| delegate.clone());

        delegate
    }

    pub fn register_global(&mut self, name: &str, ty: &Type) {
        self.register_type(ty);
        self.globals
            .entry(name.to_string())
            .or_insert_with(|| ty.clone());
    }

    pub fn get_struct(&self, ty: &Type) -> Option<&StructInfo> {
        self.structs.get(ty.primitive_name()?)
    }

    pub fn get_enum(&self, ty: &Type) -> Option<&EnumInfo> {
        self.enums.get(ty.primitive_name()?)
    }

    pub fn get_delegate(&self, ty: &Type) -> Option<&DelegateSignature> {
        self.delegates.get(ty.primitive_name()?)
    }

    pub fn is_enum(&self, ty: &Type) -> bool {
        self.get_enum(ty).is_some()
    }

    pub fn is_delegate(&self, ty: &Type) -> bool {
        self.get_delegate(ty).is_some()
    }

    pub fn globals(&self) -> &HashMap<String, Type> {
        &self.globals
    }

    pub fn functions(&self) -> &HashMap<String, Type> {
        &self.functions
    }

    pub fn enum_names(&self) -> impl Iterator<Item = &String> {
        self.enums.keys()
    }

    pub fn is_nullable(&self, ty: &Type) -> bool {
        !(ty.is(BOOL) || ty.is(NUM) || ty.is(CHAR) || ty.is(NULL))
    }

    /// The element type produced by indexing a value of type `ty`.
    pub fn indexed(&self, ty: &Type, position: &Position) -> Result<Type, Error> {
        match ty {
            Type::Array(element) => Ok(*element.clone()),
            Type::Map { value, .. } => Ok(*value.clone()),
            _ if ty.is(STRING) => Ok(Type::char()),
            _ => Err(Error::new(
                ErrorImpl::NotIndexable { type_: ty.path() },
                position.clone(),
            )),
        }
    }

    /// The type an index into `ty` must have.
    pub fn index_key(&self, ty: &Type) -> Option<Type> {
        match ty {
            Type::Array(_) => Some(Type::num()),
            Type::Map { key, .. } => Some(*key.clone()),
            _ if ty.is(STRING) => Some(Type::num()),
            _ => None,
        }
    }

    /// Whether a value of type `value` may be stored into `target`.
    ///
    /// `overrides` replaces the target's delegate parameter types by position
    /// and is only used for builtin higher order calls.
    pub fn can_assign(&self, target: &Type, value: &Type, overrides: Option<&[Type]>) -> bool {
        if value.is(VOID) {
            return target.is(VOID);
        }

        if target == value && overrides.is_none() {
            return true;
        }

        if target.is(OBJECT) {
            return true;
        }

        if value.is(NULL) {
            return self.is_nullable(target);
        }

        if target.is(STRING) && value.is(CHAR) {
            return true;
        }

        if let (Some(target_signature), Some(value_signature)) =
            (self.get_delegate(target), self.get_delegate(value))
        {
            if target_signature.parameters.len() != value_signature.parameters.len() {
                return false;
            }

            let parameters_match = target_signature
                .parameters
                .iter()
                .enumerate()
                .all(|(index, parameter)| {
                    let expected = overrides
                        .and_then(|overrides| overrides.get(index))
                        .unwrap_or(parameter);
                    expected == &value_signature.parameters[index]
                });

            return parameters_match && target_signature.return_type == value_signature.return_type;
        }

        target == value
    }
}
