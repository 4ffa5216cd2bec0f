use std::rc::Rc;

use crate::{
    ast::types::{Type, BUILTIN_TYPES, VOID},
    errors::errors::{ErrorImpl, ErrorKind},
    Position,
};

use super::registry::{DelegateSignature, NameOwner, Registry};

fn position() -> Position {
    Position::new(1, 1, Rc::new("test.sc".to_string()))
}

fn signature(return_type: Type, parameters: Vec<Type>) -> DelegateSignature {
    DelegateSignature {
        return_type,
        parameters,
    }
}

fn registry_with_user_types() -> Registry {
    let mut registry = Registry::new();
    registry
        .declare_name("P", NameOwner::Struct, &position())
        .unwrap();
    registry.register_struct("P", vec![("x".to_string(), Type::num())]);
    registry
        .declare_name("Color", NameOwner::Enum, &position())
        .unwrap();
    registry.register_enum("Color", vec![("Red".to_string(), 0)]);
    registry
        .declare_name("binop", NameOwner::Delegate, &position())
        .unwrap();
    registry.register_delegate("binop", signature(Type::num(), vec![Type::num(), Type::num()]));
    registry
}

#[test]
fn test_can_assign_is_reflexive() {
    let registry = registry_with_user_types();
    let mut types: Vec<Type> = BUILTIN_TYPES.iter().map(|name| Type::primitive(name)).collect();
    types.push(Type::primitive("P"));
    types.push(Type::primitive("Color"));
    types.push(Type::primitive("binop"));
    types.push(Type::array(Type::string()));
    types.push(Type::map(Type::string(), Type::array(Type::num())));

    for ty in types {
        assert!(registry.can_assign(&ty, &ty, None), "{} to itself", ty);
    }
}

#[test]
fn test_object_accepts_everything_but_void() {
    let registry = registry_with_user_types();

    for ty in [
        Type::num(),
        Type::string(),
        Type::null(),
        Type::primitive("P"),
        Type::primitive("binop"),
        Type::array(Type::bool()),
    ] {
        assert!(registry.can_assign(&Type::object(), &ty, None));
    }
    assert!(!registry.can_assign(&Type::object(), &Type::void(), None));
}

#[test]
fn test_null_assignability() {
    let registry = registry_with_user_types();

    for ty in [Type::bool(), Type::num(), Type::char()] {
        assert!(!registry.can_assign(&ty, &Type::null(), None));
    }
    for ty in [
        Type::string(),
        Type::object(),
        Type::primitive("P"),
        Type::primitive("Color"),
        Type::primitive("binop"),
        Type::array(Type::num()),
    ] {
        assert!(registry.can_assign(&ty, &Type::null(), None), "null to {}", ty);
    }
}

#[test]
fn test_void_only_assigns_to_void() {
    let registry = Registry::new();

    assert!(registry.can_assign(&Type::primitive(VOID), &Type::void(), None));
    assert!(!registry.can_assign(&Type::num(), &Type::void(), None));
}

#[test]
fn test_char_widens_to_string() {
    let registry = Registry::new();

    assert!(registry.can_assign(&Type::string(), &Type::char(), None));
    assert!(!registry.can_assign(&Type::char(), &Type::string(), None));
    assert!(!registry.can_assign(&Type::num(), &Type::string(), None));
}

#[test]
fn test_delegates_compare_structurally() {
    let mut registry = registry_with_user_types();
    let add = registry.register_function("add", signature(Type::num(), vec![Type::num(), Type::num()]));
    let neg = registry.register_function("neg", signature(Type::num(), vec![Type::num()]));
    let concat = registry.register_function(
        "concat",
        signature(Type::string(), vec![Type::num(), Type::num()]),
    );

    let binop = Type::primitive("binop");
    assert!(registry.can_assign(&binop, &add, None));
    assert!(!registry.can_assign(&binop, &neg, None));
    assert!(!registry.can_assign(&binop, &concat, None));
}

#[test]
fn test_delegate_overrides_replace_parameters() {
    let mut registry = Registry::new();
    registry
        .declare_name("Comparator", NameOwner::Delegate, &position())
        .unwrap();
    registry.register_delegate(
        "Comparator",
        signature(Type::num(), vec![Type::object(), Type::object()]),
    );
    let compare = registry.register_function(
        "compare",
        signature(Type::num(), vec![Type::string(), Type::string()]),
    );
    let comparator = Type::primitive("Comparator");

    assert!(!registry.can_assign(&comparator, &compare, None));
    assert!(registry.can_assign(
        &comparator,
        &compare,
        Some(&[Type::string(), Type::string()])
    ));
    assert!(!registry.can_assign(&comparator, &compare, Some(&[Type::num(), Type::num()])));
}

#[test]
fn test_functions_share_implicit_delegates() {
    let mut registry = Registry::new();
    let first = registry.register_function("f", signature(Type::num(), vec![Type::string()]));
    let second = registry.register_function("g", signature(Type::num(), vec![Type::string()]));

    assert_eq!(first, second);
    assert_eq!(first.path(), "num(string)");
    assert!(registry.is_delegate(&first));
    assert_eq!(registry.functions().get("g"), Some(&second));
}

#[test]
fn test_paths_follow_structure() {
    let built = Type::map(Type::string(), Type::array(Type::num()));
    let rebuilt = Type::map(Type::string(), Type::array(Type::num()));
    let other = Type::array(Type::map(Type::string(), Type::num()));

    assert_eq!(built.path(), "num[][string]");
    assert_eq!(built.path(), rebuilt.path());
    assert_eq!(other.path(), "num[string][]");
    assert_ne!(built.path(), other.path());
}

#[test]
fn test_map_registers_key_and_value_arrays() {
    let mut registry = Registry::new();
    registry.register_type(&Type::map(Type::string(), Type::num()));

    assert!(registry.has_type("num[string]"));
    assert!(registry.has_type("string[]"));
    assert!(registry.has_type("num[]"));
}

#[test]
fn test_names_share_one_namespace() {
    let mut registry = registry_with_user_types();

    let error = registry
        .declare_name("P", NameOwner::Function, &position())
        .unwrap_err();

    assert_eq!(error.get_kind(), ErrorKind::Name);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NameAlreadyDeclared {
            name: "P".to_string(),
            owner: "struct".to_string()
        }
    );
}

#[test]
fn test_names_cannot_contain_path_characters() {
    let mut registry = Registry::new();

    for name in ["a[b", "x]", "f(", "a,b", "two words"] {
        let error = registry
            .declare_name(name, NameOwner::Struct, &position())
            .unwrap_err();
        assert_eq!(error.get_error_name(), "InvalidName");
    }
}

#[test]
fn test_resolve_requires_declared_types() {
    let registry = registry_with_user_types();

    assert!(registry
        .resolve(&Type::map(Type::primitive("Color"), Type::primitive("P")), &position())
        .is_ok());

    let error = registry
        .resolve(&Type::array(Type::primitive("Missing")), &position())
        .unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnknownType {
            type_: "Missing".to_string()
        }
    );
}

#[test]
fn test_indexing_rules() {
    let registry = Registry::new();

    assert_eq!(
        registry.indexed(&Type::array(Type::bool()), &position()).unwrap(),
        Type::bool()
    );
    assert_eq!(
        registry
            .indexed(&Type::map(Type::string(), Type::num()), &position())
            .unwrap(),
        Type::num()
    );
    assert_eq!(registry.indexed(&Type::string(), &position()).unwrap(), Type::char());
    assert!(registry.indexed(&Type::num(), &position()).is_err());

    assert_eq!(
        registry.index_key(&Type::map(Type::char(), Type::num())),
        Some(Type::char())
    );
    assert_eq!(registry.index_key(&Type::array(Type::num())), Some(Type::num()));
    assert_eq!(registry.index_key(&Type::bool()), None);
}

#[test]
fn test_struct_and_enum_lookups() {
    let registry = registry_with_user_types();

    let info = registry.get_struct(&Type::primitive("P")).unwrap();
    assert_eq!(info.field("x"), Some(&Type::num()));
    assert_eq!(info.field("y"), None);

    assert!(registry.get_enum(&Type::primitive("Color")).unwrap().has_member("Red"));
    assert!(registry.is_enum(&Type::primitive("Color")));
    assert!(!registry.is_enum(&Type::primitive("P")));
}
