//! Integration tests for end-to-end checking.
//!
//! These tests run whole programs through a session, prelude included, from
//! source text through tokenization, harvesting, parsing and type checking.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use scriptc::{
    ast::{
        ast::{Declaration, File},
        expressions::{CallSite, ExprKind},
        statements::Stmt,
        types::Type,
    },
    errors::errors::{Error, ErrorKind, Stage},
    registry::registry::{NameOwner, Registry},
    render_error,
    session::session::{compile, CompiledProgram, Session, SessionOptions, SourceFile},
    Position,
};

fn check(text: &str) -> Result<CompiledProgram, Error> {
    compile(&[SourceFile::new("main.sc", text)])
}

fn error_kind(text: &str) -> ErrorKind {
    match check(text) {
        Ok(_) => panic!("expected an error for {:?}", text),
        Err(error) => error.get_kind(),
    }
}

fn function<'a>(file: &'a File, name: &str) -> &'a Vec<Stmt> {
    for declaration in &file.declarations {
        if let Declaration::Function(function) = declaration {
            if function.name == name {
                return &function.body.as_ref().unwrap().body;
            }
        }
    }

    panic!("no function named {}", name)
}

fn position() -> Position {
    Position::new(1, 1, Rc::new("main.sc".to_string()))
}

#[test]
fn test_assignability_laws() {
    let program = check(
        "struct P { num x; }
         enum Color { Red }
         delegate num binop(num, num);
         P[string][] table;",
    )
    .unwrap();
    let registry = &program.registry;

    for ty in registry.types() {
        assert!(registry.can_assign(ty, ty, None), "{} is not reflexive", ty);

        if !ty.is("void") {
            assert!(registry.can_assign(&Type::object(), ty, None));
        }

        let nullable = !(ty.is("bool") || ty.is("num") || ty.is("char"));
        assert_eq!(registry.can_assign(ty, &Type::null(), None), nullable, "{}", ty);
    }
}

#[test]
fn test_paths_identify_structure() {
    let mut registry = Registry::new();
    registry
        .declare_name("P", NameOwner::Struct, &position())
        .unwrap();

    let left = Type::map(Type::string(), Type::array(Type::primitive("P")));
    let right = Type::map(Type::string(), Type::array(Type::primitive("P")));
    let different = Type::array(Type::map(Type::string(), Type::primitive("P")));

    assert_eq!(left.path(), right.path());
    assert_eq!(left.path(), "P[][string]");
    assert_eq!(different.path(), "P[string][]");
    assert_ne!(left.path(), different.path());

    registry.register_type(&left);
    registry.register_type(&right);
    assert!(registry.has_type("P[][string]"));
    assert_eq!(
        registry
            .types()
            .filter(|ty| ty.path() == "P[][string]")
            .count(),
        1
    );
}

#[test]
fn test_forward_references() {
    check("num f() { return g(); } num g() { return 1; }").unwrap();
}

#[test]
fn test_forward_references_across_files() {
    compile(&[
        SourceFile::new("a.sc", "num f() { return g() + limit; }"),
        SourceFile::new("b.sc", "num g() { return 1; } num limit = 2;"),
    ])
    .unwrap();
}

#[test]
fn test_name_collisions() {
    assert_eq!(error_kind("struct P { num x; } struct P { num y; }"), ErrorKind::Name);
    assert_eq!(error_kind("void f() { num x = 1; num x = 2; }"), ErrorKind::Name);
    check("void f() { num x = 1; { num x = 2; } }").unwrap();
}

#[test]
fn test_name_collisions_across_files() {
    let error = compile(&[
        SourceFile::new("a.sc", "struct P { num x; }"),
        SourceFile::new("b.sc", "num P() { return 1; }"),
    ])
    .unwrap_err();

    assert_eq!(error.get_kind(), ErrorKind::Name);
    assert_eq!(error.get_stage(), Stage::TypeDatabase);
    assert_eq!(error.get_position().file.as_str(), "b.sc");
}

#[test]
fn test_user_names_cannot_shadow_prelude() {
    assert_eq!(error_kind("num array = 1;"), ErrorKind::Name);
}

#[test]
fn test_return_contracts() {
    assert_eq!(error_kind("num f() { }"), ErrorKind::ControlFlow);
    assert_eq!(error_kind("void f() { return 5; }"), ErrorKind::ControlFlow);
    check("void f() { return; }").unwrap();
}

#[test]
fn test_return_check_is_syntactic() {
    check("num f(bool c) { if (c) { return 1; } }").unwrap();
}

#[test]
fn test_struct_construction() {
    check("struct P { num x; num y; } P p = new P(1, 2);").unwrap();
    assert_eq!(
        error_kind("struct P { num x; num y; } P p = new P(1, 2, 3);"),
        ErrorKind::Type
    );
}

#[test]
fn test_array_indexing() {
    let program = check("num[] xs = new num[](1, 2, 3); num f() { return xs[0]; }").unwrap();

    let body = function(&program.files[0], "f");
    let value = match &body[0] {
        Stmt::Control(control) => control.value.as_ref().unwrap(),
        other => panic!("expected a return, found {:?}", other),
    };
    assert!(matches!(
        value.kind,
        ExprKind::Call {
            site: CallSite::Index,
            ..
        }
    ));
    assert_eq!(program.types.type_of(value), Some(&Type::num()));

    assert_eq!(
        error_kind("num[] xs = new num[](1, 2, 3); num f() { return xs[\"a\"]; }"),
        ErrorKind::Type
    );
}

#[test]
fn test_delegate_assignment() {
    check(
        "delegate num binop(num, num);
         num add(num a, num b) { return a + b; }
         binop f = add;",
    )
    .unwrap();

    let mismatches = [
        "num add(num a) { return a; }",
        "num add(num a, string b) { return a; }",
        "bool add(num a, num b) { return true; }",
    ];
    for add in mismatches {
        let source = format!("delegate num binop(num, num); {} binop f = add;", add);
        assert_eq!(error_kind(&source), ErrorKind::Type, "{}", add);
    }
}

#[test]
fn test_map_get() {
    let program = check(
        "num[string] m = new num[string](\"a\", 1);
         string k = \"a\";
         num v = map.get(m, k);",
    )
    .unwrap();

    let declaration = program.files[0]
        .declarations
        .iter()
        .find(|declaration| declaration.name() == "v")
        .unwrap();
    let initializer = match declaration {
        Declaration::Variable(variable) => variable.initializer.as_ref().unwrap(),
        other => panic!("expected a variable, found {:?}", other),
    };
    assert_eq!(program.types.type_of(initializer), Some(&Type::num()));

    assert_eq!(
        error_kind("num[string] m = new num[string](); num v = map.get(m, true);"),
        ErrorKind::Type
    );
}

#[test]
fn test_structural_errors() {
    assert_eq!(error_kind("void f() { num x = 1; "), ErrorKind::Structural);
    assert_eq!(error_kind("num x = (1 + 2;"), ErrorKind::Structural);
}

#[test]
fn test_reserved_identifiers() {
    let error = check("num function = 1;").unwrap_err();
    assert_eq!(error.get_stage(), Stage::Scanner);
}

#[test]
fn test_custom_vector_aliases() {
    let options = SessionOptions {
        include_prelude: true,
        vector_aliases: vec!["vec2".to_string()],
    };
    let source = [SourceFile::new("main.sc", "vec3 a = new vec3(); vec3 b = a + a;")];

    assert!(Session::new(options).compile(&source).is_err());
    assert!(compile(&source).is_ok());
}

#[test]
fn test_rendered_diagnostic() {
    let source = "num ok = 1;\nnum bad = \"text\";";
    let error = check(source).unwrap_err();

    assert_eq!(error.get_position().line, 2);

    let rendered = render_error(&error, source);
    assert!(rendered.starts_with("error[TypeChecker]: TypeMatchError"));
    assert!(rendered.contains("-> main.sc"));
    assert!(rendered.contains("2 | num bad = \"text\";"));
}
