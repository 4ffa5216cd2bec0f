//! Unit tests for the type checker module.
//!
//! Sources here are checked without the prelude, so they only rely on the
//! builtin types and on what they declare themselves.

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{Declaration, File},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
    parser::parser::parse_tokens,
    registry::registry::Registry,
};

use super::{
    builtins::{lookup, Namespace, ReturnRule},
    type_checker::type_check,
    type_table::TypeTable,
};

fn check_source(source: &str) -> Result<(File, TypeTable, Registry), Error> {
    let tokens = tokenize(source.to_string(), Some("test.sc".to_string()))?;
    let mut registry = Registry::new();
    let file = parse_tokens(&tokens, &mut registry)?;
    let types = type_check([&file], &mut registry, &["vec2".to_string()])?;
    Ok((file, types, registry))
}

fn check_error(source: &str) -> ErrorImpl {
    match check_source(source) {
        Ok(_) => panic!("expected an error for {:?}", source),
        Err(error) => error.get_internal_error().clone(),
    }
}

fn global_type(file: &File, types: &TypeTable, name: &str) -> Type {
    for declaration in &file.declarations {
        if let Declaration::Variable(variable) = declaration {
            if variable.name == name {
                let initializer = variable.initializer.as_ref().unwrap();
                return types.type_of(initializer).unwrap().clone();
            }
        }
    }

    panic!("no global named {}", name)
}

#[test]
fn test_literals_and_arithmetic() {
    let (file, types, _) = check_source(
        "num a = 1 + 2 * 3; string s = \"a\" + 1; bool b = 1 < 2 && true; num p = 2 ^ 3;",
    )
    .unwrap();

    assert_eq!(global_type(&file, &types, "a"), Type::num());
    assert_eq!(global_type(&file, &types, "s"), Type::string());
    assert_eq!(global_type(&file, &types, "b"), Type::bool());
    assert_eq!(global_type(&file, &types, "p"), Type::num());
}

#[test]
fn test_every_expression_is_recorded() {
    let (_, types, _) = check_source("num a = (1 + 2) * 3;").unwrap();

    // group, two binaries and three literals
    assert_eq!(types.len(), 6);
    assert!(types.iter().all(|(_, ty)| *ty == Type::num()));
}

#[test]
fn test_initializer_type_mismatch() {
    assert_eq!(
        check_error("num a = \"text\";"),
        ErrorImpl::TypeMatchError {
            expected: "num".to_string(),
            received: "string".to_string(),
        }
    );
}

#[test]
fn test_object_and_null_targets() {
    check_source("object o = 1; string s = null; num[] xs = null;").unwrap();

    assert_eq!(
        check_error("num n = null;"),
        ErrorImpl::TypeMatchError {
            expected: "num".to_string(),
            received: "null".to_string(),
        }
    );
}

#[test]
fn test_operator_errors() {
    assert!(matches!(
        check_error("num a = 1 - \"x\";"),
        ErrorImpl::OperatorTypeError { .. }
    ));
    assert!(matches!(
        check_error("bool b = !1;"),
        ErrorImpl::UnaryTypeError { .. }
    ));
    assert!(matches!(
        check_error("bool b = 1 < \"x\";"),
        ErrorImpl::OperatorTypeError { .. }
    ));
}

#[test]
fn test_numeric_unary_operators() {
    check_source("void run() { num n = 1; n++; n--; ++n; --n; num m = -n; }").unwrap();

    let statements = ["num m = -s;", "s++;", "s--;", "++s;", "--s;"];
    for statement in statements {
        let source = format!("void run() {{ string s = \"a\"; {} }}", statement);
        assert!(
            matches!(check_error(&source), ErrorImpl::UnaryTypeError { .. }),
            "{}",
            statement
        );
    }
}

#[test]
fn test_equality_accepts_assignable_operands() {
    let (file, types, _) = check_source("string s = \"a\"; bool b = s == null;").unwrap();
    assert_eq!(global_type(&file, &types, "b"), Type::bool());
}

#[test]
fn test_vector_alias_arithmetic() {
    let (file, types, _) = check_source(
        "struct vec2 { num x = 0; num y = 0; }
         vec2 a = new vec2(1, 2);
         vec2 b = a + a;
         vec2 c = a * 2;
         vec2 d = 2 * a - a;",
    )
    .unwrap();

    assert_eq!(global_type(&file, &types, "b"), Type::primitive("vec2"));
    assert_eq!(global_type(&file, &types, "c"), Type::primitive("vec2"));
    assert_eq!(global_type(&file, &types, "d"), Type::primitive("vec2"));
}

#[test]
fn test_struct_construction() {
    check_source("struct P { num x; num y; } P p = new P(1, 2); P q = new P();").unwrap();

    assert!(matches!(
        check_error("struct P { num x; num y; } P p = new P(1, 2, 3);"),
        ErrorImpl::UnexpectedArguments {
            expected: 2,
            received: 3
        }
    ));
    assert_eq!(
        check_error("struct P { num x; num y; } P p = new P(1, \"y\");"),
        ErrorImpl::FieldTypeMatchError {
            field: "y".to_string(),
            expected: "num".to_string(),
            received: "string".to_string(),
        }
    );
}

#[test]
fn test_container_construction() {
    let (file, types, _) =
        check_source("num[] xs = new num[](1, 2, 3); num[string] m = new num[string](\"a\", 1);")
            .unwrap();

    assert_eq!(global_type(&file, &types, "xs"), Type::array(Type::num()));
    assert_eq!(
        global_type(&file, &types, "m"),
        Type::map(Type::string(), Type::num())
    );

    assert!(matches!(
        check_error("num[string] m = new num[string](\"a\");"),
        ErrorImpl::MissingArguments { .. }
    ));
    assert!(matches!(
        check_error("num n = new num();"),
        ErrorImpl::InvalidNewTarget { .. }
    ));
    assert!(matches!(
        check_error("enum Color { Red } Color c = new Color();"),
        ErrorImpl::InvalidNewTarget { .. }
    ));
    assert!(matches!(
        check_error("delegate num B(num); B b = new B();"),
        ErrorImpl::InvalidNewTarget { .. }
    ));
}

#[test]
fn test_indexing() {
    let (file, types, _) = check_source(
        "num[] xs = new num[](1); num first = xs[0];
         string s = \"abc\"; char c = s[1];
         bool[string] flags = new bool[string](); bool f = flags[\"on\"];",
    )
    .unwrap();

    assert_eq!(global_type(&file, &types, "first"), Type::num());
    assert_eq!(global_type(&file, &types, "c"), Type::char());
    assert_eq!(global_type(&file, &types, "f"), Type::bool());

    assert!(matches!(
        check_error("num[] xs = new num[](1); num first = xs[\"a\"];"),
        ErrorImpl::IndexTypeMatchError { .. }
    ));
    assert!(matches!(
        check_error("num n = 1; num m = n[0];"),
        ErrorImpl::NotIndexable { .. }
    ));
}

#[test]
fn test_function_calls() {
    check_source("num add(num a, num b) { return a + b; } num three = add(1, 2);").unwrap();

    assert!(matches!(
        check_error("num add(num a, num b) { return a + b; } num x = add(1);"),
        ErrorImpl::MissingArguments {
            expected: 2,
            received: 1
        }
    ));
    assert!(matches!(
        check_error("num add(num a, num b) { return a + b; } num x = add(1, 2, 3);"),
        ErrorImpl::UnexpectedArguments { .. }
    ));
    assert!(matches!(
        check_error("num add(num a, num b) { return a + b; } num x = add(1, \"2\");"),
        ErrorImpl::ArgumentTypeMatchError { index: 1, .. }
    ));
    assert!(matches!(
        check_error("num n = 1; num x = n(1);"),
        ErrorImpl::NotCallable { .. }
    ));
}

#[test]
fn test_functions_assign_to_matching_delegates() {
    check_source(
        "delegate num binop(num, num);
         num add(num a, num b) { return a + b; }
         binop op = add;
         num r = op(1, 2);",
    )
    .unwrap();

    assert!(matches!(
        check_error(
            "delegate num binop(num, num);
             bool test(num a) { return a > 0; }
             binop op = test;"
        ),
        ErrorImpl::TypeMatchError { .. }
    ));
}

#[test]
fn test_forward_references() {
    check_source(
        "num first() { return second(); }
         num second() { return limit; }
         num limit = 3;",
    )
    .unwrap();
}

#[test]
fn test_struct_members() {
    let (file, types, _) =
        check_source("struct P { num x; string name; } P p = new P(); string n = p.name;")
            .unwrap();
    assert_eq!(global_type(&file, &types, "n"), Type::string());

    assert!(matches!(
        check_error("struct P { num x; } P p = new P(); num z = p.z;"),
        ErrorImpl::UnknownField { .. }
    ));
    assert!(matches!(
        check_error("num n = 1; num z = n.z;"),
        ErrorImpl::InvalidMemberAccess { .. }
    ));
}

#[test]
fn test_enum_members() {
    let (file, types, _) =
        check_source("enum Color { Red, Green } Color c = Color.Green; string s = \"c\" + c;")
            .unwrap();
    assert_eq!(global_type(&file, &types, "c"), Type::primitive("Color"));
    assert_eq!(global_type(&file, &types, "s"), Type::string());

    assert!(matches!(
        check_error("enum Color { Red } Color c = Color.Blue;"),
        ErrorImpl::UnknownEnumMember { .. }
    ));
    assert!(matches!(
        check_error("enum Color { Red } void paint() { Color.Red = Color.Red; }"),
        ErrorImpl::NotAssignable { .. }
    ));
    assert!(matches!(
        check_error("enum Color { Red } Color c = Color.Red; Color d = c.Red;"),
        ErrorImpl::InvalidMemberAccess { .. }
    ));
}

#[test]
fn test_enum_name_has_enum_type() {
    let (file, types, _) = check_source("enum Color { Red } Color c = Color;").unwrap();
    assert_eq!(global_type(&file, &types, "c"), Type::primitive("Color"));
}

#[test]
fn test_functions_are_not_assignable() {
    assert!(matches!(
        check_error("void run() { } void other() { run = run; }"),
        ErrorImpl::NotAssignable { .. }
    ));
}

#[test]
fn test_compound_assignment() {
    check_source("void run() { num n = 1; n += 2; n *= 3; string s = \"a\"; s += 1; }").unwrap();

    assert!(matches!(
        check_error("void run() { string s = \"a\"; s -= 1; }"),
        ErrorImpl::OperatorTypeError { .. }
    ));
}

#[test]
fn test_conditions_must_be_bool() {
    assert!(matches!(
        check_error("void run() { if (1) { } }"),
        ErrorImpl::ConditionTypeError { .. }
    ));
    assert!(matches!(
        check_error("void run() { while (\"x\") { } }"),
        ErrorImpl::ConditionTypeError { .. }
    ));
}

#[test]
fn test_scopes() {
    check_source(
        "void run() {
             num n = 1;
             { num n = 2; }
             for (num i = 0; i < 3; i++) { n += i; }
             for (num i = 0; i < 3; i++) { }
         }",
    )
    .unwrap();

    assert!(matches!(
        check_error("void run() { num n = 1; num n = 2; }"),
        ErrorImpl::VariableAlreadyDeclared { .. }
    ));
    assert!(matches!(
        check_error("void run(num n) { num n = 2; }"),
        ErrorImpl::VariableAlreadyDeclared { .. }
    ));
    assert!(matches!(
        check_error("void run() { { num n = 2; } n = 3; }"),
        ErrorImpl::VariableNotDeclared { .. }
    ));
}

#[test]
fn test_locals_cannot_take_top_level_names() {
    let error = check_error("struct P { num x; } void run() { num P = 1; }");

    assert!(matches!(error, ErrorImpl::NameAlreadyDeclared { .. }));
    assert_eq!(error.kind(), ErrorKind::Name);
}

#[test]
fn test_return_contracts() {
    check_source("void run() { return; } num one() { return 1; }").unwrap();

    assert!(matches!(
        check_error("num one() { }"),
        ErrorImpl::MissingReturn { .. }
    ));
    assert!(matches!(
        check_error("num one() { return; }"),
        ErrorImpl::MissingReturnValue { .. }
    ));
    assert!(matches!(
        check_error("void run() { return 1; }"),
        ErrorImpl::UnexpectedReturnValue { .. }
    ));
    assert!(matches!(
        check_error("num one() { return \"1\"; }"),
        ErrorImpl::TypeMatchError { .. }
    ));
}

#[test]
fn test_casts() {
    let (file, types, _) = check_source("object o = 1; num n = o as num;").unwrap();
    assert_eq!(global_type(&file, &types, "n"), Type::num());

    assert!(matches!(
        check_error("object o = 1; num n = o as Missing;"),
        ErrorImpl::UnknownType { .. }
    ));
}

#[test]
fn test_builtin_table() {
    let push = lookup(Namespace::Array, "push").unwrap();
    assert_eq!(push.returns, ReturnRule::Void);
    assert_eq!(push.arguments.len(), 2);

    assert_eq!(lookup(Namespace::Map, "keys").unwrap().returns, ReturnRule::Keys);
    assert!(lookup(Namespace::Map, "push").is_none());
    assert_eq!(Namespace::from_name("map"), Some(Namespace::Map));
    assert_eq!(Namespace::from_name("str"), None);
}
