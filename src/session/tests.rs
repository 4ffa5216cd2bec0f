use pretty_assertions::assert_eq;

use crate::{
    ast::{ast::Declaration, types::Type},
    errors::errors::{Error, ErrorImpl},
    registry::registry::NameOwner,
};

use super::session::{compile, CompiledProgram, Session, SessionOptions, SourceFile};

fn compile_one(text: &str) -> Result<CompiledProgram, Error> {
    compile(&[SourceFile::new("main.sc", text)])
}

fn global_type(program: &CompiledProgram, name: &str) -> Type {
    for file in &program.files {
        for declaration in &file.declarations {
            if let Declaration::Variable(variable) = declaration {
                if variable.name == name {
                    let initializer = variable.initializer.as_ref().unwrap();
                    return program.types.type_of(initializer).unwrap().clone();
                }
            }
        }
    }

    panic!("no global named {}", name)
}

#[test]
fn test_default_options() {
    let options = SessionOptions::default();

    assert!(options.include_prelude);
    assert_eq!(options.vector_aliases, vec!["vec2".to_string(), "vec3".to_string()]);
}

#[test]
fn test_prelude_is_compiled_first() {
    let program = compile_one("num x = 1;").unwrap();

    let prelude = program.prelude.as_ref().unwrap();
    assert_eq!(prelude.path.as_str(), "std/prelude.lang");
    assert_eq!(program.files.len(), 1);
    assert_eq!(program.files[0].path.as_str(), "main.sc");

    assert_eq!(program.registry.owner("array"), Some(NameOwner::Global));
    assert_eq!(program.registry.owner("vec2"), Some(NameOwner::Struct));
    assert_eq!(program.registry.owner("Comparator"), Some(NameOwner::Delegate));
}

#[test]
fn test_without_prelude() {
    let options = SessionOptions {
        include_prelude: false,
        vector_aliases: vec![],
    };
    let program = Session::new(options)
        .compile(&[SourceFile::new("main.sc", "num x = 1;")])
        .unwrap();

    assert!(program.prelude.is_none());
    assert_eq!(program.registry.owner("array"), None);
}

#[test]
fn test_array_builtins_follow_element_type() {
    let program = compile_one(
        "num[] xs = new num[](3, 1, 2);
         num last = array.pop(xs);
         num count = array.length(xs);
         bool found = array.contains(xs, 2);
         num[] part = array.slice(xs, 0, 1);",
    )
    .unwrap();

    assert_eq!(global_type(&program, "last"), Type::num());
    assert_eq!(global_type(&program, "count"), Type::num());
    assert_eq!(global_type(&program, "found"), Type::bool());
    assert_eq!(global_type(&program, "part"), Type::array(Type::num()));
}

#[test]
fn test_array_push_checks_element() {
    compile_one("void run() { string[] names = new string[](); array.push(names, \"a\"); }")
        .unwrap();

    let error = compile_one("void run() { string[] names = new string[](); array.push(names, 1); }")
        .unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::ArgumentTypeMatchError {
            index: 1,
            expected: "string".to_string(),
            received: "num".to_string(),
        }
    );
}

#[test]
fn test_array_builtin_rejects_non_array() {
    let error = compile_one("num n = 1; num c = array.length(n);").unwrap_err();
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::ArgumentTypeMatchError { index: 0, .. }
    ));
}

#[test]
fn test_sort_comparator() {
    compile_one(
        "num byValue(num a, num b) { return a - b; }
         void run() {
             num[] xs = new num[](3, 1, 2);
             array.sort(xs, byValue);
             array.sort(xs, null);
         }",
    )
    .unwrap();

    let error = compile_one(
        "num byLength(string a, string b) { return 0; }
         void run() {
             num[] xs = new num[](3, 1, 2);
             array.sort(xs, byLength);
         }",
    )
    .unwrap_err();
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::ArgumentTypeMatchError { index: 1, .. }
    ));
}

#[test]
fn test_map_builtins_follow_key_and_value() {
    let program = compile_one(
        "num[string] ages = new num[string](\"ann\", 31);
         num age = map.get(ages, \"ann\");
         string[] names = map.keys(ages);
         num[] values = map.values(ages);
         bool known = map.has(ages, \"bob\");",
    )
    .unwrap();

    assert_eq!(global_type(&program, "age"), Type::num());
    assert_eq!(global_type(&program, "names"), Type::array(Type::string()));
    assert_eq!(global_type(&program, "values"), Type::array(Type::num()));
    assert_eq!(global_type(&program, "known"), Type::bool());

    let error = compile_one(
        "num[string] ages = new num[string](); num age = map.get(ages, 1);",
    )
    .unwrap_err();
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::ArgumentTypeMatchError { index: 1, .. }
    ));
}

#[test]
fn test_string_and_math_use_declared_signatures() {
    let program = compile_one(
        "string[] words = str.split(\"a b\", \" \");
         string upper = str.upper(\"a\");
         num root = math.sqrt(16);
         num pi = math.PI;",
    )
    .unwrap();

    assert_eq!(global_type(&program, "words"), Type::array(Type::string()));
    assert_eq!(global_type(&program, "upper"), Type::string());
    assert_eq!(global_type(&program, "root"), Type::num());
    assert_eq!(global_type(&program, "pi"), Type::num());

    let error = compile_one("num root = math.sqrt(\"16\");").unwrap_err();
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::ArgumentTypeMatchError { index: 0, .. }
    ));
}

#[test]
fn test_prelude_vectors() {
    let program = compile_one("vec3 a = new vec3(1, 2, 3); vec3 b = a * 2 + a;").unwrap();
    assert_eq!(global_type(&program, "b"), Type::primitive("vec3"));
}

#[test]
fn test_node_ids_are_unique_across_files() {
    let program = compile(&[
        SourceFile::new("a.sc", "num a = 1 + 2;"),
        SourceFile::new("b.sc", "num b = a * 3;"),
    ])
    .unwrap();

    let prelude_only = compile(&[]).unwrap();
    assert_eq!(program.types.len(), prelude_only.types.len() + 6);
}
