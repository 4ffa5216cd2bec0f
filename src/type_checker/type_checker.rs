use tracing::debug;

use crate::{
    ast::{
        ast::{Declaration, EnumDecl, File, FunctionDecl, StructDecl, VariableDecl},
        expressions::{
            AssignOperator, AssignTarget, BinaryOperator, CallSite, Expr, ExprKind, Literal,
            UnaryOperator,
        },
        statements::{ControlKind, ControlStmt, ForStmt, IfStmt, Stmt, WhileStmt},
        types::{Type, BOOL, CHAR, NULL, NUM, STRING, VOID},
    },
    errors::errors::{Error, ErrorImpl},
    registry::registry::{NameOwner, Registry},
    Position,
};

use super::{
    builtins::{self, ArgumentRule, Builtin, Namespace, ReturnRule},
    environment::Environment,
    type_table::TypeTable,
};

/// The function whose body is being checked.
#[derive(Debug)]
struct FunctionContext {
    name: String,
    return_type: Type,
    saw_value_return: bool,
}

pub struct TypeChecker<'a> {
    registry: &'a mut Registry,
    environments: Vec<Environment>,
    types: TypeTable,
    function: Option<FunctionContext>,
    vector_aliases: Vec<String>,
}

impl<'a> TypeChecker<'a> {
    /// Creates a checker whose root scope already binds every global,
    /// function and enum the registry knows about.
    pub fn new(registry: &'a mut Registry, vector_aliases: &[String]) -> Self {
        let mut root = Environment::new();
        for (name, ty) in registry.globals() {
            root.variable_lookup.insert(name.clone(), ty.clone());
        }
        for (name, ty) in registry.functions() {
            root.variable_lookup.insert(name.clone(), ty.clone());
        }
        for name in registry.enum_names() {
            root.variable_lookup
                .insert(name.clone(), Type::Primitive(name.clone()));
        }

        TypeChecker {
            registry,
            environments: vec![root],
            types: TypeTable::new(),
            function: None,
            vector_aliases: vector_aliases.to_vec(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &*self.registry
    }

    pub fn add_environment(&mut self) {
        self.environments.push(Environment::new());
    }

    pub fn pop_environment(&mut self) {
        if self.environments.len() > 1 {
            self.environments.pop();
        }
    }

    /// Validates a local name against the top level namespace and binds it
    /// in the innermost scope.
    pub fn declare_local(&mut self, name: &str, ty: Type, position: &Position) -> Result<(), Error> {
        self.registry.check_name_free(name, position)?;
        self.declare_member(name, ty, position)
    }

    /// Binds a name in the innermost scope without consulting the namespace.
    fn declare_member(&mut self, name: &str, ty: Type, position: &Position) -> Result<(), Error> {
        match self.environments.last_mut() {
            Some(environment) => environment.declare_variable(name, ty, position),
            None => Ok(()),
        }
    }

    /// Looks a name up from the innermost scope outwards.
    pub fn fetch_variable_type(&self, name: &str) -> Option<&Type> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }

    fn record(&mut self, expr: &Expr, ty: Type) -> Type {
        self.registry.register_type(&ty);
        self.types.record(expr.id, ty.clone());
        ty
    }

    fn resolve(&self, ty: &Type, position: &Position) -> Result<(), Error> {
        self.registry.resolve(ty, position)
    }

    fn is_vector(&self, ty: &Type) -> bool {
        matches!(ty, Type::Primitive(name) if self.vector_aliases.contains(name))
    }

    fn is_enum_name(&self, expr: &Expr) -> bool {
        expr.as_bare_name()
            .map(|name| self.registry.owner(name) == Some(NameOwner::Enum))
            .unwrap_or(false)
    }

    fn expect_assignable(&self, target: &Type, value: &Type, position: &Position) -> Result<(), Error> {
        if self.registry.can_assign(target, value, None) {
            Ok(())
        } else {
            Err(type_match_error(target, value, position))
        }
    }

    pub fn into_types(self) -> TypeTable {
        self.types
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }
}

fn type_match_error(expected: &Type, received: &Type, position: &Position) -> Error {
    Error::new(
        ErrorImpl::TypeMatchError {
            expected: expected.path(),
            received: received.path(),
        },
        position.clone(),
    )
}

fn operator_error(operator: &str, left: &Type, right: &Type, position: &Position) -> Error {
    Error::new(
        ErrorImpl::OperatorTypeError {
            operator: operator.to_string(),
            left: left.path(),
            right: right.path(),
        },
        position.clone(),
    )
}

fn check_arity(expected: usize, arguments: &[Expr], position: &Position) -> Result<(), Error> {
    if arguments.len() > expected {
        Err(Error::new(
            ErrorImpl::UnexpectedArguments {
                expected,
                received: arguments.len(),
            },
            arguments[expected].span.start.clone(),
        ))
    } else if arguments.len() < expected {
        Err(Error::new(
            ErrorImpl::MissingArguments {
                expected,
                received: arguments.len(),
            },
            position.clone(),
        ))
    } else {
        Ok(())
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker<'_>, expr: &Expr) -> Result<Type, Error> {
    let position = expr.span.start.clone();

    let ty = match &expr.kind {
        ExprKind::Group(inner) => type_check_expr(type_checker, inner)?,
        ExprKind::Literal(literal) => match literal {
            Literal::Bool(_) => Type::bool(),
            Literal::Char(_) => Type::char(),
            Literal::Number(_) => Type::num(),
            Literal::String(_) => Type::string(),
            Literal::Null => Type::null(),
        },
        ExprKind::Get { object: None, name } => match type_checker.fetch_variable_type(name) {
            Some(ty) => ty.clone(),
            None => {
                return Err(Error::new(
                    ErrorImpl::VariableNotDeclared {
                        variable: name.clone(),
                    },
                    position,
                ))
            }
        },
        ExprKind::Get {
            object: Some(object),
            name,
        } => type_check_member(type_checker, object, name, &position)?,
        ExprKind::Set {
            target,
            operator,
            value,
        } => type_check_set(type_checker, target, *operator, value, &position)?,
        ExprKind::Unary {
            operator, operand, ..
        } => {
            let operand_type = type_check_expr(type_checker, operand)?;
            let expected = if *operator == UnaryOperator::Not {
                BOOL
            } else {
                NUM
            };

            if !operand_type.is(expected) {
                return Err(Error::new(
                    ErrorImpl::UnaryTypeError {
                        operator: operator.to_string(),
                        operand: operand_type.path(),
                    },
                    position,
                ));
            }

            operand_type
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let left_type = type_check_expr(type_checker, left)?;
            let right_type = type_check_expr(type_checker, right)?;
            type_check_binary(type_checker, *operator, &left_type, &right_type, &position)?
        }
        ExprKind::Call {
            site: CallSite::Index,
            callee,
            arguments,
        } => type_check_index(type_checker, callee, arguments, &position)?,
        ExprKind::Call {
            site: CallSite::Invoke,
            callee,
            arguments,
        } => type_check_call(type_checker, callee, arguments, &position)?,
        ExprKind::Cast { operand, target } => {
            type_check_expr(type_checker, operand)?;
            type_checker.resolve(target, &position)?;
            target.clone()
        }
        ExprKind::New { target, arguments } => {
            type_check_new(type_checker, target, arguments, &position)?
        }
    };

    Ok(type_checker.record(expr, ty))
}

/// `object.name`: a struct field, or a member of an enum named directly.
fn type_check_member(
    type_checker: &mut TypeChecker<'_>,
    object: &Expr,
    name: &str,
    position: &Position,
) -> Result<Type, Error> {
    let object_type = type_check_expr(type_checker, object)?;

    if type_checker.is_enum_name(object) {
        let known = type_checker
            .registry()
            .get_enum(&object_type)
            .map(|info| info.has_member(name))
            .unwrap_or(false);

        if !known {
            return Err(Error::new(
                ErrorImpl::UnknownEnumMember {
                    enum_: object_type.path(),
                    member: name.to_string(),
                },
                position.clone(),
            ));
        }

        return Ok(object_type);
    }

    match type_checker.registry().get_struct(&object_type) {
        Some(info) => match info.field(name) {
            Some(field) => Ok(field.clone()),
            None => Err(Error::new(
                ErrorImpl::UnknownField {
                    type_: object_type.path(),
                    field: name.to_string(),
                },
                position.clone(),
            )),
        },
        None => Err(Error::new(
            ErrorImpl::InvalidMemberAccess {
                type_: object_type.path(),
                member: name.to_string(),
            },
            position.clone(),
        )),
    }
}

fn type_check_set(
    type_checker: &mut TypeChecker<'_>,
    target: &AssignTarget,
    operator: AssignOperator,
    value: &Expr,
    position: &Position,
) -> Result<Type, Error> {
    let target_type = match target {
        AssignTarget::Name(name) => {
            if matches!(
                type_checker.registry().owner(name),
                Some(NameOwner::Function | NameOwner::Enum)
            ) {
                return Err(Error::new(
                    ErrorImpl::NotAssignable { name: name.clone() },
                    position.clone(),
                ));
            }

            match type_checker.fetch_variable_type(name) {
                Some(ty) => ty.clone(),
                None => {
                    return Err(Error::new(
                        ErrorImpl::VariableNotDeclared {
                            variable: name.clone(),
                        },
                        position.clone(),
                    ))
                }
            }
        }
        AssignTarget::Member { object, name } => {
            if type_checker.is_enum_name(object) {
                return Err(Error::new(
                    ErrorImpl::NotAssignable {
                        name: format!("{}.{}", object.as_bare_name().unwrap_or_default(), name),
                    },
                    position.clone(),
                ));
            }

            type_check_member(type_checker, object, name, position)?
        }
        AssignTarget::Index { object, index } => {
            let container = type_check_expr(type_checker, object)?;
            let index_type = type_check_expr(type_checker, index)?;
            check_index(type_checker, &container, &index_type, &index.span.start)?
        }
    };

    let value_type = type_check_expr(type_checker, value)?;
    let value_position = &value.span.start;

    match operator {
        AssignOperator::Assign => {
            type_checker.expect_assignable(&target_type, &value_type, value_position)?
        }
        AssignOperator::Add if target_type.is(STRING) => {}
        _ => {
            if !(target_type.is(NUM) && value_type.is(NUM)) {
                return Err(operator_error(
                    &operator.to_string(),
                    &target_type,
                    &value_type,
                    position,
                ));
            }
        }
    }

    Ok(target_type)
}

fn type_check_binary(
    type_checker: &TypeChecker<'_>,
    operator: BinaryOperator,
    left: &Type,
    right: &Type,
    position: &Position,
) -> Result<Type, Error> {
    let error = || operator_error(&operator.to_string(), left, right, position);

    match operator {
        BinaryOperator::Add => {
            if left.is(NUM) && right.is(NUM) {
                return Ok(Type::num());
            }

            let concatenates = |ty: &Type| {
                ty.is(BOOL)
                    || ty.is(NUM)
                    || ty.is(CHAR)
                    || ty.is(STRING)
                    || type_checker.registry().is_enum(ty)
            };
            if (left.is(STRING) && concatenates(right)) || (right.is(STRING) && concatenates(left)) {
                return Ok(Type::string());
            }

            if left == right && type_checker.is_vector(left) {
                return Ok(left.clone());
            }

            Err(error())
        }
        BinaryOperator::Subtract => {
            if left == right && (left.is(NUM) || type_checker.is_vector(left)) {
                Ok(left.clone())
            } else {
                Err(error())
            }
        }
        BinaryOperator::Multiply => {
            if left.is(NUM) && right.is(NUM) {
                Ok(Type::num())
            } else if type_checker.is_vector(left) && right.is(NUM) {
                Ok(left.clone())
            } else if left.is(NUM) && type_checker.is_vector(right) {
                Ok(right.clone())
            } else {
                Err(error())
            }
        }
        _ if operator.is_equality() => {
            let registry = type_checker.registry();
            if registry.can_assign(left, right, None) || registry.can_assign(right, left, None) {
                Ok(Type::bool())
            } else {
                Err(error())
            }
        }
        _ => {
            if left != right {
                Err(error())
            } else if operator.is_comparison() {
                Ok(Type::bool())
            } else {
                Ok(left.clone())
            }
        }
    }
}

/// Checks an index against a container and returns the element type.
fn check_index(
    type_checker: &TypeChecker<'_>,
    container: &Type,
    index: &Type,
    position: &Position,
) -> Result<Type, Error> {
    let key = match type_checker.registry().index_key(container) {
        Some(key) => key,
        None => {
            return Err(Error::new(
                ErrorImpl::NotIndexable {
                    type_: container.path(),
                },
                position.clone(),
            ))
        }
    };

    if !type_checker.registry().can_assign(&key, index, None) {
        return Err(Error::new(
            ErrorImpl::IndexTypeMatchError {
                container: container.path(),
                expected: key.path(),
                received: index.path(),
            },
            position.clone(),
        ));
    }

    type_checker.registry().indexed(container, position)
}

fn type_check_index(
    type_checker: &mut TypeChecker<'_>,
    callee: &Expr,
    arguments: &[Expr],
    position: &Position,
) -> Result<Type, Error> {
    let container = type_check_expr(type_checker, callee)?;
    check_arity(1, arguments, position)?;

    let index = type_check_expr(type_checker, &arguments[0])?;
    check_index(type_checker, &container, &index, &arguments[0].span.start)
}

/// The builtin a call refers to, if its callee is `array.method` or
/// `map.method` on the prelude namespaces.
fn builtin_for(type_checker: &TypeChecker<'_>, callee: &Expr) -> Option<&'static Builtin> {
    let (object, method) = match &callee.kind {
        ExprKind::Get {
            object: Some(object),
            name,
        } => (object, name),
        _ => return None,
    };

    let namespace_name = object.as_bare_name()?;
    if type_checker.registry().owner(namespace_name) != Some(NameOwner::Global) {
        return None;
    }

    builtins::lookup(Namespace::from_name(namespace_name)?, method)
}

fn type_check_call(
    type_checker: &mut TypeChecker<'_>,
    callee: &Expr,
    arguments: &[Expr],
    position: &Position,
) -> Result<Type, Error> {
    let callee_type = type_check_expr(type_checker, callee)?;

    if let Some(builtin) = builtin_for(type_checker, callee) {
        return type_check_builtin(type_checker, builtin, &callee_type, arguments, position);
    }

    let signature = match type_checker.registry().get_delegate(&callee_type) {
        Some(signature) => signature.clone(),
        None => {
            return Err(Error::new(
                ErrorImpl::NotCallable {
                    type_: callee_type.path(),
                },
                position.clone(),
            ))
        }
    };

    check_arity(signature.parameters.len(), arguments, position)?;

    for (index, (argument, parameter)) in arguments.iter().zip(&signature.parameters).enumerate() {
        let argument_type = type_check_expr(type_checker, argument)?;
        if !type_checker
            .registry()
            .can_assign(parameter, &argument_type, None)
        {
            return Err(Error::new(
                ErrorImpl::ArgumentTypeMatchError {
                    index,
                    expected: parameter.path(),
                    received: argument_type.path(),
                },
                argument.span.start.clone(),
            ));
        }
    }

    Ok(signature.return_type)
}

fn type_check_builtin(
    type_checker: &mut TypeChecker<'_>,
    builtin: &Builtin,
    callee_type: &Type,
    arguments: &[Expr],
    position: &Position,
) -> Result<Type, Error> {
    check_arity(builtin.arguments.len(), arguments, position)?;

    let mut argument_types = Vec::with_capacity(arguments.len());
    for argument in arguments {
        argument_types.push(type_check_expr(type_checker, argument)?);
    }

    let argument_error = |index: usize, expected: String, received: &Type| {
        Error::new(
            ErrorImpl::ArgumentTypeMatchError {
                index,
                expected,
                received: received.path(),
            },
            arguments[index].span.start.clone(),
        )
    };

    // (container, element or key, value)
    let container = argument_types[0].clone();
    let (element, value) = match (&builtin.namespace, &container) {
        (Namespace::Array, Type::Array(element)) => (*element.clone(), None),
        (Namespace::Map, Type::Map { key, value }) => (*key.clone(), Some(*value.clone())),
        (namespace, _) => {
            return Err(argument_error(0, namespace.name().to_string(), &container));
        }
    };
    let value = value.unwrap_or_else(|| element.clone());

    let declared = type_checker.registry().get_delegate(callee_type).cloned();

    for (index, rule) in builtin.arguments.iter().enumerate().skip(1) {
        let received = &argument_types[index];
        let registry = type_checker.registry();

        let expected = match rule {
            ArgumentRule::Container => container.clone(),
            ArgumentRule::Num => Type::num(),
            ArgumentRule::Element | ArgumentRule::Key => element.clone(),
            ArgumentRule::Value => value.clone(),
            ArgumentRule::Comparator => {
                if received.is(NULL) {
                    continue;
                }

                let parameter = declared
                    .as_ref()
                    .and_then(|signature| signature.parameters.get(index).cloned());
                let overrides = [element.clone(), element.clone()];
                let accepted = match parameter {
                    Some(parameter) => {
                        registry.is_delegate(received)
                            && registry.can_assign(&parameter, received, Some(&overrides))
                    }
                    None => registry.is_delegate(received),
                };

                if !accepted {
                    let comparator = format!("num({},{})", element.path(), element.path());
                    return Err(argument_error(index, comparator, received));
                }
                continue;
            }
        };

        if !registry.can_assign(&expected, received, None) {
            return Err(argument_error(index, expected.path(), received));
        }
    }

    Ok(match builtin.returns {
        ReturnRule::Void => Type::void(),
        ReturnRule::Num => Type::num(),
        ReturnRule::Bool => Type::bool(),
        ReturnRule::Element => element,
        ReturnRule::Value => value,
        ReturnRule::Container => container,
        ReturnRule::Keys => Type::array(element),
        ReturnRule::Values => Type::array(value),
    })
}

fn type_check_new(
    type_checker: &mut TypeChecker<'_>,
    target: &Type,
    arguments: &[Expr],
    position: &Position,
) -> Result<Type, Error> {
    type_checker.resolve(target, position)?;

    let mut argument_types = Vec::with_capacity(arguments.len());
    for argument in arguments {
        argument_types.push(type_check_expr(type_checker, argument)?);
    }

    let argument_error = |index: usize, expected: &Type| {
        Error::new(
            ErrorImpl::ArgumentTypeMatchError {
                index,
                expected: expected.path(),
                received: argument_types[index].path(),
            },
            arguments[index].span.start.clone(),
        )
    };
    let registry = type_checker.registry();

    match target {
        Type::Array(element) => {
            for (index, ty) in argument_types.iter().enumerate() {
                if !registry.can_assign(element, ty, None) {
                    return Err(argument_error(index, element));
                }
            }
        }
        Type::Map { key, value } => {
            if arguments.len() % 2 != 0 {
                return Err(Error::new(
                    ErrorImpl::MissingArguments {
                        expected: arguments.len() + 1,
                        received: arguments.len(),
                    },
                    position.clone(),
                ));
            }

            for (index, ty) in argument_types.iter().enumerate() {
                let expected = if index % 2 == 0 { key } else { value };
                if !registry.can_assign(expected, ty, None) {
                    return Err(argument_error(index, expected));
                }
            }
        }
        Type::Primitive(_) => {
            let info = match registry.get_struct(target) {
                Some(info) => info,
                None => {
                    return Err(Error::new(
                        ErrorImpl::InvalidNewTarget {
                            type_: target.path(),
                        },
                        position.clone(),
                    ))
                }
            };

            if arguments.len() > info.fields.len() {
                return Err(Error::new(
                    ErrorImpl::UnexpectedArguments {
                        expected: info.fields.len(),
                        received: arguments.len(),
                    },
                    arguments[info.fields.len()].span.start.clone(),
                ));
            }

            for (index, ty) in argument_types.iter().enumerate() {
                let (field, expected) = &info.fields[index];
                if !registry.can_assign(expected, ty, None) {
                    return Err(Error::new(
                        ErrorImpl::FieldTypeMatchError {
                            field: field.clone(),
                            expected: expected.path(),
                            received: ty.path(),
                        },
                        arguments[index].span.start.clone(),
                    ));
                }
            }
        }
    }

    Ok(target.clone())
}

fn type_check_condition(type_checker: &mut TypeChecker<'_>, condition: &Expr) -> Result<(), Error> {
    let ty = type_check_expr(type_checker, condition)?;
    if !ty.is(BOOL) {
        return Err(Error::new(
            ErrorImpl::ConditionTypeError {
                received: ty.path(),
            },
            condition.span.start.clone(),
        ));
    }

    Ok(())
}

/// Checks a statement in a scope of its own.
fn type_check_scoped(type_checker: &mut TypeChecker<'_>, stmt: &Stmt) -> Result<(), Error> {
    if let Stmt::Block(_) = stmt {
        return type_check_stmt(type_checker, stmt);
    }

    type_checker.add_environment();
    let result = type_check_stmt(type_checker, stmt);
    type_checker.pop_environment();
    result
}

fn type_check_variable(
    type_checker: &mut TypeChecker<'_>,
    variable: &VariableDecl,
) -> Result<(), Error> {
    type_checker.resolve(&variable.ty, &variable.span.start)?;

    if let Some(initializer) = &variable.initializer {
        let value = type_check_expr(type_checker, initializer)?;
        type_checker.expect_assignable(&variable.ty, &value, &initializer.span.start)?;
    }

    Ok(())
}

fn type_check_control(type_checker: &mut TypeChecker<'_>, control: &ControlStmt) -> Result<(), Error> {
    if control.kind != ControlKind::Return {
        return Ok(());
    }

    let position = &control.span.start;
    let (name, return_type) = match &type_checker.function {
        Some(function) => (function.name.clone(), function.return_type.clone()),
        None => return Err(Error::new(ErrorImpl::ReturnOutsideFunction, position.clone())),
    };

    match &control.value {
        Some(value) => {
            if return_type.is(VOID) {
                return Err(Error::new(
                    ErrorImpl::UnexpectedReturnValue { function: name },
                    value.span.start.clone(),
                ));
            }

            let value_type = type_check_expr(type_checker, value)?;
            type_checker.expect_assignable(&return_type, &value_type, &value.span.start)?;

            if let Some(function) = type_checker.function.as_mut() {
                function.saw_value_return = true;
            }
        }
        None => {
            if !return_type.is(VOID) {
                return Err(Error::new(
                    ErrorImpl::MissingReturnValue { function: name },
                    position.clone(),
                ));
            }
        }
    }

    Ok(())
}

fn type_check_if(type_checker: &mut TypeChecker<'_>, stmt: &IfStmt) -> Result<(), Error> {
    type_check_condition(type_checker, &stmt.condition)?;
    type_check_scoped(type_checker, &stmt.body)?;

    if let Some(next) = &stmt.next {
        type_check_scoped(type_checker, next)?;
    }

    Ok(())
}

fn type_check_while(type_checker: &mut TypeChecker<'_>, stmt: &WhileStmt) -> Result<(), Error> {
    type_check_condition(type_checker, &stmt.condition)?;
    type_check_scoped(type_checker, &stmt.body)
}

fn type_check_for(type_checker: &mut TypeChecker<'_>, stmt: &ForStmt) -> Result<(), Error> {
    for initializer in &stmt.initializers {
        type_check_stmt(type_checker, initializer)?;
    }

    if let Some(condition) = &stmt.condition {
        type_check_condition(type_checker, condition)?;
    }

    for iterator in &stmt.iterators {
        type_check_expr(type_checker, iterator)?;
    }

    type_check_scoped(type_checker, &stmt.body)
}

pub fn type_check_stmt(type_checker: &mut TypeChecker<'_>, stmt: &Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Block(block) => {
            type_checker.add_environment();
            let result = block
                .iter()
                .try_for_each(|stmt| type_check_stmt(type_checker, stmt));
            type_checker.pop_environment();
            result
        }
        Stmt::VarDecl(variable) => {
            type_check_variable(type_checker, variable)?;
            type_checker.declare_local(&variable.name, variable.ty.clone(), &variable.span.start)
        }
        Stmt::Expression(stmt) => type_check_expr(type_checker, &stmt.expression).map(|_| ()),
        Stmt::Control(control) => type_check_control(type_checker, control),
        Stmt::If(stmt) => type_check_if(type_checker, stmt),
        Stmt::While(stmt) => type_check_while(type_checker, stmt),
        Stmt::For(stmt) => {
            type_checker.add_environment();
            let result = type_check_for(type_checker, stmt);
            type_checker.pop_environment();
            result
        }
    }
}

/// Parameters and the top level of the body share one scope.
fn type_check_function_body(
    type_checker: &mut TypeChecker<'_>,
    function: &FunctionDecl,
) -> Result<(), Error> {
    for parameter in &function.parameters {
        type_checker.resolve(&parameter.ty, &parameter.span.start)?;
        type_checker.declare_local(&parameter.name, parameter.ty.clone(), &parameter.span.start)?;
    }

    if let Some(body) = &function.body {
        for stmt in body.iter() {
            type_check_stmt(type_checker, stmt)?;
        }
    }

    Ok(())
}

fn type_check_function(type_checker: &mut TypeChecker<'_>, function: &FunctionDecl) -> Result<(), Error> {
    let position = &function.span.start;
    type_checker.resolve(&function.return_type, position)?;

    type_checker.add_environment();
    type_checker.function = Some(FunctionContext {
        name: function.name.clone(),
        return_type: function.return_type.clone(),
        saw_value_return: false,
    });

    let result = type_check_function_body(type_checker, function);

    let context = type_checker.function.take();
    type_checker.pop_environment();
    result?;

    let saw_value_return = context.map(|context| context.saw_value_return).unwrap_or(false);
    if !function.return_type.is(VOID) && !saw_value_return {
        return Err(Error::new(
            ErrorImpl::MissingReturn {
                function: function.name.clone(),
            },
            position.clone(),
        ));
    }

    Ok(())
}

fn type_check_struct(type_checker: &mut TypeChecker<'_>, decl: &StructDecl) -> Result<(), Error> {
    type_checker.add_environment();

    let result = decl.fields.iter().try_for_each(|field| {
        type_check_variable(type_checker, field)?;
        type_checker.declare_member(&field.name, field.ty.clone(), &field.span.start)
    });

    type_checker.pop_environment();
    result
}

fn type_check_enum(type_checker: &mut TypeChecker<'_>, decl: &EnumDecl) -> Result<(), Error> {
    type_checker.add_environment();

    let ty = Type::primitive(&decl.name);
    let result = decl.members.iter().try_for_each(|member| {
        type_checker.declare_member(&member.name, ty.clone(), &member.span.start)
    });

    type_checker.pop_environment();
    result
}

pub fn type_check_declaration(
    type_checker: &mut TypeChecker<'_>,
    declaration: &Declaration,
) -> Result<(), Error> {
    match declaration {
        Declaration::Variable(variable) => type_check_variable(type_checker, variable),
        Declaration::Function(function) => type_check_function(type_checker, function),
        Declaration::Struct(decl) => type_check_struct(type_checker, decl),
        Declaration::Enum(decl) => type_check_enum(type_checker, decl),
        Declaration::Delegate(delegate) => {
            type_checker.resolve(&delegate.return_type, &delegate.span.start)?;
            delegate
                .parameters
                .iter()
                .try_for_each(|parameter| type_checker.resolve(parameter, &delegate.span.start))
        }
    }
}

pub fn type_check_file(type_checker: &mut TypeChecker<'_>, file: &File) -> Result<(), Error> {
    for declaration in &file.declarations {
        type_check_declaration(type_checker, declaration)?;
    }

    debug!(file = %file.path, expressions = type_checker.types().len(), "checked file");
    Ok(())
}

/// Checks every file against one registry and returns the type of every
/// expression. Files may refer to each other's declarations in any order.
pub fn type_check<'f>(
    files: impl IntoIterator<Item = &'f File>,
    registry: &mut Registry,
    vector_aliases: &[String],
) -> Result<TypeTable, Error> {
    let mut type_checker = TypeChecker::new(registry, vector_aliases);

    for file in files {
        type_check_file(&mut type_checker, file)?;
    }

    Ok(type_checker.into_types())
}
