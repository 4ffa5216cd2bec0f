use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The pipeline stage that reported an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scanner,
    Parser,
    TypeDatabase,
    TypeChecker,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The broad category of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Structural,
    Name,
    Type,
    ControlFlow,
}

#[derive(Error, Debug, Clone)]
#[error("{} error at {}: {}", .internal_error.stage(), .position, .internal_error)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_stage(&self) -> Stage {
        self.internal_error.stage()
    }

    pub fn get_kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::ReservedIdentifier { .. } => "ReservedIdentifier",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::EnumValueDecreasing { .. } => "EnumValueDecreasing",
            ErrorImpl::EnumValueOverflow { .. } => "EnumValueOverflow",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::NameAlreadyDeclared { .. } => "NameAlreadyDeclared",
            ErrorImpl::InvalidName { .. } => "InvalidName",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::OperatorTypeError { .. } => "OperatorTypeError",
            ErrorImpl::UnaryTypeError { .. } => "UnaryTypeError",
            ErrorImpl::ConditionTypeError { .. } => "ConditionTypeError",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::FieldTypeMatchError { .. } => "FieldTypeMatchError",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::NotIndexable { .. } => "NotIndexable",
            ErrorImpl::IndexTypeMatchError { .. } => "IndexTypeMatchError",
            ErrorImpl::UnknownField { .. } => "UnknownField",
            ErrorImpl::UnknownEnumMember { .. } => "UnknownEnumMember",
            ErrorImpl::InvalidMemberAccess { .. } => "InvalidMemberAccess",
            ErrorImpl::InvalidNewTarget { .. } => "InvalidNewTarget",
            ErrorImpl::NotAssignable { .. } => "NotAssignable",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::UnexpectedReturnValue { .. } => "UnexpectedReturnValue",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedLiteral { .. } => {
                ErrorTip::Suggestion(String::from("Literal is missing its closing quote"))
            }
            ErrorImpl::ReservedIdentifier { identifier } => ErrorTip::Suggestion(format!(
                "`{}` is reserved in the target language, pick another name",
                identifier
            )),
            ErrorImpl::UnexpectedToken { token, expected } => {
                if expected.is_empty() {
                    ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
                } else {
                    ErrorTip::Suggestion(format!(
                        "Unexpected token: `{}`, expected one of: {}",
                        token,
                        expected.join(", ")
                    ))
                }
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::EnumValueDecreasing { member, value, minimum } => {
                ErrorTip::Suggestion(format!(
                    "Enum member `{}` has value {}, values must be at least {}",
                    member, value, minimum
                ))
            }
            ErrorImpl::EnumValueOverflow { member } => ErrorTip::Suggestion(format!(
                "Enum member `{}` follows the largest possible value, give it an explicit value",
                member
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only names, fields and indexed elements can be assigned",
            )),
            ErrorImpl::NameAlreadyDeclared { name, owner } => {
                ErrorTip::Suggestion(format!("`{}` is already declared as a {}", name, owner))
            }
            ErrorImpl::InvalidName { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a valid declaration name", name))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::OperatorTypeError {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::UnaryTypeError { operator, operand } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::ConditionTypeError { received } => ErrorTip::Suggestion(format!(
                "Conditions must be `bool`, received `{}`",
                received
            )),
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError {
                index,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Expected argument {} of type `{}`, received `{}`",
                index + 1,
                expected,
                received
            )),
            ErrorImpl::FieldTypeMatchError {
                field,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Expected field `{}` of type `{}`, received `{}`",
                field, expected, received
            )),
            ErrorImpl::NotCallable { type_ } => {
                ErrorTip::Suggestion(format!("Values of type `{}` cannot be called", type_))
            }
            ErrorImpl::NotIndexable { type_ } => {
                ErrorTip::Suggestion(format!("Values of type `{}` cannot be indexed", type_))
            }
            ErrorImpl::IndexTypeMatchError {
                container,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` is indexed by `{}`, received `{}`",
                container, expected, received
            )),
            ErrorImpl::UnknownField { type_, field } => {
                ErrorTip::Suggestion(format!("`{}` has no field `{}`", type_, field))
            }
            ErrorImpl::UnknownEnumMember { enum_, member } => {
                ErrorTip::Suggestion(format!("Enum `{}` has no member `{}`", enum_, member))
            }
            ErrorImpl::InvalidMemberAccess { type_, member } => ErrorTip::Suggestion(format!(
                "Cannot access `{}` on a value of type `{}`",
                member, type_
            )),
            ErrorImpl::InvalidNewTarget { type_ } => {
                ErrorTip::Suggestion(format!("`{}` cannot be constructed with `new`", type_))
            }
            ErrorImpl::NotAssignable { name } => {
                ErrorTip::Suggestion(format!("`{}` cannot be assigned to", name))
            }
            ErrorImpl::MissingReturn { function } => ErrorTip::Suggestion(format!(
                "Function `{}` must return a value",
                function
            )),
            ErrorImpl::MissingReturnValue { function } => ErrorTip::Suggestion(format!(
                "Function `{}` must return a value here",
                function
            )),
            ErrorImpl::UnexpectedReturnValue { function } => ErrorTip::Suggestion(format!(
                "Function `{}` returns void and cannot return a value",
                function
            )),
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("`return` is only allowed inside functions"))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated literal: {token:?}")]
    UnterminatedLiteral { token: String },
    #[error("identifier {identifier:?} is reserved")]
    ReservedIdentifier { identifier: String },
    #[error("unexpected token {token:?}, expected {expected:?}")]
    UnexpectedToken { token: String, expected: Vec<String> },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("enum member {member:?} has value {value}, expected at least {minimum}")]
    EnumValueDecreasing {
        member: String,
        value: i64,
        minimum: i64,
    },
    #[error("enum member {member:?} overflows the previous value")]
    EnumValueOverflow { member: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("name {name:?} already declared as a {owner}")]
    NameAlreadyDeclared { name: String, owner: String },
    #[error("invalid declaration name {name:?}")]
    InvalidName { name: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMatchError { expected: String, received: String },
    #[error("operator {operator:?} cannot be applied to {left:?} and {right:?}")]
    OperatorTypeError {
        operator: String,
        left: String,
        right: String,
    },
    #[error("operator {operator:?} cannot be applied to {operand:?}")]
    UnaryTypeError { operator: String, operand: String },
    #[error("condition must be bool, received {received:?}")]
    ConditionTypeError { received: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("argument {index} types do not match: expected {expected:?}, received {received:?}")]
    ArgumentTypeMatchError {
        index: usize,
        expected: String,
        received: String,
    },
    #[error("field {field:?} types do not match: expected {expected:?}, received {received:?}")]
    FieldTypeMatchError {
        field: String,
        expected: String,
        received: String,
    },
    #[error("type {type_:?} is not callable")]
    NotCallable { type_: String },
    #[error("type {type_:?} is not indexable")]
    NotIndexable { type_: String },
    #[error("{container:?} is indexed by {expected:?}, received {received:?}")]
    IndexTypeMatchError {
        container: String,
        expected: String,
        received: String,
    },
    #[error("type {type_:?} has no field {field:?}")]
    UnknownField { type_: String, field: String },
    #[error("enum {enum_:?} has no member {member:?}")]
    UnknownEnumMember { enum_: String, member: String },
    #[error("cannot access {member:?} on {type_:?}")]
    InvalidMemberAccess { type_: String, member: String },
    #[error("type {type_:?} cannot be constructed")]
    InvalidNewTarget { type_: String },
    #[error("{name:?} is not assignable")]
    NotAssignable { name: String },
    #[error("function {function:?} is missing a return statement")]
    MissingReturn { function: String },
    #[error("function {function:?} is missing a return value")]
    MissingReturnValue { function: String },
    #[error("void function {function:?} returns a value")]
    UnexpectedReturnValue { function: String },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedLiteral { .. }
            | ErrorImpl::ReservedIdentifier { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::EnumValueDecreasing { .. }
            | ErrorImpl::EnumValueOverflow { .. }
            | ErrorImpl::InvalidAssignmentTarget => ErrorKind::Structural,
            ErrorImpl::NameAlreadyDeclared { .. }
            | ErrorImpl::InvalidName { .. }
            | ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::UnknownType { .. } => ErrorKind::Name,
            ErrorImpl::MissingReturn { .. }
            | ErrorImpl::MissingReturnValue { .. }
            | ErrorImpl::UnexpectedReturnValue { .. }
            | ErrorImpl::ReturnOutsideFunction => ErrorKind::ControlFlow,
            _ => ErrorKind::Type,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedLiteral { .. }
            | ErrorImpl::ReservedIdentifier { .. } => Stage::Scanner,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::EnumValueDecreasing { .. }
            | ErrorImpl::EnumValueOverflow { .. }
            | ErrorImpl::InvalidAssignmentTarget => Stage::Parser,
            ErrorImpl::NameAlreadyDeclared { .. }
            | ErrorImpl::InvalidName { .. }
            | ErrorImpl::UnknownType { .. } => Stage::TypeDatabase,
            _ => Stage::TypeChecker,
        }
    }
}
