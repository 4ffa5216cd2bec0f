/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the parse tree
///
/// Submodules:
/// - ast: Node ids, files and top level declarations
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes
/// - types: The canonical type representation shared with the registry
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
