/// AST (Abstract Syntax Tree) module
/// Contains the value model produced by the parser
///
/// Submodules:
/// - ast: Expression nodes and operator tags
/// - statements: Top-level statements owning expression roots
pub mod ast;
pub mod statements;
