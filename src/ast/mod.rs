/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, function and declaration nodes, identifiers
/// - expressions: Definitions for the expression variants and operators
/// - statements: Definitions for the statement variants
/// - types: Definitions for type representations in the AST
/// - printer: Canonical source rendering of a tree
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
