/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The closed `Node`, `TypeNode` and `Stmt` enums and their rendering
/// - expressions: Payloads of the expression variants
/// - statements: Top-level statement payloads and `Program`
/// - types: Payloads of the type annotation variants
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
