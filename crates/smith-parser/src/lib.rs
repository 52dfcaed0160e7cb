//! # smith-parser
//!
//! ast-grep-based PHP parsing for testsmith.
//!
//! - [`parse_source`] / [`parse_file`] lower the PHP grammar into an arena
//!   [`SyntaxTree`] that remembers every byte span and the trivia between nodes
//! - [`extract_declarations`] lists the classes and traits of a tree together
//!   with their methods
//! - [`print_preserving`] prints an edited tree, copying untouched regions
//!   verbatim from the source

mod error;
pub mod extract;
mod language;
pub mod parser;
pub mod printer;
pub mod tree;
pub mod types;

pub use error::ParserError;
pub use extract::{extract_declarations, method_declaration};
pub use language::PhpLang;
pub use parser::{parse_file, parse_source};
pub use printer::print_preserving;
pub use tree::{NodeId, Span, SyntaxNode, SyntaxTree, VisitMut};
pub use types::{ClassDeclaration, DeclarationKind, MethodDeclaration, Visibility};
