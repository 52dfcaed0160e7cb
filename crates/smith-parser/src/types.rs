//! Declarations extracted from a syntax tree.

use serde::{Deserialize, Serialize};

use crate::tree::Span;

/// Class-like declaration kinds that receive test classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Trait,
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Class => "class",
            Self::Trait => "trait",
        };
        write!(f, "{s}")
    }
}

/// Method visibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_static: bool,
}

impl MethodDeclaration {
    /// Public, non-abstract methods are the ones that need tests.
    #[must_use]
    pub fn is_testable(&self) -> bool {
        self.visibility == Visibility::Public && !self.is_abstract
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub name: String,
    /// Namespace in effect at the declaration, without a leading `\`.
    pub namespace: Option<String>,
    pub kind: DeclarationKind,
    /// Methods in source order; names are unique (case-insensitively).
    pub methods: Vec<MethodDeclaration>,
    /// Byte span of the declaration; `None` when it was synthesized.
    pub span: Option<Span>,
}

impl ClassDeclaration {
    pub fn testable_methods(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.methods.iter().filter(|method| method.is_testable())
    }

    /// Fully qualified name, e.g. `App\Services\Billing`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) if !namespace.is_empty() => format!("{namespace}\\{}", self.name),
            _ => self.name.clone(),
        }
    }
}
