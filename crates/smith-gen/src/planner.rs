//! Required-vs-existing test method diff for one declaration.

use std::path::PathBuf;
use std::sync::Arc;

use smith_config::MethodFormat;
use smith_parser::{DeclarationKind, SyntaxTree, Visibility, extract_declarations, parse_file};

use crate::error::GenError;
use crate::naming::{is_test_name, normalize, test_method_name};
use crate::target::TestTarget;
use crate::template::Template;

/// Tree the missing methods are merged into.
#[derive(Debug)]
pub enum MergeSource {
    /// No test file yet; start from the shared skeleton.
    Template(Arc<SyntaxTree>),
    /// The parsed test file already at the target path.
    Existing(SyntaxTree),
}

impl MergeSource {
    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        match self {
            Self::Template(tree) => tree,
            Self::Existing(tree) => tree,
        }
    }

    #[must_use]
    pub const fn is_existing(&self) -> bool {
        matches!(self, Self::Existing(_))
    }
}

#[derive(Debug)]
pub struct TestPlan {
    pub target_namespace: String,
    pub target_class_name: String,
    pub target_path: PathBuf,
    pub required: Vec<String>,
    pub existing: Vec<String>,
    pub missing: Vec<String>,
    pub source: MergeSource,
}

impl TestPlan {
    /// Every required test already exists.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Work out which test methods `target` still needs.
///
/// # Errors
///
/// Returns [`GenError::Parse`] when a test file exists at the target path
/// but cannot be read or parsed.
pub fn plan(
    target: &TestTarget,
    template: &Template,
    format: MethodFormat,
) -> Result<TestPlan, GenError> {
    let required = required_methods(target, format);

    let (source, existing) = if target.path.is_file() {
        let tree = parse_file(&target.path)?;
        let existing = existing_methods(&tree, &target.class_name, format);
        (MergeSource::Existing(tree), existing)
    } else {
        (MergeSource::Template(template.tree()), Vec::new())
    };

    let missing = required
        .iter()
        .filter(|name| !existing.contains(name))
        .cloned()
        .collect();

    Ok(TestPlan {
        target_namespace: target.namespace.clone(),
        target_class_name: target.class_name.clone(),
        target_path: target.path.clone(),
        required,
        existing,
        missing,
        source,
    })
}

fn required_methods(target: &TestTarget, format: MethodFormat) -> Vec<String> {
    let mut required: Vec<String> = Vec::new();
    for method in target.declaration.testable_methods() {
        let name = test_method_name(&method.name, format);
        if !required.contains(&name) {
            required.push(name);
        }
    }
    required
}

/// Normalized public test methods of the class named `class_name`, else of
/// the first class in `tree`.
fn existing_methods(tree: &SyntaxTree, class_name: &str, format: MethodFormat) -> Vec<String> {
    let classes: Vec<_> = extract_declarations(tree)
        .into_iter()
        .filter(|declaration| declaration.kind == DeclarationKind::Class)
        .collect();
    let Some(class) = classes
        .iter()
        .find(|declaration| declaration.name == class_name)
        .or_else(|| classes.first())
    else {
        return Vec::new();
    };

    let mut existing: Vec<String> = Vec::new();
    for method in &class.methods {
        if method.visibility != Visibility::Public {
            continue;
        }
        let name = normalize(&method.name, format);
        if is_test_name(&name) && !existing.contains(&name) {
            existing.push(name);
        }
    }
    existing
}
