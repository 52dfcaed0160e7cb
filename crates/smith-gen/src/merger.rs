//! Merging missing test methods into a test-class tree.

use smith_parser::{NodeId, SyntaxNode, SyntaxTree, VisitMut};
use tracing::debug;

use crate::error::MergeError;

/// Renames namespaces and the target class, then appends method stubs.
///
/// Applied in pre-order; only nodes present before the pass are visited,
/// so inserted stubs are never revisited.
#[derive(Debug)]
pub struct TestClassUpdater<'a> {
    namespace: &'a str,
    class_name: &'a str,
    methods: &'a [String],
    class: NodeId,
}

impl<'a> TestClassUpdater<'a> {
    #[must_use]
    pub const fn new(
        namespace: &'a str,
        class_name: &'a str,
        methods: &'a [String],
        class: NodeId,
    ) -> Self {
        Self {
            namespace,
            class_name,
            methods,
            class,
        }
    }
}

impl VisitMut for TestClassUpdater<'_> {
    fn visit_node(&mut self, tree: &mut SyntaxTree, id: NodeId) {
        if tree.kind(id) == "namespace_definition" {
            if let Some(name) = tree.child_by_field(id, "name") {
                tree.replace_with_text(name, self.namespace);
            }
            return;
        }

        if id != self.class {
            return;
        }
        if let Some(name) = tree.child_by_field(id, "name") {
            tree.replace_with_text(name, self.class_name);
        }
        if let Some(body) = tree.child_by_field(id, "body") {
            for method in self.methods {
                let stub = generated_method(tree, method);
                let children = tree.children(body);
                let close = children
                    .iter()
                    .rposition(|child| tree.kind(*child) == "}")
                    .unwrap_or(children.len());
                tree.insert_child(body, close, stub);
            }
        }
    }
}

/// Deep-clone `source`, rename it to `namespace\class_name` and append a
/// stub for every name in `methods`.
///
/// The class merged into is the one already named `class_name`, else the
/// first class of the tree.
///
/// # Errors
///
/// Returns [`MergeError::NoClass`] when `source` declares no class.
pub fn merge(
    source: &SyntaxTree,
    namespace: &str,
    class_name: &str,
    methods: &[String],
) -> Result<SyntaxTree, MergeError> {
    let class = target_class(source, class_name).ok_or_else(|| MergeError::NoClass {
        origin: source.origin().to_string(),
    })?;

    if !source
        .preorder()
        .into_iter()
        .any(|id| source.kind(id) == "namespace_definition")
    {
        debug!(origin = %source.origin(), "merge source declares no namespace; keeping none");
    }

    let mut tree = source.clone();
    let mut updater = TestClassUpdater::new(namespace, class_name, methods, class);
    tree.apply(&mut updater);
    Ok(tree)
}

/// The `class_declaration` named `class_name`, else the first one in the tree.
#[must_use]
pub fn target_class(tree: &SyntaxTree, class_name: &str) -> Option<NodeId> {
    let classes = class_declarations(tree);
    classes
        .iter()
        .copied()
        .find(|id| {
            tree.child_by_field(*id, "name")
                .is_some_and(|name| tree.text(name).trim() == class_name)
        })
        .or_else(|| classes.first().copied())
}

/// Whether `tree` has at least one class that can be merged into.
#[must_use]
pub fn has_class(tree: &SyntaxTree) -> bool {
    !class_declarations(tree).is_empty()
}

fn class_declarations(tree: &SyntaxTree) -> Vec<NodeId> {
    tree.preorder()
        .into_iter()
        .filter(|id| tree.kind(*id) == "class_declaration")
        .collect()
}

/// `public function <name>() {}` as a detached subtree.
fn generated_method(tree: &mut SyntaxTree, name: &str) -> NodeId {
    let method = tree.push_node(SyntaxNode::branch("method_declaration"));
    let parts = [
        SyntaxNode::leaf("visibility_modifier", "public"),
        SyntaxNode::leaf("function", "function").anonymous(),
        SyntaxNode::leaf("name", name).with_field("name"),
        SyntaxNode::leaf("formal_parameters", "()").with_field("parameters"),
        SyntaxNode::leaf("compound_statement", "{}").with_field("body"),
    ];
    for part in parts {
        let child = tree.push_node(part);
        tree.append_child(method, child);
    }
    method
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smith_parser::{extract_declarations, parse_source, print_preserving};

    const TEMPLATE: &str = "<?php\n\nnamespace Tests\\Unit;\n\nuse PHPUnit\\Framework\\TestCase;\n\n\
                            class ExampleTest extends TestCase\n{\n}\n";

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn renames_and_appends_stubs() {
        let source = parse_source(TEMPLATE, "ExampleTest.php").expect("parses");
        let merged = merge(
            &source,
            "Tests\\Unit\\Services",
            "FooTest",
            &names(&["test_bar", "test_baz"]),
        )
        .expect("merges");

        assert_eq!(
            print_preserving(&merged, &source),
            "<?php\n\nnamespace Tests\\Unit\\Services;\n\nuse PHPUnit\\Framework\\TestCase;\n\n\
             class FooTest extends TestCase\n{\n    public function test_bar()\n    {\n    }\n\n    \
             public function test_baz()\n    {\n    }\n}\n"
        );
    }

    #[test]
    fn source_tree_is_left_untouched() {
        let source = parse_source(TEMPLATE, "ExampleTest.php").expect("parses");
        let before = source.len();
        let _ = merge(&source, "Tests", "FooTest", &names(&["test_bar"])).expect("merges");
        assert_eq!(source.len(), before);
        assert_eq!(print_preserving(&source, &source), TEMPLATE);
    }

    #[test]
    fn merged_stubs_are_extractable() {
        let source = parse_source(TEMPLATE, "ExampleTest.php").expect("parses");
        let merged = merge(&source, "Tests", "FooTest", &names(&["test_bar"])).expect("merges");
        let declarations = extract_declarations(&merged);
        assert_eq!(declarations[0].name, "FooTest");
        assert_eq!(declarations[0].methods[0].name, "test_bar");
        assert!(declarations[0].methods[0].is_testable());
    }

    #[test]
    fn prefers_class_already_named_like_the_target() {
        let source = parse_source(
            "<?php\nclass Helper {}\nclass FooTest {\n    public function test_a() {}\n}\n",
            "FooTest.php",
        )
        .expect("parses");
        let merged = merge(&source, "Tests", "FooTest", &names(&["test_b"])).expect("merges");
        let printed = print_preserving(&merged, &source);
        assert!(printed.starts_with("<?php\nclass Helper {}\n"));
        assert!(printed.ends_with("    public function test_b()\n    {\n    }\n}\n"));
    }

    #[test]
    fn without_namespace_none_is_added() {
        let source = parse_source("<?php\nclass ExampleTest\n{\n}\n", "ExampleTest.php")
            .expect("parses");
        let merged = merge(&source, "Tests\\Unit", "FooTest", &[]).expect("merges");
        assert_eq!(
            print_preserving(&merged, &source),
            "<?php\nclass FooTest\n{\n}\n"
        );
    }

    #[test]
    fn no_class_is_an_error() {
        let source = parse_source("<?php\ntrait OnlyTrait {}\n", "t.php").expect("parses");
        let error = merge(&source, "Tests", "FooTest", &[]).expect_err("must fail");
        assert!(matches!(error, MergeError::NoClass { .. }));
        assert!(!has_class(&source));
    }
}
