//! Class and trait declaration extraction.

use std::collections::HashSet;

use crate::tree::{NodeId, SyntaxTree};
use crate::types::{ClassDeclaration, DeclarationKind, MethodDeclaration, Visibility};

/// Every named class or trait declaration in `tree`, in source order.
///
/// Nested declarations (e.g. inside a function body) are included.
/// Interfaces, enums and anonymous classes are not.
#[must_use]
pub fn extract_declarations(tree: &SyntaxTree) -> Vec<ClassDeclaration> {
    let mut declarations = Vec::new();
    let mut stack: Vec<(NodeId, Option<String>)> = vec![(tree.root(), None)];

    while let Some((id, namespace)) = stack.pop() {
        let kind = match tree.kind(id) {
            "class_declaration" => Some(DeclarationKind::Class),
            "trait_declaration" => Some(DeclarationKind::Trait),
            _ => None,
        };
        let found = kind.and_then(|kind| declaration(tree, id, kind, namespace.as_deref()));
        declarations.extend(found);

        // `namespace X;` applies to the siblings that follow it.
        let mut current = namespace;
        let mut pending = Vec::new();
        for &child in tree.children(id) {
            if tree.kind(child) != "namespace_definition" {
                pending.push((child, current.clone()));
                continue;
            }
            let name = tree
                .child_by_field(child, "name")
                .map(|name| clean_namespace(&tree.text(name)));
            match tree.child_by_field(child, "body") {
                Some(body) => pending.push((body, name)),
                None => current = name,
            }
        }
        stack.extend(pending.into_iter().rev());
    }
    declarations
}

fn declaration(
    tree: &SyntaxTree,
    id: NodeId,
    kind: DeclarationKind,
    namespace: Option<&str>,
) -> Option<ClassDeclaration> {
    let name = tree.child_by_field(id, "name")?;
    let name = tree.text(name).trim().to_string();
    if name.is_empty() {
        return None;
    }

    let methods = tree
        .child_by_field(id, "body")
        .map(|body| methods(tree, body))
        .unwrap_or_default();

    Some(ClassDeclaration {
        name,
        namespace: namespace.map(str::to_string),
        kind,
        methods,
        span: tree.node(id).span(),
    })
}

fn methods(tree: &SyntaxTree, body: NodeId) -> Vec<MethodDeclaration> {
    let mut seen = HashSet::new();
    tree.children_of_kind(body, "method_declaration")
        .filter_map(|method| method_declaration(tree, method))
        .filter(|method| seen.insert(method.name.to_ascii_lowercase()))
        .collect()
}

/// Read a `method_declaration` node; `None` when it has no name.
#[must_use]
pub fn method_declaration(tree: &SyntaxTree, id: NodeId) -> Option<MethodDeclaration> {
    let name = tree.child_by_field(id, "name")?;
    let name = tree.text(name).trim().to_string();
    if name.is_empty() {
        return None;
    }

    let mut visibility = Visibility::Public;
    let mut is_abstract = false;
    let mut is_static = false;
    for &child in tree.children(id) {
        match tree.kind(child) {
            "visibility_modifier" => {
                let text = tree.text(child).to_ascii_lowercase();
                visibility = if text.contains("private") {
                    Visibility::Private
                } else if text.contains("protected") {
                    Visibility::Protected
                } else {
                    Visibility::Public
                };
            }
            "abstract_modifier" => is_abstract = true,
            "static_modifier" => is_static = true,
            _ => {}
        }
    }

    Some(MethodDeclaration {
        name,
        visibility,
        is_abstract,
        is_static,
    })
}

fn clean_namespace(text: &str) -> String {
    text.split_whitespace()
        .collect::<String>()
        .trim_start_matches('\\')
        .to_string()
}
