//! ast-grep wrapper that lowers the PHP concrete syntax tree into a [`SyntaxTree`].

use std::ops::Range;
use std::path::Path;

use ast_grep_core::tree_sitter::LanguageExt;
use ast_grep_core::{Doc, Node};

use crate::error::ParserError;
use crate::language::PhpLang;
use crate::tree::{NodeId, Span, SyntaxNode, SyntaxTree};

/// Grammar fields recorded on lowered children.
const RECORDED_FIELDS: &[&str] = &["name", "body", "parameters"];

/// Parse PHP `source`; `origin` names the file in diagnostics.
///
/// # Errors
/// Returns `ParserError::Syntax` describing the first error or missing
/// node when the source is malformed.
pub fn parse_source(source: &str, origin: &str) -> Result<SyntaxTree, ParserError> {
    let grep = PhpLang.ast_grep(source);
    let root = grep.root();

    if let Some((offset, message)) = first_syntax_error(&root) {
        let (line, column) = line_column(source, offset);
        return Err(ParserError::Syntax {
            path: origin.to_string(),
            line,
            column,
            message,
        });
    }

    let nodes = lower(root, source.len());
    Ok(SyntaxTree::from_parts(origin, source, nodes, NodeId::from_index(0)))
}

/// Read and parse the file at `path`.
///
/// # Errors
/// Returns `ParserError::Io` if the file cannot be read, or
/// `ParserError::Syntax` if it is malformed.
pub fn parse_file(path: &Path) -> Result<SyntaxTree, ParserError> {
    let origin = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: origin.clone(),
        source,
    })?;
    parse_source(&source, &origin)
}

/// A concrete node waiting to be copied into the arena.
struct Pending<'r, D: Doc> {
    node: Node<'r, D>,
    parent: Option<NodeId>,
    field: Option<&'static str>,
    leading: Span,
    span: Span,
}

/// Copy the concrete tree into arena nodes, root first at index 0.
///
/// Walks with an explicit stack so nesting depth is bounded by the heap,
/// not the thread stack.
fn lower<D: Doc>(root: Node<'_, D>, source_len: usize) -> Vec<SyntaxNode> {
    let mut nodes: Vec<SyntaxNode> = Vec::new();
    let mut stack = vec![Pending {
        node: root,
        parent: None,
        field: None,
        leading: Span::new(0, 0),
        span: Span::new(0, source_len),
    }];

    while let Some(Pending {
        node,
        parent,
        field,
        leading,
        span,
    }) = stack.pop()
    {
        let id = NodeId::from_index(nodes.len());
        let mut lowered =
            SyntaxNode::original(node.kind().to_string(), node.is_named(), field, span, leading);
        if let Some(parent) = parent {
            lowered.set_parent(parent);
            nodes[parent.index()].push_child(id);
        }

        let fields: Vec<(&'static str, Range<usize>)> = RECORDED_FIELDS
            .iter()
            .filter_map(|name| node.field(name).map(|child| (*name, child.range())))
            .collect();

        let mut cursor = span.start;
        let mut children = Vec::new();
        for child in node.children() {
            let child_range = child.range();
            let start = child_range.start.max(cursor);
            let end = child_range.end.max(start);
            let child_field = fields
                .iter()
                .find(|(_, range)| *range == child_range)
                .map(|(name, _)| *name);
            children.push(Pending {
                node: child,
                parent: Some(id),
                field: child_field,
                leading: Span::new(cursor, start),
                span: Span::new(child_range.start, child_range.end),
            });
            cursor = end;
        }

        if !children.is_empty() {
            lowered.set_trailing(Some(Span::new(cursor, span.end.max(cursor))));
        }
        nodes.push(lowered);
        stack.extend(children.into_iter().rev());
    }
    nodes
}

fn first_syntax_error<D: Doc>(root: &Node<'_, D>) -> Option<(usize, String)> {
    root.dfs()
        .find(|node| node.is_error() || node.is_missing())
        .map(|node| {
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                let text = node.text();
                let snippet: String = text
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .chars()
                    .take(40)
                    .collect();
                format!("unexpected `{}`", snippet.trim())
            };
            (node.range().start, message)
        })
}

/// One-based line and column of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_source_produces_program_root() {
        let tree = parse_source("<?php\necho 1;\n", "a.php").expect("parses");
        assert_eq!(tree.kind(tree.root()), "program");
        assert_eq!(tree.origin(), "a.php");
    }

    #[test]
    fn records_name_and_body_fields() {
        let tree = parse_source(
            "<?php\nclass Foo extends Bar\n{\n    public function baz($x) {}\n}\n",
            "Foo.php",
        )
        .expect("parses");
        let class = tree
            .preorder()
            .into_iter()
            .find(|id| tree.kind(*id) == "class_declaration")
            .expect("class");
        let name = tree.child_by_field(class, "name").expect("name field");
        assert_eq!(tree.text(name), "Foo");
        let body = tree.child_by_field(class, "body").expect("body field");
        assert_eq!(tree.kind(body), "declaration_list");

        let method = tree
            .children_of_kind(body, "method_declaration")
            .next()
            .expect("method");
        let params = tree.child_by_field(method, "parameters").expect("params");
        assert_eq!(tree.text(params), "($x)");
    }

    #[test]
    fn malformed_source_reports_location() {
        let error = parse_source("<?php\n\nclass Foo {\n    public function (\n", "Broken.php")
            .expect_err("must fail");
        match error {
            ParserError::Syntax { path, line, .. } => {
                assert_eq!(path, "Broken.php");
                assert!(line >= 3, "error line was {line}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let error = parse_file(Path::new("/definitely/not/here.php")).expect_err("must fail");
        assert!(matches!(error, ParserError::Io { .. }));
        assert!(error.to_string().contains("/definitely/not/here.php"));
    }

    #[test]
    fn line_column_is_one_based() {
        assert_eq!(line_column("ab\ncd", 0), (1, 1));
        assert_eq!(line_column("ab\ncd", 4), (2, 2));
    }
}
