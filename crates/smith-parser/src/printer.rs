//! Format-preserving printer.
//!
//! A node of the edited tree is *pristine* when the original tree has a
//! node of the same kind over the same span and all of its children are
//! pristine too. Pristine nodes are copied from the source byte for byte.
//! Edited nodes are rebuilt from their children, reusing the original gaps
//! between them; only inserted nodes get fresh layout.

use std::collections::HashMap;

use crate::tree::{NodeId, Span, SyntaxTree};

const INDENT_UNIT: &str = "    ";

/// Print `edited`, reusing every byte of `original` that was not touched.
///
/// `edited` must be a clone of `original` (or share its source text);
/// spans are resolved against `original.source()`. Inserted nodes use the
/// line ending of the original's first line break.
#[must_use]
pub fn print_preserving(edited: &SyntaxTree, original: &SyntaxTree) -> String {
    debug_assert_eq!(edited.source(), original.source());
    let printer = Printer::new(edited, original);
    printer.print()
}

/// Unit of pending output; the printer drains these from a stack.
enum Step {
    Node(NodeId),
    Source(Span),
    Text(String),
    Fresh(NodeId, String),
}

struct Printer<'a> {
    tree: &'a SyntaxTree,
    source: &'a str,
    pristine: HashMap<NodeId, bool>,
    newline: &'static str,
}

impl<'a> Printer<'a> {
    fn new(tree: &'a SyntaxTree, original: &'a SyntaxTree) -> Self {
        let index: HashMap<(usize, usize, &str), NodeId> = original
            .preorder()
            .into_iter()
            .filter_map(|id| {
                let node = original.node(id);
                node.span().map(|span| ((span.start, span.end, node.kind()), id))
            })
            .collect();

        // Children come after their parent in pre-order, so the reversed
        // order settles every child before the node that holds it.
        let mut pristine = HashMap::new();
        for id in tree.preorder().into_iter().rev() {
            let node = tree.node(id);
            let matched = node
                .span()
                .and_then(|span| index.get(&(span.start, span.end, node.kind())).copied());
            let result = matched.is_some_and(|counterpart| {
                let ours = node.children();
                let theirs = original.children(counterpart);
                ours.len() == theirs.len()
                    && ours.iter().zip(theirs).all(|(mine, other)| {
                        tree.node(*mine).span() == original.node(*other).span()
                            && pristine.get(mine).copied().unwrap_or(false)
                    })
            });
            pristine.insert(id, result);
        }

        let source = original.source();
        let newline = match source.find('\n') {
            Some(pos) if source[..pos].ends_with('\r') => "\r\n",
            _ => "\n",
        };

        Self {
            tree,
            source,
            pristine,
            newline,
        }
    }

    fn print(&self) -> String {
        let mut out = String::with_capacity(self.source.len() + 256);
        let mut stack = vec![Step::Node(self.tree.root())];
        while let Some(step) = stack.pop() {
            match step {
                Step::Source(span) => out.push_str(&self.source[span.range()]),
                Step::Text(text) => out.push_str(&text),
                Step::Fresh(id, indent) => self.emit_fresh(&mut out, id, &indent),
                Step::Node(id) => {
                    let steps = self.expand(id);
                    stack.extend(steps.into_iter().rev());
                }
            }
        }
        out
    }

    fn is_pristine(&self, id: NodeId) -> bool {
        self.pristine.get(&id).copied().unwrap_or(false)
    }

    /// The output of one node, in order, with its children left unexpanded.
    fn expand(&self, id: NodeId) -> Vec<Step> {
        let tree = self.tree;
        let node = tree.node(id);
        if self.is_pristine(id) {
            return node.span().map(Step::Source).into_iter().collect();
        }
        if let Some(text) = node.replacement() {
            return vec![Step::Text(text.to_string())];
        }
        let Some(span) = node.span() else {
            let indent = self.line_indent(self.source.len());
            return vec![Step::Fresh(id, indent)];
        };
        if node.children().is_empty() {
            return vec![Step::Source(span)];
        }

        let mut steps = Vec::with_capacity(node.children().len() * 2 + 1);
        let mut after_insert = false;
        for (position, &child) in node.children().iter().enumerate() {
            if let Some(leading) = tree.node(child).leading() {
                if after_insert && !self.source[leading.range()].contains('\n') {
                    // Put the token that follows inserted members on its own line.
                    let indent = self.line_indent(span.start);
                    steps.push(Step::Text(format!("{}{indent}", self.newline)));
                } else {
                    steps.push(Step::Source(leading));
                }
                steps.push(Step::Node(child));
                after_insert = false;
            } else {
                let indent = self.member_indent(id, position);
                let follows_member = position > 0
                    && tree.node(node.children()[position - 1]).is_named();
                let blank = if follows_member { self.newline } else { "" };
                steps.push(Step::Text(format!("{}{blank}{indent}", self.newline)));
                steps.push(Step::Fresh(child, indent));
                after_insert = true;
            }
        }

        if let Some(trailing) = node.trailing() {
            steps.push(Step::Source(trailing));
        }
        steps
    }

    /// Canonical layout for a node that has no original bytes.
    fn emit_fresh(&self, out: &mut String, id: NodeId, indent: &str) {
        let tree = self.tree;
        if tree.kind(id) != "method_declaration" {
            out.push_str(&tree.text(id));
            return;
        }

        let mut header: Vec<String> = Vec::new();
        for &child in tree.children(id) {
            match tree.node(child).field() {
                Some("parameters" | "body") => {}
                Some("name") => {
                    let params = tree
                        .child_by_field(id, "parameters")
                        .map_or_else(|| "()".to_string(), |p| tree.text(p).into_owned());
                    header.push(format!("{}{params}", tree.text(child)));
                }
                _ => header.push(tree.text(child).into_owned()),
            }
        }
        out.push_str(&header.join(" "));

        if tree.child_by_field(id, "body").is_some() {
            let newline = self.newline;
            out.push_str(&format!("{newline}{indent}{{{newline}{indent}}}"));
        } else {
            out.push(';');
        }
    }

    /// Indentation for a member inserted at `position` among `parent`'s children.
    ///
    /// Follows the previous member when it starts its own line, otherwise
    /// one unit deeper than the line that opens `parent`.
    fn member_indent(&self, parent: NodeId, position: usize) -> String {
        let tree = self.tree;
        let start = tree.node(parent).span().map_or(0, |span| span.start);
        let siblings = &tree.children(parent)[..position];
        let previous_member = siblings.iter().rev().find_map(|sibling| {
            let node = tree.node(*sibling);
            if node.is_named() { node.span() } else { None }
        });
        let own_line =
            |span: Span| span.start > start && self.source[start..span.start].contains('\n');
        match previous_member {
            Some(span) if own_line(span) => self.line_indent(span.start),
            _ => format!("{}{INDENT_UNIT}", self.line_indent(start)),
        }
    }

    /// Leading whitespace of the line containing `offset`.
    fn line_indent(&self, offset: usize) -> String {
        let before = &self.source[..offset.min(self.source.len())];
        let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
        before[line_start..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect()
    }
}
