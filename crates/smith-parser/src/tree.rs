//! Arena syntax tree that keeps byte spans and trivia for lossless reprinting.
//!
//! Every node lowered from the parser remembers the byte range it covered in
//! the source, the gap before it inside its parent (`leading`), and for
//! interior nodes the gap after its last child (`trailing`). Together these
//! cover every byte of the file, so an untouched tree prints back exactly.
//!
//! Nodes created after parsing carry no span. Mutation is limited to
//! replacing a node with literal text and inserting new children, which is
//! all the printer knows how to reconcile.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Half-open byte range `[start, end)` into the tree's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: String,
    named: bool,
    field: Option<&'static str>,
    span: Option<Span>,
    leading: Option<Span>,
    trailing: Option<Span>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SyntaxNode {
    pub(crate) fn original(
        kind: String,
        named: bool,
        field: Option<&'static str>,
        span: Span,
        leading: Span,
    ) -> Self {
        Self {
            kind,
            named,
            field,
            span: Some(span),
            leading: Some(leading),
            trailing: None,
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) const fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) const fn set_trailing(&mut self, trailing: Option<Span>) {
        self.trailing = trailing;
    }

    /// A new token or identifier that prints as `text`.
    #[must_use]
    pub fn leaf(kind: &str, text: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            named: true,
            field: None,
            span: None,
            leading: None,
            trailing: None,
            text: Some(text.into()),
            parent: None,
            children: Vec::new(),
        }
    }

    /// A new interior node; attach children with [`SyntaxTree::append_child`].
    #[must_use]
    pub fn branch(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            named: true,
            field: None,
            span: None,
            leading: None,
            trailing: None,
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Mark the node as an anonymous grammar token (`{`, `function`, ...).
    #[must_use]
    pub const fn anonymous(mut self) -> Self {
        self.named = false;
        self
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub const fn is_named(&self) -> bool {
        self.named
    }

    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        self.field
    }

    /// Byte span in the original source; `None` for synthesized nodes.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        self.span
    }

    /// Trivia between the previous sibling (or the parent start) and this node.
    #[must_use]
    pub const fn leading(&self) -> Option<Span> {
        self.leading
    }

    /// Trivia between the last child and the end of this node.
    #[must_use]
    pub const fn trailing(&self) -> Option<Span> {
        self.trailing
    }

    /// Replacement text of a synthesized leaf.
    #[must_use]
    pub fn replacement(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        self.span.is_none()
    }
}

/// A pass over a tree, applied in pre-order by [`SyntaxTree::apply`].
pub trait VisitMut {
    fn visit_node(&mut self, tree: &mut SyntaxTree, id: NodeId);
}

/// Parsed file: node arena plus the shared, immutable source text.
///
/// `Clone` is a deep structural copy of the arena; the source text is shared.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    origin: Arc<str>,
    source: Arc<str>,
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn from_parts(
        origin: &str,
        source: &str,
        nodes: Vec<SyntaxNode>,
        root: NodeId,
    ) -> Self {
        Self {
            origin: Arc::from(origin),
            source: Arc::from(source),
            nodes,
            root,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SyntaxNode {
        &mut self.nodes[id.0]
    }

    /// Label of the file this tree was parsed from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> &str {
        self.node(id).kind()
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    #[must_use]
    pub fn child_by_field(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.node(*child).field() == Some(field))
    }

    pub fn children_of_kind<'a>(
        &'a self,
        id: NodeId,
        kind: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.kind(*child) == kind)
    }

    /// Source bytes covered by `span`.
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        &self.source[span.range()]
    }

    /// Text of a node as it appeared in the source.
    ///
    /// Synthesized leaves return their replacement; synthesized interior
    /// nodes join their children's text with single spaces.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Cow<'_, str> {
        let node = self.node(id);
        if let Some(text) = node.replacement() {
            return Cow::Borrowed(text);
        }
        if let Some(span) = node.span() {
            return Cow::Borrowed(self.slice(span));
        }
        let parts: Vec<Cow<'_, str>> = node.children().iter().map(|c| self.text(*c)).collect();
        Cow::Owned(parts.join(" "))
    }

    /// Node ids reachable from the root, parents before children.
    #[must_use]
    pub fn preorder(&self) -> Vec<NodeId> {
        self.preorder_from(self.root)
    }

    /// Node ids of the subtree rooted at `id`, parents before children.
    #[must_use]
    pub fn preorder_from(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        order
    }

    /// Nearest ancestor of `id` whose kind is one of `kinds`.
    #[must_use]
    pub fn ancestor_of_kind(&self, id: NodeId, kinds: &[&str]) -> Option<NodeId> {
        let mut current = self.node(id).parent();
        while let Some(parent) = current {
            if kinds.contains(&self.kind(parent)) {
                return Some(parent);
            }
            current = self.node(parent).parent();
        }
        None
    }

    /// Run `visitor` over every node present before the pass started.
    pub fn apply<V: VisitMut>(&mut self, visitor: &mut V) {
        for id in self.preorder() {
            visitor.visit_node(self, id);
        }
    }

    /// Replace a node's content with literal `text`.
    ///
    /// The node keeps its kind, field and leading trivia; its children are
    /// detached and it no longer corresponds to any original bytes.
    pub fn replace_with_text(&mut self, id: NodeId, text: impl Into<String>) {
        let node = self.node_mut(id);
        node.span = None;
        node.trailing = None;
        node.text = Some(text.into());
        node.children.clear();
    }

    /// Add a detached node to the arena.
    pub fn push_node(&mut self, node: SyntaxNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child);
    }

    /// Insert `child` at `index` among `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of children.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.node_mut(child).set_parent(parent);
        self.node_mut(parent).children.insert(index, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    const SOURCE: &str = "<?php\n\nclass Foo\n{\n    public function bar() {}\n}\n";

    #[test]
    fn leading_and_trailing_cover_every_byte() {
        let tree = parse_source(SOURCE, "Foo.php").expect("parses");
        let root = tree.node(tree.root());
        assert_eq!(root.span(), Some(Span::new(0, SOURCE.len())));

        let covered: usize = tree
            .children(tree.root())
            .iter()
            .map(|c| {
                let node = tree.node(*c);
                node.leading().map_or(0, Span::len) + node.span().map_or(0, Span::len)
            })
            .sum::<usize>()
            + root.trailing().map_or(0, Span::len);
        assert_eq!(covered, SOURCE.len());
    }

    #[test]
    fn preorder_visits_parents_first() {
        let tree = parse_source(SOURCE, "Foo.php").expect("parses");
        let order = tree.preorder();
        assert_eq!(order[0], tree.root());
        let class = order
            .iter()
            .position(|id| tree.kind(*id) == "class_declaration")
            .expect("class present");
        let method = order
            .iter()
            .position(|id| tree.kind(*id) == "method_declaration")
            .expect("method present");
        assert!(class < method);
    }

    #[test]
    fn replace_with_text_detaches_children() {
        let mut tree = parse_source(SOURCE, "Foo.php").expect("parses");
        let class = tree
            .preorder()
            .into_iter()
            .find(|id| tree.kind(*id) == "class_declaration")
            .expect("class present");
        let name = tree.child_by_field(class, "name").expect("class name");
        assert_eq!(tree.text(name), "Foo");

        tree.replace_with_text(name, "FooTest");
        assert_eq!(tree.text(name), "FooTest");
        assert!(tree.node(name).is_synthesized());
        assert!(tree.node(name).leading().is_some());
    }

    #[test]
    fn clone_is_independent() {
        let prototype = parse_source(SOURCE, "Foo.php").expect("parses");
        let mut copy = prototype.clone();
        let stub = copy.push_node(SyntaxNode::leaf("comment", "// new"));
        copy.append_child(copy.root(), stub);

        let original_children = prototype.children(prototype.root()).len();
        assert_eq!(copy.children(copy.root()).len(), original_children + 1);
        assert!(prototype.len() < copy.len());
    }

    #[test]
    fn synthesized_branch_text_joins_children() {
        let mut tree = parse_source("<?php\n", "x.php").expect("parses");
        let branch = tree.push_node(SyntaxNode::branch("method_declaration"));
        let vis = tree.push_node(SyntaxNode::leaf("visibility_modifier", "public"));
        let kw = tree.push_node(SyntaxNode::leaf("function", "function").anonymous());
        tree.append_child(branch, vis);
        tree.append_child(branch, kw);
        assert_eq!(tree.text(branch), "public function");
    }
}
