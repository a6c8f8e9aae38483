// Arena-backed syntax tree
//
// Nodes live in a flat Vec and are addressed by NodeId. Parent links and the
// node's position among its siblings make upward and sideways navigation O(1)
// without back-pointers. Trees come either from a grammar plugin or from
// TreeBuilder.

use serde::Serialize;
use std::ops::Range;

/// Index of a node inside its SyntaxTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Zero-based row/column position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

/// A single node of the tree
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: String,
    /// Grammar field name this node occupies in its parent, if any
    pub field: Option<String>,
    /// False for anonymous tokens such as `export` or `(`
    pub named: bool,
    pub byte_range: Range<usize>,
    pub start: Point,
    pub end: Point,
    parent: Option<NodeId>,
    position: usize,
    children: Vec<NodeId>,
}

/// A parsed file: owned source text plus its node arena. The root is always
/// the first node.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<SyntaxNode>,
}

/// Description of a node about to be appended to a tree
pub(crate) struct NodeSpec<'a> {
    pub kind: &'a str,
    pub field: Option<&'a str>,
    pub named: bool,
    pub byte_range: Range<usize>,
    pub start: Point,
    pub end: Point,
}

impl SyntaxTree {
    pub(crate) fn with_source(source: String) -> Self {
        Self {
            source,
            nodes: Vec::new(),
        }
    }

    /// Append a node. Children must be pushed after their parent, in
    /// document order.
    pub(crate) fn push(&mut self, parent: Option<NodeId>, spec: NodeSpec<'_>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let position = match parent {
            Some(p) => {
                let siblings = &mut self.nodes[p.0].children;
                siblings.push(id);
                siblings.len() - 1
            }
            None => 0,
        };
        self.nodes.push(SyntaxNode {
            kind: spec.kind.to_string(),
            field: spec.field.map(str::to_string),
            named: spec.named,
            byte_range: spec.byte_range,
            start: spec.start,
            end: spec.end,
            parent,
            position,
            children: Vec::new(),
        });
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &str {
        &self.nodes[id.0].kind
    }

    pub fn is_named(&self, id: NodeId) -> bool {
        self.nodes[id.0].named
    }

    pub fn field(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].field.as_deref()
    }

    /// Source text covered by the node. Out-of-range spans yield "".
    pub fn text(&self, id: NodeId) -> &str {
        self.source
            .get(self.nodes[id.0].byte_range.clone())
            .unwrap_or("")
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn named_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.nodes[c.0].named)
    }

    pub fn child_by_field(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.children_by_field(id, field).next()
    }

    pub fn children_by_field<'a>(
        &'a self,
        id: NodeId,
        field: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.nodes[c.0].field.as_deref() == Some(field))
    }

    /// First direct child whose kind is in `kinds`
    pub fn child_of_kind(&self, id: NodeId, kinds: &[&str]) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| kinds.contains(&self.kind(*c)))
    }

    /// Does any direct child (named or anonymous) have this exact kind?
    pub fn has_child_kind(&self, id: NodeId, kind: &str) -> bool {
        self.children(id).iter().any(|c| self.kind(*c) == kind)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        let parent = node.parent?;
        self.nodes[parent.0].children.get(node.position + 1).copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        let parent = node.parent?;
        if node.position == 0 {
            return None;
        }
        self.nodes[parent.0].children.get(node.position - 1).copied()
    }

    pub fn next_named_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(id);
        while let Some(c) = current {
            if self.is_named(c) {
                return Some(c);
            }
            current = self.next_sibling(c);
        }
        None
    }

    pub fn prev_named_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.prev_sibling(id);
        while let Some(c) = current {
            if self.is_named(c) {
                return Some(c);
            }
            current = self.prev_sibling(c);
        }
        None
    }

    /// Parent chain, nearest first, excluding the node itself
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    /// 1-based first line
    pub fn start_line(&self, id: NodeId) -> usize {
        self.nodes[id.0].start.row + 1
    }

    /// 1-based last line
    pub fn end_line(&self, id: NodeId) -> usize {
        self.nodes[id.0].end.row + 1
    }

    /// True when the grammar recovered from a syntax error somewhere
    pub fn has_error(&self) -> bool {
        self.nodes.iter().any(|n| n.kind == "ERROR")
    }
}

/// Builds trees by hand, for grammars without a bundled plugin and for tests.
///
/// Ranges can be given explicitly or located by searching for a needle in the
/// source, starting after the parent's last child.
pub struct TreeBuilder {
    tree: SyntaxTree,
    line_starts: Vec<usize>,
}

impl TreeBuilder {
    /// Start a tree whose root spans the whole source
    pub fn new(source: impl Into<String>, root_kind: &str) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        let len = source.len();
        let mut builder = Self {
            tree: SyntaxTree::with_source(source),
            line_starts,
        };
        builder.push(None, None, root_kind, true, 0..len);
        builder
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Named node with an explicit byte range
    pub fn node(&mut self, parent: NodeId, kind: &str, range: Range<usize>) -> NodeId {
        self.push(Some(parent), None, kind, true, range)
    }

    /// Named node occupying a grammar field, with an explicit byte range
    pub fn field_node(
        &mut self,
        parent: NodeId,
        field: &str,
        kind: &str,
        range: Range<usize>,
    ) -> NodeId {
        self.push(Some(parent), Some(field), kind, true, range)
    }

    /// Named node covering the next occurrence of `needle` inside the parent
    pub fn child(&mut self, parent: NodeId, kind: &str, needle: &str) -> NodeId {
        let range = self.locate(parent, needle);
        self.push(Some(parent), None, kind, true, range)
    }

    /// Like `child`, also tagging the grammar field
    pub fn field_child(&mut self, parent: NodeId, field: &str, kind: &str, needle: &str) -> NodeId {
        let range = self.locate(parent, needle);
        self.push(Some(parent), Some(field), kind, true, range)
    }

    /// Anonymous token covering the next occurrence of `text`
    pub fn token(&mut self, parent: NodeId, text: &str) -> NodeId {
        let range = self.locate(parent, text);
        self.push(Some(parent), None, text, false, range)
    }

    pub fn finish(self) -> SyntaxTree {
        self.tree
    }

    fn locate(&self, parent: NodeId, needle: &str) -> Range<usize> {
        let node = self.tree.node(parent);
        let from = node
            .children
            .last()
            .map(|c| self.tree.node(*c).byte_range.end)
            .unwrap_or(node.byte_range.start);
        let haystack = self.tree.source.get(from..node.byte_range.end).unwrap_or("");
        match haystack.find(needle) {
            Some(offset) => (from + offset)..(from + offset + needle.len()),
            None => from..from,
        }
    }

    fn point(&self, byte: usize) -> Point {
        let row = match self.line_starts.binary_search(&byte) {
            Ok(row) => row,
            Err(next) => next - 1,
        };
        Point {
            row,
            column: byte - self.line_starts[row],
        }
    }

    fn push(
        &mut self,
        parent: Option<NodeId>,
        field: Option<&str>,
        kind: &str,
        named: bool,
        range: Range<usize>,
    ) -> NodeId {
        let start = self.point(range.start);
        let end = self.point(range.end);
        self.tree.push(
            parent,
            NodeSpec {
                kind,
                field,
                named,
                byte_range: range,
                start,
                end,
            },
        )
    }
}
