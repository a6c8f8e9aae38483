// Iterative two-phase tree traversal
//
// Every node is pushed twice: once pending (emits Enter, then schedules its
// children) and once visited (emits Leave). Children are pushed in reverse so
// they pop in document order. Depth is bounded only by heap memory.

use super::tree::{NodeId, SyntaxTree};

/// A single traversal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent {
    /// Pre-order visit, before any child
    Enter(NodeId),
    /// Post-order visit, after all children
    Leave(NodeId),
}

#[derive(Debug, Clone, Copy)]
enum Visit {
    Pending,
    Visited,
}

/// Stack-driven walker over a subtree
pub struct TreeWalker<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<(NodeId, Visit)>,
}

impl<'t> TreeWalker<'t> {
    pub fn new(tree: &'t SyntaxTree, root: NodeId) -> Self {
        let stack = if tree.is_empty() {
            Vec::new()
        } else {
            vec![(root, Visit::Pending)]
        };
        Self { tree, stack }
    }
}

impl Iterator for TreeWalker<'_> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        let (id, visit) = self.stack.pop()?;
        match visit {
            Visit::Pending => {
                self.stack.push((id, Visit::Visited));
                for child in self.tree.children(id).iter().rev() {
                    self.stack.push((*child, Visit::Pending));
                }
                Some(WalkEvent::Enter(id))
            }
            Visit::Visited => Some(WalkEvent::Leave(id)),
        }
    }
}

/// Caller-supplied matchers invoked by `walk`
pub trait Visitor {
    fn enter(&mut self, _tree: &SyntaxTree, _node: NodeId) {}
    fn leave(&mut self, _tree: &SyntaxTree, _node: NodeId) {}
}

/// Drive a visitor over the whole tree
pub fn walk<V: Visitor + ?Sized>(tree: &SyntaxTree, visitor: &mut V) {
    walk_from(tree, tree.root(), visitor);
}

/// Drive a visitor over the subtree rooted at `root`
pub fn walk_from<V: Visitor + ?Sized>(tree: &SyntaxTree, root: NodeId, visitor: &mut V) {
    for event in TreeWalker::new(tree, root) {
        match event {
            WalkEvent::Enter(id) => visitor.enter(tree, id),
            WalkEvent::Leave(id) => visitor.leave(tree, id),
        }
    }
}
