use crate::display::AstDisplay;
use crate::error::AstError;
use crate::kind::{Arity, NodeKind};
use derive_more::Display;

/// The id of a node within an [`Ast`]
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[display(fmt = "#{}", _0)]
pub struct NodeId(u32);

impl NodeId {
    /// The absent optional child
    pub const EMPTY: NodeId = NodeId(0);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    kind: NodeKind,
    children: Vec<NodeId>,
    value: Option<String>,
}

/// An arena holding every node of one syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    /// Creates an arena containing only the empty node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Empty,
                children: vec![],
                value: None,
            }],
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn check_children(&self, children: &[NodeId]) -> Result<(), AstError> {
        match children.iter().find(|child| child.index() >= self.nodes.len()) {
            Some(child) => Err(AstError::InvalidNode(*child)),
            None => Ok(()),
        }
    }

    /// Adds a node with a fixed number of child slots
    pub fn node(
        &mut self,
        kind: NodeKind,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, AstError> {
        let children = children.into_iter().collect::<Vec<_>>();
        match kind.arity() {
            Arity::Fixed(n) if n == children.len() => {}
            expected => {
                return Err(AstError::ArityMismatch {
                    kind,
                    expected,
                    found: children.len(),
                })
            }
        }
        self.check_children(&children)?;
        Ok(self.push(Node {
            kind,
            children,
            value: None,
        }))
    }

    /// Adds a list node
    pub fn list(
        &mut self,
        kind: NodeKind,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, AstError> {
        let children = children.into_iter().collect::<Vec<_>>();
        if kind.arity() != Arity::List {
            return Err(AstError::ArityMismatch {
                kind,
                expected: kind.arity(),
                found: children.len(),
            });
        }
        self.check_children(&children)?;
        Ok(self.push(Node {
            kind,
            children,
            value: None,
        }))
    }

    /// Adds a terminal node carrying `value`
    pub fn terminal(&mut self, kind: NodeKind, value: impl Into<String>) -> Result<NodeId, AstError> {
        if kind.arity() != Arity::Terminal {
            return Err(AstError::ArityMismatch {
                kind,
                expected: kind.arity(),
                found: 0,
            });
        }
        Ok(self.push(Node {
            kind,
            children: vec![],
            value: Some(value.into()),
        }))
    }

    /// Replaces the child at `index` of `parent`, returning the child it replaced.
    ///
    /// Only the splice slot of a kind may be replaced, see [`NodeKind::splice_slot`].
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<NodeId, AstError> {
        self.check_children(&[child])?;
        let node = self
            .nodes
            .get_mut(parent.index())
            .ok_or(AstError::InvalidNode(parent))?;
        let kind = node.kind;
        if index >= node.children.len() {
            return Err(AstError::IndexOutOfBounds { kind, index });
        }
        if kind.splice_slot() != Some(index) {
            return Err(AstError::NotSpliceable { kind, index });
        }
        Ok(std::mem::replace(&mut node.children[index], child))
    }

    /// The kind of a node
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(id.index()).map(|node| node.kind)
    }

    /// The children of a node, empty for unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// The child in slot `index` of a node
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// The source text of a terminal node
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.index())?.value.as_deref()
    }

    /// The number of nodes in the arena, including the empty node
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds nothing but the empty node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Renders the tree below `root` as an indented S-expression
    pub fn display(&self, root: NodeId) -> AstDisplay<'_> {
        AstDisplay::new(self, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_empty_arena() {
        let ast = Ast::new();
        assert!(ast.is_empty());
        assert_eq!(ast.kind(NodeId::EMPTY), Some(NodeKind::Empty));
        assert!(ast.children(NodeId::EMPTY).is_empty());
    }

    #[test]
    fn test_build_nodes() {
        let mut ast = Ast::new();
        let lo = ast.terminal(NodeKind::IntValue, "1").unwrap();
        let hi = ast.terminal(NodeKind::IntValue, "10").unwrap();
        let range = ast.node(NodeKind::Subrange, [NodeId::EMPTY, lo, hi]).unwrap();
        assert_eq!(ast.children(range), &[NodeId::EMPTY, lo, hi]);
        assert_eq!(ast.value(hi), Some("10"));
        assert_eq!(ast.value(range), None);
    }

    #[test]
    fn test_arity_is_checked() {
        let mut ast = Ast::new();
        let ident = ast.terminal(NodeKind::Ident, "x").unwrap();
        assert!(matches!(
            ast.node(NodeKind::Assignment, [ident]),
            Err(AstError::ArityMismatch { found: 1, .. })
        ));
        assert!(ast.list(NodeKind::Assignment, [ident]).is_err());
        assert!(ast.terminal(NodeKind::IdentList, "x").is_err());
        assert!(ast.node(NodeKind::Deref, [NodeId(99)]).is_err());
    }

    #[test]
    fn test_splice_type_into_subrange() {
        let mut ast = Ast::new();
        let lo = ast.terminal(NodeKind::CharValue, "'a'").unwrap();
        let hi = ast.terminal(NodeKind::CharValue, "'z'").unwrap();
        let range = ast.node(NodeKind::Subrange, [NodeId::EMPTY, lo, hi]).unwrap();
        let char_type = ast.terminal(NodeKind::Ident, "CHAR").unwrap();
        assert_eq!(ast.replace_child(range, 0, char_type), Ok(NodeId::EMPTY));
        assert_eq!(ast.child(range, 0), Some(char_type));
    }

    #[test]
    fn test_replace_child_is_narrow() {
        let mut ast = Ast::new();
        let lo = ast.terminal(NodeKind::IntValue, "0").unwrap();
        let hi = ast.terminal(NodeKind::IntValue, "1").unwrap();
        let range = ast.node(NodeKind::Subrange, [NodeId::EMPTY, lo, hi]).unwrap();
        let add = ast.node(NodeKind::Add, [lo, hi]).unwrap();
        assert_eq!(
            ast.replace_child(range, 1, hi),
            Err(AstError::NotSpliceable {
                kind: NodeKind::Subrange,
                index: 1
            })
        );
        assert!(matches!(
            ast.replace_child(add, 0, hi),
            Err(AstError::NotSpliceable { .. })
        ));
        assert!(matches!(
            ast.replace_child(lo, 0, hi),
            Err(AstError::IndexOutOfBounds { .. })
        ));
    }
}
