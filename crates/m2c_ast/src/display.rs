use crate::arena::{Ast, NodeId};
use crate::kind::Arity;
use std::fmt::{Display, Formatter};

/// Displays a subtree as an indented S-expression.
///
/// Terminals print as `(Kind "text")`, the empty node as `-`.
pub struct AstDisplay<'a> {
    ast: &'a Ast,
    root: NodeId,
}

impl<'a> AstDisplay<'a> {
    pub(crate) fn new(ast: &'a Ast, root: NodeId) -> Self {
        Self { ast, root }
    }

    fn write_node(&self, f: &mut Formatter<'_>, id: NodeId, depth: usize) -> std::fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        let Some(kind) = self.ast.kind(id) else {
            return write!(f, "<invalid {id}>");
        };
        if id.is_empty() {
            return write!(f, "-");
        }
        if kind.arity() == Arity::Terminal {
            return write!(f, "({kind} {:?})", self.ast.value(id).unwrap_or_default());
        }
        let children = self.ast.children(id);
        if children.is_empty() {
            return write!(f, "({kind})");
        }
        write!(f, "({kind}")?;
        for child in children {
            writeln!(f)?;
            self.write_node(f, *child, depth + 1)?;
        }
        write!(f, ")")
    }
}

impl Display for AstDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.write_node(f, self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Ast, NodeId, NodeKind};
    use test_log::test;

    #[test]
    fn test_display_tree() {
        let mut ast = Ast::new();
        let x = ast.terminal(NodeKind::Ident, "x").unwrap();
        let one = ast.terminal(NodeKind::IntValue, "1").unwrap();
        let assign = ast.node(NodeKind::Assignment, [x, one]).unwrap();
        let ret = ast.node(NodeKind::Return, [NodeId::EMPTY]).unwrap();
        let seq = ast.list(NodeKind::StatementSeq, [assign, ret]).unwrap();
        let expected = "\
(StatementSeq
  (Assignment
    (Ident \"x\")
    (IntValue \"1\"))
  (Return
    -))";
        assert_eq!(ast.display(seq).to_string(), expected);
    }

    #[test]
    fn test_display_empty_list() {
        let mut ast = Ast::new();
        let list = ast.list(NodeKind::ImportList, []).unwrap();
        assert_eq!(ast.display(list).to_string(), "(ImportList)");
    }
}
