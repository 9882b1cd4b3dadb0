use std::ops::Index;

use bigdecimal::BigDecimal;

/// The four binary operators an expression can combine constants with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Every operator, in the order the search tries them
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Swapping the operands does not change the result
    pub fn is_commutative(self) -> bool {
        matches!(self, Operator::Add | Operator::Multiply)
    }

    /// Multiplicative operators, under which the canonical hash folds signs away
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

/// Handle of a node inside one [`ExpressionTree`] arena.
///
/// Two structurally identical subtrees always have different ids, so an id
/// names a node by identity rather than by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        // Trees never hold more nodes than 2 * sources - 1.
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single arena entry
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Constant(BigDecimal),
    Binary {
        op: Operator,
        left: NodeId,
        right: NodeId,
    },
}

/// Immutable arithmetic expression stored as an arena of nodes.
///
/// Expansion never edits a tree in place; it copies the arena and returns a
/// new tree, so snapshots still on the search stack keep their own version.
#[derive(Debug, Clone)]
pub struct ExpressionTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl ExpressionTree {
    /// A tree made of a single constant, which is also its root
    pub fn constant(value: BigDecimal) -> Self {
        Self {
            nodes: vec![Node::Constant(value)],
            root: NodeId::new(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Constant leaves in traversal order (node, left, right)
    pub fn leaves(&self) -> Vec<&BigDecimal> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match &self[id] {
                Node::Constant(value) => out.push(value),
                Node::Binary { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }
        out
    }

    /// Whether the tree is a left-to-right fold: every binary node combines
    /// the expression built so far with a single constant.
    pub fn is_cascade(&self) -> bool {
        let mut current = self.root;
        loop {
            match &self[current] {
                Node::Constant(_) => return true,
                Node::Binary { left, right, .. } => {
                    match (&self[*left], &self[*right]) {
                        (Node::Constant(_), Node::Constant(_)) => return true,
                        (Node::Constant(_), Node::Binary { .. }) => current = *right,
                        (Node::Binary { .. }, Node::Constant(_)) => current = *left,
                        (Node::Binary { .. }, Node::Binary { .. }) => return false,
                    }
                }
            }
        }
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

impl Index<NodeId> for ExpressionTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
pub(crate) mod builders {
    use super::*;

    /// Build a tree from a constant and a list of cascade steps, the same way
    /// the search grows it.
    pub(crate) fn cascade(first: i64, steps: &[(Operator, i64, bool)]) -> ExpressionTree {
        let mut tree = ExpressionTree::constant(BigDecimal::from(first));
        let mut site = tree.root();
        for &(op, value, on_right) in steps {
            match tree.expand(site, op, &BigDecimal::from(value), on_right) {
                Ok(expansion) => {
                    tree = expansion.tree;
                    site = expansion.active_site;
                }
                Err(err) => panic!("expansion failed: {err}"),
            }
        }
        tree
    }

    /// Build `left op right` from two decimal literals
    pub(crate) fn binary(left: &str, op: Operator, right: &str) -> ExpressionTree {
        let parse = |s: &str| match s.parse::<BigDecimal>() {
            Ok(value) => value,
            Err(err) => panic!("bad literal {s}: {err}"),
        };
        let mut tree = ExpressionTree::constant(parse(left));
        let l = tree.root();
        let r = tree.push(Node::Constant(parse(right)));
        tree.root = tree.push(Node::Binary { op, left: l, right: r });
        tree
    }
}
