use std::fmt::{self, Write};

use bigdecimal::{BigDecimal, Zero};

use crate::expression::ast::{ExpressionTree, Node, NodeId, Operator};

fn precedence(node: &Node) -> u8 {
    match node {
        Node::Binary {
            op: Operator::Add | Operator::Subtract,
            ..
        } => 1,
        Node::Binary {
            op: Operator::Multiply | Operator::Divide,
            ..
        } => 2,
        Node::Constant(_) => 3,
    }
}

fn is_negative_constant(node: &Node) -> bool {
    matches!(node, Node::Constant(n) if *n < BigDecimal::zero())
}

fn write_with_parens<W: Write>(
    out: &mut W,
    tree: &ExpressionTree,
    id: NodeId,
    need_parens: bool,
) -> fmt::Result {
    if need_parens {
        write!(out, "(")?;
        write_node(out, tree, id)?;
        write!(out, ")")
    } else {
        write_node(out, tree, id)
    }
}

fn write_node<W: Write>(out: &mut W, tree: &ExpressionTree, id: NodeId) -> fmt::Result {
    match &tree[id] {
        Node::Constant(n) => write!(out, "{}", n),
        node @ Node::Binary { op, left, right } => {
            let p = precedence(node);
            let l = &tree[*left];
            let r = &tree[*right];
            let need_l = precedence(l) < p || is_negative_constant(l);
            // a - (b - c) and a / (b * c) keep their grouping
            let need_r = precedence(r) < p
                || (precedence(r) == p && !op.is_commutative())
                || is_negative_constant(r);
            write_with_parens(out, tree, *left, need_l)?;
            write!(out, " {} ", op.symbol())?;
            write_with_parens(out, tree, *right, need_r)
        }
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // width and alignment apply to the whole expression
        if f.width().is_some() {
            let mut rendered = String::new();
            write_node(&mut rendered, self, self.root)?;
            return f.pad(&rendered);
        }

        write_node(f, self, self.root)
    }
}
