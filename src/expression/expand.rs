use bigdecimal::BigDecimal;
use log::trace;

use crate::expression::ast::{ExpressionTree, Node, NodeId, Operator};
use crate::expression::errors::TreeError;

/// A freshly expanded tree together with its new active site
#[derive(Debug, Clone)]
pub struct Expansion {
    pub tree: ExpressionTree,
    pub active_site: NodeId,
}

impl ExpressionTree {
    /// Replace the node `active_site` with `active_site op constant` (or
    /// `constant op active_site` when `constant_on_right` is false).
    ///
    /// The returned tree is a copy; `self` is left untouched. The new binary
    /// node becomes the active site, so repeated expansion always wraps the
    /// whole expression built so far.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ActiveSiteNotFound`] when `active_site` is not
    /// referenced exactly once in this tree.
    pub fn expand(
        &self,
        active_site: NodeId,
        op: Operator,
        constant: &BigDecimal,
        constant_on_right: bool,
    ) -> Result<Expansion, TreeError> {
        let parent = self.locate(active_site)?;

        let mut tree = self.clone();
        let leaf = tree.push(Node::Constant(constant.clone()));
        let (left, right) = if constant_on_right {
            (active_site, leaf)
        } else {
            (leaf, active_site)
        };
        let site = tree.push(Node::Binary { op, left, right });

        match parent {
            None => tree.root = site,
            Some(parent) => {
                if let Node::Binary { left, right, .. } = &mut tree.nodes[parent.index()] {
                    if *left == active_site {
                        *left = site;
                    } else {
                        *right = site;
                    }
                }
            }
        }

        trace!("Expanded {} into {}", self, tree);
        Ok(Expansion {
            tree,
            active_site: site,
        })
    }

    /// Find the single reference to `site`: `None` when it is the root,
    /// otherwise the id of its parent.
    fn locate(&self, site: NodeId) -> Result<Option<NodeId>, TreeError> {
        let mut occurrences = usize::from(self.root == site);
        let mut parent = None;

        for (index, node) in self.nodes.iter().enumerate() {
            if let Node::Binary { left, right, .. } = node {
                let hits = usize::from(*left == site) + usize::from(*right == site);
                if hits > 0 {
                    occurrences += hits;
                    parent = Some(NodeId::new(index));
                }
            }
        }

        if occurrences != 1 || site.index() >= self.nodes.len() {
            return Err(TreeError::ActiveSiteNotFound { site, occurrences });
        }

        Ok(if self.root == site { None } else { parent })
    }
}
