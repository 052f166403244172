use racetrack_core::Point;

/// Index of a [`PathNode`] inside a [`PathTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its tree's arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A searched cell with a back-pointer toward the search start.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub parent: Option<NodeId>,
    /// Sum of edge costs along the parent chain from the start.
    pub cost: f64,
}

// ---------------------------------------------------------------------------
// PathTree
// ---------------------------------------------------------------------------

/// Arena of [`PathNode`]s linked by parent indices.
///
/// Every node has at most one parent, so the nodes form a tree rooted at
/// the search start.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathTree {
    nodes: Vec<PathNode>,
}

impl PathTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Add a node and return its id.
    pub fn push(&mut self, node: PathNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different tree.
    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut PathNode {
        &mut self.nodes[id.0]
    }

    /// Position of the node with the given id.
    #[inline]
    pub fn pos(&self, id: NodeId) -> Point {
        self.nodes[id.0].pos
    }

    /// Parent of the node with the given id, `None` at the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Re-link `id` to a new parent.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id.0].parent = parent;
    }

    /// Walk from `id` back to the root, yielding `id` first.
    pub fn chain(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.parent(n))
    }

    /// Positions along the chain ending at `end`, in root-to-`end` order.
    pub fn positions(&self, end: NodeId) -> Vec<Point> {
        let mut path: Vec<Point> = self.chain(end).map(|n| self.pos(n)).collect();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_tree() -> (PathTree, NodeId) {
        let mut t = PathTree::new();
        let mut parent = None;
        let mut last = NodeId(0);
        for col in 0..4 {
            last = t.push(PathNode {
                pos: Point::new(0, col),
                parent,
                cost: f64::from(col),
            });
            parent = Some(last);
        }
        (t, last)
    }

    #[test]
    fn chain_walks_to_root() {
        let (t, end) = line_tree();
        let ids: Vec<usize> = t.chain(end).map(NodeId::index).collect();
        assert_eq!(ids, vec![3, 2, 1, 0]);
        assert_eq!(t.parent(NodeId(0)), None);
    }

    #[test]
    fn positions_in_forward_order() {
        let (t, end) = line_tree();
        assert_eq!(
            t.positions(end),
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(0, 3)
            ]
        );
    }

    #[test]
    fn set_parent_splices() {
        let (mut t, end) = line_tree();
        t.set_parent(end, Some(NodeId(1)));
        assert_eq!(t.chain(end).count(), 3);
        assert_eq!(t.len(), 4);
        assert_eq!(t.node(end).cost, 3.0);
    }
}
