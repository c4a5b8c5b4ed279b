use super::{Node, NodeBox};

/// Ordered children of a container.
///
/// Containers lock the list while they draw it; changing it in the meantime
/// is a bug and panics.
#[derive(Default)]
pub struct Children {
    nodes: Vec<NodeBox>,
    locked: bool,
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    fn assert_unlocked(&self) {
        assert!(
            !self.locked,
            "cannot mutate children while the tree is being drawn"
        );
    }

    pub fn push(&mut self, node: impl Node + 'static) {
        self.push_boxed(Box::new(node));
    }

    pub fn push_boxed(&mut self, node: NodeBox) {
        self.assert_unlocked();
        self.nodes.push(node);
    }

    pub fn insert(&mut self, index: usize, node: NodeBox) {
        self.assert_unlocked();
        self.nodes.insert(index, node);
    }

    pub fn remove_at(&mut self, index: usize) -> NodeBox {
        self.assert_unlocked();
        self.nodes.remove(index)
    }

    pub fn clear(&mut self) {
        self.assert_unlocked();
        self.nodes.clear();
    }

    /// Drop children flagged for removal, keeping the others in order.
    pub fn compact(&mut self) {
        self.assert_unlocked();
        let before = self.nodes.len();
        self.nodes.retain(|node| !node.base().is_removed());
        let removed = before - self.nodes.len();
        if removed > 0 {
            log::debug!("[layout] dropped {removed} removed children");
        }
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NodeBox> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut NodeBox> {
        self.nodes.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeBox> {
        self.nodes.iter()
    }

    /// Mutable access to the nodes themselves; the list can't change shape.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut NodeBox> {
        self.nodes.iter_mut()
    }

    pub fn as_slice(&self) -> &[NodeBox] {
        &self.nodes
    }

    pub fn as_mut_slice(&mut self) -> &mut [NodeBox] {
        &mut self.nodes
    }
}

impl std::fmt::Debug for Children {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Children")
            .field("len", &self.nodes.len())
            .field("locked", &self.locked)
            .finish()
    }
}

impl FromIterator<NodeBox> for Children {
    fn from_iter<I: IntoIterator<Item = NodeBox>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
            locked: false,
        }
    }
}
