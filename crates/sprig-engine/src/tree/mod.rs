//! Generic ownership tree.
//!
//! Nodes live in a [`SlotMap`] arena and refer to each other through
//! [`NodeId`] handles. Each node has at most one parent and an ordered list of
//! children; the structure is kept acyclic by [`Tree::add_child`].
//!
//! Removing a node drops its whole subtree. Handles to removed nodes become
//! stale and every accessor reports them as unknown.

use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, SceneError};

new_key_type! {
    /// Stable handle to a node in a [`Tree`].
    pub struct NodeId;
}

#[derive(Debug, Clone)]
struct Node<T> {
    payload: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed tree of `T` payloads.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: SlotMap<NodeId, Node<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self { nodes: SlotMap::with_key() }
    }

    /// Inserts a detached node.
    pub fn insert(&mut self, payload: T) -> NodeId {
        self.nodes.insert(Node { payload, parent: None, children: Vec::new() })
    }

    /// Inserts `payload` as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, payload: T) -> Result<NodeId> {
        self.check(parent)?;
        let id = self.insert(payload);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Appends `child` to `parent`'s children.
    ///
    /// A child that already has a parent is detached from it first. Fails with
    /// [`SceneError::InvalidHierarchy`] when `child` is `parent` itself or one
    /// of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if parent == child {
            return Err(SceneError::InvalidHierarchy("node cannot be its own child".into()));
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::InvalidHierarchy(
                "child is an ancestor of the new parent".into(),
            ));
        }

        self.detach(child)?;
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Unlinks `child` from its parent, keeping it (and its subtree) alive as a root.
    ///
    /// Detaching a root is a no-op.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let parent = self.check(child)?.parent;
        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != child);
            }
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
            }
        }
        Ok(())
    }

    /// Removes a direct child of `parent` together with its subtree and returns
    /// the child's payload.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<T> {
        self.check(parent)?;
        if self.check(child)?.parent != Some(parent) {
            return Err(SceneError::InvalidHierarchy("not a direct child of the given parent".into()));
        }
        self.remove(child)
    }

    /// Removes `id` and every descendant; returns the payload of `id`.
    pub fn remove(&mut self, id: NodeId) -> Result<T> {
        self.detach(id)?;

        let mut doomed = Vec::new();
        self.collect_descendants(id, &mut doomed);
        for d in doomed {
            self.nodes.remove(d);
        }

        self.nodes.remove(id).map(|n| n.payload).ok_or(SceneError::UnknownNode(id))
    }

    /// Empties `parent`'s child list.
    ///
    /// With `recursive` every descendant is destroyed and an empty list is
    /// returned. Without it the direct children are only detached: they stay
    /// alive as roots (with their own subtrees) and their ids are returned in
    /// their former order.
    pub fn remove_all(&mut self, parent: NodeId, recursive: bool) -> Result<Vec<NodeId>> {
        let children = std::mem::take(&mut self.check_mut(parent)?.children);
        for &c in &children {
            if let Some(node) = self.nodes.get_mut(c) {
                node.parent = None;
            }
        }

        if !recursive {
            return Ok(children);
        }

        for c in children {
            self.remove(c)?;
        }
        Ok(Vec::new())
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.payload)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|n| &mut n.payload)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children in insertion order; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of edges between `id` and its root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Walks from the parent of `id` up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors { tree: self, next: self.parent(id) }
    }

    /// True when `ancestor` lies strictly above `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Visits `root` and its descendants, parents before children.
    pub fn pre_order(&self, root: NodeId, mut visit: impl FnMut(NodeId, &T)) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            visit(id, &node.payload);
            stack.extend(node.children.iter().rev());
        }
    }

    /// Visits `root` and its descendants, children before parents.
    pub fn post_order(&self, root: NodeId, mut visit: impl FnMut(NodeId, &T)) {
        // (id, children already queued)
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            if expanded {
                visit(id, &node.payload);
            } else {
                stack.push((id, true));
                stack.extend(node.children.iter().rev().map(|&c| (c, false)));
            }
        }
    }

    /// Pre-order snapshot of ids, for passes that mutate payloads.
    pub fn pre_order_ids(&self, root: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.pre_order(root, |id, _| ids.push(id));
        ids
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let mut stack = self.children(id).to_vec();
        while let Some(c) = stack.pop() {
            out.push(c);
            stack.extend_from_slice(self.children(c));
        }
    }

    fn check(&self, id: NodeId) -> Result<&Node<T>> {
        self.nodes.get(id).ok_or(SceneError::UnknownNode(id))
    }

    fn check_mut(&mut self, id: NodeId) -> Result<&mut Node<T>> {
        self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }
}

/// Iterator returned by [`Tree::ancestors`].
pub struct Ancestors<'a, T> {
    tree: &'a Tree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}
