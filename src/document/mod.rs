//! A small in-memory element/text tree implementing [`Surface`].
//!
//! Good enough to drive a [`crate::DragController`] from an egui app or from tests:
//! elements have a tag, children, markers and an optional layout rectangle that the host
//! fills in after laying things out.

use std::collections::BTreeSet;

use egui::{Pos2, Rect};
use itertools::Itertools as _;

use crate::surface::{NodeId, Surface, SurfaceError};

mod integrity;
mod layout;
mod split;

#[cfg(test)]
mod document_tests;

pub use layout::MonospaceLayout;
pub use split::DocumentSplitter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String, children: Vec<NodeId> },
    Text(String),
}

#[derive(Clone, Debug)]
struct NodeData {
    parent: Option<NodeId>,
    kind: NodeKind,
    markers: BTreeSet<String>,
    rect: Option<Rect>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            kind,
            markers: BTreeSet::new(),
            rect: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Document {
    nodes: ahash::HashMap<NodeId, NodeData>,
    next_id: u64,
    container: NodeId,
    origin: Option<Pos2>,
}

impl Document {
    /// Create a document with an empty container element.
    pub fn new(container_tag: impl Into<String>) -> Self {
        let mut doc = Self {
            nodes: Default::default(),
            next_id: 1,
            container: NodeId::from_u64(0),
            origin: None,
        };
        doc.container = doc.create_element(container_tag);
        doc
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_u64(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, NodeData::new(kind));
        id
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Element {
            tag: tag.into(),
            children: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Create `<tag>text</tag>` and append it to `parent`.
    ///
    /// # Errors
    /// If `parent` is unknown or a text node.
    pub fn append_element_with_text(
        &mut self,
        parent: NodeId,
        tag: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<NodeId, SurfaceError> {
        let element = self.create_element(tag);
        let text = self.create_text(text);
        self.append_child(element, text)?;
        self.append_child(parent, element)?;
        Ok(element)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(&node).map(|n| &n.kind)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Text of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.kind(node) {
            Some(NodeKind::Element { children, .. }) => children.as_slice(),
            _ => &[],
        }
    }

    fn children_mut(&mut self, node: NodeId) -> Result<&mut Vec<NodeId>, SurfaceError> {
        match self.nodes.get_mut(&node).map(|n| &mut n.kind) {
            Some(NodeKind::Element { children, .. }) => Ok(children),
            Some(NodeKind::Text(_)) => Err(SurfaceError::NotAnElement(node)),
            None => Err(SurfaceError::UnknownNode(node)),
        }
    }

    pub(crate) fn set_text(&mut self, node: NodeId, text: String) -> Result<(), SurfaceError> {
        match self.nodes.get_mut(&node).map(|n| &mut n.kind) {
            Some(NodeKind::Text(current)) => {
                *current = text;
                Ok(())
            }
            Some(NodeKind::Element { .. }) => Err(SurfaceError::NotAnElement(node)),
            None => Err(SurfaceError::UnknownNode(node)),
        }
    }

    /// Keep only `keep` of the children of `node`, freeing the rest with their subtrees.
    pub(crate) fn retain_children(
        &mut self,
        node: NodeId,
        keep: impl Fn(usize, NodeId) -> bool,
    ) -> Result<(), SurfaceError> {
        let children = std::mem::take(self.children_mut(node)?);
        let (kept, dropped): (Vec<NodeId>, Vec<NodeId>) = children
            .into_iter()
            .enumerate()
            .partition_map(|(index, child)| {
                if keep(index, child) {
                    itertools::Either::Left(child)
                } else {
                    itertools::Either::Right(child)
                }
            });
        *self.children_mut(node)? = kept;
        for child in dropped {
            if let Some(data) = self.nodes.get_mut(&child) {
                data.parent = None;
            }
            self.free_subtree(child);
        }
        Ok(())
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.rect = Some(rect);
        }
    }

    pub fn clear_rect(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.rect = None;
        }
    }

    pub fn set_origin(&mut self, origin: Option<Pos2>) {
        self.origin = origin;
    }

    pub fn has_marker(&self, node: NodeId, marker: &str) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|n| n.markers.contains(marker))
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(&node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return;
        };
        if let Ok(children) = self.children_mut(parent) {
            children.retain(|&c| c != node);
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = None;
        }
    }

    /// Insert `node` into `parent` before `reference`, or at the end if `reference` is `None`.
    ///
    /// Follows DOM semantics: an attached node is moved, and a reference equal to the
    /// node itself means "right where it already is".
    ///
    /// # Errors
    /// If a node is unknown, `parent` is a text node, `reference` is not a child of
    /// `parent`, or `node` is an ancestor of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), SurfaceError> {
        if !self.contains(node) {
            return Err(SurfaceError::UnknownNode(node));
        }
        if !self.contains(parent) {
            return Err(SurfaceError::UnknownNode(parent));
        }
        if self.text(parent).is_some() {
            return Err(SurfaceError::NotAnElement(parent));
        }
        if self.is_ancestor_or_self(node, parent) {
            return Err(SurfaceError::Cycle(node));
        }
        if let Some(reference) = reference {
            if !self.children(parent).contains(&reference) {
                return Err(SurfaceError::NotAChild {
                    parent,
                    child: reference,
                });
            }
        }

        let reference = if reference == Some(node) {
            self.sibling_after(node)
        } else {
            reference
        };

        self.unlink(node);
        let children = self.children_mut(parent)?;
        match reference.and_then(|r| children.iter().position(|&c| c == r)) {
            Some(index) => children.insert(index, node),
            None => children.push(node),
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = Some(parent);
        }
        Ok(())
    }

    /// # Errors
    /// See [`Self::insert_before`].
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<(), SurfaceError> {
        self.insert_before(parent, node, None)
    }

    /// Detach `node` from its parent. The node and its subtree stay alive.
    ///
    /// # Errors
    /// If `node` is unknown.
    pub fn remove(&mut self, node: NodeId) -> Result<(), SurfaceError> {
        if !self.contains(node) {
            return Err(SurfaceError::UnknownNode(node));
        }
        self.unlink(node);
        Ok(())
    }

    /// Drop a detached `node` and all its descendants from the arena.
    ///
    /// Attached nodes and the container are left alone. Returns how many nodes were freed.
    pub fn free_subtree(&mut self, node: NodeId) -> usize {
        if node == self.container || self.parent(node).is_some() {
            return 0;
        }
        let mut freed = 0;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(data) = self.nodes.remove(&current) else {
                continue;
            };
            freed += 1;
            if let NodeKind::Element { children, .. } = data.kind {
                stack.extend(children);
            }
        }
        freed
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn sibling_after(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get(&node)?.parent?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    /// Structural copy of `node` and its subtree, returning the new root and a mapping
    /// from every original node to its copy.
    pub(crate) fn deep_clone_mapped(
        &mut self,
        node: NodeId,
    ) -> Result<(NodeId, ahash::HashMap<NodeId, NodeId>), SurfaceError> {
        let mut mapping = ahash::HashMap::default();
        let root = self.clone_into(node, &mut mapping)?;
        Ok((root, mapping))
    }

    fn clone_into(
        &mut self,
        node: NodeId,
        mapping: &mut ahash::HashMap<NodeId, NodeId>,
    ) -> Result<NodeId, SurfaceError> {
        let (kind, markers) = {
            let data = self
                .nodes
                .get(&node)
                .ok_or(SurfaceError::UnknownNode(node))?;
            (data.kind.clone(), data.markers.clone())
        };
        let copy = match kind {
            NodeKind::Text(text) => self.create_text(text),
            NodeKind::Element { tag, children } => {
                let copy = self.create_element(tag);
                for child in children {
                    let child_copy = self.clone_into(child, mapping)?;
                    self.append_child(copy, child_copy)?;
                }
                copy
            }
        };
        if let Some(data) = self.nodes.get_mut(&copy) {
            data.markers = markers;
        }
        mapping.insert(node, copy);
        Ok(copy)
    }

    /// Concatenated text of all text nodes below `node`, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(NodeKind::Element { children, .. }) => {
                children.iter().map(|&c| self.text_content(c)).join("")
            }
            None => String::new(),
        }
    }

    /// Text nodes below `node`, in document order.
    pub fn text_nodes(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            match self.kind(n) {
                Some(NodeKind::Text(_)) => out.push(n),
                Some(NodeKind::Element { children, .. }) => stack.extend(children.iter().rev()),
                None => {}
            }
        }
        out
    }

    /// Serialized children of `node`: tags plus escaped text.
    pub fn inner_html(&self, node: NodeId) -> String {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => escape_text(text),
            Some(NodeKind::Element { children, .. }) => {
                children.iter().map(|&c| self.outer_html(c)).join("")
            }
            None => String::new(),
        }
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => escape_text(text),
            Some(NodeKind::Element { tag, .. }) => {
                format!("<{tag}>{}</{tag}>", self.inner_html(node))
            }
            None => String::new(),
        }
    }

    /// Consistency problems of the parent/child links reachable from the container.
    pub fn integrity_issues(&self) -> Vec<String> {
        integrity::document_integrity_issues(self)
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

impl Surface for Document {
    fn container(&self) -> NodeId {
        self.container
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node)?.parent
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling_after(node)
    }

    fn rect(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(&node)?.rect
    }

    fn origin(&self) -> Option<Pos2> {
        self.origin
    }

    fn insert_child(&mut self, node: NodeId, before: Option<NodeId>) -> Result<(), SurfaceError> {
        self.insert_before(self.container, node, before)
    }

    fn remove_child(&mut self, node: NodeId) -> Result<(), SurfaceError> {
        if self.parent(node) != Some(self.container) {
            return Err(SurfaceError::NotAChild {
                parent: self.container,
                child: node,
            });
        }
        self.remove(node)
    }

    fn detach(&mut self, node: NodeId) -> Result<(), SurfaceError> {
        self.remove(node)
    }

    fn discard(&mut self, node: NodeId) {
        let freed = self.free_subtree(node);
        log::trace!("discarded {node}: {freed} nodes freed");
    }

    fn deep_clone(&mut self, node: NodeId) -> Result<NodeId, SurfaceError> {
        self.deep_clone_mapped(node).map(|(root, _)| root)
    }

    fn has_content(&self, node: NodeId) -> bool {
        !self.inner_html(node).is_empty()
    }

    fn set_marker(&mut self, node: NodeId, marker: &str, enabled: bool) {
        let Some(data) = self.nodes.get_mut(&node) else {
            return;
        };
        if enabled {
            data.markers.insert(marker.to_owned());
        } else {
            data.markers.remove(marker);
        }
    }

    fn describe(&self, node: NodeId) -> String {
        match self.kind(node) {
            Some(NodeKind::Element { tag, .. }) => format!("<{tag}>{node}"),
            Some(NodeKind::Text(_)) => format!("#text{node}"),
            None => format!("?{node}"),
        }
    }
}
