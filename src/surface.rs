use egui::{Pos2, Rect};

/// Handle to a node (element or text) of a [`Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NodeId(u64);

impl NodeId {
    pub fn from_u64(n: u64) -> Self {
        Self(n)
    }

    pub fn to_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The smallest addressable piece of text under a point, usually a single character.
///
/// `start..end` are character offsets into the text node `node`.
/// `rect` lives in the same coordinate space as [`Surface::rect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRange {
    pub node: NodeId,
    pub start: usize,
    pub end: usize,
    pub rect: Rect,
}

impl TextRange {
    /// The boundary at the start of the range.
    pub fn start_position(&self) -> TextPosition {
        TextPosition {
            node: self.node,
            offset: self.start,
        }
    }
}

/// A boundary between two characters of a text node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextPosition {
    pub node: NodeId,
    pub offset: usize,
}

impl TextPosition {
    /// Move the boundary `units` characters to the right.
    pub fn shifted_right(self, units: usize) -> Self {
        Self {
            node: self.node,
            offset: self.offset.saturating_add(units),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    UnknownNode(NodeId),

    /// The node (or one of its ancestors) is not attached below the container.
    Detached(NodeId),

    NotAChild { parent: NodeId, child: NodeId },

    /// Tried to insert children into a text node.
    NotAnElement(NodeId),

    /// Inserting the node would make it its own ancestor.
    Cycle(NodeId),

    /// The node has no layout rectangle.
    NoGeometry(NodeId),

    /// The position of the surface itself (used as indicator origin) is unknown.
    NoOrigin,

    /// A split position does not point at a text node inside the split element.
    PositionOutsideElement { element: NodeId, node: NodeId },

    OffsetOutOfBounds { node: NodeId, offset: usize, len: usize },
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(node) => write!(f, "unknown node {node}"),
            Self::Detached(node) => write!(f, "node {node} is detached from the container"),
            Self::NotAChild { parent, child } => {
                write!(f, "node {child} is not a child of {parent}")
            }
            Self::NotAnElement(node) => write!(f, "node {node} cannot have children"),
            Self::Cycle(node) => write!(f, "inserting {node} would create a cycle"),
            Self::NoGeometry(node) => write!(f, "node {node} has no layout rectangle"),
            Self::NoOrigin => write!(f, "surface origin is unknown"),
            Self::PositionOutsideElement { element, node } => {
                write!(f, "text node {node} is not inside element {element}")
            }
            Self::OffsetOutOfBounds { node, offset, len } => {
                write!(f, "offset {offset} out of bounds for text node {node} (len {len})")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// The container whose direct children get reordered, plus the tree below it.
///
/// Only [`Self::insert_child`], [`Self::remove_child`], [`Self::detach`],
/// [`Self::deep_clone`], [`Self::discard`] and [`Self::set_marker`] mutate. The drag
/// controller calls all but the last one only on commit.
pub trait Surface {
    /// The container node itself.
    fn container(&self) -> NodeId;

    /// Parent of `node`, or `None` if it is detached (or is a root).
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Bounding box of a node.
    fn rect(&self, node: NodeId) -> Option<Rect>;

    /// Top-left corner that indicator positions are relative to.
    fn origin(&self) -> Option<Pos2>;

    /// Insert `node` into the container before `before`, or append it if `before` is `None`.
    ///
    /// A node that is already attached somewhere is moved.
    ///
    /// # Errors
    /// If either node is unknown, or `before` is not a child of the container.
    fn insert_child(&mut self, node: NodeId, before: Option<NodeId>) -> Result<(), SurfaceError>;

    /// Detach a direct child of the container.
    ///
    /// # Errors
    /// If `node` is not a child of the container.
    fn remove_child(&mut self, node: NodeId) -> Result<(), SurfaceError>;

    /// Detach `node` from its parent, wherever it is in the tree.
    ///
    /// # Errors
    /// If `node` is unknown.
    fn detach(&mut self, node: NodeId) -> Result<(), SurfaceError>;

    /// Create a detached structural copy of `node` and all its descendants.
    ///
    /// # Errors
    /// If `node` is unknown.
    fn deep_clone(&mut self, node: NodeId) -> Result<NodeId, SurfaceError>;

    /// Release a detached node and its subtree once nothing refers to it any more.
    ///
    /// Called on split fragments that were not inserted, on a destination replaced by its
    /// fragments and on copies left over by a failed commit. Attached nodes are kept.
    fn discard(&mut self, _node: NodeId) {}

    /// Whether the serialized content of `node` is non-empty.
    fn has_content(&self, node: NodeId) -> bool;

    /// Add or remove a named visual marker (a css class, an attribute, a flag…).
    fn set_marker(&mut self, node: NodeId, marker: &str, enabled: bool);

    /// Short human readable description, used in log lines.
    fn describe(&self, node: NodeId) -> String {
        format!("{node}")
    }
}

/// Maps a point to the text range under it.
pub trait RangeResolver<S: ?Sized> {
    /// Return the smallest text range of `element` under `pos` whose bounding rectangle is
    /// accepted by `accept`, or `None` if the point is not over text.
    ///
    /// # Errors
    /// If the geometry of `element` cannot be established.
    fn resolve(
        &self,
        surface: &S,
        element: NodeId,
        pos: Pos2,
        accept: &dyn Fn(Rect) -> bool,
    ) -> Result<Option<TextRange>, SurfaceError>;
}

/// Splits the content of an element at a text boundary.
pub trait ContentSplitter<S: ?Sized> {
    /// Produce two new detached fragments holding the content before and after `at`.
    ///
    /// Does not modify `element`.
    ///
    /// # Errors
    /// If `at` does not lie inside `element`.
    fn split(
        &mut self,
        surface: &mut S,
        element: NodeId,
        at: TextPosition,
    ) -> Result<[NodeId; 2], SurfaceError>;
}
