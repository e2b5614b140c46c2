use crate::surface::{NodeId, TextRange};

/// What [`super::DragController::commit`] does with the source element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DragMode {
    /// Relocate the source element itself.
    #[default]
    Move,

    /// Insert a deep copy and leave the source where it is.
    Copy,
}

/// Where, relative to the destination element, the drop lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DestinationMode {
    Before,
    After,

    /// Split the destination before the targeted character.
    InsideBeforeChar,

    /// Split the destination after the targeted character.
    InsideAfterChar,

    /// Split the destination at the start of the targeted range (element granularity).
    Inside,
}

impl DestinationMode {
    pub fn is_inside(self) -> bool {
        matches!(
            self,
            Self::Inside | Self::InsideBeforeChar | Self::InsideAfterChar
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Source {
    pub element: NodeId,
    pub mode: DragMode,
}

/// Drop target computed by the latest successful [`super::DragController::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Destination {
    /// Always a direct child of the container, never the source.
    pub element: NodeId,

    /// `Some` exactly when `mode.is_inside()`.
    pub range: Option<TextRange>,

    pub mode: DestinationMode,
}

/// Lifecycle signals delivered to [`super::DragListener`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEvent {
    Start {
        element: NodeId,
    },
    Cancel {
        element: NodeId,
    },
    Commit {
        element: NodeId,

        /// The leading and trailing fragments of an inside drop, if the split happened.
        ///
        /// A fragment without content was never inserted and has already been discarded.
        fragments: Option<[NodeId; 2]>,
    },
}

impl DragEvent {
    pub fn element(&self) -> NodeId {
        match *self {
            Self::Start { element } | Self::Cancel { element } | Self::Commit { element, .. } => {
                element
            }
        }
    }
}
