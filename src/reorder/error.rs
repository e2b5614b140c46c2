use crate::surface::{NodeId, SurfaceError};

/// Why an update sample or a commit could not be carried out.
///
/// Never escapes the public controller operations; they log it and degrade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragError {
    Surface(SurfaceError),

    /// The ancestor walk from `start` did not reach the container within the step limit.
    AncestorWalkExhausted { start: NodeId },

    /// An inside destination without a text range.
    MissingRange(NodeId),
}

impl std::fmt::Display for DragError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Surface(err) => write!(f, "surface error: {err}"),
            Self::AncestorWalkExhausted { start } => {
                write!(f, "ancestor walk from {start} did not reach the container")
            }
            Self::MissingRange(element) => {
                write!(f, "inside destination {element} has no text range")
            }
        }
    }
}

impl std::error::Error for DragError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(err) => Some(err),
            Self::AncestorWalkExhausted { .. } | Self::MissingRange(_) => None,
        }
    }
}

impl From<SurfaceError> for DragError {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}
