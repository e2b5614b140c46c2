use egui::{Pos2, Rect};

use crate::surface::{NodeId, RangeResolver, Surface, SurfaceError, TextRange};

use super::error::DragError;
use super::options::{DragOptions, Granularity};
use super::types::{Destination, DestinationMode};

/// Upper bound on the ancestor walk from the hovered node to the container's child.
pub(super) const MAX_ANCESTOR_WALK: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Candidate {
    /// A direct child of the container that is not the source.
    Child(NodeId),

    /// The walk ran into the source element: nothing to do for this sample.
    Source,
}

/// Walk up from `node` to the direct child of the container it belongs to.
pub(super) fn candidate_for<S: Surface>(
    surface: &S,
    node: NodeId,
    source: NodeId,
) -> Result<Candidate, DragError> {
    let container = surface.container();
    let mut current = node;
    for _ in 0..MAX_ANCESTOR_WALK {
        if current == source {
            return Ok(Candidate::Source);
        }
        let parent = surface
            .parent(current)
            .ok_or(SurfaceError::Detached(current))?;
        if parent == container {
            return Ok(Candidate::Child(current));
        }
        current = parent;
    }
    Err(DragError::AncestorWalkExhausted { start: node })
}

/// Whether `ancestor` is a strict ancestor of `node`, within the same step limit as
/// [`candidate_for`].
pub(super) fn is_within<S: Surface>(surface: &S, node: NodeId, ancestor: NodeId) -> bool {
    let mut current = node;
    for _ in 0..MAX_ANCESTOR_WALK {
        match surface.parent(current) {
            Some(parent) if parent == ancestor => return true,
            Some(parent) => current = parent,
            None => return false,
        }
    }
    false
}

/// Accept only text ranges on the pointer's line, and only while the pointer is
/// vertically within the candidate. Keeps ranges of neighbouring elements out.
pub(super) fn accepts_range(candidate: Rect, y: f32) -> impl Fn(Rect) -> bool {
    move |range: Rect| candidate.y_range().contains(y) && range.y_range().contains(y)
}

pub(super) fn decide_mode(
    candidate: Rect,
    range: Option<&TextRange>,
    pos: Pos2,
    options: &DragOptions,
) -> DestinationMode {
    let Some(range) = range else {
        return if pos.y < candidate.center().y {
            DestinationMode::Before
        } else {
            DestinationMode::After
        };
    };

    if pos.y <= candidate.top() + options.drop_padding {
        return DestinationMode::Before;
    }
    if pos.y >= candidate.bottom() - options.drop_padding {
        return DestinationMode::After;
    }

    match options.granularity {
        Granularity::Character => {
            if pos.x < range.rect.center().x {
                DestinationMode::InsideBeforeChar
            } else {
                DestinationMode::InsideAfterChar
            }
        }
        // Splitting at offset zero would leave an empty leading fragment.
        Granularity::Element => {
            if range.start == 0 {
                DestinationMode::Before
            } else {
                DestinationMode::Inside
            }
        }
    }
}

/// Destination for a pointer at `pos` over `candidate`, plus the candidate's rectangle.
pub(super) fn resolve_destination<S: Surface>(
    surface: &S,
    resolver: &dyn RangeResolver<S>,
    candidate: NodeId,
    pos: Pos2,
    options: &DragOptions,
) -> Result<(Destination, Rect), DragError> {
    let rect = surface
        .rect(candidate)
        .ok_or(SurfaceError::NoGeometry(candidate))?;
    let accept = accepts_range(rect, pos.y);
    let range = resolver
        .resolve(surface, candidate, pos, &accept)?
        .filter(|r| accept(r.rect));
    let mode = decide_mode(rect, range.as_ref(), pos, options);
    let destination = Destination {
        element: candidate,
        range: range.filter(|_| mode.is_inside()),
        mode,
    };
    Ok((destination, rect))
}
