use crate::surface::{NodeId, Surface};

use super::destination::is_within;
use super::error::DragError;
use super::types::{Destination, DestinationMode, DragMode, Source};
use super::DragController;

/// Nodes a drop created along the way, filled in as soon as they exist so the caller
/// still sees them when a later step fails.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct DropOutcome {
    /// The copy inserted in [`DragMode::Copy`].
    pub copy: Option<NodeId>,

    /// `[leading, trailing]` fragments of a split destination.
    pub fragments: Option<[NodeId; 2]>,
}

impl<S: Surface> DragController<S> {
    /// Carry out the drop.
    pub(super) fn apply_drop(
        &mut self,
        source: Source,
        destination: &Destination,
        outcome: &mut DropOutcome,
    ) -> Result<(), DragError> {
        let element = match source.mode {
            DragMode::Move => source.element,
            DragMode::Copy => {
                let copy = self.surface.deep_clone(source.element)?;
                outcome.copy = Some(copy);
                copy
            }
        };
        let target = destination.element;

        match destination.mode {
            DestinationMode::Before => self.surface.insert_child(element, Some(target))?,
            DestinationMode::After => {
                let next = self.surface.next_sibling(target);
                self.surface.insert_child(element, next)?;
            }
            mode @ (DestinationMode::Inside
            | DestinationMode::InsideBeforeChar
            | DestinationMode::InsideAfterChar) => {
                let range = destination
                    .range
                    .ok_or(DragError::MissingRange(target))?;
                let mut at = range.start_position();
                if mode == DestinationMode::InsideAfterChar {
                    at = at.shifted_right(1);
                }

                // A moved element nested in the target must not end up in the fragments.
                let nested =
                    source.mode == DragMode::Move && is_within(&self.surface, element, target);
                if nested {
                    self.surface.detach(element)?;
                }

                let [leading, trailing] = match self.splitter.split(&mut self.surface, target, at) {
                    Ok(fragments) => fragments,
                    Err(err) => {
                        if nested {
                            self.surface.insert_child(element, Some(target))?;
                        }
                        return Err(err.into());
                    }
                };
                outcome.fragments = Some([leading, trailing]);

                if self.surface.has_content(leading) {
                    self.surface.insert_child(leading, Some(target))?;
                }
                self.surface.insert_child(element, Some(target))?;
                if self.surface.has_content(trailing) {
                    self.surface.insert_child(trailing, Some(target))?;
                }
                self.surface.remove_child(target)?;
            }
        }
        Ok(())
    }

    /// Hand every node the drop created or replaced, and that ended up detached, back
    /// to the surface.
    pub(super) fn discard_leftovers(&mut self, outcome: &DropOutcome, target: NodeId) {
        let replaced = outcome.fragments.map(|_| target);
        let leftovers = outcome
            .copy
            .into_iter()
            .chain(outcome.fragments.into_iter().flatten())
            .chain(replaced);
        for node in leftovers {
            if node != self.surface.container() && self.surface.parent(node).is_none() {
                self.surface.discard(node);
            }
        }
    }
}
