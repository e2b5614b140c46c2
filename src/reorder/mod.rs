use std::collections::VecDeque;

use egui::{CursorIcon, Pos2};

use crate::surface::{ContentSplitter, NodeId, RangeResolver, Surface, SurfaceError};

mod commit;
mod debug;
mod destination;
mod error;
mod indicator;
mod listener;
mod options;
mod session;
mod types;

#[cfg(test)]
mod destination_tests;

pub use error::DragError;
pub use indicator::{Indicator, IndicatorOrientation};
pub use listener::DragListener;
pub use options::{DragOptions, Granularity};
pub use types::{Destination, DestinationMode, DragEvent, DragMode, Source};

use commit::DropOutcome;
use destination::{candidate_for, resolve_destination, Candidate};
use session::{ActiveSession, DragSession};

/// Drag-and-drop reordering of the direct children of one container.
///
/// Drive it from pointer events:
/// - [`Self::begin`] when a drag starts on some element,
/// - [`Self::update`] with the node under the pointer for every pointer move,
/// - [`Self::commit`] on release, or [`Self::cancel`] on abort.
///
/// None of these ever fail: calls that make no sense in the current state are ignored,
/// samples that cannot be resolved hide the indicator, and a commit that fails half way
/// still ends the session.
///
/// Dropping over the text of another child splits that child in two and puts the dragged
/// element in between.
pub struct DragController<S> {
    pub options: DragOptions,
    pub surface: S,

    resolver: Box<dyn RangeResolver<S>>,
    splitter: Box<dyn ContentSplitter<S>>,
    listeners: Vec<Box<dyn DragListener>>,

    session: DragSession,
    indicator: Indicator,
    cursor_icon: CursorIcon,

    debug_log: VecDeque<String>,
    debug_sample: u64,
}

impl<S> std::fmt::Debug for DragController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("options", &self.options)
            .field("session", &self.session)
            .field("indicator", &self.indicator)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: Surface> DragController<S> {
    pub fn new(
        surface: S,
        resolver: impl RangeResolver<S> + 'static,
        splitter: impl ContentSplitter<S> + 'static,
    ) -> Self {
        Self::new_with_options(surface, resolver, splitter, DragOptions::default())
    }

    pub fn new_with_options(
        surface: S,
        resolver: impl RangeResolver<S> + 'static,
        splitter: impl ContentSplitter<S> + 'static,
        options: DragOptions,
    ) -> Self {
        Self {
            options,
            surface,
            resolver: Box::new(resolver),
            splitter: Box::new(splitter),
            listeners: Vec::new(),
            session: DragSession::default(),
            indicator: Indicator::hidden(),
            cursor_icon: CursorIcon::Default,
            debug_log: VecDeque::new(),
            debug_sample: 0,
        }
    }

    /// Subscribe to start/cancel/commit events.
    pub fn add_listener(&mut self, listener: impl DragListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn is_dragging(&self) -> bool {
        self.session.active().is_some()
    }

    /// Id of the active drag session. Ids increase for the lifetime of the controller.
    pub fn session_id(&self) -> Option<u64> {
        self.session.active().map(|a| a.id)
    }

    pub fn source(&self) -> Option<Source> {
        self.session.active().map(|a| a.source)
    }

    /// The drop target of the latest resolved sample, if any.
    pub fn destination(&self) -> Option<&Destination> {
        self.session.active()?.destination.as_ref()
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    /// Pointer shape the host should show: [`CursorIcon::Move`] while dragging.
    pub fn cursor_icon(&self) -> CursorIcon {
        self.cursor_icon
    }

    /// Start dragging `element`. Ignored while a drag is already in progress.
    pub fn begin(&mut self, element: NodeId, mode: DragMode) {
        let Some(id) = self.session.begin(Source { element, mode }) else {
            log::trace!("begin ignored: already dragging");
            return;
        };

        self.surface
            .set_marker(element, &self.options.dragging_marker, true);
        self.cursor_icon = CursorIcon::Move;
        self.debug_log_event(format!(
            "session START id={id} source={} mode={mode:?}",
            self.surface.describe(element)
        ));
        self.emit(DragEvent::Start { element });
    }

    /// Recompute the destination for the pointer at `pos` over `node`.
    ///
    /// `node` may be any descendant of a container child. Hovering the container itself
    /// or the dragged element changes nothing.
    pub fn update(&mut self, node: NodeId, pos: Pos2) {
        let Some(source) = self.source() else {
            return;
        };
        if node == self.surface.container() {
            return;
        }
        self.debug_sample += 1;

        match self.resolve_sample(node, pos, source.element) {
            Ok(None) => {}
            Ok(Some((destination, indicator))) => {
                log::trace!(
                    "destination {:?} {}",
                    destination.mode,
                    self.surface.describe(destination.element)
                );
                if let Some(active) = self.session.active_mut() {
                    active.destination = Some(destination);
                    active.samples += 1;
                }
                self.indicator = indicator;
            }
            Err(err) => {
                self.indicator.visible = false;
                if let Some(active) = self.session.active_mut() {
                    active.destination = None;
                }
                self.debug_log_event(format!(
                    "update NO DESTINATION node={} pos=({:.1},{:.1}): {err}",
                    self.surface.describe(node),
                    pos.x,
                    pos.y,
                ));
            }
        }
    }

    /// `Ok(None)` when the pointer is over the dragged element.
    fn resolve_sample(
        &self,
        node: NodeId,
        pos: Pos2,
        source: NodeId,
    ) -> Result<Option<(Destination, Indicator)>, DragError> {
        let candidate = match candidate_for(&self.surface, node, source)? {
            Candidate::Child(candidate) => candidate,
            Candidate::Source => return Ok(None),
        };
        let (destination, rect) = resolve_destination(
            &self.surface,
            self.resolver.as_ref(),
            candidate,
            pos,
            &self.options,
        )?;
        let origin = self.surface.origin().ok_or(SurfaceError::NoOrigin)?;
        let indicator = Indicator::for_destination(&destination, rect, origin, &self.options);
        Ok(Some((destination, indicator)))
    }

    /// Abort the drag. The container is left as it is.
    pub fn cancel(&mut self) {
        let Some(active) = self.session.end() else {
            return;
        };
        self.finish_cancel(&active);
    }

    fn finish_cancel(&mut self, active: &ActiveSession) {
        let element = active.source.element;
        self.surface
            .set_marker(element, &self.options.dragging_marker, false);
        self.debug_log_event(format!(
            "session CANCEL id={} samples={}",
            active.id, active.samples
        ));
        self.emit(DragEvent::Cancel { element });
        self.reset();
    }

    /// Drop the source at the current destination, or cancel if there is none.
    pub fn commit(&mut self) {
        let Some(active) = self.session.end() else {
            return;
        };
        let Some(destination) = active.destination else {
            self.finish_cancel(&active);
            return;
        };

        let source = active.source;
        self.surface
            .set_marker(source.element, &self.options.dragging_marker, false);

        let mut outcome = DropOutcome::default();
        match self.apply_drop(source, &destination, &mut outcome) {
            Ok(()) => {
                self.debug_log_event(format!(
                    "session COMMIT id={} {:?} {} {:?}",
                    active.id,
                    source.mode,
                    self.surface.describe(destination.element),
                    destination.mode,
                ));
            }
            Err(err) => {
                log::warn!(
                    "drop onto {} ({:?}) was only partially applied: {err}",
                    self.surface.describe(destination.element),
                    destination.mode,
                );
                self.debug_log_event(format!("session COMMIT FAILED id={}: {err}", active.id));
            }
        }

        self.discard_leftovers(&outcome, destination.element);

        self.emit(DragEvent::Commit {
            element: source.element,
            fragments: outcome.fragments,
        });
        self.reset();
    }

    fn reset(&mut self) {
        self.indicator = Indicator::hidden();
        self.cursor_icon = CursorIcon::Default;
    }

    fn emit(&mut self, event: DragEvent) {
        for listener in &mut self.listeners {
            listener.on_drag_event(&event);
        }
    }
}
