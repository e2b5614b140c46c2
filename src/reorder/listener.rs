use super::types::DragEvent;

/// Receives drag lifecycle events.
///
/// Implemented for every `FnMut(&DragEvent)`, so a closure forwarding into a channel
/// works as well as a hand-written observer:
///
/// ```
/// # use egui_reorder::{DragController, DragEvent, Document, DocumentSplitter, MonospaceLayout};
/// let (tx, rx) = std::sync::mpsc::channel::<DragEvent>();
/// let mut drag = DragController::new(
///     Document::new("div"),
///     MonospaceLayout::default(),
///     DocumentSplitter,
/// );
/// drag.add_listener(move |event: &DragEvent| {
///     tx.send(*event).ok();
/// });
/// # drop(rx);
/// ```
pub trait DragListener {
    fn on_drag_event(&mut self, event: &DragEvent);
}

impl<F> DragListener for F
where
    F: FnMut(&DragEvent),
{
    fn on_drag_event(&mut self, event: &DragEvent) {
        self(event);
    }
}
