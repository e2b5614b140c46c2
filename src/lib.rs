//! Drag-and-drop reordering of the children of one container, including dropping
//! *into* the text of a child, which splits that child in two around the dropped element.
//!
//! The core is [`DragController`]. It works on anything implementing [`Surface`], using a
//! [`RangeResolver`] to find the text under the pointer and a [`ContentSplitter`] to split
//! elements. [`Document`], [`MonospaceLayout`] and [`DocumentSplitter`] are ready-made
//! implementations of those for an in-memory tree.

#![forbid(unsafe_code)]

pub mod document;
pub mod reorder;
pub mod surface;

pub use document::{Document, DocumentSplitter, MonospaceLayout, NodeKind};
pub use reorder::{
    Destination, DestinationMode, DragController, DragError, DragEvent, DragListener, DragMode,
    DragOptions, Granularity, Indicator, IndicatorOrientation, Source,
};
pub use surface::{
    ContentSplitter, NodeId, RangeResolver, Surface, SurfaceError, TextPosition, TextRange,
};
