use crate::surface::{ContentSplitter, NodeId, Surface as _, SurfaceError, TextPosition};

use super::Document;

/// Splits an element of a [`Document`] into a leading and a trailing copy.
///
/// Inline structure on the way down to the split text node is kept in both halves, so
/// `<p>a<b>bold</b>c</p>` split inside "bold" gives `<p>a<b>bo</b></p>` and `<p><b>ld</b>c</p>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentSplitter;

impl ContentSplitter<Document> for DocumentSplitter {
    fn split(
        &mut self,
        surface: &mut Document,
        element: NodeId,
        at: TextPosition,
    ) -> Result<[NodeId; 2], SurfaceError> {
        split_element(surface, element, at)
    }
}

/// Child indices along the path from `element` down to the text node of `at`,
/// as `(original parent, index of the path child)` pairs.
fn path_indices(
    doc: &Document,
    element: NodeId,
    at: TextPosition,
) -> Result<Vec<(NodeId, usize)>, SurfaceError> {
    let outside = SurfaceError::PositionOutsideElement {
        element,
        node: at.node,
    };
    let mut steps = Vec::new();
    let mut node = at.node;
    loop {
        let parent = doc.parent(node).ok_or_else(|| outside.clone())?;
        let index = doc
            .children(parent)
            .iter()
            .position(|&c| c == node)
            .ok_or_else(|| outside.clone())?;
        steps.push((parent, index));
        if parent == element {
            return Ok(steps);
        }
        node = parent;
    }
}

/// # Errors
/// If `at` is not a text node inside `element` or its offset is past the end of the text.
pub fn split_element(
    doc: &mut Document,
    element: NodeId,
    at: TextPosition,
) -> Result<[NodeId; 2], SurfaceError> {
    let Some(text) = doc.text(at.node) else {
        return Err(SurfaceError::PositionOutsideElement {
            element,
            node: at.node,
        });
    };
    let len = text.chars().count();
    if at.offset > len {
        return Err(SurfaceError::OffsetOutOfBounds {
            node: at.node,
            offset: at.offset,
            len,
        });
    }
    let head: String = text.chars().take(at.offset).collect();
    let tail: String = text.chars().skip(at.offset).collect();

    let steps = path_indices(doc, element, at)?;

    let (leading, leading_map) = doc.deep_clone_mapped(element)?;
    let (trailing, trailing_map) = doc.deep_clone_mapped(element)?;

    for &(parent, index) in &steps {
        if let Some(&copy) = leading_map.get(&parent) {
            doc.retain_children(copy, |i, _| i <= index)?;
        }
        if let Some(&copy) = trailing_map.get(&parent) {
            doc.retain_children(copy, |i, _| i >= index)?;
        }
    }

    if let Some(&copy) = leading_map.get(&at.node) {
        doc.set_text(copy, head)?;
    }
    if let Some(&copy) = trailing_map.get(&at.node) {
        doc.set_text(copy, tail)?;
    }

    log::trace!(
        "split {} at {}:{} into {leading} and {trailing}",
        doc.describe(element),
        at.node,
        at.offset
    );
    Ok([leading, trailing])
}
