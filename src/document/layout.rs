use egui::{Pos2, Rect, Vec2};

use crate::surface::{NodeId, RangeResolver, Surface as _, SurfaceError, TextRange};

use super::Document;

/// One character placed by [`MonospaceLayout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedChar {
    pub node: NodeId,
    pub offset: usize,
    pub ch: char,
    pub rect: Rect,
}

/// Fixed-pitch text layout: every character occupies a `glyph_width` × `line_height` cell,
/// lines wrap at the inner width of the element's rectangle and at `'\n'`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonospaceLayout {
    pub glyph_width: f32,
    pub line_height: f32,

    /// Space between the element's rectangle and its first line/column.
    pub padding: Vec2,
}

impl Default for MonospaceLayout {
    fn default() -> Self {
        Self {
            glyph_width: 8.0,
            line_height: 16.0,
            padding: Vec2::new(4.0, 2.0),
        }
    }
}

impl MonospaceLayout {
    /// Place every character of `element` (in document order).
    ///
    /// # Errors
    /// If `element` has no layout rectangle.
    pub fn place_chars(
        &self,
        doc: &Document,
        element: NodeId,
    ) -> Result<Vec<PlacedChar>, SurfaceError> {
        let rect = doc.rect(element).ok_or(SurfaceError::NoGeometry(element))?;
        let texts: Vec<(NodeId, &str)> = doc
            .text_nodes(element)
            .into_iter()
            .filter_map(|node| Some((node, doc.text(node)?)))
            .collect();
        let total = texts.iter().map(|(_, text)| text.chars().count()).sum::<usize>();

        // No line holds more than the whole text, whatever the width.
        let inner = rect.shrink2(self.padding);
        let per_line = if self.glyph_width > 0.0 {
            ((inner.width() / self.glyph_width).floor() as usize).clamp(1, total.max(1))
        } else {
            1
        };
        let cell = Vec2::new(self.glyph_width, self.line_height);

        let mut placed = Vec::with_capacity(total);
        let mut index = 0usize;
        for (node, text) in texts {
            for (offset, ch) in text.chars().enumerate() {
                if ch == '\n' {
                    index = (index / per_line + 1) * per_line;
                    continue;
                }
                let line = index / per_line;
                let column = index % per_line;
                let min = inner.min + Vec2::new(column as f32 * cell.x, line as f32 * cell.y);
                placed.push(PlacedChar {
                    node,
                    offset,
                    ch,
                    rect: Rect::from_min_size(min, cell),
                });
                index += 1;
            }
        }
        Ok(placed)
    }
}

impl RangeResolver<Document> for MonospaceLayout {
    fn resolve(
        &self,
        surface: &Document,
        element: NodeId,
        pos: Pos2,
        accept: &dyn Fn(Rect) -> bool,
    ) -> Result<Option<TextRange>, SurfaceError> {
        let hit = self
            .place_chars(surface, element)?
            .into_iter()
            .find(|c| c.rect.contains(pos) && accept(c.rect));
        Ok(hit.map(|c| TextRange {
            node: c.node,
            start: c.offset,
            end: c.offset + 1,
            rect: c.rect,
        }))
    }
}

#[cfg(test)]
mod tests {
    use egui::pos2;

    use super::*;

    fn doc_with_line(text: &str) -> (Document, NodeId) {
        let mut doc = Document::new("div");
        let container = doc.container();
        let p = doc
            .append_element_with_text(container, "p", text)
            .expect("container accepts children");
        doc.set_rect(p, Rect::from_min_max(pos2(0.0, 100.0), pos2(200.0, 120.0)));
        (doc, p)
    }

    fn layout() -> MonospaceLayout {
        MonospaceLayout {
            glyph_width: 10.0,
            line_height: 16.0,
            padding: Vec2::new(0.0, 2.0),
        }
    }

    #[test]
    fn resolves_the_character_under_the_pointer() {
        let (doc, p) = doc_with_line("hello");
        let range = layout()
            .resolve(&doc, p, pos2(23.0, 110.0), &|_| true)
            .expect("p has a rect")
            .expect("pointer is over text");
        assert_eq!((range.start, range.end), (2, 3));
        assert_eq!(range.rect.left(), 20.0);
        assert_eq!(range.rect.top(), 102.0);
    }

    #[test]
    fn misses_past_the_end_of_text_and_rejected_ranges() {
        let (doc, p) = doc_with_line("hello");
        assert!(layout()
            .resolve(&doc, p, pos2(150.0, 110.0), &|_| true)
            .expect("p has a rect")
            .is_none());
        assert!(layout()
            .resolve(&doc, p, pos2(5.0, 110.0), &|_| false)
            .expect("p has a rect")
            .is_none());
    }

    #[test]
    fn wraps_at_inner_width_and_newlines() {
        let (mut doc, p) = doc_with_line("abcd\nef");
        doc.set_rect(p, Rect::from_min_max(pos2(0.0, 0.0), pos2(30.0, 100.0)));
        let placed = layout().place_chars(&doc, p).expect("p has a rect");
        let lines: Vec<(char, f32)> = placed.iter().map(|c| (c.ch, c.rect.top())).collect();
        assert_eq!(
            lines,
            vec![
                ('a', 2.0),
                ('b', 2.0),
                ('c', 2.0),
                ('d', 18.0),
                ('e', 34.0),
                ('f', 34.0),
            ]
        );
    }

    #[test]
    fn unbounded_width_still_breaks_at_newlines() {
        let (mut doc, p) = doc_with_line("a\nb\nc");
        doc.set_rect(p, Rect::from_min_max(pos2(0.0, 100.0), pos2(f32::INFINITY, 200.0)));
        let tops: Vec<(char, f32, f32)> = layout()
            .place_chars(&doc, p)
            .expect("p has a rect")
            .iter()
            .map(|c| (c.ch, c.rect.left(), c.rect.top()))
            .collect();
        assert_eq!(tops, vec![('a', 0.0, 102.0), ('b', 0.0, 118.0), ('c', 0.0, 134.0)]);

        let hairline = MonospaceLayout {
            glyph_width: f32::MIN_POSITIVE,
            ..layout()
        };
        doc.set_rect(p, Rect::from_min_max(pos2(0.0, 100.0), pos2(200.0, 200.0)));
        let placed = hairline.place_chars(&doc, p).expect("p has a rect");
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[2].rect.top(), 134.0);
    }

    #[test]
    fn missing_rect_is_an_error() {
        let (mut doc, p) = doc_with_line("hello");
        doc.clear_rect(p);
        assert_eq!(
            layout().resolve(&doc, p, pos2(0.0, 0.0), &|_| true),
            Err(SurfaceError::NoGeometry(p))
        );
    }
}
