use egui::{pos2, Rect, Vec2};

use crate::document::{Document, MonospaceLayout};
use crate::surface::{NodeId, Surface as _, SurfaceError, TextRange};

use super::destination::{
    accepts_range, candidate_for, decide_mode, is_within, resolve_destination, Candidate,
};
use super::error::DragError;
use super::options::{DragOptions, Granularity};
use super::types::DestinationMode;

fn candidate() -> Rect {
    Rect::from_min_max(pos2(0.0, 100.0), pos2(200.0, 120.0))
}

fn range_at(start: usize, left: f32) -> TextRange {
    TextRange {
        node: NodeId::from_u64(9),
        start,
        end: start + 1,
        rect: Rect::from_min_size(pos2(left, 102.0), Vec2::new(10.0, 16.0)),
    }
}

fn element_granularity() -> DragOptions {
    DragOptions {
        granularity: Granularity::Element,
        ..Default::default()
    }
}

#[test]
fn without_text_the_vertical_midpoint_decides() {
    let opt = DragOptions::default();
    assert_eq!(
        decide_mode(candidate(), None, pos2(100.0, 102.0), &opt),
        DestinationMode::Before
    );
    assert_eq!(
        decide_mode(candidate(), None, pos2(100.0, 118.0), &opt),
        DestinationMode::After
    );
    // Exactly on the midpoint counts as after.
    assert_eq!(
        decide_mode(candidate(), None, pos2(100.0, 110.0), &opt),
        DestinationMode::After
    );
    assert_eq!(
        decide_mode(candidate(), None, pos2(100.0, 109.9), &opt),
        DestinationMode::Before
    );
}

#[test]
fn padding_bands_win_over_text() {
    let opt = DragOptions::default();
    let range = range_at(2, 20.0);
    assert_eq!(
        decide_mode(candidate(), Some(&range), pos2(22.0, 102.0), &opt),
        DestinationMode::Before
    );
    assert_eq!(
        decide_mode(candidate(), Some(&range), pos2(22.0, 104.0), &opt),
        DestinationMode::Before
    );
    assert_eq!(
        decide_mode(candidate(), Some(&range), pos2(22.0, 116.0), &opt),
        DestinationMode::After
    );
    assert_eq!(
        decide_mode(candidate(), Some(&range), pos2(22.0, 118.0), &opt),
        DestinationMode::After
    );
}

#[test]
fn character_granularity_picks_a_side_of_the_character() {
    let opt = DragOptions::default();
    let range = range_at(2, 20.0);
    assert_eq!(
        decide_mode(candidate(), Some(&range), pos2(24.0, 110.0), &opt),
        DestinationMode::InsideBeforeChar
    );
    assert_eq!(
        decide_mode(candidate(), Some(&range), pos2(25.0, 110.0), &opt),
        DestinationMode::InsideAfterChar
    );
}

#[test]
fn element_granularity_treats_offset_zero_as_before() {
    let opt = element_granularity();
    assert_eq!(
        decide_mode(candidate(), Some(&range_at(2, 20.0)), pos2(22.0, 110.0), &opt),
        DestinationMode::Inside
    );
    assert_eq!(
        decide_mode(candidate(), Some(&range_at(0, 0.0)), pos2(2.0, 110.0), &opt),
        DestinationMode::Before
    );
}

#[test]
fn range_filter_requires_the_pointer_line() {
    let accept = accepts_range(candidate(), 110.0);
    assert!(accept(range_at(0, 0.0).rect));
    assert!(!accept(Rect::from_min_size(pos2(0.0, 120.0), Vec2::new(10.0, 16.0))));

    let outside = accepts_range(candidate(), 130.0);
    assert!(!outside(Rect::from_min_size(pos2(0.0, 125.0), Vec2::new(10.0, 16.0))));
}

fn nested_document() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new("div");
    let container = doc.container();
    let p = doc.create_element("p");
    let em = doc
        .append_element_with_text(p, "em", "deep")
        .expect("p is an element");
    doc.append_child(container, p).expect("container is an element");
    let q = doc
        .append_element_with_text(container, "p", "other")
        .expect("container is an element");
    (doc, p, em, q)
}

#[test]
fn candidate_walk_climbs_to_the_container_child() {
    let (doc, p, em, q) = nested_document();
    let deep_text = doc.children(em)[0];
    assert_eq!(candidate_for(&doc, deep_text, q), Ok(Candidate::Child(p)));
    assert_eq!(candidate_for(&doc, p, q), Ok(Candidate::Child(p)));
    assert_eq!(candidate_for(&doc, deep_text, p), Ok(Candidate::Source));
}

#[test]
fn is_within_only_sees_strict_ancestors() {
    let (doc, p, em, q) = nested_document();
    let deep_text = doc.children(em)[0];
    assert!(is_within(&doc, deep_text, p));
    assert!(is_within(&doc, em, p));
    assert!(!is_within(&doc, p, p));
    assert!(!is_within(&doc, em, q));
}

#[test]
fn candidate_walk_reports_detached_nodes() {
    let (mut doc, _p, _em, q) = nested_document();
    let orphan = doc.create_element("span");
    assert_eq!(
        candidate_for(&doc, orphan, q),
        Err(DragError::Surface(SurfaceError::Detached(orphan)))
    );
}

#[test]
fn resolved_range_is_kept_only_for_inside_modes() {
    let mut doc = Document::new("div");
    let container = doc.container();
    let p = doc
        .append_element_with_text(container, "p", "hello")
        .expect("container is an element");
    doc.set_rect(p, candidate());
    let layout = MonospaceLayout {
        glyph_width: 10.0,
        line_height: 16.0,
        padding: Vec2::new(0.0, 2.0),
    };
    let opt = DragOptions::default();

    let (inside, rect) = resolve_destination(&doc, &layout, p, pos2(22.0, 110.0), &opt)
        .expect("p has geometry");
    assert_eq!(rect, candidate());
    assert_eq!(inside.mode, DestinationMode::InsideBeforeChar);
    assert_eq!(inside.range.map(|r| r.start), Some(2));

    let (edge, _) = resolve_destination(&doc, &layout, p, pos2(22.0, 103.0), &opt)
        .expect("p has geometry");
    assert_eq!(edge.mode, DestinationMode::Before);
    assert_eq!(edge.range, None);

    doc.clear_rect(p);
    assert_eq!(
        resolve_destination(&doc, &layout, p, pos2(22.0, 110.0), &opt).map(|(d, _)| d.mode),
        Err(DragError::Surface(SurfaceError::NoGeometry(p)))
    );
}
