use crate::surface::{Surface as _, SurfaceError};

use super::Document;

fn assert_document_ok(doc: &Document) {
    let issues = doc.integrity_issues();
    assert!(
        issues.is_empty(),
        "document integrity failed:\n{}",
        issues.join("\n")
    );
}

fn three_paragraphs() -> (Document, [crate::NodeId; 3]) {
    let mut doc = Document::new("div");
    let container = doc.container();
    let ids = ["a", "b", "c"].map(|text| {
        doc.append_element_with_text(container, "p", text)
            .expect("container accepts children")
    });
    (doc, ids)
}

fn texts(doc: &Document) -> Vec<String> {
    doc.children(doc.container())
        .iter()
        .map(|&c| doc.text_content(c))
        .collect()
}

#[test]
fn insert_before_moves_attached_nodes() {
    let (mut doc, [a, _b, c]) = three_paragraphs();
    doc.insert_child(c, Some(a)).expect("a is a child");
    assert_eq!(texts(&doc), ["c", "a", "b"]);
    assert_document_ok(&doc);
}

#[test]
fn insert_before_itself_keeps_position() {
    let (mut doc, [_a, b, _c]) = three_paragraphs();
    doc.insert_child(b, Some(b)).expect("b is a child");
    assert_eq!(texts(&doc), ["a", "b", "c"]);
    assert_document_ok(&doc);
}

#[test]
fn append_moves_to_the_end() {
    let (mut doc, [a, _b, _c]) = three_paragraphs();
    doc.insert_child(a, None).expect("append never fails for known nodes");
    assert_eq!(texts(&doc), ["b", "c", "a"]);
    assert_eq!(doc.next_sibling(a), None);
    assert_document_ok(&doc);
}

#[test]
fn rejects_cycles_and_foreign_references() {
    let (mut doc, [a, b, _c]) = three_paragraphs();
    let container = doc.container();
    assert_eq!(
        doc.insert_before(a, container, None),
        Err(SurfaceError::Cycle(container))
    );

    let text_of_a = doc.children(a)[0];
    assert_eq!(
        doc.insert_child(b, Some(text_of_a)),
        Err(SurfaceError::NotAChild {
            parent: container,
            child: text_of_a
        })
    );
    assert_eq!(
        doc.append_child(text_of_a, b),
        Err(SurfaceError::NotAnElement(text_of_a))
    );
    assert_document_ok(&doc);
}

#[test]
fn remove_child_only_accepts_container_children() {
    let (mut doc, [a, _b, _c]) = three_paragraphs();
    let text_of_a = doc.children(a)[0];
    assert!(doc.remove_child(text_of_a).is_err());
    doc.remove_child(a).expect("a is a child");
    assert_eq!(doc.parent(a), None);
    assert_eq!(texts(&doc), ["b", "c"]);
    assert_document_ok(&doc);
}

#[test]
fn deep_clone_is_detached_and_independent() {
    let (mut doc, [a, _b, _c]) = three_paragraphs();
    doc.set_marker(a, "dragging", true);
    let copy = doc.deep_clone(a).expect("a exists");
    assert_ne!(copy, a);
    assert_eq!(doc.parent(copy), None);
    assert_eq!(doc.outer_html(copy), "<p>a</p>");
    assert!(doc.has_marker(copy, "dragging"));

    doc.set_marker(copy, "dragging", false);
    assert!(doc.has_marker(a, "dragging"));
}

#[test]
fn serialization_escapes_text_and_reports_content() {
    let mut doc = Document::new("div");
    let container = doc.container();
    let p = doc
        .append_element_with_text(container, "p", "a<b & c>")
        .expect("container accepts children");
    assert_eq!(doc.outer_html(p), "<p>a&lt;b &amp; c&gt;</p>");

    let empty = doc
        .append_element_with_text(container, "p", "")
        .expect("container accepts children");
    assert!(!doc.has_content(empty));

    let nested = doc.create_element("p");
    let inner = doc.create_element("br");
    doc.append_child(nested, inner).expect("p is an element");
    assert!(doc.has_content(nested));

    assert_eq!(doc.describe(p), format!("<p>{p}"));
}

#[test]
fn free_subtree_only_releases_detached_nodes() {
    let (mut doc, [a, b, _c]) = three_paragraphs();
    let nodes = doc.node_count();
    assert_eq!(doc.free_subtree(a), 0);
    assert_eq!(doc.free_subtree(doc.container()), 0);

    let text_of_b = doc.children(b)[0];
    doc.remove_child(b).expect("b is a child");
    assert_eq!(doc.free_subtree(b), 2);
    assert_eq!(doc.node_count(), nodes - 2);
    assert!(!doc.contains(b));
    assert!(!doc.contains(text_of_b));
    assert_eq!(texts(&doc), ["a", "c"]);
    assert_document_ok(&doc);
}
