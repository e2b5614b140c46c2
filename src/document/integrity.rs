use crate::surface::{NodeId, Surface as _};

use super::{Document, NodeKind};

pub(super) fn document_integrity_issues(doc: &Document) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();

    let root = doc.container();
    if !doc.contains(root) {
        issues.push(format!("integrity: container {root} missing"));
        return issues;
    }
    if let Some(parent) = doc.parent(root) {
        issues.push(format!("integrity: container {root} has parent {parent}"));
    }

    let mut visited: ahash::HashSet<NodeId> = Default::default();
    let mut parent_of: ahash::HashMap<NodeId, NodeId> = Default::default();
    let mut stack: Vec<NodeId> = vec![root];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }

        let Some(NodeKind::Element { children, .. }) = doc.kind(node) else {
            continue;
        };

        let mut local_set: ahash::HashSet<NodeId> = Default::default();
        for child in children {
            if !local_set.insert(*child) {
                issues.push(format!(
                    "integrity: parent {node} contains duplicate child {child}"
                ));
            }
        }

        for &child in children {
            if !doc.contains(child) {
                issues.push(format!(
                    "integrity: parent {node} references missing child {child}"
                ));
                continue;
            }

            if doc.parent(child) != Some(node) {
                issues.push(format!(
                    "integrity: child {child} of {node} points at parent {:?}",
                    doc.parent(child)
                ));
            }

            if let Some(prev_parent) = parent_of.insert(child, node) {
                issues.push(format!(
                    "integrity: child {child} has multiple parents {prev_parent} and {node}"
                ));
            }

            stack.push(child);
        }
    }

    issues
}
