//! Structural-change journal, the deterministic analogue of a DOM
//! mutation-observer feed. Records accumulate on the [`Document`] and are
//! drained by the mutation watcher in insertion order.

use super::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationRecord {
    ChildAdded { parent: ElementId, child: ElementId },
    ChildRemoved { parent: ElementId, child: ElementId },
    /// The element's class list changed (the only attribute the core tracks).
    ClassChanged { element: ElementId },
}

impl MutationRecord {
    /// The element the record is about.
    pub fn target(&self) -> ElementId {
        match self {
            MutationRecord::ChildAdded { child, .. } => *child,
            MutationRecord::ChildRemoved { child, .. } => *child,
            MutationRecord::ClassChanged { element } => *element,
        }
    }
}
