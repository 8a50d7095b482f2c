//! In-memory element tree the navigation core runs against.
//!
//! The host owns layout: it refreshes each element's [`Geometry`] and drains
//! the [`ScrollCommand`] queue to perform the actual visual scrolling. The
//! core only decides *what* to scroll *where*. Every structural or class
//! mutation is appended to a journal that the mutation watcher drains.

pub mod mutation;
pub mod scroll;

pub use mutation::MutationRecord;
pub use scroll::{Geometry, ScrollCommand};

use crate::config::ScrollBehavior;

/// Opaque handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug)]
struct Element {
    tag: String,
    id_attr: Option<String>,
    classes: Vec<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    text: Option<String>,
    geometry: Geometry,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id_attr: None,
            classes: Vec::new(),
            parent: None,
            children: Vec::new(),
            text: None,
            geometry: Geometry::default(),
        }
    }
}

/// Relative document-order position of two elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocPosition {
    Before,
    Same,
    After,
    Disconnected,
}

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Element>,
    head: ElementId,
    body: ElementId,
    injected_styles: Option<String>,
    mutations: Vec<MutationRecord>,
    scroll_commands: Vec<ScrollCommand>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            head: ElementId(0),
            body: ElementId(0),
            injected_styles: None,
            mutations: Vec::new(),
            scroll_commands: Vec::new(),
        };
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc
    }

    pub fn head(&self) -> ElementId {
        self.head
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Element::new(tag));
        id
    }

    fn node(&self, id: ElementId) -> &Element {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    pub fn tag(&self, id: ElementId) -> &str {
        &self.node(id).tag
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.node(id).children
    }

    pub fn set_id_attr(&mut self, id: ElementId, value: &str) {
        self.node_mut(id).id_attr = Some(value.to_string());
    }

    pub fn element_by_id_attr(&self, value: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|n| n.id_attr.as_deref() == Some(value))
            .map(ElementId)
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        self.node_mut(id).text = Some(text.to_string());
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    /* -------- classes -------- */

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    pub fn classes(&self, id: ElementId) -> &[String] {
        &self.node(id).classes
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if !self.has_class(id, class) {
            self.node_mut(id).classes.push(class.to_string());
            self.mutations.push(MutationRecord::ClassChanged { element: id });
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        let classes = &mut self.node_mut(id).classes;
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.mutations.push(MutationRecord::ClassChanged { element: id });
        }
    }

    /* -------- structure -------- */

    /// Append `child` to `parent`, detaching it from its old parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        self.mutations.push(MutationRecord::ChildAdded { parent, child });
    }

    /// Detach an element from the tree. Its own subtree stays intact.
    pub fn remove_element(&mut self, id: ElementId) {
        if let Some(parent) = self.node(id).parent {
            self.detach(id);
            self.mutations.push(MutationRecord::ChildRemoved { parent, child: id });
        }
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Move all children of `parent` into a freshly created wrapper, then
    /// append the wrapper back to `parent`.
    pub fn wrap_children(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let wrapper = self.create_element(tag);
        let children: Vec<ElementId> = self.node(parent).children.clone();
        for child in children {
            self.append_child(wrapper, child);
        }
        self.append_child(parent, wrapper);
        wrapper
    }

    /// Create a detached wrapper containing exactly the given elements, in
    /// the given order. The caller decides where to attach it.
    pub fn wrap_elements(&mut self, elements: &[ElementId], tag: &str) -> ElementId {
        let wrapper = self.create_element(tag);
        for element in elements {
            self.append_child(wrapper, *element);
        }
        wrapper
    }

    /* -------- queries -------- */

    /// All descendants of `root` carrying `class`, in document order.
    pub fn descendants_with_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        self.walk(root, &mut |doc, id| {
            if id != root && doc.has_class(id, class) {
                found.push(id);
            }
        });
        found
    }

    /// First ancestor of `id` carrying `class`, if any.
    pub fn ancestor_with_class(&self, id: ElementId, class: &str) -> Option<ElementId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.has_class(ancestor, class) {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    fn walk(&self, id: ElementId, visit: &mut impl FnMut(&Self, ElementId)) {
        visit(self, id);
        for child in self.node(id).children.clone() {
            self.walk(child, visit);
        }
    }

    /// Document-order comparison of two attached elements.
    pub fn position(&self, element: ElementId, sibling: ElementId) -> DocPosition {
        if element == sibling {
            return DocPosition::Same;
        }

        let order_of = |target: ElementId| -> Option<usize> {
            let mut order = None;
            let mut counter = 0usize;
            self.walk(self.body, &mut |_, id| {
                if id == target {
                    order = Some(counter);
                }
                counter += 1;
            });
            order
        };

        match (order_of(element), order_of(sibling)) {
            (Some(a), Some(b)) if a < b => DocPosition::Before,
            (Some(_), Some(_)) => DocPosition::After,
            _ => DocPosition::Disconnected,
        }
    }

    /* -------- layout & scrolling -------- */

    pub fn geometry(&self, id: ElementId) -> &Geometry {
        &self.node(id).geometry
    }

    /// Layout updates bypass the mutation journal; geometry belongs to the
    /// host, not the document structure.
    pub fn geometry_mut(&mut self, id: ElementId) -> &mut Geometry {
        &mut self.node_mut(id).geometry
    }

    /// Request that the host bring an element into view, block-start aligned.
    pub fn scroll_into_view(&mut self, target: ElementId, behavior: ScrollBehavior) {
        self.scroll_commands
            .push(ScrollCommand::IntoView { target, behavior });
    }

    pub(crate) fn push_scroll_command(&mut self, command: ScrollCommand) {
        self.scroll_commands.push(command);
    }

    /// Drain pending scroll commands, oldest first.
    pub fn take_scroll_commands(&mut self) -> Vec<ScrollCommand> {
        std::mem::take(&mut self.scroll_commands)
    }

    /* -------- styles & mutations -------- */

    /// Inject a style block into the head, once. A second call is a no-op.
    pub fn inject_styles(&mut self, styles: &str) {
        if self.injected_styles.is_none() {
            self.injected_styles = Some(styles.to_string());
        }
    }

    pub fn injected_styles(&self) -> Option<&str> {
        self.injected_styles.as_deref()
    }

    /// Drain the mutation journal, oldest first.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.mutations)
    }

    pub fn has_pending_mutations(&self) -> bool {
        !self.mutations.is_empty()
    }
}
