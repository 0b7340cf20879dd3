//! Arena-backed host document tree.
//!
//! The document stands in for the host page: tables are looked up by id,
//! hidden in place, and forms are appended to destination containers. Nodes
//! are never removed, so a [`NodeId`] stays valid for the document lifetime.

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self
            .attributes
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            slot.1 = value;
        } else {
            self.attributes.push((name.to_string(), value));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Root,
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Elements that never have children or end tags.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    pub(crate) doctype: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Root,
            }],
            doctype: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { document: self, id }
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub(crate) fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id) {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// First element in document order carrying the id.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.node(self.root())
            .descendants()
            .find(|node| node.attribute("id") == Some(id))
            .map(|node| node.id())
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
        }))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Comment(text.into()))
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is left where it is.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[child.0].parent.is_some() || parent == child {
            return;
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Append text, merging with a trailing text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(&last) = self.nodes[parent.0].children.last()
            && let NodeData::Text(existing) = &mut self.nodes[last.0].data
        {
            existing.push_str(text);
            return;
        }
        let id = self.push(NodeData::Text(text.to_string()));
        self.append_child(parent, id);
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.set_attribute(name, value);
        }
    }

    /// Add a class token unless it is already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let current = element.attribute("class").unwrap_or("");
        if current.split_whitespace().any(|token| token == class) {
            return;
        }
        let updated = if current.trim().is_empty() {
            class.to_string()
        } else {
            format!("{} {class}", current.trim_end())
        };
        element.set_attribute("class", updated);
    }

    /// Set one inline style property, keeping the others in order.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let mut declarations: Vec<(String, String)> = element
            .attribute("style")
            .unwrap_or("")
            .split(';')
            .filter_map(|declaration| {
                let (key, val) = declaration.split_once(':')?;
                Some((key.trim().to_string(), val.trim().to_string()))
            })
            .collect();
        match declarations
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(property))
        {
            Some(slot) => slot.1 = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string())),
        }
        let style = declarations
            .iter()
            .map(|(key, val)| format!("{key}: {val}"))
            .collect::<Vec<_>>()
            .join("; ");
        element.set_attribute("style", style);
    }

    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.element(id)?
            .attribute("style")?
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(property))
            .map(|(_, value)| value.trim().to_string())
    }
}

/// Borrowed view of one node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn data(&self) -> &'a NodeData {
        self.document.data(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.document
            .element(self.id)
            .map(|element| element.name.as_str())
    }

    pub fn is_element(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.document.element(self.id)?.attribute(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|value| value.split_whitespace().any(|token| token == class))
    }

    /// All child nodes, text included.
    pub fn child_nodes(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let document = self.document;
        document
            .children_of(self.id)
            .iter()
            .map(move |&id| NodeRef { document, id })
    }

    /// Element children only.
    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        self.child_nodes().filter(|node| node.name().is_some())
    }

    /// Descendants in document order, excluding the node itself.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.document.children_of(self.id).to_vec();
        stack.reverse();
        Descendants {
            document: self.document,
            stack,
        }
    }

    /// Descendant elements with the given tag name.
    pub fn find_all(&self, name: &'a str) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        self.descendants().filter(move |node| node.is_element(name))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        if let NodeData::Text(text) = self.data() {
            out.push_str(text);
        }
        for node in self.descendants() {
            if let NodeData::Text(text) = node.data() {
                out.push_str(text);
            }
        }
        out
    }
}

pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children_of(id).iter().rev().copied());
        Some(NodeRef {
            document: self.document,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_queries_tree() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element("DIV");
        doc.set_attribute(div, "id", "box");
        doc.append_child(root, div);
        doc.append_text(div, "a");
        doc.append_text(div, "b");

        assert_eq!(doc.element_by_id("box"), Some(div));
        let node = doc.node(div);
        assert_eq!(node.name(), Some("div"));
        assert_eq!(node.child_nodes().count(), 1);
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn classes_are_not_duplicated() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.add_class(div, "hidden");
        doc.add_class(div, "hidden");
        doc.add_class(div, "wide");
        assert_eq!(doc.node(div).attribute("class"), Some("hidden wide"));
    }

    #[test]
    fn style_property_replaces_existing_value() {
        let mut doc = Document::new();
        let table = doc.create_element("table");
        doc.set_attribute(table, "style", "width: 100%; display:block");
        doc.set_style_property(table, "display", "none");
        assert_eq!(
            doc.node(table).attribute("style"),
            Some("width: 100%; display: none")
        );
        assert_eq!(doc.style_property(table, "display").as_deref(), Some("none"));
    }

    #[test]
    fn attached_child_is_not_moved() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(a, child);
        doc.append_child(b, child);
        assert_eq!(doc.node(a).child_nodes().count(), 1);
        assert_eq!(doc.node(b).child_nodes().count(), 0);
    }
}
