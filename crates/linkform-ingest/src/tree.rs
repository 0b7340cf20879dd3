//! Structural tree utilities independent of the concrete document.

use crate::document::NodeRef;

/// Minimal read capability over a markup tree.
pub trait TreeNode: Sized {
    /// Element children in document order.
    fn children(&self) -> Vec<Self>;

    /// Text content of the node and its descendants.
    fn text(&self) -> String;
}

/// Descend through the last child until a childless node is reached.
///
/// Source tables wrap field text in decorative markup; the innermost last
/// node holds the value.
pub fn deepest_leaf<N: TreeNode>(node: N) -> N {
    let mut current = node;
    while let Some(last) = current.children().pop() {
        current = last;
    }
    current
}

/// Trimmed text of the deepest leaf.
pub fn deepest_leaf_text<N: TreeNode>(node: N) -> String {
    deepest_leaf(node).text().trim().to_string()
}

impl TreeNode for NodeRef<'_> {
    fn children(&self) -> Vec<Self> {
        self.element_children().collect()
    }

    fn text(&self) -> String {
        self.text_content()
    }
}
