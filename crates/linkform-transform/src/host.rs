//! Host document capability and form rendering.
//!
//! The transformer only needs a handful of operations from the page hosting
//! the tables; [`HostDocument`] names them so tests can substitute a fake.
//! [`Document`] implements it by rendering the [`FormModel`] into elements.

use linkform_ingest::{CellGrid, Document, NodeId, extract_cells, record_id};
use linkform_model::{Control, ControlKind, FieldGroup, FormModel, SectionBreak};

/// Classes shared by every generated element.
const ADDED: &str = "added";

/// What the transformer reads from a located source table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub record_id: String,
    pub grid: CellGrid,
}

/// Operations a host page offers to the transformer.
pub trait HostDocument {
    type Node: Copy;

    /// Element carrying the given id.
    fn find(&self, id: &str) -> Option<Self::Node>;

    /// Suppress display of a node.
    fn hide(&mut self, node: Self::Node);

    fn read_table(&self, table: Self::Node) -> SourceTable;

    /// Append a rendered form to `container`, returning the form node.
    fn mount(&mut self, container: Self::Node, form: &FormModel) -> Self::Node;

    fn add_class(&mut self, node: Self::Node, class: &str);
}

impl HostDocument for Document {
    type Node = NodeId;

    fn find(&self, id: &str) -> Option<NodeId> {
        self.element_by_id(id)
    }

    fn hide(&mut self, node: NodeId) {
        self.set_style_property(node, "display", "none");
    }

    fn read_table(&self, table: NodeId) -> SourceTable {
        let table = self.node(table);
        SourceTable {
            record_id: record_id(table),
            grid: extract_cells(table),
        }
    }

    fn mount(&mut self, container: NodeId, form: &FormModel) -> NodeId {
        let node = render_form(self, form);
        self.append_child(container, node);
        node
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        Document::add_class(self, node, class);
    }
}

/// Render a detached form element.
///
/// The form is built completely before it is attached, so a host never sees
/// a partially rendered form.
pub fn render_form(document: &mut Document, form: &FormModel) -> NodeId {
    let root = document.create_element("form");
    document.set_attribute(root, "id", form.id());
    add_classes(document, root, &["wrapper", ADDED]);
    document.set_attribute(root, "data-record-id", form.record_id.as_str());
    document.set_attribute(root, "data-status", form.status.to_string());

    for group in &form.groups {
        if let Some(section) = &group.section {
            let node = render_section(document, form, group.index, section);
            document.append_child(root, node);
        }
        let node = render_group(document, form, group);
        document.append_child(root, node);
    }
    root
}

fn render_section(
    document: &mut Document,
    form: &FormModel,
    index: usize,
    section: &SectionBreak,
) -> NodeId {
    let div = document.create_element("div");
    document.set_attribute(div, "id", form.ids(index).section());
    add_classes(document, div, &["section", ADDED]);

    let label = document.create_element("label");
    add_classes(document, label, &["field-section", ADDED]);
    document.append_child(div, label);

    let span = document.create_element("span");
    document.append_text(span, &section.label);
    document.append_child(label, span);
    div
}

fn render_group(document: &mut Document, form: &FormModel, group: &FieldGroup) -> NodeId {
    let ids = form.ids(group.index);
    let container = document.create_element("div");
    document.set_attribute(container, "id", ids.container());
    add_classes(document, container, &["container", ADDED, "field-normal"]);
    for tag in &group.control.tags {
        document.add_class(container, tag.class_name());
    }

    let paragraph = document.create_element("p");
    document.set_attribute(paragraph, "id", ids.label());
    add_classes(document, paragraph, &[ADDED, "field-label"]);
    document.set_attribute(paragraph, "data-ctrl-name", group.control.name.as_str());
    document.append_child(container, paragraph);

    let label = document.create_element("label");
    document.set_attribute(label, "for", ids.control());
    document.append_text(label, &group.label);
    document.append_child(paragraph, label);

    let control = render_control(document, &group.control, ids.control());
    document.append_child(container, control);
    container
}

fn render_control(document: &mut Document, control: &Control, id: String) -> NodeId {
    match &control.kind {
        ControlKind::TextInput | ControlKind::DateInput { .. } => {
            let input = document.create_element("input");
            document.set_attribute(input, "type", "text");
            document.set_attribute(input, "id", id);
            add_classes(document, input, &["control-textbox", ADDED]);
            if let ControlKind::DateInput {
                calendar: Some(pattern),
            } = &control.kind
            {
                document.add_class(input, "datepicker");
                document.set_attribute(input, "data-format", pattern.as_str());
            }
            document.set_attribute(input, "name", control.name.as_str());
            document.set_attribute(input, "value", control.value.as_str());
            input
        }
        ControlKind::TextArea { resizable } => {
            let textarea = document.create_element("textarea");
            document.set_attribute(textarea, "id", id);
            add_classes(document, textarea, &["control-textarea", ADDED]);
            if !resizable {
                document.set_style_property(textarea, "resize", "none");
            }
            document.set_attribute(textarea, "name", control.name.as_str());
            document.append_text(textarea, &control.value);
            textarea
        }
        ControlKind::Select { options } => {
            let select = document.create_element("select");
            document.set_attribute(select, "id", id);
            document.set_attribute(select, "name", control.name.as_str());
            let selected = control.selected_option();
            for (position, option) in options.iter().enumerate() {
                let node = document.create_element("option");
                document.set_attribute(node, "value", option.as_str());
                if selected == Some(position) {
                    document.set_attribute(node, "selected", "selected");
                }
                document.append_text(node, option);
                document.append_child(select, node);
            }
            select
        }
    }
}

fn add_classes(document: &mut Document, node: NodeId, classes: &[&str]) {
    for class in classes {
        document.add_class(node, class);
    }
}
