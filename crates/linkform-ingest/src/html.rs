//! Lenient HTML reading and writing on top of `quick-xml`.
//!
//! Host pages are HTML rather than XML, so the reader tolerates void elements
//! written without a slash, valueless attributes, unknown named entities and
//! end tags that close several open elements at once. Raw-text elements
//! (`script`, `style`) must not contain markup characters.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use tracing::debug;

use crate::document::{Document, NodeData, NodeId, is_void};
use crate::error::{IngestError, Result};

impl Document {
    /// Parse an HTML string into a document.
    pub fn parse_html(html: &str) -> Result<Self> {
        let mut document = Document::new();
        let mut reader = Reader::from_str(html);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut open: Vec<NodeId> = Vec::new();
        loop {
            let parent = open.last().copied().unwrap_or(document.root());
            let event = reader.read_event().map_err(|error| IngestError::Parse {
                position: reader.error_position() as u64,
                message: error.to_string(),
            })?;
            match event {
                Event::Start(start) => {
                    let id = document.push_element(parent, &start);
                    let void = document
                        .element(id)
                        .is_some_and(|element| is_void(&element.name));
                    if !void {
                        open.push(id);
                    }
                }
                Event::Empty(start) => {
                    document.push_element(parent, &start);
                }
                Event::End(end) => {
                    let name = tag_name(end.name().as_ref());
                    let matching = open.iter().rposition(|&id| {
                        document
                            .element(id)
                            .is_some_and(|element| element.name == name)
                    });
                    match matching {
                        Some(position) => open.truncate(position),
                        None => debug!(tag = %name, "ignoring unmatched end tag"),
                    }
                }
                Event::Text(text) => {
                    let raw = String::from_utf8_lossy(&text);
                    document.append_text(parent, &unescape_html(&raw));
                }
                Event::CData(text) => {
                    document.append_text(parent, &String::from_utf8_lossy(&text));
                }
                Event::GeneralRef(reference) => {
                    let name = String::from_utf8_lossy(&reference);
                    document.append_text(parent, &resolve_entity(&name));
                }
                Event::Comment(text) => {
                    let comment = document.create_comment(String::from_utf8_lossy(&text));
                    document.append_child(parent, comment);
                }
                Event::DocType(text) => {
                    document.doctype = Some(String::from_utf8_lossy(&text).trim().to_string());
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(document)
    }

    pub fn read_html(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
        Self::parse_html(&html)
    }

    fn push_element(&mut self, parent: NodeId, start: &BytesStart<'_>) -> NodeId {
        let id = self.create_element(&tag_name(start.name().as_ref()));
        for attribute in start.html_attributes().flatten() {
            let key = String::from_utf8_lossy(attribute.key.as_ref()).to_ascii_lowercase();
            let raw = String::from_utf8_lossy(&attribute.value);
            let value = unescape_html(&raw).into_owned();
            self.set_attribute(id, &key, value);
        }
        self.append_child(parent, id);
        id
    }

    /// Serialize the document back to HTML.
    pub fn to_html(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        if let Some(doctype) = &self.doctype {
            writer
                .write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))
                .map_err(IngestError::write)?;
        }
        for &child in self.children_of(self.root()) {
            self.write_node(&mut writer, child)?;
        }
        String::from_utf8(writer.into_inner()).map_err(IngestError::write)
    }

    /// Serialize one node and its subtree.
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_node(&mut writer, id)?;
        String::from_utf8(writer.into_inner()).map_err(IngestError::write)
    }

    pub fn write_html(&self, path: &Path) -> Result<()> {
        let html = self.to_html()?;
        fs::write(path, html).map_err(|source| IngestError::io(path, source))
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<()> {
        match self.data(id) {
            NodeData::Root => {
                for &child in self.children_of(id) {
                    self.write_node(writer, child)?;
                }
            }
            NodeData::Text(text) => {
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(IngestError::write)?;
            }
            NodeData::Comment(text) => {
                writer
                    .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
                    .map_err(IngestError::write)?;
            }
            NodeData::Element(element) => {
                let mut start = BytesStart::new(element.name.as_str());
                for (key, value) in &element.attributes {
                    start.push_attribute((key.as_str(), value.as_str()));
                }
                if is_void(&element.name) {
                    writer
                        .write_event(Event::Empty(start))
                        .map_err(IngestError::write)?;
                    return Ok(());
                }
                writer
                    .write_event(Event::Start(start))
                    .map_err(IngestError::write)?;
                for &child in self.children_of(id) {
                    self.write_node(writer, child)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(element.name.as_str())))
                    .map_err(IngestError::write)?;
            }
        }
        Ok(())
    }
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

/// Resolve an entity reference body (`amp`, `hellip`, `#39`, `#x27`).
///
/// Named references use the HTML5 entity table. Unknown names and invalid
/// code points are kept verbatim.
fn resolve_entity(name: &str) -> Cow<'static, str> {
    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        if let Some(ch) = parsed.and_then(char::from_u32) {
            return Cow::Owned(ch.to_string());
        }
    } else if let Some(resolved) = resolve_html5_entity(name) {
        return Cow::Borrowed(resolved);
    }
    Cow::Owned(format!("&{name};"))
}

/// Replace every `&name;` reference in `raw`. A bare `&` stays as written.
fn unescape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find(';') {
            Some(end) if end > 0 && !after[..end].contains(['&', ' ', '<']) => {
                out.push_str(&resolve_entity(&after[..end]));
                rest = &after[end + 1..];
            }
            _ => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
