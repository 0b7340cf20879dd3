//! Integration tests for document parsing and cell extraction.

use linkform_ingest::{Document, extract_cells, record_id};
use proptest::prelude::*;

const LINKED_TABLE: &str = r#"
<div id="page">
  <table id="LinkTable04" class="grid">
    <thead>
      <tr>
        <th><div><span>ID</span></div></th>
        <th><div><span>基本_件名</span></div></th>
        <th><div><span>工事実施依頼日(予定)</span></div></th>
        <th><div><span>社内連絡</span></div></th>
      </tr>
    </thead>
    <tbody>
      <tr>
        <td><a href="/items/4711/edit"><span>4711</span></a></td>
        <td><p>配線工事</p></td>
        <td><p><span>2024年03月05日(火)</span></p></td>
        <td>至急&amp;確認</td>
      </tr>
    </tbody>
  </table>
  <div id="sectionFields4"></div>
</div>
"#;

#[test]
fn extracts_deepest_leaf_texts() {
    let doc = Document::parse_html(LINKED_TABLE).expect("parse");
    let table = doc.element_by_id("LinkTable04").expect("table");
    let grid = extract_cells(doc.node(table));

    assert_eq!(
        grid.headers,
        vec!["ID", "基本_件名", "工事実施依頼日(予定)", "社内連絡"]
    );
    assert_eq!(grid.rows.len(), 1);
    assert_eq!(
        grid.rows[0],
        vec!["4711", "配線工事", "2024年03月05日(火)", "至急&確認"]
    );

    let cells = grid.row(0).expect("first row");
    assert_eq!(cells[1].header, "基本_件名");
    assert_eq!(cells[1].value, "配線工事");
}

#[test]
fn extracts_record_id_from_first_anchor() {
    let doc = Document::parse_html(LINKED_TABLE).expect("parse");
    let table = doc.element_by_id("LinkTable04").expect("table");
    assert_eq!(record_id(doc.node(table)), "4711");
}

#[test]
fn html_round_trip_preserves_structure() {
    let html = r#"<div id="a" class="x"><input name="n" value="1"/><textarea></textarea></div>"#;
    let doc = Document::parse_html(html).expect("parse");
    assert_eq!(doc.to_html().expect("write"), html);
}

#[test]
fn named_entities_resolve_in_cell_values() {
    let html = "<table id=\"t\"><thead><tr><th>ID</th><th>金額&hellip;</th></tr></thead>\
                <tbody><tr><td>1</td><td><span>&yen;1,000&hellip;</span></td></tr></tbody></table>";
    let doc = Document::parse_html(html).expect("parse");
    let table = doc.element_by_id("t").expect("table");
    let grid = extract_cells(doc.node(table));
    assert_eq!(grid.headers[1], "金額…");
    assert_eq!(grid.rows[0][1], "¥1,000…");
}

#[test]
fn named_entities_survive_round_trip() {
    let html = r#"<p title="a&hellip;b">x&hellip;y &yen;100 &copy;</p>"#;
    let doc = Document::parse_html(html).expect("parse");
    assert_eq!(
        doc.to_html().expect("write"),
        r#"<p title="a…b">x…y ¥100 ©</p>"#
    );
}

#[test]
fn unknown_entities_are_kept() {
    let html = r#"<p title="&bogus;">&bogus; &amp;</p>"#;
    let doc = Document::parse_html(html).expect("parse");
    assert_eq!(
        doc.to_html().expect("write"),
        r#"<p title="&amp;bogus;">&amp;bogus; &amp;</p>"#
    );
}

#[test]
fn reads_and_writes_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("page.html");
    std::fs::write(&path, LINKED_TABLE).expect("write input");

    let mut doc = Document::read_html(&path).expect("read");
    let table = doc.element_by_id("LinkTable04").expect("table");
    doc.set_style_property(table, "display", "none");
    let out = dir.path().join("out.html");
    doc.write_html(&out).expect("write output");

    let reread = Document::read_html(&out).expect("reread");
    let table = reread.element_by_id("LinkTable04").expect("table");
    assert_eq!(
        reread.style_property(table, "display").as_deref(),
        Some("none")
    );
}

proptest! {
    #[test]
    fn deepest_leaf_ignores_wrapper_depth(depth in 0usize..6, text in "[a-z0-9]{1,12}") {
        let mut cell = text.clone();
        for _ in 0..depth {
            cell = format!("<span>{cell}</span>");
        }
        let html = format!(
            "<table id=\"t\"><thead><tr><th>k</th><th>h</th></tr></thead>\
             <tbody><tr><td>0</td><td><em>ignored</em>{cell}</td></tr></tbody></table>"
        );
        let doc = Document::parse_html(&html).expect("parse");
        let table = doc.element_by_id("t").expect("table");
        let grid = extract_cells(doc.node(table));
        let expected = if depth == 0 { "ignored".to_string() } else { text };
        prop_assert_eq!(&grid.rows[0][1], &expected);
    }
}
