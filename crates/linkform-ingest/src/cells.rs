//! Cell extraction from linked record tables.

use tracing::trace;

use crate::document::NodeRef;
use crate::tree::deepest_leaf_text;

/// Header text paired with the value text of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCell {
    /// Header text; may encode `group_label` joined by `_`.
    pub header: String,
    pub value: String,
}

/// Header and value texts of a table, aligned by column index.
///
/// Column 0 is the row-identity column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CellGrid {
    /// Column count after padding.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Cells of one body row, or `None` when the row does not exist.
    pub fn row(&self, index: usize) -> Option<Vec<SourceCell>> {
        let values = self.rows.get(index)?;
        Some(
            self.headers
                .iter()
                .zip(values)
                .map(|(header, value)| SourceCell {
                    header: header.clone(),
                    value: value.clone(),
                })
                .collect(),
        )
    }

    fn pad(&mut self) {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        self.headers.resize(width, String::new());
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }
}

/// Extract `thead th` headers and `tbody tr > td` values.
///
/// Every cell resolves to its deepest-leaf text. Header and row sequences are
/// padded with empty strings to a common width.
pub fn extract_cells(table: NodeRef<'_>) -> CellGrid {
    let headers: Vec<String> = table
        .find_all("thead")
        .flat_map(|head| head.find_all("th"))
        .map(deepest_leaf_text)
        .collect();

    let rows: Vec<Vec<String>> = table
        .find_all("tbody")
        .flat_map(|body| body.find_all("tr"))
        .map(|row| {
            row.element_children()
                .filter(|cell| cell.is_element("td"))
                .map(deepest_leaf_text)
                .collect()
        })
        .collect();

    let mut grid = CellGrid { headers, rows };
    grid.pad();
    trace!(
        columns = grid.width(),
        rows = grid.rows.len(),
        "extracted table cells"
    );
    grid
}

/// Record id from the first anchor: the second segment of an absolute path.
///
/// `/items/123/edit` yields `123`. Missing anchors or short paths yield an
/// empty id.
pub fn record_id(table: NodeRef<'_>) -> String {
    let href = table
        .find_all("a")
        .next()
        .and_then(|anchor| anchor.attribute("href"))
        .unwrap_or("");
    href.split('/').nth(2).unwrap_or("").to_string()
}
