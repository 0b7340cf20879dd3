//! Host document access for linked-table transformation.
//!
//! - **document**: arena tree standing in for the host page
//! - **html**: lenient HTML reader and writer
//! - **tree**: generic deepest-leaf descent
//! - **cells**: header/value extraction and record ids

pub mod cells;
pub mod document;
pub mod error;
mod html;
pub mod tree;

pub use cells::{CellGrid, SourceCell, extract_cells, record_id};
pub use document::{Document, Element, NodeData, NodeId, NodeRef};
pub use error::{IngestError, Result};
pub use tree::{TreeNode, deepest_leaf, deepest_leaf_text};
