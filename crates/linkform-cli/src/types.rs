use std::path::PathBuf;

use linkform_model::StatusTag;
use linkform_transform::RunReport;

#[derive(Debug)]
pub struct TransformResult {
    pub input: PathBuf,
    /// Written document; `None` for dry runs.
    pub output: Option<PathBuf>,
    pub report: RunReport,
}

impl TransformResult {
    pub fn has_failures(&self) -> bool {
        self.report.has_failures()
    }
}

/// Step plan of one job layout.
#[derive(Debug)]
pub struct LayoutPlan {
    pub source_table_id: String,
    pub status: StatusTag,
    /// Resolved steps, or the validation error.
    pub steps: Result<Vec<PlanStep>, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    /// Source column the step binds.
    pub column: usize,
    pub position: usize,
    pub width: usize,
    pub section: Option<String>,
    pub field: String,
    /// Number of listed options for select bindings.
    pub options: Option<usize>,
}
