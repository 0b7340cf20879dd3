//! Document-level pipeline: read the host page, run the batch, write it back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use linkform_ingest::Document;
use linkform_model::{FieldBinding, JobDescriptor};
use linkform_transform::{ControlFactory, HostDocument, TransformRunner};
use tracing::{info, info_span, trace};

use crate::config::ConfigFile;
use crate::logging::redact_value;
use crate::types::{LayoutPlan, PlanStep, TransformResult};

/// Suffix of the default output file name.
pub const OUTPUT_SUFFIX: &str = "form.html";

/// `<dir>/<stem>.form.html` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("document");
    input.with_file_name(format!("{stem}.{OUTPUT_SUFFIX}"))
}

pub struct TransformInput<'a> {
    pub input: &'a Path,
    pub config: &'a ConfigFile,
    pub output: Option<&'a Path>,
    pub dry_run: bool,
}

/// Transform a host page file according to a configuration.
pub fn transform_file(input: TransformInput<'_>) -> Result<TransformResult> {
    let span = info_span!("transform_file", input = %input.input.display());
    let _guard = span.enter();

    let mut document = Document::read_html(input.input)
        .with_context(|| format!("read {}", input.input.display()))?;
    trace_source_cells(&document, &input.config.batch.jobs);

    let runner = TransformRunner::new(input.config.batch.clone())
        .with_factory(ControlFactory::new(input.config.rules.clone()));
    let report = runner.run(&mut document);

    let output = if input.dry_run {
        info!("dry run, document not written");
        None
    } else {
        let path = input
            .output
            .map_or_else(|| default_output_path(input.input), Path::to_path_buf);
        document
            .write_html(&path)
            .with_context(|| format!("write {}", path.display()))?;
        info!(output = %path.display(), "document written");
        Some(path)
    };

    Ok(TransformResult {
        input: input.input.to_path_buf(),
        output,
        report,
    })
}

/// Trace every source cell before the batch runs.
fn trace_source_cells(document: &Document, jobs: &[JobDescriptor]) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for job in jobs {
        let Some(table) = document.find(&job.source_table_id) else {
            continue;
        };
        let source = document.read_table(table);
        let Some(cells) = source.grid.row(0) else {
            continue;
        };
        for (column, cell) in cells.iter().enumerate() {
            trace!(
                table_id = %job.source_table_id,
                column,
                header = %cell.header,
                value = redact_value(&cell.value),
                "source cell"
            );
        }
    }
}

/// Resolve every job layout into a step plan.
pub fn plan_layouts(config: &ConfigFile) -> Vec<LayoutPlan> {
    config
        .batch
        .jobs
        .iter()
        .map(|job| LayoutPlan {
            source_table_id: job.source_table_id.clone(),
            status: job.status.clone(),
            steps: plan_job(job).map_err(|error| error.to_string()),
        })
        .collect()
}

fn plan_job(job: &JobDescriptor) -> linkform_model::Result<Vec<PlanStep>> {
    let layout = job.layout_descriptor()?;
    let steps = layout.steps()?;
    Ok(steps
        .iter()
        .enumerate()
        .map(|(offset, step)| PlanStep {
            column: offset + 1,
            position: step.position,
            width: step.width,
            section: step.section.map(str::to_string),
            field: step.binding.name().to_string(),
            options: match step.binding {
                FieldBinding::Select { options, .. } => Some(options.len()),
                FieldBinding::Field { .. } => None,
            },
        })
        .collect())
}
