//! Per-job transformation of one source table into one mounted form.

use std::fmt;

use linkform_model::{FieldGroup, FormModel, JobDescriptor, LayoutDescriptor, SectionBreak};
use tracing::{debug, trace};

use crate::error::{Result, TransformError};
use crate::factory::ControlFactory;
use crate::host::{HostDocument, SourceTable};

/// Progress of a [`TableTransformer`].
///
/// `Pending → Located → Hidden → Extracted → Walking → Mounted`, with
/// `Failed` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformState {
    Pending,
    Located,
    Hidden,
    Extracted,
    Walking,
    Mounted,
    Failed,
}

impl fmt::Display for TransformState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Located => "located",
            Self::Hidden => "hidden",
            Self::Extracted => "extracted",
            Self::Walking => "walking",
            Self::Mounted => "mounted",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a mounted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSummary {
    pub form_id: String,
    pub record_id: String,
    pub fields: usize,
    pub sections: usize,
}

/// Transforms one source table according to one job.
#[derive(Debug)]
pub struct TableTransformer<'a> {
    job: &'a JobDescriptor,
    factory: &'a ControlFactory,
    layout: LayoutDescriptor,
    state: TransformState,
}

impl<'a> TableTransformer<'a> {
    /// Validate the job layout.
    ///
    /// A malformed layout is reported here, before the host is touched.
    pub fn new(job: &'a JobDescriptor, factory: &'a ControlFactory) -> Result<Self> {
        let layout = job.layout_descriptor()?;
        Ok(Self {
            job,
            factory,
            layout,
            state: TransformState::Pending,
        })
    }

    pub fn state(&self) -> TransformState {
        self.state
    }

    pub fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    /// Walk the first body row against the layout.
    ///
    /// Column 0 identifies the row and is skipped. A table without body rows
    /// yields an empty form.
    pub fn build_form(&self, table: &SourceTable) -> Result<FormModel> {
        let mut form = FormModel::new(self.job.status.clone(), table.record_id.as_str());
        let Some(cells) = table.grid.row(0) else {
            debug!(table_id = %self.job.source_table_id, "source table has no body rows");
            return Ok(form);
        };

        let mut cursor = self.layout.cursor();
        for (index, cell) in cells.iter().enumerate().skip(1) {
            let step = cursor.resolve()?;
            let built = self.factory.build(step.binding, cell, index);
            trace!(
                index,
                position = step.position,
                width = step.width,
                rule = built.rule.display_name(),
                name = %built.control.name,
                "resolved column"
            );
            form.push(FieldGroup {
                index,
                section: step.section.map(|label| SectionBreak {
                    label: label.to_string(),
                }),
                label: built.label,
                control: built.control,
            });
            cursor.advance(&step);
        }
        Ok(form)
    }

    /// Run the job against a host document.
    ///
    /// The source table stays hidden even when a later step fails. Each call
    /// appends a new form; running a job twice yields two forms.
    pub fn transform<H: HostDocument>(&mut self, host: &mut H) -> Result<MountSummary> {
        self.state = TransformState::Pending;
        let result = self.run(host);
        if result.is_err() {
            self.state = TransformState::Failed;
        }
        result
    }

    fn run<H: HostDocument>(&mut self, host: &mut H) -> Result<MountSummary> {
        let job = self.job;
        let table = host
            .find(&job.source_table_id)
            .ok_or_else(|| TransformError::SourceNotFound {
                table_id: job.source_table_id.clone(),
            })?;
        self.state = TransformState::Located;

        host.hide(table);
        self.state = TransformState::Hidden;

        let source = host.read_table(table);
        self.state = TransformState::Extracted;
        debug!(
            record_id = %source.record_id,
            columns = source.grid.width(),
            rows = source.grid.rows.len(),
            "source table extracted"
        );

        self.state = TransformState::Walking;
        let form = self.build_form(&source)?;

        let container = host.find(&job.destination_container_id).ok_or_else(|| {
            TransformError::DestinationNotFound {
                container_id: job.destination_container_id.clone(),
            }
        })?;
        host.mount(container, &form);
        self.state = TransformState::Mounted;

        Ok(MountSummary {
            form_id: form.id(),
            record_id: form.record_id.clone(),
            fields: form.groups.len(),
            sections: form.section_count(),
        })
    }
}
