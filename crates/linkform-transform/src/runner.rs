//! Batch execution of transformation jobs.

use linkform_model::{BatchConfig, StatusTag};
use tracing::{debug, info, info_span, warn};

use crate::error::Result;
use crate::factory::ControlFactory;
use crate::host::HostDocument;
use crate::transformer::{MountSummary, TableTransformer};

/// Outcome of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub source_table_id: String,
    pub destination_container_id: String,
    pub status: StatusTag,
    pub result: Result<MountSummary>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in job declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<JobOutcome>,
    /// Section ids that received their hidden class.
    pub hidden_applied: Vec<String>,
    /// Section ids that were absent from the document.
    pub hidden_skipped: Vec<String>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|outcome| !outcome.is_success())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Runs every job of a [`BatchConfig`] against one host document.
#[derive(Debug, Clone, Default)]
pub struct TransformRunner {
    config: BatchConfig,
    factory: ControlFactory,
}

impl TransformRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            factory: ControlFactory::default(),
        }
    }

    pub fn with_factory(mut self, factory: ControlFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run jobs sequentially, then apply the default-hidden directives.
    ///
    /// A failing job is recorded and logged; it never stops later jobs.
    pub fn run<H: HostDocument>(&self, host: &mut H) -> RunReport {
        let batch_span = info_span!("batch", jobs = self.config.jobs.len());
        let _batch_guard = batch_span.enter();

        let mut report = RunReport::default();
        for job in &self.config.jobs {
            let job_span = info_span!(
                "job",
                table_id = %job.source_table_id,
                status = %job.status
            );
            let _job_guard = job_span.enter();

            let result = TableTransformer::new(job, &self.factory)
                .and_then(|mut transformer| transformer.transform(host));
            match &result {
                Ok(summary) => info!(
                    form_id = %summary.form_id,
                    record_id = %summary.record_id,
                    fields = summary.fields,
                    sections = summary.sections,
                    "form mounted"
                ),
                Err(error) => warn!(
                    kind = error.kind(),
                    error = %error,
                    "job failed"
                ),
            }
            report.outcomes.push(JobOutcome {
                source_table_id: job.source_table_id.clone(),
                destination_container_id: job.destination_container_id.clone(),
                status: job.status.clone(),
                result,
            });
        }

        for directive in &self.config.default_hidden {
            match host.find(&directive.section_id) {
                Some(section) => {
                    host.add_class(section, &directive.class_name);
                    report.hidden_applied.push(directive.section_id.clone());
                }
                None => {
                    debug!(section_id = %directive.section_id, "hidden section not found");
                    report.hidden_skipped.push(directive.section_id.clone());
                }
            }
        }

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch complete"
        );
        report
    }
}
