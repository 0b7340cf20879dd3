//! Batch configuration: transformation jobs and default-hidden directives.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::StatusTag;
use crate::layout::{LayoutDescriptor, RawLayoutEntry};

/// One source-table-to-destination transformation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Id of the table to read and hide.
    pub source_table_id: String,
    /// Id of the container that receives the form.
    pub destination_container_id: String,
    pub status: StatusTag,
    pub layout: Vec<RawLayoutEntry>,
}

impl JobDescriptor {
    /// Validate the layout; errors stay local to this job.
    pub fn layout_descriptor(&self) -> Result<LayoutDescriptor> {
        LayoutDescriptor::new(self.layout.iter().cloned())
    }
}

fn default_hidden_class() -> String {
    "hidden".to_string()
}

/// Adds a suppression class to a section once all jobs have run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenDirective {
    pub section_id: String,
    #[serde(default = "default_hidden_class")]
    pub class_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub jobs: Vec<JobDescriptor>,
    #[serde(default)]
    pub default_hidden: Vec<HiddenDirective>,
}

impl BatchConfig {
    pub fn new(jobs: Vec<JobDescriptor>) -> Self {
        Self {
            jobs,
            default_hidden: Vec::new(),
        }
    }

    pub fn with_hidden(mut self, directives: Vec<HiddenDirective>) -> Self {
        self.default_hidden = directives;
        self
    }
}
