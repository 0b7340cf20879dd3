//! Layout-driven transformation of linked record tables into forms.
//!
//! - **rules**: label rewrites and naming heuristics as data
//! - **normalization**: raw-value cleanup for date fields
//! - **factory**: ordered control-kind rules
//! - **host**: host document capability and form rendering
//! - **transformer**: per-job state machine
//! - **runner**: batch execution with per-job error boundaries

pub mod error;
pub mod factory;
pub mod host;
pub mod normalization;
pub mod rules;
pub mod runner;
pub mod transformer;

pub use error::{Result, TransformError};
pub use factory::{BuiltField, ControlFactory, ControlRule};
pub use host::{HostDocument, SourceTable, render_form};
pub use rules::{ControlRules, LabelRewrite};
pub use runner::{JobOutcome, RunReport, TransformRunner};
pub use transformer::{MountSummary, TableTransformer, TransformState};
