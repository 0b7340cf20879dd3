pub mod error;
pub mod form;
pub mod ids;
pub mod job;
pub mod layout;

pub use error::{LayoutFault, ModelError, Result};
pub use form::{
    CALENDAR_PATTERN, Control, ControlKind, FieldGroup, FormModel, PresentationTag, SectionBreak,
};
pub use ids::{ElementIds, StatusTag, form_id};
pub use job::{BatchConfig, HiddenDirective, JobDescriptor};
pub use layout::{
    FieldBinding, LayoutCursor, LayoutDescriptor, LayoutEntry, RawLayoutEntry, ResolvedStep,
    SELECT_MARKER,
};
