use thiserror::Error;

/// Why a layout descriptor was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutFault {
    #[error("select options table is not preceded by `next_is_select`")]
    OrphanedSelectSpec,
    #[error("`next_is_select` is not followed by a select options table")]
    MissingSelectSpec,
    #[error("select options table must have exactly one field name, found {0}")]
    SelectSpecKeys(usize),
    #[error("section break is not followed by a field")]
    SectionWithoutField,
    #[error("layout is shorter than the source column count")]
    ShorterThanSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("malformed layout at position {position}: {fault}")]
    MalformedLayout { position: usize, fault: LayoutFault },
    #[error("invalid status tag: {0:?}")]
    InvalidStatus(String),
}

impl ModelError {
    pub(crate) fn layout(position: usize, fault: LayoutFault) -> Self {
        Self::MalformedLayout { position, fault }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
