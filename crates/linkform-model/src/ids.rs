use std::fmt;

use crate::ModelError;

/// Job status identifier, rendered verbatim into element ids.
///
/// Hosts historically mix numeric (`4`) and textual (`"04"`) tags, so both
/// are accepted. Text tags keep their leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawStatusTag", into = "RawStatusTag")]
pub enum StatusTag {
    Text(String),
    Number(i64),
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawStatusTag {
    Number(i64),
    Text(String),
}

impl StatusTag {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return Err(ModelError::InvalidStatus(value));
        }
        Ok(Self::Text(trimmed.to_string()))
    }
}

impl From<i64> for StatusTag {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl TryFrom<RawStatusTag> for StatusTag {
    type Error = ModelError;

    fn try_from(raw: RawStatusTag) -> Result<Self, Self::Error> {
        match raw {
            RawStatusTag::Number(value) => Ok(Self::Number(value)),
            RawStatusTag::Text(value) => Self::new(value),
        }
    }
}

impl From<StatusTag> for RawStatusTag {
    fn from(tag: StatusTag) -> Self {
        match tag {
            StatusTag::Text(value) => Self::Text(value),
            StatusTag::Number(value) => Self::Number(value),
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Deterministic element identifiers for one column of one job.
#[derive(Debug, Clone, Copy)]
pub struct ElementIds<'a> {
    status: &'a StatusTag,
    index: usize,
}

impl<'a> ElementIds<'a> {
    pub fn new(status: &'a StatusTag, index: usize) -> Self {
        Self { status, index }
    }

    pub fn container(&self) -> String {
        format!("container-{}-{}", self.status, self.index)
    }

    pub fn label(&self) -> String {
        format!("p-{}-{}", self.status, self.index)
    }

    pub fn control(&self) -> String {
        format!("control-{}-{}", self.status, self.index)
    }

    pub fn section(&self) -> String {
        format!("section-{}-{}", self.status, self.index)
    }
}

/// Identifier of the form root for a status tag.
pub fn form_id(status: &StatusTag) -> String {
    format!("addedForm{status}")
}
