//! Line type: a named owner of one section chain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sections::Sections;

/// Opaque identifier of a line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subway line and its sections.
#[derive(Debug, Clone)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub color: String,
    pub sections: Sections,
}

impl Line {
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        sections: Sections,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            sections,
        }
    }

    /// Update the descriptive fields, leaving the sections alone.
    pub fn rename(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.name = name.into();
        self.color = color.into();
    }
}
