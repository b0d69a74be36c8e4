use std::fmt;

use crate::warning::VersionWarning;

/// Numeric version fields plus the artifact type read from the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRecord {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub artifact_type: String,
}

/// One of the three numeric version components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionField {
    Major,
    Minor,
    Patch,
}

/// Direction of a single-step bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpDirection {
    Increment,
    Decrement,
}

impl VersionField {
    pub const ALL: [VersionField; 3] = [
        VersionField::Major,
        VersionField::Minor,
        VersionField::Patch,
    ];

    /// Key under which this field is stored
    pub fn key(&self) -> &'static str {
        match self {
            VersionField::Major => "major",
            VersionField::Minor => "minor",
            VersionField::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl VersionRecord {
    /// Create a record with the given numbers and artifact type
    pub fn new(major: u32, minor: u32, patch: u32, artifact_type: impl Into<String>) -> Self {
        VersionRecord {
            major,
            minor,
            patch,
            artifact_type: artifact_type.into(),
        }
    }

    pub fn get(&self, field: VersionField) -> u32 {
        match field {
            VersionField::Major => self.major,
            VersionField::Minor => self.minor,
            VersionField::Patch => self.patch,
        }
    }

    fn slot(&mut self, field: VersionField) -> &mut u32 {
        match field {
            VersionField::Major => &mut self.major,
            VersionField::Minor => &mut self.minor,
            VersionField::Patch => &mut self.patch,
        }
    }

    /// Step one field up or down.
    ///
    /// Only the named field changes; lower fields are not reset. A decrement
    /// applies while the value is above zero (so 1 -> 0 is allowed) and is
    /// refused at zero, in which case the record is untouched and a warning
    /// is returned. An increment at `u32::MAX` is refused the same way.
    pub fn bump(
        &mut self,
        field: VersionField,
        direction: BumpDirection,
    ) -> Option<VersionWarning> {
        let slot = self.slot(field);
        match direction {
            BumpDirection::Increment => match slot.checked_add(1) {
                Some(next) => {
                    *slot = next;
                    None
                }
                None => Some(VersionWarning::IncrementOverflow { field }),
            },
            BumpDirection::Decrement if *slot > 0 => {
                *slot -= 1;
                None
            }
            BumpDirection::Decrement => Some(VersionWarning::DecrementBelowZero { field }),
        }
    }

    /// `major.minor.patch` without any suffix
    pub fn base_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}
