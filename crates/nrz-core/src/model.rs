//! Subject and assignment records crossing the engine boundary.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ErrorInfo;

/// Label used wherever a categorical covariate is absent.
pub const MISSING_LABEL: &str = "NA";

/// Current UTC time as RFC 3339 with microseconds and a `Z` suffix.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Normalized sex of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male.
    M,
    /// Female.
    F,
}

impl Sex {
    /// Normalizes free-form sex text.
    ///
    /// Returns `Ok(None)` for the recognized "unknown" spellings and an
    /// `invalid-sex` payload for anything that does not map to a known form.
    pub fn normalize(raw: &str) -> Result<Option<Sex>, ErrorInfo> {
        match raw.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Some(Sex::M)),
            "f" | "female" => Ok(Some(Sex::F)),
            "" | "na" | "n/a" | "none" | "unknown" | "u" | "-" => Ok(None),
            _ => Err(ErrorInfo::new("invalid-sex", format!("unrecognized sex value '{raw}'"))
                .with_context("value", raw)
                .with_hint("use M/Male, F/Female, or leave blank")),
        }
    }

    /// Canonical single letter form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::M => "M",
            Sex::F => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One experimental subject as supplied by the importer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Unique, non-empty identifier.
    pub id: String,
    /// Sex as supplied; holds `"M"`, `"F"` or `None` after validation.
    #[serde(default)]
    pub sex: Option<String>,
    /// Body weight, strictly positive when present.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Age in the unit chosen by the study.
    #[serde(default)]
    pub age: Option<f64>,
    /// Cage identifier.
    #[serde(default)]
    pub cage: Option<String>,
    /// Strain label (carried through, unused by allocation).
    #[serde(default)]
    pub strain: Option<String>,
    /// Species label (carried through, unused by allocation).
    #[serde(default)]
    pub species: Option<String>,
    /// Free-form condition notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Supplier or colony of origin.
    #[serde(default)]
    pub source: Option<String>,
    /// Arrival date, kept in its stringified form.
    #[serde(default)]
    pub arrival_date: Option<String>,
}

impl SubjectRecord {
    /// Creates a record carrying only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the sex text.
    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the age.
    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the cage identifier.
    pub fn with_cage(mut self, cage: impl Into<String>) -> Self {
        self.cage = Some(cage.into());
        self
    }

    /// Cage identifier, or [`MISSING_LABEL`] when absent or blank.
    pub fn cage_label(&self) -> &str {
        self.cage
            .as_deref()
            .filter(|cage| !cage.is_empty())
            .unwrap_or(MISSING_LABEL)
    }

    /// Sex text, or [`MISSING_LABEL`] when absent.
    pub fn sex_label(&self) -> &str {
        self.sex.as_deref().unwrap_or(MISSING_LABEL)
    }
}

/// Final group assignment for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Identifier of the assigned subject.
    pub subject_id: String,
    /// Name of the group the subject was assigned to.
    pub group: String,
}

impl AssignmentRecord {
    /// Creates a new assignment.
    pub fn new(subject_id: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            group: group.into(),
        }
    }
}

/// Descriptive metadata for the study a run belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Study identifier.
    pub study_id: String,
    /// Study title.
    pub title: String,
    /// Responsible researcher.
    pub researcher_name: String,
    /// Institution running the study.
    pub institution: String,
    /// RFC 3339 UTC creation timestamp.
    pub created_at: String,
}

impl StudyMetadata {
    /// Creates metadata stamped with the current UTC time.
    pub fn new(
        study_id: impl Into<String>,
        title: impl Into<String>,
        researcher_name: impl Into<String>,
        institution: impl Into<String>,
    ) -> Self {
        Self {
            study_id: study_id.into(),
            title: title.into(),
            researcher_name: researcher_name.into(),
            institution: institution.into(),
            created_at: utc_timestamp(),
        }
    }
}
