//! CSV readers for the course and applicant tables.

mod parser;

use std::fmt;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::workflows::assignment::{ApplicantRecord, CourseRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Course,
    Applicant,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Course => f.write_str("course"),
            RecordKind::Applicant => f.write_str("applicant"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read {kind} file: {source}")]
    Io {
        kind: RecordKind,
        source: std::io::Error,
    },
    #[error("invalid {kind} CSV data: {source}")]
    Csv { kind: RecordKind, source: csv::Error },
    #[error("malformed {kind} record on line {line}: {source}")]
    Row {
        kind: RecordKind,
        line: u64,
        source: csv::Error,
    },
    #[error("{kind} record on line {line} has no identifier")]
    MissingIdentifier { kind: RecordKind, line: u64 },
    #[error("applicant '{applicant}' on line {line} has non-integer rank '{value}'")]
    InvalidScore {
        applicant: String,
        line: u64,
        value: String,
    },
}

/// Reads `Course ID,Quota,Minimum Rank,Policy` tables.
pub struct CourseIntake;

impl CourseIntake {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CourseRecord>, IntakeError> {
        let path = path.as_ref();
        info!(path = %path.display(), "reading courses");
        let file = open(path, RecordKind::Course)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CourseRecord>, IntakeError> {
        parser::parse_courses(reader)
    }
}

/// Reads `Applicant ID,Preferences,Rank Set` tables; both list columns are comma-joined.
pub struct ApplicantIntake;

impl ApplicantIntake {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicantRecord>, IntakeError> {
        let path = path.as_ref();
        info!(path = %path.display(), "reading applicants");
        let file = open(path, RecordKind::Applicant)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>, IntakeError> {
        parser::parse_applicants(reader)
    }
}

fn open(path: &Path, kind: RecordKind) -> Result<std::fs::File, IntakeError> {
    std::fs::File::open(path).map_err(|source| IntakeError::Io { kind, source })
}
