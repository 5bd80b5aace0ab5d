use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

use super::{IntakeError, RecordKind};
use crate::workflows::assignment::{ApplicantRecord, CourseRecord, Rank};

#[derive(Debug, Deserialize)]
struct CourseRow {
    #[serde(rename = "Course ID")]
    course_id: String,
    #[serde(rename = "Quota")]
    quota: i64,
    #[serde(rename = "Minimum Rank")]
    minimum_rank: i64,
    #[serde(rename = "Policy")]
    policy: i64,
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    #[serde(rename = "Applicant ID")]
    applicant_id: String,
    #[serde(rename = "Preferences")]
    preferences: String,
    #[serde(rename = "Rank Set")]
    rank_set: String,
}

pub(crate) fn parse_courses<R: Read>(reader: R) -> Result<Vec<CourseRecord>, IntakeError> {
    parse_rows::<_, CourseRow>(reader, RecordKind::Course)?
        .into_iter()
        .map(|(line, row)| {
            require_identifier(&row.course_id, RecordKind::Course, line)?;
            Ok(CourseRecord {
                course_id: row.course_id,
                quota: row.quota,
                minimum_rank: row.minimum_rank,
                policy: row.policy,
            })
        })
        .collect()
}

pub(crate) fn parse_applicants<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>, IntakeError> {
    parse_rows::<_, ApplicantRow>(reader, RecordKind::Applicant)?
        .into_iter()
        .map(|(line, row)| {
            require_identifier(&row.applicant_id, RecordKind::Applicant, line)?;
            let scores = split_list(&row.rank_set)
                .map(|value| {
                    value
                        .parse::<Rank>()
                        .map_err(|_| IntakeError::InvalidScore {
                            applicant: row.applicant_id.clone(),
                            line,
                            value: value.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(ApplicantRecord {
                preferences: split_list(&row.preferences).map(str::to_string).collect(),
                applicant_id: row.applicant_id,
                scores,
            })
        })
        .collect()
}

fn parse_rows<R, T>(reader: R, kind: RecordKind) -> Result<Vec<(u64, T)>, IntakeError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|source| IntakeError::Csv { kind, source })?
        .clone();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| IntakeError::Csv { kind, source })?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        let row = record
            .deserialize::<T>(Some(&headers))
            .map_err(|source| IntakeError::Row { kind, line, source })?;
        rows.push((line, row));
    }

    Ok(rows)
}

fn require_identifier(id: &str, kind: RecordKind, line: u64) -> Result<(), IntakeError> {
    if id.is_empty() {
        return Err(IntakeError::MissingIdentifier { kind, line });
    }
    Ok(())
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
pub(crate) fn split_list_for_tests(raw: &str) -> Vec<&str> {
    split_list(raw).collect()
}
