use std::io::Write;
use std::path::Path;

use super::domain::CourseKey;
use super::registry::Registry;

pub const ASSIGNMENT_HEADER: [&str; 5] = [
    "Applicant",
    "Assigned Course",
    "Applicant Rank Set",
    "Applicant Preferences",
    "Unstable Courses",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write assignments: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush assignments: {0}")]
    Io(#[from] std::io::Error),
}

/// Write one row per applicant, in input order.
pub fn write_assignments<W: Write>(registry: &Registry, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ASSIGNMENT_HEADER)?;

    for (_, applicant) in registry.applicants() {
        let scores = applicant
            .scores()
            .iter()
            .map(|score| score.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        csv_writer.write_record([
            applicant.id(),
            registry.course(applicant.assigned()).id(),
            scores.as_str(),
            course_ids(registry, applicant.preferences()).as_str(),
            course_ids(registry, applicant.unstable_courses()).as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_assignments_to_path<P: AsRef<Path>>(
    registry: &Registry,
    path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_assignments(registry, file)
}

fn course_ids(registry: &Registry, courses: &[CourseKey]) -> String {
    courses
        .iter()
        .map(|&course| registry.course(course).id())
        .collect::<Vec<_>>()
        .join(" ")
}
