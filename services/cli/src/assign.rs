use clap::{Args, ValueEnum};
use placement::config::RunConfig;
use placement::error::AppError;
use placement::workflows::assignment::{AssignmentReport, AssignmentRun};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AssignArgs {
    /// Courses CSV: Course ID, Quota, Minimum Rank, Policy
    #[arg(short, long)]
    pub(crate) courses: Option<PathBuf>,
    /// Applicants CSV: Applicant ID, Preferences, Rank Set
    #[arg(short, long)]
    pub(crate) applicants: Option<PathBuf>,
    /// Destination for the applicant-course assignment table
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
    /// Audit the settled matching for unstable assignments
    #[arg(short, long)]
    pub(crate) stability: bool,
    /// Seed for the random-attempt rank policy
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Summary format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_assign(args: AssignArgs, mut run: RunConfig) -> Result<(), AppError> {
    let AssignArgs {
        courses,
        applicants,
        output,
        stability,
        seed,
        format,
    } = args;

    if let Some(path) = courses {
        run.courses_csv = path;
    }
    if let Some(path) = applicants {
        run.applicants_csv = path;
    }
    if let Some(path) = output {
        run.output_csv = path;
    }
    run.check_stability |= stability;
    if seed.is_some() {
        run.seed = seed;
    }

    let report = AssignmentRun::execute(&run)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => render_report(&mut out, &report, &run)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render_report<W: Write>(
    out: &mut W,
    report: &AssignmentReport,
    run: &RunConfig,
) -> std::io::Result<()> {
    writeln!(out, "Placement run (seed {})", report.seed)?;
    writeln!(
        out,
        "Courses: {}, applicants: {}",
        report.courses, report.applicants
    )?;
    writeln!(
        out,
        "Placed {} applicants, {} unplaced after {} rounds ({} proposals, {} rejections)",
        report.placed, report.unplaced, report.rounds, report.proposals, report.rejections
    )?;
    writeln!(
        out,
        "Pruned {} preferences below course minimum rank",
        report.pruned_preferences
    )?;

    if let Some(stability) = &report.stability {
        writeln!(out, "Detected {} unstable cases.", stability.count())?;
        if stability.is_stable() {
            writeln!(out, "Assignment is stable.")?;
        } else {
            for violation in &stability.violations {
                writeln!(
                    out,
                    "- {} preferred {} (rank {} vs worst admitted {})",
                    violation.applicant_id,
                    violation.course_id,
                    violation.applicant_rank,
                    violation.worst_admitted_rank
                )?;
            }
            writeln!(out, "Check {} for more details.", run.output_csv.display())?;
        }
    }

    writeln!(out, "Assignments written to {}", run.output_csv.display())
}
