use clap::Args;
use placement::error::AppError;
use placement::workflows::synthetic::{GeneratorConfig, SyntheticDataset};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Number of distinct courses to generate
    #[arg(long, default_value_t = 500)]
    pub(crate) courses: usize,
    /// Number of applicants to generate
    #[arg(long, default_value_t = 10_000)]
    pub(crate) applicants: usize,
    /// Minimum preference-list length
    #[arg(long, default_value_t = 1)]
    pub(crate) min_prefs: usize,
    /// Maximum preference-list length
    #[arg(long, default_value_t = 6)]
    pub(crate) max_prefs: usize,
    /// Smallest course quota
    #[arg(long, default_value_t = 1)]
    pub(crate) quota_min: u32,
    /// Largest course quota
    #[arg(long, default_value_t = 200)]
    pub(crate) quota_max: u32,
    /// Mean applicant rank as a fraction of --rank
    #[arg(long, default_value_t = 0.75)]
    pub(crate) rank_mu: f64,
    /// Mean course entrance rank as a fraction of --rank
    #[arg(long, default_value_t = 0.7)]
    pub(crate) course_rank_mu: f64,
    /// Highest possible rank
    #[arg(long, default_value_t = 9950)]
    pub(crate) rank: u32,
    /// Maximum number of study attempts per applicant
    #[arg(long, default_value_t = 3)]
    pub(crate) study_attempts: usize,
    /// Seed for reproducible datasets
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Destination for the course table
    #[arg(long, default_value = "courses.csv")]
    pub(crate) course_output: PathBuf,
    /// Destination for the applicant table
    #[arg(long, default_value = "applicants.csv")]
    pub(crate) applicant_output: PathBuf,
}

impl GenerateArgs {
    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            courses: self.courses,
            applicants: self.applicants,
            min_preferences: self.min_prefs,
            max_preferences: self.max_prefs,
            quota_min: self.quota_min,
            quota_max: self.quota_max,
            rank_mean: self.rank_mu,
            course_rank_mean: self.course_rank_mu,
            highest_rank: self.rank,
            max_attempts: self.study_attempts,
            seed: self.seed,
        }
    }
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = args.generator_config();
    let dataset = SyntheticDataset::generate(&config)?;
    dataset.write_to_paths(&args.course_output, &args.applicant_output)?;

    info!(seed = dataset.seed, "finished generating data");
    println!(
        "Wrote {} courses to {} and {} applicants to {} (seed {})",
        dataset.courses.len(),
        args.course_output.display(),
        dataset.applicants.len(),
        args.applicant_output.display(),
        dataset.seed
    );
    Ok(())
}
