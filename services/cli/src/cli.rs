use crate::assign::{run_assign, AssignArgs};
use crate::generate::{run_generate, GenerateArgs};
use clap::{Parser, Subcommand};
use placement::config::AppConfig;
use placement::error::AppError;
use placement::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "placement",
    about = "Assign ranked applicants to their preferred courses",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place applicants from CSV inputs and write the assignment table (default command)
    Assign(AssignArgs),
    /// Generate synthetic course and applicant CSV files
    Generate(GenerateArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Assign(AssignArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Assign(args) => run_assign(args, config.run),
        Command::Generate(args) => run_generate(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assign_flags_parse() {
        let cli = Cli::try_parse_from([
            "placement",
            "assign",
            "--courses",
            "c.csv",
            "--stability",
            "--seed",
            "9",
            "--format",
            "json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Assign(args)) => {
                assert_eq!(args.courses.as_deref(), Some(std::path::Path::new("c.csv")));
                assert!(args.stability);
                assert_eq!(args.seed, Some(9));
            }
            other => panic!("expected assign command, got {other:?}"),
        }
    }

    #[test]
    fn generate_defaults_match_documented_knobs() {
        let cli = Cli::try_parse_from(["placement", "generate"]).expect("parses");
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.courses, 500);
                assert_eq!(args.applicants, 10_000);
                assert_eq!(args.max_prefs, 6);
            }
            other => panic!("expected generate command, got {other:?}"),
        }
    }
}
