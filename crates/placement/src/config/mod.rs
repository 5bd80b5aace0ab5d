use std::env;
use std::fmt;
use std::path::PathBuf;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub run: RunConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let courses_csv = path_var("PLACEMENT_COURSES_CSV", "courses.csv");
        let applicants_csv = path_var("PLACEMENT_APPLICANTS_CSV", "applicants.csv");
        let output_csv = path_var("PLACEMENT_OUTPUT_CSV", "assignments.csv");

        let check_stability = match env::var("PLACEMENT_STABILITY") {
            Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                var: "PLACEMENT_STABILITY",
                value,
            })?,
            Err(_) => false,
        };

        let seed = match env::var("PLACEMENT_SEED") {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { value })?,
            ),
            Err(_) => None,
        };

        let log_level = env::var("PLACEMENT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            run: RunConfig {
                courses_csv,
                applicants_csv,
                output_csv,
                check_stability,
                seed,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// File locations and switches for one assignment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub courses_csv: PathBuf,
    pub applicants_csv: PathBuf,
    pub output_csv: PathBuf,
    pub check_stability: bool,
    /// Seed for the random-attempt rank policy. A fresh seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            courses_csv: PathBuf::from("courses.csv"),
            applicants_csv: PathBuf::from("applicants.csv"),
            output_csv: PathBuf::from("assignments.csv"),
            check_stability: false,
            seed: None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSeed { value: String },
    InvalidFlag { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSeed { value } => {
                write!(f, "PLACEMENT_SEED must be a valid u64, got '{}'", value)
            }
            ConfigError::InvalidFlag { var, value } => {
                write!(f, "{} must be true or false, got '{}'", var, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("PLACEMENT_COURSES_CSV");
        env::remove_var("PLACEMENT_APPLICANTS_CSV");
        env::remove_var("PLACEMENT_OUTPUT_CSV");
        env::remove_var("PLACEMENT_STABILITY");
        env::remove_var("PLACEMENT_SEED");
        env::remove_var("PLACEMENT_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.run, RunConfig::default());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn load_reads_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PLACEMENT_OUTPUT_CSV", "out/placed.csv");
        env::set_var("PLACEMENT_STABILITY", "YES");
        env::set_var("PLACEMENT_SEED", " 42 ");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.run.output_csv, PathBuf::from("out/placed.csv"));
        assert!(config.run.check_stability);
        assert_eq!(config.run.seed, Some(42));
    }

    #[test]
    fn load_rejects_bad_seed_and_flag() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PLACEMENT_SEED", "-5");
        let error = AppConfig::load().expect_err("negative seed");
        assert!(matches!(error, ConfigError::InvalidSeed { .. }));

        reset_env();
        env::set_var("PLACEMENT_STABILITY", "maybe");
        let error = AppConfig::load().expect_err("bad flag");
        reset_env();
        assert_eq!(
            error.to_string(),
            "PLACEMENT_STABILITY must be true or false, got 'maybe'"
        );
    }
}
