use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::assignment::AssignmentRunError;
use crate::workflows::synthetic::GeneratorError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Assignment(AssignmentRunError),
    Generator(GeneratorError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Assignment(err) => write!(f, "assignment error: {}", err),
            AppError::Generator(err) => write!(f, "generator error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Assignment(err) => Some(err),
            AppError::Generator(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<AssignmentRunError> for AppError {
    fn from(value: AssignmentRunError) -> Self {
        Self::Assignment(value)
    }
}

impl From<GeneratorError> for AppError {
    fn from(value: GeneratorError) -> Self {
        Self::Generator(value)
    }
}
