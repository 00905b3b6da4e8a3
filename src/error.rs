use mazecore::{maze::GeneratorError, solver::SolveError};
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("cannot write to stdout: {0}")]
    Io(#[from] std::io::Error),
}
