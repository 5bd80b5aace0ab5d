mod assign;
mod cli;
mod generate;

use placement::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
