mod cli;
mod commands;
mod infra;

use talent_scout::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
