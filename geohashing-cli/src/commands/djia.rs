//! DJIA command: print the opening value used for a date.

use geohashing::djia::cache_key;

use super::common::resolve_date;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the djia command.
pub fn run(date: Option<String>, verbose: bool) -> Result<(), CliError> {
    let date = resolve_date(date.as_deref())?;

    let runner = CliRunner::new(verbose)?;
    runner.log_startup("djia");
    let service = runner.create_service()?;

    let value = runner.block_on(service.djia_value(date))?;
    tracing::debug!(key = %cache_key(date), "DJIA value resolved");

    println!("{} {}", date, value);
    Ok(())
}
