//! Common types and utilities shared across CLI commands.

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use geohashing::search::HashMode;

use crate::error::CliError;

/// Hash mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Hash in the graticule containing the position
    Current,
    /// Closest hash among the containing graticule and its 8 neighbours
    Nearest,
}

impl From<ModeArg> for HashMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Current => HashMode::CurrentGraticule,
            ModeArg::Nearest => HashMode::Nearest,
        }
    }
}

/// Resolve the hash mode from CLI args and config.
pub fn resolve_mode(cli_mode: Option<ModeArg>, configured: HashMode) -> HashMode {
    cli_mode.map(HashMode::from).unwrap_or(configured)
}

/// Parse a `YYYY-MM-DD` date argument, defaulting to today's local date.
pub fn resolve_date(arg: Option<&str>) -> Result<NaiveDate, CliError> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
            CliError::InvalidArgument(format!("date '{}' is not YYYY-MM-DD: {}", s, e))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_mode_prefers_cli() {
        assert_eq!(
            resolve_mode(Some(ModeArg::Nearest), HashMode::CurrentGraticule),
            HashMode::Nearest
        );
        assert_eq!(resolve_mode(None, HashMode::Nearest), HashMode::Nearest);
    }

    #[test]
    fn test_resolve_date() {
        assert_eq!(
            resolve_date(Some("2008-05-27")).unwrap(),
            NaiveDate::from_ymd_opt(2008, 5, 27).unwrap()
        );
        assert!(resolve_date(Some("27/05/2008")).is_err());
        assert_eq!(resolve_date(None).unwrap(), Local::now().date_naive());
    }
}
