//! Cache management CLI commands.

use std::path::Path;

use clap::Subcommand;
use geohashing::service::ServiceError;
use geohashing::store::{CacheStore, FileStore, StoreError};
use tracing::warn;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// List the cached DJIA values, oldest first
    List,
    /// Remove every cached DJIA value
    Clear,
}

/// Run a cache subcommand.
pub fn run(action: CacheAction, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(verbose)?;
    runner.log_startup("cache");

    let cache_file = runner.config().djia.cache_file.clone();

    match action {
        CacheAction::List => {
            let service = runner.create_service()?;
            let cache = service.cache();

            println!("DJIA cache: {}", cache_file.display());
            println!("  Capacity: {}", cache.capacity());
            println!("  Entries:  {}", cache.len());

            let entries = cache.entries();
            if !entries.is_empty() {
                println!();
                for (date, value) in entries {
                    println!("  {}  {}", date, value);
                }
            }
            Ok(())
        }
        CacheAction::Clear => {
            println!("Clearing DJIA cache at: {}", cache_file.display());

            match runner.create_service() {
                Ok(service) => {
                    let removed = service.cache().clear().map_err(ServiceError::from)?;
                    println!("Removed {} entries", removed);
                    Ok(())
                }
                // An unreadable file would block every other command; start over.
                Err(CliError::ServiceCreation(ServiceError::Store(StoreError::Corrupt {
                    path,
                    reason,
                }))) => {
                    warn!(path = %path.display(), reason = %reason, "Discarding unreadable DJIA cache");
                    reset_cache_file(&path)?;
                    println!("Discarded unreadable cache file ({})", reason);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// Replaces the cache file at `path` with an empty one.
fn reset_cache_file(path: &Path) -> Result<(), CliError> {
    FileStore::reset(path)
        .save()
        .map_err(|e| CliError::from(ServiceError::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geohashing::service::{GeohashConfig, HttpGeohashService};
    use tempfile::TempDir;

    #[test]
    fn test_reset_recovers_corrupt_cache() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("djia.json");
        std::fs::write(&path, "not json").unwrap();

        let config = GeohashConfig::builder().cache_file(&path).build();
        assert!(matches!(
            HttpGeohashService::from_config(&config),
            Err(ServiceError::Store(StoreError::Corrupt { .. }))
        ));

        reset_cache_file(&path).unwrap();

        let service = HttpGeohashService::from_config(&config).unwrap();
        assert!(service.cache().is_empty());
    }
}
