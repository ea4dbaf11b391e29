//! Configuration management CLI commands.
//!
//! `config get|set|list|path` read and edit `~/.geohashing/config.ini`.
//! `set` and `list` also show how the file translates into the settings a
//! lookup actually runs with.

use std::fmt::Write as _;

use clap::Subcommand;
use geohashing::config::{config_file_path, ConfigFile, ConfigKey};
use geohashing::search::HashMode;
use geohashing::service::GeohashConfig;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Setting as section.key (e.g., djia.cache_capacity)
        key: String,
    },

    /// Change one setting and save the file
    Set {
        /// Setting as section.key (e.g., geohash.mode)
        key: String,

        /// New value
        value: String,
    },

    /// Print every setting and the resulting lookup behaviour
    List,

    /// Print the config file location
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let config = ConfigFile::load()?;
            println!("{}", parse_key(&key)?.get(&config));
        }
        ConfigCommands::Set { key, value } => {
            let mut config = ConfigFile::load()?;
            let key = apply(&mut config, &key, &value)?;
            config.save()?;
            println!("Set {} = {}", key.name(), key.get(&config));
            if let Some(effect) = effect_of(key, &GeohashConfig::from_config_file(&config)) {
                println!("  {}", effect);
            }
        }
        ConfigCommands::List => print!("{}", render_listing(&ConfigFile::load()?)),
        ConfigCommands::Path => println!("{}", config_file_path().display()),
    }
    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'geohashing config list' to see available keys.",
            key
        ))
    })
}

/// Validates and applies one setting without saving.
fn apply(config: &mut ConfigFile, key: &str, value: &str) -> Result<ConfigKey, CliError> {
    let key = parse_key(key)?;
    key.set(config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(key)
}

/// What a changed setting means for the next lookup, when that is not obvious.
fn effect_of(key: ConfigKey, runtime: &GeohashConfig) -> Option<String> {
    match key {
        ConfigKey::DjiaCacheCapacity if runtime.cache_capacity() == 0 => {
            Some("DJIA values will be fetched on every lookup and never stored".to_string())
        }
        ConfigKey::DjiaCacheCapacity => Some(format!(
            "Older entries beyond the newest {} are evicted on the next fetch",
            runtime.cache_capacity()
        )),
        ConfigKey::GeohashMode => Some(describe_mode(runtime.hash_mode()).to_string()),
        ConfigKey::DjiaUrl | ConfigKey::DjiaTimeout => Some(format!(
            "Fetching from {} with a {}s timeout",
            runtime.djia_url(),
            runtime.fetch_timeout().as_secs()
        )),
        _ => None,
    }
}

fn describe_mode(mode: HashMode) -> &'static str {
    match mode {
        HashMode::CurrentGraticule => "Hashes land in the graticule containing your position",
        HashMode::Nearest => "Hashes come from the closest of the nine surrounding graticules",
    }
}

/// Renders the file's settings by section, then the effective lookup settings.
fn render_listing(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut section = "";

    for key in ConfigKey::all() {
        if key.section() != section {
            if !section.is_empty() {
                out.push('\n');
            }
            section = key.section();
            let _ = writeln!(out, "[{}]", section);
        }
        let _ = writeln!(out, "  {} = {}", key.key_name(), key.get(config));
    }

    let runtime = GeohashConfig::from_config_file(config);
    let storage = match (runtime.cache_capacity(), runtime.cache_file()) {
        (0, _) => "disabled".to_string(),
        (n, Some(path)) => format!("{} values in {}", n, path.display()),
        (n, None) => format!("{} values in memory", n),
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "Effective lookup settings");
    let _ = writeln!(out, "  DJIA source: {}", runtime.djia_url());
    let _ = writeln!(out, "  Timeout:     {}s", runtime.fetch_timeout().as_secs());
    let _ = writeln!(out, "  Cache:       {}", storage);
    let _ = writeln!(out, "  Mode:        {}", describe_mode(runtime.hash_mode()));
    out
}
