//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [djia] section
    if let Some(section) = ini.section(Some("djia")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !is_http_url(v) {
                return Err(invalid(
                    "djia",
                    "url",
                    v,
                    "must be a URL starting with 'http://' or 'https://'",
                ));
            }
            config.djia.url = v.to_string();
        }
        if let Some(v) = section.get("timeout") {
            config.djia.timeout = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "djia",
                        "timeout",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
        if let Some(v) = section.get("cache_capacity") {
            config.djia.cache_capacity = v.trim().parse().map_err(|_| {
                invalid(
                    "djia",
                    "cache_capacity",
                    v,
                    "must be a non-negative integer (0 disables caching)",
                )
            })?;
        }
        if let Some(v) = section.get("cache_file") {
            let v = v.trim();
            if !v.is_empty() {
                config.djia.cache_file = expand_tilde(v);
            }
        }
    }

    // [geohash] section
    if let Some(section) = ini.section(Some("geohash")) {
        if let Some(v) = section.get("mode") {
            config.geohash.mode = parse_enum("geohash", "mode", v)?;
        }
    }

    // [display] section
    if let Some(section) = ini.section(Some("display")) {
        if let Some(v) = section.get("coordinates") {
            config.display.coordinates = parse_enum("display", "coordinates", v)?;
        }
        if let Some(v) = section.get("units") {
            config.display.units = parse_enum("display", "units", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Parses a value through its `FromStr` impl, reporting the impl's message.
fn parse_enum<T>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|reason: String| invalid(section, key, value, &reason))
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub(super) fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{CoordinateFormat, UnitSystem};
    use crate::search::HashMode;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = parse(
            r#"
[djia]
url = https://djia.example.org
timeout = 5
cache_capacity = 14
cache_file = /var/tmp/djia.json

[geohash]
mode = nearest

[display]
coordinates = decimal
units = imperial

[logging]
file = /var/log/geohashing.log
"#,
        )
        .unwrap();

        assert_eq!(config.djia.url, "https://djia.example.org");
        assert_eq!(config.djia.timeout, 5);
        assert_eq!(config.djia.cache_capacity, 14);
        assert_eq!(config.djia.cache_file, PathBuf::from("/var/tmp/djia.json"));
        assert_eq!(config.geohash.mode, HashMode::Nearest);
        assert_eq!(config.display.coordinates, CoordinateFormat::Decimal);
        assert_eq!(config.display.units, UnitSystem::Imperial);
        assert_eq!(config.logging.file, PathBuf::from("/var/log/geohashing.log"));
    }

    #[test]
    fn test_capacity_zero_is_accepted() {
        let config = parse("[djia]\ncache_capacity = 0\n").unwrap();
        assert_eq!(config.djia.cache_capacity, 0);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = parse("[djia]\ntimeout = 0\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "timeout"));
    }

    #[test]
    fn test_negative_capacity_is_rejected() {
        let err = parse("[djia]\ncache_capacity = -1\n").unwrap_err();
        assert!(
            matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "cache_capacity")
        );
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        let err = parse("[djia]\nurl = ftp://example.org\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "url"));
    }

    #[test]
    fn test_unknown_units_are_rejected() {
        let err = parse("[display]\nunits = furlongs\n").unwrap_err();
        assert!(err.to_string().contains("display.units"));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/djia.json");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("djia.json"));
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
