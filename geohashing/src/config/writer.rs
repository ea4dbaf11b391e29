//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[djia]
; Base URL of the DJIA opening value service, queried as <url>/<year>/<month>/<day>
url = {}
; Timeout in seconds for a single DJIA request (default: 10)
timeout = {}
; Number of DJIA values kept for offline use (default: 7, 0 disables the cache)
cache_capacity = {}
; File the DJIA cache is persisted to
cache_file = {}

[geohash]
; Which graticule to hash:
;   current - the graticule containing the position (default)
;   nearest - the closest hash among the containing graticule and its 8 neighbours
mode = {}

[display]
; Coordinate format: dms (N37°51'28", W122°32'40") or decimal (37.858°, -122.545°)
coordinates = {}
; Distance units: metric (km) or imperial (mi)
units = {}

[logging]
; Log file location
file = {}
"#,
        config.djia.url,
        config.djia.timeout,
        config.djia.cache_capacity,
        path_to_string(&config.djia.cache_file),
        config.geohash.mode,
        config.display.coordinates,
        config.display.units,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing the home directory to `~`.
pub(super) fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
