use std::path::PathBuf;

/// Server settings, read once at startup from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// redb database file (`DB_PATH`).
    pub db_path: PathBuf,
    /// Listen port (`PORT`).
    pub port: u16,
    /// Built frontend served at `/` (`DIST_DIR`).
    pub dist_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from("data/floorplans.redb"),
            port: 3000,
            dist_dir: PathBuf::from("dist"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, default = defaults.port, "invalid PORT, using default");
                defaults.port
            }),
            None => defaults.port,
        };
        Config {
            db_path: lookup("DB_PATH").map_or(defaults.db_path, PathBuf::from),
            port,
            dist_dir: lookup("DIST_DIR").map_or(defaults.dist_dir, PathBuf::from),
        }
    }
}
