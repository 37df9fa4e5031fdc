use std::path::PathBuf;
use anyhow::{anyhow, Result};
use simplelog::LevelFilter;

pub const DEFAULT_STORE: &str = "gpa_ledger.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store_path: PathBuf,
    pub log_level: LevelFilter,
}

impl Config {
    // `.env` has already been loaded, so its values show up as environment variables here.
    // Flags win over the environment.
    pub fn resolve(store: Option<PathBuf>, verbose: u8) -> Result<Self> {
        let store_path = match store {
            Some(path) => path,
            None => std::env::var_os("GPA_LEDGER_STORE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE)),
        };

        let log_level = match verbose {
            0 => match std::env::var("GPA_LEDGER_LOG") {
                Ok(level) => level
                    .parse::<LevelFilter>()
                    .map_err(|_| anyhow!("GPA_LEDGER_LOG has an invalid level '{}'", level))?,
                Err(_) => LevelFilter::Warn,
            },
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Ok(Config { store_path, log_level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_take_precedence() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/mine.json")), 2).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/mine.json"));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn verbosity_saturates_at_trace() {
        let config = Config::resolve(Some(PathBuf::from("x.json")), 9).unwrap();
        assert_eq!(config.log_level, LevelFilter::Trace);
    }
}
