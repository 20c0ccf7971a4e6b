#![forbid(unsafe_code)]

mod error;
mod log;
mod monitor;
mod report;
mod target;

pub use error::Error;
pub use log::{DEFAULT_MAX_BYTES, Log};
pub use monitor::Monitor;
pub use report::{ConnectionReport, SocketScope};
pub use target::Target;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use toml_edit::{DocumentMut, Item, Table};

/// Everything procwatch reads from its TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub target: Target,
    pub monitor: Monitor,
    pub log: Log,
}

impl Config {
    /// Read one file. Absent sections and keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        fs::write(path, toml_edit::ser::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Layer several files on top of each other. Files that do not exist are
    /// skipped; for keys present in more than one file the last one wins,
    /// arrays included.
    pub fn load_multiple<T, U>(paths: U) -> Result<Self, Error>
    where
        T: AsRef<Path>,
        U: IntoIterator<Item = T>,
    {
        let mut layered = DocumentMut::new();
        for path in paths.into_iter().filter(|path| path.as_ref().exists()) {
            let layer = fs::read_to_string(path)?.parse::<DocumentMut>()?;
            overlay(layered.as_table_mut(), layer.as_table());
        }
        Self::from_toml(&layered.to_string())
    }

    fn from_toml(text: &str) -> Result<Self, Error> {
        let mut config: Config = toml_edit::de::from_str(text)?;
        config.apply_defaults();
        Ok(config)
    }

    /// Reject values the observer cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.monitor.interval.is_zero() {
            return Err(Error::ZeroInterval);
        }
        if self.log.max_bytes == 0 {
            return Err(Error::ZeroLogBound);
        }
        Ok(())
    }

    /// Normalize values after they were changed outside of [`Config::load`],
    /// e.g. by command line overrides.
    pub fn apply_defaults(&mut self) {
        self.target.normalize();
    }
}

/// Copy `upper` into `lower`, descending into tables present on both sides.
fn overlay(lower: &mut Table, upper: &Table) {
    for (key, item) in upper.iter() {
        match (lower.get_mut(key), item) {
            (Some(Item::Table(below)), Item::Table(above)) => overlay(below, above),
            _ => {
                lower.insert(key, item.clone());
            }
        }
    }
}
