//! Configuration Module
//! City-to-file table and data directory, loadable from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::data::SelectorError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The three cities with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "nyc")]
    NewYorkCity,
    #[serde(rename = "dc")]
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Short key typed by the user.
    pub fn key(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "nyc",
            City::Washington => "dc",
        }
    }

    fn default_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for City {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.key() == key)
            .ok_or_else(|| SelectorError::UnknownCity(s.trim().to_string()))
    }
}

/// Immutable mapping from city to its CSV file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityTable {
    files: BTreeMap<City, String>,
}

impl Default for CityTable {
    fn default() -> Self {
        Self {
            files: City::ALL
                .into_iter()
                .map(|city| (city, city.default_file().to_string()))
                .collect(),
        }
    }
}

impl CityTable {
    /// File name for a city, falling back to the built-in name when the
    /// table was loaded without an entry for it.
    pub fn file_name(&self, city: City) -> &str {
        self.files
            .get(&city)
            .map(String::as_str)
            .unwrap_or_else(|| city.default_file())
    }

    pub fn resolve(&self, data_dir: &Path, city: City) -> PathBuf {
        data_dir.join(self.file_name(city))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub cities: CityTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            cities: CityTable::default(),
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path of the trip file for `city`.
    pub fn source_path(&self, city: City) -> PathBuf {
        self.cities.resolve(&self.data_dir, city)
    }
}
