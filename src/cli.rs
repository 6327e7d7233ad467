//! Command line arguments.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{City, Config};
use crate::data::{DayFilter, FilterSelection, MonthFilter};

#[derive(Parser, Debug)]
#[command(name = "bikeshare", about = "Explore US bikeshare trip data", version)]
pub struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// JSON file with `data_dir` and a `cities` table (chicago, nyc, dc)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run once for this city without prompting (chicago, nyc or dc)
    #[arg(long)]
    pub city: Option<City>,

    /// Month filter for a non-interactive run: all, january .. june
    #[arg(long, default_value = "all")]
    pub month: MonthFilter,

    /// Day filter for a non-interactive run: all, monday .. sunday
    #[arg(long, default_value = "all")]
    pub day: DayFilter,

    /// Print the report as JSON (non-interactive runs only)
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config file (if any) with `--data-dir` applied on top.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        Ok(config)
    }

    pub fn selection(&self) -> FilterSelection {
        FilterSelection::new(self.month, self.day)
    }
}
