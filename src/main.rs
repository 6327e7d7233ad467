//! Bikeshare Explorer - interactive US bikeshare statistics
//!
//! Without `--city` the tool asks for a city and filters on the terminal;
//! with `--city` it prints one report and exits.

use anyhow::Result;
use bikeshare::cli::Cli;
use bikeshare::logging;
use bikeshare::session::{run_batch, Session};
use clap::Parser;
use log::warn;
use std::io::{self, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = cli.load_config()?;

    match cli.city {
        Some(city) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_batch(&config, city, &cli.selection(), cli.json, &mut out)?;
            out.flush()?;
        }
        None => {
            if cli.json || cli.selection() != Default::default() {
                warn!("--month, --day and --json only apply together with --city");
            }
            let stdin = io::stdin();
            let mut session = Session::new(&config, stdin.lock(), io::stdout());
            session.run()?;
        }
    }

    Ok(())
}
