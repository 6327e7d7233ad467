//! Session module - interactive prompts, report output and the raw trip viewer

mod prompt;
mod viewer;

pub use prompt::{Prompter, CONFIRM_RETRY_MESSAGE, RETRY_MESSAGE};
pub use viewer::{page_frame, PAGE_SIZE};

use anyhow::{Context, Result};
use log::{error, info};
use std::io::{BufRead, Write};

use crate::config::{City, Config};
use crate::data::{DataLoader, Dataset, DayFilter, FilterSelection, MonthFilter};
use crate::report;
use crate::stats::StatsCalculator;

/// Which time filters the user wants to answer questions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterMode {
    Month,
    Day,
    Both,
    None,
}

impl FilterMode {
    fn parse(answer: &str) -> Option<Self> {
        match answer.to_lowercase().as_str() {
            "month" => Some(FilterMode::Month),
            "day" => Some(FilterMode::Day),
            "both" => Some(FilterMode::Both),
            "none" => Some(FilterMode::None),
            _ => None,
        }
    }
}

/// One load/filter/analyze run with no prompting. Loader failures are
/// returned to the caller.
pub fn run_batch<W: Write>(
    config: &Config,
    city: City,
    selection: &FilterSelection,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let dataset = DataLoader::new(config)
        .load(city, selection)
        .with_context(|| format!("Failed to load trip data for {city}"))?;
    let stats = StatsCalculator::analyze(&dataset, selection);

    if json {
        report::write_json(out, city.key(), selection, dataset.len(), &stats)?;
    } else {
        report::write_report(out, &stats)?;
    }
    Ok(())
}

/// Interactive session: ask for filters, print statistics, offer raw data,
/// and repeat until the user declines to restart or input ends.
pub struct Session<'a, R, W> {
    config: &'a Config,
    prompter: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(config: &'a Config, input: R, output: W) -> Self {
        Self {
            config,
            prompter: Prompter::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some((city, selection)) = self.get_filters()? else {
                return Ok(());
            };
            info!("Session run: city={city} month={} day={}", selection.month, selection.day);

            match DataLoader::new(self.config).load(city, &selection) {
                Ok(dataset) => {
                    let stats = StatsCalculator::analyze(&dataset, &selection);
                    report::write_report(self.prompter.output(), &stats)?;
                    if !self.show_raw_data(&dataset)? {
                        return Ok(());
                    }
                }
                Err(err) => {
                    error!("Load failed for {city}: {err}");
                    writeln!(self.prompter.output(), "\nCould not load data for {city}: {err}")?;
                }
            }

            let restart = self
                .prompter
                .ask_free("Would you like to restart? Enter yes or no.")?;
            if restart.as_deref() != Some("yes") {
                return Ok(());
            }
        }
    }

    /// City and filter selection; `None` when input ended.
    fn get_filters(&mut self) -> Result<Option<(City, FilterSelection)>> {
        writeln!(
            self.prompter.output(),
            "Hello! Let's explore some US bikeshare data!"
        )?;

        let Some(city) = self.prompter.ask(
            "Would you like to see data for Chicago, NYC, or DC?",
            |answer| answer.parse::<City>().ok(),
        )?
        else {
            return Ok(None);
        };
        writeln!(
            self.prompter.output(),
            "Looks like you want to hear about {}!  If this is not true, restart the program now! ",
            city.key().to_uppercase()
        )?;

        let Some(mode) = self.prompter.ask(
            "Would you like to filter the data by month, day, both, or not at all? Type 'none' for no time filter.",
            FilterMode::parse,
        )?
        else {
            return Ok(None);
        };

        let month = match mode {
            FilterMode::Month | FilterMode::Both => match self.get_month()? {
                Some(month) => month,
                None => return Ok(None),
            },
            FilterMode::Day | FilterMode::None => MonthFilter::All,
        };
        let day = match mode {
            FilterMode::Day | FilterMode::Both => match self.get_day()? {
                Some(day) => day,
                None => return Ok(None),
            },
            FilterMode::Month | FilterMode::None => DayFilter::All,
        };
        if mode == FilterMode::None {
            writeln!(self.prompter.output(), "We will not filter by month or day.")?;
        }

        writeln!(self.prompter.output(), "{}", report::separator())?;
        Ok(Some((city, FilterSelection::new(month, day))))
    }

    fn get_month(&mut self) -> Result<Option<MonthFilter>> {
        let month = self.prompter.ask(
            "Which month? January, February, March, April, May, or June?",
            |answer| match answer.parse::<MonthFilter>() {
                Ok(MonthFilter::Only(month)) => Some(MonthFilter::Only(month)),
                _ => None,
            },
        )?;
        if let Some(month) = &month {
            writeln!(
                self.prompter.output(),
                "We will make sure to filter by the month of {}!",
                month.to_string().to_uppercase()
            )?;
        }
        Ok(month)
    }

    fn get_day(&mut self) -> Result<Option<DayFilter>> {
        let day = self.prompter.ask(
            "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, or Sunday?",
            |answer| match answer.parse::<DayFilter>() {
                Ok(DayFilter::Only(day)) => Some(DayFilter::Only(day)),
                _ => None,
            },
        )?;
        if let Some(day) = &day {
            writeln!(
                self.prompter.output(),
                "We will make sure to filter by the day of {}!",
                day.to_string().to_uppercase()
            )?;
        }
        Ok(day)
    }

    /// Page through raw trips on request. Returns `false` when input ended.
    fn show_raw_data(&mut self, dataset: &Dataset) -> Result<bool> {
        let mut question = "Would you like to view individual trip data? Type 'yes' or 'no'.";
        let mut offset = 0;

        loop {
            match self.prompter.confirm(question)? {
                None => return Ok(false),
                Some(false) => return Ok(true),
                Some(true) => {}
            }

            let page = page_frame(dataset, offset).context("Failed to build raw data page")?;
            let Some(page) = page else {
                writeln!(self.prompter.output(), "No more trip data to show.")?;
                return Ok(true);
            };
            writeln!(self.prompter.output(), "{page}")?;

            offset += PAGE_SIZE;
            question = "Would you like to view more data? Type 'yes' or 'no'.";
        }
    }
}
