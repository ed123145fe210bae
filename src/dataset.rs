//! A directory of yearly census files and the operations over it.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::FarsError;
use crate::filename::{filename_for, parse_year};
use crate::loader::read;
use crate::record::AccidentTable;
use crate::state_map::{MapOutcome, MapRenderer, plot_state};
use crate::summary::{SummaryTable, summarize};
use crate::years::YearTable;

/// Handle on the directory holding `accident_<year>.csv.bz2` files.
#[derive(Debug, Clone)]
pub struct FarsData {
    dir: PathBuf,
}

impl Default for FarsData {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FarsData {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file for `year`.
    pub fn path_for(&self, year: impl Display) -> Result<PathBuf, FarsError> {
        Ok(self.dir.join(filename_for(year)?))
    }

    /// Loads the complete table for one year.
    pub fn read_year(&self, year: impl Display) -> Result<AccidentTable, FarsError> {
        read(self.path_for(year)?)
    }

    /// Loads each year and projects it to (MONTH, year), keeping every
    /// failure in its slot.
    #[tracing::instrument(skip(self, years), fields(dir = %self.dir.display()))]
    pub fn try_read_years<Y: Display>(
        &self,
        years: impl IntoIterator<Item = Y>,
    ) -> Vec<Result<YearTable, FarsError>> {
        years
            .into_iter()
            .map(|year| -> Result<YearTable, FarsError> {
                let year = parse_year(year)?;
                let table = self.read_year(year)?;
                Ok(YearTable::project(year, &table))
            })
            .collect()
    }

    /// Like [`FarsData::try_read_years`], but each failed year logs
    /// `invalid year: <year>` and becomes `None`.
    pub fn read_years<Y: Display>(&self, years: impl IntoIterator<Item = Y>) -> Vec<Option<YearTable>> {
        let years: Vec<String> = years.into_iter().map(|y| y.to_string()).collect();

        self.try_read_years(&years)
            .into_iter()
            .zip(&years)
            .map(|(result, year)| match result {
                Ok(table) => {
                    debug!(year = table.year, rows = table.len(), "Year loaded");
                    Some(table)
                }
                Err(e) => {
                    warn!(error = %e, "invalid year: {}", year);
                    None
                }
            })
            .collect()
    }

    /// Counts accidents per month for each readable year.
    ///
    /// # Errors
    ///
    /// [`FarsError::AggregationError`] if none of `years` could be read.
    #[tracing::instrument(skip(self, years))]
    pub fn summarize_years<Y: Display>(
        &self,
        years: impl IntoIterator<Item = Y>,
    ) -> Result<SummaryTable, FarsError> {
        summarize(self.read_years(years).into_iter().flatten())
    }

    /// Plots the accidents of `state_code` in `year` through `renderer`.
    ///
    /// Load failures and unknown state codes propagate. A state with
    /// nothing to draw returns [`MapOutcome::NothingToPlot`] without calling
    /// the renderer.
    #[tracing::instrument(skip(self, state_code, year, renderer), fields(state = %state_code, year = %year))]
    pub fn map_state(
        &self,
        state_code: impl Display,
        year: impl Display,
        renderer: &impl MapRenderer,
    ) -> Result<MapOutcome, FarsError> {
        let year = parse_year(year)?;
        let table = self.read_year(year)?;

        match plot_state(&table, state_code, year)? {
            Some(plot) => {
                renderer.render(&plot)?;
                Ok(MapOutcome::Plotted(plot))
            }
            None => Ok(MapOutcome::NothingToPlot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_joins_dir() {
        let data = FarsData::new("/data/fars");
        assert_eq!(
            data.path_for("2014").unwrap(),
            Path::new("/data/fars/accident_2014.csv.bz2")
        );
    }

    #[test]
    fn test_invalid_year_keeps_its_slot() {
        let data = FarsData::new("/nonexistent");
        let results = data.try_read_years(["x", "2013"]);

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(FarsError::InvalidYear(_))));
        assert!(matches!(results[1], Err(FarsError::FileNotFound(_))));
    }

    #[test]
    fn test_read_years_turns_failures_into_none() {
        let data = FarsData::new("/nonexistent");
        assert_eq!(data.read_years([2013, 2014]), vec![None, None]);
    }

    #[test]
    fn test_summarize_with_no_valid_years_fails() {
        let data = FarsData::new("/nonexistent");
        assert!(matches!(
            data.summarize_years(["abc", "9999"]),
            Err(FarsError::AggregationError)
        ));
    }
}
