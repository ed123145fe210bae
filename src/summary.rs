//! Month-by-year accident counts built from per-year tables.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use tracing::warn;

use crate::error::FarsError;
use crate::years::YearTable;

/// Rows of every summary, regardless of which months have data.
pub const MONTHS: RangeInclusive<u8> = 1..=12;

/// Accident counts pivoted to one row per month and one column per year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTable {
    years: Vec<i32>,
    counts: BTreeMap<(i32, u8), usize>,
}

impl SummaryTable {
    /// Distinct years present, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn months(&self) -> RangeInclusive<u8> {
        MONTHS
    }

    /// Count for one cell; `None` when no accident matched that (month, year).
    pub fn count(&self, month: u8, year: i32) -> Option<usize> {
        self.counts.get(&(year, month)).copied()
    }

    /// One cell per year column, in [`SummaryTable::years`] order.
    pub fn row(&self, month: u8) -> Vec<Option<usize>> {
        self.years.iter().map(|y| self.count(month, *y)).collect()
    }

    pub fn total(&self, year: i32) -> usize {
        MONTHS.filter_map(|m| self.count(m, year)).sum()
    }
}

/// Concatenates the tables, counts rows per (year, month), and pivots the
/// counts into a month-by-year [`SummaryTable`].
///
/// Tables for the same year add up.
///
/// # Errors
///
/// [`FarsError::AggregationError`] when `tables` is empty.
pub fn summarize(tables: impl IntoIterator<Item = YearTable>) -> Result<SummaryTable, FarsError> {
    let mut seen_table = false;
    let mut years = BTreeSet::new();
    let mut counts: BTreeMap<(i32, u8), usize> = BTreeMap::new();

    for table in tables {
        seen_table = true;
        years.insert(table.year);

        for row in &table.rows {
            if !MONTHS.contains(&row.month) {
                warn!(year = row.year, month = row.month, "Skipping row with out-of-range month");
                continue;
            }
            *counts.entry((row.year, row.month)).or_default() += 1;
        }
    }

    if !seen_table {
        return Err(FarsError::AggregationError);
    }

    Ok(SummaryTable {
        years: years.into_iter().collect(),
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::years::MonthYear;

    fn table(year: i32, months: &[u8]) -> YearTable {
        YearTable {
            year,
            rows: months.iter().map(|&month| MonthYear { month, year }).collect(),
        }
    }

    #[test]
    fn test_empty_input_is_aggregation_error() {
        let result = summarize(Vec::<YearTable>::new());
        assert!(matches!(result, Err(FarsError::AggregationError)));
    }

    #[test]
    fn test_counts_per_month_and_year() {
        let summary = summarize(vec![table(2013, &[1, 1, 2]), table(2014, &[2, 12])]).unwrap();

        assert_eq!(summary.years(), &[2013, 2014]);
        assert_eq!(summary.count(1, 2013), Some(2));
        assert_eq!(summary.count(2, 2013), Some(1));
        assert_eq!(summary.count(2, 2014), Some(1));
        assert_eq!(summary.count(12, 2014), Some(1));
    }

    #[test]
    fn test_absent_cells_are_missing_not_zero() {
        let summary = summarize(vec![table(2013, &[1])]).unwrap();
        assert_eq!(summary.count(5, 2013), None);
        assert_eq!(summary.row(5), vec![None]);
    }

    #[test]
    fn test_rows_always_cover_every_month() {
        let summary = summarize(vec![table(2015, &[3])]).unwrap();
        assert_eq!(summary.months().collect::<Vec<_>>(), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_year_table_still_adds_column() {
        let summary = summarize(vec![table(2013, &[]), table(2014, &[4])]).unwrap();
        assert_eq!(summary.years(), &[2013, 2014]);
        assert_eq!(summary.row(4), vec![None, Some(1)]);
    }

    #[test]
    fn test_duplicate_years_sum() {
        let summary = summarize(vec![table(2013, &[6, 6]), table(2013, &[6])]).unwrap();
        assert_eq!(summary.years(), &[2013]);
        assert_eq!(summary.count(6, 2013), Some(3));
        assert_eq!(summary.total(2013), 3);
    }

    #[test]
    fn test_out_of_range_months_are_dropped() {
        let summary = summarize(vec![table(2013, &[0, 13, 99, 7])]).unwrap();
        assert_eq!(summary.total(2013), 1);
    }

    #[test]
    fn test_years_sorted_regardless_of_input_order() {
        let summary = summarize(vec![table(2015, &[1]), table(2013, &[1])]).unwrap();
        assert_eq!(summary.years(), &[2013, 2015]);
    }
}
