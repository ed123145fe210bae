//! Per-year projections used by the multi-year loader.

use crate::record::AccidentTable;

/// A single accident reduced to the columns the summary needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthYear {
    pub month: u8,
    pub year: i32,
}

/// One year's accidents projected down to (MONTH, year).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearTable {
    pub year: i32,
    pub rows: Vec<MonthYear>,
}

impl YearTable {
    /// Tags every record of `table` with `year` and keeps only its month.
    pub fn project(year: i32, table: &AccidentTable) -> Self {
        let rows = table
            .records
            .iter()
            .map(|r| MonthYear {
                month: r.month,
                year,
            })
            .collect();
        YearTable { year, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
