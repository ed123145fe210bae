//! Row and table types for a single census file.

use serde::Deserialize;
use std::collections::BTreeSet;

/// Longitudes above this value are "unknown" sentinels.
pub const LONGITUDE_SENTINEL: f64 = 900.0;
/// Latitudes above this value are "unknown" sentinels.
pub const LATITUDE_SENTINEL: f64 = 90.0;

/// One crash event as it appears in `accident_<year>.csv.bz2`.
///
/// Only the columns this crate uses are deserialized; the rest of the
/// file's columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccidentRecord {
    #[serde(rename = "STATE")]
    pub state: i32,
    #[serde(rename = "MONTH")]
    pub month: u8,
    #[serde(rename = "LONGITUD", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "LATITUDE", default)]
    pub latitude: Option<f64>,
}

impl AccidentRecord {
    /// Longitude with the >900 sentinel mapped to `None`.
    pub fn known_longitude(&self) -> Option<f64> {
        self.longitude.filter(|lon| *lon <= LONGITUDE_SENTINEL)
    }

    /// Latitude with the >90 sentinel mapped to `None`.
    pub fn known_latitude(&self) -> Option<f64> {
        self.latitude.filter(|lat| *lat <= LATITUDE_SENTINEL)
    }
}

/// All records parsed from one file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccidentTable {
    pub records: Vec<AccidentRecord>,
}

impl AccidentTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct STATE codes present in the table, ascending.
    pub fn states(&self) -> BTreeSet<i32> {
        self.records.iter().map(|r| r.state).collect()
    }

    /// Records belonging to `state`.
    pub fn for_state(&self, state: i32) -> impl Iterator<Item = &AccidentRecord> {
        self.records.iter().filter(move |r| r.state == state)
    }
}
