//! Accident locations for one state in one year.

use std::fmt::Display;
use tracing::{debug, info};

use crate::error::FarsError;
use crate::filename::coerce_integer;
use crate::record::AccidentTable;

/// A geographic bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Smallest box covering the non-missing longitudes and latitudes,
    /// each range taken independently. `None` if either axis has no values.
    pub fn covering(longitudes: &[f64], latitudes: &[f64]) -> Option<Self> {
        let (west, east) = min_max(longitudes)?;
        let (south, north) = min_max(latitudes)?;
        Some(BoundingBox {
            west,
            south,
            east,
            north,
        })
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
    )
}

/// One accident location after sentinel values were mapped to `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

/// Everything a renderer needs to draw one state's accidents.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePlot {
    pub state: i32,
    pub year: i32,
    pub locations: Vec<Location>,
    pub bounds: BoundingBox,
}

impl StatePlot {
    /// Locations with both coordinates known, as `(longitude, latitude)`.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.locations
            .iter()
            .filter_map(|loc| Some((loc.longitude?, loc.latitude?)))
    }
}

/// Result of a successful `map_state` call.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    Plotted(StatePlot),
    /// The state had no rows (or no usable coordinates); nothing was drawn.
    NothingToPlot,
}

/// Draws a [`StatePlot`] somewhere: a file, a window, a test recorder.
pub trait MapRenderer {
    fn render(&self, plot: &StatePlot) -> Result<(), FarsError>;
}

/// Filters `table` down to `state_code` and prepares its plot.
///
/// Returns `Ok(None)` when there is nothing to draw.
///
/// # Errors
///
/// [`FarsError::InvalidStateNumber`] if the code is not an integer or does
/// not occur in the table's STATE column.
pub fn plot_state(
    table: &AccidentTable,
    state_code: impl Display,
    year: i32,
) -> Result<Option<StatePlot>, FarsError> {
    let raw = state_code.to_string();
    let state = coerce_integer(&raw)
        .filter(|s| table.states().contains(s))
        .ok_or(FarsError::InvalidStateNumber(raw))?;

    let locations: Vec<Location> = table
        .for_state(state)
        .map(|r| Location {
            longitude: r.known_longitude(),
            latitude: r.known_latitude(),
        })
        .collect();

    let longitudes: Vec<f64> = locations.iter().filter_map(|l| l.longitude).collect();
    let latitudes: Vec<f64> = locations.iter().filter_map(|l| l.latitude).collect();
    let has_point = locations
        .iter()
        .any(|l| l.longitude.is_some() && l.latitude.is_some());

    let bounds = match BoundingBox::covering(&longitudes, &latitudes) {
        Some(bounds) if has_point => bounds,
        _ => {
            info!(state, year, rows = locations.len(), "no accidents to plot");
            return Ok(None);
        }
    };

    let plot = StatePlot {
        state,
        year,
        locations,
        bounds,
    };
    debug!(state, year, rows = plot.locations.len(), ?bounds, "State plot prepared");
    Ok(Some(plot))
}
