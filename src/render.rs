//! SVG map output built on `plotters`.

use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::FarsError;
use crate::state_map::{BoundingBox, MapRenderer, StatePlot};

/// Degrees added around a bounding box whose span collapses to zero.
const MIN_SPAN_PADDING: f64 = 0.5;

/// Renders a state's accidents as dots over a longitude/latitude graticule.
pub struct SvgMapRenderer {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgMapRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (1024, 768),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MapRenderer for SvgMapRenderer {
    #[tracing::instrument(skip(self, plot), fields(path = %self.path.display(), state = plot.state, year = plot.year))]
    fn render(&self, plot: &StatePlot) -> Result<(), FarsError> {
        draw(&self.path, self.size, plot).map_err(|e| FarsError::RenderFailure(e.to_string()))?;
        info!(points = plot.points().count(), "Map written");
        Ok(())
    }
}

/// Widens each axis to at least `2 * MIN_SPAN_PADDING` degrees.
fn padded(bounds: BoundingBox) -> BoundingBox {
    let widen = |lo: f64, hi: f64| {
        if hi - lo < f64::EPSILON {
            (lo - MIN_SPAN_PADDING, hi + MIN_SPAN_PADDING)
        } else {
            (lo, hi)
        }
    };
    let (west, east) = widen(bounds.west, bounds.east);
    let (south, north) = widen(bounds.south, bounds.north);
    BoundingBox {
        west,
        south,
        east,
        north,
    }
}

fn draw(
    path: &Path,
    size: (u32, u32),
    plot: &StatePlot,
) -> Result<(), Box<dyn std::error::Error>> {
    let bounds = padded(plot.bounds);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("FARS accidents: state {}, {}", plot.state, plot.year),
            ("sans-serif", 24),
        )
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(bounds.west..bounds.east, bounds.south..bounds.north)?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .x_label_formatter(&|lon| format!("{lon:.1}°"))
        .y_label_formatter(&|lat| format!("{lat:.1}°"))
        .draw()?;

    chart.draw_series(
        plot.points()
            .map(|point| Circle::new(point, 2, BLUE.mix(0.7).filled())),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_map::Location;

    fn plot(locations: Vec<Location>, bounds: BoundingBox) -> StatePlot {
        StatePlot {
            state: 1,
            year: 2013,
            locations,
            bounds,
        }
    }

    #[test]
    fn test_padded_widens_degenerate_box() {
        let b = padded(BoundingBox {
            west: -86.0,
            south: 32.0,
            east: -86.0,
            north: 32.0,
        });
        assert_eq!(b.west, -86.5);
        assert_eq!(b.east, -85.5);
        assert_eq!(b.south, 31.5);
        assert_eq!(b.north, 32.5);
    }

    #[test]
    fn test_padded_keeps_real_span() {
        let original = BoundingBox {
            west: -88.0,
            south: 30.0,
            east: -84.0,
            north: 35.0,
        };
        assert_eq!(padded(original), original);
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state_1_2013.svg");
        let renderer = SvgMapRenderer::new(&path).with_size(400, 300);

        let locations = vec![
            Location {
                longitude: Some(-88.0),
                latitude: Some(31.0),
            },
            Location {
                longitude: None,
                latitude: Some(33.0),
            },
        ];
        let bounds = BoundingBox {
            west: -88.0,
            south: 31.0,
            east: -88.0,
            north: 33.0,
        };
        renderer.render(&plot(locations, bounds)).unwrap();

        let svg = std::fs::read_to_string(renderer.path()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_render_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SvgMapRenderer::new(dir.path().join("missing/dir/map.svg"));
        let bounds = BoundingBox {
            west: 0.0,
            south: 0.0,
            east: 1.0,
            north: 1.0,
        };

        let result = renderer.render(&plot(Vec::new(), bounds));
        assert!(matches!(result, Err(FarsError::RenderFailure(_))));
    }
}
