//! Nearest-cell lookup from longitude/latitude to grid indices.

use crate::data::GeoSlice;

/// Nearest-neighbour index along one coordinate axis.
#[derive(Debug, Clone)]
pub struct AxisLookup {
    /// Coordinate values sorted ascending, with their original index.
    sorted: Vec<(f64, usize)>,
    /// How far past the first/last coordinate a point still belongs to the grid.
    half_step: f64,
}

impl AxisLookup {
    /// Build a lookup over coordinate values in any order.
    pub fn new(values: &[f64]) -> Self {
        let mut sorted: Vec<(f64, usize)> = values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| (v, i))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let half_step = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) if sorted.len() > 1 => {
                (last.0 - first.0) / (sorted.len() - 1) as f64 / 2.0
            },
            _ => 0.5,
        };

        Self { sorted, half_step }
    }

    /// Index of the nearest coordinate and its distance, or `None` when the
    /// value lies outside the axis coverage.
    pub fn nearest(&self, value: f64) -> Option<(usize, f64)> {
        let first = self.sorted.first()?.0;
        let last = self.sorted.last()?.0;
        if !value.is_finite() || value < first - self.half_step || value > last + self.half_step {
            return None;
        }

        let pos = self.sorted.partition_point(|&(v, _)| v < value);
        let below = pos.checked_sub(1).map(|i| self.sorted[i]);
        let above = self.sorted.get(pos).copied();

        let best = match (below, above) {
            (Some(b), Some(a)) => {
                if (value - b.0).abs() <= (a.0 - value).abs() {
                    b
                } else {
                    a
                }
            },
            (Some(b), None) => b,
            (None, Some(a)) => a,
            (None, None) => return None,
        };

        Some((best.1, (value - best.0).abs()))
    }
}

/// Maps geographic positions onto a slice's rows and columns.
///
/// Longitudes are matched modulo 360°, so a grid stored as 0..360 answers
/// queries made in -180..180 and the other way round.
#[derive(Debug, Clone)]
pub struct GridLookup {
    lat: AxisLookup,
    lon: AxisLookup,
}

impl GridLookup {
    /// Build a lookup for a slice's coordinates.
    pub fn new(slice: &GeoSlice) -> Self {
        Self {
            lat: AxisLookup::new(&slice.latitudes),
            lon: AxisLookup::new(&slice.longitudes),
        }
    }

    /// Row and column of the cell containing a point.
    pub fn index(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        let (row, _) = self.lat.nearest(lat)?;
        let (col, _) = [lon, lon - 360.0, lon + 360.0]
            .into_iter()
            .filter_map(|candidate| self.lon.nearest(candidate))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        Some((row, col))
    }

    /// Value of the cell containing a point.
    pub fn sample(&self, slice: &GeoSlice, lon: f64, lat: f64) -> Option<f64> {
        self.index(lon, lat)
            .and_then(|(row, col)| slice.value(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TimeLabel;
    use ndarray::Array2;

    fn grid(lats: Vec<f64>, lons: Vec<f64>) -> GeoSlice {
        let rows = lats.len();
        let cols = lons.len();
        let values = Array2::from_shape_fn((rows, cols), |(r, c)| (r * 100 + c) as f64);
        GeoSlice::from_parts("sst", TimeLabel::for_index(0), lats, lons, values).unwrap()
    }

    #[test]
    fn test_axis_nearest_ascending() {
        let axis = AxisLookup::new(&[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(axis.nearest(0.0).map(|r| r.0), Some(0));
        assert_eq!(axis.nearest(2.9).map(|r| r.0), Some(1));
        assert_eq!(axis.nearest(3.1).map(|r| r.0), Some(2));
        assert_eq!(axis.nearest(6.9).map(|r| r.0), Some(3));
        assert_eq!(axis.nearest(7.1), None);
        assert_eq!(axis.nearest(-1.1), None);
    }

    #[test]
    fn test_axis_nearest_descending() {
        let axis = AxisLookup::new(&[88.0, 86.0, 84.0]);
        assert_eq!(axis.nearest(88.5).map(|r| r.0), Some(0));
        assert_eq!(axis.nearest(84.2).map(|r| r.0), Some(2));
        assert_eq!(axis.nearest(f64::NAN), None);
    }

    #[test]
    fn test_longitude_wraps_for_0_360_grid() {
        let lons: Vec<f64> = (0..180).map(|i| i as f64 * 2.0).collect();
        let slice = grid(vec![-1.0, 1.0], lons);
        let lookup = GridLookup::new(&slice);

        // -170 is 190 in a 0..360 grid.
        assert_eq!(lookup.index(-170.0, 0.5), Some((1, 95)));
        // Just west of the seam wraps to column 0.
        assert_eq!(lookup.index(359.5, 0.5), Some((1, 0)));
        assert_eq!(lookup.index(-0.4, -0.5), Some((0, 0)));
    }

    #[test]
    fn test_regional_grid_has_no_coverage_outside() {
        let slice = grid(vec![10.0, 20.0], vec![100.0, 110.0, 120.0]);
        let lookup = GridLookup::new(&slice);
        assert_eq!(lookup.index(0.0, 15.0), None);
        assert_eq!(lookup.index(110.0, 40.0), None);
        assert_eq!(lookup.sample(&slice, 111.0, 19.0), Some(101.0));
    }
}
