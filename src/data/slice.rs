//! Time slice selection.

use super::reader::attr_value_to_f64;
use super::time::{TimeAxis, TimeLabel};
use super::{Dataset, DatasetLayout};
use crate::error::{Result, SstError};
use ndarray::Array2;
use netcdf::types::{FloatType, IntType, NcVariableType};

/// One time step of a gridded variable, shaped (latitude, longitude).
#[derive(Debug, Clone, PartialEq)]
pub struct GeoSlice {
    /// Source variable name.
    pub variable: String,
    /// The `long_name` attribute of the source variable.
    pub long_name: Option<String>,
    /// The `units` attribute of the source variable.
    pub units: Option<String>,
    /// Which time step this is.
    pub time: TimeLabel,
    /// Latitude of each row.
    pub latitudes: Vec<f64>,
    /// Longitude of each column.
    pub longitudes: Vec<f64>,
    /// Decoded values; missing cells are NaN.
    pub values: Array2<f64>,
}

impl GeoSlice {
    /// Build a slice from a grid and its coordinates.
    ///
    /// Coordinate lengths must match the grid's rows and columns.
    pub fn from_parts(
        variable: impl Into<String>,
        time: TimeLabel,
        latitudes: Vec<f64>,
        longitudes: Vec<f64>,
        values: Array2<f64>,
    ) -> Result<Self> {
        let variable = variable.into();
        let (rows, cols) = values.dim();
        if latitudes.len() != rows || longitudes.len() != cols {
            return Err(SstError::layout(
                variable,
                format!(
                    "grid is {}x{} but coordinates are {}x{}",
                    rows,
                    cols,
                    latitudes.len(),
                    longitudes.len()
                ),
            ));
        }

        Ok(Self {
            variable,
            long_name: None,
            units: None,
            time,
            latitudes,
            longitudes,
            values,
        })
    }

    /// Grid shape as (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Value at a row and column.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    /// Smallest and largest finite values.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    /// Count of finite values.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }
}

impl Dataset {
    /// Select one time step of the layout's gridded variable.
    ///
    /// The index is positional: 0 is the first stored step. Only that step
    /// is read. An index past the end is reported before any data is read.
    pub fn select_time(&self, layout: &DatasetLayout, index: usize) -> Result<GeoSlice> {
        let info = self
            .variable(&layout.variable)
            .ok_or_else(|| SstError::variable_not_found(&layout.variable))?;

        if info.ndim() != 3 {
            return Err(SstError::layout(
                &info.name,
                format!("expected 3 dimensions, found {:?}", info.dims),
            ));
        }
        if info.dims[0] != layout.time_dim {
            return Err(SstError::layout(
                &info.name,
                format!("first dimension must be '{}', found '{}'", layout.time_dim, info.dims[0]),
            ));
        }

        let lon_first = if info.dims[1] == layout.lat_dim && info.dims[2] == layout.lon_dim {
            false
        } else if info.dims[1] == layout.lon_dim && info.dims[2] == layout.lat_dim {
            true
        } else {
            return Err(SstError::layout(
                &info.name,
                format!(
                    "expected '{}' and '{}' after time, found {:?}",
                    layout.lat_dim, layout.lon_dim, &info.dims[1..]
                ),
            ));
        };

        let len = info.shape[0];
        if index >= len {
            return Err(SstError::TimeIndexOutOfRange { index, len });
        }

        let var = self
            .file
            .variable(&info.name)
            .ok_or_else(|| SstError::variable_not_found(&info.name))?;

        tracing::info!(variable = %info.name, index, "Selecting time slice");

        let values = read_values(&var, (index, .., ..))?;
        let grid = Array2::from_shape_vec((info.shape[1], info.shape[2]), values)
            .map_err(|e| SstError::NetCDF(format!("Invalid shape/data size: {}", e)))?;
        let mut grid = if lon_first {
            tracing::debug!("Transposing longitude-first grid");
            grid.reversed_axes()
        } else {
            grid
        };

        decode_cf(&var, &mut grid);

        let (rows, cols) = grid.dim();
        let latitudes = self.coordinate(&layout.lat_dim, rows)?;
        let longitudes = self.coordinate(&layout.lon_dim, cols)?;

        Ok(GeoSlice {
            variable: info.name.clone(),
            long_name: info.long_name().map(str::to_string),
            units: info.units().map(str::to_string),
            time: self.time_label(layout, index),
            latitudes,
            longitudes,
            values: grid,
        })
    }

    /// Values of a 1-D coordinate variable, or `0..len` when it is absent.
    fn coordinate(&self, dim: &str, len: usize) -> Result<Vec<f64>> {
        match self.file.variable(dim) {
            Some(var) if var.dimensions().len() == 1 && var.dimensions()[0].len() == len => {
                read_values(&var, ..)
            },
            _ => {
                tracing::warn!(dim, "No coordinate variable, using array indices");
                Ok((0..len).map(|i| i as f64).collect())
            },
        }
    }

    /// Month label for an index, with the averaging interval when the
    /// time bounds variable is present and its units decode.
    fn time_label(&self, layout: &DatasetLayout, index: usize) -> TimeLabel {
        let label = TimeLabel::for_index(index);

        let Some(bounds_var) = self.file.variable(&layout.time_bounds) else {
            return label;
        };
        if bounds_var.dimensions().len() != 2 {
            return label;
        }

        // CF bounds usually inherit units from their coordinate variable.
        let units = self
            .variable(&layout.time_bounds)
            .and_then(|v| v.units())
            .or_else(|| self.variable(&layout.time_dim).and_then(|v| v.units()));
        let Some(axis) = units.and_then(TimeAxis::parse) else {
            return label;
        };

        let bounds = match read_values(&bounds_var, (index, ..)) {
            Ok(bounds) => bounds,
            Err(e) => {
                tracing::warn!("Failed to read time bounds: {}", e);
                return label;
            },
        };

        match (
            bounds.first().and_then(|&v| axis.decode(v)),
            bounds.last().and_then(|&v| axis.decode(v)),
        ) {
            (Some(start), Some(end)) => label.with_bounds(start.date(), end.date()),
            _ => label,
        }
    }
}

/// Mask fill values and apply `scale_factor` / `add_offset`.
fn decode_cf(var: &netcdf::Variable<'_>, grid: &mut Array2<f64>) {
    let numeric = |name: &str| var.attribute(name).and_then(|a| attr_value_to_f64(&a));

    let fill_value = numeric("_FillValue");
    let missing_value = numeric("missing_value");
    let scale_factor = numeric("scale_factor").unwrap_or(1.0);
    let add_offset = numeric("add_offset").unwrap_or(0.0);

    let is_missing = |v: f64| Some(v) == fill_value || Some(v) == missing_value;
    let scaled = scale_factor != 1.0 || add_offset != 0.0;

    grid.mapv_inplace(|v| {
        if is_missing(v) {
            f64::NAN
        } else if scaled {
            v * scale_factor + add_offset
        } else {
            v
        }
    });
}

/// Read a hyperslab of a numeric variable as f64.
fn read_values<E>(var: &netcdf::Variable<'_>, extents: E) -> Result<Vec<f64>>
where
    E: TryInto<netcdf::Extents>,
    E::Error: Into<netcdf::Error>,
{
    let vartype = var.vartype();

    macro_rules! read_as {
        ($t:ty) => {{
            let values: Vec<$t> = var.get_values(extents).map_err(|e| {
                SstError::NetCDF(format!(
                    "Failed to read {} data from '{}': {}",
                    stringify!($t),
                    var.name(),
                    e
                ))
            })?;
            values.into_iter().map(|x| x as f64).collect()
        }};
    }

    let values = match vartype {
        NcVariableType::Float(FloatType::F64) => read_as!(f64),
        NcVariableType::Float(FloatType::F32) => read_as!(f32),
        NcVariableType::Int(IntType::I64) => read_as!(i64),
        NcVariableType::Int(IntType::I32) => read_as!(i32),
        NcVariableType::Int(IntType::I16) => read_as!(i16),
        NcVariableType::Int(IntType::I8) => read_as!(i8),
        NcVariableType::Int(IntType::U64) => read_as!(u64),
        NcVariableType::Int(IntType::U32) => read_as!(u32),
        NcVariableType::Int(IntType::U16) => read_as!(u16),
        NcVariableType::Int(IntType::U8) => read_as!(u8),
        NcVariableType::Char | NcVariableType::String => {
            return Err(SstError::layout(
                var.name(),
                "character/string data cannot be visualized",
            ));
        },
        other => {
            return Err(SstError::NetCDF(format!(
                "Unsupported variable type: {:?}",
                other
            )));
        },
    };

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> GeoSlice {
        GeoSlice::from_parts(
            "sst",
            TimeLabel::for_index(0),
            vec![10.0, -10.0],
            vec![0.0, 90.0, 180.0],
            array![[1.0, f64::NAN, 3.0], [4.0, 5.0, -2.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_from_parts_checks_coordinates() {
        let err = GeoSlice::from_parts(
            "sst",
            TimeLabel::for_index(0),
            vec![0.0],
            vec![0.0, 1.0],
            Array2::zeros((2, 2)),
        )
        .unwrap_err();
        assert!(matches!(err, SstError::Layout { .. }));
    }

    #[test]
    fn test_statistics_skip_nan() {
        let slice = sample();
        assert_eq!(slice.shape(), (2, 3));
        assert_eq!(slice.min_max(), Some((-2.0, 5.0)));
        assert_eq!(slice.valid_count(), 5);
        assert!(slice.value(0, 1).unwrap().is_nan());
        assert_eq!(slice.value(2, 0), None);
    }

    #[test]
    fn test_all_missing_has_no_range() {
        let slice = GeoSlice::from_parts(
            "sst",
            TimeLabel::for_index(0),
            vec![0.0],
            vec![0.0],
            array![[f64::NAN]],
        )
        .unwrap();
        assert_eq!(slice.min_max(), None);
        assert_eq!(slice.valid_count(), 0);
    }
}
