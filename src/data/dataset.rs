//! Dataset handle and descriptors.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SstError};

/// Names of the variables and dimensions a slice is taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    /// Gridded variable, shaped `[time, latitude, longitude]`.
    pub variable: String,
    /// Time bounds variable, shaped `[time, bounds]`.
    pub time_bounds: String,
    /// Time dimension name.
    pub time_dim: String,
    /// Latitude dimension name.
    pub lat_dim: String,
    /// Longitude dimension name.
    pub lon_dim: String,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            variable: "sea_surface_temperature".to_string(),
            time_bounds: "time_bounds".to_string(),
            time_dim: "time".to_string(),
            lat_dim: "latitude".to_string(),
            lon_dim: "longitude".to_string(),
        }
    }
}

/// A named dimension and its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInfo {
    /// Dimension name.
    pub name: String,
    /// Number of steps along the dimension.
    pub len: usize,
}

/// Description of one variable, without its data.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    /// Variable name.
    pub name: String,
    /// Dimension names in storage order.
    pub dims: Vec<String>,
    /// Length of each dimension.
    pub shape: Vec<usize>,
    /// Storage type, lowercased (`float`, `double`, ...).
    pub dtype: String,
    /// Attributes rendered as text.
    pub attributes: BTreeMap<String, String>,
}

impl VariableInfo {
    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// The `long_name` attribute.
    pub fn long_name(&self) -> Option<&str> {
        self.attributes.get("long_name").map(String::as_str)
    }

    /// The `units` attribute.
    pub fn units(&self) -> Option<&str> {
        self.attributes.get("units").map(String::as_str)
    }

    /// Length of the named dimension, if the variable uses it.
    pub fn dim_len(&self, dim: &str) -> Option<usize> {
        self.dims
            .iter()
            .position(|d| d == dim)
            .and_then(|i| self.shape.get(i).copied())
    }
}

/// An opened dataset.
///
/// Only metadata is read on open. Array data is fetched when a slice is
/// selected, so a remote source transfers one time step at a time.
pub struct Dataset {
    /// URL or path the dataset was opened from.
    pub source: String,
    /// Global attributes.
    pub attributes: BTreeMap<String, String>,
    /// Dimensions in file order.
    pub dimensions: Vec<DimensionInfo>,
    /// Variables in file order.
    pub variables: Vec<VariableInfo>,
    pub(crate) file: netcdf::File,
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("source", &self.source)
            .field("dimensions", &self.dimensions)
            .field("variables", &self.variables.len())
            .finish_non_exhaustive()
    }
}

impl Dataset {
    pub(crate) fn new(
        source: String,
        file: netcdf::File,
        attributes: BTreeMap<String, String>,
        dimensions: Vec<DimensionInfo>,
        variables: Vec<VariableInfo>,
    ) -> Self {
        Self {
            source,
            attributes,
            dimensions,
            variables,
            file,
        }
    }

    /// Length of a dimension by name.
    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.len)
    }

    /// Variable descriptor by name.
    pub fn variable(&self, name: &str) -> Option<&VariableInfo> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Number of time steps of the layout's gridded variable.
    pub fn time_len(&self, layout: &DatasetLayout) -> Result<usize> {
        let info = self
            .variable(&layout.variable)
            .ok_or_else(|| SstError::variable_not_found(&layout.variable))?;

        info.dim_len(&layout.time_dim).ok_or_else(|| {
            SstError::layout(
                &layout.variable,
                format!("no '{}' dimension", layout.time_dim),
            )
        })
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset: {}", self.source)?;

        writeln!(f, "Dimensions:")?;
        for dim in &self.dimensions {
            writeln!(f, "  {}: {}", dim.name, dim.len)?;
        }

        writeln!(f, "Variables:")?;
        for var in &self.variables {
            write!(f, "  {}({}) {}", var.name, var.dims.join(", "), var.dtype)?;
            if let Some(long_name) = var.long_name() {
                write!(f, " \"{}\"", long_name)?;
            }
            if let Some(units) = var.units() {
                write!(f, " [{}]", units)?;
            }
            writeln!(f)?;
        }

        if !self.attributes.is_empty() {
            writeln!(f, "Attributes:")?;
            for (key, value) in &self.attributes {
                writeln!(f, "  {}: {}", key, value)?;
            }
        }

        Ok(())
    }
}
