//! Data reading and representation.
//!
//! This module opens NetCDF datasets (local files or OPeNDAP endpoints),
//! describes their dimensions and variables, and selects single time steps
//! as latitude x longitude grids.

mod dataset;
mod reader;
mod slice;
mod time;

pub use dataset::{Dataset, DatasetLayout, DimensionInfo, VariableInfo};
pub use reader::DataReader;
pub use slice::GeoSlice;
pub use time::{MonthIndex, TimeAxis, TimeLabel};
