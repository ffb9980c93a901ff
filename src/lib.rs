//! sstview - fetch a sea surface temperature dataset and view one month.
//!
//! The pipeline is load, slice, render:
//!
//! - [`data::DataReader`] opens a NetCDF file or OPeNDAP URL and reads its
//!   metadata.
//! - [`data::Dataset::select_time`] reads one time step as a
//!   latitude x longitude grid.
//! - [`render::RasterView`] and [`render::MapView`] draw that grid with a
//!   fixed [`render::ColorScale`], either by array index or on a
//!   Plate Carree map with coastlines.
//!
//! # Example
//!
//! ```ignore
//! use sstview::data::{DataReader, DatasetLayout, MonthIndex};
//!
//! let dataset = DataReader::open("https://example.org/thredds/dodsC/ersst.nc")?;
//! let layout = DatasetLayout::default();
//! let index = MonthIndex::from_year_month(2021, 9).unwrap(); // 2012
//! let slice = dataset.select_time(&layout, index)?;
//! println!("{} is {:?}", slice.time, slice.shape());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod ui;

pub use error::{Result, SstError};
