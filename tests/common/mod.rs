//! Shared fixtures: small SST-shaped NetCDF files.

#![allow(dead_code)]

use chrono::{Months, NaiveDate};
use sstview::data::MonthIndex;
use std::path::{Path, PathBuf};

pub const LATITUDES: [f32; 4] = [60.0, 20.0, -20.0, -60.0];
pub const LONGITUDES: [f32; 6] = [0.0, 60.0, 120.0, 180.0, 240.0, 300.0];
pub const FILL: f32 = -999.0;

/// Cell that holds the fill value at every time step.
pub const LAND: (usize, usize) = (0, 1);

/// Packing of `sst_packed`: value = raw * scale + offset.
pub const PACKED_SCALE: f64 = 0.01;
pub const PACKED_OFFSET: f64 = 20.0;
pub const PACKED_FILL: i16 = -32768;
pub const PACKED_MISSING: i16 = -999;

/// Cell of `sst_packed` that holds `missing_value` instead of `_FillValue`.
pub const GAP: (usize, usize) = (1, 2);

/// Raw stored integer of a `sst_packed` cell. Cell (0, 0) is 150.
pub fn packed_raw(row: usize, col: usize) -> i16 {
    150 + (row * 10 + col) as i16
}

/// Stored value of a cell.
pub fn cell_value(t: usize, row: usize, col: usize) -> f32 {
    (t % 1000) as f32 + row as f32 * 0.5 + col as f32 * 0.25
}

fn days_since_epoch(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(MonthIndex::EPOCH_YEAR, 1, 1).unwrap();
    (date - epoch).num_days() as f64
}

fn month_start(index: usize) -> NaiveDate {
    let (year, month) = MonthIndex::year_month(index).unwrap();
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// Write a dataset with `times` monthly steps starting January 1854.
///
/// Variables:
/// - `sea_surface_temperature(time, latitude, longitude)` float with fill
/// - `sst_lonlat(time, longitude, latitude)` same values, transposed
/// - `sst_2d(latitude, longitude)`
/// - `sst_packed(time, latitude, longitude)` short with scale, offset,
///   `_FillValue` at [`LAND`] and `missing_value` at [`GAP`]
/// - `sst_x(time, latitude, x)` where `x` has no coordinate variable
/// - `time_bounds(time, bounds)` in days since 1854-01-01
pub fn write_fixture(dir: &Path, times: usize) -> PathBuf {
    let path = dir.join("sst.nc");
    let mut file = netcdf::create(&path).unwrap();

    file.add_attribute("title", "Fixture SST").unwrap();
    file.add_dimension("time", times).unwrap();
    file.add_dimension("latitude", LATITUDES.len()).unwrap();
    file.add_dimension("longitude", LONGITUDES.len()).unwrap();
    file.add_dimension("bounds", 2).unwrap();
    file.add_dimension("x", LONGITUDES.len()).unwrap();

    let (nlat, nlon) = (LATITUDES.len(), LONGITUDES.len());

    {
        let mut var = file.add_variable::<f64>("time", &["time"]).unwrap();
        var.put_attribute("units", "days since 1854-01-01 00:00:00").unwrap();
        let values: Vec<f64> = (0..times).map(|t| days_since_epoch(month_start(t))).collect();
        var.put_values(&values, ..).unwrap();
    }

    {
        let mut var = file
            .add_variable::<f64>("time_bounds", &["time", "bounds"])
            .unwrap();
        let mut values = Vec::with_capacity(times * 2);
        for t in 0..times {
            let start = month_start(t);
            let end = start.checked_add_months(Months::new(1)).unwrap();
            values.push(days_since_epoch(start));
            values.push(days_since_epoch(end));
        }
        var.put_values(&values, ..).unwrap();
    }

    {
        let mut var = file.add_variable::<f32>("latitude", &["latitude"]).unwrap();
        var.put_attribute("units", "degrees_north").unwrap();
        var.put_values(&LATITUDES, ..).unwrap();
    }

    {
        let mut var = file.add_variable::<f32>("longitude", &["longitude"]).unwrap();
        var.put_attribute("units", "degrees_east").unwrap();
        var.put_values(&LONGITUDES, ..).unwrap();
    }

    {
        let mut var = file
            .add_variable::<f32>("sea_surface_temperature", &["time", "latitude", "longitude"])
            .unwrap();
        var.set_fill_value(FILL).unwrap();
        var.put_attribute("units", "degC").unwrap();
        var.put_attribute("long_name", "Sea surface temperature").unwrap();

        let mut values = Vec::with_capacity(times * nlat * nlon);
        for t in 0..times {
            for r in 0..nlat {
                for c in 0..nlon {
                    values.push(if (r, c) == LAND { FILL } else { cell_value(t, r, c) });
                }
            }
        }
        var.put_values(&values, ..).unwrap();
    }

    {
        let mut var = file
            .add_variable::<f32>("sst_lonlat", &["time", "longitude", "latitude"])
            .unwrap();
        var.set_fill_value(FILL).unwrap();

        let mut values = Vec::with_capacity(times * nlat * nlon);
        for t in 0..times {
            for c in 0..nlon {
                for r in 0..nlat {
                    values.push(if (r, c) == LAND { FILL } else { cell_value(t, r, c) });
                }
            }
        }
        var.put_values(&values, ..).unwrap();
    }

    {
        let mut var = file
            .add_variable::<f32>("sst_2d", &["latitude", "longitude"])
            .unwrap();
        let values = vec![1.0f32; nlat * nlon];
        var.put_values(&values, ..).unwrap();
    }

    {
        let mut var = file
            .add_variable::<i16>("sst_packed", &["time", "latitude", "longitude"])
            .unwrap();
        var.set_fill_value(PACKED_FILL).unwrap();
        var.put_attribute("missing_value", PACKED_MISSING).unwrap();
        var.put_attribute("scale_factor", PACKED_SCALE).unwrap();
        var.put_attribute("add_offset", PACKED_OFFSET).unwrap();

        let mut values = Vec::with_capacity(times * nlat * nlon);
        for _ in 0..times {
            for r in 0..nlat {
                for c in 0..nlon {
                    values.push(match (r, c) {
                        cell if cell == LAND => PACKED_FILL,
                        cell if cell == GAP => PACKED_MISSING,
                        _ => packed_raw(r, c),
                    });
                }
            }
        }
        var.put_values(&values, ..).unwrap();
    }

    {
        let mut var = file
            .add_variable::<f32>("sst_x", &["time", "latitude", "x"])
            .unwrap();
        let mut values = Vec::with_capacity(times * nlat * nlon);
        for t in 0..times {
            for r in 0..nlat {
                for c in 0..nlon {
                    values.push(cell_value(t, r, c));
                }
            }
        }
        var.put_values(&values, ..).unwrap();
    }

    path
}
