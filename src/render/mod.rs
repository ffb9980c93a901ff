//! Rendering of slices as terminal rasters.
//!
//! Two views share one [`ColorScale`]:
//!
//! - [`RasterView`] places pixels by array index, row 0 at the top.
//! - [`MapView`] places pixels by longitude/latitude on a Plate Carree
//!   canvas and can overlay coastlines.
//!
//! Both are ratatui widgets and can be rendered into any buffer.

mod colorbar;
mod colormaps;
mod lookup;
mod map;
mod raster;
mod scale;

pub use colorbar::{format_bound, Colorbar};
pub use colormaps::ColorPalette;
pub use lookup::{AxisLookup, GridLookup};
pub use map::{fit_map, pixel_center, MapView};
pub use raster::{fit_grid, RasterView};
pub use scale::ColorScale;
