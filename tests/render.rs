mod common;

use common::{write_fixture, LAND, LATITUDES, LONGITUDES};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use sstview::data::{DataReader, DatasetLayout, GeoSlice};
use sstview::render::{ColorPalette, ColorScale, GridLookup, MapView, RasterView};
use tempfile::tempdir;

fn fixture_slice(t: usize) -> GeoSlice {
    let dir = tempdir().unwrap();
    let path = write_fixture(dir.path(), t + 1);
    let dataset = DataReader::open(path.to_str().unwrap()).unwrap();
    dataset.select_time(&DatasetLayout::default(), t).unwrap()
}

#[test]
fn test_map_and_raster_read_the_same_values() {
    let slice = fixture_slice(0);
    let lookup = GridLookup::new(&slice);

    for (r, &lat) in LATITUDES.iter().enumerate() {
        for (c, &lon) in LONGITUDES.iter().enumerate() {
            let expected = slice.value(r, c).unwrap();

            // Stored 0..360 longitude and the same place expressed in -180..180.
            let west = if lon > 180.0 { lon - 360.0 } else { lon };
            for query in [lon as f64, west as f64] {
                let sampled = lookup.sample(&slice, query, lat as f64).unwrap();
                if (r, c) == LAND {
                    assert!(sampled.is_nan());
                } else {
                    assert_eq!(sampled, expected);
                }
            }
        }
    }
}

#[test]
fn test_rendering_twice_is_identical() {
    let slice = fixture_slice(2);
    let scale = ColorScale::celsius(ColorPalette::Viridis);
    let area = Rect::new(0, 0, 100, 30);

    let render_raster = || {
        let mut buf = Buffer::empty(area);
        RasterView::new(&slice, &scale).render(area, &mut buf);
        buf
    };
    let render_map = || {
        let mut buf = Buffer::empty(area);
        MapView::new(&slice, &scale).render(area, &mut buf);
        buf
    };

    assert_eq!(render_raster(), render_raster());
    assert_eq!(render_map(), render_map());
    assert_ne!(render_raster(), render_map());
}

#[test]
fn test_palette_changes_colors_not_layout() {
    let slice = fixture_slice(1);
    let viridis = ColorScale::celsius(ColorPalette::Viridis);
    let plasma = viridis.with_palette(ColorPalette::Plasma);
    let area = Rect::new(0, 0, 60, 14);

    let mut a = Buffer::empty(area);
    let mut b = Buffer::empty(area);
    RasterView::new(&slice, &viridis).render(area, &mut a);
    RasterView::new(&slice, &plasma).render(area, &mut b);

    let symbols = |buf: &Buffer| -> Vec<String> {
        buf.content().iter().map(|cell| cell.symbol().to_string()).collect()
    };
    assert_eq!(symbols(&a), symbols(&b));
    assert_ne!(a, b);
}
