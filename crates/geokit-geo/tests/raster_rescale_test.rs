//! Property tests for changing raster resolution

use geokit_core::models::{Bounds, DataType};
use geokit_core::util::is_close;
use geokit_geo::{quick_raster, RasterSpec};
use geokit_grid::Strictness;
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    is_close(a, b, 1e-9, 1e-9)
}

proptest! {
    #[test]
    fn prop_upscale_keeps_extent(
        rows in 1usize..20,
        cols in 1usize..20,
        factor in 1i32..5,
        fill in 0u8..=255,
    ) {
        let bounds = Bounds::new(0.0, 0.0, cols as f64, rows as f64).unwrap();
        let raster = quick_raster(&RasterSpec::new(bounds, 1.0, 1.0).with_fill(fill as f64)).unwrap();
        let up = raster.rescale(factor, Strictness::Strict).unwrap();

        let f = factor as usize;
        prop_assert_eq!((up.rows(), up.cols()), (rows * f, cols * f));
        prop_assert_eq!(up.data_type, DataType::Byte);
        let b = up.bounds();
        prop_assert!(close(b.x_max, bounds.x_max) && close(b.y_min, bounds.y_min));
        prop_assert!(up.band().iter().all(|v| *v == fill as f64));
    }

    #[test]
    fn prop_padded_downscale_grows_extent_to_block_multiple(
        rows in 1usize..20,
        cols in 1usize..20,
        factor in 1i32..5,
    ) {
        let bounds = Bounds::new(0.0, 0.0, cols as f64, rows as f64).unwrap();
        let raster = quick_raster(&RasterSpec::new(bounds, 1.0, 1.0).with_fill(5.0)).unwrap();
        let down = raster.rescale(-factor, Strictness::Padded).unwrap();

        let f = factor as usize;
        prop_assert_eq!((down.rows(), down.cols()), (rows.div_ceil(f), cols.div_ceil(f)));
        prop_assert_eq!(down.pixel_size(), (factor as f64, factor as f64));
        // A constant band stays constant: padding never leaks into the averages
        prop_assert!(down.band().iter().all(|v| close(*v, 5.0)));
    }
}
