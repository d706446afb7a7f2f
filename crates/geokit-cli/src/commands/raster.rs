use crate::cli::RasterArgs;
use crate::output::OutputWriter;
use crate::output_types::{RasterOutput, SrsOutput};
use anyhow::{Context, Result};
use geokit_core::config::LayeredConfig;
use geokit_core::models::{Bounds, DataType};
use geokit_geo::{load_epsg, load_srs, quick_raster, RasterSpec};
use geokit_grid::{ScaleFactor, Strictness};

pub fn execute(args: RasterArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let bounds: Bounds = args.bounds.parse()?;
    let data_type: DataType = args.dtype.parse()?;
    let srs = match &args.srs {
        Some(spec) => load_srs(spec)?,
        None => load_epsg(config.srs.value)?,
    };

    let mut spec = RasterSpec::new(bounds, args.dx, args.dy)
        .with_srs(srs)
        .with_data_type(data_type);
    if let Some(no_data) = args.no_data {
        spec = spec.with_no_data(no_data);
    }
    if let Some(fill) = args.fill {
        spec = spec.with_fill(fill);
    }

    let mut raster = quick_raster(&spec)?;

    if let Some(scale) = &args.scale {
        let scale: ScaleFactor =
            scale.parse().with_context(|| format!("Invalid scale '{}'", scale))?;
        let no_data = raster.no_data;
        raster = raster.rescale(scale, Strictness::from(config.strict_rescale.value))?;
        if let (Some(value), None) = (no_data, raster.no_data) {
            output.warning(format!(
                "No-data value {} dropped: downscaled pixels are block averages",
                value
            ));
        }
    }

    let band = raster.band();
    let mean = band.mean();

    if output.is_json() {
        output.result(RasterOutput {
            rows: raster.rows(),
            cols: raster.cols(),
            data_type: raster.data_type.to_string(),
            geotransform: raster.geotransform.to_array(),
            bounds: raster.bounds(),
            srs: raster.srs.as_ref().map(SrsOutput::from),
            no_data: raster.no_data,
            mean,
        })?;
    } else {
        output.success(format!("Created {} x {} raster", raster.rows(), raster.cols()));
        output.kv("Data type", raster.data_type);
        let (dx, dy) = raster.pixel_size();
        output.kv("Pixel size", format!("{} x {}", dx, dy));
        let b = raster.bounds();
        output.kv("Bounds", format!("{}, {}, {}, {}", b.x_min, b.y_min, b.x_max, b.y_max));
        if let Some(srs) = &raster.srs {
            output.kv("SRS", srs);
        }
        if let Some(no_data) = raster.no_data {
            output.kv("No data", no_data);
        }
        if let Some(mean) = mean {
            output.kv("Mean", mean);
        }
    }

    Ok(())
}
