//! Quick single-band in-memory rasters

use crate::srs::validate_srs;
use geokit_core::error::{GeokitError, Result};
use geokit_core::models::{Bounds, DataType, GeoTransform, Srs};
use geokit_grid::{RescaleMode, ScaleFactor, Strictness};
use ndarray::Array2;

/// Parameters for [`quick_raster`]
#[derive(Debug, Clone)]
pub struct RasterSpec {
    pub bounds: Bounds,
    pub srs: Option<Srs>,
    pub dx: f64,
    pub dy: f64,
    pub data_type: DataType,
    pub no_data: Option<f64>,
    pub fill: Option<f64>,
}

impl RasterSpec {
    pub fn new(bounds: Bounds, dx: f64, dy: f64) -> Self {
        Self {
            bounds,
            srs: None,
            dx,
            dy,
            data_type: DataType::default(),
            no_data: None,
            fill: None,
        }
    }

    pub fn with_srs(mut self, srs: Srs) -> Self {
        self.srs = Some(srs);
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_no_data(mut self, no_data: f64) -> Self {
        self.no_data = Some(no_data);
        self
    }

    pub fn with_fill(mut self, fill: f64) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Single-band raster held in memory, origin at the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct MemRaster {
    pub geotransform: GeoTransform,
    pub srs: Option<Srs>,
    pub data_type: DataType,
    pub no_data: Option<f64>,
    band: Array2<f64>,
}

impl MemRaster {
    pub fn rows(&self) -> usize {
        self.band.nrows()
    }

    pub fn cols(&self) -> usize {
        self.band.ncols()
    }

    pub fn band(&self) -> &Array2<f64> {
        &self.band
    }

    /// Absolute pixel size as `(dx, dy)`
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.geotransform.pixel_width.abs(), self.geotransform.pixel_height.abs())
    }

    /// Extent actually covered by the pixels
    pub fn bounds(&self) -> Bounds {
        let gt = &self.geotransform;
        let (x_max, y_min) = gt.pixel_to_world(self.rows() as f64, self.cols() as f64);
        Bounds { x_min: gt.origin_x, y_min, x_max, y_max: gt.origin_y }
    }

    /// Overwrite every pixel with `value`, which must fit the band's data type
    pub fn fill(&mut self, value: f64) -> Result<()> {
        check_value(self.data_type, value, "fill")?;
        self.band.fill(value);
        Ok(())
    }

    /// Change resolution by an integer factor, keeping the top-left origin.
    ///
    /// Upscaling divides the pixel size by the factor and keeps the data type.
    /// Downscaling multiplies it, averages pixels into a `Float64` band and
    /// drops the no-data value, since averaged blocks may mix it with data.
    pub fn rescale(&self, scale: impl Into<ScaleFactor>, strictness: Strictness) -> Result<Self> {
        let scale = scale.into();
        let mode = scale.mode().map_err(rescale_error)?;
        let band = geokit_grid::rescale(&self.band, scale, strictness)
            .map_err(rescale_error)?
            .into_f64();

        let (dx, dy) = self.pixel_size();
        let gt = &self.geotransform;
        let mut rescaled = Self {
            geotransform: self.geotransform,
            srs: self.srs.clone(),
            data_type: self.data_type,
            no_data: self.no_data,
            band,
        };

        match mode {
            RescaleMode::NoOp => {}
            RescaleMode::Upscale { y, x } => {
                rescaled.geotransform =
                    GeoTransform::north_up(gt.origin_x, gt.origin_y, dx / x as f64, dy / y as f64);
            }
            RescaleMode::Downscale { y, x } => {
                rescaled.geotransform =
                    GeoTransform::north_up(gt.origin_x, gt.origin_y, dx * x as f64, dy * y as f64);
                rescaled.data_type = DataType::Float64;
                if let Some(no_data) = rescaled.no_data.take() {
                    tracing::warn!("Dropping no-data value {} after downscaling", no_data);
                }
            }
        }

        Ok(rescaled)
    }
}

fn rescale_error(err: geokit_grid::RescaleError) -> GeokitError {
    GeokitError::raster(format!("Failed to rescale raster: {}", err))
}

fn check_value(data_type: DataType, value: f64, what: &str) -> Result<()> {
    if !data_type.accepts(value) {
        return Err(GeokitError::raster(format!(
            "{} value {} does not fit data type {}",
            what, value, data_type
        )));
    }
    Ok(())
}

/// Build an in-memory raster covering `spec.bounds`.
///
/// The column and row counts are the rounded ratios of the extent to the
/// pixel size. The geotransform uses the "Y-at-top" orientation: origin at
/// `(x_min, y_max)` with rows advancing southward.
pub fn quick_raster(spec: &RasterSpec) -> Result<MemRaster> {
    spec.bounds.validate()?;
    for (name, size) in [("dx", spec.dx), ("dy", spec.dy)] {
        if !size.is_finite() || size == 0.0 {
            return Err(GeokitError::raster(format!(
                "Pixel size {} must be finite and non-zero, got {}",
                name, size
            )));
        }
    }

    let cols = (spec.bounds.width() / spec.dx.abs()).round();
    let rows = (spec.bounds.height() / spec.dy.abs()).round();
    if cols < 1.0 || rows < 1.0 || !(rows * cols).is_finite() || rows * cols > isize::MAX as f64 {
        return Err(GeokitError::raster(format!(
            "Failed to create raster: {} rows x {} cols is not a valid size",
            rows, cols
        )));
    }
    let (rows, cols) = (rows as usize, cols as usize);

    if let Some(srs) = &spec.srs {
        validate_srs(srs)?;
    }
    if let Some(no_data) = spec.no_data {
        check_value(spec.data_type, no_data, "no-data")?;
    }
    if let Some(fill) = spec.fill {
        check_value(spec.data_type, fill, "fill")?;
    }

    let geotransform =
        GeoTransform::north_up(spec.bounds.x_min, spec.bounds.y_max, spec.dx, spec.dy);

    tracing::debug!(rows, cols, data_type = %spec.data_type, "creating in-memory raster");
    Ok(MemRaster {
        geotransform,
        srs: spec.srs.clone(),
        data_type: spec.data_type,
        no_data: spec.no_data,
        band: Array2::from_elem((rows, cols), spec.fill.unwrap_or(0.0)),
    })
}
