//! Block replication and block averaging of 2-D grids

use crate::error::{RescaleError, Result};
use crate::scale::{RescaleMode, ScaleFactor, Strictness};
use ndarray::{s, Array2, ArrayBase, Data, Ix2};
use num_traits::AsPrimitive;

/// Output of [`rescale`]. Downscaled grids are always `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Rescaled<T> {
    Unchanged(Array2<T>),
    Upscaled(Array2<T>),
    Downscaled(Array2<f64>),
}

impl<T> Rescaled<T>
where
    T: Copy + AsPrimitive<f64>,
{
    /// Shape of the output as `(rows, cols)`
    pub fn dim(&self) -> (usize, usize) {
        match self {
            Rescaled::Unchanged(grid) | Rescaled::Upscaled(grid) => grid.dim(),
            Rescaled::Downscaled(grid) => grid.dim(),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Rescaled::Unchanged(_))
    }

    /// Promote the output to `f64` regardless of how it was produced
    pub fn into_f64(self) -> Array2<f64> {
        match self {
            Rescaled::Unchanged(grid) | Rescaled::Upscaled(grid) => grid.mapv(|v| v.as_()),
            Rescaled::Downscaled(grid) => grid,
        }
    }
}

/// Rescale a grid by an integer factor per axis.
///
/// * `(0, 0)` returns a copy of the grid.
/// * Positive factors replicate every cell into a `y × x` block.
/// * Negative factors average every `|y| × |x|` block into one cell. With
///   [`Strictness::Padded`], shapes that are not a multiple of the factor are
///   zero-padded on the bottom/right and the edge cells are corrected so each
///   output cell is the mean of the real cells it covers.
///
/// # Examples
///
/// ```
/// use geokit_grid::{rescale, Strictness};
/// use ndarray::array;
///
/// let grid = array![[1, 2], [3, 4]];
/// let up = rescale(&grid, 2, Strictness::Strict).unwrap();
/// assert_eq!(up.dim(), (4, 4));
///
/// let down = rescale(&up.into_f64(), -2, Strictness::Strict).unwrap();
/// assert_eq!(down.into_f64(), array![[1.0, 2.0], [3.0, 4.0]]);
/// ```
pub fn rescale<S, T>(
    grid: &ArrayBase<S, Ix2>,
    scale: impl Into<ScaleFactor>,
    strictness: Strictness,
) -> Result<Rescaled<T>>
where
    S: Data<Elem = T>,
    T: Copy + AsPrimitive<f64>,
{
    match scale.into().mode()? {
        RescaleMode::NoOp => Ok(Rescaled::Unchanged(grid.to_owned())),
        RescaleMode::Upscale { y, x } => upscale(grid, y, x).map(Rescaled::Upscaled),
        RescaleMode::Downscale { y, x } => {
            downscale(grid, y, x, strictness).map(Rescaled::Downscaled)
        }
    }
}

/// Replicate each cell `(r, c)` into the block starting at `(r * y, c * x)`
pub fn upscale<S, T>(grid: &ArrayBase<S, Ix2>, y: usize, x: usize) -> Result<Array2<T>>
where
    S: Data<Elem = T>,
    T: Copy,
{
    check_magnitudes(y, x)?;
    let (rows, cols) = grid.dim();

    let shape = upscaled_shape(rows, cols, y, x, std::mem::size_of::<T>())
        .ok_or(RescaleError::ShapeOverflow { rows, cols, y, x })?;

    tracing::debug!(rows, cols, y, x, out_rows = shape.0, out_cols = shape.1, "upscaling grid");
    Ok(Array2::from_shape_fn(shape, |(r, c)| grid[[r / y, c / x]]))
}

/// Average each `y × x` block into a single `f64` cell
pub fn downscale<S, T>(
    grid: &ArrayBase<S, Ix2>,
    y: usize,
    x: usize,
    strictness: Strictness,
) -> Result<Array2<f64>>
where
    S: Data<Elem = T>,
    T: Copy + AsPrimitive<f64>,
{
    check_magnitudes(y, x)?;
    let (rows, cols) = grid.dim();
    let (y_pad, x_pad) = padding(rows, cols, y, x);

    if strictness.is_strict() && (y_pad > 0 || x_pad > 0) {
        return Err(RescaleError::NonDivisibleDimension { rows, cols, y, x });
    }

    let shape = (rows.div_ceil(y), cols.div_ceil(x));
    tracing::debug!(
        rows,
        cols,
        y,
        x,
        y_pad,
        x_pad,
        out_rows = shape.0,
        out_cols = shape.1,
        "downscaling grid"
    );

    // Padding cells are zero and add nothing to a block sum, so they are never materialized.
    let mut out = Array2::<f64>::zeros(shape);
    for ((r, c), value) in grid.indexed_iter() {
        out[[r / y, c / x]] += (*value).as_();
    }

    let block_size = y as f64 * x as f64;
    out.mapv_inplace(|sum| sum / block_size);

    correct_edges(&mut out, y, x, y_pad, x_pad);
    Ok(out)
}

/// Rows and columns of zero padding needed to make `rows × cols` divisible by `y × x`.
///
/// # Panics
///
/// Panics if `y` or `x` is zero.
pub fn padding(rows: usize, cols: usize, y: usize, x: usize) -> (usize, usize) {
    ((y - rows % y) % y, (x - cols % x) % x)
}

/// Output shape of an upscale, if its buffer of `elem_size` bytes per cell fits in `isize::MAX`
fn upscaled_shape(
    rows: usize,
    cols: usize,
    y: usize,
    x: usize,
    elem_size: usize,
) -> Option<(usize, usize)> {
    let out_rows = rows.checked_mul(y)?;
    let out_cols = cols.checked_mul(x)?;
    let bytes = out_rows.checked_mul(out_cols)?.checked_mul(elem_size.max(1))?;
    (bytes <= isize::MAX as usize).then_some((out_rows, out_cols))
}

fn check_magnitudes(y: usize, x: usize) -> Result<()> {
    if y == 0 || x == 0 {
        return Err(RescaleError::ZeroScale { y, x });
    }
    Ok(())
}

/// Rescale the last output row/column so padded cells do not bias the mean.
///
/// A block in the last row holds `y - y_pad` real rows out of `y`, so its mean
/// is scaled by `y / (y - y_pad)`; likewise for the last column. The corner
/// block is short on both axes and takes both factors.
fn correct_edges(out: &mut Array2<f64>, y: usize, x: usize, y_pad: usize, x_pad: usize) {
    let (out_rows, out_cols) = out.dim();
    if out_rows == 0 || out_cols == 0 || (y_pad == 0 && x_pad == 0) {
        return;
    }

    let y_factor = y as f64 / (y - y_pad) as f64;
    let x_factor = x as f64 / (x - x_pad) as f64;
    let (last_row, last_col) = (out_rows - 1, out_cols - 1);

    if y_pad > 0 {
        out.slice_mut(s![last_row, ..last_col]).mapv_inplace(|v| v * y_factor);
    }
    if x_pad > 0 {
        out.slice_mut(s![..last_row, last_col]).mapv_inplace(|v| v * x_factor);
    }
    out[[last_row, last_col]] *= y_factor * x_factor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Array2<i32> {
        array![[1, 1, 1, 1], [2, 2, 3, 3], [4, 4, 5, 5], [6, 7, 8, 9]]
    }

    fn assert_grid_close(actual: &Array2<f64>, expected: &Array2<f64>) {
        assert_eq!(actual.dim(), expected.dim());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-12, "expected {}, got {}\n{:?}", e, a, actual);
        }
    }

    #[test]
    fn test_upscale_replicates_blocks() {
        let grid = array![[1, 2], [3, 4]];
        let out = rescale(&grid, (2, 2), Strictness::Strict).unwrap();

        assert_eq!(
            out,
            Rescaled::Upscaled(array![[1, 1, 2, 2], [1, 1, 2, 2], [3, 3, 4, 4], [3, 3, 4, 4]])
        );
    }

    #[test]
    fn test_upscale_uneven_axes_keeps_type() {
        let grid = array![[1.5f32, -2.0]];
        let out = upscale(&grid, 3, 1).unwrap();

        assert_eq!(out.dim(), (3, 2));
        assert!(out.column(0).iter().all(|v| *v == 1.5));
        assert!(out.column(1).iter().all(|v| *v == -2.0));
    }

    #[test]
    fn test_downscale_exact_division() {
        let out = rescale(&sample(), -2, Strictness::Strict).unwrap();
        assert_eq!(out, Rescaled::Downscaled(array![[1.5, 2.0], [5.25, 6.75]]));
    }

    #[test]
    fn test_exact_division_ignores_strictness() {
        let strict = downscale(&sample(), 2, 2, Strictness::Strict).unwrap();
        let padded = downscale(&sample(), 2, 2, Strictness::Padded).unwrap();
        assert_eq!(strict, padded);
    }

    #[test]
    fn test_downscale_padded_corrects_edges() {
        let out = downscale(&sample(), 3, 3, Strictness::Padded).unwrap();
        assert_grid_close(&out, &array![[23.0 / 9.0, 3.0], [7.0, 9.0]]);
    }

    #[test]
    fn test_downscale_padded_single_axis() {
        // 3 rows, 4 cols: only the rows need padding
        let grid = array![[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0], [9.0, 10.0, 11.0, 12.0]];
        let out = downscale(&grid, 2, 2, Strictness::Padded).unwrap();

        assert_grid_close(&out, &array![[3.5, 5.5], [9.5, 11.5]]);
    }

    #[test]
    fn test_downscale_padded_single_output_row() {
        // Every output cell lies in the last row and overlaps padding
        let grid = array![[2, 4, 6]];
        let out = downscale(&grid, 4, 2, Strictness::Padded).unwrap();

        assert_grid_close(&out, &array![[3.0, 6.0]]);
    }

    #[test]
    fn test_strict_rejects_non_divisible() {
        let grid = Array2::<u8>::zeros((3, 5));
        let err = rescale(&grid, -2, Strictness::Strict).unwrap_err();

        assert_eq!(err, RescaleError::NonDivisibleDimension { rows: 3, cols: 5, y: 2, x: 2 });
    }

    #[test]
    fn test_mixed_direction_rejected() {
        let err = rescale(&sample(), (2, -2), Strictness::Strict).unwrap_err();
        assert_eq!(err, RescaleError::IncompatibleScaleDirection { y: 2, x: -2 });
    }

    #[test]
    fn test_no_op_returns_copy() {
        let grid = sample();
        let out = rescale(&grid, 0, Strictness::Strict).unwrap();

        assert!(out.is_unchanged());
        assert_eq!(out, Rescaled::Unchanged(grid));
    }

    #[test]
    fn test_zero_magnitude_rejected() {
        assert_eq!(upscale(&sample(), 0, 2), Err(RescaleError::ZeroScale { y: 0, x: 2 }));
        assert!(downscale(&sample(), 2, 0, Strictness::Padded).is_err());
    }

    #[test]
    fn test_upscale_overflow_rejected() {
        let grid = Array2::<u8>::zeros((2, 2));
        let err = upscale(&grid, usize::MAX, 1).unwrap_err();
        assert!(matches!(err, RescaleError::ShapeOverflow { .. }));
    }

    #[test]
    fn test_upscale_overflow_counts_element_size() {
        let grid = array![[1u64]];
        let err = rescale(&grid, (i32::MAX, i32::MAX), Strictness::Strict).unwrap_err();
        assert_eq!(
            err,
            RescaleError::ShapeOverflow {
                rows: 1,
                cols: 1,
                y: i32::MAX as usize,
                x: i32::MAX as usize
            }
        );

        // Cell count fits in usize but the byte count exceeds isize::MAX
        assert_eq!(upscaled_shape(1, 1, 1 << 31, 1 << 30, 8), None);
        assert_eq!(upscaled_shape(2, 3, 2, 2, 8), Some((4, 6)));
    }

    #[test]
    fn test_padding_amounts() {
        assert_eq!(padding(4, 4, 3, 3), (2, 2));
        assert_eq!(padding(4, 4, 2, 2), (0, 0));
        assert_eq!(padding(3, 5, 2, 4), (1, 3));
        assert_eq!(padding(0, 0, 3, 3), (0, 0));
    }

    #[test]
    fn test_empty_grid() {
        let grid = Array2::<f64>::zeros((0, 0));
        assert_eq!(downscale(&grid, 2, 2, Strictness::Padded).unwrap().dim(), (0, 0));
        assert_eq!(upscale(&grid, 2, 2).unwrap().dim(), (0, 0));
    }

    #[test]
    fn test_into_f64() {
        let out = rescale(&array![[1u16, 2]], (1, 1), Strictness::Strict).unwrap();
        assert_eq!(out.into_f64(), array![[1.0, 2.0]]);
    }
}
