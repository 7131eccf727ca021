/// # 2D Median Filter (MEDIAN_2D)
///
/// Sliding-window median of a row-major 2D array of `f64` samples. Each
/// output cell receives the median of the input values inside the
/// rectangular window of half-widths `(half_x, half_y)` centered on it,
/// truncated at the array edges. NaN cells are excluded from every window;
/// a window holding only NaN yields NaN.
///
/// The array is processed in overlapping square blocks. Inside each block
/// the cells are ranked once; output positions are then visited in snake
/// order so consecutive positions differ by one unit step and each
/// transition updates the window by a single row or column strip.
///
/// ## Parameters
/// - **half_x / half_y**: Window half-widths along the fast (x) and slow
///   (y) axis; the window spans `(2*half_x + 1) x (2*half_y + 1)` cells
///   before clipping. Both default to 1.
/// - **block_size**: Block edge override. `None` selects
///   `4*(max(half_x, half_y) + 2)`. Any value with
///   `2*half + 1 <= block_size` on both axes produces identical output.
///
/// ## Errors
/// - **EmptyData**: median_filter_2d: Input holds no cells.
/// - **GridSizeMismatch**: median_filter_2d: Slice length differs from
///   `width * height`.
/// - **OutputLengthMismatch**: median_filter_2d: Output slice length
///   differs from the input cell count.
/// - **BlockTooSmall**: median_filter_2d: `block_size` cannot hold a full
///   window along the named axis.
///
/// ## Returns
/// - **`Ok(MedianFilter2dOutput)`** on success, containing a row-major
///   `Vec<f64>` matching the input cell count.
/// - **`Err(MedianFilter2dError)`** otherwise.
use crate::engine::blocks::{choose_block_size_2d, BlockDim};
use crate::engine::med_calc::MedCalc2d;
use crate::utilities::grid::Grid;
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum MedianFilter2dData<'a> {
    Grid(&'a Grid),
    Slice {
        data: &'a [f64],
        width: usize,
        height: usize,
    },
}

impl<'a> MedianFilter2dData<'a> {
    fn resolve(&self) -> Result<(&'a [f64], usize, usize), MedianFilter2dError> {
        match self {
            MedianFilter2dData::Grid(grid) => Ok((grid.values(), grid.width(), grid.height())),
            MedianFilter2dData::Slice {
                data,
                width,
                height,
            } => {
                if width.checked_mul(*height) != Some(data.len()) {
                    return Err(MedianFilter2dError::GridSizeMismatch {
                        width: *width,
                        height: *height,
                        len: data.len(),
                    });
                }
                Ok((data, *width, *height))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct MedianFilter2dOutput {
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct MedianFilter2dParams {
    pub half_x: Option<usize>,
    pub half_y: Option<usize>,
    pub block_size: Option<usize>,
}

impl Default for MedianFilter2dParams {
    fn default() -> Self {
        Self {
            half_x: Some(1),
            half_y: Some(1),
            block_size: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MedianFilter2dInput<'a> {
    pub data: MedianFilter2dData<'a>,
    pub params: MedianFilter2dParams,
}

impl<'a> MedianFilter2dInput<'a> {
    pub fn from_grid(grid: &'a Grid, params: MedianFilter2dParams) -> Self {
        Self {
            data: MedianFilter2dData::Grid(grid),
            params,
        }
    }

    pub fn from_slice(
        data: &'a [f64],
        width: usize,
        height: usize,
        params: MedianFilter2dParams,
    ) -> Self {
        Self {
            data: MedianFilter2dData::Slice {
                data,
                width,
                height,
            },
            params,
        }
    }

    pub fn with_default_params(grid: &'a Grid) -> Self {
        Self {
            data: MedianFilter2dData::Grid(grid),
            params: MedianFilter2dParams::default(),
        }
    }

    pub fn get_half_x(&self) -> usize {
        self.params
            .half_x
            .unwrap_or_else(|| MedianFilter2dParams::default().half_x.unwrap())
    }

    pub fn get_half_y(&self) -> usize {
        self.params
            .half_y
            .unwrap_or_else(|| MedianFilter2dParams::default().half_y.unwrap())
    }

    pub fn get_block_size(&self) -> usize {
        match self.params.block_size {
            Some(block) => block,
            None => choose_block_size_2d(self.get_half_x().max(self.get_half_y())),
        }
    }
}

#[derive(Debug, Error)]
pub enum MedianFilter2dError {
    #[error("median_filter_2d: Empty data provided.")]
    EmptyData,
    #[error(
        "median_filter_2d: Grid size mismatch: width = {width}, height = {height}, values = {len}"
    )]
    GridSizeMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
    #[error("median_filter_2d: Output length mismatch: expected = {expected}, got = {got}")]
    OutputLengthMismatch { expected: usize, got: usize },
    #[error(
        "median_filter_2d: Block size {block_size} is too small for half-width {half_width} on the {axis} axis."
    )]
    BlockTooSmall {
        axis: &'static str,
        half_width: usize,
        block_size: usize,
    },
}

#[inline]
pub fn median_filter_2d(
    input: &MedianFilter2dInput,
) -> Result<MedianFilter2dOutput, MedianFilter2dError> {
    let (data, _, _) = input.data.resolve()?;
    let mut values = vec![0.0; data.len()];
    median_filter_2d_into(input, &mut values)?;
    Ok(MedianFilter2dOutput { values })
}

/// Writes the filtered array into a caller-provided row-major slice with
/// as many cells as the input. Input and output cannot alias; the borrow
/// rules already forbid it.
pub fn median_filter_2d_into(
    input: &MedianFilter2dInput,
    output: &mut [f64],
) -> Result<(), MedianFilter2dError> {
    let (data, width, height) = input.data.resolve()?;
    if data.is_empty() {
        return Err(MedianFilter2dError::EmptyData);
    }
    if output.len() != data.len() {
        return Err(MedianFilter2dError::OutputLengthMismatch {
            expected: data.len(),
            got: output.len(),
        });
    }

    let half_x = input.get_half_x();
    let half_y = input.get_half_y();
    let block_size = input.get_block_size();
    if 2 * half_x + 1 > block_size {
        return Err(MedianFilter2dError::BlockTooSmall {
            axis: "x",
            half_width: half_x,
            block_size,
        });
    }
    if 2 * half_y + 1 > block_size {
        return Err(MedianFilter2dError::BlockTooSmall {
            axis: "y",
            half_width: half_y,
            block_size,
        });
    }

    let dim_x = BlockDim::new(width, half_x, block_size);
    let dim_y = BlockDim::new(height, half_y, block_size);
    MedCalc2d::new(dim_x, dim_y, data, output).run();
    Ok(())
}
