/// # 1D Median Filter (MEDIAN_1D)
///
/// Sliding-window median of a 1D series of `f64` samples. Each output
/// position receives the median of the input values inside the window of
/// half-width `half_width` centered on it, truncated at the array edges.
/// NaN samples are excluded from every window; a window holding only NaN
/// yields NaN.
///
/// The series is processed in overlapping blocks; inside each block the
/// values are ranked once and the window then slides with constant-cost
/// membership updates against a popcount-indexed bitset.
///
/// ## Parameters
/// - **half_width**: Window half-width; the window spans `2*half_width + 1`
///   samples before clipping. Defaults to 1.
/// - **block_size**: Block edge override. `None` selects `8*(half_width+2)`.
///   Any value with `2*half_width + 1 <= block_size` produces identical
///   output.
///
/// ## Errors
/// - **EmptyData**: median_filter_1d: Input data slice is empty.
/// - **OutputLengthMismatch**: median_filter_1d: Output slice length differs
///   from the input length.
/// - **BlockTooSmall**: median_filter_1d: `block_size` cannot hold a full
///   window (`2*half_width + 1 > block_size`).
///
/// ## Returns
/// - **`Ok(MedianFilter1dOutput)`** on success, containing a `Vec<f64>`
///   matching the input length.
/// - **`Err(MedianFilter1dError)`** otherwise.
use crate::engine::blocks::{choose_block_size_1d, BlockDim};
use crate::engine::med_calc::MedCalc1d;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct MedianFilter1dOutput {
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct MedianFilter1dParams {
    pub half_width: Option<usize>,
    pub block_size: Option<usize>,
}

impl Default for MedianFilter1dParams {
    fn default() -> Self {
        Self {
            half_width: Some(1),
            block_size: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MedianFilter1dInput<'a> {
    pub data: &'a [f64],
    pub params: MedianFilter1dParams,
}

impl<'a> MedianFilter1dInput<'a> {
    pub fn from_slice(data: &'a [f64], params: MedianFilter1dParams) -> Self {
        Self { data, params }
    }

    pub fn with_default_params(data: &'a [f64]) -> Self {
        Self {
            data,
            params: MedianFilter1dParams::default(),
        }
    }

    pub fn get_half_width(&self) -> usize {
        self.params
            .half_width
            .unwrap_or_else(|| MedianFilter1dParams::default().half_width.unwrap())
    }

    pub fn get_block_size(&self) -> usize {
        match self.params.block_size {
            Some(block) => block,
            None => choose_block_size_1d(self.get_half_width()),
        }
    }
}

#[derive(Debug, Error)]
pub enum MedianFilter1dError {
    #[error("median_filter_1d: Empty data provided.")]
    EmptyData,
    #[error("median_filter_1d: Output length mismatch: expected = {expected}, got = {got}")]
    OutputLengthMismatch { expected: usize, got: usize },
    #[error(
        "median_filter_1d: Block size {block_size} is too small for half-width {half_width}."
    )]
    BlockTooSmall {
        half_width: usize,
        block_size: usize,
    },
}

#[inline]
pub fn median_filter_1d(
    input: &MedianFilter1dInput,
) -> Result<MedianFilter1dOutput, MedianFilter1dError> {
    let mut values = vec![0.0; input.data.len()];
    median_filter_1d_into(input, &mut values)?;
    Ok(MedianFilter1dOutput { values })
}

/// Writes the filtered series into a caller-provided slice of the same
/// length as the input. Input and output cannot alias; the borrow rules
/// already forbid it.
pub fn median_filter_1d_into(
    input: &MedianFilter1dInput,
    output: &mut [f64],
) -> Result<(), MedianFilter1dError> {
    let data = input.data;
    if data.is_empty() {
        return Err(MedianFilter1dError::EmptyData);
    }
    if output.len() != data.len() {
        return Err(MedianFilter1dError::OutputLengthMismatch {
            expected: data.len(),
            got: output.len(),
        });
    }

    let half_width = input.get_half_width();
    let block_size = input.get_block_size();
    if 2 * half_width + 1 > block_size {
        return Err(MedianFilter1dError::BlockTooSmall {
            half_width,
            block_size,
        });
    }

    let dim = BlockDim::new(data.len(), half_width, block_size);
    MedCalc1d::new(dim, data, output).run();
    Ok(())
}
