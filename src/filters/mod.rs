pub mod median_1d;
pub mod median_2d;

pub use median_1d::{
    median_filter_1d, median_filter_1d_into, MedianFilter1dError, MedianFilter1dInput,
    MedianFilter1dOutput, MedianFilter1dParams,
};
pub use median_2d::{
    median_filter_2d, median_filter_2d_into, MedianFilter2dData, MedianFilter2dError,
    MedianFilter2dInput, MedianFilter2dOutput, MedianFilter2dParams,
};
