mod grids;
pub(crate) use grids::{depth_grid, float_grid, gray_2x2, rgb_1x2, rgba_2x2};
