use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rstest::fixture;

use crate::grid::PixelGrid;

/// `[[1, 2], [3, 4]]`, one channel.
#[fixture]
pub fn gray_2x2() -> PixelGrid<u8> {
    PixelGrid::from_samples(vec![1, 2, 3, 4], 2, 2, 1).unwrap()
}

/// `[[(10, 20, 30), (40, 50, 60)]]`.
#[fixture]
pub fn rgb_1x2() -> PixelGrid<u8> {
    PixelGrid::from_samples(vec![10, 20, 30, 40, 50, 60], 2, 1, 3).unwrap()
}

#[fixture]
pub fn rgba_2x2() -> PixelGrid<u8> {
    PixelGrid::from_samples((0..16).map(|v| v * 16).collect(), 2, 2, 4).unwrap()
}

/// A 48x32 depth frame with random millimeter values, and a few holes.
#[fixture]
pub fn depth_grid() -> PixelGrid<u16> {
    let mut rng = StdRng::seed_from_u64(42);
    let depth = Array2::from_shape_fn((32, 48), |(row, col)| {
        if (row + col) % 17 == 0 {
            0
        } else {
            rng.gen_range(300..10000)
        }
    });
    PixelGrid::from_array2(depth)
}

#[fixture]
pub fn float_grid() -> PixelGrid<f32> {
    PixelGrid::from_samples(vec![0.0, 0.5, 1.25, -2.0, 100.0, 0.333], 3, 2, 1).unwrap()
}
