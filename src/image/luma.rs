use image::{ImageBuffer, Luma};
use nshare::ToNdarray2;

use crate::grid::{PixelGrid, Sample};

/// Trait to convert single channel images (grayscale or depth) into a grid.
pub trait IntoLumaGrid<T> {
    fn into_luma_grid(self) -> PixelGrid<T>;
}

impl<T> IntoLumaGrid<T> for ImageBuffer<Luma<T>, Vec<T>>
where
    T: Sample + image::Primitive,
{
    fn into_luma_grid(self) -> PixelGrid<T> {
        PixelGrid::from_array2(self.into_ndarray2())
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Luma};

    use super::IntoLumaGrid;

    #[test]
    fn should_convert_depth_image() {
        let depth = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(4, 3, |x, y| Luma([(y * 10 + x) as u16]));
        let grid = depth.into_luma_grid();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.channels(), 1);
        assert_eq!(grid.get(2, 3, 0), Some(23));
    }
}
