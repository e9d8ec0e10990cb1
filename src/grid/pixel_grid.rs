use ndarray::{Array2, Array3, ArrayView3, Axis};

use super::{ChannelMode, ElementType, Geometry, Sample};
use crate::error::Result;

/// Typed pixel buffer in row-major `(height, width, channels)` order.
///
/// The fastest varying index is the channel, then the column, then the row.
/// The number of samples always equals `width * height * channels`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid<T> {
    data: Array3<T>,
}

impl<T: Sample> PixelGrid<T> {
    /// Wraps an `(height, width, channels)` array. Arrays in non standard
    /// layout are copied into row-major order.
    pub fn from_array(data: Array3<T>) -> Self {
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Self { data }
    }

    /// Wraps a single channel `(height, width)` array, like a depth frame.
    pub fn from_array2(data: Array2<T>) -> Self {
        Self::from_array(data.insert_axis(Axis(2)))
    }

    /// Reshapes a flat sample sequence, see [`crate::validate`].
    pub fn from_samples(
        samples: Vec<T>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self> {
        crate::validate::validate(samples, width, height, channels)
    }

    pub fn width(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn height(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn channels(&self) -> usize {
        self.data.shape()[2]
    }

    pub fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    pub fn channel_mode(&self) -> ChannelMode {
        ChannelMode::from_channels(self.channels())
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(
            self.width(),
            self.height(),
            self.channels(),
            self.element_type(),
        )
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, column: usize, channel: usize) -> Option<T> {
        self.data.get([row, column, channel]).copied()
    }

    pub fn as_array(&self) -> ArrayView3<T> {
        self.data.view()
    }

    pub fn into_array(self) -> Array3<T> {
        self.data
    }

    /// The samples in row-major order.
    pub fn samples(&self) -> &[T] {
        // Constructors only keep standard layout arrays.
        self.data
            .as_slice()
            .expect("pixel grid must be in standard layout")
    }

    /// The samples reinterpreted as native-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.samples())
    }

    /// Lazy row-then-column traversal of the pixels.
    pub fn pixels(&self) -> Pixels<'_, T> {
        Pixels {
            samples: self.samples(),
            width: self.width(),
            channels: self.channels(),
            index: 0,
            count: self.width() * self.height(),
        }
    }
}

/// One pixel yielded by [`PixelGrid::pixels`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel<'a, T> {
    pub row: usize,
    pub column: usize,
    pub values: &'a [T],
}

pub struct Pixels<'a, T> {
    samples: &'a [T],
    width: usize,
    channels: usize,
    index: usize,
    count: usize,
}

impl<'a, T> Iterator for Pixels<'a, T> {
    type Item = Pixel<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let start = self.index * self.channels;
        let pixel = Pixel {
            row: self.index / self.width,
            column: self.index % self.width,
            values: &self.samples[start..start + self.channels],
        };
        self.index += 1;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for Pixels<'a, T> {}

/// A pixel grid whose element type is only known at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyGrid {
    U8(PixelGrid<u8>),
    U16(PixelGrid<u16>),
    F32(PixelGrid<f32>),
}

/// Runs `$body` with `$grid` bound to the typed grid inside an [`AnyGrid`].
macro_rules! with_grid {
    ($any:expr, $grid:ident => $body:expr) => {
        match $any {
            $crate::grid::AnyGrid::U8($grid) => $body,
            $crate::grid::AnyGrid::U16($grid) => $body,
            $crate::grid::AnyGrid::F32($grid) => $body,
        }
    };
}
pub(crate) use with_grid;

impl AnyGrid {
    pub fn element_type(&self) -> ElementType {
        match self {
            AnyGrid::U8(_) => ElementType::U8,
            AnyGrid::U16(_) => ElementType::U16,
            AnyGrid::F32(_) => ElementType::F32,
        }
    }

    pub fn geometry(&self) -> Geometry {
        with_grid!(self, grid => grid.geometry())
    }

    pub fn width(&self) -> usize {
        with_grid!(self, grid => grid.width())
    }

    pub fn height(&self) -> usize {
        with_grid!(self, grid => grid.height())
    }

    pub fn channels(&self) -> usize {
        with_grid!(self, grid => grid.channels())
    }

    pub fn channel_mode(&self) -> ChannelMode {
        ChannelMode::from_channels(self.channels())
    }

    pub fn len(&self) -> usize {
        with_grid!(self, grid => grid.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        with_grid!(self, grid => grid.as_bytes())
    }
}

impl From<PixelGrid<u8>> for AnyGrid {
    fn from(grid: PixelGrid<u8>) -> Self {
        AnyGrid::U8(grid)
    }
}

impl From<PixelGrid<u16>> for AnyGrid {
    fn from(grid: PixelGrid<u16>) -> Self {
        AnyGrid::U16(grid)
    }
}

impl From<PixelGrid<f32>> for AnyGrid {
    fn from(grid: PixelGrid<f32>) -> Self {
        AnyGrid::F32(grid)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array3, ShapeBuilder};
    use rstest::rstest;

    use super::{AnyGrid, PixelGrid};
    use crate::{
        grid::{ChannelMode, ElementType},
        unit_test::{gray_2x2, rgb_1x2},
    };

    #[rstest]
    fn should_expose_geometry(rgb_1x2: PixelGrid<u8>) {
        assert_eq!(rgb_1x2.width(), 2);
        assert_eq!(rgb_1x2.height(), 1);
        assert_eq!(rgb_1x2.channels(), 3);
        assert_eq!(rgb_1x2.channel_mode(), ChannelMode::Rgb);
        assert_eq!(rgb_1x2.element_type(), ElementType::U8);
        assert_eq!(rgb_1x2.get(0, 1, 2), Some(60));
        assert_eq!(rgb_1x2.get(1, 0, 0), None);
    }

    #[rstest]
    fn should_traverse_pixels_row_then_column(gray_2x2: PixelGrid<u8>) {
        let visited: Vec<(usize, usize, u8)> = gray_2x2
            .pixels()
            .map(|pixel| (pixel.row, pixel.column, pixel.values[0]))
            .collect();
        assert_eq!(visited, vec![(0, 0, 1), (0, 1, 2), (1, 0, 3), (1, 1, 4)]);
        assert_eq!(gray_2x2.pixels().len(), 4);
    }

    #[test]
    fn should_wrap_depth_frames() {
        let depth = array![[1000u16, 1001, 1002], [0, 65535, 7]];
        let grid = PixelGrid::from_array2(depth);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.channels(), 1);
        assert_eq!(grid.samples(), &[1000, 1001, 1002, 0, 65535, 7]);
    }

    #[test]
    fn should_make_fortran_layout_row_major() {
        let samples: Vec<u8> = (0..12).collect();
        let data = Array3::from_shape_vec((2, 3, 2).f(), samples).unwrap();
        let expected: Vec<u8> = data.iter().copied().collect();
        let grid = PixelGrid::from_array(data);
        assert_eq!(grid.samples(), expected.as_slice());
    }

    #[test]
    fn should_view_samples_as_native_bytes() {
        let grid = PixelGrid::from_samples(vec![0x0102u16, 0x0304], 2, 1, 1).unwrap();
        let any = AnyGrid::from(grid);
        let expected: Vec<u8> = [0x0102u16, 0x0304]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        assert_eq!(any.as_bytes(), expected.as_slice());
        assert_eq!(any.element_type(), ElementType::U16);
    }
}
