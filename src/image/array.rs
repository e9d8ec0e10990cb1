use image::{flat::SampleLayout, ImageBuffer, Pixel};
use ndarray::{Array3, ShapeBuilder};

/// Trait to convert into ndarray::Array3, this is different than nshare version
/// because it uses the shape [height, width, channels] instead of [channels, height, width].
pub trait IntoArray3<T> {
    fn into_array3(self) -> Array3<T>;
}

impl<P: Pixel> IntoArray3<P::Subpixel> for ImageBuffer<P, Vec<P::Subpixel>> {
    fn into_array3(self) -> Array3<P::Subpixel> {
        let SampleLayout {
            channels,
            channel_stride,
            height,
            height_stride,
            width,
            width_stride,
        } = self.sample_layout();
        let shape = (height as usize, width as usize, channels as usize);
        let strides = (height_stride, width_stride, channel_stride);
        Array3::from_shape_vec(shape.strides(strides), self.into_raw())
            .expect("image buffers are packed row-major")
    }
}
