mod channel_mode;
pub use channel_mode::ChannelMode;

mod element;
pub use element::{ElementType, Sample};

mod geometry;
pub(crate) use geometry::expected_samples;
pub use geometry::Geometry;

mod pixel_grid;
pub(crate) use pixel_grid::with_grid;
pub use pixel_grid::{AnyGrid, Pixel, PixelGrid, Pixels};

mod sample_buffer;
pub use sample_buffer::SampleBuffer;
