pub mod error;
pub use error::{Error, Result, Stage};

pub mod grid;
pub use grid::{AnyGrid, ChannelMode, ElementType, Geometry, PixelGrid, Sample, SampleBuffer};

pub mod image;
pub mod io;

pub mod pipeline;
pub use pipeline::{convert, convert_batch, ConversionJob, ConversionReport, InputSource, OutputMode};

mod validate;
pub use validate::{validate, validate_buffer};

#[cfg(test)]
mod unit_test;
