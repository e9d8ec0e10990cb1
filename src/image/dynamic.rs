use image::{ColorType, DynamicImage};

use super::{IntoArray3, IntoLumaGrid};
use crate::{
    error::{Error, Result},
    grid::{AnyGrid, ChannelMode, PixelGrid},
};

/// Trait to convert decoded images into a grid of their native depth.
pub trait IntoAnyGrid {
    fn into_any_grid(self) -> AnyGrid;
}

impl IntoAnyGrid for DynamicImage {
    fn into_any_grid(self) -> AnyGrid {
        match self {
            DynamicImage::ImageLuma8(image) => image.into_luma_grid().into(),
            DynamicImage::ImageLumaA8(image) => PixelGrid::from_array(image.into_array3()).into(),
            DynamicImage::ImageRgb8(image) => PixelGrid::from_array(image.into_array3()).into(),
            DynamicImage::ImageRgba8(image) => PixelGrid::from_array(image.into_array3()).into(),
            DynamicImage::ImageLuma16(image) => image.into_luma_grid().into(),
            DynamicImage::ImageLumaA16(image) => PixelGrid::from_array(image.into_array3()).into(),
            DynamicImage::ImageRgb16(image) => PixelGrid::from_array(image.into_array3()).into(),
            DynamicImage::ImageRgba16(image) => PixelGrid::from_array(image.into_array3()).into(),
            DynamicImage::ImageRgb32F(image) => PixelGrid::from_array(image.into_array3()).into(),
            other => PixelGrid::from_array(other.into_rgba32f().into_array3()).into(),
        }
    }
}

/// Color type used to encode an 8-bit grid with the given channel mode.
pub fn color_type_u8(mode: ChannelMode) -> Result<ColorType> {
    match mode {
        ChannelMode::L => Ok(ColorType::L8),
        ChannelMode::La => Ok(ColorType::La8),
        ChannelMode::Rgb => Ok(ColorType::Rgb8),
        ChannelMode::Rgba => Ok(ColorType::Rgba8),
        ChannelMode::Other(channels) => Err(Error::UnsupportedLayout(channels)),
    }
}
