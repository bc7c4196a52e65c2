use image::{ColorType, DynamicImage, ImageBuffer, Rgba};

use crate::{Channels, ColorModel, DdsImage, PixelBuffer};

impl From<&PixelBuffer> for ImageBuffer<Rgba<u16>, Vec<u16>> {
    /// Decodes every pixel of the buffer into a 16-bit RGBA image.
    ///
    /// Pixel `(0, 0)` of the result is the top-left corner of the buffer's
    /// rectangle, wherever its origin is. Pixels whose coordinates do not fit
    /// into `i32` are transparent.
    fn from(buffer: &PixelBuffer) -> Self {
        let rect = buffer.rect();
        let offset = |origin: i32, d: u32| i32::try_from(d).ok()?.checked_add(origin);
        ImageBuffer::from_fn(rect.width, rect.height, |x, y| {
            let rgba = match (offset(rect.x, x), offset(rect.y, y)) {
                (Some(x), Some(y)) => buffer.at(x, y),
                _ => PixelBuffer::TRANSPARENT,
            };
            Rgba(rgba)
        })
    }
}

impl From<&PixelBuffer> for DynamicImage {
    fn from(buffer: &PixelBuffer) -> Self {
        DynamicImage::ImageRgba16(buffer.into())
    }
}

impl From<&DdsImage> for DynamicImage {
    /// Converts the full-resolution mip level.
    fn from(image: &DdsImage) -> Self {
        image.main().into()
    }
}

impl From<ColorModel> for ColorType {
    /// The `image` color type that holds decoded samples of this color model
    /// without loss.
    fn from(color: ColorModel) -> Self {
        match color.channels {
            Channels::Rgb => ColorType::Rgb16,
            Channels::Rgba => ColorType::Rgba16,
        }
    }
}
