use crate::{ColorModel, PixelFormat};

/// A rectangle in pixel space.
///
/// The origin may be anywhere, including at negative coordinates. A
/// rectangle contains the points `x..x + width` by `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}
impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    /// A rectangle with its origin at `(0, 0)`.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the position of `(x, y)` relative to the origin if the point
    /// lies inside the rectangle.
    pub fn relative(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let dx = x as i64 - self.x as i64;
        let dy = y as i64 - self.y as i64;
        if (0..self.width as i64).contains(&dx) && (0..self.height as i64).contains(&dy) {
            Some((dx as u32, dy as u32))
        } else {
            None
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.relative(x, y).is_some()
    }
}

/// Random access to the pixels of an image.
///
/// This is the interface a host imaging framework needs from a decoded
/// surface: its bounds, its color model, and per-pixel samples.
pub trait PixelAccess {
    /// The rectangle of valid pixel coordinates.
    fn bounds(&self) -> Rect;
    /// The channels and encoded bit depths of the pixels.
    fn color_model(&self) -> ColorModel;
    /// Returns the RGBA sample at `(x, y)` with 16 bits per channel.
    ///
    /// Points outside of [`Self::bounds`] yield `[0, 0, 0, 0]`.
    fn at(&self, x: i32, y: i32) -> [u16; 4];
    /// Sets the pixel at `(x, y)`.
    ///
    /// Points outside of [`Self::bounds`] are ignored.
    fn set(&mut self, x: i32, y: i32, rgba: [u16; 4]);
}

/// A rectangular buffer of encoded pixels in one [`PixelFormat`].
///
/// The buffer stores the raw bytes as they appear in a DDS file: rows of
/// pixels for packed formats and rows of 4x4 blocks for DXT formats.
/// Pixels are decoded on access.
///
/// The length of the byte store is always `stride * rows`, where `rows` is
/// the height for packed formats and the height in blocks (rounded up) for
/// DXT formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    format: PixelFormat,
    rect: Rect,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// The sample returned for points outside of the buffer.
    pub const TRANSPARENT: [u16; 4] = [0; 4];

    /// Allocates a zeroed buffer for the given rectangle.
    ///
    /// Returns `None` if the byte size of the buffer does not fit into
    /// `usize`.
    pub fn new(format: PixelFormat, rect: Rect) -> Option<Self> {
        let len = format.surface_len(rect.width, rect.height)?;
        Self::from_bytes(format, rect, vec![0; len])
    }

    /// Creates a buffer from encoded bytes.
    ///
    /// Returns `None` if `data` does not have exactly the byte length
    /// required for the format and rectangle.
    pub fn from_bytes(format: PixelFormat, rect: Rect, data: Vec<u8>) -> Option<Self> {
        let stride = format.row_pitch(rect.width)?;
        let len = format.surface_len(rect.width, rect.height)?;
        if data.len() != len {
            return None;
        }

        Some(Self {
            format,
            rect,
            stride,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }
    pub fn rect(&self) -> Rect {
        self.rect
    }
    pub fn width(&self) -> u32 {
        self.rect.width
    }
    pub fn height(&self) -> u32 {
        self.rect.height
    }
    /// The number of bytes between two rows of pixels, or two rows of blocks
    /// for DXT formats.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The byte offset of the unit (pixel or block) containing `(x, y)`.
    ///
    /// Returns `None` for points outside of the buffer.
    pub fn offset_of(&self, x: i32, y: i32) -> Option<usize> {
        let (dx, dy) = self.rect.relative(x, y)?;
        let block_size = self.format.block_size();
        Some(
            (dy / block_size) as usize * self.stride
                + (dx / block_size) as usize * self.format.bytes_per_unit(),
        )
    }

    /// The encoded bytes of the pixel or block containing `(x, y)`.
    pub fn unit_at(&self, x: i32, y: i32) -> Option<&[u8]> {
        let offset = self.offset_of(x, y)?;
        self.data
            .get(offset..offset + self.format.bytes_per_unit())
    }

    pub fn at(&self, x: i32, y: i32) -> [u16; 4] {
        let Some((dx, dy)) = self.rect.relative(x, y) else {
            return Self::TRANSPARENT;
        };
        let Some(unit) = self.unit_at(x, y) else {
            return Self::TRANSPARENT;
        };

        let block_size = self.format.block_size();
        self.format
            .decode_pixel(unit, dx % block_size, dy % block_size)
    }

    /// Encodes `rgba` into the pixel at `(x, y)`.
    ///
    /// Points outside the buffer are ignored. Block-compressed formats
    /// cannot be written per pixel, so this does nothing for them.
    pub fn set(&mut self, x: i32, y: i32, rgba: [u16; 4]) {
        let Some(offset) = self.offset_of(x, y) else {
            return;
        };
        let len = self.format.bytes_per_unit();
        if let Some(unit) = self.data.get_mut(offset..offset + len) {
            self.format.encode_pixel(unit, rgba);
        }
    }
}

impl PixelAccess for PixelBuffer {
    fn bounds(&self) -> Rect {
        self.rect
    }
    fn color_model(&self) -> ColorModel {
        self.format.color_model()
    }
    fn at(&self, x: i32, y: i32) -> [u16; 4] {
        PixelBuffer::at(self, x, y)
    }
    fn set(&mut self, x: i32, y: i32, rgba: [u16; 4]) {
        PixelBuffer::set(self, x, y, rgba)
    }
}
