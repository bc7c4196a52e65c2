//! Packed pixel formats: several channels sharing one little-endian word.
//!
//! Every format decodes to `[R, G, B, A]` with 16 bits per channel, which is
//! the canonical sample type of this crate. Encoding is the inverse and
//! keeps the most significant bits of each channel, so it is lossy for all
//! formats with less than 16 bits per channel.

use super::convert::{n1, n4, n5, n6, n8};

/// A packed pixel value with a fixed number of bytes.
pub trait PackedColor: Copy {
    /// Number of bytes of one encoded pixel.
    const BYTES_PER_PIXEL: usize;

    /// Reads a pixel from the first [`Self::BYTES_PER_PIXEL`] bytes.
    ///
    /// ## Panics
    ///
    /// Panics if `bytes` is shorter than [`Self::BYTES_PER_PIXEL`].
    fn read(bytes: &[u8]) -> Self;
    /// Writes the pixel into the first [`Self::BYTES_PER_PIXEL`] bytes.
    ///
    /// ## Panics
    ///
    /// Panics if `bytes` is shorter than [`Self::BYTES_PER_PIXEL`].
    fn write(self, bytes: &mut [u8]);

    /// Decodes to 16-bit RGBA.
    fn decode(self) -> [u16; 4];
    /// Encodes 16-bit RGBA.
    fn encode(rgba: [u16; 4]) -> Self;
}

/// 8 bits per channel stored as the bytes B, G, R, A.
///
/// DX9 calls this A8R8G8B8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bgra8888 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}
impl PackedColor for Bgra8888 {
    const BYTES_PER_PIXEL: usize = 4;

    fn read(bytes: &[u8]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }
    fn write(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&[self.b, self.g, self.r, self.a]);
    }

    fn decode(self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a].map(n8::n16)
    }
    fn encode(rgba: [u16; 4]) -> Self {
        let [r, g, b, a] = rgba.map(n8::from_n16);
        Self { b, g, r, a }
    }
}

#[inline(always)]
fn decode_565(u: u16) -> [u16; 4] {
    [
        n5::n16((u >> 11) & 0x1F),
        n6::n16((u >> 5) & 0x3F),
        n5::n16(u & 0x1F),
        u16::MAX,
    ]
}
#[inline(always)]
fn encode_565([r, g, b, _]: [u16; 4]) -> u16 {
    n5::from_n16(r) << 11 | n6::from_n16(g) << 5 | n5::from_n16(b)
}

macro_rules! packed_u16 {
    ($name:ident, $decode:expr, $encode:expr) => {
        impl PackedColor for $name {
            const BYTES_PER_PIXEL: usize = 2;

            fn read(bytes: &[u8]) -> Self {
                Self(u16::from_le_bytes([bytes[0], bytes[1]]))
            }
            fn write(self, bytes: &mut [u8]) {
                bytes[..2].copy_from_slice(&self.0.to_le_bytes());
            }

            fn decode(self) -> [u16; 4] {
                let f: fn(u16) -> [u16; 4] = $decode;
                f(self.0)
            }
            fn encode(rgba: [u16; 4]) -> Self {
                let f: fn([u16; 4]) -> u16 = $encode;
                Self(f(rgba))
            }
        }
    };
}

/// 5/6/5 bits for R/G/B with R in the most significant bits. No alpha.
///
/// DX9 calls this R5G6B5; the masks are `0xF800`, `0x07E0`, `0x001F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bgr565(pub u16);
packed_u16!(Bgr565, decode_565, encode_565);

/// The 5/6/5 endpoint colors of DXT blocks.
///
/// The bit layout is the same as [`Bgr565`]. The raw value matters on its
/// own: DXT1 blocks choose their palette by comparing the raw values of the
/// two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgb565(pub u16);
packed_u16!(Rgb565, decode_565, encode_565);

/// 5 bits for each of R, G, B and a single alpha bit in the most significant
/// bit.
///
/// DX9 calls this A1R5G5B5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bgra5551(pub u16);
packed_u16!(
    Bgra5551,
    |u| [
        n5::n16((u >> 10) & 0x1F),
        n5::n16((u >> 5) & 0x1F),
        n5::n16(u & 0x1F),
        n1::n16(u >> 15),
    ],
    |[r, g, b, a]| n1::from_n16(a) << 15
        | n5::from_n16(r) << 10
        | n5::from_n16(g) << 5
        | n5::from_n16(b)
);

/// 4 bits for each channel with alpha in the most significant nibble.
///
/// DX9 calls this A4R4G4B4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bgra4444(pub u16);
packed_u16!(
    Bgra4444,
    |u| [
        n4::n16((u >> 8) & 0xF),
        n4::n16((u >> 4) & 0xF),
        n4::n16(u & 0xF),
        n4::n16(u >> 12),
    ],
    |[r, g, b, a]| n4::from_n16(a) << 12
        | n4::from_n16(r) << 8
        | n4::from_n16(g) << 4
        | n4::from_n16(b)
);
