//! S3TC/DXT block decoding.
//!
//! All functions decode a single pixel of a single 4x4 block. Nothing is
//! cached between calls: every call re-reads the endpoints and index bits
//! from the raw block. Callers that sample the same block repeatedly should
//! cache the decoded pixels themselves.
//!
//! https://www.khronos.org/registry/OpenGL/extensions/EXT/EXT_texture_compression_s3tc.txt

use super::convert::{n4, n8};
use super::packed::{PackedColor, Rgb565};

/// The index of a pixel within a 4x4 block, in row-major order.
#[inline(always)]
fn pixel_index(x: u32, y: u32) -> u32 {
    debug_assert!(x < 4 && y < 4);
    y * 4 + x
}

/// The 2-bit palette index of pixel `(x, y)` in a DXT1 color block.
pub fn dxt1_color_index(block_bytes: [u8; 8], x: u32, y: u32) -> u8 {
    let indexes = u32::from_le_bytes([
        block_bytes[4],
        block_bytes[5],
        block_bytes[6],
        block_bytes[7],
    ]);
    ((indexes >> (2 * pixel_index(x, y))) & 0x3) as u8
}

/// Decodes pixel `(x, y)` of a DXT1 (BC1) block.
///
/// The result is always fully opaque. DXT1 blocks with `c0 <= c1` may use
/// index 3 to mark transparent pixels, but this decoder returns opaque black
/// for them.
pub fn dxt1_pixel(block_bytes: [u8; 8], x: u32, y: u32) -> [u16; 4] {
    // https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc1
    let c0 = Rgb565::read(&block_bytes[0..2]);
    let c1 = Rgb565::read(&block_bytes[2..4]);

    let index = dxt1_color_index(block_bytes, x, y);
    match index {
        0 => c0.decode(),
        1 => c1.decode(),
        _ => {
            let [r0, g0, b0, _] = c0.decode().map(u32::from);
            let [r1, g1, b1, _] = c1.decode().map(u32::from);

            // The palette depends on the raw 16-bit values, not on the
            // individual channels.
            let [r, g, b] = if c0 > c1 {
                if index == 2 {
                    [(2 * r0 + r1) / 3, (2 * g0 + g1) / 3, (2 * b0 + b1) / 3]
                } else {
                    [(r0 + 2 * r1) / 3, (g0 + 2 * g1) / 3, (b0 + 2 * b1) / 3]
                }
            } else if index == 2 {
                [(r0 + r1) / 2, (g0 + g1) / 2, (b0 + b1) / 2]
            } else {
                [0, 0, 0]
            };

            [r as u16, g as u16, b as u16, u16::MAX]
        }
    }
}

/// The explicit 4-bit alpha of pixel `(x, y)` in a DXT3 alpha block.
pub fn dxt3_alpha(alpha_bytes: [u8; 8], x: u32, y: u32) -> u16 {
    let alphas = u64::from_le_bytes(alpha_bytes);
    let a4 = (alphas >> (4 * pixel_index(x, y))) & 0xF;
    n4::n16(a4 as u16)
}

/// Decodes pixel `(x, y)` of a DXT3 (BC2) block.
///
/// Bytes 0-7 hold 16 explicit 4-bit alpha values, bytes 8-15 a DXT1 color
/// block.
pub fn dxt3_pixel(block_bytes: [u8; 16], x: u32, y: u32) -> [u16; 4] {
    let [alpha, color] = split_block(block_bytes);
    let [r, g, b, _] = dxt1_pixel(color, x, y);
    [r, g, b, dxt3_alpha(alpha, x, y)]
}

/// The 3-bit alpha index of pixel `(x, y)` in a DXT5 alpha block.
pub fn dxt5_alpha_index(alpha_bytes: [u8; 8], x: u32, y: u32) -> u8 {
    let indexes = u64::from_le_bytes([
        alpha_bytes[2],
        alpha_bytes[3],
        alpha_bytes[4],
        alpha_bytes[5],
        alpha_bytes[6],
        alpha_bytes[7],
        0,
        0,
    ]);
    ((indexes >> (3 * pixel_index(x, y))) & 0x7) as u8
}

/// The interpolated alpha of pixel `(x, y)` in a DXT5 alpha block.
///
/// Bytes 0 and 1 are the 8-bit anchors `a0` and `a1`, bytes 2-7 a 48-bit
/// field of 3-bit indexes. If `a0 > a1`, indexes 2-7 form a 6-step gradient
/// between the anchors. Otherwise indexes 2-5 form a 4-step gradient, 6 is
/// fully transparent and 7 fully opaque.
pub fn dxt5_alpha(alpha_bytes: [u8; 8], x: u32, y: u32) -> u16 {
    let a0 = n8::n16(alpha_bytes[0]) as u32;
    let a1 = n8::n16(alpha_bytes[1]) as u32;

    let index = dxt5_alpha_index(alpha_bytes, x, y) as u32;
    let a = match index {
        0 => a0,
        1 => a1,
        k if a0 > a1 => ((8 - k) * a0 + (k - 1) * a1) / 7,
        6 => 0x0000,
        7 => 0xFFFF,
        k => ((6 - k) * a0 + (k - 1) * a1) / 5,
    };
    a as u16
}

/// Decodes pixel `(x, y)` of a DXT5 (BC3) block.
///
/// Bytes 0-7 hold an interpolated alpha block, bytes 8-15 a DXT1 color
/// block.
pub fn dxt5_pixel(block_bytes: [u8; 16], x: u32, y: u32) -> [u16; 4] {
    let [alpha, color] = split_block(block_bytes);
    let [r, g, b, _] = dxt1_pixel(color, x, y);
    [r, g, b, dxt5_alpha(alpha, x, y)]
}

fn split_block(block_bytes: [u8; 16]) -> [[u8; 8]; 2] {
    let mut alpha = [0; 8];
    let mut color = [0; 8];
    alpha.copy_from_slice(&block_bytes[..8]);
    color.copy_from_slice(&block_bytes[8..]);
    [alpha, color]
}
