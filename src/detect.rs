//! Internal module for detecting supported formats from FourCC codes and DDS
//! pixel formats.

use crate::header::{DdsPixelFormat, FourCC, PixelFormatFlags};
use crate::PixelFormat;

pub(crate) const fn four_cc_to_supported(four_cc: FourCC) -> Option<PixelFormat> {
    match four_cc {
        FourCC::DXT1 => Some(PixelFormat::DXT1),
        FourCC::DXT3 => Some(PixelFormat::DXT3),
        FourCC::DXT5 => Some(PixelFormat::DXT5),
        _ => None,
    }
}

struct MaskPattern {
    alpha: bool,
    masks: [u32; 4],
}
impl MaskPattern {
    const fn rgba(r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            alpha: true,
            masks: [r, g, b, a],
        }
    }
    const fn rgb(r: u32, g: u32, b: u32) -> Self {
        Self {
            alpha: false,
            masks: [r, g, b, 0],
        }
    }

    fn matches(&self, pf: &DdsPixelFormat) -> bool {
        pf.flags.contains(PixelFormatFlags::ALPHAPIXELS) == self.alpha && pf.masks() == self.masks
    }
}

const KNOWN_PIXEL_FORMATS: &[(MaskPattern, PixelFormat)] = &[
    (
        MaskPattern::rgba(0xFF0000, 0xFF00, 0xFF, 0xFF000000),
        PixelFormat::BGRA8888,
    ),
    (
        MaskPattern::rgba(0x0F00, 0x00F0, 0x000F, 0xF000),
        PixelFormat::BGRA4444,
    ),
    (
        MaskPattern::rgba(0x7C00, 0x03E0, 0x001F, 0x8000),
        PixelFormat::BGRA5551,
    ),
    (
        MaskPattern::rgb(0xF800, 0x07E0, 0x001F),
        PixelFormat::BGR565,
    ),
];

/// Matches the bit masks of an RGB pixel format exactly against the known
/// packed formats.
pub(crate) fn masked_to_supported(pf: &DdsPixelFormat) -> Option<PixelFormat> {
    if !pf.flags.contains(PixelFormatFlags::RGB) {
        return None;
    }

    KNOWN_PIXEL_FORMATS
        .iter()
        .find_map(|(p, format)| p.matches(pf).then_some(*format))
}
