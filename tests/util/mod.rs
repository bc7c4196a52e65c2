#![allow(unused)]

use dds_codec::header::*;
use rand::SeedableRng;

pub fn create_rng() -> impl rand::Rng {
    rand_chacha::ChaChaRng::seed_from_u64(123456789)
}

/// Enables `log` output for a test. Run with `RUST_LOG=trace` to see it.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds the bytes of a DDS file in memory.
///
/// The builder starts from a valid header and allows every field the
/// decoder looks at to be overwritten, including ones that make the header
/// invalid.
#[derive(Debug, Clone)]
pub struct DdsBuilder {
    pub magic: [u8; 4],
    pub size: u32,
    pub flags: DdsFlags,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mipmap_count: u32,
    pub pf_flags: PixelFormatFlags,
    pub four_cc: FourCC,
    pub rgb_bit_count: u32,
    pub masks: [u32; 4],
    pub caps: DdsCaps,
    pub caps2: DdsCaps2,
}

impl DdsBuilder {
    fn new(width: u32, height: u32) -> Self {
        Self {
            magic: Header::MAGIC,
            size: 124,
            flags: DdsFlags::CAPS | DdsFlags::REQUIRED,
            height,
            width,
            pitch_or_linear_size: 0,
            depth: 0,
            mipmap_count: 0,
            pf_flags: PixelFormatFlags::empty(),
            four_cc: FourCC::NONE,
            rgb_bit_count: 0,
            masks: [0; 4],
            caps: DdsCaps::TEXTURE,
            caps2: DdsCaps2::empty(),
        }
    }

    pub fn four_cc(width: u32, height: u32, four_cc: FourCC) -> Self {
        Self {
            pf_flags: PixelFormatFlags::FOURCC,
            four_cc,
            ..Self::new(width, height)
        }
    }
    pub fn masked(width: u32, height: u32, bit_count: u32, masks: [u32; 4]) -> Self {
        let pf_flags = if masks[3] != 0 {
            PixelFormatFlags::RGBA
        } else {
            PixelFormatFlags::RGB
        };
        Self {
            pf_flags,
            rgb_bit_count: bit_count,
            masks,
            ..Self::new(width, height)
        }
    }

    pub fn bgra8888(width: u32, height: u32) -> Self {
        Self::masked(width, height, 32, [0xFF0000, 0xFF00, 0xFF, 0xFF000000])
    }
    pub fn bgr565(width: u32, height: u32) -> Self {
        Self::masked(width, height, 16, [0xF800, 0x07E0, 0x001F, 0])
    }
    pub fn bgra5551(width: u32, height: u32) -> Self {
        Self::masked(width, height, 16, [0x7C00, 0x03E0, 0x001F, 0x8000])
    }
    pub fn bgra4444(width: u32, height: u32) -> Self {
        Self::masked(width, height, 16, [0x0F00, 0x00F0, 0x000F, 0xF000])
    }

    /// Sets the mipmap count and the `MIPMAP_COUNT` flag.
    pub fn mipmaps(mut self, count: u32) -> Self {
        self.flags |= DdsFlags::MIPMAP_COUNT;
        self.mipmap_count = count;
        self
    }

    /// The magic bytes followed by the 124-byte header.
    pub fn header_bytes(&self) -> Vec<u8> {
        let mut ints = [0_u32; 31];
        ints[0] = self.size;
        ints[1] = self.flags.bits();
        ints[2] = self.height;
        ints[3] = self.width;
        ints[4] = self.pitch_or_linear_size;
        ints[5] = self.depth;
        ints[6] = self.mipmap_count;
        ints[18] = 32;
        ints[19] = self.pf_flags.bits();
        ints[20] = self.four_cc.0;
        ints[21] = self.rgb_bit_count;
        ints[22..26].copy_from_slice(&self.masks);
        ints[26] = self.caps.bits();
        ints[27] = self.caps2.bits();

        let mut bytes = self.magic.to_vec();
        for i in ints {
            bytes.extend_from_slice(&i.to_le_bytes());
        }
        bytes
    }

    /// The full file: magic, header, and the given data section.
    pub fn with_data(&self, data: &[u8]) -> Vec<u8> {
        let mut bytes = self.header_bytes();
        bytes.extend_from_slice(data);
        bytes
    }
}

/// Packs 16 two-bit color indexes (row-major) into a DXT1 block.
pub fn dxt1_block(c0: u16, c1: u16, indexes: [u8; 16]) -> [u8; 8] {
    let mut bits = 0_u32;
    for (i, index) in indexes.iter().enumerate() {
        bits |= ((*index & 0x3) as u32) << (2 * i);
    }

    let mut block = [0; 8];
    block[0..2].copy_from_slice(&c0.to_le_bytes());
    block[2..4].copy_from_slice(&c1.to_le_bytes());
    block[4..8].copy_from_slice(&bits.to_le_bytes());
    block
}

/// A DXT1 block where every pixel has the color `c`.
pub fn solid_dxt1_block(c: u16) -> [u8; 8] {
    dxt1_block(c, c, [0; 16])
}

/// Packs 16 four-bit alpha values (row-major) and a color block into a DXT3
/// block.
pub fn dxt3_block(alphas: [u8; 16], color: [u8; 8]) -> [u8; 16] {
    let mut bits = 0_u64;
    for (i, alpha) in alphas.iter().enumerate() {
        bits |= ((*alpha & 0xF) as u64) << (4 * i);
    }

    let mut block = [0; 16];
    block[..8].copy_from_slice(&bits.to_le_bytes());
    block[8..].copy_from_slice(&color);
    block
}

/// Packs two alpha anchors, 16 three-bit alpha indexes (row-major), and a
/// color block into a DXT5 block.
pub fn dxt5_block(a0: u8, a1: u8, indexes: [u8; 16], color: [u8; 8]) -> [u8; 16] {
    let mut bits = 0_u64;
    for (i, index) in indexes.iter().enumerate() {
        bits |= ((*index & 0x7) as u64) << (3 * i);
    }

    let mut block = [0; 16];
    block[0] = a0;
    block[1] = a1;
    block[2..8].copy_from_slice(&bits.to_le_bytes()[..6]);
    block[8..].copy_from_slice(&color);
    block
}
