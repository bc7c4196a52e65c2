use std::io::Cursor;

use dds_codec::{header::*, *};
use rand::Rng;
use util::*;

mod util;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0_u8; len];
    create_rng().fill(data.as_mut_slice());
    data
}

fn dimensions(image: &DdsImage) -> Vec<(u32, u32)> {
    image
        .mipmaps()
        .iter()
        .map(|m| (m.width(), m.height()))
        .collect()
}

#[test]
fn decode_mipmap_chain() {
    init_logger();

    let data = random_bytes(64 + 16);
    let mut file = DdsBuilder::bgra8888(4, 4).mipmaps(2).with_data(&data);
    // bytes after the last mip level are left alone
    file.extend_from_slice(b"trailing");

    let mut reader = Cursor::new(file);
    let image = decode(&mut reader).unwrap();
    assert_eq!(reader.position(), 128 + 80);

    assert_eq!(image.format(), PixelFormat::BGRA8888);
    assert_eq!((image.width(), image.height()), (4, 4));
    assert_eq!(dimensions(&image), [(4, 4), (2, 2)]);
    assert_eq!(image.main().as_bytes(), &data[..64]);
    assert_eq!(image.mipmap(1).unwrap().as_bytes(), &data[64..]);
    assert!(image.mipmap(2).is_none());

    // pixel (1, 0) of level 1 is bytes 4..8 of that level, stored as B, G, R, A
    let [b, g, r, a] = [data[68], data[69], data[70], data[71]];
    assert_eq!(
        image.mipmap(1).unwrap().at(1, 0),
        [r, g, b, a].map(|c| c as u16 * 257)
    );
}

#[test]
fn decode_dxt1_chain() {
    let mut file = DdsBuilder::four_cc(8, 8, FourCC::DXT1).mipmaps(4);
    file.pitch_or_linear_size = 32;
    let mut data = Vec::new();
    // level 0: 2x2 blocks
    for color in [0xF800, 0x07E0, 0x001F, 0xFFFF] {
        data.extend_from_slice(&solid_dxt1_block(color));
    }
    // levels 1..=3: one block each
    for _ in 1..=3 {
        data.extend_from_slice(&solid_dxt1_block(0x0000));
    }

    let mut reader = Cursor::new(file.with_data(&data));
    let image = decode(&mut reader).unwrap();
    assert_eq!(reader.position(), 128 + 56);
    assert_eq!(dimensions(&image), [(8, 8), (4, 4), (2, 2), (1, 1)]);

    let main = image.main();
    assert_eq!(main.at(0, 0), [0xFFFF, 0, 0, 0xFFFF]);
    assert_eq!(main.at(7, 0), [0, 0xFFFF, 0, 0xFFFF]);
    assert_eq!(main.at(0, 7), [0, 0, 0xFFFF, 0xFFFF]);
    assert_eq!(main.at(4, 4), [0xFFFF; 4]);
    assert_eq!(image.mipmap(3).unwrap().at(0, 0), [0, 0, 0, 0xFFFF]);
}

#[test]
fn decode_dxt3_and_dxt5() {
    let color = solid_dxt1_block(0x07E0);

    let block = dxt3_block([0x8; 16], color);
    let file = DdsBuilder::four_cc(4, 4, FourCC::DXT3).with_data(&block);
    let image = decode(&mut Cursor::new(file)).unwrap();
    assert_eq!(image.format(), PixelFormat::DXT3);
    assert_eq!(image.main().at(3, 3), [0, 0xFFFF, 0, 0x8888]);

    let block = dxt5_block(0xFF, 0x00, [1; 16], color);
    let file = DdsBuilder::four_cc(2, 3, FourCC::DXT5).with_data(&block);
    let image = decode(&mut Cursor::new(file)).unwrap();
    assert_eq!(image.format(), PixelFormat::DXT5);
    assert_eq!(image.main().at(1, 2), [0, 0xFFFF, 0, 0]);
    assert_eq!(image.main().at(2, 2), [0; 4]);
}

#[test]
fn decode_packed_16_bit() {
    for (builder, format) in [
        (DdsBuilder::bgr565(2, 1), PixelFormat::BGR565),
        (DdsBuilder::bgra5551(2, 1), PixelFormat::BGRA5551),
        (DdsBuilder::bgra4444(2, 1), PixelFormat::BGRA4444),
    ] {
        let image = decode(&mut Cursor::new(builder.with_data(&[0; 4]))).unwrap();
        assert_eq!(image.format(), format);
        assert_eq!(image.main().as_bytes().len(), 4);
    }

    let image = decode(&mut Cursor::new(
        DdsBuilder::bgr565(2, 1).with_data(&[0x00, 0xF8, 0x1F, 0x00]),
    ))
    .unwrap();
    assert_eq!(image.main().at(0, 0), [0xFFFF, 0, 0, 0xFFFF]);
    assert_eq!(image.main().at(1, 0), [0, 0, 0xFFFF, 0xFFFF]);

    let image = decode(&mut Cursor::new(
        DdsBuilder::bgra5551(2, 1).with_data(&[0x00, 0x80, 0xE0, 0x03]),
    ))
    .unwrap();
    assert_eq!(image.main().at(0, 0), [0, 0, 0, 0xFFFF]);
    assert_eq!(image.main().at(1, 0), [0, 0xFFFF, 0, 0]);

    let image = decode(&mut Cursor::new(
        DdsBuilder::bgra4444(2, 1).with_data(&[0x0F, 0xF0, 0x00, 0x0F]),
    ))
    .unwrap();
    assert_eq!(image.main().at(0, 0), [0, 0, 0xFFFF, 0xFFFF]);
    assert_eq!(image.main().at(1, 0), [0xFFFF, 0, 0, 0]);
}

#[test]
fn classify_formats() {
    let cases = [
        (DdsBuilder::bgra8888(1, 1), PixelFormat::BGRA8888),
        (DdsBuilder::bgr565(1, 1), PixelFormat::BGR565),
        (DdsBuilder::bgra5551(1, 1), PixelFormat::BGRA5551),
        (DdsBuilder::bgra4444(1, 1), PixelFormat::BGRA4444),
        (DdsBuilder::four_cc(1, 1, FourCC::DXT1), PixelFormat::DXT1),
        (DdsBuilder::four_cc(1, 1, FourCC::DXT3), PixelFormat::DXT3),
        (DdsBuilder::four_cc(1, 1, FourCC::DXT5), PixelFormat::DXT5),
    ];
    for (builder, format) in cases {
        let decoder = DdsDecoder::new(&mut Cursor::new(builder.header_bytes())).unwrap();
        assert_eq!(decoder.format(), format);
        assert_eq!(PixelFormat::from_header(decoder.header()).unwrap(), format);
    }
}

#[test]
fn unsupported_four_cc() {
    for four_cc in [FourCC::DXT2, FourCC::DXT4, FourCC::NONE, FourCC(0x12345678)] {
        let file = DdsBuilder::four_cc(4, 4, four_cc).with_data(&[0; 16]);
        let error = decode(&mut Cursor::new(file)).unwrap_err();
        assert!(
            matches!(error, DecodeError::Format(FormatError::UnsupportedFourCC(f)) if f == four_cc),
            "{error:?}"
        );
    }
}

#[test]
fn unsupported_masks() {
    let mut cases = Vec::new();

    // BGRA8888 masks without ALPHAPIXELS
    let mut builder = DdsBuilder::bgra8888(1, 1);
    builder.pf_flags = PixelFormatFlags::RGB;
    cases.push(builder);

    // BGR565 masks with ALPHAPIXELS
    let mut builder = DdsBuilder::bgr565(1, 1);
    builder.pf_flags = PixelFormatFlags::RGBA;
    cases.push(builder);

    // R and B swapped
    cases.push(DdsBuilder::masked(1, 1, 32, [0xFF, 0xFF00, 0xFF0000, 0xFF000000]));
    // X8R8G8B8
    cases.push(DdsBuilder::masked(1, 1, 32, [0xFF0000, 0xFF00, 0xFF, 0]));

    // known masks, but neither RGB nor FOURCC
    let mut builder = DdsBuilder::bgr565(1, 1);
    builder.pf_flags = PixelFormatFlags::LUMINANCE;
    cases.push(builder);

    for builder in cases {
        let error = DdsDecoder::new(&mut Cursor::new(builder.header_bytes())).unwrap_err();
        assert!(
            matches!(
                error,
                DecodeError::Format(FormatError::UnsupportedPixelFormat(_))
            ),
            "{builder:?}: {error:?}"
        );
    }
}

#[test]
fn truncated_data() {
    let file = DdsBuilder::bgra8888(4, 4).with_data(&[0; 10]);
    let error = decode(&mut Cursor::new(file)).unwrap_err();
    assert!(
        matches!(
            error,
            DecodeError::TruncatedData {
                mipmap_level: 0,
                expected: 64,
                read: 10
            }
        ),
        "{error:?}"
    );

    let file = DdsBuilder::four_cc(8, 8, FourCC::DXT5)
        .mipmaps(3)
        .with_data(&[0; 64 + 16 + 3]);
    let error = decode(&mut Cursor::new(file)).unwrap_err();
    assert!(
        matches!(
            error,
            DecodeError::TruncatedData {
                mipmap_level: 2,
                expected: 16,
                read: 3
            }
        ),
        "{error:?}"
    );

    // header only
    let file = DdsBuilder::bgr565(1, 1).header_bytes();
    let error = decode(&mut Cursor::new(file)).unwrap_err();
    assert!(
        matches!(error, DecodeError::TruncatedData { read: 0, .. }),
        "{error:?}"
    );
}

#[test]
fn mip_dimensions_clamp_to_one() {
    let file = DdsBuilder::bgra8888(5, 3)
        .mipmaps(4)
        .with_data(&[0; (15 + 2 + 1 + 1) * 4]);
    let image = decode(&mut Cursor::new(file)).unwrap();
    assert_eq!(dimensions(&image), [(5, 3), (2, 1), (1, 1), (1, 1)]);

    assert_eq!(mip_dimension(5, 0), 5);
    assert_eq!(mip_dimension(5, 2), 1);
    assert_eq!(mip_dimension(5, 3), 1);
    assert_eq!(mip_dimension(u32::MAX, 31), 1);
    assert_eq!(mip_dimension(u32::MAX, 32), 1);
    assert_eq!(mip_dimension(u32::MAX, 100), 1);
}

#[test]
fn zero_dimensions() {
    for (width, height) in [(0, 4), (4, 0), (0, 0)] {
        let file = DdsBuilder::bgra8888(width, height).header_bytes();
        let error = DdsDecoder::new(&mut Cursor::new(&file)).unwrap_err();
        assert!(
            matches!(error, DecodeError::Layout(LayoutError::ZeroDimension)),
            "{width}x{height}: {error:?}"
        );
        let error = decode(&mut Cursor::new(&file)).unwrap_err();
        assert!(
            matches!(error, DecodeError::Layout(LayoutError::ZeroDimension)),
            "{width}x{height}: {error:?}"
        );

        // the header itself is fine
        let info = probe(&mut Cursor::new(&file)).unwrap();
        assert_eq!((info.width, info.height), (width, height));
    }
}

#[test]
#[cfg(target_pointer_width = "64")]
fn huge_dimensions_without_data() {
    // 2^31 x 2^30 BGRA8888 declares 2^63 bytes for the first level
    let file = DdsBuilder::bgra8888(0x8000_0000, 0x4000_0000).header_bytes();
    let decoder = DdsDecoder::new(&mut Cursor::new(&file)).unwrap();
    assert_eq!(decoder.layout().data_len(), 1 << 63);

    let error = decode(&mut Cursor::new(&file)).unwrap_err();
    assert!(
        matches!(
            error,
            DecodeError::TruncatedData {
                mipmap_level: 0,
                expected: 0x8000_0000_0000_0000,
                read: 0
            }
        ),
        "{error:?}"
    );

    // a few bytes of data are not enough either
    let file = DdsBuilder::bgra8888(0x8000_0000, 0x4000_0000).with_data(&[7; 100]);
    let error = decode(&mut Cursor::new(&file)).unwrap_err();
    assert!(
        matches!(error, DecodeError::TruncatedData { read: 100, .. }),
        "{error:?}"
    );
}

#[test]
fn too_many_mipmaps() {
    let mut options = Options::default();
    options.max_mipmap_count = 4;

    let file = DdsBuilder::bgra8888(64, 64).mipmaps(5).header_bytes();
    let error = DdsDecoder::new_with(&mut Cursor::new(file), options.clone()).unwrap_err();
    assert!(
        matches!(error, DecodeError::Layout(LayoutError::TooManyMipMaps(5))),
        "{error:?}"
    );

    let file = DdsBuilder::bgra8888(64, 64).mipmaps(4).header_bytes();
    assert!(DdsDecoder::new_with(&mut Cursor::new(file), options).is_ok());
}

#[test]
fn memory_limit() {
    let file = DdsBuilder::bgra8888(4, 4).mipmaps(3).with_data(&[0; 84]);

    let mut options = Options::default();
    options.memory_limit = 83;
    let error = decode_with(&mut Cursor::new(&file), options).unwrap_err();
    assert!(matches!(error, DecodeError::MemoryLimitExceeded), "{error:?}");

    let mut options = Options::default();
    options.memory_limit = 84;
    assert!(decode_with(&mut Cursor::new(&file), options).is_ok());
}

#[test]
fn layout_offsets() {
    let file = DdsBuilder::four_cc(10, 6, FourCC::DXT3).mipmaps(3).header_bytes();
    let decoder = DdsDecoder::new(&mut Cursor::new(file)).unwrap();

    let layout = decoder.layout();
    assert_eq!(layout.format(), PixelFormat::DXT3);
    let surfaces: Vec<_> = layout
        .mipmaps()
        .iter()
        .map(|s| (s.level(), s.width(), s.height(), s.data_offset(), s.len()))
        .collect();
    assert_eq!(
        surfaces,
        [
            (0, 10, 6, 0, 3 * 2 * 16),
            (1, 5, 3, 96, 2 * 16),
            (2, 2, 1, 128, 16),
        ]
    );
    assert_eq!(layout.main().width(), 10);
    assert_eq!(layout.data_len(), 144);
    assert_eq!(layout.data_end(), 144);
}

#[test]
fn staged_decoding() {
    let data = random_bytes(8 * 3);
    let file = DdsBuilder::bgra4444(4, 3).with_data(&data);
    let mut reader = Cursor::new(file);

    let decoder = DdsDecoder::new(&mut reader).unwrap();
    assert_eq!(reader.position(), 128);
    assert_eq!(
        decoder.info(),
        ImageInfo {
            width: 4,
            height: 3,
            mipmap_count: 1,
            format: Some(PixelFormat::BGRA4444),
        }
    );

    let mipmaps = decoder.read_mipmaps(&mut reader).unwrap();
    assert_eq!(mipmaps.len(), 1);
    assert_eq!(mipmaps[0].as_bytes(), &data[..]);
    assert_eq!(mipmaps[0].rect(), Rect::from_size(4, 3));
}

#[test]
fn from_header() {
    let header = Header::read(&mut Cursor::new(
        &DdsBuilder::four_cc(4, 4, FourCC::DXT1).header_bytes()[4..],
    ))
    .unwrap();

    let decoder = DdsDecoder::from_header(header.clone()).unwrap();
    assert_eq!(decoder.format(), PixelFormat::DXT1);
    let image = decoder.decode(&mut Cursor::new([0_u8; 8])).unwrap();
    assert_eq!(image.header(), &header);
    assert_eq!(image.into_mipmaps().len(), 1);
}

#[test]
fn probe_reads_header_only() {
    let file = DdsBuilder::four_cc(256, 128, FourCC::DXT5)
        .mipmaps(9)
        .header_bytes();
    let mut reader = Cursor::new(file);
    let info = probe(&mut reader).unwrap();
    assert_eq!(reader.position(), 128);

    assert_eq!((info.width, info.height, info.mipmap_count), (256, 128, 9));
    assert_eq!(info.format, Some(PixelFormat::DXT5));
    assert_eq!(
        info.color_model(),
        Some(ColorModel {
            channels: Channels::Rgba,
            bit_depth: [5, 6, 5, 8],
        })
    );
}

#[test]
fn probe_unsupported_format() {
    let file = DdsBuilder::four_cc(4, 4, FourCC::DXT2).header_bytes();
    let info = probe(&mut Cursor::new(file)).unwrap();
    assert_eq!(info.format, None);
    assert_eq!(info.color_model(), None);

    // header errors are still reported
    let mut builder = DdsBuilder::bgra8888(4, 4);
    builder.size = 0;
    let error = probe(&mut Cursor::new(builder.header_bytes())).unwrap_err();
    assert!(
        matches!(error, DecodeError::Header(HeaderError::InvalidHeaderSize(0))),
        "{error:?}"
    );
}

#[test]
fn random_data_never_panics() {
    let mut rng = create_rng();
    for _ in 0..500 {
        let mut builder = match rng.gen_range(0..4) {
            0 => DdsBuilder::four_cc(0, 0, FourCC::DXT1),
            1 => DdsBuilder::four_cc(0, 0, FourCC::DXT5),
            2 => DdsBuilder::bgra8888(0, 0),
            _ => DdsBuilder::bgra5551(0, 0),
        };
        builder.width = rng.gen_range(0..40);
        builder.height = rng.gen_range(0..40);
        if rng.gen_bool(0.1) {
            // declared sizes far beyond the data
            builder.width = rng.gen();
            builder.height = rng.gen();
        }
        builder = builder.mipmaps(rng.gen_range(0..8));

        let len = rng.gen_range(0..8000);
        let mut data = vec![0_u8; len];
        rng.fill(data.as_mut_slice());

        let file = builder.with_data(&data);
        if let Ok(image) = decode(&mut Cursor::new(file)) {
            for mipmap in image.mipmaps() {
                let rect = mipmap.rect();
                for y in -1..=rect.height as i32 {
                    for x in -1..=rect.width as i32 {
                        let rgba = mipmap.at(x, y);
                        if !rect.contains(x, y) {
                            assert_eq!(rgba, [0; 4]);
                        }
                    }
                }
            }
        }
    }
}
