#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Just no panic
    let mut reader = Cursor::new(data);

    if let Ok(image) = dds_codec::decode(&mut reader) {
        for mipmap in image.mipmaps() {
            let rect = mipmap.rect();
            if rect.width > 312 || rect.height > 312 {
                continue;
            }

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
});
