//! Texture decoding and mip chain properties.

use image::{Rgba, RgbaImage};
use pitchview_render::buffer::align_to;
use pitchview_render::{RenderError, TextureImage};
use proptest::prelude::*;

proptest! {
    #[test]
    fn mip_chain_halves_down_to_one_texel(width in 1u32..80, height in 1u32..80) {
        let image = TextureImage::from_rgba(RgbaImage::from_pixel(width, height, Rgba([9, 8, 7, 255])));
        let levels = image.levels();

        prop_assert_eq!(image.mip_level_count(), 32 - width.max(height).leading_zeros());
        prop_assert_eq!(levels[0].dimensions(), (width, height));
        prop_assert_eq!(levels[levels.len() - 1].dimensions(), (1, 1));
        for pair in levels.windows(2) {
            let (w, h) = pair[0].dimensions();
            prop_assert_eq!(pair[1].dimensions(), ((w / 2).max(1), (h / 2).max(1)));
        }
    }

    #[test]
    fn align_to_is_smallest_multiple(size in 0u64..10_000, shift in 0u32..9) {
        let alignment = 1u64 << shift;
        let aligned = align_to(size, alignment);
        prop_assert_eq!(aligned % alignment, 0);
        prop_assert!(aligned >= size);
        prop_assert!(aligned - size < alignment);
    }
}

#[test]
fn test_ppm_decodes_bottom_row_first() {
    let dir = std::env::temp_dir().join(format!("pitchview_texture_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("two_rows.ppm");
    // Top row red, bottom row blue.
    std::fs::write(&path, "P3\n2 2\n255\n255 0 0 255 0 0\n0 0 255 0 0 255\n").unwrap();

    let image = TextureImage::load(&path).unwrap();
    assert_eq!((image.width(), image.height()), (2, 2));
    assert_eq!(image.mip_level_count(), 2);
    assert_eq!(image.levels()[0].get_pixel(0, 0).0, [0, 0, 255, 255]);
    assert_eq!(image.levels()[0].get_pixel(1, 1).0, [255, 0, 0, 255]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_shipped_textures_decode() {
    let images = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/images");
    let grass = TextureImage::load(images.join("grass.ppm")).unwrap();
    assert_eq!((grass.width(), grass.height()), (64, 64));
    assert_eq!(grass.mip_level_count(), 7);

    let plastic = TextureImage::load(images.join("plastic.ppm")).unwrap();
    assert_eq!(plastic.mip_level_count(), 5);
}

#[test]
fn test_corrupt_texture_is_texture_load_error() {
    let path = std::env::temp_dir().join(format!("pitchview_corrupt_{}.png", std::process::id()));
    std::fs::write(&path, b"not a png").unwrap();
    let err = TextureImage::load(&path).unwrap_err();
    assert!(matches!(err, RenderError::TextureLoad { .. }));
    let _ = std::fs::remove_file(&path);
}
