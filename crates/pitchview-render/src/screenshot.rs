//! Saving rendered frames to image files.

use image::{ImageBuffer, Rgba};
use std::path::Path;

/// Saves tightly packed RGBA pixel data to an image file.
///
/// # Arguments
/// * `path` - Output file (supports .png, .jpg, .jpeg)
/// * `data` - RGBA pixel data, 4 bytes per pixel, top row first
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
/// Returns an error if the file cannot be written or the format is unsupported.
pub fn save_image(
    path: impl AsRef<Path>,
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<(), ScreenshotError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let img = to_image(data, width, height)?;

    match extension.as_str() {
        "png" => {
            img.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            // JPEG has no alpha channel
            let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();
            rgb_img.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(ScreenshotError::UnsupportedFormat(extension));
        }
    }

    log::info!("saved {}x{} screenshot to '{}'", width, height, path.display());
    Ok(())
}

/// Encodes RGBA pixel data as PNG in memory.
pub fn save_to_buffer(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ScreenshotError> {
    let img = to_image(data, width, height)?;

    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;

    Ok(buffer.into_inner())
}

fn to_image(
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>, ScreenshotError> {
    ImageBuffer::from_raw(width, height, data.to_vec()).ok_or(ScreenshotError::InvalidImageData)
}

/// Error type for screenshot operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image data")]
    InvalidImageData,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| {
                if i % 2 == 0 {
                    [255, 0, 0, 255]
                } else {
                    [0, 0, 255, 255]
                }
            })
            .collect()
    }

    #[test]
    fn test_save_to_buffer_is_png() {
        let png = save_to_buffer(&checker(4, 2), 4, 2).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_short_data_rejected() {
        let result = save_to_buffer(&[0; 12], 2, 2);
        assert!(matches!(result, Err(ScreenshotError::InvalidImageData)));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("pitchview_screenshot_test.bmp");
        let result = save_image(&path, &checker(2, 2), 2, 2);
        assert!(matches!(result, Err(ScreenshotError::UnsupportedFormat(ref e)) if e == "bmp"));
    }

    #[test]
    fn test_write_failure_is_image_error() {
        let path = std::env::temp_dir()
            .join("pitchview_no_such_dir")
            .join("nested")
            .join("shot.png");
        let result = save_image(&path, &checker(2, 2), 2, 2);
        assert!(matches!(result, Err(ScreenshotError::ImageError(_))));
    }

    #[test]
    fn test_save_png_file() {
        let path = std::env::temp_dir().join(format!(
            "pitchview_screenshot_{}.png",
            std::process::id()
        ));
        save_image(&path, &checker(3, 3), 3, 3).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 3));
        let _ = std::fs::remove_file(&path);
    }
}
