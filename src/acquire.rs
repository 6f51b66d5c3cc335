use std::path::Path;

use crate::error::{PixmorphError, PixmorphResult};

pub fn decode_image(bytes: &[u8]) -> PixmorphResult<image::DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| PixmorphError::acquisition(format!("decode image from memory: {e}")))
}

pub fn load_image(path: &Path) -> PixmorphResult<image::DynamicImage> {
    image::open(path)
        .map_err(|e| PixmorphError::acquisition(format!("open image '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decode_image_png_roundtrip() {
        let img = image::RgbaImage::from_raw(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 255]).unwrap();

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&buf).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 1));
        assert_eq!(decoded.to_rgba8().into_raw(), vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn decode_image_reports_acquisition_failure() {
        let err = decode_image(b"not an image").unwrap_err();
        assert!(err.to_string().contains("acquisition error"));
    }

    #[test]
    fn load_image_reports_missing_file() {
        let err = load_image(Path::new("/no/such/image.png")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("acquisition error"));
        assert!(msg.contains("/no/such/image.png"));
    }
}
