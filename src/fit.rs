use image::imageops::FilterType;

use crate::core::{GridSize, PixelBuffer};
use crate::error::{PixmorphError, PixmorphResult};

/// Cover-fits an arbitrary-aspect image onto the N×N working grid.
///
/// The centered square (side `min(w, h)`) is cropped out first, then scaled
/// to N×N, so the kept region is never distorted. A wider image loses equal
/// amounts left and right, a taller one top and bottom.
pub fn fit_to_square(img: &image::DynamicImage, grid: GridSize) -> PixmorphResult<PixelBuffer> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(PixmorphError::acquisition(format!(
            "cannot fit a {w}x{h} image onto a grid"
        )));
    }

    let side = w.min(h);
    let x = (w - side) / 2;
    let y = (h - side) / 2;
    let n = grid.get();

    let scaled = img
        .crop_imm(x, y, side, side)
        .resize_exact(n, n, FilterType::Triangle);
    PixelBuffer::from_rgba8(grid, scaled.to_rgba8().into_raw())
}

/// Wraps a frame buffer as an [`image::RgbaImage`] for encoding.
pub fn frame_to_image(buf: &PixelBuffer) -> PixmorphResult<image::RgbaImage> {
    let n = buf.side();
    image::RgbaImage::from_raw(n, n, buf.as_bytes().to_vec()).ok_or_else(|| {
        PixmorphError::validation(format!("frame bytes do not form a {n}x{n} image"))
    })
}

/// Scales a frame up by an integer factor with hard cell edges.
///
/// An N×N working grid is tiny on disk; hosts usually present each cell as a
/// chunky square. Nearest-neighbor keeps the cell boundaries crisp.
pub fn upscale_frame(buf: &PixelBuffer, cell_px: u32) -> PixmorphResult<image::RgbaImage> {
    if cell_px == 0 {
        return Err(PixmorphError::validation("cell size must be > 0"));
    }
    let img = frame_to_image(buf)?;
    if cell_px == 1 {
        return Ok(img);
    }
    let side = buf.side() * cell_px;
    Ok(image::imageops::resize(
        &img,
        side,
        side,
        FilterType::Nearest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba8;

    /// A `w`×`h` image split into a left/top half of one color and a
    /// right/bottom half of another, for checking which region survives
    /// the crop.
    fn split_image(w: u32, h: u32, horizontal: bool) -> image::DynamicImage {
        let img = image::RgbaImage::from_fn(w, h, |x, y| {
            let first_half = if horizontal { x < w / 2 } else { y < h / 2 };
            if first_half {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        image::DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn output_is_always_square() {
        let grid = GridSize::new(8).unwrap();
        for (w, h) in [(100, 40), (40, 100), (64, 64), (7, 3)] {
            let buf = fit_to_square(&split_image(w, h, true), grid).unwrap();
            assert_eq!(buf.side(), 8);
            assert_eq!(buf.pixel_count(), 64);
        }
    }

    #[test]
    fn wide_images_crop_left_and_right() {
        let grid = GridSize::new(4).unwrap();
        // 300x100, red left half, blue right half. The centered 100x100
        // square straddles the color seam, so both colors must survive and
        // the outer thirds must be gone entirely.
        let buf = fit_to_square(&split_image(300, 100, true), grid).unwrap();
        let left = buf.get(crate::core::CellPos { x: 0, y: 2 });
        let right = buf.get(crate::core::CellPos { x: 3, y: 2 });
        assert!(left.r > left.b, "left edge should come from the red half");
        assert!(right.b > right.r, "right edge should come from the blue half");
    }

    #[test]
    fn tall_images_crop_top_and_bottom() {
        let grid = GridSize::new(4).unwrap();
        let buf = fit_to_square(&split_image(100, 300, false), grid).unwrap();
        let top = buf.get(crate::core::CellPos { x: 2, y: 0 });
        let bottom = buf.get(crate::core::CellPos { x: 2, y: 3 });
        assert!(top.r > top.b, "top edge should come from the red half");
        assert!(bottom.b > bottom.r, "bottom edge should come from the blue half");
    }

    #[test]
    fn empty_images_are_rejected() {
        let grid = GridSize::new(4).unwrap();
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(0, 0));
        let err = fit_to_square(&img, grid).unwrap_err();
        assert!(err.to_string().contains("acquisition error"));
    }

    #[test]
    fn square_input_is_only_scaled() {
        let grid = GridSize::new(2).unwrap();
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            64,
            64,
            image::Rgba([9, 8, 7, 255]),
        ));
        let buf = fit_to_square(&img, grid).unwrap();
        for i in 0..buf.pixel_count() {
            assert_eq!(buf.get_index(i), Rgba8::opaque(9, 8, 7));
        }
    }

    #[test]
    fn upscale_repeats_each_cell() {
        let grid = GridSize::new(2).unwrap();
        let mut buf = PixelBuffer::filled(grid, Rgba8::opaque(0, 0, 0));
        buf.put_index(3, Rgba8::opaque(255, 255, 255));

        let img = upscale_frame(&buf, 3).unwrap();
        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        // Every texel of the bottom-right cell carries the cell color.
        for y in 3..6 {
            for x in 3..6 {
                assert_eq!(img.get_pixel(x, y).0, [255, 255, 255, 255]);
            }
        }
        assert!(upscale_frame(&buf, 0).is_err());
    }
}
