use crate::core::{PixelBuffer, Rgba8};

/// Relative luminance of a straight-RGBA8 color. Alpha is ignored.
///
/// Rec. 709 weights on the raw 0–255 channel values. The value is only ever
/// used for ordering pixels, never for color math.
pub fn luminance(px: Rgba8) -> f32 {
    0.2126 * f32::from(px.r) + 0.7152 * f32::from(px.g) + 0.0722 * f32::from(px.b)
}

/// Every pixel index of `buf`, sorted ascending by luminance.
///
/// Ties order by index (`total_cmp` then index), so the ranking and any
/// correspondence built from it are reproducible across runs even on
/// flat-color regions. The ranking is built once per animation start and
/// consumed whole by the correspondence builder.
pub fn luminance_ranks(buf: &PixelBuffer) -> Vec<u32> {
    let lumas: Vec<f32> = (0..buf.pixel_count())
        .map(|i| luminance(buf.get_index(i)))
        .collect();

    let mut ranks: Vec<u32> = (0..buf.pixel_count() as u32).collect();
    ranks.sort_unstable_by(|&a, &b| {
        lumas[a as usize]
            .total_cmp(&lumas[b as usize])
            .then(a.cmp(&b))
    });
    ranks
}
