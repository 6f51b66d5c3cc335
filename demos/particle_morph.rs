use std::time::Duration;

use pixmorph::{GridSize, MorphConfig, MorphMode, MorphSession, Speed, fit_to_square};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let grid = GridSize::new(32)?;
    let source = image::DynamicImage::ImageRgba8(image::RgbaImage::from_fn(128, 128, |x, y| {
        image::Rgba([(x * 2) as u8, (y * 2) as u8, 40, 255])
    }));
    let target = image::DynamicImage::ImageRgba8(image::RgbaImage::from_fn(128, 128, |x, y| {
        let dx = x as f32 - 63.5;
        let dy = y as f32 - 63.5;
        let ring = ((dx * dx + dy * dy).sqrt() * 0.35).sin().abs();
        image::Rgba([(ring * 255.0) as u8, 30, 200 - (ring * 160.0) as u8, 255])
    }));

    let config = MorphConfig {
        grid,
        speed: Speed::new(70)?,
        mode: MorphMode::Particles,
    };
    let mut session = MorphSession::new(
        config,
        fit_to_square(&source, grid)?,
        fit_to_square(&target, grid)?,
        7,
    )?;
    session.start(Duration::ZERO)?;

    let mut tick = 0u64;
    loop {
        tick += 1;
        let report = session.advance(Duration::from_secs_f64(tick as f64 / 60.0));
        if tick % 30 == 0 || !report.should_continue() {
            println!(
                "t={:.2}s settled={:.0}%",
                tick as f64 / 60.0,
                report.progress * 100.0
            );
        }
        if !report.should_continue() {
            break;
        }
    }
    println!("completed after {tick} ticks");

    Ok(())
}
