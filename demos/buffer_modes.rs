use std::time::Duration;

use pixmorph::{CellPos, GridSize, MorphConfig, MorphMode, MorphSession, PixelBuffer, Rgba8, Speed};

fn checkerboard(grid: GridSize, a: Rgba8, b: Rgba8) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(grid, a);
    for y in 0..grid.get() {
        for x in 0..grid.get() {
            if (x + y) % 2 == 1 {
                buf.put(CellPos::new(x, y), b);
            }
        }
    }
    buf
}

fn drive_to_completion(session: &mut MorphSession) -> anyhow::Result<u64> {
    session.start(Duration::ZERO)?;
    let mut tick = 0u64;
    loop {
        tick += 1;
        if !session
            .advance(Duration::from_secs_f64(tick as f64 / 60.0))
            .should_continue()
        {
            return Ok(tick);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let grid = GridSize::new(48)?;
    let source = checkerboard(grid, Rgba8::opaque(230, 60, 20), Rgba8::opaque(250, 200, 40));
    let target = checkerboard(grid, Rgba8::opaque(10, 40, 120), Rgba8::opaque(60, 180, 220));

    for (label, mode) in [("reveal", MorphMode::Reveal), ("crossfade", MorphMode::Crossfade)] {
        let config = MorphConfig {
            grid,
            speed: Speed::new(65)?,
            mode,
        };
        let mut session = MorphSession::new(config, source.clone(), target.clone(), 11)?;
        let frames = drive_to_completion(&mut session)?;
        let settled = session.frame().as_bytes() == target.as_bytes();
        println!("{label}: {frames} frames, frame == target: {settled}");
    }

    Ok(())
}
