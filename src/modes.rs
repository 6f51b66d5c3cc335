use crate::core::{GridSize, PixelBuffer};
use crate::particle::Speed;
use crate::rng::Rng64;

/// Progressive pixel reveal: target pixels replace source pixels in a
/// shuffled order, a fixed batch per frame, each pixel exactly once.
#[derive(Debug, Clone)]
pub struct Reveal {
    order: Vec<u32>,
    replaced: usize,
    batch: usize,
}

impl Reveal {
    pub fn new(grid: GridSize, speed: Speed, rng: &mut Rng64) -> Self {
        let mut order: Vec<u32> = (0..grid.pixel_count() as u32).collect();
        rng.shuffle(&mut order);
        let batch = batch_size(grid, speed);
        Self {
            order,
            replaced: 0,
            batch,
        }
    }

    /// Copies the next batch of target pixels into `current`.
    ///
    /// Returns `true` once every pixel has been replaced. Advancing a
    /// finished reveal is a no-op.
    pub fn advance(&mut self, target: &PixelBuffer, current: &mut PixelBuffer) -> bool {
        let end = (self.replaced + self.batch).min(self.order.len());
        for &idx in &self.order[self.replaced..end] {
            current.put_index(idx as usize, target.get_index(idx as usize));
        }
        self.replaced = end;
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.replaced == self.order.len()
    }

    pub fn progress(&self) -> f64 {
        self.replaced as f64 / self.order.len() as f64
    }

    pub fn batch(&self) -> usize {
        self.batch
    }
}

/// Pixels swapped per reveal frame: `max(1, round(speed · N² / 2000))`.
fn batch_size(grid: GridSize, speed: Speed) -> usize {
    let raw = f64::from(speed.get()) * grid.pixel_count() as f64 / 2000.0;
    (raw.round() as usize).max(1)
}

/// Whole-buffer linear blend from source to target over a fixed frame count.
///
/// Each frame re-blends from the two endpoint buffers rather than mutating
/// the previous frame, so rounding error never accumulates and the final
/// frame is byte-identical to the target.
#[derive(Debug, Clone, Copy)]
pub struct Crossfade {
    frame: u32,
    frames: u32,
}

impl Crossfade {
    pub fn new(speed: Speed) -> Self {
        let frames = (200.0 - 1.6 * f64::from(speed.get())).round().max(10.0) as u32;
        Self { frame: 0, frames }
    }

    /// Advances one frame and writes the blended result into `current`.
    ///
    /// Returns `true` on and after the frame where the blend reaches the
    /// target.
    pub fn advance(
        &mut self,
        source: &PixelBuffer,
        target: &PixelBuffer,
        current: &mut PixelBuffer,
    ) -> bool {
        if self.frame < self.frames {
            self.frame += 1;
        }
        let t = self.progress();
        for ((out, s), d) in current
            .as_bytes_mut()
            .iter_mut()
            .zip(source.as_bytes())
            .zip(target.as_bytes())
        {
            let s = f64::from(*s);
            let d = f64::from(*d);
            *out = (s + (d - s) * t).round() as u8;
        }
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.frame >= self.frames
    }

    pub fn progress(&self) -> f64 {
        f64::from(self.frame) / f64::from(self.frames)
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}
