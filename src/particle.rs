use kurbo::Point;

use crate::core::{CellPos, PixelBuffer, Rgba8};
use crate::correspond::Correspondence;
use crate::error::{PixmorphError, PixmorphResult};
use crate::rng::Rng64;

/// Animation speed on the user-facing 1..=100 scale. Higher is faster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Speed(u32);

impl Speed {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> PixmorphResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PixmorphError::validation(format!(
                "speed must be within {}..={}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u32> for Speed {
    type Error = PixmorphError;

    fn try_from(value: u32) -> PixmorphResult<Self> {
        Self::new(value)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

/// Per-animation timing envelope derived from [`Speed`].
///
/// The duration budget is the frame count `max(10, 200 − 1.6·speed)` read as
/// seconds at a 60 Hz cadence. Each particle draws its own delay and duration
/// from this envelope, so the swarm settles in waves instead of moving as one
/// rigid block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingPlan {
    budget_secs: f64,
    max_delay_secs: f64,
}

impl TimingPlan {
    pub fn from_speed(speed: Speed) -> Self {
        let frames = (200.0 - 1.6 * f64::from(speed.get())).max(10.0);
        let budget_secs = frames / 60.0;
        let max_delay_secs = (0.5 * budget_secs).min(1.25);
        Self {
            budget_secs,
            max_delay_secs,
        }
    }

    pub fn budget_secs(&self) -> f64 {
        self.budget_secs
    }

    pub fn max_delay_secs(&self) -> f64 {
        self.max_delay_secs
    }

    /// Start delay for one particle, uniform in `[0, max_delay)`.
    pub fn sample_delay(&self, rng: &mut Rng64) -> f64 {
        rng.range_f64(0.0, self.max_delay_secs)
    }

    /// Travel duration for one particle, uniform in `[0.6, 1.4)·budget`.
    pub fn sample_duration(&self, rng: &mut Rng64) -> f64 {
        self.budget_secs * rng.range_f64(0.6, 1.4)
    }

    /// Upper bound on when the last particle can settle.
    pub fn worst_case_secs(&self) -> f64 {
        self.max_delay_secs + 1.4 * self.budget_secs
    }
}

/// One source pixel in flight: its color, endpoints, and personal schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub color: Rgba8,
    pub from: CellPos,
    pub to: CellPos,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

impl Particle {
    /// Linear local progress at `elapsed_secs`, clamped to `[0, 1]`.
    ///
    /// Zero until the delay has passed, one from the moment the particle
    /// settles. Easing is applied by the caller on top of this value.
    pub fn progress(&self, elapsed_secs: f64) -> f64 {
        ((elapsed_secs - self.delay_secs) / self.duration_secs).clamp(0.0, 1.0)
    }

    pub fn settled(&self, elapsed_secs: f64) -> bool {
        elapsed_secs - self.delay_secs >= self.duration_secs
    }

    /// Position along the straight flight path at eased progress `t`.
    pub fn pos_at(&self, t: f64) -> Point {
        self.from.to_point().lerp(self.to.to_point(), t)
    }
}

/// The full swarm for one particle animation, one particle per source pixel.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// Builds the swarm from a source buffer and its target correspondence.
    ///
    /// Construction is all-or-nothing: the returned set covers every source
    /// pixel or the call fails without allocating a partial swarm.
    pub fn build(
        source: &PixelBuffer,
        correspondence: &Correspondence,
        plan: &TimingPlan,
        rng: &mut Rng64,
    ) -> PixmorphResult<Self> {
        if correspondence.len() != source.pixel_count() {
            return Err(PixmorphError::animation(format!(
                "correspondence covers {} pixels but the source has {}",
                correspondence.len(),
                source.pixel_count()
            )));
        }

        let grid = source.grid();
        let mut particles = Vec::with_capacity(source.pixel_count());
        for i in 0..source.pixel_count() {
            particles.push(Particle {
                color: source.get_index(i),
                from: CellPos::from_index(i, grid),
                to: CellPos::from_index(correspondence.target_of(i), grid),
                delay_secs: plan.sample_delay(rng),
                duration_secs: plan.sample_duration(rng),
            });
        }
        Ok(Self { particles })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }
}
