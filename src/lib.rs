//! Pixmorph animates the transition between two equally-sized images.
//!
//! Both images are cover-fit onto an N×N working grid, then one of three
//! modes carries the frame from source to target:
//!
//! 1. **Particles**: every source pixel becomes a particle that flies to the
//!    position of the equally-ranked (by luminance) target pixel, on its own
//!    randomized schedule with an ease-out-cubic settle.
//! 2. **Reveal**: target pixels pop in over the source in shuffled batches.
//! 3. **Crossfade**: the whole buffer blends linearly toward the target.
//!
//! A [`MorphSession`] owns all animation state and is driven cooperatively:
//! the host calls [`MorphSession::advance`] once per display refresh until
//! the returned [`StepReport`] says the run is complete. All time comes from
//! the caller and all randomness from a seed, so runs replay exactly.
#![forbid(unsafe_code)]

pub mod acquire;
pub mod clock;
pub mod config;
pub mod core;
pub mod correspond;
pub mod ease;
pub mod error;
pub mod fit;
pub mod luma;
pub mod modes;
pub mod particle;
pub mod rng;
pub mod session;

pub use clock::AnimationClock;
pub use config::{MorphConfig, MorphMode, parse_mode};
pub use core::{CellPos, GridSize, PixelBuffer, Rgba8};
pub use correspond::Correspondence;
pub use ease::out_cubic;
pub use error::{PixmorphError, PixmorphResult};
pub use fit::{fit_to_square, frame_to_image, upscale_frame};
pub use particle::{Particle, ParticleSet, Speed, TimingPlan};
pub use rng::Rng64;
pub use session::{MorphSession, Phase, StepReport};
