use crate::core::GridSize;
use crate::error::{PixmorphError, PixmorphResult};
use crate::particle::Speed;

/// How the current frame gets from the source image to the target image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphMode {
    /// Luminance-matched particles fly to their new positions.
    #[default]
    Particles,
    /// Target pixels pop in over the source in a shuffled order.
    Reveal,
    /// The whole buffer blends linearly from source to target.
    Crossfade,
}

/// Parses a user-facing mode name, accepting the common spellings.
pub fn parse_mode(name: &str) -> PixmorphResult<MorphMode> {
    let kind = name.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(PixmorphError::validation("morph mode must be non-empty"));
    }
    match kind.as_str() {
        "particles" | "particle" | "rearrange" => Ok(MorphMode::Particles),
        "reveal" | "pixel_reveal" | "pixelreveal" => Ok(MorphMode::Reveal),
        "crossfade" | "fade" => Ok(MorphMode::Crossfade),
        other => Err(PixmorphError::validation(format!(
            "unknown morph mode '{other}'"
        ))),
    }
}

/// Snapshot of the animation controls, taken when a session is created.
///
/// All fields deserialize through their validating constructors, so a
/// `MorphConfig` that exists is a `MorphConfig` that is in range; there is no
/// separate validate step. Missing fields fall back to the host defaults
/// (64-cell grid, speed 50, particle mode).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MorphConfig {
    #[serde(default)]
    pub grid: GridSize,
    #[serde(default)]
    pub speed: Speed,
    #[serde(default)]
    pub mode: MorphMode,
}
