use crate::core::PixelBuffer;
use crate::error::{PixmorphError, PixmorphResult};
use crate::luma::luminance_ranks;

/// A bijective pairing between source and target pixel indices.
///
/// The k-th darkest source pixel is sent to the position of the k-th darkest
/// target pixel, so dark regions flow into dark regions and the settled frame
/// contains every source color exactly once. `map[source_index]` is the target
/// index that source pixel travels to.
#[derive(Debug, Clone)]
pub struct Correspondence {
    map: Vec<u32>,
}

impl Correspondence {
    /// Pairs the k-th darkest source pixel with the k-th darkest target pixel
    /// for every rank k.
    ///
    /// Both rankings are permutations of the same index range, so positional
    /// pairing yields a bijection with no further bookkeeping.
    pub fn from_rankings(src_ranks: &[u32], tgt_ranks: &[u32]) -> PixmorphResult<Self> {
        if src_ranks.len() != tgt_ranks.len() {
            return Err(PixmorphError::validation(format!(
                "rankings must cover the same pixels, got {} and {}",
                src_ranks.len(),
                tgt_ranks.len()
            )));
        }

        let mut map = vec![0u32; src_ranks.len()];
        for (&s, &t) in src_ranks.iter().zip(tgt_ranks.iter()) {
            map[s as usize] = t;
        }
        Ok(Self { map })
    }

    /// Builds the luminance-matched pairing between two same-size buffers.
    pub fn between(source: &PixelBuffer, target: &PixelBuffer) -> PixmorphResult<Self> {
        if source.grid() != target.grid() {
            return Err(PixmorphError::validation(format!(
                "correspondence requires matching grids, got {}x{} and {}x{}",
                source.side(),
                source.side(),
                target.side(),
                target.side()
            )));
        }
        Self::from_rankings(&luminance_ranks(source), &luminance_ranks(target))
    }

    /// Target pixel index assigned to `source_index`.
    pub fn target_of(&self, source_index: usize) -> usize {
        self.map[source_index] as usize
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.map
    }
}
