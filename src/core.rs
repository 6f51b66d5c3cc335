use crate::error::{PixmorphError, PixmorphResult};

/// Side length of the square working grid both images are normalized to.
///
/// Hosts typically offer a handful of choices in the 32–128 range; the core
/// accepts anything in `1..=GridSize::MAX`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct GridSize(u32);

impl GridSize {
    pub const MAX: u32 = 512;

    pub fn new(side: u32) -> PixmorphResult<Self> {
        if side == 0 {
            return Err(PixmorphError::validation("grid size must be > 0"));
        }
        if side > Self::MAX {
            return Err(PixmorphError::validation(format!(
                "grid size must be <= {}",
                Self::MAX
            )));
        }
        Ok(Self(side))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Total number of cells (N²).
    pub fn pixel_count(self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }
}

impl Default for GridSize {
    /// 64, the grid most hosts start from.
    fn default() -> Self {
        Self(64)
    }
}

impl TryFrom<u32> for GridSize {
    type Error = PixmorphError;

    fn try_from(side: u32) -> PixmorphResult<Self> {
        Self::new(side)
    }
}

impl From<GridSize> for u32 {
    fn from(g: GridSize) -> u32 {
        g.0
    }
}

/// Straight (non-premultiplied) RGBA8, matching canvas `ImageData` layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_slice(px: &[u8]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }
}

/// Integer cell coordinate on the working grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CellPos {
    pub x: u32,
    pub y: u32,
}

impl CellPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Decomposes a linear pixel index: `x = i mod N`, `y = i div N`.
    pub fn from_index(index: usize, grid: GridSize) -> Self {
        let n = grid.get() as usize;
        Self {
            x: (index % n) as u32,
            y: (index / n) as u32,
        }
    }

    pub fn to_index(self, grid: GridSize) -> usize {
        (self.y as usize) * (grid.get() as usize) + self.x as usize
    }

    pub fn to_point(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Owned N×N pixel grid, tightly packed row-major RGBA8.
///
/// This is both the capture format for the fitted source/target images and
/// the render target the frame driver writes: bulk writes via [`copy_from`]
/// / [`fill`], single-cell fills via [`put`].
///
/// [`copy_from`]: PixelBuffer::copy_from
/// [`fill`]: PixelBuffer::fill
/// [`put`]: PixelBuffer::put
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    grid: GridSize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn filled(grid: GridSize, color: Rgba8) -> Self {
        let mut buf = Self {
            grid,
            data: vec![0; grid.pixel_count() * 4],
        };
        buf.fill(color);
        buf
    }

    /// Wraps raw RGBA8 bytes; the length must be exactly N²·4.
    pub fn from_rgba8(grid: GridSize, data: Vec<u8>) -> PixmorphResult<Self> {
        let expected = grid.pixel_count() * 4;
        if data.len() != expected {
            return Err(PixmorphError::validation(format!(
                "pixel buffer expects {expected} bytes for a {0}x{0} grid, got {1}",
                grid.get(),
                data.len()
            )));
        }
        Ok(Self { grid, data })
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn side(&self) -> u32 {
        self.grid.get()
    }

    pub fn pixel_count(&self) -> usize {
        self.grid.pixel_count()
    }

    pub fn get(&self, cell: CellPos) -> Rgba8 {
        self.get_index(cell.to_index(self.grid))
    }

    pub fn get_index(&self, index: usize) -> Rgba8 {
        let off = index * 4;
        Rgba8::from_slice(&self.data[off..off + 4])
    }

    pub fn put(&mut self, cell: CellPos, color: Rgba8) {
        self.put_index(cell.to_index(self.grid), color);
    }

    pub fn put_index(&mut self, index: usize, color: Rgba8) {
        let off = index * 4;
        self.data[off..off + 4].copy_from_slice(&color.to_array());
    }

    pub fn fill(&mut self, color: Rgba8) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_array());
        }
    }

    /// Bulk write: replaces this buffer's pixels with `other`'s.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> PixmorphResult<()> {
        if self.grid != other.grid {
            return Err(PixmorphError::validation(
                "copy_from expects buffers of the same grid size",
            ));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
