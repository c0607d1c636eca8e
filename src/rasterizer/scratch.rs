//! Per-context scratch arena.
//!
//! Holds transient per-batch data. `reset` drops the contents but keeps the
//! capacity, so steady-state frames do not allocate.

use super::error::ContextError;
use super::tiled::TileDescriptor;

/// Default reservation: enough tile records for a 1024x1024 target in 4x4 tiles
pub const DEFAULT_TILE_CAPACITY: usize = (1024 / 4) * (1024 / 4);
pub const DEFAULT_VERTEX_CAPACITY: usize = 16 * 1024;

#[derive(Debug, Default)]
pub struct Scratch {
    /// Object-space positions gathered from the bound position buffer
    pub(crate) object_positions: Vec<[f32; 2]>,
    /// Screen-space positions produced by the batch transform
    pub(crate) screen_positions: Vec<[i32; 2]>,
    /// Tiles binned by the tiled fill strategies
    pub(crate) tiles: Vec<TileDescriptor>,
}

impl Scratch {
    /// Reserve room for one frame of tile metadata for a `width` x `height` target
    pub fn with_capacity(width: usize, height: usize) -> Result<Self, ContextError> {
        let tile_capacity = (width.div_ceil(4) * height.div_ceil(4)).min(DEFAULT_TILE_CAPACITY);

        let mut scratch = Scratch::default();
        scratch
            .object_positions
            .try_reserve_exact(DEFAULT_VERTEX_CAPACITY)
            .map_err(|_| oom::<[f32; 2]>(DEFAULT_VERTEX_CAPACITY))?;
        scratch
            .screen_positions
            .try_reserve_exact(DEFAULT_VERTEX_CAPACITY)
            .map_err(|_| oom::<[i32; 2]>(DEFAULT_VERTEX_CAPACITY))?;
        scratch
            .tiles
            .try_reserve_exact(tile_capacity)
            .map_err(|_| oom::<TileDescriptor>(tile_capacity))?;
        Ok(scratch)
    }

    /// Start a new batch
    pub fn reset(&mut self) {
        self.object_positions.clear();
        self.screen_positions.clear();
        self.tiles.clear();
    }

    /// Bytes currently reserved
    pub fn capacity_bytes(&self) -> usize {
        self.object_positions.capacity() * std::mem::size_of::<[f32; 2]>()
            + self.screen_positions.capacity() * std::mem::size_of::<[i32; 2]>()
            + self.tiles.capacity() * std::mem::size_of::<TileDescriptor>()
    }
}

fn oom<T>(count: usize) -> ContextError {
    ContextError::OutOfMemory {
        bytes: count.saturating_mul(std::mem::size_of::<T>()),
    }
}
