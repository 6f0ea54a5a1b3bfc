use glam::UVec3;
use serde::{Deserialize, Serialize};

/// Dimensions of the simulation tank in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridDims {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    pub fn from_vec(size: UVec3) -> Self {
        Self::new(size.x, size.y, size.z)
    }

    pub fn as_vec(&self) -> UVec3 {
        UVec3::new(self.x, self.y, self.z)
    }

    /// Total number of cells in the tank
    pub fn cell_count(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Map a 3D position to its linear index.
    ///
    /// The same mapping is used by the grid buffers, the transfer
    /// kernels, and active-cell matching; it must never diverge.
    pub fn linear_index(&self, pos: UVec3) -> usize {
        pos.x as usize
            + pos.y as usize * self.x as usize
            + pos.z as usize * self.x as usize * self.y as usize
    }

    /// Inverse of [`linear_index`](Self::linear_index)
    pub fn position_of(&self, index: usize) -> UVec3 {
        let x = self.x as usize;
        let y = self.y as usize;
        UVec3::new(
            (index % x) as u32,
            ((index / x) % y) as u32,
            (index / (x * y)) as u32,
        )
    }

    /// Whether the position lies inside the tank
    pub fn contains(&self, pos: UVec3) -> bool {
        pos.x < self.x && pos.y < self.y && pos.z < self.z
    }
}
