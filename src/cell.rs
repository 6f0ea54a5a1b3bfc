use bytemuck::{Pod, Zeroable};

/// Single fluid cell - packed for renderer consumption
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Cell {
    /// Fluid volume held by the cell, never negative
    pub fluid_volume: f32,

    /// Stability flag (0/1) set by the transfer kernels when the cell
    /// stopped changing
    pub stable: u32,
}

impl Cell {
    /// Create an empty cell (no fluid, unstable)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a cell holding the given volume
    pub fn new(fluid_volume: f32) -> Self {
        Self {
            fluid_volume: fluid_volume.max(0.0),
            stable: 0,
        }
    }

    /// Set the fluid volume, clamping negative input to zero
    pub fn set_fluid_volume(&mut self, fluid_volume: f32) {
        self.fluid_volume = fluid_volume.max(0.0);
    }

    /// Set the stability flag
    pub fn set_stable(&mut self, stable: u32) {
        self.stable = stable;
    }

    /// A cell with no fluid is inactive
    pub fn is_empty(&self) -> bool {
        self.fluid_volume <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_empty_and_unstable() {
        let cell = Cell::default();
        assert_eq!(cell.fluid_volume, 0.0);
        assert_eq!(cell.stable, 0);
        assert!(cell.is_empty());
    }

    #[test]
    fn negative_volume_clamps_to_zero() {
        let mut cell = Cell::new(-2.5);
        assert_eq!(cell.fluid_volume, 0.0);

        cell.set_fluid_volume(0.75);
        assert_eq!(cell.fluid_volume, 0.75);
        assert!(!cell.is_empty());

        cell.set_fluid_volume(-0.1);
        assert_eq!(cell.fluid_volume, 0.0);
    }

    #[test]
    fn cell_layout_is_pod() {
        // Renderer reads the grid buffer as raw bytes
        assert_eq!(std::mem::size_of::<Cell>(), 8);
        let cells = [Cell::new(1.0), Cell::new(0.5)];
        let bytes: &[u8] = bytemuck::cast_slice(&cells);
        assert_eq!(bytes.len(), 16);
    }
}
