use glam::{IVec3, UVec3};

use crate::cell::Cell;
use crate::grid::GridDims;

/// Read-only view of the read buffer handed to transfer kernels.
///
/// Workers compute their own cell's next state from this view only, so
/// parallel writes stay disjoint and the phase result is deterministic.
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    cells: &'a [Cell],
    dims: GridDims,
}

impl<'a> GridView<'a> {
    pub fn new(cells: &'a [Cell], dims: GridDims) -> Self {
        debug_assert_eq!(cells.len(), dims.cell_count());
        Self { cells, dims }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn cell(&self, pos: UVec3) -> Cell {
        self.cells[self.dims.linear_index(pos)]
    }

    pub fn volume(&self, pos: UVec3) -> f32 {
        self.cell(pos).fluid_volume
    }

    /// Neighbor position at the given offset, `None` outside the tank
    pub fn neighbor(&self, pos: UVec3, offset: IVec3) -> Option<UVec3> {
        let shifted = pos.as_ivec3() + offset;
        if shifted.min_element() < 0 {
            return None;
        }
        let shifted = shifted.as_uvec3();
        self.dims.contains(shifted).then_some(shifted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_is_bounds_checked() {
        let cells = vec![Cell::empty(); 8];
        let view = GridView::new(&cells, GridDims::new(2, 2, 2));

        let origin = UVec3::ZERO;
        assert_eq!(
            view.neighbor(origin, IVec3::new(1, 0, 0)),
            Some(UVec3::new(1, 0, 0))
        );
        assert_eq!(view.neighbor(origin, IVec3::new(-1, 0, 0)), None);
        assert_eq!(view.neighbor(UVec3::new(1, 1, 1), IVec3::new(0, 0, 1)), None);
    }
}
