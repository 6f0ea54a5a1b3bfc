use crate::cell::Cell;

/// Double-buffered cell storage.
///
/// One buffer is the authoritative read state for the next compute
/// phase, the other is being written. The roles flip on [`swap`].
/// All access goes through the owning engine, so a phase can never
/// observe a half-written buffer.
///
/// [`swap`]: Self::swap
pub struct DoubleBuffer {
    buffers: [Vec<Cell>; 2],
    /// Index (0/1) of the current read buffer
    read: usize,
}

impl DoubleBuffer {
    /// Allocate both buffers filled with default cells
    pub fn new(cell_count: usize) -> Self {
        Self {
            buffers: [vec![Cell::empty(); cell_count], vec![Cell::empty(); cell_count]],
            read: 0,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.buffers[0].len()
    }

    /// The authoritative read buffer
    pub fn read_buffer(&self) -> &[Cell] {
        &self.buffers[self.read]
    }

    /// Borrow the read buffer and the write buffer for one compute
    /// phase. The split borrow guarantees workers can read neighbors
    /// while owning disjoint write slots.
    pub fn phase_buffers(&mut self) -> (&[Cell], &mut [Cell]) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.read == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    /// The just-written buffer becomes the new read buffer
    pub fn swap(&mut self) {
        self.read ^= 1;
    }

    /// Write one cell into both buffers at the given linear index.
    ///
    /// Host mutations must land in both copies so the next phase reads
    /// the edit no matter which buffer currently holds the read role.
    pub fn set_cell(&mut self, index: usize, cell: Cell) {
        self.buffers[0][index] = cell;
        self.buffers[1][index] = cell;
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.buffers[self.read][index]
    }

    /// Clear both buffers back to default cells
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(Cell::empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cell_writes_both_buffers() {
        let mut buffers = DoubleBuffer::new(8);
        buffers.set_cell(3, Cell::new(0.5));

        assert_eq!(buffers.cell(3).fluid_volume, 0.5);
        buffers.swap();
        assert_eq!(buffers.cell(3).fluid_volume, 0.5);
    }

    #[test]
    fn swap_flips_read_role() {
        let mut buffers = DoubleBuffer::new(4);
        {
            let (_read, write) = buffers.phase_buffers();
            write[0] = Cell::new(1.0);
        }
        // Not visible until the swap publishes the written buffer
        assert_eq!(buffers.cell(0).fluid_volume, 0.0);
        buffers.swap();
        assert_eq!(buffers.cell(0).fluid_volume, 1.0);
    }

    #[test]
    fn clear_empties_both_buffers() {
        let mut buffers = DoubleBuffer::new(4);
        buffers.set_cell(1, Cell::new(2.0));
        buffers.clear();
        assert!(buffers.cell(1).is_empty());
        buffers.swap();
        assert!(buffers.cell(1).is_empty());
    }
}
