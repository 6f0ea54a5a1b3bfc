use bytemuck::{Pod, Zeroable};
use glam::UVec3;

/// Sentinel written into cleared record positions so stale entries
/// never match a live lookup
pub const POSITION_SENTINEL: u32 = u32::MAX;

/// Indices of a unit cube, the mesh instanced per active cell
const CUBE_INDEX_COUNT: u32 = 36;

/// One active-cell record - instance data for the renderer
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ActiveCell {
    pub position: [u32; 3],
    pub volume: f32,
}

impl ActiveCell {
    pub fn new(position: UVec3, volume: f32) -> Self {
        Self {
            position: position.to_array(),
            volume,
        }
    }

    fn sentinel() -> Self {
        Self {
            position: [POSITION_SENTINEL; 3],
            volume: 0.0,
        }
    }
}

/// Indirect indexed-draw arguments consumed by the renderer.
/// `instance_count` doubles as the number of valid active-cell records.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DrawArgs {
    pub index_count: u32,
    pub instance_count: u32,
    pub first_index: u32,
    pub base_vertex: i32,
    pub base_instance: u32,
}

impl Default for DrawArgs {
    fn default() -> Self {
        Self {
            index_count: CUBE_INDEX_COUNT,
            instance_count: 0,
            first_index: 0,
            base_vertex: 0,
            base_instance: 0,
        }
    }
}

/// Compacted index of non-empty cells.
///
/// The first `instance_count` records correspond exactly to the grid
/// positions holding fluid, with no duplicates; records at or beyond
/// the count are undefined. Capacity is fixed at the total cell count,
/// so inserts never reallocate. Only the owning engine mutates the
/// index (and with it `instance_count`).
pub struct ActiveCellIndex {
    records: Vec<ActiveCell>,
    draw: DrawArgs,
}

impl ActiveCellIndex {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: vec![ActiveCell::sentinel(); capacity],
            draw: DrawArgs::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.draw.instance_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.draw.instance_count == 0
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Valid records only
    pub fn active(&self) -> &[ActiveCell] {
        &self.records[..self.len()]
    }

    pub fn draw_args(&self) -> DrawArgs {
        self.draw
    }

    /// Insert a record for `position` or overwrite the volume of an
    /// existing one. Linear scan over the active prefix; fine for
    /// sparse host edits.
    pub fn upsert(&mut self, position: UVec3, volume: f32) {
        let key = position.to_array();
        let count = self.len();
        for record in &mut self.records[..count] {
            if record.position == key {
                record.volume = volume;
                return;
            }
        }
        self.records[count] = ActiveCell::new(position, volume);
        self.draw.instance_count += 1;
    }

    /// Remove the record for `position`, keeping the active prefix
    /// contiguous by swapping the last record into the vacated slot.
    /// Removing an absent position is a no-op.
    pub fn remove(&mut self, position: UVec3) -> bool {
        let key = position.to_array();
        let count = self.len();
        for slot in 0..count {
            if self.records[slot].position == key {
                self.records[slot] = self.records[count - 1];
                self.records[count - 1] = ActiveCell::sentinel();
                self.draw.instance_count -= 1;
                return true;
            }
        }
        false
    }

    /// Replace the whole index with the given records (post-step
    /// refresh from the authoritative buffer)
    pub fn rebuild(&mut self, cells: &[(UVec3, f32)]) {
        debug_assert!(cells.len() <= self.records.len());
        for (record, &(position, volume)) in self.records.iter_mut().zip(cells) {
            *record = ActiveCell::new(position, volume);
        }
        self.draw.instance_count = cells.len() as u32;
    }

    /// Drop all records and sentinel-fill their positions
    pub fn clear(&mut self) {
        self.records.fill(ActiveCell::sentinel());
        self.draw.instance_count = 0;
    }
}
