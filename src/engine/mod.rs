/// Simulation engine
///
/// Owns the double-buffered grid and the active-cell index, and
/// orchestrates the two data-parallel transfer phases of each step.

pub mod transfer;

pub use transfer::{EqualizeRule, TransferRule, CELL_CAPACITY};

use glam::UVec3;
use rayon::prelude::*;

use crate::cell::Cell;
use crate::error::SimulationError;
use crate::grid::{DoubleBuffer, GridDims, GridView};
use crate::index::{ActiveCell, ActiveCellIndex, DrawArgs};
use crate::SimulationConfig;

#[derive(Clone, Copy)]
enum Phase {
    Horizontal,
    Vertical,
}

/// Cellular-automaton fluid engine.
///
/// Host mutations (`set_fluid_volume*`, `reset`) and `simulate` all
/// take `&mut self`, so they are serialized by construction: no host
/// edit can interleave with an in-flight compute phase, and external
/// readers only ever observe the state between completed calls.
pub struct SimulationEngine {
    dims: GridDims,
    buffers: DoubleBuffer,
    index: ActiveCellIndex,
    rule: Box<dyn TransferRule>,
    pool: rayon::ThreadPool,
    step: u64,
}

impl SimulationEngine {
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_rule(config, Box::new(EqualizeRule::new(config.flow_rate)))
    }

    /// Build an engine with a custom transfer policy
    pub fn with_rule(
        config: &SimulationConfig,
        rule: Box<dyn TransferRule>,
    ) -> Result<Self, SimulationError> {
        let dims = GridDims::from_vec(config.tank_size);
        if dims.cell_count() == 0 {
            return Err(SimulationError::InitFailed {
                message: format!("tank size {:?} has no cells", config.tank_size),
            });
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build()
            .map_err(|e| SimulationError::InitFailed {
                message: format!("thread pool: {e}"),
            })?;

        let cell_count = dims.cell_count();
        log::info!(
            "simulation engine: {}x{}x{} tank ({} cells), {} workers",
            dims.x,
            dims.y,
            dims.z,
            cell_count,
            config.worker_threads
        );

        Ok(Self {
            dims,
            buffers: DoubleBuffer::new(cell_count),
            index: ActiveCellIndex::new(cell_count),
            rule,
            pool,
            step: 0,
        })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Advance the simulation by one step: horizontal phase, swap,
    /// vertical phase, swap, then refresh the active-cell index from
    /// the post-step buffer. On return the read buffer holds the
    /// post-step state and is safe for host inspection.
    pub fn simulate(&mut self) {
        self.dispatch_phase(Phase::Horizontal);
        self.buffers.swap();
        self.dispatch_phase(Phase::Vertical);
        self.buffers.swap();
        self.refresh_active_cells();

        self.step += 1;
        log::debug!(
            "step {} complete, {} active cells",
            self.step,
            self.index.len()
        );
    }

    /// Run one compute phase: one worker per cell, each owning exactly
    /// its own write slot and reading neighbors from the read buffer.
    /// The parallel dispatch completing is the synchronization point;
    /// no later reader can observe a partial phase.
    fn dispatch_phase(&mut self, phase: Phase) {
        let dims = self.dims;
        let rule = &*self.rule;
        let (read, write) = self.buffers.phase_buffers();
        let view = GridView::new(read, dims);

        self.pool.install(|| {
            write.par_iter_mut().enumerate().for_each(|(i, cell)| {
                let pos = dims.position_of(i);
                *cell = match phase {
                    Phase::Horizontal => rule.horizontal(&view, pos),
                    Phase::Vertical => rule.vertical(&view, pos),
                };
            });
        });
    }

    /// Rebuild the active-cell records from the authoritative buffer.
    /// This is the single serialization point for `instance_count`.
    fn refresh_active_cells(&mut self) {
        let dims = self.dims;
        let read = self.buffers.read_buffer();

        let active: Vec<(UVec3, f32)> = self.pool.install(|| {
            read.par_iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(i, cell)| (dims.position_of(i), cell.fluid_volume))
                .collect()
        });

        self.index.rebuild(&active);
    }

    /// Set the volume of the cell at a linear index
    pub fn set_fluid_volume_at(
        &mut self,
        index: usize,
        volume: f32,
    ) -> Result<(), SimulationError> {
        if index >= self.dims.cell_count() {
            return Err(SimulationError::IndexOutOfBounds {
                index,
                cell_count: self.dims.cell_count(),
            });
        }
        let position = self.dims.position_of(index);
        self.set_fluid_volumes(&[position], &[volume])
    }

    /// Set the volume of the cell at a 3D coordinate
    pub fn set_fluid_volume(
        &mut self,
        position: UVec3,
        volume: f32,
    ) -> Result<(), SimulationError> {
        self.set_fluid_volumes(&[position], &[volume])
    }

    /// Batched host mutation. The whole batch is validated before any
    /// cell is touched, so a failed call mutates nothing.
    ///
    /// Each pair writes both grid buffers, then maintains the index:
    /// positive volume inserts or overwrites the record, non-positive
    /// volume removes it with in-place compaction (removing an absent
    /// position leaves the count unchanged).
    pub fn set_fluid_volumes(
        &mut self,
        positions: &[UVec3],
        volumes: &[f32],
    ) -> Result<(), SimulationError> {
        if positions.len() != volumes.len() {
            return Err(SimulationError::BatchLengthMismatch {
                positions: positions.len(),
                volumes: volumes.len(),
            });
        }
        for &position in positions {
            if !self.dims.contains(position) {
                return Err(SimulationError::OutOfBounds {
                    position,
                    size: self.dims.as_vec(),
                });
            }
        }

        for (&position, &volume) in positions.iter().zip(volumes) {
            let volume = volume.max(0.0);
            self.buffers
                .set_cell(self.dims.linear_index(position), Cell::new(volume));

            if volume > 0.0 {
                self.index.upsert(position, volume);
            } else {
                self.index.remove(position);
            }
        }
        Ok(())
    }

    /// Clear the grid and the active-cell index back to the initial
    /// empty state
    pub fn reset(&mut self) {
        self.buffers.clear();
        self.index.clear();
        self.step = 0;
        log::info!("simulation reset");
    }

    /// Cell state at a 3D coordinate, read from the authoritative buffer
    pub fn cell(&self, position: UVec3) -> Result<Cell, SimulationError> {
        if !self.dims.contains(position) {
            return Err(SimulationError::OutOfBounds {
                position,
                size: self.dims.as_vec(),
            });
        }
        Ok(self.buffers.cell(self.dims.linear_index(position)))
    }

    /// Read-only handle to the authoritative grid buffer
    pub fn grid_buffer(&self) -> &[Cell] {
        self.buffers.read_buffer()
    }

    /// Valid active-cell records, first `instance_count` entries only
    pub fn active_cells(&self) -> &[ActiveCell] {
        self.index.active()
    }

    pub fn active_count(&self) -> usize {
        self.index.len()
    }

    /// Indirect-draw arguments for instanced rendering
    pub fn draw_args(&self) -> DrawArgs {
        self.index.draw_args()
    }

    /// Total fluid volume across the grid
    pub fn total_volume(&self) -> f32 {
        self.buffers
            .read_buffer()
            .iter()
            .map(|cell| cell.fluid_volume)
            .sum()
    }
}
