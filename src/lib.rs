pub mod cell;
pub mod engine;
pub mod error;
pub mod grid;
pub mod index;
pub mod maps;

use glam::UVec3;
use serde::{Deserialize, Serialize};

pub use cell::Cell;
pub use engine::{EqualizeRule, SimulationEngine, TransferRule, CELL_CAPACITY};
pub use error::SimulationError;
pub use grid::{DoubleBuffer, GridDims, GridView};
pub use index::{ActiveCell, ActiveCellIndex, DrawArgs};
pub use maps::{create_map, MapKind, MapStrategy};

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Tank size in cells
    pub tank_size: UVec3,
    /// Worker threads for the compute phases
    pub worker_threads: usize,
    /// Fraction of a pairwise volume difference exchanged laterally
    /// per step
    pub flow_rate: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tank_size: UVec3::new(32, 32, 32),
            worker_threads: num_cpus::get(),
            flow_rate: 0.125,
        }
    }
}

impl SimulationConfig {
    /// Config for a tank of the given size, defaults elsewhere
    pub fn with_tank_size(size: UVec3) -> Self {
        Self {
            tank_size: size,
            ..Self::default()
        }
    }
}
