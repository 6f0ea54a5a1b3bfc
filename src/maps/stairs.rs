use glam::UVec3;

use crate::engine::{SimulationEngine, CELL_CAPACITY};
use crate::error::SimulationError;
use crate::maps::{MapKind, MapStrategy};

/// Seeds fluid in a staircase descending along the x axis, one step of
/// height per column; no forcing after setup
#[derive(Default)]
pub struct StairsMap;

impl MapStrategy for StairsMap {
    fn setup(&mut self, engine: &mut SimulationEngine) -> Result<(), SimulationError> {
        let dims = engine.dims();
        let steps = dims.x.min(dims.y);

        let mut positions = Vec::new();
        let mut volumes = Vec::new();
        for step in 0..steps {
            let y = dims.y - 1 - step;
            for z in 0..dims.z {
                positions.push(UVec3::new(step, y, z));
                volumes.push(CELL_CAPACITY * 0.6);
            }
        }
        engine.set_fluid_volumes(&positions, &volumes)
    }

    fn step(
        &mut self,
        _engine: &mut SimulationEngine,
        _elapsed: f32,
    ) -> Result<(), SimulationError> {
        Ok(())
    }

    fn kind(&self) -> MapKind {
        MapKind::Stairs
    }
}
