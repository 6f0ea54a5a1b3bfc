use glam::UVec3;

use crate::engine::{SimulationEngine, CELL_CAPACITY};
use crate::error::SimulationError;
use crate::maps::{MapKind, MapStrategy};

/// Fills one corner quadrant of the tank with a tall stack of full
/// cells that spills into the rest of the volume as it settles
#[derive(Default)]
pub struct OverflowMap;

impl MapStrategy for OverflowMap {
    fn setup(&mut self, engine: &mut SimulationEngine) -> Result<(), SimulationError> {
        let dims = engine.dims();
        let extent_x = (dims.x / 2).max(1);
        let extent_z = (dims.z / 2).max(1);
        let height = (dims.y * 3 / 4).max(1);

        let mut positions = Vec::new();
        let mut volumes = Vec::new();
        for y in 0..height {
            for z in 0..extent_z {
                for x in 0..extent_x {
                    positions.push(UVec3::new(x, y, z));
                    volumes.push(CELL_CAPACITY);
                }
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
        MapKind::Overflow
    }
}
