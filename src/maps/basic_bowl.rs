use glam::UVec3;

use crate::engine::{SimulationEngine, CELL_CAPACITY};
use crate::error::SimulationError;
use crate::maps::{MapKind, MapStrategy};

/// Seeds a round pool of fluid at the bottom of the tank; no forcing
#[derive(Default)]
pub struct BasicBowlMap;

impl MapStrategy for BasicBowlMap {
    fn setup(&mut self, engine: &mut SimulationEngine) -> Result<(), SimulationError> {
        let dims = engine.dims();
        let center_x = dims.x as f32 / 2.0;
        let center_z = dims.z as f32 / 2.0;
        let radius = (dims.x.min(dims.z) as f32 / 2.0).max(1.0);
        let depth = (dims.y / 4).max(1);

        let mut positions = Vec::new();
        let mut volumes = Vec::new();
        for y in 0..depth {
            for z in 0..dims.z {
                for x in 0..dims.x {
                    let dx = x as f32 + 0.5 - center_x;
                    let dz = z as f32 + 0.5 - center_z;
                    if dx * dx + dz * dz <= radius * radius {
                        positions.push(UVec3::new(x, y, z));
                        volumes.push(CELL_CAPACITY * 0.8);
                    }
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
        MapKind::BasicBowl
    }
}
