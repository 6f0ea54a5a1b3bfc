use glam::UVec3;

use crate::engine::{SimulationEngine, CELL_CAPACITY};
use crate::error::SimulationError;
use crate::maps::{MapKind, MapStrategy};

/// Single spherical droplet suspended high in the tank; it falls and
/// splashes under the transfer rule alone
#[derive(Default)]
pub struct TearDropMap;

impl MapStrategy for TearDropMap {
    fn setup(&mut self, engine: &mut SimulationEngine) -> Result<(), SimulationError> {
        let dims = engine.dims();
        let center = UVec3::new(dims.x / 2, dims.y * 3 / 4, dims.z / 2);
        let radius = (dims.x.min(dims.y).min(dims.z) / 4).max(1) as f32;

        let mut positions = Vec::new();
        let mut volumes = Vec::new();
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let delta = UVec3::new(x, y, z).as_vec3() - center.as_vec3();
                    if delta.length_squared() <= radius * radius {
                        positions.push(UVec3::new(x, y, z));
                        volumes.push(CELL_CAPACITY);
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
        MapKind::TearDrop
    }
}
