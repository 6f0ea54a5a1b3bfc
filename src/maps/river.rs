use glam::UVec3;

use crate::engine::{SimulationEngine, CELL_CAPACITY};
use crate::error::SimulationError;
use crate::maps::{MapKind, MapStrategy};

/// Shallow channel along the x axis, fed at its head on every step
#[derive(Default)]
pub struct RiverMap {
    head: Option<UVec3>,
}

impl MapStrategy for RiverMap {
    fn setup(&mut self, engine: &mut SimulationEngine) -> Result<(), SimulationError> {
        let dims = engine.dims();
        let channel_z = dims.z / 2;
        let head = UVec3::new(0, 0, channel_z);

        let mut positions = Vec::new();
        let mut volumes = Vec::new();
        for x in 0..dims.x {
            positions.push(UVec3::new(x, 0, channel_z));
            volumes.push(CELL_CAPACITY * 0.5);
        }
        engine.set_fluid_volumes(&positions, &volumes)?;
        self.head = Some(head);
        Ok(())
    }

    fn step(
        &mut self,
        engine: &mut SimulationEngine,
        _elapsed: f32,
    ) -> Result<(), SimulationError> {
        let head = self
            .head
            .unwrap_or_else(|| UVec3::new(0, 0, engine.dims().z / 2));
        engine.set_fluid_volume(head, CELL_CAPACITY)
    }

    fn kind(&self) -> MapKind {
        MapKind::River
    }
}
