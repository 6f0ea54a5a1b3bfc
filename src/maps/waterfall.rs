use glam::UVec3;

use crate::engine::{SimulationEngine, CELL_CAPACITY};
use crate::error::SimulationError;
use crate::maps::{MapKind, MapStrategy};

/// Inexhaustible source cell at the top of the tank. The source is
/// refilled on every step, so fluid keeps pouring no matter how much
/// the previous step carried away.
#[derive(Default)]
pub struct WaterfallMap {
    source: Option<UVec3>,
}

impl WaterfallMap {
    fn source_for(engine: &SimulationEngine) -> UVec3 {
        let dims = engine.dims();
        UVec3::new(dims.x / 2, dims.y - 1, dims.z / 2)
    }
}

impl MapStrategy for WaterfallMap {
    fn setup(&mut self, engine: &mut SimulationEngine) -> Result<(), SimulationError> {
        let source = Self::source_for(engine);
        engine.set_fluid_volume(source, CELL_CAPACITY)?;
        self.source = Some(source);
        Ok(())
    }

    fn step(
        &mut self,
        engine: &mut SimulationEngine,
        _elapsed: f32,
    ) -> Result<(), SimulationError> {
        let source = self.source.unwrap_or_else(|| Self::source_for(engine));
        engine.set_fluid_volume(source, CELL_CAPACITY)
    }

    fn kind(&self) -> MapKind {
        MapKind::Waterfall
    }
}
