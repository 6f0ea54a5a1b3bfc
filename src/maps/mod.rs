/// Map strategies
///
/// Each strategy seeds the tank at setup time and may keep forcing it
/// every step. Strategies only ever go through the engine's public
/// mutation API; they never touch buffer internals.

mod basic_bowl;
mod overflow;
mod river;
mod stairs;
mod teardrop;
mod waterfall;

pub use basic_bowl::BasicBowlMap;
pub use overflow::OverflowMap;
pub use river::RiverMap;
pub use stairs::StairsMap;
pub use teardrop::TearDropMap;
pub use waterfall::WaterfallMap;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::SimulationEngine;
use crate::error::SimulationError;

/// Identifies one of the built-in map strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapKind {
    BasicBowl,
    Waterfall,
    Overflow,
    Stairs,
    River,
    TearDrop,
}

impl MapKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapKind::BasicBowl => "basic_bowl",
            MapKind::Waterfall => "waterfall",
            MapKind::Overflow => "overflow",
            MapKind::Stairs => "stairs",
            MapKind::River => "river",
            MapKind::TearDrop => "teardrop",
        }
    }
}

impl FromStr for MapKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic_bowl" => Ok(MapKind::BasicBowl),
            "waterfall" => Ok(MapKind::Waterfall),
            "overflow" => Ok(MapKind::Overflow),
            "stairs" => Ok(MapKind::Stairs),
            "river" => Ok(MapKind::River),
            "teardrop" => Ok(MapKind::TearDrop),
            other => Err(SimulationError::UnsupportedMap {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for MapKind {
    type Error = SimulationError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(MapKind::BasicBowl),
            1 => Ok(MapKind::Waterfall),
            2 => Ok(MapKind::Overflow),
            3 => Ok(MapKind::Stairs),
            4 => Ok(MapKind::River),
            5 => Ok(MapKind::TearDrop),
            other => Err(SimulationError::UnsupportedMap {
                value: other.to_string(),
            }),
        }
    }
}

/// Seeding and forcing policy driving a simulation session
pub trait MapStrategy {
    /// Seed the tank; called once before the first step
    fn setup(&mut self, engine: &mut SimulationEngine) -> Result<(), SimulationError>;

    /// Per-step forcing as a function of elapsed time; may be a no-op
    fn step(
        &mut self,
        engine: &mut SimulationEngine,
        elapsed: f32,
    ) -> Result<(), SimulationError>;

    /// Identity tag for diagnostics and selection round-tripping
    fn kind(&self) -> MapKind;
}

/// Build the strategy for a map kind
pub fn create_map(kind: MapKind) -> Box<dyn MapStrategy> {
    match kind {
        MapKind::BasicBowl => Box::new(BasicBowlMap::default()),
        MapKind::Waterfall => Box::new(WaterfallMap::default()),
        MapKind::Overflow => Box::new(OverflowMap::default()),
        MapKind::Stairs => Box::new(StairsMap::default()),
        MapKind::River => Box::new(RiverMap::default()),
        MapKind::TearDrop => Box::new(TearDropMap::default()),
    }
}
