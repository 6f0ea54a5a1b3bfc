use glam::{IVec3, UVec3};

use crate::cell::Cell;
use crate::grid::GridView;

/// How much fluid a single cell holds before it is considered full
pub const CELL_CAPACITY: f32 = 1.0;

/// Change threshold below which a cell is marked stable
const STABILITY_EPSILON: f32 = 1e-5;

const LATERAL_OFFSETS: [IVec3; 4] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// Volume-redistribution policy for the two compute phases.
///
/// Implementations compute the next state of a single cell from the
/// read-only view. Pairwise exchange terms must be pure functions of
/// read state so that disjoint parallel writes conserve volume and the
/// step stays deterministic.
pub trait TransferRule: Send + Sync {
    /// Lateral transfer between a cell and its four side neighbors
    fn horizontal(&self, view: &GridView<'_>, pos: UVec3) -> Cell;

    /// Gravity-driven transfer along the y axis
    fn vertical(&self, view: &GridView<'_>, pos: UVec3) -> Cell;
}

/// Default rule: lateral diffusion toward neighbor equalization plus
/// downward flow bounded by the capacity of the cell below.
pub struct EqualizeRule {
    /// Fraction of a pairwise volume difference exchanged per step.
    /// Must stay <= 1/4 so a cell cannot go negative against four
    /// draining neighbors.
    flow_rate: f32,
}

impl EqualizeRule {
    pub fn new(flow_rate: f32) -> Self {
        Self {
            flow_rate: flow_rate.clamp(0.0, 0.25),
        }
    }

    /// Fluid dropped from `upper` into `lower` in one step. Both
    /// workers on either side of the pair evaluate this identically.
    fn falling_volume(upper: f32, lower: f32) -> f32 {
        upper.min((CELL_CAPACITY - lower).max(0.0))
    }

    /// A cell passes fluid sideways only when it rests on the tank
    /// floor or on a full cell; the gate is evaluated per endpoint so
    /// both sides of an exchange agree on it.
    fn supported(view: &GridView<'_>, pos: UVec3) -> bool {
        match view.neighbor(pos, IVec3::new(0, -1, 0)) {
            Some(below) => view.volume(below) >= CELL_CAPACITY - STABILITY_EPSILON,
            None => true,
        }
    }
}

impl Default for EqualizeRule {
    fn default() -> Self {
        Self::new(0.125)
    }
}

impl TransferRule for EqualizeRule {
    fn horizontal(&self, view: &GridView<'_>, pos: UVec3) -> Cell {
        let volume = view.volume(pos);
        let mut next = volume;

        if Self::supported(view, pos) {
            for offset in LATERAL_OFFSETS {
                let Some(neighbor) = view.neighbor(pos, offset) else {
                    continue;
                };
                if !Self::supported(view, neighbor) {
                    continue;
                }
                next += self.flow_rate * (view.volume(neighbor) - volume);
            }
        }

        let mut cell = Cell::new(next);
        cell.set_stable(((next - volume).abs() < STABILITY_EPSILON) as u32);
        cell
    }

    fn vertical(&self, view: &GridView<'_>, pos: UVec3) -> Cell {
        let volume = view.volume(pos);
        let mut next = volume;

        if let Some(below) = view.neighbor(pos, IVec3::new(0, -1, 0)) {
            next -= Self::falling_volume(volume, view.volume(below));
        }
        if let Some(above) = view.neighbor(pos, IVec3::new(0, 1, 0)) {
            next += Self::falling_volume(view.volume(above), volume);
        }

        let mut cell = Cell::new(next);
        cell.set_stable(((next - volume).abs() < STABILITY_EPSILON) as u32);
        cell
    }
}
