//! Integration tests for the simulation engine: active-cell index
//! maintenance, the double-buffer step contract, and host mutation
//! error handling.

use glam::UVec3;

use aquacell::{SimulationConfig, SimulationEngine, SimulationError};

fn engine_with_size(x: u32, y: u32, z: u32) -> SimulationEngine {
    let mut config = SimulationConfig::with_tank_size(UVec3::new(x, y, z));
    config.worker_threads = 2;
    SimulationEngine::new(&config).expect("engine construction")
}

/// The set of active records must equal the set of grid positions with
/// positive volume, with no duplicates
fn assert_index_consistent(engine: &SimulationEngine) {
    let dims = engine.dims();
    let mut expected = std::collections::HashSet::new();
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                let pos = UVec3::new(x, y, z);
                if engine.cell(pos).unwrap().fluid_volume > 0.0 {
                    expected.insert(pos.to_array());
                }
            }
        }
    }

    let actual: Vec<[u32; 3]> = engine.active_cells().iter().map(|r| r.position).collect();
    let unique: std::collections::HashSet<[u32; 3]> = actual.iter().copied().collect();
    assert_eq!(unique.len(), actual.len(), "duplicate active records");
    assert_eq!(unique, expected);
    assert_eq!(engine.active_count(), expected.len());
}

#[test]
fn single_seed_scenario_4x4x4() {
    let mut engine = engine_with_size(4, 4, 4);
    let seed = UVec3::new(0, 3, 0);

    engine.set_fluid_volume(seed, 1.0).unwrap();
    assert_eq!(engine.active_count(), 1);
    let record = engine.active_cells()[0];
    assert_eq!(record.position, [0, 3, 0]);
    assert_eq!(record.volume, 1.0);

    engine.set_fluid_volume(seed, 0.0).unwrap();
    assert_eq!(engine.active_count(), 0);
}

#[test]
fn index_stays_consistent_under_mutation_sequences() {
    let mut engine = engine_with_size(4, 4, 4);

    engine.set_fluid_volume(UVec3::new(0, 0, 0), 0.5).unwrap();
    engine.set_fluid_volume(UVec3::new(1, 2, 3), 0.25).unwrap();
    engine.set_fluid_volume(UVec3::new(3, 3, 3), 1.0).unwrap();
    assert_index_consistent(&engine);

    // Overwrite, remove, re-add
    engine.set_fluid_volume(UVec3::new(1, 2, 3), 0.75).unwrap();
    assert_index_consistent(&engine);
    engine.set_fluid_volume(UVec3::new(0, 0, 0), 0.0).unwrap();
    assert_index_consistent(&engine);
    engine.set_fluid_volume(UVec3::new(0, 0, 0), 0.1).unwrap();
    assert_index_consistent(&engine);

    // Stays consistent across a simulated step too
    engine.simulate();
    assert_index_consistent(&engine);
}

#[test]
fn repeated_set_is_idempotent() {
    let mut engine = engine_with_size(4, 4, 4);
    let pos = UVec3::new(2, 1, 2);

    engine.set_fluid_volume(pos, 0.4).unwrap();
    let count_after_first = engine.active_count();
    let record_after_first = engine.active_cells()[0];

    engine.set_fluid_volume(pos, 0.4).unwrap();
    assert_eq!(engine.active_count(), count_after_first);
    assert_eq!(engine.active_cells()[0], record_after_first);
}

#[test]
fn removal_compacts_without_losing_records() {
    let mut engine = engine_with_size(4, 4, 4);
    let kept_a = UVec3::new(0, 0, 0);
    let removed = UVec3::new(1, 1, 1);
    let kept_b = UVec3::new(2, 2, 2);

    engine.set_fluid_volume(kept_a, 0.3).unwrap();
    engine.set_fluid_volume(removed, 0.6).unwrap();
    engine.set_fluid_volume(kept_b, 0.9).unwrap();

    engine.set_fluid_volume(removed, 0.0).unwrap();
    assert_eq!(engine.active_count(), 2);
    assert_index_consistent(&engine);
}

#[test]
fn removing_inactive_position_is_noop() {
    let mut engine = engine_with_size(4, 4, 4);
    engine.set_fluid_volume(UVec3::new(1, 1, 1), 0.5).unwrap();

    engine.set_fluid_volume(UVec3::new(3, 0, 3), 0.0).unwrap();
    assert_eq!(engine.active_count(), 1);
}

#[test]
fn reset_clears_grid_and_index() {
    let mut engine = engine_with_size(4, 4, 4);
    engine.set_fluid_volume(UVec3::new(1, 3, 1), 1.0).unwrap();
    engine.simulate();

    engine.reset();
    assert_eq!(engine.active_count(), 0);
    assert_eq!(engine.draw_args().instance_count, 0);

    let dims = engine.dims();
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                let cell = engine.cell(UVec3::new(x, y, z)).unwrap();
                assert_eq!(cell.fluid_volume, 0.0);
                assert_eq!(cell.stable, 0);
            }
        }
    }
}

#[test]
fn simulate_is_deterministic_for_fixed_input() {
    let seeds = [
        (UVec3::new(1, 3, 1), 0.9),
        (UVec3::new(2, 2, 2), 0.5),
        (UVec3::new(0, 1, 3), 0.2),
    ];

    let mut first = engine_with_size(4, 4, 4);
    let mut second = engine_with_size(4, 4, 4);
    for (pos, volume) in seeds {
        first.set_fluid_volume(pos, volume).unwrap();
        second.set_fluid_volume(pos, volume).unwrap();
    }

    for _ in 0..5 {
        first.simulate();
        second.simulate();
    }

    assert_eq!(first.grid_buffer(), second.grid_buffer());
    assert_eq!(first.active_cells(), second.active_cells());
}

#[test]
fn simulate_conserves_volume_and_keeps_it_non_negative() {
    let mut engine = engine_with_size(4, 4, 4);
    engine.set_fluid_volume(UVec3::new(1, 3, 1), 0.8).unwrap();
    engine.set_fluid_volume(UVec3::new(2, 2, 2), 0.5).unwrap();
    let before = engine.total_volume();

    engine.simulate();

    for cell in engine.grid_buffer() {
        assert!(cell.fluid_volume >= 0.0);
    }
    assert!((engine.total_volume() - before).abs() < 1e-4);
}

#[test]
fn linear_index_surface_matches_coordinate_surface() {
    let mut engine = engine_with_size(4, 4, 4);
    let dims = engine.dims();
    let pos = UVec3::new(3, 1, 2);

    engine
        .set_fluid_volume_at(dims.linear_index(pos), 0.7)
        .unwrap();
    assert_eq!(engine.cell(pos).unwrap().fluid_volume, 0.7);
    assert_eq!(engine.active_cells()[0].position, pos.to_array());
}

#[test]
fn batch_length_mismatch_is_rejected() {
    let mut engine = engine_with_size(4, 4, 4);
    let result = engine.set_fluid_volumes(&[UVec3::new(0, 0, 0)], &[0.5, 0.6]);
    assert!(matches!(
        result,
        Err(SimulationError::BatchLengthMismatch { .. })
    ));
    assert_eq!(engine.active_count(), 0);
}

#[test]
fn out_of_range_batch_mutates_nothing() {
    let mut engine = engine_with_size(4, 4, 4);
    let result = engine.set_fluid_volumes(
        &[UVec3::new(1, 1, 1), UVec3::new(9, 9, 9)],
        &[0.5, 0.5],
    );
    assert!(matches!(result, Err(SimulationError::OutOfBounds { .. })));

    // The valid half of the failed batch must not have been applied
    assert_eq!(engine.active_count(), 0);
    assert_eq!(engine.cell(UVec3::new(1, 1, 1)).unwrap().fluid_volume, 0.0);
}

#[test]
fn out_of_range_linear_index_is_rejected() {
    let mut engine = engine_with_size(4, 4, 4);
    let result = engine.set_fluid_volume_at(64, 0.5);
    assert!(matches!(
        result,
        Err(SimulationError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn zero_sized_tank_is_rejected() {
    let config = SimulationConfig::with_tank_size(UVec3::new(0, 4, 4));
    assert!(matches!(
        SimulationEngine::new(&config),
        Err(SimulationError::InitFailed { .. })
    ));
}
