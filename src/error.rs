use glam::UVec3;

/// Simulation errors
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("position {position:?} outside tank of size {size:?}")]
    OutOfBounds { position: UVec3, size: UVec3 },

    #[error("linear index {index} outside tank of {cell_count} cells")]
    IndexOutOfBounds { index: usize, cell_count: usize },

    #[error("batch length mismatch: {positions} positions, {volumes} volumes")]
    BatchLengthMismatch { positions: usize, volumes: usize },

    #[error("unsupported map type: {value}")]
    UnsupportedMap { value: String },

    #[error("simulation init failed: {message}")]
    InitFailed { message: String },
}
