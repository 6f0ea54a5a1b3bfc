/// Grid storage for the cellular automaton
///
/// Double-buffered cell storage plus the 3D<->1D index mapping shared by
/// the storage, the transfer kernels, and active-cell matching.

pub mod position;
pub mod storage;
pub mod view;

pub use position::GridDims;
pub use storage::DoubleBuffer;
pub use view::GridView;
