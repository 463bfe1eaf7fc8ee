use thiserror::Error;

/// Configuration and input errors. An unreachable destination is not an error; solvers report it
/// as `None`.
#[derive(Debug, Error)]
pub enum PathfindingError {
    #[error("no path solver is selected")]
    NoSolver,

    #[error("map data has not been set")]
    MapDataMissing,

    #[error("map dimensions must be positive, got {width}x{height}")]
    EmptyMap { width: usize, height: usize },

    #[error("map data declares {width}x{height} but the terrain is {actual_width}x{actual_height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("({x}, {y}) lies outside the {width}x{height} map")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("unknown path solver '{0}'")]
    UnknownSolver(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, PathfindingError>;
