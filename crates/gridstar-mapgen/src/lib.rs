//! Obstacle placement for gridstar: produces the grids searches run on.
//!
//! Generation is driven by an explicit random number generator, so a seed
//! always reproduces the same grid.

pub mod config;
pub mod obstacles;

pub use config::ObstacleConfig;
pub use obstacles::{MapGenError, ObstacleGen, generate};
