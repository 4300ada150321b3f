//! A* shortest-path search on obstacle grids.
//!
//! The search is split into small parts that can be used and tested on
//! their own:
//!
//! - [`Registry`] holds one [`SearchState`] per discovered position
//! - [`Frontier`] orders candidates by estimated total cost, FIFO on ties
//! - [`AstarSearch`] drives the expand/relax loop as a small state machine
//! - [`reconstruct`] turns predecessor links into a start→goal path
//!
//! Most callers only need [`find_path`]:
//!
//! ```
//! use gridstar_core::{ObstacleGrid, Point};
//! use gridstar_paths::find_path;
//!
//! let grid = ObstacleGrid::new(5, 5);
//! let path = find_path(&grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
//! assert_eq!(path.len(), 9);
//! ```
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | candidate moves |
//! | [`WeightedPather`] : [`Pather`] | move costs |
//! | [`AstarPather`] : [`WeightedPather`] | the heuristic |

mod astar;
mod distance;
mod error;
mod frontier;
mod reconstruct;
mod registry;
mod traits;

pub use astar::{AstarSearch, SearchPhase, SearchStats, find_path, find_path_with};
pub use distance::manhattan;
pub use error::{Endpoint, EndpointFault, PathError, Result};
pub use frontier::{Frontier, FrontierEntry};
pub use reconstruct::reconstruct;
pub use registry::{Registry, RelaxResult, SearchState, Status, UNREACHABLE};
pub use traits::{AstarPather, FourConnected, Pather, WeightedPather};
