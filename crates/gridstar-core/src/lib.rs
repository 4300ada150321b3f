//! **gridstar-core** — core types shared by the *gridstar* crates.
//!
//! This crate provides the geometry primitives ([`Point`], [`Range`]) and
//! the read-only [`ObstacleGrid`] that pathfinding searches borrow.

pub mod geom;
pub mod grid;

pub use geom::{Point, Range};
pub use grid::{GridError, ObstacleGrid};
