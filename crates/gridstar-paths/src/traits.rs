use gridstar_core::{ObstacleGrid, Point};

use crate::distance::manhattan;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append candidate neighbors of `p` into `buf`, in a fixed order.
    /// The caller clears `buf` before calling. Candidates may lie outside
    /// the grid or on obstacles; the search filters them.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible), and must be
    /// consistent so that closed positions never need reopening.
    fn estimate(&self, from: Point, to: Point) -> i32;
}

/// Unit-cost movement to the four axis-aligned neighbors, guided by the
/// Manhattan distance. Neighbors come in the order up, down, left, right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FourConnected;

impl Pather for FourConnected {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend_from_slice(&p.neighbors_4());
    }
}

impl WeightedPather for FourConnected {
    #[inline]
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for FourConnected {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// A grid moves like [`FourConnected`], but only yields passable neighbors.
impl Pather for ObstacleGrid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }
}

impl WeightedPather for ObstacleGrid {
    #[inline]
    fn cost(&self, from: Point, to: Point) -> i32 {
        FourConnected.cost(from, to)
    }
}

impl AstarPather for ObstacleGrid {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        FourConnected.estimate(from, to)
    }
}
