use gridstar_core::Point;

use crate::error::{PathError, Result, invariant};
use crate::registry::{Registry, Status};

/// Rebuild the start→goal path by walking predecessor links back from
/// `goal`, which must have been closed by the search.
pub fn reconstruct(registry: &Registry, goal: Point) -> Result<Vec<Point>> {
    if registry.status(goal) != Status::Closed {
        return Err(PathError::Unreachable(goal));
    }

    // A chain longer than the number of discovered positions has a cycle.
    let limit = registry.discovered();
    let mut path = Vec::new();
    let mut cur = Some(goal);
    while let Some(p) = cur {
        if path.len() >= limit {
            return Err(invariant(format!(
                "predecessor chain from {goal} exceeds {limit} positions"
            )));
        }
        path.push(p);
        cur = registry.get(p).and_then(|s| s.predecessor);
    }
    path.reverse();
    Ok(path)
}
