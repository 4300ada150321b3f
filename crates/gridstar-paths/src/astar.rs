use gridstar_core::{ObstacleGrid, Point};

use crate::error::{Endpoint, EndpointFault, PathError, Result, invariant};
use crate::frontier::{Frontier, FrontierEntry};
use crate::reconstruct::reconstruct;
use crate::registry::{Registry, RelaxResult, Status};
use crate::traits::{AstarPather, FourConnected};

/// Where an [`AstarSearch`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchPhase {
    /// Endpoints validated, nothing queued yet.
    Ready,
    /// Expanding positions.
    Running,
    /// The goal was popped and closed.
    Succeeded,
    /// The frontier ran dry before reaching the goal.
    Exhausted,
}

impl SearchPhase {
    /// Whether the search has finished, successfully or not.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Exhausted)
    }
}

/// Counters describing the work done by a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Positions expanded (and closed), the goal excluded.
    pub expanded: usize,
    /// Distinct positions given a search state.
    pub discovered: usize,
    /// Frontier entries dropped because a cheaper route superseded them.
    pub stale_pops: usize,
}

/// One A* search from `start` to `goal` over a borrowed grid.
///
/// The registry and frontier belong to this search alone and are dropped
/// with it. The grid decides which cells exist and are open; the pather
/// decides candidate moves, their costs and the heuristic.
pub struct AstarSearch<'g, P = FourConnected> {
    grid: &'g ObstacleGrid,
    pather: &'g P,
    start: Point,
    goal: Point,
    registry: Registry,
    frontier: Frontier,
    phase: SearchPhase,
    stats: SearchStats,
    nbuf: Vec<Point>,
}

impl<'g> AstarSearch<'g, FourConnected> {
    /// Prepare a 4-connected, unit-cost search guided by Manhattan distance.
    ///
    /// Fails with [`PathError::InvalidEndpoint`] if `start` or `goal` is
    /// outside the grid or blocked.
    pub fn new(grid: &'g ObstacleGrid, start: Point, goal: Point) -> Result<Self> {
        Self::with_pather(grid, &FourConnected, start, goal)
    }
}

impl<'g, P: AstarPather> AstarSearch<'g, P> {
    /// Prepare a search whose moves, costs and heuristic come from `pather`.
    ///
    /// The heuristic must be consistent: closed positions are never
    /// reopened.
    pub fn with_pather(
        grid: &'g ObstacleGrid,
        pather: &'g P,
        start: Point,
        goal: Point,
    ) -> Result<Self> {
        validate_endpoint(grid, Endpoint::Start, start)?;
        validate_endpoint(grid, Endpoint::Goal, goal)?;
        Ok(Self {
            grid,
            pather,
            start,
            goal,
            registry: Registry::new(grid.bounds()),
            frontier: Frontier::new(),
            phase: SearchPhase::Ready,
            stats: SearchStats::default(),
            nbuf: Vec::with_capacity(4),
        })
    }

    #[inline]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Per-position search state gathered so far.
    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            discovered: self.registry.discovered(),
            ..self.stats
        }
    }

    /// Cost of the path found, once the search has succeeded.
    pub fn goal_cost(&self) -> Option<i32> {
        if self.phase != SearchPhase::Succeeded {
            return None;
        }
        self.registry.get(self.goal).map(|s| s.g)
    }

    /// Advance the search by one step and return the resulting phase.
    ///
    /// From `Ready` this seeds the frontier with the start. From `Running`
    /// it pops one live entry and either closes the goal or expands it.
    /// Terminal phases are returned unchanged.
    pub fn step(&mut self) -> Result<SearchPhase> {
        match self.phase {
            SearchPhase::Ready => self.seed()?,
            SearchPhase::Running => self.advance()?,
            SearchPhase::Succeeded | SearchPhase::Exhausted => {}
        }
        Ok(self.phase)
    }

    /// Step until the search finishes.
    ///
    /// Returns the path from start to goal, both included, or an empty
    /// path when the goal cannot be reached.
    pub fn run(&mut self) -> Result<Vec<Point>> {
        loop {
            match self.step()? {
                SearchPhase::Succeeded => return reconstruct(&self.registry, self.goal),
                SearchPhase::Exhausted => return Ok(Vec::new()),
                SearchPhase::Ready | SearchPhase::Running => {}
            }
        }
    }

    fn seed(&mut self) -> Result<()> {
        let (start, goal, pather) = (self.start, self.goal, self.pather);
        self.registry.get_or_create(start, || pather.estimate(start, goal))?;
        self.registry.relax(start, 0, None)?;
        let f = self.f_of(start)?;
        self.frontier.push(start, f);
        self.phase = SearchPhase::Running;
        log::debug!("astar: searching {start} -> {goal} (estimate {f})");
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        let Some(entry) = self.pop_live() else {
            self.phase = SearchPhase::Exhausted;
            log::debug!(
                "astar: no path {} -> {} after {} expansions",
                self.start,
                self.goal,
                self.stats.expanded
            );
            return Ok(());
        };

        if entry.pos == self.goal {
            self.registry.mark_closed(entry.pos)?;
            self.phase = SearchPhase::Succeeded;
            log::debug!(
                "astar: reached {} at cost {} after {} expansions",
                self.goal,
                entry.f,
                self.stats.expanded
            );
            return Ok(());
        }

        self.expand(entry.pos)
    }

    /// Pop frontier entries until one is still Open at the key it was
    /// pushed with. Anything else was superseded by a cheaper route.
    fn pop_live(&mut self) -> Option<FrontierEntry> {
        while let Some(entry) = self.frontier.pop_min() {
            match self.registry.get(entry.pos) {
                Some(s) if s.status == Status::Open && s.f() == entry.f => return Some(entry),
                _ => self.stats.stale_pops += 1,
            }
        }
        None
    }

    fn expand(&mut self, current: Point) -> Result<()> {
        let current_g = match self.registry.get(current) {
            Some(s) => s.g,
            None => return Err(invariant(format!("expanding undiscovered {current}"))),
        };
        let (goal, pather) = (self.goal, self.pather);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            if !self.grid.is_passable(np) {
                continue;
            }
            self.registry.get_or_create(np, || pather.estimate(np, goal))?;
            let candidate_g = current_g + pather.cost(current, np);
            if self.registry.relax(np, candidate_g, Some(current))? == RelaxResult::Improved {
                let f = self.f_of(np)?;
                log::trace!("astar: {current} -> {np} g={candidate_g} f={f}");
                self.frontier.push(np, f);
            }
        }

        self.nbuf = nbuf;
        self.registry.mark_closed(current)?;
        self.stats.expanded += 1;
        Ok(())
    }

    fn f_of(&self, p: Point) -> Result<i32> {
        self.registry
            .get(p)
            .map(|s| s.f())
            .ok_or_else(|| invariant(format!("no search state for {p}")))
    }
}

fn validate_endpoint(grid: &ObstacleGrid, endpoint: Endpoint, pos: Point) -> Result<()> {
    let fault = match grid.blocked(pos) {
        Ok(false) => return Ok(()),
        Ok(true) => EndpointFault::Blocked,
        Err(_) => EndpointFault::OutOfBounds,
    };
    log::debug!("astar: rejecting {endpoint} {pos}: {fault}");
    Err(PathError::InvalidEndpoint {
        endpoint,
        pos,
        fault,
    })
}

/// Find a shortest 4-connected path from `start` to `goal`.
///
/// The path includes both endpoints. An empty path means the goal cannot
/// be reached; invalid endpoints are an error.
pub fn find_path(grid: &ObstacleGrid, start: Point, goal: Point) -> Result<Vec<Point>> {
    AstarSearch::new(grid, start, goal)?.run()
}

/// Like [`find_path`], with moves, costs and heuristic taken from `pather`.
pub fn find_path_with<P: AstarPather>(
    grid: &ObstacleGrid,
    pather: &P,
    start: Point,
    goal: Point,
) -> Result<Vec<Point>> {
    AstarSearch::with_pather(grid, pather, start, goal)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::traits::{Pather, WeightedPather};

    fn open(w: i32, h: i32) -> ObstacleGrid {
        ObstacleGrid::new(w, h)
    }

    fn assert_valid_path(grid: &ObstacleGrid, path: &[Point]) {
        for p in path {
            assert!(grid.is_passable(*p), "{p} is not passable");
        }
        for w in path.windows(2) {
            assert!(w[0].is_adjacent_4(w[1]), "{} -> {} is not a unit step", w[0], w[1]);
        }
    }

    #[test]
    fn open_5x5_corner_to_corner() {
        let grid = open(5, 5);
        let start = Point::new(0, 0);
        let goal = Point::new(4, 4);
        let mut search = AstarSearch::new(&grid, start, goal).unwrap();
        let path = search.run().unwrap();

        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_valid_path(&grid, &path);
        assert_eq!(search.goal_cost(), Some(8));
        for (i, p) in path.iter().enumerate() {
            assert_eq!(search.registry().get(*p).unwrap().g, i as i32);
        }
    }

    #[test]
    fn open_grid_cost_is_manhattan() {
        let grid = open(7, 4);
        for (start, goal) in [
            (Point::new(6, 3), Point::new(0, 0)),
            (Point::new(2, 1), Point::new(5, 3)),
            (Point::new(0, 3), Point::new(6, 3)),
        ] {
            let mut search = AstarSearch::new(&grid, start, goal).unwrap();
            let path = search.run().unwrap();
            assert_eq!(path.len() as i32 - 1, manhattan(start, goal));
            assert_eq!(search.goal_cost(), Some(manhattan(start, goal)));
            assert_valid_path(&grid, &path);
        }
    }

    #[test]
    fn equal_cost_routes_follow_neighbor_order() {
        // Every monotone route costs 4 here; up/down/left/right expansion
        // with FIFO ties settles on exactly one of them.
        let grid = open(3, 3);
        let pts = |v: &[(i32, i32)]| v.iter().map(|&(x, y)| Point::new(x, y)).collect::<Vec<_>>();

        let down_then_right = find_path(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(down_then_right, pts(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]));

        let up_then_left = find_path(&grid, Point::new(2, 2), Point::new(0, 0)).unwrap();
        assert_eq!(up_then_left, pts(&[(2, 2), (2, 1), (2, 0), (1, 0), (0, 0)]));
    }

    #[test]
    fn start_equals_goal() {
        let grid = open(3, 3);
        let p = Point::new(1, 1);
        let mut search = AstarSearch::new(&grid, p, p).unwrap();
        assert_eq!(search.run().unwrap(), vec![p]);
        assert_eq!(search.goal_cost(), Some(0));
        assert_eq!(search.stats().expanded, 0);
    }

    #[test]
    fn routes_through_the_only_gap() {
        let grid = ObstacleGrid::parse(
            "
            S....
            .....
            ###.#
            .....
            G....
            ",
        )
        .unwrap();
        let path = find_path(&grid, Point::new(0, 0), Point::new(0, 4)).unwrap();
        assert!(path.contains(&Point::new(3, 2)));
        assert_eq!(path.len(), 11);
        assert_valid_path(&grid, &path);
    }

    #[test]
    fn walled_goal_has_no_path() {
        let grid = ObstacleGrid::parse(
            "
            S....
            ..#..
            .#G#.
            ..#..
            .....
            ",
        )
        .unwrap();
        let mut search = AstarSearch::new(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(search.run().unwrap(), Vec::<Point>::new());
        assert_eq!(search.phase(), SearchPhase::Exhausted);
        assert_eq!(search.goal_cost(), None);
        // Every reachable open cell is expanded exactly once.
        assert_eq!(search.stats().expanded, 25 - 4 - 1);
    }

    #[test]
    fn invalid_endpoints_are_rejected() {
        let grid = ObstacleGrid::parse(
            "
            .#
            ..
            ",
        )
        .unwrap();
        let err = find_path(&grid, Point::new(-1, 0), Point::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidEndpoint {
                endpoint: Endpoint::Start,
                pos: Point::new(-1, 0),
                fault: EndpointFault::OutOfBounds,
            }
        );
        let err = find_path(&grid, Point::new(0, 0), Point::new(1, 0)).unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidEndpoint {
                endpoint: Endpoint::Goal,
                pos: Point::new(1, 0),
                fault: EndpointFault::Blocked,
            }
        );
        assert_eq!(err.to_string(), "invalid goal (1, 0): on an obstacle");
    }

    #[test]
    fn phases_advance_in_order() {
        let grid = open(3, 1);
        let mut search = AstarSearch::new(&grid, Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert_eq!(search.phase(), SearchPhase::Ready);
        assert_eq!(search.step().unwrap(), SearchPhase::Running);
        assert_eq!(search.step().unwrap(), SearchPhase::Running);
        assert_eq!(search.step().unwrap(), SearchPhase::Running);
        assert_eq!(search.step().unwrap(), SearchPhase::Succeeded);
        assert!(search.phase().is_terminal());
        // Terminal phases are sticky.
        assert_eq!(search.step().unwrap(), SearchPhase::Succeeded);
        assert_eq!(search.stats().expanded, 2);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let grid = ObstacleGrid::parse(
            "
            S.......
            .##.###.
            ........
            .#####..
            .......G
            ",
        )
        .unwrap();
        let start = Point::new(0, 0);
        let goal = Point::new(7, 4);
        let first = find_path(&grid, start, goal).unwrap();
        for _ in 0..5 {
            assert_eq!(find_path(&grid, start, goal).unwrap(), first);
        }
    }

    /// Unit moves, except that stepping from `(0, 0)` to `(1, 0)` costs 10.
    struct Toll;

    impl Pather for Toll {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            FourConnected.neighbors(p, buf);
        }
    }

    impl WeightedPather for Toll {
        fn cost(&self, from: Point, to: Point) -> i32 {
            if from == Point::new(0, 0) && to == Point::new(1, 0) {
                10
            } else {
                1
            }
        }
    }

    impl AstarPather for Toll {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            manhattan(from, to)
        }
    }

    #[test]
    fn cheaper_route_supersedes_queued_entry() {
        let grid = ObstacleGrid::parse(
            "
            ...
            ...
            ",
        )
        .unwrap();
        let mut search =
            AstarSearch::with_pather(&grid, &Toll, Point::new(0, 0), Point::new(2, 0)).unwrap();
        let path = search.run().unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(1, 0),
                Point::new(2, 0),
            ]
        );
        assert_eq!(search.goal_cost(), Some(4));
    }

    #[test]
    fn stale_entries_are_dropped_not_expanded() {
        let grid = ObstacleGrid::parse(
            "
            ..#G
            ..#.
            ",
        )
        .unwrap();
        let mut search =
            AstarSearch::with_pather(&grid, &Toll, Point::new(0, 0), Point::new(3, 0)).unwrap();
        assert!(search.run().unwrap().is_empty());
        let stats = search.stats();
        assert_eq!(stats.expanded, 4);
        assert_eq!(stats.discovered, 4);
        assert_eq!(stats.stale_pops, 1);
        assert_eq!(search.registry().get(Point::new(1, 0)).unwrap().g, 3);
    }

    #[test]
    fn grid_can_act_as_its_own_pather() {
        let grid = ObstacleGrid::parse(
            "
            ....
            .##.
            ....
            ",
        )
        .unwrap();
        let start = Point::new(0, 1);
        let goal = Point::new(3, 1);
        let via_grid = find_path_with(&grid, &grid, start, goal).unwrap();
        let via_default = find_path(&grid, start, goal).unwrap();
        assert_eq!(via_grid, via_default);
        assert_eq!(via_grid.len(), 6);
    }
}
