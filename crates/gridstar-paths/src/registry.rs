use gridstar_core::{Point, Range};

use crate::error::{Result, invariant};

/// Sentinel cost meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// Lifecycle of a position within one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Discovered, but never relaxed.
    #[default]
    Unvisited,
    /// Waiting in the frontier.
    Open,
    /// Expanded; its cost is final.
    Closed,
}

/// Per-position bookkeeping for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    /// Cost from the start, or [`UNREACHABLE`].
    pub g: i32,
    /// Heuristic estimate to the goal, fixed at creation.
    pub h: i32,
    /// Position this state was last relaxed from.
    pub predecessor: Option<Point>,
    pub status: Status,
}

impl SearchState {
    fn new(h: i32) -> Self {
        Self {
            g: UNREACHABLE,
            h,
            predecessor: None,
            status: Status::Unvisited,
        }
    }

    /// Estimated total cost `g + h`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }
}

/// Outcome of [`Registry::relax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxResult {
    Improved,
    NotImproved,
}

/// Dense store of [`SearchState`]s for every position of a range.
///
/// A position has at most one state. States are created lazily on first
/// touch and mutated in place afterwards.
#[derive(Debug, Clone)]
pub struct Registry {
    bounds: Range,
    width: usize,
    states: Vec<Option<SearchState>>,
    discovered: usize,
}

impl Registry {
    /// Create an empty registry covering `bounds`.
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            width: bounds.width().max(0) as usize,
            states: vec![None; bounds.len()],
            discovered: 0,
        }
    }

    /// The range of positions this registry can hold.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of distinct positions touched so far.
    #[inline]
    pub fn discovered(&self) -> usize {
        self.discovered
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width + x)
    }

    fn index_of(&self, p: Point) -> Result<usize> {
        self.idx(p).ok_or_else(|| {
            invariant(format!(
                "position {p} outside registry bounds {}",
                self.bounds
            ))
        })
    }

    /// The state of `p`, if it has been touched.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&SearchState> {
        self.idx(p).and_then(|i| self.states[i].as_ref())
    }

    /// The status of `p`; untouched positions are [`Status::Unvisited`].
    #[inline]
    pub fn status(&self, p: Point) -> Status {
        self.get(p).map_or(Status::Unvisited, |s| s.status)
    }

    /// Return the state of `p`, creating it on first touch with `g = ∞` and
    /// the heuristic produced by `h`. The heuristic is never recomputed.
    pub fn get_or_create(&mut self, p: Point, h: impl FnOnce() -> i32) -> Result<&mut SearchState> {
        let i = self.index_of(p)?;
        let slot = &mut self.states[i];
        if slot.is_none() {
            self.discovered += 1;
        }
        Ok(slot.get_or_insert_with(|| SearchState::new(h())))
    }

    /// Record a route to `p` costing `candidate_g` through `predecessor`.
    ///
    /// Only a strictly cheaper route updates the state, and it leaves the
    /// state Open. Closed states are final and never reopened.
    pub fn relax(
        &mut self,
        p: Point,
        candidate_g: i32,
        predecessor: Option<Point>,
    ) -> Result<RelaxResult> {
        let i = self.index_of(p)?;
        let Some(state) = self.states[i].as_mut() else {
            return Err(invariant(format!("relax on {p} before it was created")));
        };
        if state.status == Status::Closed || candidate_g >= state.g {
            return Ok(RelaxResult::NotImproved);
        }
        state.g = candidate_g;
        state.predecessor = predecessor;
        state.status = Status::Open;
        Ok(RelaxResult::Improved)
    }

    /// Move `p` from Open to Closed.
    pub fn mark_closed(&mut self, p: Point) -> Result<()> {
        let i = self.index_of(p)?;
        match self.states[i].as_mut() {
            Some(state) if state.status == Status::Open => {
                state.status = Status::Closed;
                Ok(())
            }
            Some(state) => Err(invariant(format!(
                "cannot close {p}: status is {:?}, expected Open",
                state.status
            ))),
            None => Err(invariant(format!("cannot close {p}: never discovered"))),
        }
    }
}
