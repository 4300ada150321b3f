//! The [`ObstacleGrid`] type: a 2D field of open and blocked cells.
//!
//! Searches only ever borrow a grid immutably. Mutation methods exist for
//! grid producers, which build the grid before handing it to a search.

use std::fmt;

use crate::geom::{Point, Range};

/// Character used for blocked cells in the ASCII form.
pub const BLOCKED_RUNE: char = '#';
/// Character used for open cells in the ASCII form.
pub const OPEN_RUNE: char = '.';

/// Errors raised by grid queries and grid parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A query addressed a position outside the grid.
    #[error("position {pos} is outside grid bounds {bounds}")]
    OutOfRange { pos: Point, bounds: Range },
    /// Lines of an ASCII grid have different widths.
    #[error("grid: inconsistent line width at row {row}: expected {expected}, got {got}")]
    InconsistentSize { row: i32, expected: i32, got: i32 },
    /// An ASCII grid contains a character with no cell meaning.
    #[error("grid contains invalid rune \u{201c}{ch}\u{201d} at {pos}")]
    InvalidRune { ch: char, pos: Point },
}

/// A rectangular grid of traversable and blocked cells, with origin (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleGrid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl ObstacleGrid {
    /// Create a grid with every cell open. Negative sizes are clamped to 0.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            blocked: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Parse an ASCII grid: `#` is blocked, `.` is open. `S` and `G` are
    /// accepted as open cells so fixtures can mark the endpoints.
    ///
    /// Leading and trailing whitespace of the whole string is trimmed, and
    /// each line is trimmed too, so indented fixtures work.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let width = lines.first().map_or(0, |l| l.chars().count() as i32);
        let mut grid = Self::new(width, lines.len() as i32);

        for (y, line) in lines.iter().enumerate() {
            let y = y as i32;
            let got = line.chars().count() as i32;
            if got != width {
                return Err(GridError::InconsistentSize {
                    row: y,
                    expected: width,
                    got,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y);
                match ch {
                    BLOCKED_RUNE => grid.set_blocked(pos, true)?,
                    OPEN_RUNE | 'S' | 'G' => {}
                    _ => return Err(GridError::InvalidRune { ch, pos }),
                }
            }
        }
        Ok(grid)
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Result<usize, GridError> {
        if !self.in_bounds(p) {
            return Err(GridError::OutOfRange {
                pos: p,
                bounds: self.bounds(),
            });
        }
        Ok((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// Whether the cell at `p` is an obstacle.
    ///
    /// Fails with [`GridError::OutOfRange`] when `p` is outside the grid;
    /// callers bounds-check first or use [`is_passable`](Self::is_passable).
    #[inline]
    pub fn blocked(&self, p: Point) -> Result<bool, GridError> {
        self.index(p).map(|i| self.blocked[i])
    }

    /// In bounds and not blocked.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        matches!(self.blocked(p), Ok(false))
    }

    /// Mark a single cell as blocked or open.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> Result<(), GridError> {
        let i = self.index(p)?;
        self.blocked[i] = blocked;
        Ok(())
    }

    /// Block every cell of `rng` that lies inside the grid.
    ///
    /// Returns the number of cells that changed from open to blocked.
    pub fn fill(&mut self, rng: Range) -> usize {
        let mut changed = 0;
        for p in rng.intersect(self.bounds()).iter() {
            let i = (p.y as usize) * (self.width as usize) + (p.x as usize);
            if !self.blocked[i] {
                self.blocked[i] = true;
                changed += 1;
            }
        }
        changed
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Row-major iterator over `(Point, blocked)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.bounds().iter().zip(self.blocked.iter().copied())
    }
}

impl fmt::Display for ObstacleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, blocked) in self.iter() {
            if p.x == 0 && p.y > 0 {
                writeln!(f)?;
            }
            let ch = if blocked { BLOCKED_RUNE } else { OPEN_RUNE };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
