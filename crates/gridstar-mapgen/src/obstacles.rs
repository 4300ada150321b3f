//! Random placement of square obstacles.

use gridstar_core::{ObstacleGrid, Point, Range};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ObstacleConfig;

/// Errors raised while generating obstacles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapGenError {
    /// The obstacle side is not positive, or leaves no room for a corner.
    #[error("obstacle size {size} does not fit a {width}x{height} grid")]
    ObstacleTooLarge { size: i32, width: i32, height: i32 },
}

/// Obstacle generator drawing from a caller-supplied random source.
pub struct ObstacleGen<R: Rng> {
    pub rng: R,
}

impl ObstacleGen<StdRng> {
    /// A generator whose output is fully determined by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ObstacleGen<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Block `count` squares of side `size` at random positions.
    ///
    /// The top-left corner of each square is drawn from
    /// `[0, width - size) × [0, height - size)`. A square covering any
    /// position of `keep_clear` is redrawn, up to `max_attempts` times,
    /// after which that obstacle is skipped. Squares may overlap each other.
    ///
    /// Returns the number of obstacles placed.
    pub fn place_squares(
        &mut self,
        grid: &mut ObstacleGrid,
        count: usize,
        size: i32,
        keep_clear: &[Point],
        max_attempts: usize,
    ) -> Result<usize, MapGenError> {
        let (width, height) = (grid.width(), grid.height());
        if size <= 0 || size >= width || size >= height {
            return Err(MapGenError::ObstacleTooLarge {
                size,
                width,
                height,
            });
        }

        let mut placed = 0;
        for i in 0..count {
            let mut square = None;
            for _ in 0..max_attempts {
                let corner = Point::new(
                    self.rng.random_range(0..width - size),
                    self.rng.random_range(0..height - size),
                );
                let candidate = Range::square(corner, size);
                if !keep_clear.iter().any(|&p| candidate.contains(p)) {
                    square = Some(candidate);
                    break;
                }
            }
            match square {
                Some(rng) => {
                    grid.fill(rng);
                    placed += 1;
                }
                None => log::warn!(
                    "mapgen: skipping obstacle {i}: no clear spot after {max_attempts} attempts"
                ),
            }
        }
        Ok(placed)
    }
}

/// Build a fresh grid as described by `config`, keeping `keep_clear` open.
pub fn generate(config: &ObstacleConfig, keep_clear: &[Point]) -> Result<ObstacleGrid, MapGenError> {
    let seed = config.seed.unwrap_or_else(|| {
        let seed = rand::rng().random();
        log::info!("mapgen: using random seed {seed}");
        seed
    });
    let mut grid = ObstacleGrid::new(config.width, config.height);
    let placed = ObstacleGen::from_seed(seed).place_squares(
        &mut grid,
        config.count,
        config.size,
        keep_clear,
        config.max_attempts,
    )?;
    log::debug!(
        "mapgen: placed {placed}/{} obstacles, {} cells blocked",
        config.count,
        grid.blocked_count()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> ObstacleConfig {
        ObstacleConfig {
            width: 20,
            height: 15,
            count: 6,
            size: 3,
            seed: Some(42),
            max_attempts: 100,
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let keep = [Point::new(0, 0), Point::new(19, 14)];
        let a = generate(&small(), &keep).unwrap();
        let b = generate(&small(), &keep).unwrap();
        assert_eq!(a, b);
        assert!(a.blocked_count() > 0);
    }

    #[test]
    fn keep_clear_positions_stay_open() {
        let keep = [Point::new(0, 0), Point::new(5, 5), Point::new(10, 7)];
        for seed in 0..20 {
            let cfg = ObstacleConfig {
                count: 30,
                ..small().with_seed(seed)
            };
            let grid = generate(&cfg, &keep).unwrap();
            for p in keep {
                assert!(grid.is_passable(p), "seed {seed} blocked {p}");
            }
        }
    }

    #[test]
    fn squares_stay_inside_corner_range() {
        let mut grid = ObstacleGrid::new(10, 10);
        let placed = ObstacleGen::from_seed(3)
            .place_squares(&mut grid, 40, 4, &[], 10)
            .unwrap();
        assert_eq!(placed, 40);
        // Corners are drawn below width - size, so the last row and
        // column can never be covered.
        for i in 0..10 {
            assert!(grid.is_passable(Point::new(9, i)));
            assert!(grid.is_passable(Point::new(i, 9)));
        }
    }

    #[test]
    fn impossible_placement_is_skipped() {
        // A 2x2 square in a 3x3 grid always covers the centre.
        let mut grid = ObstacleGrid::new(3, 3);
        let placed = ObstacleGen::from_seed(1)
            .place_squares(&mut grid, 2, 2, &[Point::new(1, 1)], 25)
            .unwrap();
        assert_eq!(placed, 0);
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn oversized_obstacles_are_rejected() {
        let err = generate(
            &ObstacleConfig {
                size: 15,
                ..small()
            },
            &[],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MapGenError::ObstacleTooLarge {
                size: 15,
                width: 20,
                height: 15,
            }
        );
        let mut grid = ObstacleGrid::new(5, 5);
        assert!(ObstacleGen::from_seed(0).place_squares(&mut grid, 1, 0, &[], 1).is_err());
    }
}
