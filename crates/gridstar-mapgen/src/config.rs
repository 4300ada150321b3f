//! Obstacle generation settings.

/// Settings for [`generate`](crate::generate).
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ObstacleConfig {
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// Number of square obstacles to place.
    pub count: usize,
    /// Side length of each obstacle.
    pub size: i32,
    /// Seed for the generator. `None` draws a fresh seed and logs it.
    pub seed: Option<u64>,
    /// Placement attempts per obstacle before it is skipped.
    pub max_attempts: usize,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            count: 50,
            size: 8,
            seed: None,
            max_attempts: 1000,
        }
    }
}

impl ObstacleConfig {
    /// Same settings with a fixed seed.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}
