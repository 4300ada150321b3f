//! Demo driver shared by the `gridstar-demo` binary: config loading, one
//! generate-and-search run, and plain-text path output.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gridstar_core::{ObstacleGrid, Point};
use gridstar_mapgen::{MapGenError, ObstacleConfig, generate};
use gridstar_paths::{AstarSearch, PathError, SearchStats};
use serde::{Deserialize, Serialize};

/// Demo errors.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("obstacle generation failed: {0}")]
    MapGen(#[from] MapGenError),

    #[error("search failed: {0}")]
    Search(#[from] PathError),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, DemoError>;

/// Command-line options of the demo binary.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config_path: Option<PathBuf>,
    pub help: bool,
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut result = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let Some(path) = args.next() else {
                    return Err(DemoError::Usage(format!("{arg} requires a file argument")));
                };
                result.config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => result.help = true,
            _ => return Err(DemoError::Usage(format!("Unknown argument: {arg}"))),
        }
    }
    Ok(result)
}

/// Everything one demo run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Obstacle generation settings.
    pub grid: ObstacleConfig,
    pub start: Point,
    pub goal: Point,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid: ObstacleConfig::default(),
            start: Point::new(0, 0),
            goal: Point::new(99, 99),
        }
    }
}

impl DemoConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Load the config at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let contents = fs::read_to_string(path).map_err(|source| DemoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = DemoConfig::from_toml(&contents)?;
    log::info!("Loaded config from {}", path.display());
    Ok(cfg)
}

/// Result of one demo run.
#[derive(Debug)]
pub struct DemoReport {
    pub grid: ObstacleGrid,
    /// Start to goal inclusive; empty when no path exists.
    pub path: Vec<Point>,
    pub cost: Option<i32>,
    pub stats: SearchStats,
}

/// Generate a grid that keeps both endpoints open, then search it.
pub fn run(cfg: &DemoConfig) -> Result<DemoReport> {
    let grid = generate(&cfg.grid, &[cfg.start, cfg.goal])?;
    let mut search = AstarSearch::new(&grid, cfg.start, cfg.goal)?;
    let path = search.run()?;
    let cost = search.goal_cost();
    let stats = search.stats();
    match cost {
        Some(cost) => log::info!("path {} -> {} costs {cost}", cfg.start, cfg.goal),
        None => log::info!("no path {} -> {}", cfg.start, cfg.goal),
    }
    Ok(DemoReport {
        grid,
        path,
        cost,
        stats,
    })
}

/// Write `path` as one `x y` line per position, after a summary line.
pub fn write_path(out: &mut impl Write, path: &[Point]) -> io::Result<()> {
    match path.len() {
        0 => writeln!(out, "no path")?,
        n => writeln!(out, "path: {} positions, {} steps", n, n - 1)?,
    }
    for p in path {
        writeln!(out, "{} {}", p.x, p.y)?;
    }
    Ok(())
}
