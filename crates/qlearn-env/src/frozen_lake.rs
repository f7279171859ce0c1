//! Frozen lake
//!
//! Cross a frozen lake from the start tile `S` to the goal `G` without falling
//! into a hole `H`; `F` tiles are safe. States are tile indices in row-major
//! order and actions are `0` left, `1` down, `2` right, `3` up. Reaching the
//! goal pays 1, everything else pays 0, and both holes and the goal end the
//! episode. On a slippery lake the intended move happens a third of the time
//! and each perpendicular move a third of the time.

use std::path::Path;

use qlearn_core::{Environment, RLError, Result, Step};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Number of actions
pub const N_ACTIONS: usize = 4;

/// The classic 4x4 map
pub const MAP_4X4: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

/// Configuration for [`FrozenLake`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrozenLakeConfig {
    /// Map rows, all the same width, with exactly one `S` and at least one `G`
    pub map: Vec<String>,
    /// Whether moves may slip sideways
    pub is_slippery: bool,
    /// Seed for the slip generator
    pub seed: Option<u64>,
}

impl Default for FrozenLakeConfig {
    fn default() -> Self {
        Self {
            map: MAP_4X4.iter().map(ToString::to_string).collect(),
            is_slippery: true,
            seed: None,
        }
    }
}

impl FrozenLakeConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Start,
    Frozen,
    Hole,
    Goal,
}

/// Frozen lake environment
#[derive(Debug, Clone)]
pub struct FrozenLake {
    tiles: Vec<Tile>,
    n_rows: usize,
    n_cols: usize,
    start: usize,
    is_slippery: bool,
    position: usize,
    rng: StdRng,
}

impl FrozenLake {
    /// Create a new frozen lake
    pub fn new(config: FrozenLakeConfig) -> Result<Self> {
        let n_rows = config.map.len();
        let n_cols = config.map.first().map_or(0, |row| row.chars().count());
        if n_rows == 0 || n_cols == 0 {
            return Err(RLError::Configuration("frozen lake map is empty".to_string()));
        }

        let mut tiles = Vec::with_capacity(n_rows * n_cols);
        for row in &config.map {
            if row.chars().count() != n_cols {
                return Err(RLError::Configuration(format!(
                    "map row {row:?} is not {n_cols} tiles wide"
                )));
            }
            for symbol in row.chars() {
                tiles.push(match symbol {
                    'S' => Tile::Start,
                    'F' => Tile::Frozen,
                    'H' => Tile::Hole,
                    'G' => Tile::Goal,
                    other => {
                        return Err(RLError::Configuration(format!(
                            "unknown map tile {other:?}"
                        )))
                    }
                });
            }
        }

        let starts: Vec<usize> = tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Start)
            .map(|(index, _)| index)
            .collect();
        let start = match starts.as_slice() {
            [start] => *start,
            _ => {
                return Err(RLError::Configuration(
                    "map needs exactly one start tile".to_string(),
                ))
            }
        };
        if !tiles.contains(&Tile::Goal) {
            return Err(RLError::Configuration("map has no goal tile".to_string()));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            tiles,
            n_rows,
            n_cols,
            start,
            is_slippery: config.is_slippery,
            position: start,
            rng,
        })
    }

    /// State domain: every tile index
    #[must_use]
    pub fn states(&self) -> Vec<usize> {
        (0..self.tiles.len()).collect()
    }

    /// Action domain
    #[must_use]
    pub fn actions() -> Vec<usize> {
        (0..N_ACTIONS).collect()
    }

    /// Tile index the agent is on
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    fn slide(&self, from: usize, action: usize) -> usize {
        let (mut row, mut col) = (from / self.n_cols, from % self.n_cols);
        match action {
            0 => col = col.saturating_sub(1),
            1 => row = (row + 1).min(self.n_rows - 1),
            2 => col = (col + 1).min(self.n_cols - 1),
            _ => row = row.saturating_sub(1),
        }
        row * self.n_cols + col
    }
}

impl Environment for FrozenLake {
    type State = usize;
    type Action = usize;

    fn reset(&mut self) -> Result<usize> {
        self.position = self.start;
        tracing::debug!(start = self.start, "frozen lake reset");
        Ok(self.position)
    }

    fn step(&mut self, action: usize) -> Result<Step<usize>> {
        if action >= N_ACTIONS {
            return Err(RLError::InvalidAction(format!(
                "frozen lake has no action {action}"
            )));
        }

        let actual = if self.is_slippery {
            // Intended move or one of its two perpendiculars
            (action + N_ACTIONS - 1 + self.rng.gen_range(0..3)) % N_ACTIONS
        } else {
            action
        };

        self.position = self.slide(self.position, actual);
        match self.tiles[self.position] {
            Tile::Goal => Ok(Step::terminal(self.position, 1.0)),
            Tile::Hole => Ok(Step::terminal(self.position, 0.0)),
            Tile::Start | Tile::Frozen => Ok(Step::transition(self.position, 0.0)),
        }
    }
}
