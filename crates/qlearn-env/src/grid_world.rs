//! Deterministic grid world
//!
//! The agent moves between open cells of a grid with the four compass moves.
//! Every step costs -1. Moving onto the goal ends the episode; moving onto a
//! cell that is neither open nor the goal leaves the agent where it is.

use std::collections::BTreeSet;
use std::fmt;

use qlearn_core::{Environment, RLError, Result, Step};
use serde::{Deserialize, Serialize};

/// Reward charged for every step, including blocked ones
pub const STEP_REWARD: f64 = -1.0;

/// A grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row, growing downwards
    pub row: i32,
    /// Column, growing to the right
    pub col: i32,
}

impl Cell {
    /// Create a cell
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in a direction
    #[must_use]
    pub fn moved(self, direction: Move) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad as a whole so table columns line up
        f.pad(&format!("({}, {})", self.row, self.col))
    }
}

/// One of the four compass moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Row - 1
    Up,
    /// Column + 1
    Right,
    /// Row + 1
    Down,
    /// Column - 1
    Left,
}

impl Move {
    /// All moves, clockwise from up
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
        }
    }

    /// Arrow glyph for the move
    #[must_use]
    pub fn arrow(self) -> char {
        match self {
            Move::Up => '↑',
            Move::Right => '→',
            Move::Down => '↓',
            Move::Left => '←',
        }
    }
}

impl TryFrom<char> for Move {
    type Error = RLError;

    fn try_from(arrow: char) -> Result<Self> {
        Move::ALL
            .into_iter()
            .find(|m| m.arrow() == arrow)
            .ok_or_else(|| RLError::InvalidAction(format!("{arrow:?} is not a grid move")))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arrow())
    }
}

/// Grid world environment
///
/// Actions are arrow glyphs (`'↑'`, `'→'`, `'↓'`, `'←'`); any other character
/// is rejected with [`RLError::InvalidAction`].
#[derive(Debug, Clone)]
pub struct GridWorld {
    open: BTreeSet<Cell>,
    start: Cell,
    goal: Cell,
    current: Cell,
}

impl GridWorld {
    /// Create a grid world from its open cells, start and goal
    ///
    /// The start and goal do not need to be listed among the open cells. A
    /// start cell that is not open cannot be re-entered once left.
    pub fn new(open: impl IntoIterator<Item = Cell>, start: Cell, goal: Cell) -> Result<Self> {
        let open: BTreeSet<Cell> = open.into_iter().collect();
        if start == goal {
            return Err(RLError::Configuration(format!(
                "start and goal coincide at {start}"
            )));
        }
        Ok(Self {
            open,
            start,
            goal,
            current: start,
        })
    }

    /// The corridor layout
    ///
    /// ```text
    ///     0 1 2 3 4 5 6
    ///   0 # . # . . . #
    ///   1 # . # . # # #
    ///   2 S . . . . . G
    ///   3 # . # # # # #
    ///   4 # . # # # # #
    /// ```
    ///
    /// The shortest path from `S` to `G` takes six steps.
    #[must_use]
    pub fn corridor() -> Self {
        let open = [
            (0, 1),
            (0, 3),
            (0, 4),
            (0, 5),
            (1, 1),
            (1, 3),
            (2, 1),
            (2, 2),
            (2, 3),
            (2, 4),
            (2, 5),
            (3, 1),
            (4, 1),
        ]
        .into_iter()
        .map(|(row, col)| Cell::new(row, col));

        Self {
            open: open.collect(),
            start: Cell::new(2, 0),
            goal: Cell::new(2, 6),
            current: Cell::new(2, 0),
        }
    }

    /// Action domain, clockwise from up
    #[must_use]
    pub fn actions() -> Vec<char> {
        Move::ALL.iter().map(|m| m.arrow()).collect()
    }

    /// Every cell the agent can occupy: open cells, start and goal
    #[must_use]
    pub fn states(&self) -> Vec<Cell> {
        let mut cells = self.open.clone();
        cells.insert(self.start);
        cells.insert(self.goal);
        cells.into_iter().collect()
    }

    /// Starting cell
    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Goal cell
    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Cell the agent currently occupies
    #[must_use]
    pub fn position(&self) -> Cell {
        self.current
    }

    /// Length of the shortest start-to-goal path, if the goal is reachable
    #[must_use]
    pub fn shortest_path_len(&self) -> Option<usize> {
        let mut frontier = vec![self.start];
        let mut seen = BTreeSet::from([self.start]);
        let mut depth = 0;

        while !frontier.is_empty() {
            depth += 1;
            let mut next = Vec::new();
            for cell in frontier {
                for direction in Move::ALL {
                    let target = cell.moved(direction);
                    if target == self.goal {
                        return Some(depth);
                    }
                    if self.open.contains(&target) && seen.insert(target) {
                        next.push(target);
                    }
                }
            }
            frontier = next;
        }
        None
    }
}

impl Environment for GridWorld {
    type State = Cell;
    type Action = char;

    fn reset(&mut self) -> Result<Cell> {
        self.current = self.start;
        tracing::debug!(start = %self.start, "grid world reset");
        Ok(self.current)
    }

    fn step(&mut self, action: char) -> Result<Step<Cell>> {
        let direction = Move::try_from(action)?;
        let target = self.current.moved(direction);

        if target == self.goal {
            self.current = target;
            Ok(Step::terminal(target, STEP_REWARD))
        } else {
            if self.open.contains(&target) {
                self.current = target;
            }
            Ok(Step::transition(self.current, STEP_REWARD))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corridor_walk_reaches_the_goal_in_six_steps() {
        let mut env = GridWorld::corridor();
        assert_eq!(env.reset().unwrap(), Cell::new(2, 0));

        for col in 1..6 {
            let step = env.step('→').unwrap();
            assert_eq!(step.state, Cell::new(2, col));
            assert_eq!(step.reward.value(), -1.0);
            assert!(!step.done);
        }
        let last = env.step('→').unwrap();
        assert_eq!(last.state, Cell::new(2, 6));
        assert!(last.done);
    }

    #[test]
    fn blocked_moves_stay_put_and_still_cost() {
        let mut env = GridWorld::corridor();
        env.reset().unwrap();

        let step = env.step('↑').unwrap();
        assert_eq!(step.state, Cell::new(2, 0));
        assert_eq!(step.reward.value(), STEP_REWARD);

        env.step('→').unwrap();
        // The start cell is not open, so it cannot be re-entered
        let step = env.step('←').unwrap();
        assert_eq!(step.state, Cell::new(2, 1));
        assert_eq!(env.position(), Cell::new(2, 1));
    }

    #[test]
    fn reset_returns_to_start() {
        let mut env = GridWorld::corridor();
        env.reset().unwrap();
        env.step('→').unwrap();
        env.step('↓').unwrap();
        assert_eq!(env.reset().unwrap(), env.start());
        assert_eq!(env.position(), env.start());
    }

    #[test]
    fn unknown_actions_are_invalid() {
        let mut env = GridWorld::corridor();
        env.reset().unwrap();
        assert!(matches!(env.step('x'), Err(RLError::InvalidAction(_))));
        assert_eq!(Move::try_from('↓').unwrap(), Move::Down);
    }

    #[test]
    fn domains_cover_every_reachable_cell() {
        let env = GridWorld::corridor();
        let states = env.states();
        assert_eq!(states.len(), 15);
        assert!(states.contains(&env.start()));
        assert!(states.contains(&env.goal()));
        assert_eq!(GridWorld::actions(), vec!['↑', '→', '↓', '←']);
    }

    #[test]
    fn shortest_paths() {
        assert_eq!(GridWorld::corridor().shortest_path_len(), Some(6));

        let open = [Cell::new(0, 1), Cell::new(1, 1)];
        let env = GridWorld::new(open, Cell::new(0, 0), Cell::new(2, 1)).unwrap();
        assert_eq!(env.shortest_path_len(), Some(3));

        let walled =
            GridWorld::new(std::iter::empty::<Cell>(), Cell::new(0, 0), Cell::new(0, 2)).unwrap();
        assert_eq!(walled.shortest_path_len(), None);
    }

    #[test]
    fn start_and_goal_must_differ() {
        assert!(matches!(
            GridWorld::new(std::iter::empty::<Cell>(), Cell::new(1, 1), Cell::new(1, 1)),
            Err(RLError::Configuration(_))
        ));
    }

    #[test]
    fn cells_render_padded() {
        assert_eq!(format!("{:10}|", Cell::new(2, 0)), "(2, 0)    |");
        assert_eq!(Move::Left.to_string(), "←");
    }
}
