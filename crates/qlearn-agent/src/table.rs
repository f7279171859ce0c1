//! Dense action-value table over finite state and action domains
//!
//! States and actions are mapped to contiguous row and column positions once,
//! at construction, through insertion-ordered index sets. Every lookup goes
//! through those maps, so a key outside the declared domain is an error
//! rather than a silently defaulted entry.

use std::fmt;

use indexmap::IndexSet;
use ndarray::{Array2, ArrayView1};
use qlearn_core::{Action, ActionValueFunction, RLError, Result, State};

/// Width of the state label column in the rendered table
const STATE_COLUMN_WIDTH: usize = 10;
/// Width of each value column in the rendered table
const VALUE_COLUMN_WIDTH: usize = 5;

/// Q-table mapping (state, action) pairs to value estimates
#[derive(Debug, Clone)]
pub struct QTable<S, A> {
    states: IndexSet<S>,
    actions: IndexSet<A>,
    values: Array2<f64>,
}

impl<S: State, A: Action> QTable<S, A> {
    /// Create a zero-initialised table of shape `(|states|, |actions|)`
    ///
    /// Both domains must be non-empty and free of duplicates; a duplicate
    /// would alias two inputs onto one row or column.
    pub fn new(
        states: impl IntoIterator<Item = S>,
        actions: impl IntoIterator<Item = A>,
    ) -> Result<Self> {
        let states = index_domain(states, "state")?;
        let actions = index_domain(actions, "action")?;
        let values = Array2::zeros((states.len(), actions.len()));

        Ok(Self {
            states,
            actions,
            values,
        })
    }

    /// Row position of a state
    pub fn state_index(&self, state: &S) -> Result<usize> {
        self.states
            .get_index_of(state)
            .ok_or_else(|| RLError::unknown_state(state))
    }

    /// Column position of an action
    pub fn action_index(&self, action: &A) -> Result<usize> {
        self.actions
            .get_index_of(action)
            .ok_or_else(|| RLError::unknown_action(action))
    }

    /// Get the value for a state-action pair
    pub fn get(&self, state: &S, action: &A) -> Result<f64> {
        let row = self.state_index(state)?;
        let col = self.action_index(action)?;
        Ok(self.values[[row, col]])
    }

    /// Set the value for a state-action pair
    pub fn set(&mut self, state: &S, action: &A, value: f64) -> Result<()> {
        let row = self.state_index(state)?;
        let col = self.action_index(action)?;
        self.values[[row, col]] = value;
        Ok(())
    }

    /// All action values for one state, in action order
    pub fn row(&self, state: &S) -> Result<ArrayView1<'_, f64>> {
        let row = self.state_index(state)?;
        Ok(self.values.row(row))
    }

    /// Greedy action in a state
    ///
    /// Actions are scanned in construction order and only a strictly larger
    /// value replaces the running best, so ties go to the earliest action.
    pub fn greedy_action(&self, state: &S) -> Result<&A> {
        self.best_action_value(state).map(|(action, _)| action)
    }

    /// Action at a column position
    #[must_use]
    pub fn action_at(&self, index: usize) -> Option<&A> {
        self.actions.get_index(index)
    }

    /// States in construction order
    pub fn states(&self) -> impl ExactSizeIterator<Item = &S> {
        self.states.iter()
    }

    /// Actions in construction order
    pub fn actions(&self) -> impl ExactSizeIterator<Item = &A> {
        self.actions.iter()
    }

    /// Number of states
    #[must_use]
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// Number of actions
    #[must_use]
    pub fn n_actions(&self) -> usize {
        self.actions.len()
    }

    /// The raw value matrix, rows indexed like [`states`](Self::states)
    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

fn index_domain<T: fmt::Debug + Eq + std::hash::Hash>(
    items: impl IntoIterator<Item = T>,
    kind: &str,
) -> Result<IndexSet<T>> {
    let mut set = IndexSet::new();
    for item in items {
        if set.contains(&item) {
            return Err(RLError::Configuration(format!(
                "duplicate {kind} in domain: {item:?}"
            )));
        }
        set.insert(item);
    }
    if set.is_empty() {
        return Err(RLError::Configuration(format!("{kind} domain is empty")));
    }
    Ok(set)
}

impl<S: State, A: Action> ActionValueFunction for QTable<S, A> {
    type State = S;
    type Action = A;

    fn q_value(&self, state: &S, action: &A) -> Result<f64> {
        self.get(state, action)
    }

    fn set_q_value(&mut self, state: &S, action: &A, value: f64) -> Result<()> {
        self.set(state, action, value)
    }

    fn best_action_value(&self, state: &S) -> Result<(&A, f64)> {
        let row = self.row(state)?;
        let mut best = 0;
        for (col, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = col;
            }
        }
        let action = self
            .actions
            .get_index(best)
            .ok_or_else(|| RLError::Configuration("action domain is empty".to_string()))?;
        Ok((action, row[best]))
    }
}

impl<S, A> fmt::Display for QTable<S, A>
where
    S: State + fmt::Display,
    A: Action + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}", "", width = STATE_COLUMN_WIDTH)?;
        for action in &self.actions {
            write!(f, " | {:^width$}", action.to_string(), width = VALUE_COLUMN_WIDTH)?;
        }
        writeln!(f)?;

        for (state, row) in self.states.iter().zip(self.values.rows()) {
            write!(f, "{:width$}", state.to_string(), width = STATE_COLUMN_WIDTH)?;
            for value in row {
                write!(f, " | {value:width$.2}", width = VALUE_COLUMN_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn corridor() -> QTable<&'static str, char> {
        QTable::new(["left", "middle", "right"], ['<', '>']).unwrap()
    }

    #[test]
    fn table_shape_follows_the_domains() {
        let table = corridor();
        assert_eq!(table.values().dim(), (3, 2));
        assert_eq!(table.n_states(), 3);
        assert_eq!(table.n_actions(), 2);
        assert_eq!(table.state_index(&"right").unwrap(), 2);
        assert_eq!(table.action_index(&'>').unwrap(), 1);
        assert_eq!(table.action_at(0), Some(&'<'));
        assert_eq!(table.action_at(2), None);
    }

    #[test]
    fn set_then_get() {
        let mut table = corridor();
        table.set(&"middle", &'>', 1.5).unwrap();
        assert_eq!(table.get(&"middle", &'>').unwrap(), 1.5);
        assert_eq!(table.get(&"middle", &'<').unwrap(), 0.0);
        assert_eq!(table.row(&"middle").unwrap().to_vec(), vec![0.0, 1.5]);
    }

    #[test]
    fn unknown_keys_are_errors() {
        let mut table = corridor();
        assert!(matches!(
            table.get(&"attic", &'<'),
            Err(RLError::UnknownKey { kind: qlearn_core::KeyKind::State, .. })
        ));
        assert!(matches!(
            table.set(&"left", &'^', 1.0),
            Err(RLError::UnknownKey { kind: qlearn_core::KeyKind::Action, .. })
        ));
        assert!(table.greedy_action(&"attic").is_err());
    }

    #[test]
    fn empty_or_duplicated_domains_are_rejected() {
        let empty_states: [&str; 0] = [];
        assert!(matches!(
            QTable::new(empty_states, ['<']),
            Err(RLError::Configuration(_))
        ));
        assert!(matches!(
            QTable::<_, char>::new(["a"], []),
            Err(RLError::Configuration(_))
        ));
        assert!(matches!(
            QTable::new(["a", "b", "a"], ['<']),
            Err(RLError::Configuration(_))
        ));
        assert!(matches!(
            QTable::new(["a"], ['<', '<']),
            Err(RLError::Configuration(_))
        ));
    }

    #[test]
    fn greedy_action_prefers_the_first_of_equal_maxima() {
        let mut table = QTable::new([0_u8], ['a', 'b', 'c', 'd']).unwrap();
        assert_eq!(*table.greedy_action(&0).unwrap(), 'a');

        table.set(&0, &'b', 2.0).unwrap();
        table.set(&0, &'d', 2.0).unwrap();
        assert_eq!(*table.greedy_action(&0).unwrap(), 'b');
        assert_eq!(table.max_q_value(&0).unwrap(), 2.0);

        table.set(&0, &'d', 2.5).unwrap();
        assert_eq!(*table.greedy_action(&0).unwrap(), 'd');
    }

    #[test]
    fn greedy_action_handles_all_negative_rows() {
        let mut table = QTable::new([0_u8], ['a', 'b', 'c']).unwrap();
        table.set(&0, &'a', -3.0).unwrap();
        table.set(&0, &'b', -1.0).unwrap();
        table.set(&0, &'c', -2.0).unwrap();
        assert_eq!(table.best_action_value(&0).unwrap(), (&'b', -1.0));
    }

    #[test]
    fn rendering_lists_every_state_and_action() {
        let mut table = corridor();
        table.set(&"left", &'>', -1.25).unwrap();
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "           |   <   |   >  ");
        assert_eq!(lines[1], "left       |  0.00 | -1.25");
        assert!(lines[2].starts_with("middle     |"));
        assert!(lines[3].starts_with("right      |"));
    }

    proptest! {
        #[test]
        fn fresh_tables_are_all_zero(n_states in 1usize..30, n_actions in 1usize..10) {
            let table = QTable::new(0..n_states, 0..n_actions).unwrap();
            for s in 0..n_states {
                for a in 0..n_actions {
                    prop_assert_eq!(table.get(&s, &a).unwrap(), 0.0);
                }
            }
        }
    }
}
