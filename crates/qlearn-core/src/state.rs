//! State bounds for tabular environments

use std::fmt::Debug;
use std::hash::Hash;

/// A state drawn from a finite, enumerable domain
///
/// States are compared and hashed by value; the learner maps each one to a
/// dense row of its action-value table. Any type with the listed bounds is a
/// state, so tuples, integers and small enums work without extra glue.
pub trait State: Clone + Eq + Hash + Debug {}

impl<T> State for T where T: Clone + Eq + Hash + Debug {}
