//! Action bounds for tabular environments

use std::fmt::Debug;
use std::hash::Hash;

/// An action drawn from a finite, enumerable domain
///
/// Like [`State`](crate::State), identity is by value and every type meeting
/// the bounds qualifies.
pub trait Action: Clone + Eq + Hash + Debug {}

impl<T> Action for T where T: Clone + Eq + Hash + Debug {}
