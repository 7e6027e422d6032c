//! Metaheuristic route searches.
//!
//! All searches take the random number generator as an argument and never touch shared
//! random state, so concurrent runs with seeded generators are reproducible.

mod annealing;
mod genetic;
mod hybrid;
mod operators;

pub use annealing::annealing_search;
pub use genetic::{genetic_search, GeneticSearch};
pub use hybrid::hybrid_search;
