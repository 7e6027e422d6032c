pub mod algs;
pub mod bench;
pub mod config;
pub mod cost;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod two_opt;

pub use cost::Cost;
pub use error::{Error, Result};
