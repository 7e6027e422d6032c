//! Runs all four searches on endpoint pairs in parallel and times each of them.

use std::{
    any::Any,
    fmt,
    panic::{catch_unwind, AssertUnwindSafe},
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, SeedableRng};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use serde::Serialize;

use crate::{
    algs::{annealing_search, genetic_search, hybrid_search},
    config::SearchConfig,
    dijkstra::dijkstra_path,
    error::{Error, Result},
    graph::{Graph, Node, Route},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Algorithm {
    Annealing,
    Genetic,
    Dijkstra,
    Hybrid,
}

impl Algorithm {
    /// The order in which results of one pair are reported.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Annealing,
        Algorithm::Genetic,
        Algorithm::Dijkstra,
        Algorithm::Hybrid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Annealing => "Annealing",
            Algorithm::Genetic => "Genetic",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub algorithm: Algorithm,
    pub route: Route,
    /// Wall-clock time of the search alone.
    pub elapsed: Duration,
}

impl BenchmarkResult {
    pub fn distance(&self) -> i64 {
        self.route.distance()
    }

    pub fn nanos(&self) -> u128 {
        self.elapsed.as_nanos()
    }
}

/// Result of one endpoint pair: four entries in [`Algorithm::ALL`] order, or the first failure.
pub type PairResult = Result<Vec<BenchmarkResult>>;

pub struct Harness<'a, G> {
    graph: &'a G,
    config: SearchConfig,
    pool: Option<ThreadPool>,
}

impl<'a, G> Harness<'a, G>
where
    G: Graph + Sync,
{
    /// Creates a harness over `graph`. With `config.threads` set, all work runs on a dedicated
    /// pool of that size instead of the global one.
    pub fn new(graph: &'a G, config: SearchConfig) -> Result<Self> {
        let pool = match config.threads {
            Some(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| Error::Pool(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Harness {
            graph,
            config,
            pool,
        })
    }

    pub fn run_pair(&self, start: Node, end: Node) -> PairResult {
        self.install(|| self.evaluate_pair(0, start, end))
    }

    /// Evaluates all pairs concurrently. The i-th entry of the result belongs to `pairs[i]`;
    /// a failed pair does not affect the others.
    pub fn run_batch(&self, pairs: &[(Node, Node)]) -> Vec<PairResult> {
        log::info!("Evaluating {} endpoint pairs.", pairs.len());
        let results: Vec<PairResult> = self.install(|| {
            pairs
                .par_iter()
                .enumerate()
                .map(|(i, &(start, end))| self.evaluate_pair(i, start, end))
                .collect()
        });
        let failed = results.iter().filter(|r| r.is_err()).count();
        log::info!(
            "Finished {} endpoint pairs, {} failed.",
            pairs.len(),
            failed
        );
        results
    }

    fn install<T, F>(&self, job: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(job),
            None => job(),
        }
    }

    fn evaluate_pair(&self, index: usize, start: Node, end: Node) -> PairResult {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let mut slots: [Option<Result<BenchmarkResult>>; 4] = [None, None, None, None];
            rayon::scope(|s| {
                for (slot, &algorithm) in slots.iter_mut().zip(Algorithm::ALL.iter()) {
                    s.spawn(move |_| {
                        *slot = Some(guarded(algorithm, || {
                            self.run_algorithm(algorithm, index, start, end)
                        }))
                    });
                }
            });
            slots.iter_mut().filter_map(Option::take).collect::<PairResult>()
        }));
        match outcome {
            Ok(result) => {
                if let Err(err) = &result {
                    log::warn!("Pair {} -> {} failed: {}", start, end, err);
                }
                result
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::warn!("Pair {} -> {} panicked: {}", start, end, message);
                Err(Error::PairPanicked {
                    start,
                    end,
                    message,
                })
            }
        }
    }

    fn run_algorithm(
        &self,
        algorithm: Algorithm,
        index: usize,
        start: Node,
        end: Node,
    ) -> BenchmarkResult {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(task_seed(seed, index, algorithm)),
            None => StdRng::from_entropy(),
        };
        let graph = self.graph;

        let started = Instant::now();
        let route = match algorithm {
            Algorithm::Annealing => {
                annealing_search(graph, start, end, &self.config.annealing, &mut rng)
            }
            Algorithm::Genetic => genetic_search(graph, start, end, &self.config.genetic, &mut rng),
            Algorithm::Dijkstra => dijkstra_path(graph, start, end),
            Algorithm::Hybrid => hybrid_search(graph, start, end, &self.config.hybrid, &mut rng),
        };
        let elapsed = started.elapsed();
        log::debug!(
            "{} {} -> {}: distance {} in {:?}.",
            algorithm,
            start,
            end,
            route.distance(),
            elapsed
        );

        BenchmarkResult {
            algorithm,
            route,
            elapsed,
        }
    }
}

/// Runs one search task, turning a panic into [`Error::TaskPanicked`].
fn guarded<T, F>(algorithm: Algorithm, task: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    catch_unwind(AssertUnwindSafe(task)).map_err(|payload| Error::TaskPanicked {
        algorithm,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Seed of the generator for one (pair, algorithm) task, mixed with the splitmix64 finalizer.
fn task_seed(seed: u64, index: usize, algorithm: Algorithm) -> u64 {
    let mut z = seed
        .wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add((algorithm as u64 + 1).wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
