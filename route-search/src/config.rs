//! Parameters of the randomized searches.
//!
//! Every record has a `Default` with the values the benchmark driver uses and `with_*`
//! setters for the rest.

/// Parameters of [`genetic_search`](crate::algs::genetic_search).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticConfig {
    /// Number of candidate routes per generation.
    pub population_size: usize,
    pub generations: usize,
    /// Probability that a child is produced by crossover instead of copying its first parent.
    pub crossover_rate: f64,
    /// Probability that a child gets two interior nodes swapped.
    pub mutation_rate: f64,
    /// Number of best valid routes copied unchanged into the next generation. May be 0.
    pub elite_size: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            crossover_rate: 0.85,
            mutation_rate: 0.2,
            elite_size: 5,
        }
    }
}

impl GeneticConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }
}

/// Parameters of [`annealing_search`](crate::algs::annealing_search).
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingConfig {
    pub iterations: usize,
    pub initial_temperature: f64,
    /// Factor applied to the temperature after every iteration. Must lie in `(0, 1)`.
    pub cooling_rate: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            initial_temperature: 1000.0,
            cooling_rate: 0.995,
        }
    }
}

impl AnnealingConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        assert!(
            rate > 0.0 && rate < 1.0,
            "cooling rate must lie in (0, 1), got {}",
            rate
        );
        self.cooling_rate = rate;
        self
    }
}

/// Parameters of [`hybrid_search`](crate::algs::hybrid_search).
#[derive(Debug, Clone, PartialEq)]
pub struct HybridConfig {
    pub population_size: usize,
    pub generations: usize,
    /// The greedy seeding picks uniformly among this many nearest unvisited neighbors.
    /// The default `1` is the plain nearest-neighbor walk, larger values diversify the seeds.
    pub rcl_size: usize,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            rcl_size: 1,
        }
    }
}

impl HybridConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_rcl_size(mut self, n: usize) -> Self {
        self.rcl_size = n.max(1);
        self
    }
}

/// Everything the [`Harness`](crate::bench::Harness) needs to run a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchConfig {
    pub genetic: GeneticConfig,
    pub annealing: AnnealingConfig,
    pub hybrid: HybridConfig,
    /// Base seed. `None` draws fresh entropy for every search.
    pub seed: Option<u64>,
    /// Size of a dedicated worker pool. `None` runs on the global rayon pool.
    pub threads: Option<usize>,
}

impl SearchConfig {
    pub fn with_genetic(mut self, genetic: GeneticConfig) -> Self {
        self.genetic = genetic;
        self
    }

    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_hybrid(mut self, hybrid: HybridConfig) -> Self {
        self.hybrid = hybrid;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}
