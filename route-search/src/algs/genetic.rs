use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

use crate::{
    config::GeneticConfig,
    graph::{path_cost, Graph, Node, Route},
    Cost,
};

use super::operators::{order_crossover, random_permutation, swap_mutation};

/// Evolves random permutations `[start, .., end]` of all nodes toward a short valid route.
///
/// Returns the best valid route seen in any generation, or [`Route::not_found`].
pub fn genetic_search<G, R>(
    graph: &G,
    start: Node,
    end: Node,
    config: &GeneticConfig,
    rng: &mut R,
) -> Route
where
    G: Graph,
    R: Rng + ?Sized,
{
    if !graph.contains_node(start) || !graph.contains_node(end) {
        return Route::not_found();
    }
    if start == end {
        return Route::new(vec![start], Cost::new(0));
    }
    let mut search = GeneticSearch::init(graph, start, end, config, rng);
    search.run();
    search.best_route()
}

/// State of a running genetic search. One call of [`GeneticSearch::next_generation`] breeds
/// and evaluates a complete new population.
pub struct GeneticSearch<'a, G, R: ?Sized> {
    graph: &'a G,
    config: &'a GeneticConfig,
    rng: &'a mut R,
    population: Vec<Vec<Node>>,
    /// `None` for routes that use a missing edge.
    distances: Vec<Option<Cost>>,
    best: Option<(Vec<Node>, Cost)>,
    generation: usize,
}

impl<'a, G, R> GeneticSearch<'a, G, R>
where
    G: Graph,
    R: Rng + ?Sized,
{
    pub fn init(
        graph: &'a G,
        start: Node,
        end: Node,
        config: &'a GeneticConfig,
        rng: &'a mut R,
    ) -> Self {
        let population: Vec<Vec<Node>> = (0..config.population_size)
            .map(|_| random_permutation(graph, start, end, rng))
            .collect();
        let mut search = GeneticSearch {
            graph,
            config,
            rng,
            population,
            distances: vec![],
            best: None,
            generation: 0,
        };
        search.evaluate();
        search
    }

    pub fn run(&mut self) {
        log::debug!(
            "Starting genetic search: {} individuals, {} generations.",
            self.config.population_size,
            self.config.generations
        );
        while self.generation < self.config.generations {
            self.next_generation();
        }
        log::debug!(
            "Genetic search finished after {} generations. Best: {:?}",
            self.generation,
            self.best_cost()
        );
    }

    pub fn next_generation(&mut self) {
        let size = self.config.population_size;
        let mut next: Vec<Vec<Node>> = Vec::with_capacity(size);

        let mut ranked: Vec<(Cost, usize)> = self
            .distances
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (d, i)))
            .collect();
        ranked.sort_unstable();
        for &(_, i) in ranked.iter().take(self.config.elite_size.min(size)) {
            next.push(self.population[i].clone());
        }

        // Roulette wheel over 1 / (distance + 1); uniform if nothing is valid.
        let fitness: Vec<f64> = self
            .distances
            .iter()
            .map(|d| d.map(|d| 1.0 / (d.as_float() + 1.0)).unwrap_or(0.0))
            .collect();
        let wheel = WeightedIndex::new(&fitness).ok();

        while next.len() < size {
            let i = self.select(wheel.as_ref());
            let j = self.select(wheel.as_ref());

            let mut child = if self.rng.gen::<f64>() < self.config.crossover_rate {
                order_crossover(&self.population[i], &self.population[j], false, self.rng)
            } else {
                self.population[i].clone()
            };
            if self.rng.gen::<f64>() < self.config.mutation_rate {
                swap_mutation(&mut child, self.rng);
            }
            next.push(child);
        }

        self.population = next;
        self.generation += 1;
        self.evaluate();
        log::trace!(
            "Generation {}/{}: {:?}",
            self.generation,
            self.config.generations,
            self.best_cost()
        );
    }

    fn select(&mut self, wheel: Option<&WeightedIndex<f64>>) -> usize {
        match wheel {
            Some(wheel) => wheel.sample(self.rng),
            None => self.rng.gen_range(0..self.population.len()),
        }
    }

    fn evaluate(&mut self) {
        let graph = self.graph;
        self.distances = self
            .population
            .iter()
            .map(|path| path_cost(graph, path).ok())
            .collect();

        let generation_best = self
            .distances
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (d, i)))
            .min();
        if let Some((cost, i)) = generation_best {
            if self.best.as_ref().map_or(true, |(_, best)| cost < *best) {
                self.best = Some((self.population[i].clone(), cost));
            }
        }
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Cost of the best valid route seen so far.
    pub fn best_cost(&self) -> Option<Cost> {
        self.best.as_ref().map(|(_, cost)| *cost)
    }

    pub fn best_route(&self) -> Route {
        match &self.best {
            Some((nodes, cost)) => Route::new(nodes.clone(), *cost),
            None => Route::not_found(),
        }
    }
}

#[cfg(test)]
mod test_genetic {
    use super::*;
    use crate::{dijkstra::dijkstra_path, graph::MatrixGraph};
    use rand::{rngs::StdRng, SeedableRng};

    fn complete_graph(n: usize, rng: &mut StdRng) -> MatrixGraph {
        let mut graph = MatrixGraph::new(n);
        for i in 0..n {
            for j in i + 1..n {
                graph.add_edge(i.into(), j.into(), rng.gen_range(1..100));
            }
        }
        graph
    }

    #[test]
    fn test_finds_valid_route() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = complete_graph(8, &mut rng);
        let config = GeneticConfig::default()
            .with_population_size(30)
            .with_generations(40);

        let route = genetic_search(&graph, 0.into(), 7.into(), &config, &mut rng);
        assert!(route.is_valid_in(&graph));
        assert_eq!(route.first(), Some(0.into()));
        assert_eq!(route.last(), Some(7.into()));
        assert_eq!(route.len(), 8);
        assert_eq!(Route::with_cost_from(route.nodes().to_vec(), &graph), route);

        let exact = dijkstra_path(&graph, 0.into(), 7.into());
        assert!(exact.distance() <= route.distance());
    }

    #[test]
    fn test_best_is_monotone() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = complete_graph(10, &mut rng);
        for elite_size in &[0, 5] {
            let config = GeneticConfig::default()
                .with_population_size(20)
                .with_generations(30)
                .with_elite_size(*elite_size);
            let mut search = GeneticSearch::init(&graph, 0.into(), 9.into(), &config, &mut rng);
            let mut last = search.best_cost();
            while search.generation() < config.generations {
                search.next_generation();
                let current = search.best_cost();
                assert!(current.is_some());
                if let Some(last) = last {
                    assert!(current.unwrap() <= last);
                }
                last = current;
            }
        }
    }

    #[test]
    fn test_no_valid_route() {
        // 0 and 3 are isolated, every permutation uses a missing edge.
        let mut graph = MatrixGraph::new(4);
        graph.add_edge(1.into(), 2.into(), 4);
        let mut rng = StdRng::seed_from_u64(1);
        let config = GeneticConfig::default()
            .with_population_size(10)
            .with_generations(5);

        let route = genetic_search(&graph, 0.into(), 3.into(), &config, &mut rng);
        assert_eq!(route, Route::not_found());
    }

    #[test]
    fn test_invalid_endpoints() {
        let graph = MatrixGraph::new(3);
        let mut rng = StdRng::seed_from_u64(1);
        let config = GeneticConfig::default();
        let route = genetic_search(&graph, 0.into(), 3.into(), &config, &mut rng);
        assert_eq!(route.distance(), -1);
        assert!(route.is_empty());
    }

    #[test]
    fn test_two_nodes() {
        let mut graph = MatrixGraph::new(2);
        graph.add_edge(0.into(), 1.into(), 4);
        let mut rng = StdRng::seed_from_u64(1);
        let config = GeneticConfig::default()
            .with_population_size(4)
            .with_generations(3);
        let route = genetic_search(&graph, 1.into(), 0.into(), &config, &mut rng);
        assert_eq!(route.distance(), 4);
    }
}
