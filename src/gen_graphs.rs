use rand::{rngs::StdRng, Rng, SeedableRng};
use route_search::graph::{MatrixGraph, Node, Vertex};

/// Generates city networks: `n` vertices `C0..` scattered on a 1000x1000 grid, joined by a
/// chain `C0 - C1 - ..` and `extra_edges` random roads. Road weights are the truncated
/// Euclidean distances of their cities.
pub struct CityGraphGenerator {
    n: usize,
    extra_edges: usize,
    rng: StdRng,
}

impl CityGraphGenerator {
    pub fn new(n: usize, extra_edges: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        CityGraphGenerator {
            n,
            extra_edges,
            rng,
        }
    }
}

fn distance(a: (i64, i64), b: (i64, i64)) -> i64 {
    let dx = (a.0 - b.0) as f64;
    let dy = (a.1 - b.1) as f64;
    ((dx * dx + dy * dy).sqrt() as i64).max(1)
}

impl Iterator for CityGraphGenerator {
    type Item = MatrixGraph;

    fn next(&mut self) -> Option<Self::Item> {
        let mut graph = MatrixGraph::new(self.n);
        let mut locations = Vec::with_capacity(self.n);
        for i in 0..self.n {
            let location = (self.rng.gen_range(0..1000), self.rng.gen_range(0..1000));
            locations.push(location);
            graph.add_vertex(Vertex::new(format!("C{}", i), Node::new(i), location));
        }

        for i in 1..self.n {
            graph.add_edge((i - 1).into(), i.into(), distance(locations[i - 1], locations[i]));
        }

        if self.n >= 2 {
            for _ in 0..self.extra_edges {
                let source = self.rng.gen_range(0..self.n);
                let mut sink = self.rng.gen_range(0..self.n - 1);
                if sink >= source {
                    sink += 1;
                }
                graph.add_edge(
                    source.into(),
                    sink.into(),
                    distance(locations[source], locations[sink]),
                );
            }
        }
        log::info!(
            "Generated city graph with {} nodes and {} edges.",
            self.n,
            graph.m()
        );

        Some(graph)
    }
}
