use std::{convert::TryFrom, error::Error, path::Path};

use csv::WriterBuilder;
use route_search::{
    bench::{Algorithm, BenchmarkResult, PairResult},
    graph::{MatrixGraph, Node, Route},
};
use serde::Serialize;

/// One exported line: a single search on a single endpoint pair.
#[derive(Debug, Serialize)]
pub struct Row {
    round: usize,
    start: usize,
    end: usize,
    algorithm: Algorithm,
    distance: i64,
    nanoseconds: u64,
    valid: bool,
    path: String,
}

impl Row {
    fn new(round: usize, start: Node, end: Node, result: &BenchmarkResult) -> Self {
        Row {
            round,
            start: start.id(),
            end: end.id(),
            algorithm: result.algorithm,
            distance: result.distance(),
            nanoseconds: u64::try_from(result.nanos()).unwrap_or(u64::MAX),
            valid: result.route.is_valid(),
            path: result.route.to_string(),
        }
    }
}

pub fn rows(round: usize, pairs: &[(Node, Node)], results: &[PairResult]) -> Vec<Row> {
    pairs
        .iter()
        .zip(results)
        .filter_map(|(&(start, end), result)| result.as_ref().ok().map(|r| (start, end, r)))
        .flat_map(|(start, end, results)| {
            results
                .iter()
                .map(move |result| Row::new(round, start, end, result))
        })
        .collect()
}

pub fn export<P: AsRef<Path>>(rows: &[Row], path: P) -> Result<(), Box<dyn Error>> {
    log::info!("Exporting {} results to {:?}.", rows.len(), path.as_ref());
    let mut wtr = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Route with vertex names where the graph knows them.
fn render_route(graph: &MatrixGraph, route: &Route) -> String {
    let names: Vec<String> = route
        .nodes()
        .iter()
        .map(|&n| match graph.vertex(n) {
            Some(v) => v.name().to_string(),
            None => n.to_string(),
        })
        .collect();
    names.join(" -> ")
}

pub fn format_result(graph: &MatrixGraph, result: &BenchmarkResult) -> String {
    let route = &result.route;
    if route.is_empty() {
        format!(
            "{:<10} No path found. ({} ns)",
            result.algorithm,
            result.nanos()
        )
    } else if route.is_flagged() {
        format!(
            "{:<10} {} [invalid: uses a missing edge] ({} ns)",
            result.algorithm,
            render_route(graph, route),
            result.nanos()
        )
    } else {
        format!(
            "{:<10} {} | distance {} ({} ns)",
            result.algorithm,
            render_route(graph, route),
            result.distance(),
            result.nanos()
        )
    }
}

pub fn print_results(graph: &MatrixGraph, pairs: &[(Node, Node)], results: &[PairResult]) {
    for (i, (&(start, end), result)) in pairs.iter().zip(results).enumerate() {
        println!("Pair {}: {} -> {}", i + 1, start, end);
        match result {
            Ok(results) => {
                for result in results {
                    println!("  {}", format_result(graph, result));
                }
            }
            Err(err) => println!("  Error: {}", err),
        }
        println!();
    }
}

/// Mean running time per algorithm over all rows.
pub fn print_mean_times(rows: &[Row]) {
    for &algorithm in Algorithm::ALL.iter() {
        let times: Vec<u128> = rows
            .iter()
            .filter(|r| r.algorithm == algorithm)
            .map(|r| u128::from(r.nanoseconds))
            .collect();
        if !times.is_empty() {
            let mean = times.iter().sum::<u128>() / times.len() as u128;
            println!("{:<10} mean {} ns over {} runs", algorithm, mean, times.len());
        }
    }
}

#[cfg(test)]
mod test_report {
    use super::*;
    use route_search::{graph::Vertex, Cost, Error};
    use std::time::Duration;

    fn graph() -> MatrixGraph {
        let mut graph = MatrixGraph::new(3);
        graph.add_vertex(Vertex::new("A", 0.into(), (0, 0)));
        graph.add_vertex(Vertex::new("B", 1.into(), (0, 1)));
        graph.add_edge(0.into(), 1.into(), 4);
        graph.add_edge(1.into(), 2.into(), 2);
        graph
    }

    fn result(algorithm: Algorithm, route: Route) -> BenchmarkResult {
        BenchmarkResult {
            algorithm,
            route,
            elapsed: Duration::from_nanos(1500),
        }
    }

    #[test]
    fn test_format() {
        let graph = graph();
        let found = result(
            Algorithm::Dijkstra,
            Route::new(vec![0.into(), 1.into(), 2.into()], Cost::new(6)),
        );
        assert_eq!(
            format_result(&graph, &found),
            "Dijkstra   A -> B -> 2 | distance 6 (1500 ns)"
        );

        let missing = result(Algorithm::Genetic, Route::not_found());
        assert!(format_result(&graph, &missing).contains("No path found."));

        let flagged = result(
            Algorithm::Annealing,
            Route::from_candidate(vec![0.into(), 2.into()], &graph),
        );
        assert!(format_result(&graph, &flagged).contains("invalid"));
    }

    #[test]
    fn test_rows_skip_failed_pairs() {
        let pairs = vec![(0.into(), 2.into()), (1.into(), 2.into())];
        let ok = vec![result(
            Algorithm::Dijkstra,
            Route::new(vec![1.into(), 2.into()], Cost::new(2)),
        )];
        let results = vec![
            Err(Error::PairPanicked {
                start: 0.into(),
                end: 2.into(),
                message: "boom".into(),
            }),
            Ok(ok),
        ];
        let rows = rows(3, &pairs, &results);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].round, 3);
        assert_eq!(rows[0].start, 1);
        assert_eq!(rows[0].path, "1 -> 2");
        assert!(rows[0].valid);
    }
}
