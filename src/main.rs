mod gen_graphs;
mod graph_io;
mod report;

use std::{error::Error, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use fern::colors::{Color, ColoredLevelConfig};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use route_search::{
    bench::Harness,
    config::{AnnealingConfig, GeneticConfig, HybridConfig, SearchConfig},
    graph::{GraphSize, MatrixGraph, Node},
};

use gen_graphs::CityGraphGenerator;
use graph_io::{export_graph, import_graph};

#[derive(Parser)]
#[clap(name = "route", about = "Benchmarks route searches on a city graph.")]
struct Cli {
    /// Log debug output.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Runs all searches on endpoint pairs of a graph file.
    Bench(Bench),
    /// Writes a random city graph.
    Gen(Gen),
    /// Prints the weight matrix of a graph file.
    Show(Show),
}

#[derive(Args)]
struct GraphInput {
    #[clap(parse(from_os_str))]
    input: PathBuf,

    /// Number of vertices. Inferred from the largest index in the file if omitted.
    #[clap(short = 'n', long)]
    vertices: Option<usize>,
}

#[derive(Args)]
struct Bench {
    #[clap(flatten)]
    graph: GraphInput,

    /// Endpoint pair `start:end`, may be repeated. Defaults to `0:n-1`, `1:n-1` and `1:n/2`.
    #[clap(short, long = "pair", parse(try_from_str = parse_pair))]
    pairs: Vec<(Node, Node)>,

    #[clap(long)]
    seed: Option<u64>,

    /// Size of a dedicated worker pool.
    #[clap(short, long)]
    threads: Option<usize>,

    /// Number of times the whole batch is run.
    #[clap(short, long, default_value = "1")]
    rounds: usize,

    #[clap(flatten)]
    params: SearchParams,

    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
struct SearchParams {
    #[clap(long, default_value = "100")]
    ga_population: usize,

    #[clap(long, default_value = "500")]
    ga_generations: usize,

    #[clap(long, default_value = "0.85")]
    ga_crossover: f64,

    #[clap(long, default_value = "0.2")]
    ga_mutation: f64,

    #[clap(long, default_value = "5")]
    ga_elite: usize,

    #[clap(long, default_value = "10000")]
    sa_iterations: usize,

    #[clap(long, default_value = "1000")]
    sa_temperature: f64,

    #[clap(long, default_value = "0.995")]
    sa_cooling: f64,

    #[clap(long, default_value = "50")]
    hybrid_population: usize,

    #[clap(long, default_value = "100")]
    hybrid_generations: usize,

    #[clap(long, default_value = "1")]
    hybrid_rcl: usize,
}

impl SearchParams {
    fn to_config(&self) -> Result<SearchConfig, Box<dyn Error>> {
        if !(self.sa_cooling > 0.0 && self.sa_cooling < 1.0) {
            return Err(format!("cooling rate must lie in (0, 1), got {}", self.sa_cooling).into());
        }
        Ok(SearchConfig::default()
            .with_genetic(
                GeneticConfig::default()
                    .with_population_size(self.ga_population)
                    .with_generations(self.ga_generations)
                    .with_crossover_rate(self.ga_crossover)
                    .with_mutation_rate(self.ga_mutation)
                    .with_elite_size(self.ga_elite),
            )
            .with_annealing(
                AnnealingConfig::default()
                    .with_iterations(self.sa_iterations)
                    .with_initial_temperature(self.sa_temperature)
                    .with_cooling_rate(self.sa_cooling),
            )
            .with_hybrid(
                HybridConfig::default()
                    .with_population_size(self.hybrid_population)
                    .with_generations(self.hybrid_generations)
                    .with_rcl_size(self.hybrid_rcl),
            ))
    }
}

#[derive(Args)]
struct Gen {
    #[clap(short = 'n', long, default_value = "20")]
    num_nodes: usize,

    /// Random roads added to the chain through all cities.
    #[clap(short, long, default_value = "30")]
    extra_edges: usize,

    #[clap(long)]
    seed: Option<u64>,

    #[clap(parse(from_os_str))]
    output: PathBuf,
}

#[derive(Args)]
struct Show {
    #[clap(flatten)]
    graph: GraphInput,
}

fn parse_pair(s: &str) -> Result<(Node, Node), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected start:end, got {:?}", s))?;
    let start = start.trim().parse::<usize>().map_err(|e| e.to_string())?;
    let end = end.trim().parse::<usize>().map_err(|e| e.to_string())?;
    Ok((start.into(), end.into()))
}

fn default_pairs(n: usize) -> Vec<(Node, Node)> {
    let last = n.saturating_sub(1);
    vec![
        (0.into(), last.into()),
        (1.into(), last.into()),
        (1.into(), (n / 2).into()),
    ]
}

fn bench(bench: Bench) -> Result<(), Box<dyn Error>> {
    let graph: MatrixGraph = import_graph(&bench.graph.input, bench.graph.vertices)?;
    let pairs = if bench.pairs.is_empty() {
        default_pairs(graph.n())
    } else {
        bench.pairs
    };
    let config = bench
        .params
        .to_config()?
        .with_seed(bench.seed)
        .with_threads(bench.threads);
    let harness = Harness::new(&graph, config)?;

    let rounds = bench.rounds.max(1);
    let pb = ProgressBar::new(rounds as u64);
    pb.set_style(
        ProgressStyle::default_bar().template(
            "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ({pos}/{len})",
        ),
    );
    pb.set_message("Rounds");
    if rounds == 1 {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let mut rows = vec![];
    let mut first = None;
    for round in (0..rounds).progress_with(pb) {
        let results = harness.run_batch(&pairs);
        rows.extend(report::rows(round, &pairs, &results));
        if first.is_none() {
            first = Some(results);
        }
    }

    if let Some(results) = first {
        report::print_results(&graph, &pairs, &results);
    }
    if rounds > 1 {
        report::print_mean_times(&rows);
    }
    if let Some(output) = bench.output {
        report::export(&rows, output)?;
    }
    Ok(())
}

fn set_up_logging(verbose: bool) -> Result<(), fern::InitError> {
    std::fs::create_dir_all("logs")?;
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let colors = ColoredLevelConfig::new()
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .level(level)
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{date}][{level}] {message}",
                        date = chrono::Local::now().format("%H:%M:%S"),
                        level = record.level(),
                        message = message
                    ));
                })
                .chain(fern::log_file(format!(
                    "logs/{}.log",
                    chrono::Local::now().format("%d%m%Y-%H%M")
                ))?),
        )
        .chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Warn)
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{level}] {message}",
                        level = colors.color(record.level()),
                        message = message
                    ));
                })
                .chain(std::io::stderr()),
        )
        .apply()?;

    log::info!("Logger set up!");

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    set_up_logging(cli.verbose)?;

    match cli.command {
        Command::Bench(b) => bench(b)?,
        Command::Gen(gen) => {
            let graph = CityGraphGenerator::new(gen.num_nodes, gen.extra_edges, gen.seed)
                .next()
                .ok_or("generator yielded no graph")?;
            export_graph(&gen.output, &graph)?;
            println!(
                "Graph with {} nodes and {} edges written to {:?}.",
                graph.n(),
                graph.m(),
                gen.output
            );
        }
        Command::Show(show) => {
            let graph = import_graph(&show.graph.input, show.graph.vertices)?;
            println!("{} nodes, {} edges", graph.n(), graph.m());
            for vertex in graph.vertices() {
                println!(
                    "  {} {} {:?} {:?}",
                    vertex.id(),
                    vertex.name(),
                    vertex.location(),
                    vertex.attr()
                );
            }
            print!("{}", graph);
        }
    }
    Ok(())
}

#[cfg(test)]
mod test_main {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("2:7"), Ok((2.into(), 7.into())));
        assert_eq!(parse_pair(" 0 : 1"), Ok((0.into(), 1.into())));
        assert!(parse_pair("3").is_err());
        assert!(parse_pair("a:1").is_err());
    }

    #[test]
    fn test_default_pairs() {
        assert_eq!(
            default_pairs(20),
            vec![(0.into(), 19.into()), (1.into(), 19.into()), (1.into(), 10.into())]
        );
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(vec!["route", "bench", "graph.txt", "-p", "0:3", "-p", "1:2"]);
        match cli.command {
            Command::Bench(b) => {
                assert_eq!(b.pairs.len(), 2);
                assert_eq!(b.rounds, 1);
                let config = b.params.to_config().unwrap();
                assert_eq!(config, SearchConfig::default());
            }
            _ => panic!("expected bench"),
        }
    }
}
