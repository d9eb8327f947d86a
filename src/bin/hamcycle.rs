//! Command-line front end: search a saved graph for a Hamiltonian cycle,
//! inspect it, or generate a random one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use hamilton::graph::{
    connected_components, random_graph, search, seeded_random_graph, Graph, GraphRecord,
    RandomGraphConfig, SearchConfig, SearchMode,
};

#[derive(Parser, Debug)]
#[command(name = "hamcycle")]
#[command(about = "Hamiltonian cycle search over undirected graphs", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a graph file for a Hamiltonian cycle
    Solve {
        /// Graph file (JSON with `vertices` and `edges`)
        file: PathBuf,

        /// Vertex to start from (defaults to the first vertex)
        #[arg(short, long)]
        start: Option<String>,

        /// backtracking, branch-and-bound or brute-force
        #[arg(short, long, default_value_t = SearchMode::Backtracking)]
        mode: SearchMode,

        /// Print every recorded step
        #[arg(long)]
        steps: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Search even when Dirac's condition fails
        #[arg(long)]
        no_dirac: bool,
    },

    /// List the connected components of a graph file
    Components { file: PathBuf },

    /// Print vertices, edges, adjacency matrix and degrees
    Info { file: PathBuf },

    /// Print a random graph as JSON
    Random {
        #[arg(short = 'n', long, default_value_t = 6)]
        vertices: usize,

        #[arg(short, long, default_value_t = 0.4)]
        probability: f64,

        /// Seed for a reproducible graph
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            file,
            start,
            mode,
            steps,
            json,
            no_dirac,
        } => {
            let graph = load_graph(&file)?;
            let mut config = SearchConfig::new(mode).with_dirac_gate(!no_dirac);
            if let Some(start) = start {
                config = config.with_start(start);
            }
            let result = search(&graph, &config);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }
            if steps {
                for step in &result.steps {
                    println!("{:>4}. {}", step.index, step.action);
                }
                println!();
            }
            match result.cycle() {
                Some(cycle) => println!("Hamiltonian cycle: {}", cycle.join(" -> ")),
                None => println!("No Hamiltonian cycle"),
            }
            println!("{} mode, {} steps", mode, result.total_steps);
        }
        Command::Components { file } => {
            let graph = load_graph(&file)?;
            let components = connected_components(&graph);
            println!("{} connected component(s)", components.count());
            for (i, group) in components.groups().iter().enumerate() {
                println!("  {}: {}", i + 1, group.join(", "));
            }
        }
        Command::Info { file } => {
            let graph = load_graph(&file)?;
            print!("{}", graph.info());
        }
        Command::Random {
            vertices,
            probability,
            seed,
        } => {
            let config = RandomGraphConfig::default()
                .with_vertices(vertices)
                .with_edge_probability(probability);
            let graph = match seed {
                Some(seed) => seeded_random_graph(seed, &config)?,
                None => random_graph(&mut rand::thread_rng(), &config)?,
            };
            println!("{}", GraphRecord::from(&graph).to_json_pretty()?);
        }
    }

    Ok(())
}

fn load_graph(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let record = GraphRecord::from_json(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Graph::try_from(record).with_context(|| format!("invalid graph in {}", path.display()))
}
