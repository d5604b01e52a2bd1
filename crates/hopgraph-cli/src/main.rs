//! CLI harness for hopgraph: load a graph description and query it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hopgraph_core::{EdgeSpec, Graph, GraphConfig, GraphSource, GraphStats};
use serde_json::Value;
use std::path::{Path, PathBuf};

type JsonGraph = Graph<String, Value>;

#[derive(Parser)]
#[command(name = "hopgraph", about = "Directed graph hop-count path explorer")]
struct Cli {
    /// Directory holding hopgraph.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace the shortest hop-count path between two nodes
    Trace {
        /// Source node identity
        from: String,

        /// Destination node identity
        to: String,

        /// Graph description (JSON: {"nodes": [...], "edges": [{"from", "to", "data"}]})
        #[arg(short, long)]
        graph: PathBuf,
    },

    /// Report whether the graph contains a directed cycle
    Cycles {
        /// Graph description (JSON)
        #[arg(short, long)]
        graph: PathBuf,
    },

    /// Check for cycles, then show node, edge, cycle, and cache counters
    ///
    /// Cache counters describe the paths stored by the cycle check on the
    /// freshly loaded graph.
    Stats {
        /// Graph description (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the bundled nine-node sample graph and trace A -> C
    Demo,
}

fn get_config_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.config_dir {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GraphConfig::load(&get_config_dir(&cli)?)?;

    match cli.command {
        Commands::Trace { from, to, graph } => cmd_trace(&config, &graph, &from, &to),
        Commands::Cycles { graph } => cmd_cycles(&config, &graph),
        Commands::Stats { graph, json } => cmd_stats(&config, &graph, json),
        Commands::Demo => cmd_demo(&config),
    }
}

/// Build a graph from a JSON source file.
fn load_graph(config: &GraphConfig, path: &Path) -> Result<JsonGraph> {
    let source: GraphSource<String, Value> = GraphSource::load(path)?;
    build_graph(config, &source)
}

fn build_graph(config: &GraphConfig, source: &GraphSource<String, Value>) -> Result<JsonGraph> {
    let mut graph = JsonGraph::with_config(config);
    graph
        .build_from(source)
        .context("failed to build graph from source")?;
    tracing::info!(
        "loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Render an edge payload: strings bare, everything else as compact JSON.
fn render_payload(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Trace `from -> to` and format the route, hop count, and edge payloads.
fn describe_trace(graph: &mut JsonGraph, from: &str, to: &str) -> Result<String> {
    let path = graph
        .trace(&from.to_string(), &to.to_string())
        .with_context(|| format!("trace {from} -> {to} failed"))?;

    let route: Vec<&str> = graph
        .path_keys(&path)
        .into_iter()
        .map(String::as_str)
        .collect();
    let payloads: Vec<String> = graph
        .load_edges(&path)?
        .into_iter()
        .map(render_payload)
        .collect();

    let mut out = String::new();
    out.push_str(&format!("path: {}\n", route.join(" -> ")));
    out.push_str(&format!("hops: {}\n", path.hops()));
    out.push_str(&format!("edges: {}\n", payloads.join(", ")));
    Ok(out)
}

fn cmd_trace(config: &GraphConfig, graph_path: &Path, from: &str, to: &str) -> Result<()> {
    let mut graph = load_graph(config, graph_path)?;
    print!("{}", describe_trace(&mut graph, from, to)?);
    Ok(())
}

fn cmd_cycles(config: &GraphConfig, graph_path: &Path) -> Result<()> {
    let mut graph = load_graph(config, graph_path)?;
    if graph.contains_cycles() {
        println!("graph contains cycles");
    } else {
        println!("graph is acyclic");
    }
    Ok(())
}

fn format_stats(stats: &GraphStats, cyclic: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("nodes:         {}\n", stats.nodes));
    out.push_str(&format!("edges:         {}\n", stats.edges));
    out.push_str(&format!("self loops:    {}\n", stats.self_loops));
    out.push_str(&format!("cyclic:        {}\n", cyclic));
    out.push_str(&format!("cache enabled: {}\n", stats.cache_enabled));
    out.push_str(&format!("cached paths:  {}\n", stats.cached_paths));
    if let Some(hint) = stats.average_path_hint {
        out.push_str(&format!("path hint:     {}\n", hint));
    }
    out
}

fn cmd_stats(config: &GraphConfig, graph_path: &Path, json: bool) -> Result<()> {
    let mut graph = load_graph(config, graph_path)?;
    let cyclic = graph.contains_cycles();
    let stats = graph.stats();
    if json {
        let mut report = serde_json::to_value(&stats)?;
        report["cyclic"] = Value::Bool(cyclic);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_stats(&stats, cyclic));
    }
    Ok(())
}

/// The nine-node sample graph used by `demo`.
fn demo_source() -> GraphSource<String, Value> {
    const EDGES: &[(&str, &str)] = &[
        ("A", "F"),
        ("A", "D"),
        ("A", "B"),
        ("D", "A"),
        ("D", "F"),
        ("F", "G"),
        ("G", "H"),
        ("H", "E"),
        ("E", "C"),
        ("C", "B"),
        ("B", "I"),
        ("B", "E"),
    ];

    GraphSource {
        nodes: ["A", "B", "C", "D", "E", "F", "G", "H", "I"]
            .iter()
            .map(|n| n.to_string())
            .collect(),
        edges: EDGES
            .iter()
            .map(|(from, to)| {
                EdgeSpec::new(
                    from.to_string(),
                    to.to_string(),
                    Value::String(format!("{from}->{to}")),
                )
            })
            .collect(),
    }
}

fn cmd_demo(config: &GraphConfig) -> Result<()> {
    let mut graph = build_graph(config, &demo_source())?;
    println!("Finding path from 'A' to 'C'");
    print!("{}", describe_trace(&mut graph, "A", "C")?);
    println!("contains cycles: {}", graph.contains_cycles());
    Ok(())
}
