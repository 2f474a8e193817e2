use lockstep::{DepthFirst, Dijkstras, Kruskals, Prims, Step, Walkthrough};
use lockstep_graph::persist::{PersistError, load_graph};
use lockstep_graph::{EdgeId, Graph, NodeId};
use std::io::BufRead;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Persist(PersistError),
    UnknownNode(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Persist(err) => write!(f, "{err}"),
            CliError::UnknownNode(name) => write!(f, "No node named `{name}` in this graph"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PersistError> for CliError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Show,
    Run,
}

#[derive(Debug, Clone, Copy)]
enum Algorithm {
    DepthFirst,
    Prims,
    Kruskals,
    Dijkstras,
}

impl FromStr for Algorithm {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "depth-first" | "dfs" => Ok(Self::DepthFirst),
            "prims" => Ok(Self::Prims),
            "kruskals" => Ok(Self::Kruskals),
            "dijkstras" => Ok(Self::Dijkstras),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    algorithm: Option<Algorithm>,
    input: Option<String>,
    start: Option<String>,
    end: Option<String>,
    interactive: bool,
}

fn usage() -> &'static str {
    "lockstep-cli\n\
\n\
USAGE:\n\
  lockstep-cli show <path>\n\
  lockstep-cli run <algorithm> [--start <node-name>] [--end <node-name>] [--interactive] <path>\n\
\n\
ALGORITHMS:\n\
  depth-first   requires --start\n\
  prims         requires --start\n\
  kruskals\n\
  dijkstras     requires --start and --end\n\
\n\
NOTES:\n\
  - <path> is a graph JSON file saved by the editor.\n\
  - Batch mode advances to Finished, printing one line per step.\n\
  - With --interactive, `n` advances, `p` retreats, `q` quits.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "show" => args.command = Command::Show,
            "run" => args.command = Command::Run,
            "--start" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.start = Some(name.clone());
            }
            "--end" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.end = Some(name.clone());
            }
            "--interactive" => args.interactive = true,
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            word => {
                if matches!(args.command, Command::Run) && args.algorithm.is_none() {
                    args.algorithm = Some(
                        word.parse::<Algorithm>()
                            .map_err(|_| CliError::Usage(usage()))?,
                    );
                } else if args.input.is_none() {
                    args.input = Some(word.to_string());
                } else {
                    return Err(CliError::Usage(usage()));
                }
            }
        }
    }

    Ok(args)
}

fn node_name(graph: &Graph, node: NodeId) -> String {
    graph
        .node(node)
        .map(|n| n.name.clone())
        .unwrap_or_else(|| format!("{node:?}"))
}

fn edge_name(graph: &Graph, edge: EdgeId) -> String {
    match graph.edge(edge) {
        Some(e) => format!(
            "{}--{} ({})",
            node_name(graph, e.a()),
            node_name(graph, e.b()),
            e.weight()
        ),
        None => format!("{edge:?}"),
    }
}

fn node_by_name(graph: &Graph, name: &str) -> Result<NodeId, CliError> {
    graph
        .nodes()
        .find(|(_, node)| node.name == name)
        .map(|(id, _)| id)
        .ok_or_else(|| CliError::UnknownNode(name.to_string()))
}

/// Newly marked nodes/edges relative to the captured sets.
fn mark_diff(
    graph: &Graph,
    engine: &dyn Walkthrough,
    before_nodes: &[NodeId],
    before_edges: &[EdgeId],
) -> String {
    let mut parts: Vec<String> = Vec::new();
    for node in engine.highlights().nodes() {
        if !before_nodes.contains(&node) {
            parts.push(format!("node {}", node_name(graph, node)));
        }
    }
    for edge in engine.highlights().edges() {
        if !before_edges.contains(&edge) {
            parts.push(format!("edge {}", edge_name(graph, edge)));
        }
    }
    parts.join(", ")
}

fn advance_once(engine: &mut dyn Walkthrough, graph: &Graph, step: usize) -> Step {
    let before_nodes: Vec<NodeId> = engine.highlights().nodes().collect();
    let before_edges: Vec<EdgeId> = engine.highlights().edges().collect();
    match engine.advance() {
        Step::Finished => {
            println!("Finished after {step} steps");
            Step::Finished
        }
        Step::Advanced => {
            let diff = mark_diff(graph, engine, &before_nodes, &before_edges);
            if diff.is_empty() {
                println!("step {}", step + 1);
            } else {
                println!("step {}: {diff}", step + 1);
            }
            Step::Advanced
        }
    }
}

fn drive(engine: &mut dyn Walkthrough, graph: &Graph, interactive: bool) -> Result<(), CliError> {
    if !interactive {
        let mut step = 0usize;
        while advance_once(engine, graph, step) == Step::Advanced {
            step += 1;
        }
        return Ok(());
    }

    let mut step = 0usize;
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "n" | "next" => {
                if advance_once(engine, graph, step) == Step::Advanced {
                    step += 1;
                }
            }
            "p" | "prev" => {
                engine.retreat();
                step = step.saturating_sub(1);
                println!("retreated to step {step}");
            }
            "q" | "quit" => break,
            "" => {}
            _ => println!("commands: n(ext), p(rev), q(uit)"),
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(input) = args.input.as_deref() else {
        return Err(CliError::Usage(usage()));
    };
    let graph = load_graph(input)?;

    match args.command {
        Command::Show => {
            println!("nodes:");
            for (_, node) in graph.nodes() {
                println!("  {} at ({}, {})", node.name, node.pos.x, node.pos.y);
            }
            println!("edges:");
            for (id, _) in graph.edges() {
                println!("  {}", edge_name(&graph, id));
            }
            Ok(())
        }
        Command::Run => {
            let Some(algorithm) = args.algorithm else {
                return Err(CliError::Usage(usage()));
            };
            match algorithm {
                Algorithm::DepthFirst => {
                    let Some(start) = args.start.as_deref() else {
                        return Err(CliError::Usage(usage()));
                    };
                    let start = node_by_name(&graph, start)?;
                    let mut engine = DepthFirst::new(graph.clone(), start);
                    drive(&mut engine, &graph, args.interactive)?;
                    let order: Vec<String> = engine
                        .visited()
                        .map(|node| node_name(&graph, node))
                        .collect();
                    println!("visit order: {}", order.join(" -> "));
                    engine.cleanup();
                }
                Algorithm::Prims => {
                    let Some(start) = args.start.as_deref() else {
                        return Err(CliError::Usage(usage()));
                    };
                    let start = node_by_name(&graph, start)?;
                    let mut engine = Prims::new(graph.clone(), start);
                    drive(&mut engine, &graph, args.interactive)?;
                    println!("spanning tree weight: {}", engine.total_weight());
                    engine.cleanup();
                }
                Algorithm::Kruskals => {
                    let mut engine = Kruskals::new(graph.clone());
                    drive(&mut engine, &graph, args.interactive)?;
                    println!("spanning tree weight: {}", engine.total_weight());
                    engine.cleanup();
                }
                Algorithm::Dijkstras => {
                    let (Some(start), Some(end)) = (args.start.as_deref(), args.end.as_deref())
                    else {
                        return Err(CliError::Usage(usage()));
                    };
                    let start = node_by_name(&graph, start)?;
                    let end = node_by_name(&graph, end)?;
                    let mut engine = Dijkstras::new(graph.clone(), start, end);
                    drive(&mut engine, &graph, args.interactive)?;
                    println!("node        rank  distance  candidates");
                    for (node, record) in engine.records() {
                        let rank = record
                            .rank()
                            .map(|r| r.to_string())
                            .unwrap_or_else(|| "-".to_string());
                        let distance = record
                            .distance()
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "-".to_string());
                        let candidates: Vec<String> =
                            record.candidates().iter().map(ToString::to_string).collect();
                        println!(
                            "{:<10}  {:>4}  {:>8}  {}",
                            node_name(&graph, node),
                            rank,
                            distance,
                            candidates.join(", ")
                        );
                    }
                    engine.cleanup();
                }
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
