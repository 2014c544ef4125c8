use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use ordered_float::OrderedFloat;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use partree::{DisconnectPolicy, Graph, MstConfig, PartialTreeList, Weight};

/// partree - minimum spanning trees by merging partial trees
///
/// Reads a weighted undirected graph, prints the arcs of its minimum spanning
/// tree one per line, then the total weight.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Graph file ('-' for stdin, '.gz' is decompressed). Prompted for when omitted
    #[clap(value_name = "GRAPH")]
    graph: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[clap(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Parse weights as floating point numbers instead of integers
    #[clap(long = "float")]
    float: bool,

    /// Return a spanning forest for disconnected graphs instead of failing
    #[clap(long = "allow-forest")]
    allow_forest: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (no log output)
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    // RUST_LOG, when set, overrides the command line level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Ask for the graph file name on stderr and read it from stdin
fn prompt_graph_path() -> Result<PathBuf> {
    eprintln!("Enter graph file");
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read graph file name")?;
    let name = line.trim();
    if name.is_empty() {
        bail!("No graph file given");
    }
    Ok(PathBuf::from(name))
}

fn run<W>(args: &Args, path: &Path) -> Result<()>
where
    W: Weight,
    <W as FromStr>::Err: fmt::Display,
{
    let graph: Graph<W> = Graph::from_path(path)?;
    info!(
        "Read {} vertices and {} edges from {}",
        graph.len(),
        graph.edge_count(),
        path.display()
    );

    let policy = if args.allow_forest {
        DisconnectPolicy::Forest
    } else {
        DisconnectPolicy::Error
    };
    let config = MstConfig::new().with_disconnect_policy(policy);

    let list = PartialTreeList::initialize(&graph);
    let mst = list.execute_with(&config)?;
    let report = mst.report(&graph)?;
    info!("Tree has {} arcs with total weight {}", mst.len(), report.total());

    let mut output: Box<dyn Write> = if let Some(ref path) = args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout().lock()))
    };
    writeln!(output, "{}", report)?;
    output.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let path = match args.graph {
        Some(ref path) => path.clone(),
        None => prompt_graph_path()?,
    };

    if args.float {
        run::<OrderedFloat<f64>>(&args, &path)
    } else {
        run::<i64>(&args, &path)
    }
}
