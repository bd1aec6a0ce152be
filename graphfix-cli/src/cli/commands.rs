//! Command implementations and argument parsing for the graphfix CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use graphfix_core::{
    ClusteredConfig, DEFAULT_CLUSTER_SPREAD, DEFAULT_INTERACTION_THRESHOLD, DEFAULT_NODE_CAP,
    DirectorySink, EncodeError, GenerationError, Graph, InteractionImporterBuilder,
    JsonGraphEncoder, OutputSink, TripleFiles, TripleTextEncoder, UniformConfig,
    build_pixel_grid, generate_clustered, generate_uniform,
};
use graphfix_providers_image::{ImageProvider, ImageProviderError};
use graphfix_providers_text::{InteractionTable, InteractionTableError};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_UNIFORM_NODES: usize = 1031;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "graphfix",
    about = "Generate synthetic and imported graph fixtures for the renderer."
)]
pub struct Cli {
    /// Directory that output files are written to.
    #[arg(long = "output-dir", global = true, default_value = ".")]
    pub output_dir: PathBuf,

    /// Seed for the random number generator; OS entropy is used when omitted.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64))]
    pub seed: Option<u64>,

    /// Generator to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported generators.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Uniform point cloud with a complete edge set, written as triple files.
    Uniform(UniformArgs),
    /// Cluster-biased random graph, written as JSON.
    Clustered(ClusteredArgs),
    /// Four-connected pixel grid built from a raster image, written as JSON.
    Image(ImageArgs),
    /// Weight-filtered graph imported from an interaction table, written as JSON.
    Interactions(InteractionsArgs),
}

impl Command {
    /// Returns the subcommand name used in logs and summaries.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Uniform(_) => "uniform",
            Self::Clustered(_) => "clustered",
            Self::Image(_) => "image",
            Self::Interactions(_) => "interactions",
        }
    }
}

/// Options accepted by the `uniform` command.
#[derive(Debug, Args, Clone)]
pub struct UniformArgs {
    /// Number of nodes to generate.
    #[arg(long, default_value_t = DEFAULT_UNIFORM_NODES, value_parser = clap::value_parser!(usize))]
    pub nodes: usize,

    /// Node-value output file.
    #[arg(long, default_value = "e1.txt")]
    pub values: String,

    /// Node-layout output file.
    #[arg(long, default_value = "l1.txt")]
    pub layout: String,

    /// Edge output file.
    #[arg(long, default_value = "n1.txt")]
    pub edges: String,
}

/// Options accepted by the `clustered` command.
#[derive(Debug, Args, Clone)]
pub struct ClusteredArgs {
    /// Size of the identifier space sampled from.
    #[arg(long = "node-budget", default_value_t = 5)]
    pub node_budget: usize,

    /// Number of clusters.
    #[arg(long, default_value_t = 2)]
    pub clusters: usize,

    /// Samples per cluster; each cluster draws twice this many edges.
    #[arg(long, default_value_t = 5)]
    pub samples: usize,

    /// Standard deviation of node positions around their cluster centre.
    #[arg(long, default_value_t = DEFAULT_CLUSTER_SPREAD)]
    pub spread: f64,

    /// JSON output file.
    #[arg(long, default_value = "test_tiny2.json")]
    pub output: String,
}

/// Options accepted by the `image` command.
#[derive(Debug, Args, Clone)]
pub struct ImageArgs {
    /// Raster image to convert.
    pub path: PathBuf,

    /// JSON output file.
    #[arg(long, default_value = "a.json")]
    pub output: String,

    /// Write compact JSON instead of indented JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Options accepted by the `interactions` command.
#[derive(Debug, Args, Clone)]
pub struct InteractionsArgs {
    /// Whitespace-delimited interaction table with a header line.
    #[arg(default_value = "HAPPI_Table.txt")]
    pub path: PathBuf,

    /// Interactions must weigh strictly more than this to become edges.
    #[arg(long, default_value_t = DEFAULT_INTERACTION_THRESHOLD)]
    pub threshold: f64,

    /// Maximum number of nodes to import.
    #[arg(long = "node-cap", default_value_t = DEFAULT_NODE_CAP)]
    pub node_cap: usize,

    /// JSON output file.
    #[arg(long, default_value = "test_HAPPI.json")]
    pub output: String,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening an input file or the output directory failed.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Image decoding failed.
    #[error(transparent)]
    Image(#[from] ImageProviderError),
    /// The interaction table was unreadable or malformed.
    #[error(transparent)]
    Table(#[from] InteractionTableError),
    /// Generator configuration was rejected.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Writing an output file failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl CliError {
    /// Returns the stable error code of the underlying core error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Generation(err) => Some(err.code().as_str()),
            Self::Encode(EncodeError::Graph(err)) => Some(err.code().as_str()),
            _ => None,
        }
    }
}

/// Outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Name of the command that ran.
    pub command: &'static str,
    /// Number of nodes in the generated graph.
    pub nodes: usize,
    /// Number of edges in the generated graph.
    pub edges: usize,
    /// Output names written, in write order.
    pub files: Vec<String>,
}

impl ExecutionSummary {
    fn new(command: &'static str, graph: &Graph, files: Vec<String>) -> Self {
        Self {
            command,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            files,
        }
    }
}

/// Executes the CLI command represented by `cli`, writing into
/// `cli.output_dir`.
///
/// # Errors
/// Returns [`CliError`] when the output directory or an input cannot be
/// opened, the generator rejects its configuration, or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphfix_cli::cli::{Cli, Command, UniformArgs, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = tempfile::tempdir()?;
/// let cli = Cli {
///     output_dir: dir.path().to_path_buf(),
///     seed: Some(7),
///     command: Command::Uniform(UniformArgs {
///         nodes: 4,
///         values: "e1.txt".into(),
///         layout: "l1.txt".into(),
///         edges: "n1.txt".into(),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!((summary.nodes, summary.edges), (4, 6));
/// assert_eq!(std::fs::read_to_string(dir.path().join("n1.txt"))?.lines().count(), 6);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(output_dir = field::Empty, seed = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let Cli {
        output_dir,
        seed,
        command,
    } = cli;
    let span = Span::current();
    span.record("output_dir", field::display(output_dir.display()));
    if let Some(seed) = seed {
        span.record("seed", seed);
    }

    let mut sink = DirectorySink::open(&output_dir).map_err(|source| CliError::Io {
        path: output_dir.clone(),
        source,
    })?;
    let mut rng = seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
    execute(command, &mut rng, &mut sink)
}

#[instrument(name = "cli.execute", err, skip_all, fields(command = command.name()))]
pub(super) fn execute<R, S>(
    command: Command,
    rng: &mut R,
    sink: &mut S,
) -> Result<ExecutionSummary, CliError>
where
    R: Rng + ?Sized,
    S: OutputSink + ?Sized,
{
    let summary = match command {
        Command::Uniform(args) => run_uniform(args, rng, sink)?,
        Command::Clustered(args) => run_clustered(args, rng, sink)?,
        Command::Image(args) => run_image(args, sink)?,
        Command::Interactions(args) => run_interactions(args, rng, sink)?,
    };
    info!(
        command = summary.command,
        nodes = summary.nodes,
        edges = summary.edges,
        "command completed"
    );
    Ok(summary)
}

fn run_uniform<R, S>(
    args: UniformArgs,
    rng: &mut R,
    sink: &mut S,
) -> Result<ExecutionSummary, CliError>
where
    R: Rng + ?Sized,
    S: OutputSink + ?Sized,
{
    let UniformArgs {
        nodes,
        values,
        layout,
        edges,
    } = args;
    let graph = generate_uniform(&UniformConfig { node_count: nodes }, rng)?;
    let files = TripleFiles {
        values,
        layout,
        edges,
    };
    TripleTextEncoder.encode(&graph, sink, &files)?;
    let TripleFiles {
        values,
        layout,
        edges,
    } = files;
    Ok(ExecutionSummary::new(
        "uniform",
        &graph,
        vec![values, layout, edges],
    ))
}

fn run_clustered<R, S>(
    args: ClusteredArgs,
    rng: &mut R,
    sink: &mut S,
) -> Result<ExecutionSummary, CliError>
where
    R: Rng + ?Sized,
    S: OutputSink + ?Sized,
{
    let config = ClusteredConfig {
        node_budget: args.node_budget,
        cluster_count: args.clusters,
        samples_per_cluster: args.samples,
        spread: args.spread,
    };
    let graph = generate_clustered(&config, rng)?;
    JsonGraphEncoder::new().encode(&graph, sink, &args.output)?;
    Ok(ExecutionSummary::new("clustered", &graph, vec![args.output]))
}

#[instrument(
    name = "cli.image",
    err,
    skip_all,
    fields(path = %args.path.display(), compact = args.compact),
)]
fn run_image<S: OutputSink + ?Sized>(
    args: ImageArgs,
    sink: &mut S,
) -> Result<ExecutionSummary, CliError> {
    let provider = ImageProvider::try_from_path(&args.path)?;
    let graph = build_pixel_grid(&provider)?;
    JsonGraphEncoder::new()
        .pretty(!args.compact)
        .encode(&graph, sink, &args.output)?;
    Ok(ExecutionSummary::new("image", &graph, vec![args.output]))
}

#[instrument(name = "cli.interactions", err, skip_all, fields(path = %args.path.display()))]
fn run_interactions<R, S>(
    args: InteractionsArgs,
    rng: &mut R,
    sink: &mut S,
) -> Result<ExecutionSummary, CliError>
where
    R: Rng + ?Sized,
    S: OutputSink + ?Sized,
{
    let importer = InteractionImporterBuilder::new()
        .with_threshold(args.threshold)
        .with_node_cap(args.node_cap)
        .build()?;
    let table = InteractionTable::new(open_reader(&args.path)?);
    let graph = importer.import(table, rng)?;
    JsonGraphEncoder::new().encode(&graph, sink, &args.output)?;
    Ok(ExecutionSummary::new("interactions", &graph, vec![args.output]))
}

fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use graphfix_cli::cli::{ExecutionSummary, render_summary};
/// let summary = ExecutionSummary {
///     command: "clustered",
///     nodes: 5,
///     edges: 20,
///     files: vec!["test_tiny2.json".into()],
/// };
/// let mut out = Vec::new();
/// render_summary(&summary, &mut out)?;
/// assert_eq!(
///     String::from_utf8_lossy(&out),
///     "command: clustered\nnodes: 5\nedges: 20\nwrote: test_tiny2.json\n",
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "command: {}", summary.command)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    for file in &summary.files {
        writeln!(writer, "wrote: {file}")?;
    }
    Ok(())
}
