//! CLI entry point for protosearch.
//!
//! Indexes a set of files with an embedding provider, then ranks them
//! against one or more queries, once or interactively.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use protosearch::io::{ExitCode, JsonResponse, OutputFormat, QueryLine, parse_query_line, render_hits};
use protosearch::{
    EmbeddingGenerator, HashingEmbedder, Settings, SharedVectorIndex, SimilarityEngine,
    SimilarityMetric, VectorDimension, VectorError,
};
use tracing::{debug, info, warn};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Similarity search over embedded files
#[derive(Parser)]
#[command(
    name = "protosearch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rank files by similarity to one or more queries",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Initialize project
    #[command(about = "Set up .protosearch directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,

    /// Index files and rank them against queries
    #[command(
        about = "Index files and rank them against one or more queries",
        after_help = "Examples:\n  protosearch search -q \"orange cat\" -f cat.txt dog.txt\n  protosearch search -q cat -q sofa -f notes/*.txt --topk 3 --json\n  protosearch search -f notes/*.txt --interactive\n\nInteractive mode reads one query line at a time; double-quoted\nsegments are separate queries. Type 'quit' to exit."
    )]
    Search {
        /// Query text; repeat to fuse several queries into one prototype
        #[arg(short, long = "query", num_args = 1..)]
        query: Vec<String>,

        /// Files to index and rank
        #[arg(short, long = "files", num_args = 1.., required = true)]
        files: Vec<PathBuf>,

        /// Similarity metric (overrides config)
        #[arg(short, long)]
        metric: Option<SimilarityMetric>,

        /// Number of results to print (overrides config)
        #[arg(short = 'k', long)]
        topk: Option<usize>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Keep reading queries from stdin after indexing
        #[arg(short, long)]
        interactive: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(config_path) => Settings::load_from(config_path).unwrap_or_else(|e| {
            eprintln!(
                "Configuration error loading from {}: {}",
                config_path.display(),
                e
            );
            std::process::exit(ExitCode::ConfigError.into());
        }),
        None => Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        }),
    };

    init_logging(cli.debug || settings.debug);

    if let Err(e) = run(cli.command, &settings) {
        let code = e
            .downcast_ref::<VectorError>()
            .map_or(ExitCode::GeneralError, ExitCode::from_error);
        eprintln!("Error ({}): {e:#}", code.description());
        std::process::exit(code.into());
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(command: Commands, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(force)
                .map_err(|e| anyhow::anyhow!("{e}"))
                .context("Failed to write configuration file")?;
            println!("Created configuration file at: {}", path.display());
            println!("Edit this file to customize your settings.");
            Ok(())
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            println!("{}", toml::to_string_pretty(settings)?);
            Ok(())
        }

        Commands::Search {
            query,
            files,
            metric,
            topk,
            json,
            interactive,
        } => {
            if query.is_empty() && !interactive {
                return Err(VectorError::EmptyQuery)
                    .context("Pass at least one --query, or use --interactive");
            }

            let metric = metric.unwrap_or(settings.search.metric);
            let top_k = topk.or(settings.search.top_k);
            let format = OutputFormat::from_json_flag(json);

            let generator = create_generator(settings)?;
            let engine = SimilarityEngine::new(SharedVectorIndex::new(), metric)
                .with_expected_dimension(generator.dimension());

            index_files(&engine, &files, generator.as_ref())?;

            if !query.is_empty() {
                let queries: Vec<&str> = query.iter().map(String::as_str).collect();
                let hits = engine.search_texts(&queries, generator.as_ref(), top_k)?;
                println!("{}", render_hits(&hits, metric, format)?);
            }

            if interactive {
                interactive_loop(&engine, generator.as_ref(), top_k, format)?;
            }
            Ok(())
        }
    }
}

fn create_generator(settings: &Settings) -> anyhow::Result<Box<dyn EmbeddingGenerator>> {
    match settings.embedding.provider.as_str() {
        "hashing" => {
            let dimension = VectorDimension::new(settings.embedding.dimension)
                .context("Invalid embedding.dimension in settings")?;
            Ok(Box::new(HashingEmbedder::new(dimension)))
        }
        #[cfg(feature = "fastembed")]
        "fastembed" => Ok(Box::new(protosearch::vector::FastEmbedGenerator::new(
            settings.embedding.model_cache.clone(),
        )?)),
        #[cfg(not(feature = "fastembed"))]
        "fastembed" => bail!("The fastembed provider requires building with `--features fastembed`"),
        other => bail!("Unknown embedding provider '{other}'. Expected 'hashing' or 'fastembed'"),
    }
}

fn index_files(
    engine: &SimilarityEngine,
    files: &[PathBuf],
    generator: &dyn EmbeddingGenerator,
) -> anyhow::Result<()> {
    let contents = files
        .iter()
        .map(|path| read_text(path))
        .collect::<anyhow::Result<Vec<String>>>()?;

    let ids: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
    let texts: Vec<&str> = contents.iter().map(String::as_str).collect();

    let added = engine.index_texts(&ids, &texts, generator)?;
    info!(files = added, metric = %engine.metric(), "index ready");
    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)
        .map_err(VectorError::from)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn interactive_loop(
    engine: &SimilarityEngine,
    generator: &dyn EmbeddingGenerator,
    top_k: Option<usize>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;

        let queries = match parse_query_line(&line) {
            QueryLine::Quit => break,
            QueryLine::Empty => continue,
            QueryLine::Queries(queries) => queries,
        };
        debug!(queries = queries.len(), "interactive query");

        let refs: Vec<&str> = queries.iter().map(String::as_str).collect();
        match engine.search_texts(&refs, generator, top_k) {
            Ok(hits) => println!("{}", render_hits(&hits, engine.metric(), format)?),
            Err(e) => {
                warn!("query failed: {e}");
                if format.is_json() {
                    println!("{}", serde_json::to_string(&JsonResponse::from_error(&e))?);
                } else {
                    eprintln!("Error: {e}");
                }
            }
        }
    }

    Ok(())
}
