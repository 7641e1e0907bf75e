// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use sphinx_index::utils::logging::{
    format_error, format_heading, format_info, format_success, format_warning, init_logger,
};
use sphinx_index::{
    CatalogLoader, Config, HealthStatus, IndexCatalog, JsonExporter, SearchIndex, Searcher,
    Validator,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sphinx_index")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Query, verify and compare Sphinx searchindex.js files", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked search over titles, objects, index entries and terms
    Search {
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(short, long, value_name = "FILE")]
        index: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Documents containing a single term
    Lookup {
        term: String,

        /// Match every stored term starting with TERM
        #[arg(long)]
        prefix: bool,

        #[arg(short, long, value_name = "FILE")]
        index: Option<PathBuf>,
    },

    /// Documented objects whose full name contains FRAGMENT
    Objects {
        fragment: String,

        #[arg(short, long, value_name = "FILE")]
        index: Option<PathBuf>,
    },

    Stats {
        #[arg(short, long, value_name = "FILE")]
        index: Option<PathBuf>,
    },

    /// List every version found under the catalog root
    Versions {
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Load every version and report its health
    Verify {
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Compare two catalogued versions
    Diff {
        from: String,
        to: String,

        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Write an index, or with --all every catalogued version, as JSON
    Export {
        #[arg(short, long, value_name = "FILE")]
        index: Option<PathBuf>,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long)]
        all: bool,

        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Search {
            query,
            limit,
            index,
            json,
        } => cmd_search(&config, &query, limit, index.as_deref(), json)?,
        Commands::Lookup {
            term,
            prefix,
            index,
        } => cmd_lookup(&config, &term, prefix, index.as_deref())?,
        Commands::Objects { fragment, index } => {
            cmd_objects(&config, &fragment, index.as_deref())?
        }
        Commands::Stats { index } => cmd_stats(&config, index.as_deref())?,
        Commands::Versions { root } => cmd_versions(&config, root, cli.color).await?,
        Commands::Verify { root } => cmd_verify(&config, root, cli.color).await?,
        Commands::Diff { from, to, root } => cmd_diff(&config, &from, &to, root, cli.color).await?,
        Commands::Export {
            index,
            output,
            pretty,
            all,
            root,
        } => cmd_export(&config, index.as_deref(), output, pretty, all, root, cli.color).await?,
    }

    Ok(())
}

fn load_index(config: &Config, index: Option<&Path>) -> Result<SearchIndex> {
    let path = index.unwrap_or(config.index.path.as_path());
    SearchIndex::from_path(path)
        .with_context(|| format!("Failed to load search index {}", path.display()))
}

async fn load_catalog(config: &Config, root: Option<PathBuf>, colored: bool) -> Result<IndexCatalog> {
    let mut catalog_config = config.catalog.clone();
    if let Some(root) = root {
        catalog_config.root = root;
    }

    let root = catalog_config.root.clone();
    CatalogLoader::new(catalog_config)
        .with_progress(true, colored)
        .load()
        .await
        .with_context(|| format!("Failed to load catalog under {}", root.display()))
}

fn cmd_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    index: Option<&Path>,
    json: bool,
) -> Result<()> {
    Validator::validate_query(query)?;
    if let Some(limit) = limit {
        Validator::validate_limit(limit)?;
    }
    let index = load_index(config, index)?;

    let mut searcher = Searcher::new(&index, &config.search);
    if let Some(limit) = limit {
        searcher = searcher.with_limit(limit);
    }
    let results = searcher.search(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", format_warning(&format!("No results found for \"{}\"", query)));
        return Ok(());
    }

    println!("{}\n", format_heading(&format!("Search results for \"{}\"", query)));
    for (idx, result) in results.iter().enumerate() {
        print!(
            "{}. {}",
            idx + 1,
            result.format_summary(&config.index.file_suffix, 120)
        );
    }

    Ok(())
}

fn cmd_lookup(config: &Config, term: &str, prefix: bool, index: Option<&Path>) -> Result<()> {
    let index = load_index(config, index)?;
    let documents = if prefix {
        index.query_prefix(term)
    } else {
        index.query(term)
    };

    if documents.is_empty() {
        println!("{}", format_warning(&format!("No documents contain \"{}\"", term)));
        return Ok(());
    }

    for document in documents {
        println!(
            "{}\t{}",
            document.page_url(&config.index.file_suffix),
            document.title
        );
    }

    Ok(())
}

fn cmd_objects(config: &Config, fragment: &str, index: Option<&Path>) -> Result<()> {
    let index = load_index(config, index)?;
    let objects = index.find_objects(fragment);

    if objects.is_empty() {
        println!("{}", format_warning(&format!("No objects match \"{}\"", fragment)));
        return Ok(());
    }

    for object in objects {
        let page = index
            .document(object.doc)
            .map(|doc| doc.page_url(&config.index.file_suffix))
            .unwrap_or_default();
        println!(
            "{:<10} {}  {}#{}",
            object.kind,
            object.full_name(),
            page,
            object.resolved_anchor(&index.object_role(object))
        );
    }

    Ok(())
}

fn cmd_stats(config: &Config, index: Option<&Path>) -> Result<()> {
    let index = load_index(config, index)?;
    print!("{}", index.stats().format());

    for table in index.missing_optional_tables() {
        println!("{}", format_info(&format!("Table `{}` not present", table)));
    }

    Ok(())
}

async fn cmd_versions(config: &Config, root: Option<PathBuf>, colored: bool) -> Result<()> {
    let catalog = load_catalog(config, root, colored).await?;

    for entry in catalog.entries() {
        println!(
            "{}\t{} documents\t{}",
            format_heading(&entry.version),
            entry.index.len(),
            entry.path.display()
        );
    }
    for failure in catalog.failures() {
        println!(
            "{}",
            format_error(&format!("{}\t{}", failure.version, failure.error))
        );
    }
    println!("{}", format_info(&catalog.stats.format()));

    Ok(())
}

async fn cmd_verify(config: &Config, root: Option<PathBuf>, colored: bool) -> Result<()> {
    let catalog = load_catalog(config, root, colored).await?;
    let report = catalog.health();
    print!("{}", report.format());
    println!("{}", format_info(&catalog.stats.format()));

    if report.overall_status == HealthStatus::Unhealthy {
        anyhow::bail!(
            "{} of {} versions failed to load",
            report.count(HealthStatus::Unhealthy),
            report.checks.len()
        );
    }

    println!("{}", format_success("All versions loaded"));
    Ok(())
}

async fn cmd_diff(
    config: &Config,
    from: &str,
    to: &str,
    root: Option<PathBuf>,
    colored: bool,
) -> Result<()> {
    let catalog = load_catalog(config, root, colored).await?;
    let diff = catalog
        .diff(from, to)
        .with_context(|| format!("Cannot compare {} with {}", from, to))?;

    println!("{}", format_heading(&format!("{} -> {}", from, to)));
    print!("{}", diff.format());
    Ok(())
}

async fn cmd_export(
    config: &Config,
    index: Option<&Path>,
    output: Option<PathBuf>,
    pretty: bool,
    all: bool,
    root: Option<PathBuf>,
    colored: bool,
) -> Result<()> {
    let output = output.unwrap_or_else(|| config.export.output_dir.clone());
    let pretty = pretty || config.export.pretty;
    let exporter = JsonExporter::new(output)?;

    let manifest = if all {
        let catalog = load_catalog(config, root, colored).await?;
        exporter.export_catalog(&catalog, pretty)?
    } else {
        let path = index.unwrap_or(config.index.path.as_path());
        let loaded = load_index(config, Some(path))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "searchindex".to_string());
        exporter.export(&loaded, &name, pretty)?
    };

    println!(
        "{}",
        format_success(&format!(
            "Exported {} index(es) to {}: {}",
            manifest.indexes.len(),
            exporter.output_dir().display(),
            manifest.files.join(", ")
        ))
    );
    Ok(())
}
