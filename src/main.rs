use clap::{Parser, Subcommand};
use doctree::{Error, IndexConfig, TreeStats, config, manifest, nav, output, scan};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doctree")]
#[command(version)]
#[command(about = "Index a documentation directory into a navigation tree")]
#[command(long_about = "\
Index a documentation directory into a navigation tree

Directories become sections and markdown files become pages. Every entry
gets a site link derived from its path, and markdown front-matter is copied
into the index as metadata.

Content structure:

  docs/
  ├── index.md            # Skipped: the root page's own content
  ├── intro.md            # → /docs/intro
  └── vue/                # → /docs/vue
      ├── index.md        # Skipped
      └── basics.md       # → /docs/vue/basics, front-matter as metadata

Run 'doctree gen-config' to print a documented doctree.toml.")]
struct Cli {
    /// Documentation directory to index
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// JSON index file
    #[arg(long, default_value = "docsTree.json", global = true)]
    output: PathBuf,

    /// Config file (optional; defaults apply when missing)
    #[arg(long, default_value = "doctree.toml", global = true)]
    config: PathBuf,

    /// Log every indexed entry
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the tree and write the JSON index
    Index,
    /// Build the tree without writing anything
    Check,
    /// Print the tree of the source directory
    Tree,
    /// Print navigation menu entries from the written index
    Nav {
        /// Print the entries of one section instead
        #[arg(long)]
        section: Option<String>,
    },
    /// Print a stock doctree.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config)?;
    init_thread_pool(&config.processing);

    match &cli.command {
        Command::Index => {
            let tree = doctree::run_index(&cli.source, &cli.output, &config)?;
            output::print_summary(&TreeStats::collect(&tree), Some(&cli.output));
        }
        Command::Check => {
            let tree = scan::build_tree(&cli.source, &config)?;
            output::print_summary(&TreeStats::collect(&tree), None);
        }
        Command::Tree => {
            let tree = scan::build_tree(&cli.source, &config)?;
            output::print_tree(&root_label(&cli.source), &tree);
        }
        Command::Nav { section } => print_nav(&cli.output, &config, section.as_deref())?,
        Command::GenConfig => {}
    }

    Ok(())
}

fn print_nav(index: &Path, config: &IndexConfig, section: Option<&str>) -> Result<(), Error> {
    let tree = manifest::read_tree(index)?;
    match section {
        Some(name) => match nav::find_section(&tree, name) {
            Some(items) => output::print_section(name, items),
            None => tracing::warn!(section = name, "No such section in the index"),
        },
        None => output::print_nav(&nav::nav_entries(&tree, &config.nav.reserved)),
    }
    Ok(())
}

/// `--verbose` forces debug logging; otherwise `RUST_LOG`, defaulting to warnings.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the config can lower it, not raise it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn root_label(source: &Path) -> String {
    source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string())
}
