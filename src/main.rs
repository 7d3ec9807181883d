//! robomod CLI - Command-line tool for swapping Custom Robo models.
//!
//! This is the main entry point for the robomod command-line application.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use robomod::prelude::*;

/// robomod - Custom Robo model swapper
#[derive(Parser)]
#[command(name = "robomod")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    dirs: Dirs,

    /// Log pattern offsets and pointer chains
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Working directories.
#[derive(Args)]
struct Dirs {
    /// Directory holding the original SFD containers
    #[arg(long, global = true, env = "ROBOMOD_SOURCES", default_value = "source_files")]
    sources: PathBuf,

    /// Directory holding the model pool
    #[arg(long, global = true, env = "ROBOMOD_MODELS", default_value = "models")]
    models: PathBuf,

    /// Directory results are written to
    #[arg(short, long, global = true, env = "ROBOMOD_OUTPUT", default_value = "result_files")]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace models in SFD containers
    Swap {
        /// Container file names in the sources directory (default: rpg_t_models.BIN, rpg_f_models.BIN)
        #[arg(short, long = "container")]
        containers: Vec<String>,

        /// Swap pair as TARGET=REPLACEMENT (repeatable, applied in order)
        #[arg(short, long = "pair", value_parser = parse_pair, conflicts_with = "plan")]
        pairs: Vec<(String, String)>,

        /// Models to replace, in order (paired with --replacements)
        #[arg(long, num_args = 1.., conflicts_with_all = ["pairs", "plan"])]
        targets: Vec<String>,

        /// Models to put in their place, in the same order as --targets
        #[arg(long, num_args = 1.., conflicts_with_all = ["pairs", "plan"])]
        replacements: Vec<String>,

        /// JSON swap plan with containers and pairs
        #[arg(long)]
        plan: Option<PathBuf>,
    },

    /// Extract model textures as TPL files
    Texture {
        /// Model layout: plain, robo or weapon
        #[arg(short, long, default_value = "plain", value_parser = parse_category)]
        category: ModelCategory,

        /// Model file names in the model pool
        #[arg(required = true)]
        models: Vec<String>,
    },

    /// Export every object of a container as a separate file
    Split {
        /// Container file name in the sources directory
        container: String,
    },

    /// Print the object table of a container
    Objects {
        /// Container file name in the sources directory
        container: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the model pool
    Models {
        /// Glob pattern to filter model names
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "robomod=debug" } else { "robomod=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    match cli.command {
        Commands::Swap {
            containers,
            pairs,
            targets,
            replacements,
            plan,
        } => {
            let selection = Selection {
                containers,
                pairs,
                targets,
                replacements,
            };
            cmd_swap(&cli.dirs, selection, plan.as_deref())?;
        }
        Commands::Texture { category, models } => {
            cmd_texture(&cli.dirs, category, &models)?;
        }
        Commands::Split { container } => {
            cmd_split(&cli.dirs, &container)?;
        }
        Commands::Objects { container, json } => {
            cmd_objects(&cli.dirs, &container, json)?;
        }
        Commands::Models { filter } => {
            cmd_models(&cli.dirs, filter.as_deref())?;
        }
    }

    Ok(())
}

/// Swap selection as given on the command line.
struct Selection {
    containers: Vec<String>,
    pairs: Vec<(String, String)>,
    targets: Vec<String>,
    replacements: Vec<String>,
}

impl Selection {
    /// Build the request from `--targets/--replacements` if given, else from
    /// `--pair`.
    fn into_request(self) -> robomod::Result<SwapRequest> {
        if !self.targets.is_empty() || !self.replacements.is_empty() {
            return SwapRequest::from_lists(self.containers, self.targets, self.replacements);
        }

        let pairs = self
            .pairs
            .into_iter()
            .map(|(target, replacement)| PairRequest {
                target,
                replacement,
            })
            .collect();
        SwapRequest::new(self.containers, pairs)
    }
}

fn cmd_swap(dirs: &Dirs, selection: Selection, plan: Option<&Path>) -> Result<()> {
    let request = match plan {
        Some(path) => SwapRequest::load(path)
            .with_context(|| format!("Failed to load swap plan {}", path.display()))?,
        None => selection.into_request().context("Invalid model selection")?,
    };

    let pool = AssetPool::open(&dirs.models).context("Failed to open model pool")?;
    let output = OutputDir::new(&dirs.output);

    for pair in request.pairs() {
        info!("{} -> {}", pair.target, pair.replacement);
    }

    let pb = spinner(format!("Patching {} containers...", request.containers().len()))?;
    let start = Instant::now();
    let outcomes = run_swap(&request, &dirs.sources, &pool, &output)
        .context("Selection rejected, nothing was patched")?;
    pb.finish_and_clear();

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => println!(
                "{} -> {} ({} replacements)",
                outcome.container,
                output.root().join(&report.written).display(),
                report.matches.iter().sum::<usize>()
            ),
            Err(e) => {
                error!("{}: {}", outcome.container, e);
                failed += 1;
            }
        }
    }

    println!(
        "Patched {} of {} containers in {:?}",
        outcomes.len() - failed,
        outcomes.len(),
        start.elapsed()
    );

    if failed > 0 {
        anyhow::bail!("{} container(s) failed", failed);
    }

    Ok(())
}

fn cmd_texture(dirs: &Dirs, category: ModelCategory, models: &[String]) -> Result<()> {
    let pool = AssetPool::open(&dirs.models).context("Failed to open model pool")?;
    let output = OutputDir::new(&dirs.output);

    let pb = spinner(format!("Extracting {} {} textures...", models.len(), category))?;
    let outcomes = extract_textures(models, category, &pool, &output);
    pb.finish_and_clear();

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(name) => println!("{} -> {}", outcome.model, name),
            Err(e) => {
                error!("{}: {}", outcome.model, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} extraction(s) failed", failed, outcomes.len());
    }

    Ok(())
}

fn cmd_split(dirs: &Dirs, container: &str) -> Result<()> {
    let path = dirs.sources.join(container);
    println!("Splitting: {}", path.display());

    let output = OutputDir::new(&dirs.output);
    let written = split_container(&path, &output).context("Failed to split container")?;

    println!("Wrote {} objects to {}", written.len(), output.root().display());

    Ok(())
}

fn cmd_objects(dirs: &Dirs, container: &str, json: bool) -> Result<()> {
    let path = dirs.sources.join(container);
    let container = Container::open(&path)
        .with_context(|| format!("Failed to read object table of {}", path.display()))?;
    let layout = container.layout();

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    if !container.has_sfd_magic() {
        println!("Warning: file does not start with \"SFD \"");
    }

    for object in &layout {
        println!("{}", object);
    }

    println!("\nTotal: {} objects", container.object_count());

    Ok(())
}

fn cmd_models(dirs: &Dirs, filter: Option<&str>) -> Result<()> {
    let pool = AssetPool::open(&dirs.models).context("Failed to open model pool")?;

    let names: Vec<&str> = match filter {
        Some(pattern) => pool.matching(pattern)?,
        None => pool.names().iter().map(String::as_str).collect(),
    };

    for name in &names {
        println!("{}", name);
    }

    println!("\nTotal: {} models", names.len());

    Ok(())
}

fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Parse `TARGET=REPLACEMENT`.
fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((target, replacement)) if !target.is_empty() && !replacement.is_empty() => {
            Ok((target.to_string(), replacement.to_string()))
        }
        _ => Err(format!("expected TARGET=REPLACEMENT, got '{}'", s)),
    }
}

fn parse_category(s: &str) -> std::result::Result<ModelCategory, String> {
    s.parse().map_err(|e: robomod::tpl::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn selection(pairs: &[(&str, &str)], targets: &[&str], replacements: &[&str]) -> Selection {
        Selection {
            containers: vec![],
            pairs: pairs
                .iter()
                .map(|(t, r)| (t.to_string(), r.to_string()))
                .collect(),
            targets: owned(targets),
            replacements: owned(replacements),
        }
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("ray_mk2.bin=metal_ape.bin").unwrap(),
            ("ray_mk2.bin".to_string(), "metal_ape.bin".to_string())
        );
        assert!(parse_pair("=b").is_err());
        assert!(parse_pair("a=").is_err());
        assert!(parse_pair("ab").is_err());
    }

    #[test]
    fn test_selection_from_lists() {
        let request = selection(&[], &["a.bin", "b.bin"], &["c.bin", "d.bin"])
            .into_request()
            .unwrap();

        assert_eq!(request.pairs().len(), 2);
        assert_eq!(request.pairs()[1].target, "b.bin");
        assert_eq!(request.pairs()[1].replacement, "d.bin");
        assert_eq!(request.containers().len(), 2);
    }

    #[test]
    fn test_selection_unbalanced_lists() {
        assert!(matches!(
            selection(&[], &["a.bin", "b.bin"], &["c.bin"]).into_request(),
            Err(robomod::Error::UnbalancedSelection { targets: 2, replacements: 1 })
        ));
        assert!(matches!(
            selection(&[], &[], &["c.bin"]).into_request(),
            Err(robomod::Error::UnbalancedSelection { targets: 0, replacements: 1 })
        ));
    }

    #[test]
    fn test_selection_from_pairs() {
        let request = selection(&[("a.bin", "b.bin")], &[], &[]).into_request().unwrap();
        assert_eq!(request.pairs()[0].replacement, "b.bin");

        assert!(matches!(
            selection(&[], &[], &[]).into_request(),
            Err(robomod::Error::EmptySelection)
        ));
    }

    #[test]
    fn test_cli_lists_conflict_with_pairs() {
        let parsed = Cli::try_parse_from([
            "robomod", "swap", "--pair", "a=b", "--targets", "a", "--replacements", "b",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "robomod", "swap", "--targets", "a", "b", "--replacements", "c", "d",
        ])
        .unwrap();
        match parsed.command {
            Commands::Swap { targets, replacements, .. } => {
                assert_eq!(targets, vec!["a", "b"]);
                assert_eq!(replacements, vec!["c", "d"]);
            }
            _ => panic!("expected swap"),
        }
    }
}
