use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

mod terminal;

use anyhow::Context;
use clap::ArgAction;
use terminal::Colorize;
use tracing::instrument;
use wcag_core::{index::CriteriaIndex, storage::DocumentStore};

/// Build the success criteria index for a WCAG documentation corpus.
///
/// The index is consumed by wcag-mcp for fast discovery queries; rebuild
/// it whenever the corpus changes.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The path to the root of the corpus; defaults to $WCAG_ROOT
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Where to write the index; defaults to <root>/criteria-index.json
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let root = corpus_root(self.root)?;
        let output = self
            .output
            .unwrap_or_else(|| root.join("criteria-index.json"));

        let index = build_and_save(&root, &output)?;

        let versions: BTreeSet<_> = index
            .records()
            .iter()
            .map(|record| record.version)
            .collect();
        println!(
            "{} {}",
            format!(
                "Indexed {} success criteria across {} version(s)",
                index.len(),
                versions.len()
            )
            .success(),
            format!("-> {}", output.display()).dim()
        );
        Ok(())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Resolves the corpus root from the argument or the `WCAG_ROOT`
/// environment variable.
fn corpus_root(arg: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let root = match arg {
        Some(root) => root,
        None => std::env::var("WCAG_ROOT")
            .map(PathBuf::from)
            .context("no --root given and WCAG_ROOT is not set")?,
    };
    anyhow::ensure!(
        root.is_dir(),
        "corpus root '{}' is not a directory",
        root.display()
    );
    Ok(root)
}

#[instrument]
fn build_and_save(root: &Path, output: &Path) -> anyhow::Result<CriteriaIndex> {
    let store = DocumentStore::new(root);
    let index = CriteriaIndex::build(&store)
        .with_context(|| format!("failed to index corpus at {}", root.display()))?;
    index
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(index)
}
