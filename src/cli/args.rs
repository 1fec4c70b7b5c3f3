//! CLI argument parsing using clap.

use crate::index::SectionKind;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Documentation search index generator and inspector
#[derive(Parser, Debug)]
#[command(
    name = "doxsearch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build, query and check documentation search indexes",
    long_about = "Extract symbols from C/C++ sources and Markdown pages, write the \
                  bucketed searchData files used by the documentation search box, \
                  and query or validate an existing index.",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Examples:\n  doxsearch init\n  doxsearch index include src docs\n  doxsearch search Flash\n  doxsearch search dimens --scope Bulk\n  doxsearch inspect docs/search/all_4.js\n  doxsearch validate"
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as a JSON envelope
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up .doxsearch directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display the effective settings
    Config,

    /// Build the search index from source files and pages
    Index {
        /// Files or directories to index
        #[arg(value_name = "PATH", default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output directory (overrides `output.dir`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of threads to use (overrides `indexing.parallel_threads`)
        #[arg(short, long)]
        threads: Option<usize>,

        /// List the files that would be indexed without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the symbols extracted from one file as JSONL
    Parse {
        /// Source or page file
        file: PathBuf,
    },

    /// Query an index the way the search box does
    Search {
        /// Search term (prefix of the name)
        term: String,

        /// Index directory (overrides `output.dir`)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Section to search: all, classes, functions, files, ...
        #[arg(short, long, default_value = "all")]
        section: SectionKind,

        /// Maximum number of records (overrides `search.default_limit`)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Keep only targets whose scope label contains this text
        #[arg(long)]
        scope: Option<String>,
    },

    /// Print the records of one bucket file
    Inspect {
        /// Bucket file, e.g. docs/search/all_4.js
        file: PathBuf,
    },

    /// Check the structure of an index directory
    Validate {
        /// Index directory (overrides `output.dir`)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}
