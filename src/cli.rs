use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::OutputFormat;

#[derive(Parser)]
#[command(name = "mapkubeapis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map deprecated or removed Kubernetes APIs to their supported versions")]
#[command(long_about = "Rewrites a Kubernetes manifest so that API versions which are deprecated or removed in the target cluster's Kubernetes version are replaced with their supported successors. The cluster version is read from the live cluster or given with --kube-version.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite deprecated APIs in a manifest
    Map {
        /// Manifest file to rewrite ("-" reads from stdin)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// YAML map file of deprecated API mappings (defaults to the built-in catalog)
        #[arg(long, value_name = "FILE")]
        mapfile: Option<PathBuf>,

        /// Cluster Kubernetes version as <major>.<minor>, instead of asking the cluster
        #[arg(long, value_name = "VERSION", env = "MAPKUBEAPIS_KUBE_VERSION")]
        kube_version: Option<String>,

        /// Kubeconfig context to use
        #[arg(long, value_name = "NAME")]
        kube_context: Option<String>,

        /// Kubeconfig file to use
        #[arg(long, value_name = "FILE")]
        kubeconfig: Option<PathBuf>,

        /// Write the rewritten manifest to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report what would change without writing the output file
        #[arg(long)]
        dry_run: bool,

        /// Report format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the mappings that would be applied
    Mappings {
        /// YAML map file of deprecated API mappings (defaults to the built-in catalog)
        #[arg(long, value_name = "FILE")]
        mapfile: Option<PathBuf>,

        /// Listing format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
