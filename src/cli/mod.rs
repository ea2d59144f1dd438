//! Command-line interface implementation
//!
//! This module provides the CLI entry point and argument definitions; the
//! build itself lives in the `build` submodule.

mod build;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Webbundle - Assemble JavaScript and CSS packages from a build manifest
#[derive(Parser)]
#[command(name = "webb")]
#[command(about = "Assemble JavaScript and CSS packages from a JSON build manifest")]
#[command(version)]
pub struct Cli {
    /// Build manifest describing the project's packages
    #[arg(short = 'p', long = "project-file", default_value = "build.json")]
    pub project_file: PathBuf,

    /// Directory the output files are written to
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Only write the debug (unminified) artifacts
    #[arg(short = 'd', long = "debug-only")]
    pub debug_only: bool,

    /// Suffix inserted before the extension of debug artifacts
    #[arg(long = "debug-suffix", default_value = "")]
    pub debug_suffix: String,

    /// Only write the minified artifacts
    #[arg(short = 'm', long = "minify-only")]
    pub minify_only: bool,

    /// Suffix inserted before the extension of minified artifacts
    #[arg(short = 's', long = "minify-suffix", default_value = ".min")]
    pub minify_suffix: String,

    /// Print per-package progress while building
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    build::run_build(&cli)
}
