//! Build command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use super::{Cli, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::build::{BuildOptions, Project};
use crate::manifest::load_manifest;

/// Run the build from parsed arguments.
pub fn run_build(cli: &Cli) -> ExitCode {
    if cli.debug_only && cli.minify_only {
        eprintln!("Error: --debug-only and --minify-only are mutually exclusive");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    if !cli.project_file.is_file() {
        eprintln!(
            "Error: project file not found: {}",
            cli.project_file.display()
        );
        return ExitCode::from(EXIT_ERROR);
    }

    let manifest = match load_manifest(&cli.project_file) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("Error loading project file: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Relative include paths resolve against the manifest's directory
    let manifest_dir = cli
        .project_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let output_dir = match &cli.output_dir {
        Some(dir) => dir.clone(),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: cannot determine current directory: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };

    let options = BuildOptions::new(manifest_dir, output_dir)
        .with_debug_only(cli.debug_only)
        .with_minify_only(cli.minify_only)
        .with_debug_suffix(cli.debug_suffix.clone())
        .with_minify_suffix(cli.minify_suffix.clone())
        .with_verbose(cli.verbose);

    if let Err(e) = options.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let project = match Project::from_manifest(&manifest, &options) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if cli.verbose {
        println!(
            "Loaded project '{}' ({} package(s))",
            project.name(),
            project.packages().len()
        );
    }

    match project.build() {
        Ok(report) => {
            println!("{}", report.summary());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
