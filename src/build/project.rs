//! Projects: the top-level build driver.
//!
//! A project owns the packages declared in a manifest plus the shared
//! license header, and builds them in declaration order. The first package
//! failure aborts the build with the package named in the error.

use std::fs;
use std::io;
use std::time::Instant;

use thiserror::Error;

use crate::build::context::BuildOptions;
use crate::build::package::{Package, PackageError};
use crate::build::result::{BuildReport, PackageResult};
use crate::manifest::ProjectManifest;

/// Error while building a project.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A package failed to resolve, minify, or write
    #[error("package '{package}' failed: {source}")]
    Package {
        package: String,
        #[source]
        source: PackageError,
    },
    /// The output directory could not be created
    #[error("failed to create output directory: {0}")]
    OutputDir(io::Error),
}

/// A fully constructed project, ready to build.
#[derive(Debug)]
pub struct Project {
    name: String,
    license_header: String,
    packages: Vec<Package>,
    options: BuildOptions,
}

impl Project {
    /// Construct a project from its manifest.
    ///
    /// Packages are constructed in declaration order and the first invalid
    /// one fails the whole project.
    pub fn from_manifest(
        manifest: &ProjectManifest,
        options: &BuildOptions,
    ) -> Result<Self, BuildError> {
        let packages = manifest
            .pkgs
            .iter()
            .map(|pkg| {
                Package::from_manifest(pkg, options).map_err(|e| BuildError::Package {
                    package: pkg.name.clone(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: manifest.project_name.clone(),
            license_header: license_header(&manifest.license_text),
            packages,
            options: options.clone(),
        })
    }

    /// Project name from the manifest.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The comment header prepended to every output file.
    pub fn license_header(&self) -> &str {
        &self.license_header
    }

    /// Packages in declaration order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Build every package in declaration order.
    ///
    /// The output directory is created up front. Minifier warnings go to
    /// stderr; the first package error aborts the rest of the build.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();
        fs::create_dir_all(self.options.output_dir()).map_err(BuildError::OutputDir)?;

        let mut report = BuildReport::new();
        for package in &self.packages {
            let pkg_start = Instant::now();
            if self.options.verbose() {
                println!("Writing output for package '{}'...", package.name());
            }

            let output = package
                .write_output(&self.license_header)
                .map_err(|e| BuildError::Package {
                    package: package.name().to_string(),
                    source: e,
                })?;

            for warning in &output.warnings {
                eprintln!("warning: package '{}': {}", package.name(), warning);
            }
            if self.options.verbose() {
                for file in &output.files {
                    println!("    Wrote: {}", file.display());
                }
            }

            report.add(PackageResult {
                name: package.name().to_string(),
                files: output.files,
                warnings: output.warnings,
                duration: pkg_start.elapsed(),
            });
        }

        report.total_duration = start.elapsed();
        Ok(report)
    }
}

/// Render license text as a block comment, one ` * ` line per input line.
///
/// Empty text yields an empty header rather than an empty comment block.
fn license_header(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut header = String::from("/*!\n");
    for line in text.lines() {
        header.push_str(" * ");
        header.push_str(line);
        header.push('\n');
    }
    header.push_str(" */\n");
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{IncludeSpec, PackageManifest};
    use std::fs::File;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path).unwrap().write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_license_header_single_line() {
        assert_eq!(license_header("MIT"), "/*!\n * MIT\n */\n");
    }

    #[test]
    fn test_license_header_multi_line() {
        assert_eq!(
            license_header("Copyright 2026\nAll rights reserved"),
            "/*!\n * Copyright 2026\n * All rights reserved\n */\n"
        );
    }

    #[test]
    fn test_license_header_empty() {
        assert_eq!(license_header(""), "");
    }

    #[test]
    fn test_from_manifest_fails_fast_on_bad_package() {
        let temp = TempDir::new().unwrap();
        let manifest = ProjectManifest {
            project_name: "site".to_string(),
            license_text: String::new(),
            pkgs: vec![PackageManifest {
                name: "bad".to_string(),
                filename: "bundle.txt".to_string(),
                includes: vec![],
            }],
        };
        let options = BuildOptions::new(temp.path().to_path_buf(), temp.path().join("out"));

        let err = Project::from_manifest(&manifest, &options).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_build_writes_packages_in_declaration_order() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "a.js", "1;");
        create_test_file(temp.path(), "s.css", "body { color: red; }");
        let out_dir = temp.path().join("out");

        let manifest = ProjectManifest {
            project_name: "site".to_string(),
            license_text: "MIT".to_string(),
            pkgs: vec![
                PackageManifest {
                    name: "scripts".to_string(),
                    filename: "app.js".to_string(),
                    includes: vec![IncludeSpec::File("a.js".to_string())],
                },
                PackageManifest {
                    name: "styles".to_string(),
                    filename: "app.css".to_string(),
                    includes: vec![IncludeSpec::File("s.css".to_string())],
                },
            ],
        };
        let options = BuildOptions::new(temp.path().to_path_buf(), out_dir.clone())
            .with_debug_suffix("-debug".to_string());
        let project = Project::from_manifest(&manifest, &options).unwrap();

        let report = project.build().unwrap();
        assert_eq!(report.packages.len(), 2);
        assert_eq!(report.packages[0].name, "scripts");
        assert_eq!(report.packages[1].name, "styles");

        let debug = fs::read_to_string(out_dir.join("app-debug.js")).unwrap();
        assert_eq!(debug, "/*!\n * MIT\n */\n1;\n");
        assert!(out_dir.join("app.min.js").is_file());
        assert!(out_dir.join("app-debug.css").is_file());
        assert!(out_dir.join("app.min.css").is_file());
    }

    #[test]
    fn test_build_error_names_failing_package() {
        let temp = TempDir::new().unwrap();
        let manifest = ProjectManifest {
            project_name: "site".to_string(),
            license_text: String::new(),
            pkgs: vec![PackageManifest {
                name: "scripts".to_string(),
                filename: "app.js".to_string(),
                includes: vec![IncludeSpec::File("missing.js".to_string())],
            }],
        };
        let options = BuildOptions::new(temp.path().to_path_buf(), temp.path().join("out"));
        let project = Project::from_manifest(&manifest, &options).unwrap();

        let err = project.build().unwrap_err();
        assert!(matches!(err, BuildError::Package { .. }));
        assert!(err.to_string().contains("scripts"));
    }
}
