//! Packages: one named output bundle per manifest entry.
//!
//! A package owns an ordered list of include directives, resolves them into
//! a deduplicated file list, concatenates the files' contents, and writes a
//! debug and a minified artifact. The combined and minified texts are each
//! computed at most once per package instance.

use std::cell::OnceCell;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::build::context::BuildOptions;
use crate::build::include::{Include, IncludeError};
use crate::manifest::{IncludeSpec, PackageManifest};
use crate::minify::{CssMinifier, Diagnostic, FileKind, JsMinifier, Minifier, MinifyError};

/// Error while building a single package.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PackageError {
    /// Package filename has no extension or an unsupported one
    #[error("package '{package}': filename '{filename}' must end in .js or .css")]
    InvalidExtension { package: String, filename: String },
    /// An include directive's target does not exist or cannot be listed
    #[error(transparent)]
    Include(#[from] IncludeError),
    /// The minifier rejected the combined contents
    #[error("package '{package}': {source}")]
    Minify {
        package: String,
        source: MinifyError,
    },
    /// Filesystem read/write failure
    #[error("package '{package}': {path}: {source}")]
    Io {
        package: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Map an output filename to a package kind. `None` for unsupported
/// extensions.
pub fn kind_from_filename(filename: &str) -> Option<FileKind> {
    match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some("js") => Some(FileKind::JavaScript),
        Some("css") => Some(FileKind::Css),
        _ => None,
    }
}

/// The source file extension a package of the given kind includes.
fn source_extension(kind: FileKind) -> &'static str {
    match kind {
        FileKind::JavaScript => ".js",
        FileKind::Css => ".css",
    }
}

fn default_minifier(kind: FileKind) -> Box<dyn Minifier> {
    match kind {
        FileKind::JavaScript => Box::new(JsMinifier),
        FileKind::Css => Box::new(CssMinifier),
    }
}

/// Files written for one package, plus any minifier warnings.
#[derive(Debug, Default, Clone)]
pub struct PackageOutput {
    /// Output files written, in write order
    pub files: Vec<PathBuf>,
    /// Minifier warnings; reported, never fatal
    pub warnings: Vec<Diagnostic>,
}

/// One named output bundle.
pub struct Package {
    name: String,
    filename: String,
    kind: FileKind,
    includes: Vec<Include>,
    options: BuildOptions,
    minifier: Box<dyn Minifier>,
    // Each computed at most once per package instance
    combined: OnceCell<String>,
    minified: OnceCell<(String, Vec<Diagnostic>)>,
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("name", &self.name)
            .field("filename", &self.filename)
            .field("kind", &self.kind)
            .field("includes", &self.includes)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Package {
    /// Build a package from its manifest entry.
    ///
    /// The package kind (JavaScript vs CSS) is selected by the output
    /// filename's extension, and determines both the source-file filter for
    /// directory/tree includes and the default minification strategy.
    pub fn from_manifest(
        manifest: &PackageManifest,
        options: &BuildOptions,
    ) -> Result<Self, PackageError> {
        let kind =
            kind_from_filename(&manifest.filename).ok_or_else(|| PackageError::InvalidExtension {
                package: manifest.name.clone(),
                filename: manifest.filename.clone(),
            })?;

        let includes = manifest
            .includes
            .iter()
            .map(|spec| build_include(spec, kind, &manifest.name, options))
            .collect();

        Ok(Self {
            name: manifest.name.clone(),
            filename: manifest.filename.clone(),
            kind,
            includes,
            options: options.clone(),
            minifier: default_minifier(kind),
            combined: OnceCell::new(),
            minified: OnceCell::new(),
        })
    }

    /// Replace the minification strategy. Used by tests and embedders.
    pub fn with_minifier(mut self, minifier: Box<dyn Minifier>) -> Self {
        self.minifier = minifier;
        self
    }

    /// Package name from the manifest.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output filename (without debug/minify suffix).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The package's source language.
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Resolve every include directive in declaration order into a
    /// deduplicated file list.
    ///
    /// First occurrence wins: a file reachable through two different
    /// directives is listed once, at the position of its first appearance.
    pub fn resolve_files(&self) -> Result<Vec<PathBuf>, PackageError> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for include in &self.includes {
            for path in include.resolve()? {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }

    /// The concatenated contents of every included file, in resolution order.
    ///
    /// A newline follows each file's content so a trailing line comment in
    /// one file cannot comment out the first line of the next. Computed at
    /// most once; repeat calls return the cached text without touching the
    /// filesystem.
    pub fn combined_contents(&self) -> Result<&str, PackageError> {
        if let Some(text) = self.combined.get() {
            return Ok(text);
        }

        let files = self.resolve_files()?;
        let mut text = String::new();
        for file in &files {
            let contents = fs::read_to_string(file).map_err(|e| PackageError::Io {
                package: self.name.clone(),
                path: file.clone(),
                source: e,
            })?;
            text.push_str(&contents);
            text.push('\n');
        }

        Ok(self.combined.get_or_init(|| text))
    }

    /// The minified contents, with any minifier warnings.
    ///
    /// The first call computes the combined contents if needed, then
    /// delegates to the package's minifier exactly once. A minifier syntax
    /// error aborts the package build; warnings are returned alongside.
    pub fn minified_contents(&self) -> Result<(&str, &[Diagnostic]), PackageError> {
        if let Some((code, warnings)) = self.minified.get() {
            return Ok((code, warnings));
        }

        let combined = self.combined_contents()?;
        let output = self
            .minifier
            .minify(combined)
            .map_err(|e| PackageError::Minify {
                package: self.name.clone(),
                source: e,
            })?;

        let (code, warnings) = self.minified.get_or_init(|| (output.code, output.warnings));
        Ok((code, warnings))
    }

    /// Write the package's artifacts under the output directory.
    ///
    /// Both candidate output files are deleted before any include directive
    /// is resolved. This ordering is mandatory: a directory or tree include
    /// pointed at a directory overlapping the output directory must never
    /// sweep up the package's own artifacts from a previous run.
    pub fn write_output(&self, license_header: &str) -> Result<PackageOutput, PackageError> {
        let out_dir = self.options.output_dir();
        let debug_path = out_dir.join(insert_suffix(&self.filename, self.options.debug_suffix()));
        let minified_path =
            out_dir.join(insert_suffix(&self.filename, self.options.minify_suffix()));

        self.remove_stale(&debug_path)?;
        self.remove_stale(&minified_path)?;

        let mut output = PackageOutput::default();

        if !self.options.minify_only() {
            let combined = self.combined_contents()?;
            self.write_file(&debug_path, license_header, combined)?;
            output.files.push(debug_path);
        }

        if !self.options.debug_only() {
            let (minified, warnings) = self.minified_contents()?;
            output.warnings.extend(warnings.iter().cloned());
            self.write_file(&minified_path, license_header, minified)?;
            output.files.push(minified_path);
        }

        Ok(output)
    }

    fn remove_stale(&self, path: &Path) -> Result<(), PackageError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PackageError::Io {
                package: self.name.clone(),
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    fn write_file(&self, path: &Path, header: &str, contents: &str) -> Result<(), PackageError> {
        let io_err = |e| PackageError::Io {
            package: self.name.clone(),
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut text = String::with_capacity(header.len() + contents.len());
        text.push_str(header);
        text.push_str(contents);
        fs::write(path, text).map_err(io_err)
    }
}

fn build_include(
    spec: &IncludeSpec,
    kind: FileKind,
    package: &str,
    options: &BuildOptions,
) -> Include {
    match spec {
        IncludeSpec::File(path) => Include::File {
            path: options.resolve_path(Path::new(path)),
            package: package.to_string(),
        },
        IncludeSpec::Directory(path) => Include::Directory {
            path: options.resolve_path(Path::new(path)),
            extension: source_extension(kind),
            package: package.to_string(),
        },
        IncludeSpec::Tree(path) => Include::Tree {
            path: options.resolve_path(Path::new(path)),
            extension: source_extension(kind),
            package: package.to_string(),
        },
    }
}

/// Insert `suffix` before the filename's extension: `app.js` + `.min` gives
/// `app.min.js`.
fn insert_suffix(filename: &str, suffix: &str) -> String {
    match filename.rfind('.') {
        Some(dot) => format!("{}{}{}", &filename[..dot], suffix, &filename[dot..]),
        None => format!("{}{}", filename, suffix),
    }
}
