//! Build options shared by every package in a build.

use std::path::{Path, PathBuf};

/// Default suffix inserted into minified output filenames.
pub const DEFAULT_MINIFY_SUFFIX: &str = ".min";

/// Options controlling a single build invocation.
///
/// Constructed once by the driver and shared read-only by every package.
/// There is no process-wide state; everything a package needs to know about
/// the invocation travels through this value.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory containing the manifest; relative include paths resolve against it
    manifest_dir: PathBuf,
    /// Directory output artifacts are written into
    output_dir: PathBuf,
    /// Only write the concatenated ("debug") artifact
    debug_only: bool,
    /// Only write the minified artifact
    minify_only: bool,
    /// Suffix inserted before the extension of the debug artifact
    debug_suffix: String,
    /// Suffix inserted before the extension of the minified artifact
    minify_suffix: String,
    /// Report per-package and per-file progress on stdout
    verbose: bool,
}

impl BuildOptions {
    /// Create build options with default suffixes and no restriction flags.
    ///
    /// # Arguments
    /// - `manifest_dir` - Directory the manifest was loaded from
    /// - `output_dir` - Directory to write artifacts into
    pub fn new(manifest_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            manifest_dir,
            output_dir,
            debug_only: false,
            minify_only: false,
            debug_suffix: String::new(),
            minify_suffix: DEFAULT_MINIFY_SUFFIX.to_string(),
            verbose: false,
        }
    }

    /// Only produce the debug artifact.
    pub fn with_debug_only(mut self, debug_only: bool) -> Self {
        self.debug_only = debug_only;
        self
    }

    /// Only produce the minified artifact.
    pub fn with_minify_only(mut self, minify_only: bool) -> Self {
        self.minify_only = minify_only;
        self
    }

    /// Set the debug filename suffix.
    pub fn with_debug_suffix(mut self, suffix: String) -> Self {
        self.debug_suffix = suffix;
        self
    }

    /// Set the minified filename suffix.
    pub fn with_minify_suffix(mut self, suffix: String) -> Self {
        self.minify_suffix = suffix;
        self
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The directory relative include paths resolve against.
    pub fn manifest_dir(&self) -> &Path {
        &self.manifest_dir
    }

    /// The directory output artifacts are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether only the debug artifact is produced.
    pub fn debug_only(&self) -> bool {
        self.debug_only
    }

    /// Whether only the minified artifact is produced.
    pub fn minify_only(&self) -> bool {
        self.minify_only
    }

    /// The debug filename suffix.
    pub fn debug_suffix(&self) -> &str {
        &self.debug_suffix
    }

    /// The minified filename suffix.
    pub fn minify_suffix(&self) -> &str {
        &self.minify_suffix
    }

    /// Whether verbose mode is enabled.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Resolve a path relative to the manifest directory.
    ///
    /// If the path is absolute, returns it unchanged.
    /// If relative, joins it with the manifest directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.manifest_dir.join(path)
        }
    }

    /// Reject flag combinations that cannot produce any output.
    pub fn validate(&self) -> Result<(), String> {
        if self.debug_only && self.minify_only {
            return Err(
                "debug-only and minify-only are mutually exclusive; together they produce no output"
                    .to_string(),
            );
        }
        Ok(())
    }
}
