//! Build pipeline module for webbundle
//!
//! Provides the core pipeline that turns a parsed manifest into output
//! bundles on disk.
//!
//! # Overview
//!
//! The pipeline consists of:
//! - **Include resolution**: Turn each file/directory/tree directive into an
//!   ordered list of source files
//! - **Concatenation**: Read each file once, in order, deduplicated
//! - **Minification**: Delegate the combined text to the package's minifier
//! - **Output**: Write the debug and minified artifacts per package
//!
//! # Example
//!
//! ```ignore
//! use webbundle::build::{BuildOptions, Project};
//! use webbundle::manifest::load_manifest;
//!
//! let manifest = load_manifest(&manifest_path)?;
//! let options = BuildOptions::new(manifest_dir, out_dir);
//! let project = Project::from_manifest(&manifest, &options)?;
//!
//! let report = project.build()?;
//! println!("{}", report.summary());
//! ```

pub mod context;
pub mod include;
pub mod package;
pub mod project;
pub mod result;

pub use context::*;
pub use include::*;
pub use package::*;
pub use project::*;
pub use result::*;
