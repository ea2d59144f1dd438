//! Webbundle - library for assembling web application JS and CSS bundles
//!
//! This library provides functionality to:
//! - Parse a declarative project manifest (`build.json`)
//! - Resolve file, directory, and tree include directives into ordered,
//!   deduplicated file lists
//! - Concatenate package contents and produce a minified counterpart
//! - Write per-package "debug" and minified output artifacts

pub mod build;
pub mod cli;
pub mod manifest;
pub mod minify;
