//! Minification capability for package contents.
//!
//! Minification is pluggable: a [`Minifier`] receives the combined source
//! text for one package and returns the minified text plus any warnings, or
//! fails with a structured diagnostic when the input is syntactically
//! invalid. Warnings never fail a build; errors abort the owning package.
//!
//! Built-in implementations: [`JsMinifier`] (comment and whitespace
//! stripping) and [`CssMinifier`] (lightningcss parse + minified reprint).

pub mod css;
pub mod js;

pub use css::CssMinifier;
pub use js::JsMinifier;

use thiserror::Error;

/// The source language of a package's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// JavaScript (`.js` packages)
    JavaScript,
    /// CSS (`.css` packages)
    Css,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::JavaScript => write!(f, "JavaScript"),
            FileKind::Css => write!(f, "CSS"),
        }
    }
}

/// Severity of a minifier diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Suspicious input, build continues
    Warning,
    /// Invalid input, package build aborts
    Error,
}

/// A structured message reported by a minifier.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Human-readable description of the problem
    pub message: String,
    /// 1-based source line, when known
    pub line: Option<u32>,
    /// Source column, when known
    pub column: Option<u32>,
    /// Whether this diagnostic fails the minification
    pub severity: Severity,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{}:{}: {}", line, column, self.message),
            (Some(line), None) => write!(f, "{}: {}", line, self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// Minifier failure: the input was rejected as syntactically invalid.
#[derive(Debug, Error)]
#[error("{kind} minification failed: {diagnostic}")]
pub struct MinifyError {
    /// The source language being minified
    pub kind: FileKind,
    /// What went wrong, and where
    pub diagnostic: Diagnostic,
}

/// Result of a successful minification run.
#[derive(Debug, Clone)]
pub struct MinifyOutput {
    /// The minified text
    pub code: String,
    /// Non-fatal diagnostics; surfaced to the caller, never abort the build
    pub warnings: Vec<Diagnostic>,
}

/// A size-reduction transform for one package's combined contents.
pub trait Minifier {
    /// Minify `source`, returning the transformed text and any warnings.
    fn minify(&self, source: &str) -> Result<MinifyOutput, MinifyError>;
}
