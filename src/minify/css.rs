//! CSS minification backed by lightningcss.

use std::sync::{Arc, RwLock};

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};

use super::{Diagnostic, FileKind, Minifier, MinifyError, MinifyOutput, Severity};

/// Minifies CSS by parsing the combined stylesheet and reprinting it without
/// whitespace. Parse errors carry the offending line and column; recoverable
/// parser complaints are surfaced as warnings.
#[derive(Debug, Default)]
pub struct CssMinifier;

impl Minifier for CssMinifier {
    fn minify(&self, source: &str) -> Result<MinifyOutput, MinifyError> {
        let warnings = Arc::new(RwLock::new(Vec::new()));
        let options = ParserOptions {
            warnings: Some(warnings.clone()),
            ..ParserOptions::default()
        };

        let stylesheet = StyleSheet::parse(source, options).map_err(|e| {
            let (line, column) = match &e.loc {
                // lightningcss reports 0-based lines
                Some(loc) => (Some(loc.line + 1), Some(loc.column)),
                None => (None, None),
            };
            MinifyError {
                kind: FileKind::Css,
                diagnostic: Diagnostic {
                    message: e.kind.to_string(),
                    line,
                    column,
                    severity: Severity::Error,
                },
            }
        })?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map_err(|e| MinifyError {
                kind: FileKind::Css,
                diagnostic: Diagnostic {
                    message: e.to_string(),
                    line: None,
                    column: None,
                    severity: Severity::Error,
                },
            })?;

        let warnings = warnings
            .read()
            .map(|collected| {
                collected
                    .iter()
                    .map(|w| Diagnostic {
                        message: w.kind.to_string(),
                        line: w.loc.as_ref().map(|loc| loc.line + 1),
                        column: w.loc.as_ref().map(|loc| loc.column),
                        severity: Severity::Warning,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(MinifyOutput {
            code: result.code,
            warnings,
        })
    }
}
