//! Build results: per-package outcomes rolled up into a report.

use std::path::PathBuf;
use std::time::Duration;

use crate::minify::Diagnostic;

/// Outcome of building a single package.
#[derive(Debug, Clone)]
pub struct PackageResult {
    /// Package name from the manifest
    pub name: String,
    /// Output files written, in write order
    pub files: Vec<PathBuf>,
    /// Minifier warnings collected for this package
    pub warnings: Vec<Diagnostic>,
    /// Wall-clock time spent on this package
    pub duration: Duration,
}

/// Aggregate outcome of a full project build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Per-package results, in manifest declaration order
    pub packages: Vec<PackageResult>,
    /// Wall-clock time for the whole build
    pub total_duration: Duration,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: PackageResult) {
        self.packages.push(result);
    }

    /// Total number of output files written.
    pub fn file_count(&self) -> usize {
        self.packages.iter().map(|p| p.files.len()).sum()
    }

    /// Total number of minifier warnings across all packages.
    pub fn warning_count(&self) -> usize {
        self.packages.iter().map(|p| p.warnings.len()).sum()
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Built {} package(s), {} file(s) in {:.2?}",
            self.packages.len(),
            self.file_count(),
            self.total_duration
        );
        let warnings = self.warning_count();
        if warnings > 0 {
            line.push_str(&format!(" ({warnings} warning(s))"));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minify::Severity;

    fn result(name: &str, files: usize, warnings: usize) -> PackageResult {
        PackageResult {
            name: name.to_string(),
            files: (0..files).map(|i| PathBuf::from(format!("{name}-{i}.js"))).collect(),
            warnings: (0..warnings)
                .map(|_| Diagnostic {
                    message: "w".to_string(),
                    line: None,
                    column: None,
                    severity: Severity::Warning,
                })
                .collect(),
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = BuildReport::new();
        assert_eq!(report.file_count(), 0);
        assert_eq!(report.warning_count(), 0);
        assert!(report.summary().starts_with("Built 0 package(s), 0 file(s)"));
    }

    #[test]
    fn test_counts_sum_across_packages() {
        let mut report = BuildReport::new();
        report.add(result("app", 2, 1));
        report.add(result("admin", 1, 0));

        assert_eq!(report.packages.len(), 2);
        assert_eq!(report.file_count(), 3);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_summary_mentions_warnings_only_when_present() {
        let mut report = BuildReport::new();
        report.add(result("app", 2, 0));
        assert!(!report.summary().contains("warning"));

        report.add(result("admin", 1, 3));
        assert!(report.summary().contains("3 warning(s)"));
    }
}
