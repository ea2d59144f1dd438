//! Manifest loading and validation for `build.json`

use super::schema::ProjectManifest;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default manifest filename.
pub const MANIFEST_FILENAME: &str = "build.json";

/// Manifest loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ManifestError {
    /// File I/O error
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error
    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
    /// Validation error
    #[error("Manifest validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Load and validate a manifest from a file.
///
/// # Arguments
/// - `path` - Path to a `build.json` manifest file
///
/// # Returns
/// - `Ok(ProjectManifest)` on success
/// - `Err(ManifestError)` if the file cannot be read, parsed, or validated
pub fn load_manifest(path: &Path) -> Result<ProjectManifest, ManifestError> {
    let text = fs::read_to_string(path)?;
    let manifest: ProjectManifest = serde_json::from_str(&text)?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validate requirements the schema cannot express.
///
/// Every package needs a `filename` with an extension; the supported
/// extension set is enforced later when the package model is built.
pub fn validate_manifest(manifest: &ProjectManifest) -> Result<(), ManifestError> {
    let mut errors = Vec::new();

    for pkg in &manifest.pkgs {
        if pkg.filename.is_empty() || !pkg.filename.contains('.') {
            errors.push(format!(
                "package '{}' needs a `filename` with a valid extension, got '{}'",
                pkg.name, pkg.filename
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ManifestError::Validation(errors))
    }
}
