//! Manifest schema types for `build.json`
//!
//! The manifest declares a project name, license text, and an ordered list of
//! packages. Each package names an output file and an ordered list of include
//! directives describing where its source files come from.
//!
//! # Manifest Format
//!
//! ```json
//! {
//!   "projectName": "my-app",
//!   "licenseText": "Copyright 2026\nMIT licensed",
//!   "pkgs": [
//!     {
//!       "name": "Application",
//!       "filename": "app.js",
//!       "includes": [
//!         { "file": "src/boot.js" },
//!         { "directory": "src/widgets" },
//!         { "tree": "src/lib" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;

/// Top-level manifest: one project and its packages.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectManifest {
    /// Project name, used for status reporting
    #[serde(rename = "projectName", default)]
    pub project_name: String,
    /// License text, newline-separated lines, wrapped into a comment header
    #[serde(rename = "licenseText", default)]
    pub license_text: String,
    /// Ordered list of package definitions (`packages` is accepted as an alias)
    #[serde(alias = "packages")]
    pub pkgs: Vec<PackageManifest>,
}

/// One package definition: a named output bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    /// Package name, used in status and error reporting
    #[serde(default)]
    pub name: String,
    /// Output filename, must end in `.js` or `.css`
    pub filename: String,
    /// Ordered list of include directives
    pub includes: Vec<IncludeSpec>,
}

/// One include entry, recognized by which key it carries.
///
/// Exactly one of `file`, `directory`, or `tree` must be present; anything
/// else fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawInclude")]
pub enum IncludeSpec {
    /// A single file
    File(String),
    /// The immediate files of a directory, non-recursive
    Directory(String),
    /// A directory and all of its subdirectories, recursive
    Tree(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInclude {
    file: Option<String>,
    directory: Option<String>,
    tree: Option<String>,
}

impl TryFrom<RawInclude> for IncludeSpec {
    type Error = String;

    fn try_from(raw: RawInclude) -> Result<Self, Self::Error> {
        match (raw.file, raw.directory, raw.tree) {
            (Some(file), None, None) => Ok(IncludeSpec::File(file)),
            (None, Some(directory), None) => Ok(IncludeSpec::Directory(directory)),
            (None, None, Some(tree)) => Ok(IncludeSpec::Tree(tree)),
            (None, None, None) => {
                Err("include entry must have one of `file`, `directory`, or `tree`".to_string())
            }
            _ => Err(
                "include entry must have exactly one of `file`, `directory`, or `tree`"
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let json = r#"{
            "projectName": "my-app",
            "licenseText": "MIT",
            "pkgs": [
                {
                    "name": "app",
                    "filename": "app.js",
                    "includes": [
                        { "file": "src/a.js" },
                        { "directory": "src/widgets" },
                        { "tree": "src/lib" }
                    ]
                }
            ]
        }"#;

        let manifest: ProjectManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.project_name, "my-app");
        assert_eq!(manifest.license_text, "MIT");
        assert_eq!(manifest.pkgs.len(), 1);

        let pkg = &manifest.pkgs[0];
        assert_eq!(pkg.name, "app");
        assert_eq!(pkg.filename, "app.js");
        assert_eq!(
            pkg.includes,
            vec![
                IncludeSpec::File("src/a.js".to_string()),
                IncludeSpec::Directory("src/widgets".to_string()),
                IncludeSpec::Tree("src/lib".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_packages_alias() {
        let json = r#"{
            "packages": [
                { "filename": "app.css", "includes": [ { "file": "a.css" } ] }
            ]
        }"#;

        let manifest: ProjectManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.pkgs.len(), 1);
        assert_eq!(manifest.project_name, "");
        assert_eq!(manifest.license_text, "");
    }

    #[test]
    fn test_include_with_no_keys_rejected() {
        let result: Result<IncludeSpec, _> = serde_json::from_str("{}");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("one of"), "unexpected error: {}", err);
    }

    #[test]
    fn test_include_with_multiple_keys_rejected() {
        let result: Result<IncludeSpec, _> =
            serde_json::from_str(r#"{ "file": "a.js", "directory": "src" }"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("exactly one"), "unexpected error: {}", err);
    }

    #[test]
    fn test_include_with_unknown_key_rejected() {
        let result: Result<IncludeSpec, _> = serde_json::from_str(r#"{ "glob": "*.js" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_without_pkgs_rejected() {
        let result: Result<ProjectManifest, _> = serde_json::from_str(r#"{ "projectName": "x" }"#);
        assert!(result.is_err());
    }
}
