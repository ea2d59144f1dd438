//! Include directives: file, directory, and tree.
//!
//! An include directive is one manifest entry describing where a package's
//! source files come from. Resolution is a pure read of filesystem state:
//! no directive ever writes anything.

use glob::{glob_with, MatchOptions, PatternError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error resolving an include directive.
///
/// Every variant names the owning package, so a failure deep inside one
/// directive is attributable without a traversal back up the model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IncludeError {
    /// The file or directory the directive points at does not exist
    #[error("package '{package}': {target} include not found: {path}")]
    MissingPath {
        package: String,
        target: &'static str,
        path: PathBuf,
    },
    /// The directory path produced an invalid listing pattern
    #[error("package '{package}': invalid include path '{path}': {source}")]
    Pattern {
        package: String,
        path: PathBuf,
        source: PatternError,
    },
    /// IO error while listing directory entries
    #[error("package '{package}': failed to list '{path}': {source}")]
    Io {
        package: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One manifest-declared include directive, with paths already resolved
/// against the manifest directory.
///
/// The `package` field is the owning package's name, carried for error
/// attribution only.
#[derive(Debug, Clone)]
pub enum Include {
    /// A single file
    File { path: PathBuf, package: String },
    /// The immediate files of a directory matching the package's extension
    Directory {
        path: PathBuf,
        extension: &'static str,
        package: String,
    },
    /// A directory and all of its subdirectories, recursive
    Tree {
        path: PathBuf,
        extension: &'static str,
        package: String,
    },
}

impl Include {
    /// Resolve the directive into an ordered list of file paths.
    ///
    /// Directory and tree listings are filtered to names ending with the
    /// required extension, sorted by path so concatenation order never
    /// depends on filesystem enumeration order, and skip dot-prefixed
    /// entries (hidden files, `.git`, `.svn`).
    pub fn resolve(&self) -> Result<Vec<PathBuf>, IncludeError> {
        match self {
            Include::File { path, package } => {
                if !path.is_file() {
                    return Err(IncludeError::MissingPath {
                        package: package.clone(),
                        target: "file",
                        path: path.clone(),
                    });
                }
                Ok(vec![path.clone()])
            }
            Include::Directory {
                path,
                extension,
                package,
            } => list_files(path, extension, false, package),
            Include::Tree {
                path,
                extension,
                package,
            } => list_files(path, extension, true, package),
        }
    }
}

/// List files under `dir` whose names end with `extension`, optionally
/// recursing into subdirectories.
fn list_files(
    dir: &Path,
    extension: &str,
    recurse: bool,
    package: &str,
) -> Result<Vec<PathBuf>, IncludeError> {
    if !dir.is_dir() {
        return Err(IncludeError::MissingPath {
            package: package.to_string(),
            target: if recurse { "tree" } else { "directory" },
            path: dir.to_path_buf(),
        });
    }

    let pattern = if recurse {
        format!("{}/**/*{}", dir.display(), extension)
    } else {
        format!("{}/*{}", dir.display(), extension)
    };

    // Hidden files and version-control directories never match: `*` is not
    // allowed to match a leading dot.
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::default()
    };

    let entries = glob_with(&pattern, options).map_err(|e| IncludeError::Pattern {
        package: package.to_string(),
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IncludeError::Io {
            package: package.to_string(),
            path: dir.to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path).unwrap().write_all(content.as_bytes()).unwrap();
        path
    }

    fn directory(path: PathBuf) -> Include {
        Include::Directory {
            path,
            extension: ".js",
            package: "test".to_string(),
        }
    }

    fn tree(path: PathBuf) -> Include {
        Include::Tree {
            path,
            extension: ".js",
            package: "test".to_string(),
        }
    }

    #[test]
    fn test_file_include_resolves_to_single_path() {
        let temp = TempDir::new().unwrap();
        let path = create_test_file(temp.path(), "a.js", "1;");

        let include = Include::File {
            path: path.clone(),
            package: "test".to_string(),
        };
        assert_eq!(include.resolve().unwrap(), vec![path]);
    }

    #[test]
    fn test_file_include_missing_path() {
        let include = Include::File {
            path: PathBuf::from("/nonexistent/a.js"),
            package: "ui".to_string(),
        };

        let err = include.resolve().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ui"), "unexpected error: {}", message);
        assert!(message.contains("a.js"), "unexpected error: {}", message);
    }

    #[test]
    fn test_directory_include_filters_by_extension() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "x.js", "");
        create_test_file(temp.path(), "y.css", "");
        create_test_file(temp.path(), "notes.txt", "");

        let files = directory(temp.path().to_path_buf()).resolve().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("x.js"));
    }

    #[test]
    fn test_directory_include_skips_hidden_files() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "x.js", "");
        create_test_file(temp.path(), ".hidden.js", "");

        let files = directory(temp.path().to_path_buf()).resolve().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("x.js"));
    }

    #[test]
    fn test_directory_include_is_not_recursive() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "a.js", "");
        create_test_file(temp.path(), "sub/b.js", "");

        let files = directory(temp.path().to_path_buf()).resolve().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.js"));
    }

    #[test]
    fn test_directory_include_sorts_by_name() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "zeta.js", "");
        create_test_file(temp.path(), "alpha.js", "");
        create_test_file(temp.path(), "mid.js", "");

        let files = directory(temp.path().to_path_buf()).resolve().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.js", "mid.js", "zeta.js"]);
    }

    #[test]
    fn test_directory_include_missing_directory() {
        let err = directory(PathBuf::from("/nonexistent/src")).resolve().unwrap_err();
        assert!(matches!(err, IncludeError::MissingPath { .. }));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_tree_include_recurses() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "a.js", "");
        create_test_file(temp.path(), "sub/b.js", "");
        create_test_file(temp.path(), "sub/deep/c.js", "");
        create_test_file(temp.path(), "sub/skip.css", "");

        let files = tree(temp.path().to_path_buf()).resolve().unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_tree_include_is_superset_of_directory() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "a.js", "");
        create_test_file(temp.path(), "sub/b.js", "");

        let dir_files = directory(temp.path().to_path_buf()).resolve().unwrap();
        let tree_files = tree(temp.path().to_path_buf()).resolve().unwrap();

        for file in &dir_files {
            assert!(tree_files.contains(file));
        }
        assert!(tree_files.len() > dir_files.len());
    }

    #[test]
    fn test_tree_include_skips_hidden_directories() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "a.js", "");
        create_test_file(temp.path(), ".git/objects/b.js", "");

        let files = tree(temp.path().to_path_buf()).resolve().unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_tree_include_never_lists_directories() {
        let temp = TempDir::new().unwrap();
        // A directory whose name ends in .js must not appear as an entry
        fs::create_dir_all(temp.path().join("odd.js")).unwrap();
        create_test_file(temp.path(), "odd.js/inner.js", "");

        let files = tree(temp.path().to_path_buf()).resolve().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("inner.js"));
    }
}
