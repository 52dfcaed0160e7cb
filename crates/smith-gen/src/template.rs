//! Skeleton test class used when no test file exists yet.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use smith_parser::{SyntaxTree, parse_source};

use crate::error::GenError;
use crate::merger::has_class;

/// A parsed skeleton. The tree is shared and never mutated; merging always
/// works on a clone.
#[derive(Debug, Clone)]
pub struct Template {
    path: PathBuf,
    tree: Arc<SyntaxTree>,
}

impl Template {
    /// Read and parse the skeleton at `path`.
    ///
    /// # Errors
    ///
    /// - [`GenError::MissingTemplate`] if the file cannot be read
    /// - [`GenError::InvalidTemplate`] if it does not parse or declares no class
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let source = std::fs::read_to_string(path).map_err(|source| GenError::MissingTemplate {
            path: path.to_path_buf(),
            source,
        })?;
        let tree = parse_source(&source, &path.display().to_string()).map_err(|error| {
            GenError::InvalidTemplate {
                path: path.to_path_buf(),
                reason: error.to_string(),
            }
        })?;
        if !has_class(&tree) {
            return Err(GenError::InvalidTemplate {
                path: path.to_path_buf(),
                reason: "no class declaration".to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            tree: Arc::new(tree),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared handle to the prototype tree.
    #[must_use]
    pub fn tree(&self) -> Arc<SyntaxTree> {
        Arc::clone(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_valid_skeleton() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ExampleTest.php");
        fs::write(&path, "<?php\nclass ExampleTest {}\n").unwrap();

        let template = Template::load(&path).expect("loads");
        assert_eq!(template.path(), path);
        assert_eq!(template.tree().source(), "<?php\nclass ExampleTest {}\n");
    }

    #[test]
    fn missing_file_is_missing_template() {
        let tmp = tempfile::tempdir().unwrap();
        let error = Template::load(&tmp.path().join("Nope.php")).expect_err("must fail");
        assert!(matches!(error, GenError::MissingTemplate { .. }));
    }

    #[test]
    fn broken_or_classless_skeleton_is_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let broken = tmp.path().join("Broken.php");
        fs::write(&broken, "<?php\nclass {\n").unwrap();
        let classless = tmp.path().join("Classless.php");
        fs::write(&classless, "<?php\nfunction helper() {}\n").unwrap();

        for path in [broken, classless] {
            let error = Template::load(&path).expect_err("must fail");
            assert!(matches!(error, GenError::InvalidTemplate { .. }), "{error}");
        }
    }
}
