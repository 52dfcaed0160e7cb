//! Where the test class for a declaration lives.

use std::path::{Component, Path, PathBuf};

use smith_parser::ClassDeclaration;

use crate::naming::TEST_CLASS_SUFFIX;
use crate::scan::ScannedFile;

/// Layout settings shared by every target.
#[derive(Debug, Clone)]
pub struct TargetLayout {
    pub source_base: PathBuf,
    pub namespace_root: String,
    pub test_dir: PathBuf,
    pub extension: String,
}

#[derive(Debug, Clone)]
pub struct TestTarget {
    pub source_path: PathBuf,
    pub declaration: ClassDeclaration,
    pub namespace: String,
    pub class_name: String,
    pub path: PathBuf,
}

impl TargetLayout {
    /// Resolve the test namespace, class name and file path for `declaration`.
    #[must_use]
    pub fn resolve(&self, file: &ScannedFile, declaration: ClassDeclaration) -> TestTarget {
        let directories = self.relative_directories(file);

        let namespace = std::iter::once(self.namespace_root.as_str())
            .chain(directories.iter().map(String::as_str))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\\");

        let class_name = format!("{}{TEST_CLASS_SUFFIX}", declaration.name);

        let mut path = self.test_dir.clone();
        path.extend(&directories);
        path.push(format!("{class_name}.{}", self.extension));

        TestTarget {
            source_path: file.path.clone(),
            declaration,
            namespace,
            class_name,
            path,
        }
    }

    /// Directory components of the file below the source base, or below the
    /// scan root when the file lives outside the base.
    fn relative_directories(&self, file: &ScannedFile) -> Vec<String> {
        let parent = file.path.parent().unwrap_or_else(|| Path::new(""));
        let relative = parent
            .strip_prefix(&self.source_base)
            .or_else(|_| parent.strip_prefix(&file.root))
            .unwrap_or_else(|_| Path::new(""));

        relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smith_parser::DeclarationKind;

    fn layout() -> TargetLayout {
        TargetLayout {
            source_base: PathBuf::from("/project/app"),
            namespace_root: "Tests\\Unit".to_string(),
            test_dir: PathBuf::from("/project/tests/Unit"),
            extension: "php".to_string(),
        }
    }

    fn declaration(name: &str) -> ClassDeclaration {
        ClassDeclaration {
            name: name.to_string(),
            namespace: None,
            kind: DeclarationKind::Class,
            methods: Vec::new(),
            span: None,
        }
    }

    fn file(path: &str, root: &str) -> ScannedFile {
        ScannedFile {
            path: PathBuf::from(path),
            root: PathBuf::from(root),
        }
    }

    #[test]
    fn mirrors_directories_below_base() {
        let target = layout().resolve(
            &file("/project/app/Services/Billing/Invoice.php", "/project/app/Services"),
            declaration("Invoice"),
        );
        assert_eq!(target.namespace, "Tests\\Unit\\Services\\Billing");
        assert_eq!(target.class_name, "InvoiceTest");
        assert_eq!(
            target.path,
            PathBuf::from("/project/tests/Unit/Services/Billing/InvoiceTest.php")
        );
    }

    #[test]
    fn file_directly_in_base_maps_to_namespace_root() {
        let target = layout().resolve(
            &file("/project/app/Kernel.php", "/project/app"),
            declaration("Kernel"),
        );
        assert_eq!(target.namespace, "Tests\\Unit");
        assert_eq!(target.path, PathBuf::from("/project/tests/Unit/KernelTest.php"));
    }

    #[test]
    fn file_outside_base_is_relative_to_its_root() {
        let target = layout().resolve(
            &file("/project/lib/Domain/Money.php", "/project/lib"),
            declaration("Money"),
        );
        assert_eq!(target.namespace, "Tests\\Unit\\Domain");
        assert_eq!(target.path, PathBuf::from("/project/tests/Unit/Domain/MoneyTest.php"));
    }

    #[test]
    fn every_declaration_in_a_file_gets_its_own_class() {
        let source = file("/project/app/Support/Pair.php", "/project/app/Support");
        let first = layout().resolve(&source, declaration("Left"));
        let second = layout().resolve(&source, declaration("Right"));
        assert_eq!(first.namespace, second.namespace);
        assert_ne!(first.path, second.path);
    }
}
