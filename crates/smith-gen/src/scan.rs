//! Source file discovery.
//!
//! Walks each scan root with the `ignore` crate. Standard filters are off
//! (`.gitignore` is not consulted) except for hidden entries, which are
//! skipped. Exclusions are plain substrings of the root-relative path.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

/// A source file and the scan root that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub root: PathBuf,
}

/// Every file under `roots` with `extension`, sorted by path and deduplicated.
///
/// Missing roots and unreadable entries are logged and skipped.
#[must_use]
pub fn scan(roots: &[PathBuf], extension: &str, exclude: &[String]) -> Vec<ScannedFile> {
    let mut files = Vec::new();

    for root in roots {
        if !root.is_dir() {
            warn!(root = %root.display(), "scan root is not a directory; skipping");
            continue;
        }

        let mut builder = WalkBuilder::new(root);
        builder.standard_filters(false);
        builder.hidden(true);

        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warn!(root = %root.display(), %error, "failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(OsStr::to_str) != Some(extension) {
                continue;
            }
            let relative = slashed_relative(path, root);
            if let Some(pattern) = exclude.iter().find(|p| relative.contains(p.as_str())) {
                debug!(path = %path.display(), %pattern, "excluded");
                continue;
            }

            files.push(ScannedFile {
                path: path.to_path_buf(),
                root: root.clone(),
            });
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    files
}

/// `path` relative to `root`, with `/` separators.
fn slashed_relative(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
