//! Where source declarations are scanned from.

use serde::{Deserialize, Serialize};

fn default_base() -> String {
    "app".to_string()
}

fn default_roots() -> Vec<String> {
    vec![
        "app/Services".to_string(),
        "app/Support".to_string(),
        "app/Traits".to_string(),
    ]
}

fn default_exclude() -> Vec<String> {
    vec!["Macros".to_string(), "Facades".to_string()]
}

fn default_extension() -> String {
    "php".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Directory that test namespaces and paths are made relative to.
    #[serde(default = "default_base")]
    pub base: String,

    /// Directories walked for source files.
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,

    /// Path substrings (relative to a root) that exclude a file.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Source file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            roots: default_roots(),
            exclude: default_exclude(),
            extension: default_extension(),
        }
    }
}
