//! Where generated test classes go and how their methods are named.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Naming convention for generated test methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodFormat {
    /// `test_<snake_case>`
    #[default]
    Snake,
    /// `test<PascalCase>`
    Camel,
}

impl fmt::Display for MethodFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snake => f.write_str("snake"),
            Self::Camel => f.write_str("camel"),
        }
    }
}

fn default_namespace() -> String {
    "Tests\\Unit".to_string()
}

fn default_directory() -> String {
    "tests/Unit".to_string()
}

fn default_template() -> String {
    "tests/Unit/ExampleTest.php".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Root namespace of generated test classes.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Root directory of generated test files.
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Skeleton test file used when a class has no test file yet.
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default)]
    pub method_format: MethodFormat,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            directory: default_directory(),
            template: default_template(),
            method_format: MethodFormat::default(),
        }
    }
}
