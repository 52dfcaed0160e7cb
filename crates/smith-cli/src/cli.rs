use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use smith_config::{
    ConfigOverrides, GeneralOverrides, MethodFormat, SourceOverrides, TargetOverrides,
};

/// How the run summary is printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Test method naming convention.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum MethodFormatArg {
    Snake,
    Camel,
}

impl From<MethodFormatArg> for MethodFormat {
    fn from(value: MethodFormatArg) -> Self {
        match value {
            MethodFormatArg::Snake => Self::Snake,
            MethodFormatArg::Camel => Self::Camel,
        }
    }
}

/// Top-level CLI parser for the `tsmith` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tsmith",
    version,
    about = "Generate PHPUnit test stubs for the public methods of PHP classes"
)]
pub struct Cli {
    /// Project root; relative paths resolve against it (defaults to the current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Config file to use instead of <project>/testsmith.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source directory to scan (repeatable; replaces the configured roots)
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<String>,

    /// Skip files whose root-relative path contains PATTERN (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Source base the test directory layout mirrors
    #[arg(long, value_name = "DIR")]
    pub base: Option<String>,

    /// Root namespace of generated test classes
    #[arg(long, value_name = "NS")]
    pub namespace: Option<String>,

    /// Root directory of generated test files
    #[arg(long, value_name = "DIR")]
    pub test_dir: Option<String>,

    /// Test method naming convention
    #[arg(long, value_enum)]
    pub method_format: Option<MethodFormatArg>,

    /// Skeleton test class used for new test files
    #[arg(long, value_name = "FILE")]
    pub template: Option<String>,

    /// Plan and report without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Process files on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Summary format: table, json
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress bar)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags that were given, as the highest-priority config layer.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source: SourceOverrides {
                base: self.base.clone(),
                roots: (!self.roots.is_empty()).then(|| self.roots.clone()),
                exclude: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
            },
            target: TargetOverrides {
                namespace: self.namespace.clone(),
                directory: self.test_dir.clone(),
                template: self.template.clone(),
                method_format: self.method_format.map(MethodFormat::from),
            },
            general: GeneralOverrides {
                dry_run: self.dry_run.then_some(true),
                parallel: self.parallel.then_some(true),
            },
        }
    }
}
