//! The generation pipeline.
//!
//! scan -> parse/extract -> resolve targets -> drop collisions ->
//! plan -> merge -> print -> write, with a [`Reporter`] counting along the
//! way. Per-file and per-class failures are logged and skipped; only an
//! unusable template aborts the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use smith_config::{MethodFormat, SmithConfig};
use smith_parser::{ClassDeclaration, extract_declarations, parse_file, print_preserving};
use tracing::{debug, error, info, warn};

use crate::error::GenError;
use crate::merger::merge;
use crate::planner::plan;
use crate::report::{Reporter, Summary};
use crate::scan::{ScannedFile, scan};
use crate::target::{TargetLayout, TestTarget};
use crate::template::Template;

/// Fully resolved settings for one run; every path is absolute or relative
/// to the working directory.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub roots: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub layout: TargetLayout,
    pub template: PathBuf,
    pub method_format: MethodFormat,
    pub dry_run: bool,
    pub parallel: bool,
}

impl GeneratorSettings {
    /// Resolve `config` against `project_root`.
    #[must_use]
    pub fn from_config(config: &SmithConfig, project_root: &Path) -> Self {
        Self {
            roots: config
                .source
                .roots
                .iter()
                .map(|root| project_root.join(root))
                .collect(),
            exclude: config.source.exclude.clone(),
            layout: TargetLayout {
                source_base: project_root.join(&config.source.base),
                namespace_root: config.target.namespace.clone(),
                test_dir: project_root.join(&config.target.directory),
                extension: config.source.extension.clone(),
            },
            template: project_root.join(&config.target.template),
            method_format: config.target.method_format,
            dry_run: config.general.dry_run,
            parallel: config.general.parallel,
        }
    }
}

/// What happened to one declaration's test class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Satisfied,
}

pub struct Generator {
    settings: GeneratorSettings,
    template: Template,
}

impl Generator {
    /// Load the template and prepare a run.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::MissingTemplate`] or [`GenError::InvalidTemplate`]
    /// when the skeleton cannot be used.
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenError> {
        let template = Template::load(&settings.template)?;
        Ok(Self {
            settings,
            template,
        })
    }

    #[must_use]
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Source files this run will visit.
    #[must_use]
    pub fn scan(&self) -> Vec<ScannedFile> {
        scan(
            &self.settings.roots,
            &self.settings.layout.extension,
            &self.settings.exclude,
        )
    }

    /// Scan and generate in one go.
    #[must_use]
    pub fn run(&self) -> Summary {
        let files = self.scan();
        self.generate(&files, &|_| {})
    }

    /// Generate tests for `files`; `on_file` is called once per file parsed.
    ///
    /// Counters start from zero on every call.
    pub fn generate(&self, files: &[ScannedFile], on_file: &(dyn Fn(&Path) + Sync)) -> Summary {
        let reporter = Reporter::new();
        let extracted = self.map(files, |file| {
            let declarations = self.extract(file, &reporter);
            on_file(&file.path);
            declarations
        });

        let targets: Vec<TestTarget> = files
            .iter()
            .zip(extracted)
            .flat_map(|(file, declarations)| {
                declarations
                    .into_iter()
                    .map(move |declaration| self.settings.layout.resolve(file, declaration))
            })
            .collect();
        let targets = drop_collisions(targets);

        let outcomes = self.map(&targets, |target| match self.process(target, &reporter) {
            Ok(outcome) => Some(outcome),
            Err(error @ GenError::FileWrite { .. }) => {
                error!(class = %target.declaration.qualified_name(), %error, "skipping class");
                None
            }
            Err(error) => {
                warn!(class = %target.declaration.qualified_name(), %error, "skipping class");
                None
            }
        });

        let skipped = outcomes.iter().filter(|outcome| outcome.is_none()).count();
        let satisfied = outcomes
            .iter()
            .filter(|outcome| **outcome == Some(Outcome::Satisfied))
            .count();
        debug!(targets = targets.len(), skipped, satisfied, "generation finished");

        reporter.summary()
    }

    fn extract(&self, file: &ScannedFile, reporter: &Reporter) -> Vec<ClassDeclaration> {
        reporter.file_scanned();
        match parse_file(&file.path) {
            Ok(tree) => {
                let declarations = extract_declarations(&tree);
                reporter.classes_found(declarations.len());
                debug!(path = %file.path.display(), classes = declarations.len(), "parsed");
                declarations
            }
            Err(error) => {
                warn!(path = %file.path.display(), %error, "skipping unparsable file");
                Vec::new()
            }
        }
    }

    fn process(&self, target: &TestTarget, reporter: &Reporter) -> Result<Outcome, GenError> {
        let plan = plan(target, &self.template, self.settings.method_format)?;
        if plan.is_satisfied() {
            info!(path = %plan.target_path.display(), "skipped, test class up to date");
            return Ok(Outcome::Satisfied);
        }

        let original = plan.source.tree();
        let merged = merge(
            original,
            &plan.target_namespace,
            &plan.target_class_name,
            &plan.missing,
        )?;
        let printed = print_preserving(&merged, original);

        let outcome = if plan.source.is_existing() {
            Outcome::Updated
        } else {
            Outcome::Created
        };

        if self.settings.dry_run {
            info!(
                path = %plan.target_path.display(),
                methods = ?plan.missing,
                "dry run: would write test class"
            );
        } else {
            write_file(&plan.target_path, &printed)?;
            info!(
                path = %plan.target_path.display(),
                added = plan.missing.len(),
                "{}",
                if outcome == Outcome::Created { "created" } else { "updated" }
            );
        }

        reporter.class_updated(plan.missing.len());
        Ok(outcome)
    }

    /// Order-preserving map, on the rayon pool when parallel mode is on.
    fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.settings.parallel {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }
}

/// Remove every target whose path is claimed by more than one declaration.
fn drop_collisions(targets: Vec<TestTarget>) -> Vec<TestTarget> {
    let mut claims: HashMap<PathBuf, usize> = HashMap::new();
    for target in &targets {
        *claims.entry(target.path.clone()).or_default() += 1;
    }

    targets
        .into_iter()
        .filter(|target| {
            let unique = claims.get(&target.path).copied().unwrap_or_default() < 2;
            if !unique {
                warn!(
                    path = %target.path.display(),
                    source = %target.source_path.display(),
                    class = %target.declaration.qualified_name(),
                    "naming collision: several declarations map to this test file; skipping"
                );
            }
            unique
        })
        .collect()
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenError> {
    let to_error = |source| GenError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, contents).map_err(to_error)
}
