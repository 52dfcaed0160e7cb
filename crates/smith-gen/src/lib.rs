//! # smith-gen
//!
//! PHPUnit test-class generation for testsmith.
//!
//! For every class or trait found under the configured source roots, the
//! generator works out which `public` methods lack a test, then creates or
//! extends the matching test class. Existing test files are edited in place
//! by appending method stubs; everything else in them is reprinted byte for
//! byte.
//!
//! ```no_run
//! use std::path::Path;
//! use smith_config::SmithConfig;
//! use smith_gen::{Generator, GeneratorSettings};
//!
//! let root = Path::new(".");
//! let config = SmithConfig::load(root).expect("config");
//! let generator = Generator::new(GeneratorSettings::from_config(&config, root)).expect("template");
//! let summary = generator.run();
//! println!("{} methods added", summary.methods_added);
//! ```

mod error;
pub mod generator;
pub mod merger;
pub mod naming;
pub mod planner;
pub mod report;
pub mod scan;
pub mod target;
pub mod template;

pub use error::{GenError, MergeError};
pub use generator::{Generator, GeneratorSettings, Outcome};
pub use merger::{TestClassUpdater, merge};
pub use planner::{MergeSource, TestPlan, plan};
pub use report::{Reporter, Summary};
pub use scan::{ScannedFile, scan};
pub use target::{TargetLayout, TestTarget};
pub use template::Template;
