//! Run-wide behaviour switches.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Plan, merge and print without writing any test file.
    #[serde(default)]
    pub dry_run: bool,

    /// Process files and classes on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(!config.dry_run);
        assert!(!config.parallel);
    }
}
