//! Analysis settings forwarded opaquely to a walker, plus project-level options.

use serde::{Deserialize, Serialize};

/// The five booleans a walker may consult while traversing a syntax tree.
///
/// These are opaque to [`crate::module_analyser::ModuleAnalyser`] — it only
/// special-cases `newmi`, which changes maintainability-index post-processing
/// (see [`crate::module_analyser::calculate_metrics`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether `for...in` loops count as a decision point.
    pub forin: bool,
    /// Whether `||`/`&&` short-circuit operators count as decision points.
    pub logicalor: bool,
    /// Whether the maintainability index is remapped to a 0-100 scale.
    pub newmi: bool,
    /// Whether `switch`/`match` arms count as decision points.
    pub switchcase: bool,
    /// Whether `try`/`catch` blocks count as decision points.
    pub trycatch: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            forin: false,
            logicalor: true,
            newmi: false,
            switchcase: true,
            trycatch: false,
        }
    }
}

/// Options controlling the project-level analysis pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    /// If true, [`crate::project_analyser::ProjectAnalyser::analyse`] returns
    /// the raw per-module reports without computing the dependency graph or
    /// project averages.
    pub skip_calculation: bool,
    /// If true, the visibility matrix and core-size computation are skipped.
    pub no_core_size: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_matches_spec() {
        let s = Settings::default();
        assert!(!s.forin);
        assert!(s.logicalor);
        assert!(!s.newmi);
        assert!(s.switchcase);
        assert!(!s.trycatch);
    }

    #[test]
    fn project_options_default_is_all_false() {
        let o = ProjectOptions::default();
        assert!(!o.skip_calculation);
        assert!(!o.no_core_size);
    }
}
