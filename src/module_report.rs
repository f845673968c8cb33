//! The per-module report: the module's aggregate metrics, its per-function
//! reports, and the dependency records collected while walking it.

use serde::{Deserialize, Serialize};

use crate::function_report::FunctionReport;

/// A dependency record emitted by a walker's `dependencies` descriptor
/// field (spec.md §4.3). Interpreted opaquely by the module analyser; the
/// project analyser special-cases `kind == "CommonJS"` when resolving it
/// against other modules (spec.md §4.6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    /// Named `kind` rather than `type`, a reserved word in Rust; carries the
    /// same meaning as spec.md's `Dependency.type`.
    pub kind: String,
    pub path: String,
    pub line: Option<u32>,
}

/// The report for one analysed module: its aggregate metrics (a
/// [`FunctionReport`] with `name = None`), the reports for each function it
/// contains, and the dependency records collected during traversal.
///
/// Immutable once [`crate::module_analyser::ModuleAnalyser::analyse`]
/// returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleReport {
    /// Module-wide aggregate: the union (by first-seen order) of every
    /// function's Halstead bags plus any tokens encountered outside a
    /// function, with summed logical SLOC and cyclomatic counts.
    pub aggregate: FunctionReport,
    pub functions: Vec<FunctionReport>,
    pub dependencies: Vec<Dependency>,
    pub path: String,
    pub maintainability: f64,
    pub loc: f64,
    pub cyclomatic: f64,
    pub effort: f64,
    pub params: f64,
}

/// A one-line human summary of a report: its path, cyclomatic complexity,
/// and maintainability index. Not a metric itself — a convenience for
/// table/log output, the same way the teacher's reporting helpers sit next
/// to its report structs.
pub fn report_summary(report: &ModuleReport) -> String {
    format!(
        "{}: cyclomatic={:.1} maintainability={:.1}",
        report.path, report.cyclomatic, report.maintainability
    )
}
