//! Runs the module analyser across every module in a project, then builds
//! the dependency graph and project-wide averages (spec.md §4.5).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::graph::{self, Matrix};
use crate::module_analyser;
use crate::module_report::ModuleReport;
use crate::resolver;
use crate::settings::{ProjectOptions, Settings};
use crate::walker::Walker;

/// One module awaiting analysis: its syntax tree and the path it will be
/// reported under.
pub struct ModuleInput<Ast> {
    pub ast: Ast,
    pub path: String,
}

/// The full output of a project analysis: every module's report, sorted by
/// path, plus the dependency graph and project-wide averages.
///
/// When built via `options.skip_calculation`, every field past `reports` is
/// zeroed and `processed` is `false` — spec.md §4.5's "return reports
/// unprocessed" path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResult {
    pub reports: Vec<ModuleReport>,
    pub adjacency_matrix: Matrix,
    pub visibility_matrix: Matrix,
    pub first_order_density: f64,
    pub change_cost: f64,
    pub core_size: f64,
    pub avg_maintainability: f64,
    pub avg_loc: f64,
    pub avg_cyclomatic: f64,
    pub avg_effort: f64,
    pub avg_params: f64,
    /// `false` when `options.skip_calculation` was set; every scalar and
    /// matrix field above is then meaningless zero filler.
    pub processed: bool,
}

impl ProjectResult {
    fn unprocessed(reports: Vec<ModuleReport>) -> Self {
        Self {
            reports,
            adjacency_matrix: Matrix::zeros(0),
            visibility_matrix: Matrix::zeros(0),
            first_order_density: 0.0,
            change_cost: 0.0,
            core_size: 0.0,
            avg_maintainability: 0.0,
            avg_loc: 0.0,
            avg_cyclomatic: 0.0,
            avg_effort: 0.0,
            avg_params: 0.0,
            processed: false,
        }
    }
}

/// Analyses every module in `modules` with `walker`, under the same
/// `settings`, then (unless `options.skip_calculation`) builds the
/// dependency graph and project averages.
///
/// A module whose `path` is empty fails fast with [`CoreError::InvalidInput`]
/// before any walking happens (spec.md §4.5). A module whose own analysis
/// fails is re-raised as [`CoreError::PropagatedModuleError`] carrying its
/// path.
pub fn analyse<W: Walker>(
    modules: &[ModuleInput<W::Ast>],
    walker: &W,
    settings: &Settings,
    options: &ProjectOptions,
) -> Result<ProjectResult> {
    if modules.iter().any(|module| module.path.is_empty()) {
        return Err(CoreError::invalid_input("module path must not be empty"));
    }

    let mut reports = Vec::with_capacity(modules.len());
    for module in modules {
        let mut report = module_analyser::analyse(&module.ast, walker, settings)
            .map_err(|source| CoreError::propagate(module.path.clone(), source))?;
        report.path = module.path.clone();
        reports.push(report);
    }

    if options.skip_calculation {
        return Ok(ProjectResult::unprocessed(reports));
    }

    Ok(process_results(reports, options.no_core_size))
}

fn process_results(mut reports: Vec<ModuleReport>, no_core_size: bool) -> ProjectResult {
    reports.sort_by(|a, b| resolver::path_order(&a.path, &b.path));

    let adjacency_matrix = graph::build_adjacency(&reports);
    let first_order_density = graph::first_order_density(&adjacency_matrix);

    let (visibility_matrix, change_cost, core_size) = if no_core_size {
        (Matrix::zeros(reports.len()), 0.0, 0.0)
    } else {
        let (visibility_matrix, change_cost) = graph::visibility(&adjacency_matrix);
        let core_size = graph::core_size(&visibility_matrix, first_order_density);
        (visibility_matrix, change_cost, core_size)
    };

    let divisor = if reports.is_empty() {
        1.0
    } else {
        reports.len() as f64
    };
    let mut sums = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    for report in &reports {
        sums.0 += report.maintainability;
        sums.1 += report.loc;
        sums.2 += report.cyclomatic;
        sums.3 += report.effort;
        sums.4 += report.params;
    }

    ProjectResult {
        reports,
        adjacency_matrix,
        visibility_matrix,
        first_order_density,
        change_cost,
        core_size,
        avg_maintainability: sums.0 / divisor,
        avg_loc: sums.1 / divisor,
        avg_cyclomatic: sums.2 / divisor,
        avg_effort: sums.3 / divisor,
        avg_params: sums.4 / divisor,
        processed: true,
    }
}
